use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::aggregate::{average, count, group_by, max_or, min_or, sum, sum_u64};
use crate::debug_log;
use crate::error::{SalesError, SalesResult};
use crate::loader;
use crate::types::{
    CategoryStatistics, CustomerSpending, DATE_FORMAT, ProductRevenue, SalesRecord, SalesSummary,
    SalespersonPerformance,
};

pub const DEFAULT_TOP_PRODUCTS: usize = 5;
pub const DEFAULT_MIN_SPENDING: f64 = 1000.0;

fn revenue(records: &[&SalesRecord]) -> f64 {
    sum(records.iter().map(|r| r.total()))
}

fn quantity(records: &[&SalesRecord]) -> u64 {
    sum_u64(records.iter().map(|r| u64::from(r.quantity())))
}

/// Read-only reports and filters over a record set that is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct SalesAnalyzer {
    records: Vec<SalesRecord>,
}

impl SalesAnalyzer {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        debug_log::log("ANALYZER", "new", &format!("{} records", records.len()));
        Self { records }
    }

    /// Load every row of a CSV export. Any malformed row fails the whole load.
    pub fn from_csv_path(path: impl AsRef<Path>) -> SalesResult<Self> {
        loader::load_csv_path(path).map(Self::new)
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn revenue_by<F>(&self, report: &str, key_fn: F) -> BTreeMap<String, f64>
    where
        F: Fn(&SalesRecord) -> String,
    {
        let groups = group_by(&self.records, key_fn);
        debug_log::log("REPORT", report, &format!("{} buckets", groups.len()));

        groups
            .into_iter()
            .map(|(key, records)| {
                let total = revenue(&records);
                (key, total)
            })
            .collect()
    }

    pub fn total_revenue(&self) -> f64 {
        sum(self.records.iter().map(SalesRecord::total))
    }

    pub fn revenue_by_category(&self) -> BTreeMap<String, f64> {
        self.revenue_by("revenue_by_category", |r| r.category().to_string())
    }

    pub fn revenue_by_region(&self) -> BTreeMap<String, f64> {
        self.revenue_by("revenue_by_region", |r| r.region().to_string())
    }

    /// Revenue per `YYYY-MM` label, ascending by label.
    pub fn revenue_by_month(&self) -> BTreeMap<String, f64> {
        self.revenue_by("revenue_by_month", SalesRecord::month_label)
    }

    /// The `n` products with the highest revenue.
    ///
    /// Equal revenues keep bucket order, which is ascending product name.
    pub fn top_products(&self, n: usize) -> Vec<ProductRevenue> {
        let groups = group_by(&self.records, |r| r.product().to_string());

        let mut products: Vec<ProductRevenue> = groups
            .into_iter()
            .map(|(product, records)| ProductRevenue {
                revenue: revenue(&records),
                quantity_sold: quantity(&records),
                product,
            })
            .collect();

        // sort_by is stable; ties stay in bucket order.
        products.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        products.truncate(n);
        products
    }

    /// Total revenue divided by record count; 0.0 for an empty set.
    pub fn average_order_value(&self) -> f64 {
        average(self.total_revenue(), self.records.len())
    }

    pub fn salesperson_performance(&self) -> BTreeMap<String, SalespersonPerformance> {
        group_by(&self.records, |r| r.salesperson().to_string())
            .into_iter()
            .map(|(salesperson, records)| {
                let total_revenue = revenue(&records);
                let total_orders = count(&records);
                let stats = SalespersonPerformance {
                    total_revenue,
                    total_orders,
                    average_order_value: average(total_revenue, total_orders),
                };
                (salesperson, stats)
            })
            .collect()
    }

    pub fn category_statistics(&self) -> BTreeMap<String, CategoryStatistics> {
        group_by(&self.records, |r| r.category().to_string())
            .into_iter()
            .map(|(category, records)| {
                let total_orders = count(&records);
                let order_totals = || records.iter().map(|r| r.total());
                let stats = CategoryStatistics {
                    total_revenue: sum(order_totals()),
                    total_orders,
                    total_quantity: quantity(&records),
                    average_price: average(sum(records.iter().map(|r| r.price())), total_orders),
                    max_order: max_or(order_totals(), 0.0),
                    min_order: min_or(order_totals(), 0.0),
                };
                (category, stats)
            })
            .collect()
    }

    /// Customers whose summed spending is at least `min_spending`, in customer id order.
    pub fn high_value_customers(&self, min_spending: f64) -> Vec<CustomerSpending> {
        group_by(&self.records, |r| r.customer_id().to_string())
            .into_iter()
            .map(|(customer_id, records)| CustomerSpending {
                total_spending: revenue(&records),
                order_count: count(&records),
                customer_id,
            })
            .filter(|c| c.total_spending >= min_spending)
            .collect()
    }

    /// Records whose category equals `category` exactly (case-sensitive).
    pub fn filter_by_category(&self, category: &str) -> Vec<&SalesRecord> {
        self.filter("category", |r| r.category() == category)
    }

    /// Records dated within `[start, end]`, both bounds given as `YYYY-MM-DD`.
    pub fn filter_by_date_range(&self, start: &str, end: &str) -> SalesResult<Vec<&SalesRecord>> {
        let start = parse_bound("start", start)?;
        let end = parse_bound("end", end)?;
        Ok(self.filter_by_dates(start, end))
    }

    /// Records dated within `[start, end]`. Empty when `start > end`.
    pub fn filter_by_dates(&self, start: NaiveDate, end: NaiveDate) -> Vec<&SalesRecord> {
        self.filter("dates", |r| (start..=end).contains(&r.date()))
    }

    /// Records whose total is at least `min_amount`.
    pub fn filter_by_minimum_amount(&self, min_amount: f64) -> Vec<&SalesRecord> {
        self.filter("minimum_amount", |r| r.total() >= min_amount)
    }

    fn filter<P>(&self, name: &str, predicate: P) -> Vec<&SalesRecord>
    where
        P: Fn(&SalesRecord) -> bool,
    {
        let matched: Vec<&SalesRecord> = self.records.iter().filter(|&r| predicate(r)).collect();
        debug_log::log(
            "FILTER",
            name,
            &format!("{} of {} records", matched.len(), self.records.len()),
        );
        matched
    }

    /// Every report at once.
    pub fn summary(&self, top_n: usize, min_spending: f64) -> SalesSummary {
        let _span = debug_log::TimedSpan::new("REPORT", "summary");

        SalesSummary {
            record_count: self.len(),
            total_revenue: self.total_revenue(),
            average_order_value: self.average_order_value(),
            revenue_by_category: self.revenue_by_category(),
            revenue_by_region: self.revenue_by_region(),
            revenue_by_month: self.revenue_by_month(),
            top_products: self.top_products(top_n),
            salesperson_performance: self.salesperson_performance(),
            category_statistics: self.category_statistics(),
            high_value_customers: self.high_value_customers(min_spending),
        }
    }
}

impl From<Vec<SalesRecord>> for SalesAnalyzer {
    fn from(records: Vec<SalesRecord>) -> Self {
        Self::new(records)
    }
}

fn parse_bound(bound: &'static str, value: &str) -> SalesResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| SalesError::InvalidRange {
        bound,
        value: value.to_string(),
    })
}
