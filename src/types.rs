use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{SalesError, SalesResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One sales transaction. Immutable once built; `total` is always derived.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    order_id: String,
    date: NaiveDate,
    product: String,
    category: String,
    price: f64,
    quantity: u32,
    region: String,
    customer_id: String,
    salesperson: String,
}

fn required<'a>(row: &'a HashMap<String, String>, field: &'static str) -> SalesResult<&'a str> {
    row.get(field)
        .map(String::as_str)
        .ok_or_else(|| SalesError::malformed(field, "is missing"))
}

impl SalesRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: impl Into<String>,
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u32,
        region: impl Into<String>,
        customer_id: impl Into<String>,
        salesperson: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            date,
            product: product.into(),
            category: category.into(),
            price,
            quantity,
            region: region.into(),
            customer_id: customer_id.into(),
            salesperson: salesperson.into(),
        }
    }

    /// Build a record from a column-name -> raw-value row.
    ///
    /// Text columns are copied verbatim. `date` must be `YYYY-MM-DD`, `price` a
    /// finite non-negative decimal and `quantity` a non-negative integer.
    pub fn from_row(row: &HashMap<String, String>) -> SalesResult<Self> {
        let raw_date = required(row, "date")?;
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
            SalesError::malformed("date", format!("is not a YYYY-MM-DD date: '{raw_date}'"))
        })?;

        let raw_price = required(row, "price")?;
        let price = raw_price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| {
                SalesError::malformed("price", format!("is not a non-negative number: '{raw_price}'"))
            })?;

        let raw_quantity = required(row, "quantity")?;
        let quantity = raw_quantity.parse::<u32>().map_err(|_| {
            SalesError::malformed(
                "quantity",
                format!("is not a non-negative integer: '{raw_quantity}'"),
            )
        })?;

        Ok(Self {
            order_id: required(row, "order_id")?.to_string(),
            date,
            product: required(row, "product")?.to_string(),
            category: required(row, "category")?.to_string(),
            price,
            quantity,
            region: required(row, "region")?.to_string(),
            customer_id: required(row, "customer_id")?.to_string(),
            salesperson: required(row, "salesperson")?.to_string(),
        })
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn salesperson(&self) -> &str {
        &self.salesperson
    }

    /// `price * quantity`, recomputed on every call.
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Zero-padded `YYYY-MM`, so labels sort chronologically as strings.
    pub fn month_label(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

impl fmt::Display for SalesRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SalesRecord({}, {}, ${:.2})",
            self.order_id,
            self.product,
            self.total()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    pub product: String,
    pub revenue: f64,
    pub quantity_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonPerformance {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub average_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatistics {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub total_quantity: u64,
    pub average_price: f64,
    pub max_order: f64,
    pub min_order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSpending {
    pub customer_id: String,
    pub total_spending: f64,
    pub order_count: usize,
}

/// Every report over one record set, as emitted by `salesrail report --json`.
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub record_count: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub revenue_by_category: BTreeMap<String, f64>,
    pub revenue_by_region: BTreeMap<String, f64>,
    pub revenue_by_month: BTreeMap<String, f64>,
    pub top_products: Vec<ProductRevenue>,
    pub salesperson_performance: BTreeMap<String, SalespersonPerformance>,
    pub category_statistics: BTreeMap<String, CategoryStatistics>,
    pub high_value_customers: Vec<CustomerSpending>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop_row() -> HashMap<String, String> {
        [
            ("order_id", "1001"),
            ("date", "2024-01-15"),
            ("product", "Laptop"),
            ("category", "Electronics"),
            ("price", "1200.00"),
            ("quantity", "2"),
            ("region", "North"),
            ("customer_id", "C001"),
            ("salesperson", "SP001"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn from_row_parses_every_field() {
        let record = SalesRecord::from_row(&laptop_row()).unwrap();

        assert_eq!(record.order_id(), "1001");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(record.product(), "Laptop");
        assert_eq!(record.category(), "Electronics");
        assert_eq!(record.price(), 1200.0);
        assert_eq!(record.quantity(), 2);
        assert_eq!(record.region(), "North");
        assert_eq!(record.customer_id(), "C001");
        assert_eq!(record.salesperson(), "SP001");
        assert_eq!(record.total(), 2400.0);
        assert_eq!(record.month_label(), "2024-01");
    }

    #[test]
    fn display_shows_order_product_and_total() {
        let record = SalesRecord::from_row(&laptop_row()).unwrap();
        assert_eq!(record.to_string(), "SalesRecord(1001, Laptop, $2400.00)");
    }

    #[test]
    fn text_fields_are_not_normalized() {
        let mut row = laptop_row();
        row.insert("category".into(), " electronics ".into());
        let record = SalesRecord::from_row(&row).unwrap();
        assert_eq!(record.category(), " electronics ");
    }

    #[test]
    fn missing_field_is_malformed() {
        let mut row = laptop_row();
        row.remove("salesperson");
        let err = SalesRecord::from_row(&row).unwrap_err();
        assert!(matches!(
            err,
            SalesError::MalformedRecord {
                field: "salesperson",
                ..
            }
        ));
    }

    #[test]
    fn unparseable_values_are_malformed() {
        for (field, value) in [
            ("date", "15/01/2024"),
            ("date", "2024-02-30"),
            ("price", "twelve"),
            ("price", "-1.00"),
            ("price", "NaN"),
            ("quantity", "2.5"),
            ("quantity", "-3"),
        ] {
            let mut row = laptop_row();
            row.insert(field.to_string(), value.to_string());
            match SalesRecord::from_row(&row) {
                Err(SalesError::MalformedRecord { field: f, .. }) => assert_eq!(f, field),
                other => panic!("{field}={value:?} should be malformed, got {other:?}"),
            }
        }
    }
}
