//! Plain-text rendering of the analyzer's reports.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;

use crate::analyzer::SalesAnalyzer;
use crate::config::ReportConfig;
use crate::types::{CustomerSpending, ProductRevenue, SalesRecord};
use crate::utils::{NumberFormatOptions, format_currency, format_number};

const RULE_WIDTH: usize = 80;

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Entries sorted by value descending; equal values keep key order.
fn by_value_desc<V>(map: &BTreeMap<String, V>, value: impl Fn(&V) -> f64) -> Vec<(&String, &V)> {
    let mut sorted: Vec<(&String, &V)> = map.iter().collect();
    sorted.sort_by(|a, b| value(b.1).total_cmp(&value(a.1)));
    sorted
}

pub fn render_report(
    analyzer: &SalesAnalyzer,
    report: &ReportConfig,
    options: &NumberFormatOptions,
) -> Result<String> {
    let money = |amount: f64| format_currency(amount, options);
    let mut out = String::new();

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "SALES DATA ANALYSIS REPORT")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;

    heading(&mut out, "1. TOTAL REVENUE")?;
    writeln!(out, "Total Revenue: {}", money(analyzer.total_revenue()))?;
    writeln!(out)?;

    heading(&mut out, "2. REVENUE BY CATEGORY")?;
    let by_category = analyzer.revenue_by_category();
    for (category, revenue) in by_value_desc(&by_category, |v| *v) {
        writeln!(out, "{category:20}: {}", money(*revenue))?;
    }
    writeln!(out)?;

    heading(&mut out, "3. REVENUE BY REGION")?;
    let by_region = analyzer.revenue_by_region();
    for (region, revenue) in by_value_desc(&by_region, |v| *v) {
        writeln!(out, "{region:20}: {}", money(*revenue))?;
    }
    writeln!(out)?;

    heading(
        &mut out,
        &format!("4. TOP {} PRODUCTS BY REVENUE", report.top_products),
    )?;
    write_products(&mut out, &analyzer.top_products(report.top_products), options)?;
    writeln!(out)?;

    heading(&mut out, "5. REVENUE BY MONTH")?;
    for (month, revenue) in &analyzer.revenue_by_month() {
        writeln!(out, "{month}: {}", money(*revenue))?;
    }
    writeln!(out)?;

    heading(&mut out, "6. AVERAGE ORDER VALUE")?;
    writeln!(
        out,
        "Average Order Value: {}",
        money(analyzer.average_order_value())
    )?;
    writeln!(out)?;

    heading(&mut out, "7. PERFORMANCE BY SALESPERSON")?;
    let performance = analyzer.salesperson_performance();
    for (salesperson, stats) in by_value_desc(&performance, |s| s.total_revenue) {
        writeln!(
            out,
            "{salesperson}: Revenue: {}, Orders: {}, Avg Order: {}",
            money(stats.total_revenue),
            format_number(stats.total_orders as u64, options),
            money(stats.average_order_value)
        )?;
    }
    writeln!(out)?;

    heading(&mut out, "8. DETAILED CATEGORY STATISTICS")?;
    let category_stats = analyzer.category_statistics();
    for (category, stats) in by_value_desc(&category_stats, |s| s.total_revenue) {
        writeln!(out)?;
        writeln!(out, "{category}:")?;
        writeln!(out, "  Total Revenue: {}", money(stats.total_revenue))?;
        writeln!(
            out,
            "  Total Orders: {}",
            format_number(stats.total_orders as u64, options)
        )?;
        writeln!(
            out,
            "  Total Quantity: {}",
            format_number(stats.total_quantity, options)
        )?;
        writeln!(out, "  Average Price: {}", money(stats.average_price))?;
        writeln!(out, "  Max Order: {}", money(stats.max_order))?;
        writeln!(out, "  Min Order: {}", money(stats.min_order))?;
    }
    writeln!(out)?;

    heading(
        &mut out,
        &format!(
            "9. HIGH VALUE CUSTOMERS (>={})",
            money(report.high_value_threshold)
        ),
    )?;
    write_customers(
        &mut out,
        &analyzer.high_value_customers(report.high_value_threshold),
        options,
    )?;
    writeln!(out)?;

    heading(&mut out, "10. FILTERING")?;
    writeln!(
        out,
        "{} sales count: {}",
        report.filter_category,
        analyzer.filter_by_category(&report.filter_category).len()
    )?;
    let in_range = analyzer.filter_by_date_range(&report.filter_start, &report.filter_end)?;
    writeln!(
        out,
        "Sales from {} to {}: {}",
        report.filter_start,
        report.filter_end,
        in_range.len()
    )?;
    writeln!(
        out,
        "Sales of at least {}: {}",
        money(report.minimum_amount),
        analyzer.filter_by_minimum_amount(report.minimum_amount).len()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    Ok(out)
}

pub fn render_products(products: &[ProductRevenue], options: &NumberFormatOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_products(&mut out, products, options);
    out
}

fn write_products(
    out: &mut String,
    products: &[ProductRevenue],
    options: &NumberFormatOptions,
) -> std::fmt::Result {
    for (rank, product) in products.iter().enumerate() {
        writeln!(
            out,
            "{}. {:30} - Revenue: {}, Quantity: {}",
            rank + 1,
            product.product,
            format_currency(product.revenue, options),
            format_number(product.quantity_sold, options)
        )?;
    }
    Ok(())
}

/// Customers, highest spending first.
pub fn render_customers(customers: &[CustomerSpending], options: &NumberFormatOptions) -> String {
    let mut out = String::new();
    let _ = write_customers(&mut out, customers, options);
    out
}

fn write_customers(
    out: &mut String,
    customers: &[CustomerSpending],
    options: &NumberFormatOptions,
) -> std::fmt::Result {
    let mut sorted: Vec<&CustomerSpending> = customers.iter().collect();
    sorted.sort_by(|a, b| b.total_spending.total_cmp(&a.total_spending));

    for customer in sorted {
        writeln!(
            out,
            "{}: {} ({} orders)",
            customer.customer_id,
            format_currency(customer.total_spending, options),
            format_number(customer.order_count as u64, options)
        )?;
    }
    Ok(())
}

pub fn render_records(records: &[&SalesRecord], options: &NumberFormatOptions) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "{record}");
    }
    let _ = writeln!(
        out,
        "{} matching records",
        format_number(records.len() as u64, options)
    );
    out
}
