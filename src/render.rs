//! Terminal rendering of the dashboard and raw-data pages.
//!
//! `render` is a pure function of the navigation state and the computed data; it returns
//! the text to print and never touches the dataset beyond the view it is given.

use analytics::{AnalyticsEngine, DashboardReport, Distribution, format_count, format_money};
use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use core_types::{DateRange, OrderRecord, Page};
use dataset::OrderView;
use serde_json::json;

/// Width of the longest bar in the distribution tables.
const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything a page needs, already filtered to the selected range.
pub struct PageContext<'a> {
    pub range: DateRange,
    pub view: &'a OrderView<'a>,
    pub engine: &'a AnalyticsEngine,
    pub currency_symbol: &'a str,
    /// Most rows the raw-data page prints.
    pub raw_row_limit: usize,
}

pub fn render(page: Page, ctx: &PageContext<'_>, format: OutputFormat) -> anyhow::Result<String> {
    match (page, format) {
        (Page::Dashboard, OutputFormat::Table) => {
            let report = ctx.engine.build(ctx.view, ctx.range);
            Ok(dashboard_text(&report, ctx.currency_symbol))
        }
        (Page::Dashboard, OutputFormat::Json) => {
            let report = ctx.engine.build(ctx.view, ctx.range);
            let insights = report.insights();
            Ok(serde_json::to_string_pretty(&json!({
                "page": page,
                "report": report,
                "insights": insights,
            }))?)
        }
        (Page::RawData, OutputFormat::Table) => Ok(raw_text(ctx)),
        (Page::RawData, OutputFormat::Json) => {
            let rows = ctx.view.page(0, ctx.raw_row_limit);
            Ok(serde_json::to_string_pretty(&json!({
                "page": page,
                "range": ctx.range,
                "total": ctx.view.len(),
                "rows": rows,
            }))?)
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn dashboard_text(report: &DashboardReport, currency_symbol: &str) -> String {
    let mut out = format!(
        "E-Commerce Dashboard  {} to {}\n\n",
        report.range.start, report.range.end
    );

    let mut metrics = new_table();
    metrics
        .set_header(vec!["Total Orders", "Total Products", "Total Revenue"])
        .add_row(vec![
            format_count(report.summary.order_count),
            format_count(report.summary.product_count),
            format_money(report.summary.revenue_total, currency_symbol),
        ]);
    out.push_str(&format!("{metrics}\n\n"));

    let insights = report.insights();
    if report.row_count == 0 {
        out.push_str(&insights.join("\n"));
        out.push('\n');
        return out;
    }
    let mut insights = insights.into_iter();

    let mut products = new_table();
    products.set_header(vec!["#", "Product", "Category", "Purchases"]);
    for (rank, product) in report.top_products.iter().enumerate() {
        products.add_row(vec![
            (rank + 1).to_string(),
            product.product_id.clone(),
            product.product_category_name.clone(),
            format_count(product.purchase_count),
        ]);
    }
    push_section(
        &mut out,
        &format!("Top {} Products", report.top_products.len()),
        &products,
        insights.next(),
    );

    let mut categories = new_table();
    categories.set_header(vec!["#", "Category", "Sales"]);
    for (rank, category) in report.top_categories.iter().enumerate() {
        categories.add_row(vec![
            (rank + 1).to_string(),
            category.product_category_name.clone(),
            format_count(category.sales_count),
        ]);
    }
    push_section(
        &mut out,
        &format!("Top {} Categories", report.top_categories.len()),
        &categories,
        insights.next(),
    );

    push_section(
        &mut out,
        "Purchases by Day of Week",
        &distribution_table(&report.by_day_of_week),
        insights.next(),
    );
    push_section(
        &mut out,
        "Purchases by Month",
        &distribution_table(&report.by_month),
        insights.next(),
    );
    out
}

fn push_section(out: &mut String, title: &str, table: &Table, insight: Option<String>) {
    out.push_str(&format!("{title}\n{table}\n"));
    if let Some(line) = insight {
        out.push_str(&format!("-> {line}\n"));
    }
    out.push('\n');
}

fn distribution_table(distribution: &Distribution) -> Table {
    let max = distribution.peak.map(|p| p.count).unwrap_or(0);
    let mut table = new_table();
    table.set_header(vec!["Bucket", "Purchases", ""]);
    for bucket in &distribution.buckets {
        let width = if max == 0 { 0 } else { bucket.count * BAR_WIDTH / max };
        let mut bar = "█".repeat(width);
        if distribution.peak.is_some_and(|p| p.label == bucket.label) {
            bar.push_str(" peak");
        }
        table.add_row(vec![bucket.label.to_string(), format_count(bucket.count), bar]);
    }
    table
}

fn raw_text(ctx: &PageContext<'_>) -> String {
    let rows = ctx.view.page(0, ctx.raw_row_limit);
    let mut table = new_table();
    table.set_header(vec![
        "Row",
        "Order",
        "Product",
        "Category",
        "Price",
        "Purchased At",
    ]);
    for record in rows {
        table.add_row(raw_row(record, ctx.currency_symbol));
    }

    format!(
        "Raw Data  {} to {}\n{table}\nShowing {} of {} rows.\n",
        ctx.range.start,
        ctx.range.end,
        format_count(rows.len()),
        format_count(ctx.view.len())
    )
}

fn raw_row(record: &OrderRecord, currency_symbol: &str) -> Vec<String> {
    vec![
        record.row.to_string(),
        record.order_id.clone(),
        record.product_id.clone(),
        record.product_category_name.clone(),
        format_money(record.price, currency_symbol),
        record.order_purchase_timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]
}
