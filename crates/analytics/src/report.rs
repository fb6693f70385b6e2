use crate::aggregate::{CategoryRank, Distribution, ProductRank, SummaryMetrics};
use crate::format::format_count;
use core_types::DateRange;
use serde::Serialize;

/// Everything the dashboard page shows for one date range.
///
/// This struct is the output of `AnalyticsEngine::build` and is what the CLI renders and
/// the web server returns as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    /// Line items in the filtered view.
    pub row_count: usize,
    pub summary: SummaryMetrics,
    pub top_products: Vec<ProductRank>,
    pub top_categories: Vec<CategoryRank>,
    pub by_day_of_week: Distribution,
    pub by_month: Distribution,
}

impl DashboardReport {
    /// One-line takeaways under each chart: the best product, the best category, the
    /// busiest weekday and the busiest month.
    pub fn insights(&self) -> Vec<String> {
        if self.row_count == 0 {
            return vec![format!(
                "No purchases between {} and {}.",
                self.range.start, self.range.end
            )];
        }

        let mut lines = Vec::with_capacity(4);
        if let Some(best) = self.top_products.first() {
            lines.push(format!(
                "The best-selling product ({}) is in category {} with {} purchases.",
                best.product_id,
                display_category(&best.product_category_name),
                format_count(best.purchase_count)
            ));
        }
        if let Some(best) = self.top_categories.first() {
            lines.push(format!(
                "The best-selling category is {} with {} sales.",
                display_category(&best.product_category_name),
                format_count(best.sales_count)
            ));
        }
        if let Some(peak) = self.by_day_of_week.peak {
            lines.push(format!(
                "{} is the busiest day of the week with {} purchases.",
                peak.label,
                format_count(peak.count)
            ));
        }
        if let Some(peak) = self.by_month.peak {
            lines.push(format!(
                "{} is the busiest month with {} purchases.",
                peak.label,
                format_count(peak.count)
            ));
        }
        lines
    }
}

fn display_category(name: &str) -> &str {
    if name.is_empty() { "(uncategorized)" } else { name }
}
