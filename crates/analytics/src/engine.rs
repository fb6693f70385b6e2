use crate::aggregate::{
    DEFAULT_TOP_CATEGORIES, DEFAULT_TOP_PRODUCTS, distribution_by, summarize, top_categories,
    top_products,
};
use crate::error::AnalyticsError;
use crate::report::DashboardReport;
use core_types::{DateRange, TemporalUnit};
use dataset::OrderView;
use serde::{Deserialize, Serialize};

/// Sizes of the rankings on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub top_products: usize,
    pub top_categories: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            top_products: DEFAULT_TOP_PRODUCTS,
            top_categories: DEFAULT_TOP_CATEGORIES,
        }
    }
}

/// A stateless calculator for every metric on the dashboard page.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: DashboardSettings,
}

impl AnalyticsEngine {
    /// Creates an engine, rejecting rankings that could never show anything.
    pub fn new(settings: DashboardSettings) -> Result<Self, AnalyticsError> {
        if settings.top_products == 0 {
            return Err(AnalyticsError::InvalidSetting {
                name: "top_products",
                reason: "must be at least 1".to_string(),
            });
        }
        if settings.top_categories == 0 {
            return Err(AnalyticsError::InvalidSetting {
                name: "top_categories",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Computes the full dashboard for `view`, the records selected by `range`.
    ///
    /// # Arguments
    ///
    /// * `view` - The filtered records. May be empty.
    /// * `range` - The date range the view was filtered with, echoed back in the report.
    pub fn build(&self, view: &OrderView<'_>, range: DateRange) -> DashboardReport {
        let report = DashboardReport {
            range,
            row_count: view.len(),
            summary: summarize(view),
            top_products: top_products(view, self.settings.top_products),
            top_categories: top_categories(view, self.settings.top_categories),
            by_day_of_week: distribution_by(view, TemporalUnit::DayOfWeek),
            by_month: distribution_by(view, TemporalUnit::MonthOfYear),
        };

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            rows = report.row_count,
            orders = report.summary.order_count,
            "Dashboard computed."
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_rankings_are_rejected() {
        let err = AnalyticsEngine::new(DashboardSettings {
            top_products: 0,
            top_categories: 20,
        })
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSetting { name: "top_products", .. }));

        assert!(
            AnalyticsEngine::new(DashboardSettings {
                top_products: 10,
                top_categories: 0,
            })
            .is_err()
        );
    }

    #[test]
    fn defaults_match_the_dashboard() {
        let engine = AnalyticsEngine::new(DashboardSettings::default()).unwrap();
        assert_eq!(engine.settings().top_products, 10);
        assert_eq!(engine.settings().top_categories, 20);
    }
}
