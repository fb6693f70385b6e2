//! # Orderscope Analytics Engine
//!
//! This crate turns a filtered `OrderView` into the numbers the dashboard shows: totals,
//! best sellers, and when people buy.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of how results are displayed. Every function
//!   takes a view and returns plain, serializable values.
//! - **Stateless Calculation:** Nothing is cached between calls. A new date range means a new
//!   view and a full recomputation.
//! - **Total Over Empty Input:** An empty view is a normal input. Counts are zero, rankings
//!   are empty and the peak of a distribution is `None`.
//!
//! ## Public API
//!
//! - `summarize`, `top_products`, `top_categories`, `distribution_by`: the individual metrics.
//! - `AnalyticsEngine`: computes every metric at once into a `DashboardReport`.
//! - `format_money`, `format_count`: human-readable numbers for metric cards.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod format;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{
    BucketCount, CategoryRank, DEFAULT_TOP_CATEGORIES, DEFAULT_TOP_PRODUCTS, Distribution,
    ProductRank, SummaryMetrics, distribution_by, summarize, top_categories, top_products,
};
pub use engine::{AnalyticsEngine, DashboardSettings};
pub use error::AnalyticsError;
pub use format::{format_count, format_money};
pub use report::DashboardReport;
