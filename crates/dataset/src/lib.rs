//! # Orderscope Dataset Crate
//!
//! This crate owns the order dataset: it reads the CSV export once, normalizes the purchase
//! timestamps, and hands out read-only views filtered by purchase date.
//!
//! ## Architectural Principles
//!
//! - **Load Once:** `Dataset::load` is called a single time by the top-level process. The
//!   result is immutable and is passed by reference (or `Arc`) to everything that needs it.
//!   There is no global or cached copy.
//! - **Borrowed Views:** `OrderView` borrows records from the `Dataset` instead of copying
//!   them, keeps their source order, and can be recomputed cheaply for every new date range.
//!
//! ## Public API
//!
//! - `Dataset`: the loaded table, its date bounds, and the entry points for filtering.
//! - `OrderView`: a filtered, borrowed subset of the dataset.
//! - `filter`: convenience wrapper taking the two ends of the range separately.
//! - `LoadError`: everything that can go wrong while loading.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod view;

// Re-export the key components to create a clean, public-facing API.
pub use error::LoadError;
pub use loader::{Dataset, REQUIRED_COLUMNS};
pub use view::{OrderView, filter};
