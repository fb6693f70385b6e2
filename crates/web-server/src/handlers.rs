use crate::{AppState, error::AppError};
use analytics::DashboardReport;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use core_types::{DateRange, OrderRecord, Page};
use dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Largest page the raw-data endpoint hands out.
pub const MAX_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_page() -> usize { 1 }
fn default_limit() -> usize { 50 }

/// Query of `/api/view`. `page` is the navigation state; paging through raw rows uses
/// `page_number` so the two never collide.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub page: Page,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default = "default_page")]
    pub page_number: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            page: Page::default(),
            from: None,
            to: None,
            page_number: default_page(),
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub report: DashboardReport,
    pub insights: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OrdersPage {
    pub range: DateRange,
    /// 1-based page number. Named apart from the `page` navigation tag of `PageView`.
    pub page_number: usize,
    pub limit: usize,
    /// Rows in the whole filtered view, not just this page.
    pub total: usize,
    pub rows: Vec<OrderRecord>,
}

/// A page of the UI, tagged with which page it is.
#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Dashboard(DashboardResponse),
    RawData(OrdersPage),
}

/// # GET /api/bounds
/// The earliest and latest purchase dates, i.e. the default and widest range.
pub async fn get_bounds(State(state): State<Arc<AppState>>) -> Result<Json<DateRange>, AppError> {
    state
        .dataset
        .bounds()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("The order dataset is empty".to_string()))
}

/// # GET /api/dashboard?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let range = resolve_range(&state.dataset, &query)?;
    Ok(Json(dashboard(&state, range)))
}

/// # GET /api/orders?from&to&page&limit
/// The raw rows behind the dashboard, one page at a time.
pub async fn get_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<OrdersPage>, AppError> {
    let range = resolve_range(&state.dataset, &query)?;
    Ok(Json(orders(&state, range, &pagination)))
}

/// # GET /api/view?page=dashboard|raw_data&from&to&page_number&limit
/// Renders whichever page the client says it is on. Navigation state lives in the request.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<PageView>, AppError> {
    let range = resolve_range(
        &state.dataset,
        &RangeQuery {
            from: query.from,
            to: query.to,
        },
    )?;
    let view = match query.page {
        Page::Dashboard => PageView::Dashboard(dashboard(&state, range)),
        Page::RawData => {
            let pagination = Pagination {
                page: query.page_number,
                limit: query.limit,
            };
            PageView::RawData(orders(&state, range, &pagination))
        }
    };
    Ok(Json(view))
}

fn dashboard(state: &AppState, range: DateRange) -> DashboardResponse {
    let view = state.dataset.filter(range);
    let report = state.engine.build(&view, range);
    let insights = report.insights();
    DashboardResponse { report, insights }
}

fn orders(state: &AppState, range: DateRange, pagination: &Pagination) -> OrdersPage {
    let page = pagination.page.max(1);
    let limit = pagination.limit.clamp(1, MAX_PAGE_LIMIT);
    let view = state.dataset.filter(range);
    let offset = (page - 1).saturating_mul(limit);

    OrdersPage {
        range,
        page_number: page,
        limit,
        total: view.len(),
        rows: view.page(offset, limit).iter().map(|r| (*r).clone()).collect(),
    }
}

/// Fills missing ends from the dataset bounds, rejects `from > to`, then clamps into the
/// bounds like the dashboard's date picker does.
fn resolve_range(dataset: &Dataset, query: &RangeQuery) -> Result<DateRange, AppError> {
    DateRange::select(query.from, query.to, dataset.bounds().as_ref())?.ok_or_else(|| {
        AppError::NotFound("The order dataset is empty; pass both 'from' and 'to'".to_string())
    })
}
