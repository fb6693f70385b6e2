use analytics::{AnalyticsEngine, DashboardSettings};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use core_types::{OrderRecord, Page};
use dataset::Dataset;
use rust_decimal_macros::dec;
use std::sync::Arc;
use web_server::AppState;
use web_server::error::AppError;
use web_server::handlers::{
    Pagination, PageView, RangeQuery, ViewQuery, get_bounds, get_dashboard, get_orders, get_view,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn state() -> Arc<AppState> {
    let records = vec![
        ("orderA", "prodX", "toys", (2024, 1, 1)),
        ("orderA", "prodX", "toys", (2024, 1, 1)),
        ("orderB", "prodY", "books", (2024, 1, 8)),
        ("orderC", "prodZ", "garden", (2024, 2, 14)),
    ]
    .into_iter()
    .enumerate()
    .map(|(row, (order, product, category, (y, m, d)))| OrderRecord {
        row,
        order_id: order.to_string(),
        product_id: product.to_string(),
        product_category_name: category.to_string(),
        price: if row == 3 { dec!(7.5) } else { dec!(10) },
        order_purchase_timestamp: date(y, m, d).and_hms_opt(10, 0, 0).unwrap(),
    })
    .collect();

    let engine = AnalyticsEngine::new(DashboardSettings::default()).unwrap();
    Arc::new(AppState::new(Arc::new(Dataset::from_records(records)), engine))
}

fn january() -> RangeQuery {
    RangeQuery {
        from: Some(date(2024, 1, 1)),
        to: Some(date(2024, 1, 31)),
    }
}

#[tokio::test]
async fn bounds_come_from_the_data() {
    let Json(bounds) = get_bounds(State(state())).await.unwrap();
    assert_eq!(bounds.start, date(2024, 1, 1));
    assert_eq!(bounds.end, date(2024, 2, 14));
}

#[tokio::test]
async fn bounds_of_an_empty_dataset_are_not_found() {
    let empty = Arc::new(AppState::new(
        Arc::new(Dataset::default()),
        AnalyticsEngine::default(),
    ));
    let err = get_bounds(State(empty)).await.unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_is_filtered_by_range() {
    let Json(response) = get_dashboard(State(state()), Query(january())).await.unwrap();

    assert_eq!(response.report.row_count, 3);
    assert_eq!(response.report.summary.order_count, 2);
    assert_eq!(response.report.summary.revenue_total, dec!(30));
    assert_eq!(response.report.top_products[0].product_id, "prodX");
    assert_eq!(response.insights.len(), 4);
}

#[tokio::test]
async fn missing_dates_default_to_bounds() {
    let Json(response) = get_dashboard(State(state()), Query(RangeQuery::default()))
        .await
        .unwrap();
    assert_eq!(response.report.row_count, 4);
    assert_eq!(response.report.range.end, date(2024, 2, 14));
}

#[tokio::test]
async fn dates_outside_the_data_are_clamped() {
    let query = RangeQuery {
        from: Some(date(2020, 1, 1)),
        to: Some(date(2030, 1, 1)),
    };
    let Json(response) = get_dashboard(State(state()), Query(query)).await.unwrap();
    assert_eq!(response.report.range.start, date(2024, 1, 1));
    assert_eq!(response.report.range.end, date(2024, 2, 14));
}

#[tokio::test]
async fn inverted_range_is_a_bad_request() {
    let query = RangeQuery {
        from: Some(date(2024, 2, 1)),
        to: Some(date(2024, 1, 1)),
    };
    let err = get_dashboard(State(state()), Query(query)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRange(_)));
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_are_paged() {
    let pagination = Pagination { page: 2, limit: 2 };
    let Json(page) = get_orders(State(state()), Query(RangeQuery::default()), Query(pagination))
        .await
        .unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.page_number, 2);
    let rows: Vec<usize> = page.rows.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![2, 3]);

    let Json(past_end) = get_orders(
        State(state()),
        Query(january()),
        Query(Pagination { page: 9, limit: 2 }),
    )
    .await
    .unwrap();
    assert!(past_end.rows.is_empty());
    assert_eq!(past_end.total, 3);
}

#[tokio::test]
async fn view_follows_the_requested_page() {
    let query = ViewQuery {
        page: Page::RawData,
        from: january().from,
        to: january().to,
        ..ViewQuery::default()
    };
    let Json(view) = get_view(State(state()), Query(query)).await.unwrap();
    match &view {
        PageView::RawData(page) => assert_eq!(page.total, 3),
        other => panic!("expected raw data, got {other:?}"),
    }
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["page"], "raw_data");
    assert_eq!(json["page_number"], 1);
    assert_eq!(json["total"], 3);

    let Json(view) = get_view(State(state()), Query(ViewQuery::default()))
        .await
        .unwrap();
    assert!(matches!(view, PageView::Dashboard(_)));
}
