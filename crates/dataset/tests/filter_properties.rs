use chrono::{Duration, NaiveDate};
use core_types::{DateRange, OrderRecord};
use dataset::{Dataset, filter};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
}

fn dataset_from(offsets: &[(i64, u32)]) -> Dataset {
    let records = offsets
        .iter()
        .enumerate()
        .map(|(row, &(day, seconds))| OrderRecord {
            row,
            order_id: format!("o{}", row / 2),
            product_id: format!("p{}", row % 5),
            product_category_name: "cat".to_string(),
            price: Decimal::from(row as i64),
            order_purchase_timestamp: (base() + Duration::days(day)).and_hms_opt(0, 0, 0).unwrap()
                + Duration::seconds(seconds as i64),
        })
        .collect();
    Dataset::from_records(records)
}

proptest! {
    #[test]
    fn filter_returns_only_in_range_rows_in_source_order(
        offsets in prop::collection::vec((0i64..120, 0u32..86_400), 0..200),
        a in 0i64..120,
        b in 0i64..120,
    ) {
        let dataset = dataset_from(&offsets);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let start = base() + Duration::days(lo);
        let end = base() + Duration::days(hi);

        let view = filter(&dataset, start, end);

        let rows: Vec<usize> = view.iter().map(|r| r.row).collect();
        let expected: Vec<usize> = dataset
            .records()
            .iter()
            .filter(|r| r.purchase_date() >= start && r.purchase_date() <= end)
            .map(|r| r.row)
            .collect();
        prop_assert_eq!(rows, expected);

        for record in view.iter() {
            prop_assert!(std::ptr::eq(record, &dataset.records()[record.row]));
        }
    }

    #[test]
    fn filter_on_bounds_keeps_every_row(
        offsets in prop::collection::vec((0i64..400, 0u32..86_400), 1..200),
    ) {
        let dataset = dataset_from(&offsets);
        let bounds: DateRange = dataset.bounds().unwrap();
        prop_assert_eq!(dataset.filter(bounds).len(), dataset.len());
    }
}
