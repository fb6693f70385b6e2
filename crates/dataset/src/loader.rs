use crate::error::LoadError;
use crate::view::OrderView;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use core_types::{DateRange, OrderRecord};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Columns the dataset must provide. Any other columns in the export are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "order_id",
    "product_id",
    "product_category_name",
    "price",
    "order_purchase_timestamp",
];

/// Naive timestamp layouts seen in order exports, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// The full, immutable order table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<OrderRecord>,
    bounds: Option<DateRange>,
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    order_id: usize,
    product_id: usize,
    category: usize,
    price: usize,
    timestamp: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        // Every lookup below succeeded in the check above.
        let index = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            order_id: index("order_id"),
            product_id: index("product_id"),
            category: index("product_category_name"),
            price: index("price"),
            timestamp: index("order_purchase_timestamp"),
        })
    }
}

impl Dataset {
    /// Reads the order dataset from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;
        match dataset.bounds {
            Some(bounds) => tracing::info!(
                path = %path.display(),
                rows = dataset.len(),
                start = %bounds.start,
                end = %bounds.end,
                "Order dataset loaded."
            ),
            None => tracing::warn!(path = %path.display(), "Order dataset has no rows."),
        }
        Ok(dataset)
    }

    /// Reads the order dataset from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        for (row, result) in csv_reader.records().enumerate() {
            let record = result?;
            records.push(parse_record(row, &record, &columns)?);
        }

        Ok(Self::from_records(records))
    }

    /// Wraps already-parsed records. Rows keep whatever `row` identity they carry.
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        let bounds = compute_bounds(&records);
        Self { records, bounds }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest purchase dates, or `None` for an empty dataset.
    /// These are the default (and the widest) range a caller should offer.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// A view over every record.
    pub fn view(&self) -> OrderView<'_> {
        OrderView::new(self.records.iter().collect())
    }

    /// A view over the records purchased within `range`, both ends included.
    pub fn filter(&self, range: DateRange) -> OrderView<'_> {
        OrderView::new(
            self.records
                .iter()
                .filter(|record| range.contains(record.purchase_date()))
                .collect(),
        )
    }
}

fn compute_bounds(records: &[OrderRecord]) -> Option<DateRange> {
    let start = records.iter().map(OrderRecord::purchase_date).min()?;
    let end = records.iter().map(OrderRecord::purchase_date).max()?;
    Some(DateRange::unchecked(start, end))
}

fn parse_record(
    row: usize,
    record: &StringRecord,
    columns: &ColumnIndex,
) -> Result<OrderRecord, LoadError> {
    let field = |index: usize| record.get(index).unwrap_or("").trim();

    let raw_price = field(columns.price);
    let price = Decimal::from_str(raw_price)
        .or_else(|_| Decimal::from_scientific(raw_price))
        .map_err(|_| LoadError::InvalidPrice {
            row,
            value: raw_price.to_string(),
        })?;

    let raw_timestamp = field(columns.timestamp);
    let order_purchase_timestamp =
        parse_timestamp(raw_timestamp).ok_or_else(|| LoadError::InvalidTimestamp {
            row,
            value: raw_timestamp.to_string(),
        })?;

    Ok(OrderRecord {
        row,
        order_id: field(columns.order_id).to_string(),
        product_id: field(columns.product_id).to_string(),
        product_category_name: field(columns.category).to_string(),
        price,
        order_purchase_timestamp,
    })
}

/// Parses a purchase timestamp. Zoned RFC 3339 values are normalized to UTC;
/// a bare date is taken as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_the_usual_export_layout() {
        assert_eq!(
            parse_timestamp("2017-10-02 10:56:33"),
            Some(ts(2017, 10, 2, 10, 56, 33))
        );
        assert_eq!(
            parse_timestamp("2017-10-02T10:56:33"),
            Some(ts(2017, 10, 2, 10, 56, 33))
        );
        assert_eq!(
            parse_timestamp(" 2017-10-02 10:56 "),
            Some(ts(2017, 10, 2, 10, 56, 0))
        );
    }

    #[test]
    fn rfc3339_is_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2018-01-01T01:30:00+03:00"),
            Some(ts(2017, 12, 31, 22, 30, 0))
        );
    }

    #[test]
    fn bare_dates_are_midnight() {
        assert_eq!(parse_timestamp("2018-08-29"), Some(ts(2018, 8, 29, 0, 0, 0)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2018-13-01 00:00:00"), None);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let headers = StringRecord::from(vec!["order_id", "price", "seller_id"]);
        match ColumnIndex::from_headers(&headers) {
            Err(LoadError::MissingColumns(missing)) => assert_eq!(
                missing,
                vec![
                    "product_id".to_string(),
                    "product_category_name".to_string(),
                    "order_purchase_timestamp".to_string(),
                ]
            ),
            other => panic!("expected MissingColumns, got {:?}", other.err()),
        }
    }
}
