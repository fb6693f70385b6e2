use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item of the order dataset.
///
/// An order with several items appears as several records sharing `order_id`, and a product
/// bought repeatedly appears once per purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Zero-based data row index in the source file. Identifies the record across views.
    pub row: usize,
    pub order_id: String,
    pub product_id: String,
    pub product_category_name: String,
    pub price: Decimal,
    pub order_purchase_timestamp: NaiveDateTime,
}

impl OrderRecord {
    /// The calendar date of the purchase; time of day is irrelevant to date filtering.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range without checking the order of its ends. An inverted range contains nothing.
    pub fn unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Pulls both ends inside `bounds`, the way a date picker limited to the data would.
    pub fn clamp_to(&self, bounds: &DateRange) -> Self {
        Self {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }

    /// Resolves a user's date selection against the data's `bounds`.
    ///
    /// Missing ends default to the bounds, an inverted selection is rejected, and the result
    /// is clamped into the bounds. With no bounds (empty data) both ends must be given;
    /// otherwise there is nothing to select and `None` is returned.
    pub fn select(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        bounds: Option<&DateRange>,
    ) -> Result<Option<Self>, CoreError> {
        match (bounds, from, to) {
            (Some(bounds), from, to) => {
                let range = Self::new(from.unwrap_or(bounds.start), to.unwrap_or(bounds.end))?;
                Ok(Some(range.clamp_to(bounds)))
            }
            (None, Some(from), Some(to)) => Self::new(from, to).map(Some),
            (None, _, _) => Ok(None),
        }
    }

    /// Number of calendar days covered, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_inverted_range() {
        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidRange {
                start: date(2024, 2, 1),
                end: date(2024, 1, 1)
            }
        );
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn contains_is_closed_on_both_ends() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert_eq!(range.num_days(), 31);
    }

    #[test]
    fn clamp_pulls_ends_into_bounds() {
        let bounds = DateRange::new(date(2017, 1, 5), date(2018, 8, 29)).unwrap();
        let wide = DateRange::new(date(2016, 1, 1), date(2020, 1, 1)).unwrap();
        assert_eq!(wide.clamp_to(&bounds), bounds);

        let inside = DateRange::new(date(2017, 3, 1), date(2017, 4, 1)).unwrap();
        assert_eq!(inside.clamp_to(&bounds), inside);
    }

    #[test]
    fn select_defaults_validates_and_clamps() {
        let bounds = DateRange::new(date(2017, 1, 5), date(2018, 8, 29)).unwrap();

        assert_eq!(DateRange::select(None, None, Some(&bounds)), Ok(Some(bounds)));
        assert_eq!(
            DateRange::select(Some(date(2018, 1, 1)), None, Some(&bounds)),
            Ok(Some(DateRange::unchecked(date(2018, 1, 1), date(2018, 8, 29))))
        );
        assert_eq!(
            DateRange::select(Some(date(2010, 1, 1)), Some(date(2030, 1, 1)), Some(&bounds)),
            Ok(Some(bounds))
        );
        assert!(DateRange::select(Some(date(2018, 2, 1)), Some(date(2018, 1, 1)), Some(&bounds)).is_err());
    }

    #[test]
    fn select_without_bounds_needs_both_ends() {
        assert_eq!(DateRange::select(Some(date(2024, 1, 1)), None, None), Ok(None));
        assert_eq!(
            DateRange::select(Some(date(2024, 1, 1)), Some(date(2024, 1, 2)), None),
            Ok(Some(DateRange::unchecked(date(2024, 1, 1), date(2024, 1, 2))))
        );
    }

    #[test]
    fn inverted_unchecked_range_contains_nothing() {
        let range = DateRange::unchecked(date(2024, 2, 1), date(2024, 1, 1));
        assert!(!range.contains(date(2024, 1, 15)));
    }
}
