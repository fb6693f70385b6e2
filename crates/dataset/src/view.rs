use crate::loader::Dataset;
use chrono::NaiveDate;
use core_types::{DateRange, OrderRecord};

/// A read-only subset of a [`Dataset`], in source row order.
///
/// Views borrow their records, so building a fresh one for every date-range change only
/// costs a vector of references.
#[derive(Debug, Clone, Default)]
pub struct OrderView<'a> {
    records: Vec<&'a OrderRecord>,
}

impl<'a> OrderView<'a> {
    pub fn new(records: Vec<&'a OrderRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a OrderRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        self.records.iter().copied()
    }

    /// Narrows this view to the records purchased within `range`.
    pub fn filter(&self, range: DateRange) -> OrderView<'a> {
        OrderView::new(
            self.iter()
                .filter(|record| range.contains(record.purchase_date()))
                .collect(),
        )
    }

    /// Records `offset..offset + limit` of this view, for paging through raw rows.
    pub fn page(&self, offset: usize, limit: usize) -> &[&'a OrderRecord] {
        let start = offset.min(self.records.len());
        let end = start.saturating_add(limit).min(self.records.len());
        &self.records[start..end]
    }
}

/// Records of `dataset` whose purchase date lies in `[start_date, end_date]`.
///
/// The range is not validated: callers clamp and order it. An inverted range yields an
/// empty view rather than an error.
pub fn filter(dataset: &Dataset, start_date: NaiveDate, end_date: NaiveDate) -> OrderView<'_> {
    dataset.filter(DateRange::unchecked(start_date, end_date))
}
