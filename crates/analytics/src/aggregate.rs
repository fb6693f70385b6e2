use core_types::{OrderRecord, TemporalUnit};
use dataset::OrderView;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// How many products the best-seller ranking shows by default.
pub const DEFAULT_TOP_PRODUCTS: usize = 10;
/// How many categories the category ranking shows by default.
pub const DEFAULT_TOP_CATEGORIES: usize = 20;

/// Headline numbers for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    /// Distinct order ids.
    pub order_count: usize,
    /// Distinct product ids.
    pub product_count: usize,
    /// Sum of every line item's price. Orders with several items contribute each of them.
    pub revenue_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRank {
    pub product_id: String,
    pub product_category_name: String,
    pub purchase_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRank {
    pub product_category_name: String,
    pub sales_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub label: &'static str,
    pub count: usize,
}

/// Purchase counts over every bucket of a calendar unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub unit: TemporalUnit,
    /// One entry per canonical label, in canonical order, zeros included.
    pub buckets: Vec<BucketCount>,
    /// The busiest bucket; the earliest in canonical order on a tie. `None` for an empty view.
    pub peak: Option<BucketCount>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.buckets.iter().find(|b| b.label == label).map(|b| b.count)
    }
}

pub fn summarize(view: &OrderView<'_>) -> SummaryMetrics {
    let mut orders = HashSet::new();
    let mut products = HashSet::new();
    let mut revenue_total = Decimal::ZERO;

    for record in view.iter() {
        orders.insert(record.order_id.as_str());
        products.insert(record.product_id.as_str());
        revenue_total += record.price;
    }

    SummaryMetrics {
        order_count: orders.len(),
        product_count: products.len(),
        revenue_total,
    }
}

/// The `n` most purchased products, each row of the view counting as one purchase.
///
/// Each product is labelled with the first category seen for it in the view. A product
/// listed under several categories is not reconciled; it is logged as a warning.
pub fn top_products(view: &OrderView<'_>, n: usize) -> Vec<ProductRank> {
    let ranked = top_n(count_by(view, |r| r.product_id.as_str()), n);
    if ranked.is_empty() {
        return Vec::new();
    }

    let wanted: HashSet<&str> = ranked.iter().map(|(id, _)| *id).collect();
    let mut categories: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in view.iter().filter(|r| wanted.contains(r.product_id.as_str())) {
        let names = categories.entry(record.product_id.as_str()).or_default();
        if !names.contains(&record.product_category_name.as_str()) {
            names.push(record.product_category_name.as_str());
        }
    }

    ranked
        .into_iter()
        .map(|(product_id, purchase_count)| {
            let names = categories.get(product_id).map(Vec::as_slice).unwrap_or_default();
            if names.len() > 1 {
                tracing::warn!(
                    product_id,
                    categories = ?names,
                    "Product appears under more than one category; using the first."
                );
            }
            ProductRank {
                product_id: product_id.to_string(),
                product_category_name: names.first().copied().unwrap_or_default().to_string(),
                purchase_count,
            }
        })
        .collect()
}

/// The `n` categories with the most line items. Rows without a category are not ranked.
pub fn top_categories(view: &OrderView<'_>, n: usize) -> Vec<CategoryRank> {
    let mut counts = count_by(view, |r| r.product_category_name.as_str());
    counts.retain(|(name, _)| !name.is_empty());

    top_n(counts, n)
        .into_iter()
        .map(|(name, sales_count)| CategoryRank {
            product_category_name: name.to_string(),
            sales_count,
        })
        .collect()
}

/// Purchases per weekday or per month, over the full canonical label set.
pub fn distribution_by(view: &OrderView<'_>, unit: TemporalUnit) -> Distribution {
    let labels = unit.labels();
    let mut counts = vec![0usize; labels.len()];
    for record in view.iter() {
        counts[unit.bucket_index(&record.order_purchase_timestamp)] += 1;
    }

    let buckets: Vec<BucketCount> = labels
        .iter()
        .zip(counts)
        .map(|(&label, count)| BucketCount { label, count })
        .collect();

    let peak = if view.is_empty() {
        None
    } else {
        buckets
            .iter()
            .copied()
            .fold(None, |best: Option<BucketCount>, bucket| match best {
                Some(b) if b.count >= bucket.count => Some(b),
                _ => Some(bucket),
            })
    };

    Distribution { unit, buckets, peak }
}

/// Occurrences of each key, in order of first appearance.
fn count_by<'a, F>(view: &OrderView<'a>, key: F) -> Vec<(&'a str, usize)>
where
    F: Fn(&'a OrderRecord) -> &'a str,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for record in view.iter() {
        let k = key(record);
        match positions.get(k) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(k, counts.len());
                counts.push((k, 1));
            }
        }
    }
    counts
}

/// Highest counts first. The sort is stable, so ties keep first-appearance order.
fn top_n(mut counts: Vec<(&str, usize)>, n: usize) -> Vec<(&str, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}
