use serde::Serialize;
use statrs::statistics::Statistics;

use crate::dataset::Listing;
use crate::filter::PriceRange;
use crate::partition::PartitionIndex;

pub const BUCKET_COUNT: usize = 5;

/// Inclusive `[min, max]` slice of the selected price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBucket {
    pub min: f64,
    pub max: f64,
}

impl PriceBucket {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn label(&self) -> String {
        format!("${}-${}", self.min, self.max)
    }
}

/// One bar of the grouped chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStat<'a> {
    pub borough: &'a str,
    pub color: &'static str,
    pub label: String,
    pub bucket: PriceBucket,
    pub count: usize,
    pub standard_error: f64,
}

/// Splits `range` into five buckets of whole-dollar width
/// `floor((high - low) / 5)`. Buckets after the first start one dollar past
/// the previous bucket's end, except the last, which starts exactly at
/// `low + 4 * step` and runs to `high` so it absorbs the truncated remainder.
/// A price equal to `low + 4 * step` therefore counts in both of the last two
/// buckets.
pub fn price_buckets(range: PriceRange) -> [PriceBucket; BUCKET_COUNT] {
    let (low, high) = (range.low(), range.high());
    let step = ((high - low) / BUCKET_COUNT as f64).floor();
    let last = BUCKET_COUNT - 1;
    std::array::from_fn(|i| {
        if i == last {
            PriceBucket {
                min: low + last as f64 * step,
                max: high,
            }
        } else {
            let offset = if i == 0 { 0.0 } else { 1.0 };
            PriceBucket {
                min: low + i as f64 * step + offset,
                max: low + (i + 1) as f64 * step,
            }
        }
    })
}

/// Sample standard deviation over the square root of the count; zero when
/// fewer than two prices make the deviation undefined.
pub fn standard_error(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    prices.iter().std_dev() / (prices.len() as f64).sqrt()
}

/// Count and standard error for every (borough, bucket) pair, over every
/// known borough whether or not it appears in `subset`. Grouped by borough in
/// discovery order, then by bucket.
pub fn aggregate<'a>(subset: &[&Listing], index: &PartitionIndex<'a>, range: PriceRange) -> Vec<BucketStat<'a>> {
    let buckets = price_buckets(range);
    let mut series = Vec::with_capacity(index.boroughs().len() * BUCKET_COUNT);
    for &borough in index.boroughs() {
        let color = index.color(borough).unwrap_or_default();
        let borough_prices: Vec<f64> = subset
            .iter()
            .filter(|l| l.borough == borough)
            .map(|l| l.price)
            .collect();
        for bucket in buckets {
            let prices: Vec<f64> = borough_prices.iter().copied().filter(|p| bucket.contains(*p)).collect();
            series.push(BucketStat {
                borough,
                color,
                label: bucket.label(),
                bucket,
                count: prices.len(),
                standard_error: standard_error(&prices),
            });
        }
    }
    series
}
