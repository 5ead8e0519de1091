//! Grouped aggregates over shopping listings
//!
//! Groups keep the order in which their key first appears in the input, and
//! every ranking is a stable sort over that order, so ties are broken by
//! first appearance. Missing prices are skipped, never counted as zero.

use statrs::statistics::Statistics;
use std::collections::HashMap;

use super::stats::describe;
use crate::models::{BrandPriceSpread, DescriptiveStats, HistogramBin, Listing};

/// Insertion-ordered grouping of listings by a key
struct Groups<'a> {
    keys: Vec<&'a str>,
    members: Vec<Vec<&'a Listing>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> Groups<'a> {
    fn by<F>(listings: &'a [Listing], key: F) -> Self
    where
        F: Fn(&'a Listing) -> Option<&'a str>,
    {
        let mut groups = Self {
            keys: Vec::new(),
            members: Vec::new(),
            index: HashMap::new(),
        };

        for listing in listings {
            let Some(k) = key(listing) else { continue };
            let slot = match groups.index.get(k) {
                Some(&slot) => slot,
                None => {
                    let slot = groups.keys.len();
                    groups.index.insert(k, slot);
                    groups.keys.push(k);
                    groups.members.push(Vec::new());
                    slot
                }
            };
            groups.members[slot].push(listing);
        }

        groups
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Listing])> + '_ {
        self.keys
            .iter()
            .copied()
            .zip(self.members.iter().map(Vec::as_slice))
    }
}

fn brand_key(listing: &Listing) -> Option<&str> {
    listing.brand.as_deref()
}

fn mall_key(listing: &Listing) -> Option<&str> {
    Some(listing.mall_name.as_str()).filter(|m| !m.is_empty())
}

fn present_prices(listings: &[&Listing]) -> Vec<f64> {
    listings.iter().filter_map(|l| l.low_price).collect()
}

/// Stable descending sort by value, truncated to `top_n`
fn rank_desc<V: Copy, F>(mut entries: Vec<(String, V)>, top_n: usize, cmp: F) -> Vec<(String, V)>
where
    F: Fn(&V, &V) -> std::cmp::Ordering,
{
    entries.sort_by(|a, b| cmp(&b.1, &a.1));
    entries.truncate(top_n);
    entries
}

/// Mean present price per brand, highest first
///
/// Brands whose prices are all missing are left out, as are listings
/// without a brand.
#[must_use]
pub fn brand_mean_price(listings: &[Listing], top_n: usize) -> Vec<(String, f64)> {
    let means = Groups::by(listings, brand_key)
        .iter()
        .filter_map(|(brand, members)| {
            let prices = present_prices(members);
            (!prices.is_empty()).then(|| (brand.to_string(), prices.iter().mean()))
        })
        .collect();

    rank_desc(means, top_n, f64::total_cmp)
}

/// Listing count per mall, largest first
///
/// Every listing with a mall name counts, whether or not its price parsed.
#[must_use]
pub fn mall_counts(listings: &[Listing], top_n: usize) -> Vec<(String, usize)> {
    count_by(listings, mall_key, top_n)
}

/// Listing count per brand, largest first
#[must_use]
pub fn top_brands(listings: &[Listing], top_n: usize) -> Vec<(String, usize)> {
    count_by(listings, brand_key, top_n)
}

fn count_by<'a, F>(listings: &'a [Listing], key: F, top_n: usize) -> Vec<(String, usize)>
where
    F: Fn(&'a Listing) -> Option<&'a str>,
{
    let counts = Groups::by(listings, key)
        .iter()
        .map(|(k, members)| (k.to_string(), members.len()))
        .collect();

    rank_desc(counts, top_n, usize::cmp)
}

/// Summary of all present prices, `None` when no listing has one
#[must_use]
pub fn price_summary(listings: &[Listing]) -> Option<DescriptiveStats> {
    let prices: Vec<f64> = listings.iter().filter_map(|l| l.low_price).collect();
    (!prices.is_empty()).then(|| describe(&prices))
}

/// Equal-width histogram of present prices over their observed range
///
/// When every price is identical a single bin holds them all.
#[must_use]
pub fn price_histogram(listings: &[Listing], bins: usize) -> Vec<HistogramBin> {
    let prices: Vec<f64> = listings.iter().filter_map(|l| l.low_price).collect();
    if prices.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: prices.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for price in &prices {
        let slot = (((price - min) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Price distribution of each of the given brands, in the given order
#[must_use]
pub fn brand_price_spread(
    listings: &[Listing],
    brands: &[(String, usize)],
) -> Vec<BrandPriceSpread> {
    let groups = Groups::by(listings, brand_key);

    brands
        .iter()
        .map(|(brand, _)| {
            let prices = groups
                .index
                .get(brand.as_str())
                .map(|&slot| present_prices(&groups.members[slot]))
                .unwrap_or_default();

            BrandPriceSpread {
                brand: brand.clone(),
                stats: describe(&prices),
            }
        })
        .collect()
}
