// src/domain/ranking.rs

use crate::config::RankingPolicy;
use crate::domain::finance::DealAnalysis;
use crate::domain::listing::Listing;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ScoredListing {
    pub listing: Listing,
    pub analysis: DealAnalysis,
}

impl ScoredListing {
    pub fn cashflow(&self) -> f64 {
        self.analysis.estimate.cashflow
    }
}

/// Stable descending sort; equal keys keep their input order.
pub fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

/// Preferred cities in the given order, then every other city alphabetically.
pub fn city_order<'a>(cities: impl IntoIterator<Item = &'a str>, preferred: &[String]) -> Vec<String> {
    let mut others: Vec<String> = cities
        .into_iter()
        .filter(|c| !preferred.iter().any(|p| p == c))
        .map(str::to_string)
        .collect();
    others.sort();
    others.dedup();

    preferred.iter().cloned().chain(others).collect()
}

/// Apply a ranking policy and return the selected listings in output order.
pub fn select(mut scored: Vec<ScoredListing>, policy: &RankingPolicy) -> Vec<ScoredListing> {
    match policy {
        RankingPolicy::TopN { n } => {
            sort_desc_by(&mut scored, ScoredListing::cashflow);
            scored.truncate(*n);
            scored
        }
        RankingPolicy::ByCity {
            per_city,
            min_cashflow,
            preferred_cities,
        } => {
            // whole dollars, so 500.9 does not clear a 500 bar
            let mut groups: HashMap<String, Vec<ScoredListing>> = HashMap::new();
            for item in scored.into_iter().filter(|s| s.cashflow().trunc() > *min_cashflow) {
                groups.entry(item.listing.city.clone()).or_default().push(item);
            }

            let order = city_order(groups.keys().map(String::as_str), preferred_cities);
            let mut selected = Vec::new();
            for city in order {
                let Some(mut group) = groups.remove(&city) else {
                    continue;
                };
                sort_desc_by(&mut group, ScoredListing::cashflow);
                group.truncate(*per_city);
                selected.extend(group);
            }
            selected
        }
    }
}
