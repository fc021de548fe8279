use crate::config::Config;
use crate::domain::{analyze, filter_listings, select, ScoredListing};
use crate::errors::AppError;
use crate::scraper::ListingSource;
use crate::templates::render_report;
use serde_json::Value;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub kept: usize,
    pub rejected: usize,
    pub malformed: usize,
    pub selected: usize,
}

#[derive(Debug)]
pub struct Report {
    pub text: String,
    pub selected: Vec<ScoredListing>,
    pub summary: RunSummary,
}

/// Filter, score, rank and render one batch of raw records.
pub fn build_report(records: &[Value], config: &Config) -> Report {
    let outcome = filter_listings(records, &config.criteria);

    let scored: Vec<ScoredListing> = outcome
        .kept
        .into_iter()
        .map(|listing| {
            let analysis = analyze(&listing, &config.cashflow, &config.mortgage);
            ScoredListing { listing, analysis }
        })
        .collect();
    let kept = scored.len();

    let selected = select(scored, &config.ranking);
    let text = render_report(&selected, config);

    let summary = RunSummary {
        fetched: records.len(),
        kept,
        rejected: outcome.rejected,
        malformed: outcome.malformed,
        selected: selected.len(),
    };

    if summary.malformed > 0 {
        tracing::warn!(malformed = summary.malformed, "skipped malformed records");
    }
    tracing::info!(
        fetched = summary.fetched,
        kept = summary.kept,
        rejected = summary.rejected,
        selected = summary.selected,
        "listings processed"
    );

    Report {
        text,
        selected,
        summary,
    }
}

pub fn run(source: &dyn ListingSource, config: &Config) -> Result<Report, AppError> {
    tracing::info!(source = source.name(), profile = config.profile.as_str(), "fetching listings");
    let records = source.fetch_listings()?;
    Ok(build_report(&records, config))
}
