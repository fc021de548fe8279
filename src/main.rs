use crate::config::{Config, ConfigError, Profile, RankingPolicy, SourceConfig};
use crate::errors::AppError;
use crate::scraper::{ApifyDataset, JsonFileSource, ListingSource, RealtorScraper};
use chrono::Datelike;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod output;
mod pipeline;
mod scraper;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    Residential,
    Multiplex,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Realtor,
    Apify,
    File,
}

#[derive(Parser, Debug)]
#[command(name = "listing_scout")]
#[command(about = "Find cashflowing listings and write them up as chat posts")]
struct Cli {
    #[arg(long, value_enum, default_value = "residential")]
    profile: ProfileArg,

    #[arg(long, value_enum, default_value = "realtor")]
    source: SourceArg,

    /// Saved search response or listing array, for `--source file`
    #[arg(long)]
    input: Option<PathBuf>,

    /// Apify dataset id, for `--source apify`
    #[arg(long)]
    dataset_id: Option<String>,

    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Overrides top-N (flat ranking) or the per-city cap (grouped ranking)
    #[arg(long)]
    top: Option<usize>,

    /// Also write deals.xlsx next to the text report
    #[arg(long)]
    xlsx: bool,

    /// Residential only: require age <= 35 years and amenities, lot size and basement details
    #[arg(long)]
    strict: bool,

    /// Replace the keyword list (repeatable)
    #[arg(long = "keyword")]
    keywords: Vec<String>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_config(cli: &Cli) -> Result<Config, AppError> {
    let profile = match cli.profile {
        ProfileArg::Residential => Profile::Residential,
        ProfileArg::Multiplex => Profile::Multiplex,
    };

    let mut config = Config::preset(profile, chrono::Local::now().year()).with_env();

    if cli.strict {
        config = config.strict();
    }
    if !cli.keywords.is_empty() {
        config.criteria.keywords = cli.keywords.iter().map(|k| k.to_lowercase()).collect();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    config.output.xlsx = cli.xlsx;

    if let Some(top) = cli.top {
        match &mut config.ranking {
            RankingPolicy::TopN { n } => *n = top,
            RankingPolicy::ByCity { per_city, .. } => *per_city = top,
        }
    }

    config = match cli.source {
        SourceArg::Realtor => config,
        SourceArg::Apify => {
            let dataset_id = cli.dataset_id.clone().ok_or_else(|| {
                ConfigError::Invalid("--dataset-id is required with --source apify".into())
            })?;
            config.apify_source(dataset_id)?
        }
        SourceArg::File => {
            let path = cli.input.clone().ok_or_else(|| {
                ConfigError::Invalid("--input is required with --source file".into())
            })?;
            config.source = SourceConfig::File { path };
            config
        }
    };

    config.validate()?;
    Ok(config)
}

fn make_source(config: &Config) -> Result<Box<dyn ListingSource>, AppError> {
    let source: Box<dyn ListingSource> = match &config.source {
        SourceConfig::Realtor => Box::new(RealtorScraper::new(config.search.clone())?),
        SourceConfig::Apify { dataset_id, token } => Box::new(ApifyDataset::new(
            dataset_id.clone(),
            token.clone(),
            config.search.timeout,
        )?),
        SourceConfig::File { path } => Box::new(JsonFileSource::new(path.clone())),
    };
    Ok(source)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = build_config(cli)?;
    let source = make_source(&config)?;

    let report = pipeline::run(source.as_ref(), &config)?;
    let written = output::write_outputs(&report.text, &report.selected, &config.output)?;

    println!("\n{}\n", report.text);
    if let Some(workbook) = &written.workbook {
        tracing::info!(workbook = %workbook.display(), "spreadsheet written");
    }
    tracing::info!(
        report = %written.report.display(),
        selected = report.summary.selected,
        "run complete"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // logs go to stderr, stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "run failed");
        std::process::exit(1);
    }
}
