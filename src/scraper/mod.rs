mod dataset;
pub mod models;
mod scraper;
mod scraper_error;

pub use dataset::{ApifyDataset, JsonFileSource};
pub use scraper::{ListingSource, RealtorScraper};
pub use scraper_error::ScraperError;
