pub mod criteria;
pub mod finance;
pub mod listing;
pub mod ranking;

pub use criteria::filter_listings;
pub use finance::analyze;
pub use listing::Listing;
pub use ranking::{select, ScoredListing};
