use crate::config::{Config, Profile};
use serde_json::{json, Value};
use std::path::PathBuf;

pub fn residential_config() -> Config {
    let mut config = Config::preset(Profile::Residential, 2025);
    config.output.dir = scratch_dir("residential");
    config
}

pub fn multiplex_config() -> Config {
    let mut config = Config::preset(Profile::Multiplex, 2025);
    config.output.dir = scratch_dir("multiplex");
    config
}

pub fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("listing_scout_it_{name}_{}", std::process::id()))
}

/// A detached house record shaped like the search API returns it.
pub fn house(mls: &str, price: u64, bedrooms: &str, remarks: &str) -> Value {
    json!({
        "MlsNumber": mls,
        "PublicRemarks": remarks,
        "RelativeURLEn": format!("/real-estate/{mls}"),
        "Building": {
            "Bedrooms": bedrooms,
            "BathroomTotal": "3",
            "BasementFeatures": "Separate entrance",
            "Type": "House"
        },
        "Property": {
            "Price": format!("${price}"),
            "PriceUnformattedValue": price.to_string(),
            "ParkingSpaceTotal": "4",
            "TaxAmount": "$6,000",
            "Address": { "AddressText": format!("{mls} Queen St|Brampton, Ontario L6X0A1") }
        }
    })
}

pub fn multiplex(mls: &str, city: &str, kind: &str, units: u32, price: u64) -> Value {
    json!({
        "MlsNumber": mls,
        "PublicRemarks": "Fully rented legal triplex. Separate meters.",
        "Building": {
            "Type": kind,
            "UnitTotal": units.to_string(),
            "Bedrooms": "6",
            "BathroomTotal": "3"
        },
        "Property": {
            "Price": format!("${price}"),
            "Address": {
                "AddressText": format!("{mls} King St|{city}, Ontario N0N0N0"),
                "City": city
            }
        }
    })
}
