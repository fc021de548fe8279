// src/domain/listing.rs

use crate::scraper::models::RawListing;
use thiserror::Error;

const LISTING_BASE_URL: &str = "https://www.realtor.ca";

#[derive(Debug, Error, PartialEq)]
pub enum ListingError {
    #[error("record is not a listing object: {0}")]
    Shape(String),
    #[error("missing {0} section")]
    MissingSection(&'static str),
}

/// A listing flattened and normalized from the raw search record.
/// Missing numbers are zero and missing text is `None`; nothing here is
/// validated against investment criteria yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub mls_number: String,
    pub url: Option<String>,
    pub address_text: Option<String>,

    /// City parsed from the address text, used in residential headlines.
    pub area: String,
    pub city: String,
    pub community: String,

    pub property_type: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
    pub units: Option<u32>,

    pub price: f64,
    pub tax_amount: f64,

    pub remarks: String,
    pub amenities: Option<String>,
    pub lot_size: Option<String>,
    pub basement_features: Option<String>,

    /// Age reported by the listing, if any. Approximate, not a year-built record.
    pub age_years: Option<u32>,
    pub year_built: i32,
}

impl Listing {
    pub fn from_value(value: &serde_json::Value, current_year: i32) -> Result<Self, ListingError> {
        let raw: RawListing = serde_json::from_value(value.clone())
            .map_err(|e| ListingError::Shape(e.to_string()))?;
        Self::from_raw(&raw, current_year)
    }

    pub fn from_raw(raw: &RawListing, current_year: i32) -> Result<Self, ListingError> {
        let building = raw.building.as_ref().ok_or(ListingError::MissingSection("Building"))?;
        let property = raw.property.as_ref().ok_or(ListingError::MissingSection("Property"))?;
        let address = property.address.as_ref();

        let address_text = address.and_then(|a| a.address_text.clone());
        let (parsed_city, province) = address_text
            .as_deref()
            .map(parse_address_text)
            .unwrap_or((None, None));

        let city = address
            .and_then(|a| a.city.clone().or_else(|| a.municipality.clone()))
            .or_else(|| parsed_city.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let community = address
            .and_then(|a| a.neighbourhood.clone().or_else(|| a.subdivision.clone()))
            .or(province)
            .unwrap_or_else(|| "Unknown Area".to_string());

        let bedrooms = match building.bedrooms.as_deref() {
            Some(text) => parse_bedrooms(Some(text)),
            None => {
                parse_count(building.bedrooms_above_ground.as_deref())
                    + parse_count(building.bedrooms_below_ground.as_deref())
            }
        };

        let price = property
            .price_unformatted
            .as_deref()
            .map(parse_money)
            .filter(|p| *p > 0.0)
            .or_else(|| property.price.as_deref().map(parse_money))
            .unwrap_or(0.0);

        let age_years = building
            .display_as_years
            .as_deref()
            .filter(|s| s.chars().all(|c| c.is_ascii_digit()))
            .and_then(|s| s.parse::<u32>().ok());

        let units = building
            .unit_total
            .as_deref()
            .or(building.total_units.as_deref())
            .and_then(|s| s.trim().parse::<u32>().ok());

        Ok(Listing {
            mls_number: raw.mls_number.clone().unwrap_or_default(),
            url: raw.relative_url.as_ref().map(|rel| format!("{LISTING_BASE_URL}{rel}")),
            address_text,
            area: parsed_city.unwrap_or_default(),
            city,
            community,
            property_type: building.building_type.clone(),
            bedrooms,
            bathrooms: parse_count(building.bathroom_total.as_deref()),
            parking: parse_count(property.parking_space_total.as_deref()),
            units,
            price,
            tax_amount: property.tax_amount.as_deref().map(parse_money).unwrap_or(0.0),
            remarks: raw.public_remarks.clone().unwrap_or_default(),
            amenities: property.amenities_near_by.clone(),
            lot_size: raw.land.as_ref().and_then(|l| l.size_total.clone()),
            basement_features: building.basement_features.clone(),
            age_years,
            year_built: current_year - age_years.unwrap_or(0) as i32,
        })
    }

    /// Remarks plus basement features, lower-cased, for keyword matching.
    pub fn searchable_text(&self) -> String {
        let mut text = self.remarks.clone();
        if let Some(features) = &self.basement_features {
            text.push(' ');
            text.push_str(features);
        }
        text.to_lowercase()
    }
}

/// Total bedrooms from strings like `"3 + 2"`. Non-numeric parts count as zero.
pub fn parse_bedrooms(text: Option<&str>) -> u32 {
    let Some(text) = text else { return 0 };
    text.replace(' ', "")
        .split('+')
        .filter(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|part| part.parse::<u32>().ok())
        .sum()
}

/// Whole count from `"2"`, `2` or `"2.0"`; anything else is zero.
pub fn parse_count(text: Option<&str>) -> u32 {
    let Some(text) = text.map(str::trim) else { return 0 };
    if let Ok(n) = text.parse::<u32>() {
        return n;
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => f.floor() as u32,
        _ => 0,
    }
}

/// Dollar amount from `"$1,234,500"` or `"1234500"`. Unparseable or negative is zero.
pub fn parse_money(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Split `"415 Chatham Street|Brantford, Ontario N3S4J4"` into city and province.
pub fn parse_address_text(text: &str) -> (Option<String>, Option<String>) {
    let Some((_, locality)) = text.split_once('|') else {
        return (None, None);
    };

    let mut parts = locality.splitn(2, ',');
    let city = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let province = parts
        .next()
        .and_then(|rest| rest.split_whitespace().next())
        .map(str::to_string);

    (city, province)
}
