// src/domain/criteria.rs

use crate::config::FilterCriteria;
use crate::domain::listing::Listing;
use serde_json::Value;

/// Why a well-formed listing did not make the cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Bedrooms,
    Bathrooms,
    Parking,
    Age,
    Keywords,
    MissingDetails,
    PropertyType,
}

#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub kept: Vec<Listing>,
    pub rejected: usize,
    pub malformed: usize,
}

/// Normalize each raw record and keep those that satisfy `criteria`.
/// Malformed records are counted and skipped; they never fail the batch.
pub fn filter_listings(records: &[Value], criteria: &FilterCriteria) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for (idx, record) in records.iter().enumerate() {
        let listing = match Listing::from_value(record, criteria.current_year) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::debug!(index = idx, error = %e, "skipping malformed record");
                outcome.malformed += 1;
                continue;
            }
        };

        match check(&listing, criteria) {
            Ok(()) => outcome.kept.push(listing),
            Err(reason) => {
                tracing::trace!(mls = %listing.mls_number, ?reason, "listing rejected");
                outcome.rejected += 1;
            }
        }
    }

    outcome
}

pub fn check(listing: &Listing, criteria: &FilterCriteria) -> Result<(), Rejection> {
    if listing.bedrooms < criteria.min_bedrooms {
        return Err(Rejection::Bedrooms);
    }
    if listing.bathrooms < criteria.min_bathrooms {
        return Err(Rejection::Bathrooms);
    }
    if listing.parking < criteria.min_parking {
        return Err(Rejection::Parking);
    }

    if let Some(max_age) = criteria.max_age_years {
        if listing.age_years.unwrap_or(0) > max_age {
            return Err(Rejection::Age);
        }
    }

    if !criteria.keywords.is_empty() && !has_keyword(&listing.searchable_text(), &criteria.keywords) {
        return Err(Rejection::Keywords);
    }

    if criteria.require_details
        && (listing.amenities.is_none() || listing.lot_size.is_none() || listing.basement_features.is_none())
    {
        return Err(Rejection::MissingDetails);
    }

    if !criteria.property_types.is_empty() {
        let matches = listing
            .property_type
            .as_deref()
            .map(normalize_property_type)
            .is_some_and(|t| criteria.property_types.iter().any(|allowed| normalize_property_type(allowed) == t));
        if !matches {
            return Err(Rejection::PropertyType);
        }
    }

    Ok(())
}

/// Case-insensitive substring match against any keyword.
pub fn has_keyword(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|kw| text.contains(&kw.to_lowercase()))
}

/// `"Four-Plex"` and `"four plex"` both become `"fourplex"`.
pub fn normalize_property_type(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Profile};
    use serde_json::json;

    fn residential() -> FilterCriteria {
        Config::preset(Profile::Residential, 2025).criteria
    }

    fn multiplex() -> FilterCriteria {
        Config::preset(Profile::Multiplex, 2025).criteria
    }

    fn house(bedrooms: &str, remarks: &str) -> Value {
        json!({
            "MlsNumber": "W1",
            "PublicRemarks": remarks,
            "Building": { "Bedrooms": bedrooms, "BathroomTotal": "3" },
            "Property": { "ParkingSpaceTotal": "2", "PriceUnformattedValue": "850000" }
        })
    }

    #[test]
    fn two_bedrooms_never_pass() {
        let records = vec![house("2", "LEGAL BASEMENT, second dwelling, income suite")];
        let outcome = filter_listings(&records, &residential());
        assert!(outcome.kept.is_empty());
        assert_eq!(outcome.rejected, 1);
    }

    #[test]
    fn keyword_match_ignores_case() {
        let records = vec![
            house("3+1", "Gorgeous home with a Legal Basement apartment"),
            house("4", "Freshly painted, close to schools"),
        ];
        let outcome = filter_listings(&records, &residential());
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].bedrooms, 4);
        assert_eq!(outcome.rejected, 1);
    }

    #[test]
    fn basement_features_count_toward_keywords() {
        let record = json!({
            "PublicRemarks": "Great location",
            "Building": {
                "Bedrooms": "3", "BathroomTotal": "2",
                "BasementFeatures": "Registered Basement apartment"
            },
            "Property": { "ParkingSpaceTotal": "3" }
        });
        assert_eq!(filter_listings(&[record], &residential()).kept.len(), 1);
    }

    #[test]
    fn missing_building_is_skipped_silently() {
        let records = vec![
            json!({ "PublicRemarks": "legal basement", "Property": {} }),
            house("4", "legal basement"),
        ];
        let outcome = filter_listings(&records, &residential());
        assert_eq!(outcome.malformed, 1);
        assert_eq!(outcome.kept.len(), 1);
    }

    #[test]
    fn missing_parking_counts_as_zero() {
        let record = json!({
            "PublicRemarks": "legal basement",
            "Building": { "Bedrooms": "3", "BathroomTotal": "2" },
            "Property": {}
        });
        let listing = Listing::from_value(&record, 2025).unwrap();
        assert_eq!(check(&listing, &residential()), Err(Rejection::Parking));
    }

    #[test]
    fn age_limit_applies_only_when_set() {
        let record = json!({
            "PublicRemarks": "legal basement",
            "Building": { "Bedrooms": "3", "BathroomTotal": "2", "DisplayAsYears": "40" },
            "Property": { "ParkingSpaceTotal": "2" }
        });
        let listing = Listing::from_value(&record, 2025).unwrap();

        let mut criteria = residential();
        assert!(check(&listing, &criteria).is_ok());

        criteria.max_age_years = Some(35);
        assert_eq!(check(&listing, &criteria), Err(Rejection::Age));
    }

    #[test]
    fn strict_mode_requires_details() {
        let mut criteria = residential();
        criteria.require_details = true;

        let bare = Listing::from_value(&house("4", "legal basement"), 2025).unwrap();
        assert_eq!(check(&bare, &criteria), Err(Rejection::MissingDetails));

        let detailed = Listing {
            amenities: Some("Park".into()),
            lot_size: Some("40 x 120".into()),
            basement_features: Some("Separate entrance".into()),
            ..bare
        };
        assert!(check(&detailed, &criteria).is_ok());
    }

    #[test]
    fn property_type_normalizes_spaces_hyphens_and_case() {
        assert_eq!(normalize_property_type("Four-Plex"), "fourplex");
        assert_eq!(normalize_property_type(" Tri plex "), "triplex");
    }

    #[test]
    fn multiplex_types_filter() {
        let typed = |t: &str| json!({ "Building": { "Type": t }, "Property": {} });
        let records = vec![
            typed("Triplex"),
            typed("Four-plex"),
            typed("4 Plex"),
            typed("House"),
            json!({ "Building": {}, "Property": {} }),
        ];

        let outcome = filter_listings(&records, &multiplex());
        let kept: Vec<_> = outcome
            .kept
            .iter()
            .filter_map(|l| l.property_type.clone())
            .collect();
        assert_eq!(kept, vec!["Triplex", "Four-plex", "4 Plex"]);
        assert_eq!(outcome.rejected, 2);
    }

    #[test]
    fn empty_keyword_list_is_no_requirement() {
        let listing = Listing::from_value(&house("3", "nothing special"), 2025).unwrap();
        let mut criteria = residential();
        criteria.keywords.clear();
        assert!(check(&listing, &criteria).is_ok());
    }
}
