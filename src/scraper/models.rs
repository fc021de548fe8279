use serde::{Deserialize, Deserializer};
use serde_json::Value;

// listing
//  ├── MlsNumber
//  ├── PublicRemarks
//  ├── RelativeURLEn
//  ├── Building
//  │    ├── Bedrooms ("3 + 2")
//  │    ├── BedroomsAboveGround / BedroomsBelowGround
//  │    ├── BathroomTotal
//  │    ├── BasementFeatures
//  │    ├── DisplayAsYears
//  │    ├── Type
//  │    └── UnitTotal / TotalUnits
//  ├── Property
//  │    ├── Price / PriceUnformattedValue
//  │    ├── ParkingSpaceTotal
//  │    ├── AmmenitiesNearBy
//  │    ├── TaxAmount
//  │    └── Address
//  │         ├── AddressText ("415 Chatham Street|Brantford, Ontario N3S4J4")
//  │         ├── City / Municipality
//  │         └── LocalLogicNeighbourHood / Subdivision
//  └── Land
//       └── SizeTotal
//
// The search API is inconsistent about strings vs numbers, so every leaf is
// read through `loose_string` and parsed later by the domain layer.

/// Top level of a `PropertySearch_Post` response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Results", default)]
    pub results: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawListing {
    #[serde(rename = "MlsNumber", default, deserialize_with = "loose_string")]
    pub mls_number: Option<String>,
    #[serde(rename = "PublicRemarks", default, deserialize_with = "loose_string")]
    pub public_remarks: Option<String>,
    #[serde(rename = "RelativeURLEn", default, deserialize_with = "loose_string")]
    pub relative_url: Option<String>,

    #[serde(rename = "Building", default)]
    pub building: Option<Building>,
    #[serde(rename = "Property", default)]
    pub property: Option<PropertyInfo>,
    #[serde(rename = "Land", default)]
    pub land: Option<Land>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Building {
    #[serde(rename = "Bedrooms", default, deserialize_with = "loose_string")]
    pub bedrooms: Option<String>,
    #[serde(rename = "BedroomsAboveGround", default, deserialize_with = "loose_string")]
    pub bedrooms_above_ground: Option<String>,
    #[serde(rename = "BedroomsBelowGround", default, deserialize_with = "loose_string")]
    pub bedrooms_below_ground: Option<String>,
    #[serde(rename = "BathroomTotal", default, deserialize_with = "loose_string")]
    pub bathroom_total: Option<String>,
    #[serde(rename = "BasementFeatures", default, deserialize_with = "loose_string")]
    pub basement_features: Option<String>,
    #[serde(rename = "DisplayAsYears", default, deserialize_with = "loose_string")]
    pub display_as_years: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "loose_string")]
    pub building_type: Option<String>,
    #[serde(rename = "UnitTotal", default, deserialize_with = "loose_string")]
    pub unit_total: Option<String>,
    #[serde(rename = "TotalUnits", default, deserialize_with = "loose_string")]
    pub total_units: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PropertyInfo {
    #[serde(rename = "Price", default, deserialize_with = "loose_string")]
    pub price: Option<String>,
    #[serde(rename = "PriceUnformattedValue", default, deserialize_with = "loose_string")]
    pub price_unformatted: Option<String>,
    #[serde(rename = "ParkingSpaceTotal", default, deserialize_with = "loose_string")]
    pub parking_space_total: Option<String>,
    // sic, the API spells it this way
    #[serde(rename = "AmmenitiesNearBy", default, deserialize_with = "loose_string")]
    pub amenities_near_by: Option<String>,
    #[serde(rename = "TaxAmount", default, deserialize_with = "loose_string")]
    pub tax_amount: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Address {
    #[serde(rename = "AddressText", default, deserialize_with = "loose_string")]
    pub address_text: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "loose_string")]
    pub city: Option<String>,
    #[serde(rename = "Municipality", default, deserialize_with = "loose_string")]
    pub municipality: Option<String>,
    #[serde(rename = "LocalLogicNeighbourHood", default, deserialize_with = "loose_string")]
    pub neighbourhood: Option<String>,
    #[serde(rename = "Subdivision", default, deserialize_with = "loose_string")]
    pub subdivision: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Land {
    #[serde(rename = "SizeTotal", default, deserialize_with = "loose_string")]
    pub size_total: Option<String>,
}

/// Accepts a string, number, bool, array of scalars, or null and yields a
/// trimmed string. Empty strings collapse to `None`. Objects are rejected so a
/// record with a structurally wrong leaf counts as malformed.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            Some(parts.join(", "))
        }
        Some(Value::Object(_)) => {
            return Err(serde::de::Error::custom(
                "expected a scalar value, found an object",
            ))
        }
    };

    Ok(text
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_strings_both_become_strings() {
        let raw: RawListing = serde_json::from_value(json!({
            "Building": { "Bedrooms": "3 + 1", "BathroomTotal": 2 },
            "Property": { "ParkingSpaceTotal": "4", "PriceUnformattedValue": 799900 }
        }))
        .unwrap();

        let building = raw.building.unwrap();
        assert_eq!(building.bedrooms.as_deref(), Some("3 + 1"));
        assert_eq!(building.bathroom_total.as_deref(), Some("2"));

        let property = raw.property.unwrap();
        assert_eq!(property.parking_space_total.as_deref(), Some("4"));
        assert_eq!(property.price_unformatted.as_deref(), Some("799900"));
    }

    #[test]
    fn amenity_arrays_are_joined() {
        let raw: RawListing = serde_json::from_value(json!({
            "Property": { "AmmenitiesNearBy": ["Park", "Schools"] }
        }))
        .unwrap();

        assert_eq!(
            raw.property.unwrap().amenities_near_by.as_deref(),
            Some("Park, Schools")
        );
    }

    #[test]
    fn blank_strings_are_absent() {
        let raw: RawListing =
            serde_json::from_value(json!({ "PublicRemarks": "   ", "Land": {} })).unwrap();
        assert!(raw.public_remarks.is_none());
        assert!(raw.land.unwrap().size_total.is_none());
        assert!(raw.building.is_none());
    }

    #[test]
    fn object_in_a_leaf_is_an_error() {
        let result = serde_json::from_value::<RawListing>(json!({
            "Building": { "Bedrooms": { "above": 3 } }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn wrong_shape_sub_mapping_is_an_error() {
        let result = serde_json::from_value::<RawListing>(json!({ "Building": "n/a" }));
        assert!(result.is_err());
    }
}
