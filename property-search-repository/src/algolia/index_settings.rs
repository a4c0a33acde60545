//! Algolia index settings for the property index.
//!
//! String and boolean attributes used in `filters` must be declared for
//! faceting before Algolia will filter on them. Numeric attributes filter
//! without any declaration.

use serde_json::{json, Value};

use property_search_shared::Amenity;

/// Get the settings applied to the property index.
///
/// The configuration includes:
/// - **searchableAttributes**: only the property name is matched by the query text
/// - **attributesForFaceting**: location codes, booked dates and amenity flags,
///   all `filterOnly` since nothing requests facet counts for them
pub fn get_index_settings() -> Value {
    let mut faceting: Vec<String> = ["city_code", "district_code", "ward_code", "bookedDate"]
        .iter()
        .map(|attribute| format!("filterOnly({})", attribute))
        .collect();
    faceting.extend(
        Amenity::ALL
            .iter()
            .map(|amenity| format!("filterOnly({})", amenity.field_name())),
    );

    json!({
        "searchableAttributes": ["propertyName"],
        "attributesForFaceting": faceting
    })
}
