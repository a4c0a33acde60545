//! Search query types.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::{Amenity, LocationCode};

/// Number of hits per page when the client does not ask for one.
pub const DEFAULT_HITS_PER_PAGE: u32 = 20;

fn default_hits_per_page() -> u32 {
    DEFAULT_HITS_PER_PAGE
}

/// Structured search parameters sent by clients.
///
/// Every field is optional. Absent, zero or `false` values mean "no
/// constraint" for the corresponding filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query matched against the property name.
    #[serde(rename = "propertyName", default)]
    pub property_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_codes")]
    pub city_codes: Vec<LocationCode>,
    #[serde(default, deserialize_with = "lenient_codes")]
    pub district_codes: Vec<LocationCode>,
    #[serde(default, deserialize_with = "lenient_codes")]
    pub ward_codes: Vec<LocationCode>,
    /// Minimum guest capacity.
    #[serde(default)]
    pub max_guest: Option<f64>,
    /// Minimum number of bedrooms.
    #[serde(default)]
    pub bed_rooms: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub tv: Option<bool>,
    #[serde(rename = "petAllowance", default)]
    pub pet_allowance: Option<bool>,
    #[serde(default)]
    pub pool: Option<bool>,
    #[serde(rename = "washingMachine", default)]
    pub washing_machine: Option<bool>,
    #[serde(default)]
    pub breakfast: Option<bool>,
    #[serde(default)]
    pub bbq: Option<bool>,
    #[serde(default)]
    pub wifi: Option<bool>,
    #[serde(rename = "airConditioner", default)]
    pub air_conditioner: Option<bool>,
    /// Zero-based result page.
    #[serde(default)]
    pub page: u32,
    #[serde(rename = "hitsPerPage", default = "default_hits_per_page")]
    pub hits_per_page: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            property_name: None,
            city_codes: Vec::new(),
            district_codes: Vec::new(),
            ward_codes: Vec::new(),
            max_guest: None,
            bed_rooms: None,
            min_price: None,
            max_price: None,
            check_in_date: None,
            check_out_date: None,
            tv: None,
            pet_allowance: None,
            pool: None,
            washing_machine: None,
            breakfast: None,
            bbq: None,
            wifi: None,
            air_conditioner: None,
            page: 0,
            hits_per_page: DEFAULT_HITS_PER_PAGE,
        }
    }
}

impl SearchQuery {
    /// Create a query matching the given property name.
    pub fn named(property_name: impl Into<String>) -> Self {
        Self {
            property_name: Some(property_name.into()),
            ..Default::default()
        }
    }

    /// Whether the client asked for properties that have this amenity.
    pub fn requires(&self, amenity: Amenity) -> bool {
        let requested = match amenity {
            Amenity::Tv => self.tv,
            Amenity::PetAllowance => self.pet_allowance,
            Amenity::Pool => self.pool,
            Amenity::WashingMachine => self.washing_machine,
            Amenity::Breakfast => self.breakfast,
            Amenity::Bbq => self.bbq,
            Amenity::Wifi => self.wifi,
            Amenity::AirConditioner => self.air_conditioner,
        };
        requested.unwrap_or(false)
    }

    /// Require an amenity.
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        let slot = match amenity {
            Amenity::Tv => &mut self.tv,
            Amenity::PetAllowance => &mut self.pet_allowance,
            Amenity::Pool => &mut self.pool,
            Amenity::WashingMachine => &mut self.washing_machine,
            Amenity::Breakfast => &mut self.breakfast,
            Amenity::Bbq => &mut self.bbq,
            Amenity::Wifi => &mut self.wifi,
            Amenity::AirConditioner => &mut self.air_conditioner,
        };
        *slot = Some(true);
        self
    }

    /// Text to search for; empty matches every record.
    pub fn query_text(&self) -> &str {
        self.property_name.as_deref().unwrap_or("")
    }

    /// Hits per page, falling back to the default for a zero page size.
    pub fn effective_hits_per_page(&self) -> u32 {
        if self.hits_per_page == 0 {
            DEFAULT_HITS_PER_PAGE
        } else {
            self.hits_per_page
        }
    }
}

/// A location-code group that is not a list (e.g. `null` or a bare string)
/// is ignored rather than rejected. Inside a list, entries that are neither
/// a string nor an integer are skipped and the remaining codes still filter.
fn lenient_codes<'de, D>(deserializer: D) -> Result<Vec<LocationCode>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CodeEntry {
        Code(LocationCode),
        Other(de::IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CodeGroup {
        List(Vec<CodeEntry>),
        Other(de::IgnoredAny),
    }

    Ok(match CodeGroup::deserialize(deserializer)? {
        CodeGroup::List(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                CodeEntry::Code(code) => Some(code),
                CodeEntry::Other(_) => None,
            })
            .collect(),
        CodeGroup::Other(_) => Vec::new(),
    })
}

/// A single search call against the provider index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSearchRequest {
    pub query: String,
    pub filters: String,
    pub page: u32,
    #[serde(rename = "hitsPerPage")]
    pub hits_per_page: u32,
}
