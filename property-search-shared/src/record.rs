//! The canonical property record stored in the search index.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::Amenity;

/// An opaque administrative location code (city, district or ward).
///
/// Clients send these either as JSON strings or as integers. The original
/// shape is kept so a record reads back exactly as it was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationCode::Number(n) => write!(f, "{}", n),
            LocationCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for LocationCode {
    fn from(code: &str) -> Self {
        LocationCode::Text(code.to_string())
    }
}

impl From<i64> for LocationCode {
    fn from(code: i64) -> Self {
        LocationCode::Number(code)
    }
}

/// Booked dates attached to a record.
///
/// Writers send either one date or a list of dates; both are forwarded
/// untouched. Only the list form lets a multi-day booking be excluded by the
/// date-range search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookedDates {
    Single(String),
    Many(Vec<String>),
}

/// A property listing as stored in the search index.
///
/// Deserializing from an arbitrary client payload keeps exactly these fields;
/// anything else in the payload is dropped. Absent fields are omitted when
/// the record is serialized for the provider. Numbers are forwarded in the
/// form the client wrote them, so `1500000` is not turned into `1500000.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// External identity of the record in the index.
    #[serde(rename = "objectID", default)]
    pub object_id: String,
    #[serde(rename = "propertyName", default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_code: Option<LocationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_code: Option<LocationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward_code: Option<LocationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_guest: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_rooms: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(rename = "bookedDate", default, skip_serializing_if = "Option::is_none")]
    pub booked_date: Option<BookedDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv: Option<bool>,
    #[serde(rename = "petAllowance", default, skip_serializing_if = "Option::is_none")]
    pub pet_allowance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<bool>,
    #[serde(rename = "washingMachine", default, skip_serializing_if = "Option::is_none")]
    pub washing_machine: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbq: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi: Option<bool>,
    #[serde(rename = "airConditioner", default, skip_serializing_if = "Option::is_none")]
    pub air_conditioner: Option<bool>,
}

impl PropertyRecord {
    /// Create an empty record with the given object ID.
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            ..Default::default()
        }
    }

    /// The value of an amenity flag, if the record carries it.
    pub fn amenity(&self, amenity: Amenity) -> Option<bool> {
        match amenity {
            Amenity::Tv => self.tv,
            Amenity::PetAllowance => self.pet_allowance,
            Amenity::Pool => self.pool,
            Amenity::WashingMachine => self.washing_machine,
            Amenity::Breakfast => self.breakfast,
            Amenity::Bbq => self.bbq,
            Amenity::Wifi => self.wifi,
            Amenity::AirConditioner => self.air_conditioner,
        }
    }

    /// Set an amenity flag.
    pub fn with_amenity(mut self, amenity: Amenity, value: bool) -> Self {
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
        *slot = Some(value);
        self
    }

    /// Whether the record has a usable object ID.
    pub fn has_object_id(&self) -> bool {
        !self.object_id.trim().is_empty()
    }
}
