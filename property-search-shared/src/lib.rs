//! # Property Search Shared
//!
//! Types shared between the property search repository and the HTTP gateway:
//! the canonical property record, the inbound search query, and the request
//! handed to the search provider.

mod amenity;
mod dates;
mod query;
mod record;

pub use amenity::Amenity;
pub use dates::parse_calendar_date;
pub use query::{ProviderSearchRequest, SearchQuery, DEFAULT_HITS_PER_PAGE};
pub use record::{BookedDates, LocationCode, PropertyRecord};
