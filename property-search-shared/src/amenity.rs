//! Boolean amenity flags carried by every property record.

/// One of the eight boolean amenities a property can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    Tv,
    PetAllowance,
    Pool,
    WashingMachine,
    Breakfast,
    Bbq,
    Wifi,
    AirConditioner,
}

impl Amenity {
    /// All amenities, in the order their filter clauses are emitted.
    pub const ALL: [Amenity; 8] = [
        Amenity::Tv,
        Amenity::PetAllowance,
        Amenity::Pool,
        Amenity::WashingMachine,
        Amenity::Breakfast,
        Amenity::Bbq,
        Amenity::Wifi,
        Amenity::AirConditioner,
    ];

    /// The attribute name used in the index and in JSON payloads.
    pub fn field_name(self) -> &'static str {
        match self {
            Amenity::Tv => "tv",
            Amenity::PetAllowance => "petAllowance",
            Amenity::Pool => "pool",
            Amenity::WashingMachine => "washingMachine",
            Amenity::Breakfast => "breakfast",
            Amenity::Bbq => "bbq",
            Amenity::Wifi => "wifi",
            Amenity::AirConditioner => "airConditioner",
        }
    }
}
