use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Number of characters in a vehicle identification number.
pub const VIN_LENGTH: usize = 17;

/// Identity shared by the driver and passenger roles of one person.
///
/// A `Driver` and a `Passenger` carrying the same `PersonId` are the same
/// person, which is what self-trip avoidance compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PersonId(u32);

impl PersonId {
    pub fn new(raw: u32) -> Result<Self> {
        if raw == 0 {
            return Err(DispatchError::invalid("person id must be positive, got 0"));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PersonId {
    type Error = DispatchError;

    fn try_from(raw: u32) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<PersonId> for u32 {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TripId(u32);

impl TripId {
    pub fn new(raw: u32) -> Result<Self> {
        if raw == 0 {
            return Err(DispatchError::invalid("trip id must be positive, got 0"));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TripId {
    type Error = DispatchError;

    fn try_from(raw: u32) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<TripId> for u32 {
    fn from(id: TripId) -> Self {
        id.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 17-character alphanumeric vehicle identification number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != VIN_LENGTH || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DispatchError::invalid(format!(
                "vehicle id must be {VIN_LENGTH} alphanumeric characters, got {raw:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ids_are_rejected() {
        assert!(PersonId::new(0).is_err());
        assert!(TripId::new(0).is_err());
        assert_eq!(PersonId::new(54).expect("id").get(), 54);
    }

    #[test]
    fn vin_requires_exactly_seventeen_alphanumerics() {
        assert!(Vin::parse("1C9EVBRM0YBC564DZ").is_ok());
        assert!(Vin::parse("").is_err());
        assert!(Vin::parse("33133313331333133extranums").is_err());
        assert!(Vin::parse("1C9EVBRM0YBC564D").is_err());
        assert!(Vin::parse("1C9EVBRM0YBC564D-").is_err());
    }

    #[test]
    fn person_id_deserialization_validates() {
        let id: PersonId = serde_json::from_str("8").expect("valid id");
        assert_eq!(id.get(), 8);
        assert!(serde_json::from_str::<PersonId>("0").is_err());
    }
}
