//! Station record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Unique identifier of a station within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A metro line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u16);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}", self.0)
    }
}

/// WGS84 position of a station entrance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates(
                "latitude must be within -90..=90",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(
                "longitude must be within -180..=180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A single metro stop.
///
/// Stations are immutable once built. The name is guaranteed non-empty,
/// including for records deserialized from storage.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::{LineId, Station, StationId};
///
/// let station = Station::new(StationId(1), "Bayóvar", LineId(1), "San Juan de Lurigancho").unwrap();
/// assert_eq!(station.name(), "Bayóvar");
///
/// assert!(Station::new(StationId(2), "  ", LineId(1), "Lima").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StationRecord")]
pub struct Station {
    id: StationId,
    name: String,
    line: LineId,
    district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hours: Option<String>,
}

impl Station {
    /// Create a station without coordinates or operating hours.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        line: LineId,
        district: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyStationName);
        }

        Ok(Self {
            id,
            name,
            line,
            district: district.into(),
            coordinates: None,
            hours: None,
        })
    }

    /// Attach a geographic position.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Attach an operating-hours description (e.g. "05:30 - 23:00").
    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn hours(&self) -> Option<&str> {
        self.hours.as_deref()
    }
}

/// Unvalidated shape of a stored station.
#[derive(Deserialize)]
struct StationRecord {
    id: StationId,
    name: String,
    line: LineId,
    #[serde(default)]
    district: String,
    #[serde(default)]
    coordinates: Option<Coordinates>,
    #[serde(default)]
    hours: Option<String>,
}

impl TryFrom<StationRecord> for Station {
    type Error = DomainError;

    fn try_from(record: StationRecord) -> Result<Self, Self::Error> {
        let mut station = Station::new(record.id, record.name, record.line, record.district)?;
        if let Some(coordinates) = record.coordinates {
            station = station.with_coordinates(Coordinates::new(
                coordinates.latitude,
                coordinates.longitude,
            )?);
        }
        station.hours = record.hours;
        Ok(station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angamos() -> Station {
        Station::new(StationId(16), "Angamos", LineId(1), "San Borja").unwrap()
    }

    #[test]
    fn new_station_has_no_optional_fields() {
        let station = angamos();
        assert_eq!(station.id(), StationId(16));
        assert_eq!(station.name(), "Angamos");
        assert_eq!(station.line(), LineId(1));
        assert_eq!(station.district(), "San Borja");
        assert!(station.coordinates().is_none());
        assert!(station.hours().is_none());
    }

    #[test]
    fn reject_empty_name() {
        let err = Station::new(StationId(1), "", LineId(1), "Lima").unwrap_err();
        assert_eq!(err, DomainError::EmptyStationName);

        assert!(Station::new(StationId(1), " \t", LineId(1), "Lima").is_err());
    }

    #[test]
    fn coordinates_range_checked() {
        assert!(Coordinates::new(-12.1, -77.0).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let station = angamos()
            .with_coordinates(Coordinates::new(-12.11, -77.0).unwrap())
            .with_hours("05:30 - 23:00");
        assert_eq!(station.hours(), Some("05:30 - 23:00"));
        assert_eq!(station.coordinates().unwrap().latitude, -12.11);
    }

    #[test]
    fn deserialize_validates_name() {
        let json = r#"{"id": 3, "name": "", "line": 1, "district": "Lima"}"#;
        assert!(serde_json::from_str::<Station>(json).is_err());

        let json = r#"{"id": 3, "name": "San Martín", "line": 1}"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.name(), "San Martín");
        assert_eq!(station.district(), "");
    }

    #[test]
    fn serde_keeps_optional_fields() {
        let station = angamos().with_hours("05:30 - 23:00");
        let json = serde_json::to_string(&station).unwrap();
        assert!(!json.contains("coordinates"));

        let back: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }

    #[test]
    fn display_ids() {
        assert_eq!(StationId(7).to_string(), "7");
        assert_eq!(LineId(2).to_string(), "Line 2");
    }
}
