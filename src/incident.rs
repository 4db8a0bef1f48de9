//! Incident records as loaded by the map front end.
//!
//! Only `position` matters for clustering; the descriptive fields ride along
//! so the same value can back a marker popup or a CSV export. Dates are kept as
//! the source strings.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A single reported incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Source record id.
    pub id: String,
    /// Where it happened.
    pub position: Point,
    /// Crime category, e.g. "BURGLARY".
    #[serde(default)]
    pub crime: String,
    /// Street address or block description.
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crime_date_time: Option<String>,
}

impl Incident {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            crime: String::new(),
            location: String::new(),
            date_of_report: None,
            crime_date_time: None,
        }
    }

    /// Build an incident from raw latitude/longitude text.
    ///
    /// Returns `None` when either coordinate is blank, unparseable, or not
    /// finite. Loaders skip such rows instead of failing the whole load.
    ///
    /// After trimming whitespace the whole field must parse as a number:
    /// trailing text such as `"39.29abc"` rejects the row rather than being
    /// cut off at the first non-numeric character.
    pub fn from_raw(id: impl Into<String>, lat: &str, lng: &str) -> Option<Self> {
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        let position = Point::new(lat, lng);
        position.is_finite().then(|| Self::new(id, position))
    }

    pub fn with_crime(mut self, crime: impl Into<String>) -> Self {
        self.crime = crime.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_date_of_report(mut self, date: impl Into<String>) -> Self {
        self.date_of_report = Some(date.into());
        self
    }

    pub fn with_crime_date_time(mut self, date: impl Into<String>) -> Self {
        self.crime_date_time = Some(date.into());
        self
    }
}

/// The flat coordinate list handed to a clusterer.
pub fn positions(incidents: &[Incident]) -> Vec<Point> {
    incidents.iter().map(|i| i.position).collect()
}
