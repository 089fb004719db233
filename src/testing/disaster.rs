//! Disaster event vocabulary
//!
//! The API owns these records; the harness only checks that what comes back
//! over the wire stays inside the closed value sets below.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields every disaster event record must carry
pub const REQUIRED_FIELDS: [&str; 10] = [
    "id",
    "disaster_type",
    "title",
    "description",
    "severity",
    "latitude",
    "longitude",
    "location_name",
    "timestamp",
    "source",
];

/// Kind of hazard a record tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    Earthquake,
    Wildfire,
    Flood,
    Tornado,
    AirQuality,
}

impl DisasterType {
    pub const ALL: [DisasterType; 5] = [
        DisasterType::Earthquake,
        DisasterType::Wildfire,
        DisasterType::Flood,
        DisasterType::Tornado,
        DisasterType::AirQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "earthquake",
            DisasterType::Wildfire => "wildfire",
            DisasterType::Flood => "flood",
            DisasterType::Tornado => "tornado",
            DisasterType::AirQuality => "air_quality",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity grading of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Severe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Severe => "severe",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
