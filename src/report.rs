//! # Report Input
//! The incident report as handed over by the submission handler.
//!
//! Deserialization is strict about the category set and coordinate shape;
//! anything that fails here is a structural failure and ends up at the guard.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of incident categories accepted by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IncidentCategory {
    Traffic,
    Accident,
    Fire,
    Crime,
    Flood,
    Infrastructure,
    PowerOutage,
    WaterSupply,
    Medical,
    Other,
}

impl IncidentCategory {
    pub const ALL: [IncidentCategory; 10] = [
        Self::Traffic,
        Self::Accident,
        Self::Fire,
        Self::Crime,
        Self::Flood,
        Self::Infrastructure,
        Self::PowerOutage,
        Self::WaterSupply,
        Self::Medical,
        Self::Other,
    ];

    /// Human label, also used verbatim in upstream search queries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Traffic => "Traffic",
            Self::Accident => "Accident",
            Self::Fire => "Fire",
            Self::Crime => "Crime",
            Self::Flood => "Flood",
            Self::Infrastructure => "Infrastructure",
            Self::PowerOutage => "Power Outage",
            Self::WaterSupply => "Water Supply",
            Self::Medical => "Medical",
            Self::Other => "Other",
        }
    }

    /// Case-, space-, dash- and underscore-insensitive lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.label()
                .chars()
                .filter(|ch| *ch != ' ')
                .collect::<String>()
                .to_ascii_lowercase()
                == key
        })
    }
}

impl fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for IncidentCategory {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown incident category: {raw}")))
    }
}

/// Geographic coordinate, carried on the wire as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.longitude, p.latitude]
    }
}

/// A freshly submitted report to be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub description: String,
    pub category: IncidentCategory,
    pub location: GeoPoint,
    #[serde(default)]
    pub location_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub user_id: String,
}

impl ReportInput {
    pub fn new(
        description: impl Into<String>,
        category: IncidentCategory,
        location: GeoPoint,
        location_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            category,
            location,
            location_name: location_name.into(),
            photo_path: None,
            user_id: user_id.into(),
        }
    }

    /// Attach an uploaded photo (builder style).
    pub fn with_photo(mut self, path: impl Into<String>) -> Self {
        self.photo_path = Some(path.into());
        self
    }

    /// Photo path if one was actually supplied; blank paths count as absent.
    pub fn photo(&self) -> Option<&str> {
        self.photo_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Structural checks that must hold before any signal runs.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            bail!("report description is required");
        }
        if !self.location.is_valid() {
            bail!(
                "invalid coordinate: lng={}, lat={}",
                self.location.longitude,
                self.location.latitude
            );
        }
        Ok(())
    }
}
