//! Inference records returned by the service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rate_limit::RateLimit;

/// Inferred gender. The service reports `null` when it has no data for a
/// name; any string it may add in future lands in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Unknown => "unknown",
            Gender::Other(value) => value,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Gender::Unknown => serializer.serialize_none(),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw {
            None => Gender::Unknown,
            Some(value) => match value.as_str() {
                "" | "unknown" => Gender::Unknown,
                "female" => Gender::Female,
                "male" => Gender::Male,
                _ => Gender::Other(value),
            },
        })
    }
}

/// One name's inference. Fields the service omits decode to their zero
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub count: i64,
    /// Echoed back when the request carried a country filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

/// Result of a single-name lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub inference: Inference,
    pub rate_limit: RateLimit,
}
