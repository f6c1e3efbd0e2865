//! Gender of a profile

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender as stored on a profile (`M` or `F`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter code used on the wire and in the database
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// Error when a gender code is not `M` or `F`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid gender '{0}', expected M or F")]
pub struct GenderParseError(pub String);

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            other => Err(GenderParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
