//! Game platform selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FutmarketError;

/// Game platform a price is quoted for.
///
/// Xbox shares the PlayStation market, so its wire value (`XB`) indexes
/// the same price block as `PS` in most responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Ps,
    Pc,
    Xbox,
}

impl Platform {
    /// Wire value used in query parameters and response keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ps => "PS",
            Platform::Pc => "PC",
            Platform::Xbox => "XB",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FutmarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PS" | "PLAYSTATION" => Ok(Platform::Ps),
            "PC" => Ok(Platform::Pc),
            "XB" | "XBOX" => Ok(Platform::Xbox),
            other => Err(FutmarketError::Configuration(format!(
                "unknown platform: {other}"
            ))),
        }
    }
}
