use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A tracked trace gas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[default]
    #[serde(rename = "CO2")]
    Co2,
    #[serde(rename = "CH4")]
    Ch4,
}

impl Pollutant {
    /// Selector order, the first one is the default.
    pub const ALL: [Pollutant; 2] = [Pollutant::Co2, Pollutant::Ch4];

    pub fn field_name(&self) -> &'static str {
        match self {
            Pollutant::Co2 => "CO2",
            Pollutant::Ch4 => "CH4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Co2 => "Carbon dioxide (CO₂)",
            Pollutant::Ch4 => "Methane (CH₄)",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl FromStr for Pollutant {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CO2" => Ok(Pollutant::Co2),
            "CH4" => Ok(Pollutant::Ch4),
            _ => Err(DashboardError::InvalidField {
                field: s.to_string(),
            }),
        }
    }
}
