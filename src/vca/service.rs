//! Service variants of vCloud Air

use serde::{Deserialize, Serialize};

/// The deployment variant a profile talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// vCloud Air On Demand (API 5.7)
    Vca,
    /// vCloud Air subscription, formerly vCHS (API 5.6)
    Vchs,
    /// Standalone vCloud Director (API 5.5)
    Standalone,
}

impl ServiceType {
    /// Map a service API version to its variant
    pub fn from_version(version: &str) -> Option<Self> {
        match version {
            "5.7" => Some(ServiceType::Vca),
            "5.6" => Some(ServiceType::Vchs),
            "5.5" => Some(ServiceType::Standalone),
            _ => None,
        }
    }

    /// API version spoken by the variant
    pub fn version(&self) -> &'static str {
        match self {
            ServiceType::Vca => "5.7",
            ServiceType::Vchs => "5.6",
            ServiceType::Standalone => "5.5",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::Vca => write!(f, "vca"),
            ServiceType::Vchs => write!(f, "vchs"),
            ServiceType::Standalone => write!(f, "standalone"),
        }
    }
}
