//! Profile file data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vca::ServiceType;

use super::password;

/// Top-level profile file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    /// Name of the profile used by the last invocation
    #[serde(rename = "current-profile", skip_serializing_if = "Option::is_none")]
    pub current_profile: Option<String>,
    /// Map of profile name to profile
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

/// A named profile with connection parameters and the selected context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    /// Service host URL
    #[serde(default)]
    pub host: String,
    /// Login user name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Obfuscated password, see [`Profile::set_password`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) password: Option<String>,
    /// Selected instance id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Selected organization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Service variant the profile logged into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    /// Service API version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Time of the last successful login (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl Profile {
    fn password_seed(&self) -> String {
        format!("{}@{}", self.user.as_deref().unwrap_or(""), self.host)
    }

    /// Store (or clear) the password. Must be called after host and user are set.
    pub fn set_password(&mut self, plain: Option<&str>) {
        self.password = plain
            .filter(|p| !p.is_empty())
            .map(|p| password::obfuscate(p, &self.password_seed()));
    }

    /// Decoded password, if one is stored
    pub fn password(&self) -> Option<String> {
        self.password
            .as_deref()
            .and_then(|encoded| password::reveal(encoded, &self.password_seed()))
    }

    /// Whether a password is stored
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Forget the selected instance and org
    pub fn clear_selection(&mut self) {
        self.instance = None;
        self.org = None;
    }
}
