//! Profile file I/O

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::{Result, VcaError};

use super::models::{Profile, ProfileConfig};

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    }
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(path),
    }
}

/// Handles reading and writing the profile file
///
/// There is no locking: two invocations writing the same file race and the
/// last writer wins.
pub struct ProfileStore {
    path: PathBuf,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore {
    /// Create a store using the default profile file (~/.vcarc)
    pub fn new() -> Self {
        Self {
            path: expand_path(defaults::PROFILE_FILE),
        }
    }

    /// Create a store with a custom profile file
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the profile file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile file.
    ///
    /// A missing, unreadable or corrupt file yields an empty profile set.
    pub fn load(&self) -> ProfileConfig {
        if !self.path.exists() {
            debug!("Profile file {} does not exist", self.path.display());
            return ProfileConfig::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Failed to read profile file {}: {}",
                    self.path.display(),
                    e
                );
                return ProfileConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring corrupt profile file {}: {}",
                    self.path.display(),
                    e
                );
                ProfileConfig::default()
            }
        }
    }

    /// Save the profile file.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    pub fn save(&self, config: &ProfileConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    VcaError::Config(format!(
                        "Failed to create profile directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| VcaError::Config(format!("Failed to serialize profiles: {}", e)))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);

        fs::write(&tmp_path, &json).map_err(|e| {
            VcaError::Config(format!(
                "Failed to write temp profile file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // Holds an obfuscated password, keep it private
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| {
                VcaError::Config(format!("Failed to set permissions on profile file: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            VcaError::Config(format!(
                "Failed to rename temp profile file to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Saved profile file {}", self.path.display());
        Ok(())
    }

    /// Load a single profile by name
    pub fn load_profile(&self, name: &str) -> Option<Profile> {
        self.load().profiles.get(name).cloned()
    }

    /// Write a profile back and mark it as the current one
    pub fn save_profile(&self, name: &str, profile: &Profile) -> Result<()> {
        let mut config = self.load();
        config.profiles.insert(name.to_string(), profile.clone());
        config.current_profile = Some(name.to_string());
        self.save(&config)
    }

    /// Names of all stored profiles, sorted
    pub fn list_profiles(&self) -> Vec<String> {
        self.load().profiles.keys().cloned().collect()
    }
}
