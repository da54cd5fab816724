//! Profile and password resolution from multiple sources

use log::debug;

use crate::config::{defaults, profile as profile_config};

use super::models::{Profile, ProfileConfig};

/// Resolve the profile name from multiple sources:
/// 1. --profile CLI flag
/// 2. VCA_PROFILE env var
/// 3. current-profile from the profile file
/// 4. "default"
pub fn resolve_profile_name(cli_profile: Option<&str>, config: &ProfileConfig) -> String {
    let env_profile = std::env::var(profile_config::ENV_VAR).ok();
    pick_profile_name(cli_profile, env_profile.as_deref(), config)
}

fn pick_profile_name(
    cli_profile: Option<&str>,
    env_profile: Option<&str>,
    config: &ProfileConfig,
) -> String {
    if let Some(name) = cli_profile.filter(|n| !n.is_empty()) {
        debug!("Using profile from CLI flag: {}", name);
        return name.to_string();
    }

    if let Some(name) = env_profile.filter(|n| !n.is_empty()) {
        debug!(
            "Using profile from {} env var: {}",
            profile_config::ENV_VAR,
            name
        );
        return name.to_string();
    }

    if let Some(name) = &config.current_profile {
        debug!("Using current profile from profile file: {}", name);
        return name.clone();
    }

    defaults::PROFILE.to_string()
}

/// Resolve the password used to re-establish a session:
/// 1. VCA_PASSWORD env var
/// 2. password stored in the profile
pub fn resolve_password(profile: &Profile) -> Option<String> {
    let env_password = std::env::var(profile_config::PASSWORD_ENV_VAR).ok();
    pick_password(env_password, profile)
}

fn pick_password(env_password: Option<String>, profile: &Profile) -> Option<String> {
    if let Some(password) = env_password.filter(|p| !p.is_empty()) {
        debug!(
            "Using password from {} environment variable",
            profile_config::PASSWORD_ENV_VAR
        );
        return Some(password);
    }
    profile.password()
}
