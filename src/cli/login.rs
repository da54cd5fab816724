//! Login command arguments

use clap::{Args, ValueEnum};

use crate::config::defaults;
use crate::vca::ServiceType;

/// Service API version, one per service variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceVersion {
    /// Standalone vCloud Director
    #[value(name = "5.5")]
    V55,
    /// vCloud Air subscription
    #[value(name = "5.6")]
    V56,
    /// vCloud Air On Demand
    #[value(name = "5.7")]
    V57,
}

impl From<ServiceVersion> for ServiceType {
    fn from(version: ServiceVersion) -> Self {
        match version {
            ServiceVersion::V55 => ServiceType::Standalone,
            ServiceVersion::V56 => ServiceType::Vchs,
            ServiceVersion::V57 => ServiceType::Vca,
        }
    }
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// User name
    pub user: String,

    /// Password (prompted for when omitted)
    #[arg(short = 'p', long, env = "VCA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Do not save the password in the profile
    #[arg(short = 'd', long)]
    pub do_not_save_password: bool,

    /// Service version
    #[arg(short = 'v', long = "version", value_enum, default_value = "5.7")]
    pub service_version: ServiceVersion,

    /// Service host
    #[arg(short = 'H', long, default_value = defaults::HOST)]
    pub host: String,

    /// Instance id to select after login
    #[arg(short = 'i', long)]
    pub instance: Option<String>,

    /// Organization name (required for standalone vCloud Director)
    #[arg(short = 'o', long)]
    pub org: Option<String>,
}
