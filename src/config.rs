/// Default values for CLI
pub mod defaults {
    /// Default vCloud Air host
    pub const HOST: &str = "https://vca.vmware.com";

    /// Profile used when nothing else selects one
    pub const PROFILE: &str = "default";

    /// Default profile file (relative to HOME)
    pub const PROFILE_FILE: &str = "~/.vcarc";

    /// Default service version (vCloud Air On Demand)
    pub const SERVICE_VERSION: &str = "5.7";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Log level enabled by --debug
    pub const DEBUG_LOG_LEVEL: &str = "debug";
}

/// Configuration constants for profiles
pub mod profile {
    /// Environment variable selecting the profile when --profile is absent
    pub const ENV_VAR: &str = "VCA_PROFILE";

    /// Environment variable overriding the stored password on re-login
    pub const PASSWORD_ENV_VAR: &str = "VCA_PASSWORD";
}

/// HTTP client settings
pub mod http {
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}

/// REST paths and headers of the vCloud Air service variants
pub mod api {
    /// vCloud Air On Demand (5.7) login
    pub const VCA_LOGIN: &str = "/api/iam/login";

    /// vCloud Air On Demand instances
    pub const VCA_INSTANCES: &str = "/api/sc/instances";

    /// vCloud Air On Demand plans
    pub const VCA_PLANS: &str = "/api/sc/plans";

    /// vCloud Air On Demand service groups
    pub const VCA_SERVICE_GROUPS: &str = "/api/billing/service-groups";

    /// Token header returned by the On Demand login
    pub const VCA_AUTH_HEADER: &str = "vchs-authorization";

    /// vCloud Air subscription (5.6) login
    pub const VCHS_SESSIONS: &str = "/api/vchs/sessions";

    /// vCloud Air subscription services
    pub const VCHS_SERVICES: &str = "/api/vchs/services";

    /// vCloud Air subscription compute services (followed by service id)
    pub const VCHS_COMPUTE: &str = "/api/vchs/compute";

    /// Token header returned by the subscription login
    pub const VCHS_AUTH_HEADER: &str = "x-vchs-authorization";

    /// Standalone vCloud Director (5.5) login
    pub const VCD_SESSIONS: &str = "/api/sessions";

    /// Token header of a vCloud Director session
    pub const VCLOUD_AUTH_HEADER: &str = "x-vcloud-authorization";

    /// Link type marking the vcloudsession endpoint of a VDC reference
    pub const VCLOUD_SESSION_LINK: &str = "vcloudsession";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host_has_scheme() {
        assert!(defaults::HOST.starts_with("https://"));
    }

    #[test]
    fn test_api_paths_are_absolute() {
        for path in [
            api::VCA_LOGIN,
            api::VCA_INSTANCES,
            api::VCA_PLANS,
            api::VCA_SERVICE_GROUPS,
            api::VCHS_SESSIONS,
            api::VCHS_SERVICES,
            api::VCHS_COMPUTE,
            api::VCD_SESSIONS,
        ] {
            assert!(path.starts_with('/'), "{} is not absolute", path);
        }
    }

    #[test]
    fn test_profile_env_vars() {
        assert_eq!(profile::ENV_VAR, "VCA_PROFILE");
        assert_eq!(profile::PASSWORD_ENV_VAR, "VCA_PASSWORD");
    }
}
