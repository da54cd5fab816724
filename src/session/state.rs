//! Session state machine

use log::debug;

use crate::error::{Result, VcaError};
use crate::profile::Profile;
use crate::vca::{unsupported, Provider, ServiceType};

/// Where the session currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    Authenticating,
    LoggedIn,
    InstanceSelected {
        instance: String,
        org: Option<String>,
    },
    OrgSelected {
        instance: Option<String>,
        org: String,
    },
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        !matches!(self, SessionState::LoggedOut | SessionState::Authenticating)
    }

    pub fn instance(&self) -> Option<&str> {
        match self {
            SessionState::InstanceSelected { instance, .. } => Some(instance),
            SessionState::OrgSelected { instance, .. } => instance.as_deref(),
            _ => None,
        }
    }

    pub fn org(&self) -> Option<&str> {
        match self {
            SessionState::InstanceSelected { org, .. } => org.as_deref(),
            SessionState::OrgSelected { org, .. } => Some(org),
            _ => None,
        }
    }
}

/// Fail with a validation error naming `param` when `value` is empty
pub fn require_selector(value: &str, what: &str, param: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VcaError::Validation(format!(
            "Please provide a valid {} with the '--{}' param",
            what, param
        )));
    }
    Ok(())
}

/// Parameters of a login
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub host: String,
    pub user: String,
    pub password: String,
    pub org: Option<String>,
    pub save_password: bool,
}

/// Authenticated (or not) connection state of one invocation
pub struct Session<P> {
    name: String,
    profile: Profile,
    provider: Option<P>,
    state: SessionState,
}

impl<P: Provider> Session<P> {
    /// Start logged out with the stored profile and, if known, its provider
    pub fn new(name: &str, profile: Profile, provider: Option<P>) -> Self {
        Self {
            name: name.to_string(),
            profile,
            provider,
            state: SessionState::LoggedOut,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Service type of the provider, or of the profile when no provider is attached
    pub fn service_type(&self) -> Option<ServiceType> {
        self.provider
            .as_ref()
            .map(|p| p.service_type())
            .or(self.profile.service_type)
    }

    /// Provider of a live session
    pub fn connected(&self) -> Result<&P> {
        if !self.state.is_logged_in() {
            return Err(VcaError::NotLoggedIn);
        }
        self.provider.as_ref().ok_or(VcaError::NotLoggedIn)
    }

    /// Authenticate with a fresh provider.
    ///
    /// On failure the session is left logged out. On success the profile
    /// holds the new host, user and service type; a stored password is
    /// replaced (or dropped when `save_password` is off) and the previous
    /// instance and org selection is cleared.
    pub async fn login(&mut self, mut provider: P, request: &LoginRequest) -> Result<()> {
        self.logout();

        let org = request.org.as_deref().filter(|o| !o.is_empty());
        if provider.requires_login_org() && org.is_none() {
            return Err(VcaError::Validation(
                "Please provide a valid organization with the '--org' param".to_string(),
            ));
        }

        self.state = SessionState::Authenticating;
        let session_org = match provider
            .login(&request.user, &request.password, org)
            .await
        {
            Ok(session_org) => session_org,
            Err(e) => {
                self.state = SessionState::LoggedOut;
                return Err(match e {
                    VcaError::AuthenticationFailure(_) | VcaError::Validation(_) => e,
                    other => VcaError::AuthenticationFailure(other.to_string()),
                });
            }
        };

        let service_type = provider.service_type();
        self.profile.host = request.host.clone();
        self.profile.user = Some(request.user.clone());
        self.profile.service_type = Some(service_type);
        self.profile.version = Some(service_type.version().to_string());
        self.profile.set_password(if request.save_password {
            Some(request.password.as_str())
        } else {
            None
        });
        self.profile.clear_selection();
        self.profile.org = session_org.clone();
        self.profile.last_login = Some(chrono::Utc::now().to_rfc3339());

        self.state = match session_org {
            Some(org) => SessionState::OrgSelected {
                instance: None,
                org,
            },
            None => SessionState::LoggedIn,
        };
        self.provider = Some(provider);
        debug!("Profile '{}' logged in as {:?}", self.name, self.state);
        Ok(())
    }

    /// Drop the session and forget the credentials and selection of the
    /// profile. Never fails; no remote teardown is attempted.
    pub fn logout(&mut self) {
        if let Some(provider) = self.provider.as_mut() {
            provider.logout();
        }
        self.profile.set_password(None);
        self.profile.clear_selection();
        self.profile.service_type = None;
        self.state = SessionState::LoggedOut;
    }

    /// Re-establish the session from the stored profile, including its
    /// instance and org selection. Any failure reports `NotLoggedIn`.
    pub async fn reauthenticate(&mut self, password: Option<String>) -> Result<()> {
        if self.profile.service_type.is_none() {
            debug!("Profile '{}' has never logged in", self.name);
            return Err(VcaError::NotLoggedIn);
        }
        let user = self.profile.user.clone().ok_or(VcaError::NotLoggedIn)?;
        let password = password.ok_or(VcaError::NotLoggedIn)?;
        let provider = self.provider.as_mut().ok_or(VcaError::NotLoggedIn)?;

        self.state = SessionState::Authenticating;
        let login_org = if provider.requires_login_org() {
            self.profile.org.as_deref()
        } else {
            None
        };
        let session_org = match provider.login(&user, &password, login_org).await {
            Ok(org) => org,
            Err(e) => {
                debug!("Re-login of profile '{}' failed: {}", self.name, e);
                self.state = SessionState::LoggedOut;
                return Err(VcaError::NotLoggedIn);
            }
        };
        self.state = match session_org {
            Some(org) => SessionState::OrgSelected {
                instance: None,
                org,
            },
            None => SessionState::LoggedIn,
        };

        let Some(instance) = self.profile.instance.clone() else {
            return Ok(());
        };

        if provider.supports_direct_instance_login() {
            match provider.login_to_instance(&instance).await {
                Ok(org) => {
                    self.state = SessionState::InstanceSelected {
                        instance,
                        org: Some(org),
                    };
                }
                Err(e) => {
                    debug!("Re-entering instance '{}' failed: {}", instance, e);
                    provider.logout();
                    self.state = SessionState::LoggedOut;
                    return Err(VcaError::NotLoggedIn);
                }
            }
        } else if provider.supports_org_switch() {
            if let Some(org) = self.profile.org.clone() {
                match provider.login_to_org(&instance, &org).await {
                    Ok(org) => {
                        self.state = SessionState::OrgSelected {
                            instance: Some(instance),
                            org,
                        };
                    }
                    Err(e) => {
                        debug!("Re-entering '{}':'{}' failed: {}", instance, org, e);
                        provider.logout();
                        self.state = SessionState::LoggedOut;
                        return Err(VcaError::NotLoggedIn);
                    }
                }
            }
        }
        Ok(())
    }

    /// Enter an instance directly. On failure state and profile are unchanged.
    pub async fn select_instance(&mut self, instance: &str) -> Result<String> {
        if let Some(provider) = self.provider.as_ref() {
            if !provider.supports_direct_instance_login() {
                return Err(unsupported(provider.service_type(), "instance use"));
            }
        }
        require_selector(instance, "instance", "instance")?;
        if !self.state.is_logged_in() {
            return Err(VcaError::NotLoggedIn);
        }
        let provider = self.provider.as_mut().ok_or(VcaError::NotLoggedIn)?;

        let org = provider.login_to_instance(instance).await?;
        self.profile.instance = Some(instance.to_string());
        self.profile.org = Some(org.clone());
        self.state = SessionState::InstanceSelected {
            instance: instance.to_string(),
            org: Some(org.clone()),
        };
        Ok(org)
    }

    /// Select an org inside an instance. Empty selectors fail before any
    /// remote call; on failure state and profile are unchanged.
    pub async fn select_org(&mut self, instance: &str, org: &str) -> Result<String> {
        if let Some(provider) = self.provider.as_ref() {
            if !provider.supports_org_switch() {
                return Err(unsupported(provider.service_type(), "org use"));
            }
        }
        require_selector(instance, "instance", "instance")?;
        require_selector(org, "organization", "org")?;
        if !self.state.is_logged_in() {
            return Err(VcaError::NotLoggedIn);
        }
        let provider = self.provider.as_mut().ok_or(VcaError::NotLoggedIn)?;

        let org = provider.login_to_org(instance, org).await?;
        self.profile.instance = Some(instance.to_string());
        self.profile.org = Some(org.clone());
        self.state = SessionState::OrgSelected {
            instance: Some(instance.to_string()),
            org: org.clone(),
        };
        Ok(org)
    }
}
