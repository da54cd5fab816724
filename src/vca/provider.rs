//! Provider capability interface
//!
//! Each service variant implements [`Provider`]. Capability predicates let the
//! session and command layers decide what is allowed without matching on the
//! variant; operations a variant does not offer fall back to
//! [`VcaError::Unsupported`].

use crate::error::{Result, VcaError};

use super::models::{InstanceDetails, InstanceSummary, OrgResource, OrgSummary};
use super::ServiceType;

/// Error for an operation the variant does not offer
pub fn unsupported(service_type: ServiceType, operation: &str) -> VcaError {
    VcaError::Unsupported(format!(
        "Operation '{}' not supported in this service type ({})",
        operation, service_type
    ))
}

/// One vCloud Air service variant
#[allow(async_fn_in_trait)]
pub trait Provider {
    /// Variant implemented by this provider
    fn service_type(&self) -> ServiceType;

    /// `instance` commands are available
    fn supports_instances(&self) -> bool {
        false
    }

    /// An instance can be entered directly (the org follows from it)
    fn supports_direct_instance_login(&self) -> bool {
        false
    }

    /// An org can be selected inside an instance
    fn supports_org_switch(&self) -> bool {
        false
    }

    /// Orgs are listed per instance rather than per session
    fn orgs_scoped_to_instance(&self) -> bool {
        false
    }

    /// Login itself must name the org
    fn requires_login_org(&self) -> bool {
        false
    }

    /// URL of the active org, if an org session is open
    fn session_url(&self) -> Option<&str> {
        None
    }

    /// Authenticate. Returns the org name when the login opens an org session.
    async fn login(&mut self, user: &str, password: &str, org: Option<&str>)
        -> Result<Option<String>>;

    /// Drop all tokens held by the provider
    fn logout(&mut self);

    /// Open the org session of an instance, returning the org name
    async fn login_to_instance(&mut self, _instance: &str) -> Result<String> {
        Err(unsupported(self.service_type(), "instance login"))
    }

    /// Open the session of an org inside an instance, returning the org name
    async fn login_to_org(&mut self, _instance: &str, _org: &str) -> Result<String> {
        Err(unsupported(self.service_type(), "org login"))
    }

    /// Instances visible to the user
    async fn instances(&self) -> Result<Vec<InstanceSummary>> {
        Err(unsupported(self.service_type(), "instance list"))
    }

    /// Raw documents describing an instance and its plan
    async fn instance_details(&self, _instance: &str) -> Result<InstanceDetails> {
        Err(unsupported(self.service_type(), "instance info"))
    }

    /// Orgs of an instance
    async fn orgs_in_instance(&self, _instance: &str) -> Result<Vec<OrgSummary>> {
        Err(unsupported(self.service_type(), "org list"))
    }

    /// Resources of the org the session is in
    async fn org_resources(&self) -> Result<Vec<OrgResource>>;
}

/// Creates providers for a service variant and host
pub trait Connector {
    type Provider: Provider;

    fn connect(&self, service_type: ServiceType, host: &str) -> Result<Self::Provider>;
}
