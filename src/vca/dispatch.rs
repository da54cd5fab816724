//! Provider selection by service type

use log::debug;

use crate::error::Result;

use super::client::VcaClient;
use super::models::{InstanceDetails, InstanceSummary, OrgResource, OrgSummary};
use super::on_demand::OnDemandProvider;
use super::provider::{Connector, Provider};
use super::standalone::StandaloneProvider;
use super::subscription::SubscriptionProvider;
use super::ServiceType;

/// HTTP provider for any of the service variants
pub enum ProviderClient {
    Vca(OnDemandProvider),
    Vchs(SubscriptionProvider),
    Standalone(StandaloneProvider),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            ProviderClient::Vca($p) => $body,
            ProviderClient::Vchs($p) => $body,
            ProviderClient::Standalone($p) => $body,
        }
    };
}

impl Provider for ProviderClient {
    fn service_type(&self) -> ServiceType {
        dispatch!(self, p => p.service_type())
    }

    fn supports_instances(&self) -> bool {
        dispatch!(self, p => p.supports_instances())
    }

    fn supports_direct_instance_login(&self) -> bool {
        dispatch!(self, p => p.supports_direct_instance_login())
    }

    fn supports_org_switch(&self) -> bool {
        dispatch!(self, p => p.supports_org_switch())
    }

    fn orgs_scoped_to_instance(&self) -> bool {
        dispatch!(self, p => p.orgs_scoped_to_instance())
    }

    fn requires_login_org(&self) -> bool {
        dispatch!(self, p => p.requires_login_org())
    }

    fn session_url(&self) -> Option<&str> {
        dispatch!(self, p => p.session_url())
    }

    async fn login(
        &mut self,
        user: &str,
        password: &str,
        org: Option<&str>,
    ) -> Result<Option<String>> {
        dispatch!(self, p => p.login(user, password, org).await)
    }

    fn logout(&mut self) {
        dispatch!(self, p => p.logout())
    }

    async fn login_to_instance(&mut self, instance: &str) -> Result<String> {
        dispatch!(self, p => p.login_to_instance(instance).await)
    }

    async fn login_to_org(&mut self, instance: &str, org: &str) -> Result<String> {
        dispatch!(self, p => p.login_to_org(instance, org).await)
    }

    async fn instances(&self) -> Result<Vec<InstanceSummary>> {
        dispatch!(self, p => p.instances().await)
    }

    async fn instance_details(&self, instance: &str) -> Result<InstanceDetails> {
        dispatch!(self, p => p.instance_details(instance).await)
    }

    async fn orgs_in_instance(&self, instance: &str) -> Result<Vec<OrgSummary>> {
        dispatch!(self, p => p.orgs_in_instance(instance).await)
    }

    async fn org_resources(&self) -> Result<Vec<OrgResource>> {
        dispatch!(self, p => p.org_resources().await)
    }
}

/// Connector building HTTP providers
pub struct HttpConnector {
    insecure: bool,
}

impl HttpConnector {
    /// `insecure` disables TLS certificate verification for every provider
    pub fn new(insecure: bool) -> Self {
        Self { insecure }
    }
}

impl Connector for HttpConnector {
    type Provider = ProviderClient;

    fn connect(&self, service_type: ServiceType, host: &str) -> Result<ProviderClient> {
        debug!(
            "Connecting to {} ({} {})",
            host,
            service_type,
            service_type.version()
        );
        let client = VcaClient::new(host, service_type.version(), self.insecure)?;
        Ok(match service_type {
            ServiceType::Vca => ProviderClient::Vca(OnDemandProvider::new(client)),
            ServiceType::Vchs => ProviderClient::Vchs(SubscriptionProvider::new(client)),
            ServiceType::Standalone => {
                ProviderClient::Standalone(StandaloneProvider::new(client))
            }
        })
    }
}
