//! In-memory provider for session and command tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, VcaError};

use super::models::{InstanceDetails, InstanceSummary, OrgResource, OrgSummary};
use super::provider::{Connector, Provider};
use super::ServiceType;

/// Shared state of the fake service; records every remote call
pub(crate) struct FakeBackend {
    pub password: String,
    pub instances: Vec<InstanceSummary>,
    pub orgs: Vec<OrgSummary>,
    pub resources: Vec<OrgResource>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new(password: &str) -> Rc<Self> {
        Rc::new(Self {
            password: password.to_string(),
            instances: vec![
                summary("i-2", "Zeta group"),
                summary("i-1", "Alpha group"),
                summary("i-3", "Beta group"),
            ],
            orgs: vec![
                OrgSummary {
                    name: "VDC-B".to_string(),
                    status: "Active".to_string(),
                },
                OrgSummary {
                    name: "VDC-A".to_string(),
                    status: "Active".to_string(),
                },
            ],
            resources: vec![OrgResource {
                kind: "vdc".to_string(),
                name: "vdc-1".to_string(),
            }],
            calls: RefCell::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

fn summary(id: &str, group: &str) -> InstanceSummary {
    InstanceSummary {
        id: id.to_string(),
        region: "us-virginia-1-4".to_string(),
        plan: Some("OnDemand".to_string()),
        service_group: Some(group.to_string()),
        service_type: None,
    }
}

/// Fake provider mirroring the capabilities of the real variants
pub(crate) struct FakeProvider {
    service_type: ServiceType,
    backend: Rc<FakeBackend>,
    logged_in: bool,
}

impl FakeProvider {
    pub fn new(service_type: ServiceType, backend: Rc<FakeBackend>) -> Self {
        Self {
            service_type,
            backend,
            logged_in: false,
        }
    }

    fn require_login(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(VcaError::NotLoggedIn)
        }
    }
}

impl Provider for FakeProvider {
    fn service_type(&self) -> ServiceType {
        self.service_type
    }

    fn supports_instances(&self) -> bool {
        self.service_type != ServiceType::Standalone
    }

    fn supports_direct_instance_login(&self) -> bool {
        self.service_type == ServiceType::Vca
    }

    fn supports_org_switch(&self) -> bool {
        self.service_type == ServiceType::Vchs
    }

    fn orgs_scoped_to_instance(&self) -> bool {
        self.service_type == ServiceType::Vchs
    }

    fn requires_login_org(&self) -> bool {
        self.service_type == ServiceType::Standalone
    }

    async fn login(
        &mut self,
        user: &str,
        password: &str,
        org: Option<&str>,
    ) -> Result<Option<String>> {
        self.backend.record(&format!("login:{}", user));
        if password != self.backend.password {
            return Err(VcaError::AuthenticationFailure(
                "invalid credentials".to_string(),
            ));
        }
        self.logged_in = true;
        Ok(match self.service_type {
            ServiceType::Standalone => org.map(|o| o.to_string()),
            _ => None,
        })
    }

    fn logout(&mut self) {
        self.logged_in = false;
    }

    async fn login_to_instance(&mut self, instance: &str) -> Result<String> {
        self.backend.record(&format!("login_to_instance:{}", instance));
        self.require_login()?;
        if self.backend.instances.iter().any(|i| i.id == instance) {
            Ok(format!("{}-org", instance))
        } else {
            Err(VcaError::NotFound(format!("Instance not found '{}'", instance)))
        }
    }

    async fn login_to_org(&mut self, instance: &str, org: &str) -> Result<String> {
        self.backend
            .record(&format!("login_to_org:{}:{}", instance, org));
        self.require_login()?;
        if self.backend.orgs.iter().any(|o| o.name == org) {
            Ok(org.to_string())
        } else {
            Err(VcaError::NotFound(format!("Org not found '{}'", org)))
        }
    }

    async fn instances(&self) -> Result<Vec<InstanceSummary>> {
        self.backend.record("instances");
        self.require_login()?;
        Ok(self.backend.instances.clone())
    }

    async fn instance_details(&self, instance: &str) -> Result<InstanceDetails> {
        self.backend.record(&format!("instance_details:{}", instance));
        self.require_login()?;
        Ok(InstanceDetails {
            instance: serde_json::json!({"id": instance}),
            plan: Some(serde_json::json!({"name": "OnDemand"})),
        })
    }

    async fn orgs_in_instance(&self, instance: &str) -> Result<Vec<OrgSummary>> {
        self.backend.record(&format!("orgs_in_instance:{}", instance));
        self.require_login()?;
        Ok(self.backend.orgs.clone())
    }

    async fn org_resources(&self) -> Result<Vec<OrgResource>> {
        self.backend.record("org_resources");
        self.require_login()?;
        Ok(self.backend.resources.clone())
    }
}

/// Connector handing out fake providers bound to one backend
pub(crate) struct FakeConnector {
    pub backend: Rc<FakeBackend>,
}

impl FakeConnector {
    pub fn new(backend: Rc<FakeBackend>) -> Self {
        Self { backend }
    }
}

impl Connector for FakeConnector {
    type Provider = FakeProvider;

    fn connect(&self, service_type: ServiceType, _host: &str) -> Result<FakeProvider> {
        Ok(FakeProvider::new(service_type, Rc::clone(&self.backend)))
    }
}
