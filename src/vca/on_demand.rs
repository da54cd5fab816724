//! vCloud Air On Demand (API 5.7)

use log::debug;

use crate::config::api;
use crate::error::{Result, VcaError};

use super::client::VcaClient;
use super::models::{
    Instance, InstanceDetails, InstanceSummary, InstancesResponse, OrgResource, Plan,
    PlansResponse, ServiceGroup, ServiceGroupsResponse, VcloudSession,
};
use super::provider::Provider;
use super::vcloud;
use super::ServiceType;

/// Join instances with their plan and service group names
pub fn summarize_instances(
    instances: &[Instance],
    plans: &[Plan],
    service_groups: &[ServiceGroup],
) -> Vec<InstanceSummary> {
    instances
        .iter()
        .map(|instance| InstanceSummary {
            id: instance.id.clone(),
            region: instance.short_region().to_string(),
            plan: plans
                .iter()
                .find(|p| p.id == instance.plan_id)
                .map(|p| p.name.clone()),
            service_group: service_groups
                .iter()
                .find(|sg| sg.id == instance.service_group_id)
                .map(|sg| sg.display_name.clone()),
            service_type: None,
        })
        .collect()
}

/// Provider for vCloud Air On Demand accounts
pub struct OnDemandProvider {
    client: VcaClient,
    token: Option<String>,
    vcloud: Option<VcloudSession>,
}

impl OnDemandProvider {
    pub fn new(client: VcaClient) -> Self {
        Self {
            client,
            token: None,
            vcloud: None,
        }
    }

    fn authorization(&self) -> Result<String> {
        self.token
            .as_deref()
            .map(|t| format!("Bearer {}", t))
            .ok_or(VcaError::NotLoggedIn)
    }

    async fn get_instances(&self) -> Result<Vec<Instance>> {
        let url = self.client.url(api::VCA_INSTANCES);
        debug!("Fetching instances from: {}", url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.authorization()?)
            .send()
            .await?;
        let body: InstancesResponse = self.client.parse_api_response(response, "instances").await?;
        Ok(body.instances)
    }

    async fn get_plans(&self) -> Result<Vec<Plan>> {
        let url = self.client.url(api::VCA_PLANS);
        debug!("Fetching plans from: {}", url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.authorization()?)
            .send()
            .await?;
        let body: PlansResponse = self.client.parse_api_response(response, "plans").await?;
        Ok(body.plans)
    }

    async fn get_service_groups(&self) -> Result<Vec<ServiceGroup>> {
        let url = self.client.url(api::VCA_SERVICE_GROUPS);
        debug!("Fetching service groups from: {}", url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.authorization()?)
            .send()
            .await?;
        let body: ServiceGroupsResponse = self
            .client
            .parse_api_response(response, "service groups")
            .await?;
        Ok(body.service_group)
    }

    async fn get_instance_raw(&self, instance: &str) -> Result<Option<serde_json::Value>> {
        let url = format!(
            "{}/{}",
            self.client.url(api::VCA_INSTANCES),
            urlencoding::encode(instance)
        );
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.authorization()?);
        self.client
            .fetch_raw(request, &format!("instance '{}'", instance))
            .await
    }

    async fn get_plan_raw(&self, plan_id: &str) -> Result<Option<serde_json::Value>> {
        let url = format!(
            "{}/{}",
            self.client.url(api::VCA_PLANS),
            urlencoding::encode(plan_id)
        );
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.authorization()?);
        self.client
            .fetch_raw(request, &format!("plan '{}'", plan_id))
            .await
    }

    async fn get_instance(&self, instance: &str) -> Result<(Instance, serde_json::Value)> {
        let raw = self
            .get_instance_raw(instance)
            .await?
            .ok_or_else(|| VcaError::NotFound(format!("Instance not found '{}'", instance)))?;
        let parsed: Instance = serde_json::from_value(raw.clone())?;
        Ok((parsed, raw))
    }
}

impl Provider for OnDemandProvider {
    fn service_type(&self) -> ServiceType {
        ServiceType::Vca
    }

    fn supports_instances(&self) -> bool {
        true
    }

    fn supports_direct_instance_login(&self) -> bool {
        true
    }

    fn session_url(&self) -> Option<&str> {
        self.vcloud.as_ref().map(|s| s.org_url.as_str())
    }

    async fn login(
        &mut self,
        user: &str,
        password: &str,
        _org: Option<&str>,
    ) -> Result<Option<String>> {
        let url = self.client.url(api::VCA_LOGIN);
        debug!("Logging in '{}' at: {}", user, url);

        let response = self
            .client
            .post(&url)
            .basic_auth(user, Some(password))
            .send()
            .await?;
        VcaClient::check_login_status(&response, user)?;

        let token = VcaClient::header_value(&response, api::VCA_AUTH_HEADER).ok_or_else(|| {
            VcaError::AuthenticationFailure(format!(
                "no {} header in login response",
                api::VCA_AUTH_HEADER
            ))
        })?;
        self.token = Some(token);
        self.vcloud = None;
        Ok(None)
    }

    fn logout(&mut self) {
        self.token = None;
        self.vcloud = None;
    }

    async fn login_to_instance(&mut self, instance: &str) -> Result<String> {
        let (parsed, _) = self.get_instance(instance).await?;
        let attributes = parsed.attributes().ok_or_else(|| {
            VcaError::Json(format!(
                "Instance '{}' carries no session endpoint",
                instance
            ))
        })?;

        debug!("Opening SSO session for instance '{}'", instance);
        let request = self
            .client
            .vcloud_post(&attributes.session_uri)
            .header("Authorization", self.authorization()?);
        let session =
            vcloud::open_session(request, instance, attributes.org_name.as_deref()).await?;
        let org = session.org_name.clone();
        self.vcloud = Some(session);
        Ok(org)
    }

    async fn instances(&self) -> Result<Vec<InstanceSummary>> {
        let (instances, plans, service_groups) = futures::try_join!(
            self.get_instances(),
            self.get_plans(),
            self.get_service_groups()
        )?;
        Ok(summarize_instances(&instances, &plans, &service_groups))
    }

    async fn instance_details(&self, instance: &str) -> Result<InstanceDetails> {
        let (parsed, raw) = self.get_instance(instance).await?;
        let plan = if parsed.plan_id.is_empty() {
            None
        } else {
            self.get_plan_raw(&parsed.plan_id).await?
        };
        Ok(InstanceDetails {
            instance: raw,
            plan,
        })
    }

    async fn org_resources(&self) -> Result<Vec<OrgResource>> {
        let session = self.vcloud.as_ref().ok_or(VcaError::NotLoggedIn)?;
        vcloud::fetch_org_resources(&self.client, session).await
    }
}
