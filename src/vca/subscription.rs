//! vCloud Air subscription service, formerly vCHS (API 5.6)

use log::debug;

use crate::config::api;
use crate::error::{Result, VcaError};

use super::client::VcaClient;
use super::models::{
    ComputeResponse, InstanceSummary, OrgResource, OrgSummary, ServicesResponse,
    VcloudSession, VcloudSessionResponse, VdcRef,
};
use super::provider::Provider;
use super::vcloud;
use super::ServiceType;

/// Provider for vCloud Air subscription accounts
pub struct SubscriptionProvider {
    client: VcaClient,
    token: Option<String>,
    vcloud: Option<VcloudSession>,
}

impl SubscriptionProvider {
    pub fn new(client: VcaClient) -> Self {
        Self {
            client,
            token: None,
            vcloud: None,
        }
    }

    fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(VcaError::NotLoggedIn)
    }

    async fn get_vdc_refs(&self, instance: &str) -> Result<Vec<VdcRef>> {
        let url = format!(
            "{}/{}",
            self.client.url(api::VCHS_COMPUTE),
            urlencoding::encode(instance)
        );
        debug!("Fetching VDC references from: {}", url);
        let request = self.client.get(&url).header(api::VCHS_AUTH_HEADER, self.token()?);
        let raw = self
            .client
            .fetch_raw(request, &format!("instance '{}'", instance))
            .await?
            .ok_or_else(|| VcaError::NotFound(format!("Instance not found '{}'", instance)))?;
        let compute: ComputeResponse = serde_json::from_value(raw)?;
        Ok(compute.vdc_ref)
    }
}

/// Session built from a vcloudsession answer
fn session_from_response(org: &str, response: VcloudSessionResponse) -> Result<VcloudSession> {
    let vdc_link = response
        .vdc_link
        .into_iter()
        .next()
        .ok_or_else(|| VcaError::Json(format!("No VDC link in session for org '{}'", org)))?;
    let org_url = response
        .link
        .iter()
        .find(|l| l.link_type.contains(".org+"))
        .map(|l| l.href.clone())
        .unwrap_or(vdc_link.href);

    Ok(VcloudSession {
        token: vdc_link.authorization_token,
        org_name: org.to_string(),
        org_url,
    })
}

impl Provider for SubscriptionProvider {
    fn service_type(&self) -> ServiceType {
        ServiceType::Vchs
    }

    fn supports_instances(&self) -> bool {
        true
    }

    fn supports_org_switch(&self) -> bool {
        true
    }

    fn orgs_scoped_to_instance(&self) -> bool {
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
        let url = self.client.url(api::VCHS_SESSIONS);
        debug!("Logging in '{}' at: {}", user, url);

        let response = self
            .client
            .post(&url)
            .basic_auth(user, Some(password))
            .send()
            .await?;
        VcaClient::check_login_status(&response, user)?;

        let token = VcaClient::header_value(&response, api::VCHS_AUTH_HEADER).ok_or_else(|| {
            VcaError::AuthenticationFailure(format!(
                "no {} header in login response",
                api::VCHS_AUTH_HEADER
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

    async fn login_to_org(&mut self, instance: &str, org: &str) -> Result<String> {
        let vdc_refs = self.get_vdc_refs(instance).await?;
        let vdc = vdc_refs.iter().find(|v| v.name == org).ok_or_else(|| {
            VcaError::NotFound(format!(
                "Org not found '{}' in instance '{}'",
                org, instance
            ))
        })?;
        let link = vdc
            .link
            .iter()
            .find(|l| l.link_type.contains(api::VCLOUD_SESSION_LINK))
            .ok_or_else(|| {
                VcaError::Json(format!("Org '{}' offers no vcloudsession link", org))
            })?;

        debug!("Opening vcloudsession for '{}':'{}'", instance, org);
        let response = self
            .client
            .post(&link.href)
            .header(api::VCHS_AUTH_HEADER, self.token()?)
            .send()
            .await?;
        let body: VcloudSessionResponse = self
            .client
            .parse_api_response(response, &format!("session for org '{}'", org))
            .await?;

        let session = session_from_response(org, body)?;
        self.vcloud = Some(session);
        Ok(org.to_string())
    }

    async fn instances(&self) -> Result<Vec<InstanceSummary>> {
        let url = self.client.url(api::VCHS_SERVICES);
        debug!("Fetching services from: {}", url);
        let response = self
            .client
            .get(&url)
            .header(api::VCHS_AUTH_HEADER, self.token()?)
            .send()
            .await?;
        let body: ServicesResponse = self.client.parse_api_response(response, "services").await?;

        Ok(body
            .service
            .into_iter()
            .map(|s| InstanceSummary {
                id: s.service_id,
                region: s.region,
                plan: None,
                service_group: None,
                service_type: Some(s.service_type),
            })
            .collect())
    }

    async fn orgs_in_instance(&self, instance: &str) -> Result<Vec<OrgSummary>> {
        Ok(self
            .get_vdc_refs(instance)
            .await?
            .into_iter()
            .map(|v| OrgSummary {
                name: v.name,
                status: v.status,
            })
            .collect())
    }

    async fn org_resources(&self) -> Result<Vec<OrgResource>> {
        let session = self.vcloud.as_ref().ok_or(VcaError::NotLoggedIn)?;
        vcloud::fetch_org_resources(&self.client, session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(base_url: &str) -> SubscriptionProvider {
        SubscriptionProvider::new(VcaClient::new(base_url, "5.6", false).unwrap())
    }

    async fn logged_in_provider(mock_server: &MockServer) -> SubscriptionProvider {
        Mock::given(method("POST"))
            .and(path(api::VCHS_SESSIONS))
            .respond_with(
                ResponseTemplate::new(201).insert_header(api::VCHS_AUTH_HEADER, "vchs-token"),
            )
            .mount(mock_server)
            .await;
        let mut provider = create_test_provider(&mock_server.uri());
        provider.login("bob", "pw", None).await.unwrap();
        provider
    }

    async fn mount_compute(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/vchs/compute/M123"))
            .and(header(api::VCHS_AUTH_HEADER, "vchs-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "vdcRef": [
                    {
                        "name": "VDC-B",
                        "status": "Active",
                        "link": [{
                            "rel": "down",
                            "type": "application/xml;class=vnd.vmware.vchs.vcloudsession",
                            "href": format!("{}/api/vchs/compute/M123/vdc/B/vcloudsession", mock_server.uri())
                        }]
                    },
                    {"name": "VDC-A", "status": "Provisioning", "link": []}
                ]
            })))
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_instances_from_services() {
        let mock_server = MockServer::start().await;
        let provider = logged_in_provider(&mock_server).await;
        Mock::given(method("GET"))
            .and(path(api::VCHS_SERVICES))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "service": [{
                    "serviceId": "M123",
                    "region": "us-california-1",
                    "serviceType": "compute:dedicatedcloud"
                }]
            })))
            .mount(&mock_server)
            .await;

        let rows = provider.instances().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "M123");
        assert_eq!(rows[0].service_type.as_deref(), Some("compute:dedicatedcloud"));
        assert!(rows[0].plan.is_none());
    }

    #[tokio::test]
    async fn test_orgs_in_instance() {
        let mock_server = MockServer::start().await;
        let provider = logged_in_provider(&mock_server).await;
        mount_compute(&mock_server).await;

        let orgs = provider.orgs_in_instance("M123").await.unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[1].name, "VDC-A");
        assert_eq!(orgs[1].status, "Provisioning");
    }

    #[tokio::test]
    async fn test_login_to_org_opens_session() {
        let mock_server = MockServer::start().await;
        let mut provider = logged_in_provider(&mock_server).await;
        mount_compute(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/api/vchs/compute/M123/vdc/B/vcloudsession"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "vdcLink": [{
                    "name": "VDC-B",
                    "href": "https://vcd/api/vdc/b",
                    "authorizationToken": "vcd-token",
                    "authorizationHeader": "x-vcloud-authorization"
                }],
                "link": [{
                    "rel": "down",
                    "type": "application/vnd.vmware.vcloud.org+json",
                    "href": "https://vcd/api/org/b"
                }]
            })))
            .mount(&mock_server)
            .await;

        let org = provider.login_to_org("M123", "VDC-B").await.unwrap();
        assert_eq!(org, "VDC-B");
        assert_eq!(provider.session_url(), Some("https://vcd/api/org/b"));
    }

    #[tokio::test]
    async fn test_login_to_missing_org() {
        let mock_server = MockServer::start().await;
        let mut provider = logged_in_provider(&mock_server).await;
        mount_compute(&mock_server).await;

        let result = provider.login_to_org("M123", "VDC-Z").await;
        assert!(matches!(result, Err(VcaError::NotFound(_))));
        assert!(provider.session_url().is_none());
    }

    #[test]
    fn test_session_from_response_falls_back_to_vdc_href() {
        let response: VcloudSessionResponse = serde_json::from_value(serde_json::json!({
            "vdcLink": [{
                "href": "https://vcd/api/vdc/b",
                "authorizationToken": "t"
            }]
        }))
        .unwrap();
        let session = session_from_response("VDC-B", response).unwrap();
        assert_eq!(session.org_url, "https://vcd/api/vdc/b");
        assert_eq!(session.token, "t");
    }

    #[tokio::test]
    async fn test_instance_login_is_unsupported() {
        let mut provider = create_test_provider("http://localhost");
        let result = provider.login_to_instance("M123").await;
        assert!(matches!(result, Err(VcaError::Unsupported(_))));
    }

    #[test]
    fn test_capabilities() {
        let provider = create_test_provider("http://localhost");
        assert_eq!(provider.service_type(), ServiceType::Vchs);
        assert!(provider.supports_instances());
        assert!(!provider.supports_direct_instance_login());
        assert!(provider.supports_org_switch());
        assert!(provider.orgs_scoped_to_instance());
    }
}
