//! Standalone vCloud Director (API 5.5)

use log::debug;

use crate::config::api;
use crate::error::{Result, VcaError};

use super::client::VcaClient;
use super::models::{OrgResource, VcloudSession};
use super::provider::Provider;
use super::vcloud;
use super::ServiceType;

/// Provider for a single-org vCloud Director installation
pub struct StandaloneProvider {
    client: VcaClient,
    vcloud: Option<VcloudSession>,
}

impl StandaloneProvider {
    pub fn new(client: VcaClient) -> Self {
        Self {
            client,
            vcloud: None,
        }
    }
}

impl Provider for StandaloneProvider {
    fn service_type(&self) -> ServiceType {
        ServiceType::Standalone
    }

    fn requires_login_org(&self) -> bool {
        true
    }

    fn session_url(&self) -> Option<&str> {
        self.vcloud.as_ref().map(|s| s.org_url.as_str())
    }

    async fn login(
        &mut self,
        user: &str,
        password: &str,
        org: Option<&str>,
    ) -> Result<Option<String>> {
        let org = org.filter(|o| !o.is_empty()).ok_or_else(|| {
            VcaError::Validation(
                "Please provide a valid organization with the '--org' param".to_string(),
            )
        })?;

        let url = self.client.url(api::VCD_SESSIONS);
        debug!("Logging in '{}@{}' at: {}", user, org, url);

        let request = self
            .client
            .vcloud_post(&url)
            .basic_auth(format!("{}@{}", user, org), Some(password));
        let session = vcloud::open_session(request, user, Some(org)).await?;
        let org_name = session.org_name.clone();
        self.vcloud = Some(session);
        Ok(Some(org_name))
    }

    fn logout(&mut self) {
        self.vcloud = None;
    }

    async fn org_resources(&self) -> Result<Vec<OrgResource>> {
        let session = self.vcloud.as_ref().ok_or(VcaError::NotLoggedIn)?;
        vcloud::fetch_org_resources(&self.client, session).await
    }
}
