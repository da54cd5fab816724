//! vCloud Director session handling shared by all variants

use log::debug;
use reqwest::RequestBuilder;

use crate::config::api;
use crate::error::{Result, VcaError};

use super::client::VcaClient;
use super::models::{Link, OrgDocument, OrgResource, SessionDocument, VcloudSession};

/// Find the org link of a session document
fn org_link(links: &[Link]) -> Option<&Link> {
    links.iter().find(|l| l.link_type.contains(".org+"))
}

/// Map a link media type to a resource kind shown by `org info`
fn resource_kind(link_type: &str) -> Option<&'static str> {
    if link_type.contains(".vdc+") {
        Some("vdc")
    } else if link_type.contains(".catalog+") {
        Some("catalog")
    } else if link_type.contains(".orgNetwork+") {
        Some("network")
    } else {
        None
    }
}

/// Build a session from a session document and its token
pub(crate) fn session_from_document(
    token: String,
    document: SessionDocument,
    fallback_org: Option<&str>,
) -> Result<VcloudSession> {
    let link = org_link(&document.link);
    let org_name = document
        .org
        .clone()
        .or_else(|| link.and_then(|l| l.name.clone()))
        .or_else(|| fallback_org.map(|o| o.to_string()))
        .ok_or_else(|| VcaError::Json("Session document names no organization".to_string()))?;
    let org_url = link
        .map(|l| l.href.clone())
        .ok_or_else(|| VcaError::Json("Session document has no organization link".to_string()))?;

    Ok(VcloudSession {
        token,
        org_name,
        org_url,
    })
}

/// Send a session request and turn the answer into a [`VcloudSession`]
pub(crate) async fn open_session(
    request: RequestBuilder,
    user: &str,
    fallback_org: Option<&str>,
) -> Result<VcloudSession> {
    let response = request.send().await?;
    VcaClient::check_login_status(&response, user)?;

    let token = VcaClient::header_value(&response, api::VCLOUD_AUTH_HEADER).ok_or_else(|| {
        VcaError::AuthenticationFailure(format!(
            "no {} header in session response",
            api::VCLOUD_AUTH_HEADER
        ))
    })?;
    let document: SessionDocument = response.json().await?;
    let session = session_from_document(token, document, fallback_org)?;
    debug!(
        "Opened vCloud session for org '{}' at {}",
        session.org_name, session.org_url
    );
    Ok(session)
}

/// Resources linked from the org of a session, sorted by kind and name
pub(crate) async fn fetch_org_resources(
    client: &VcaClient,
    session: &VcloudSession,
) -> Result<Vec<OrgResource>> {
    debug!("Fetching org document from: {}", session.org_url);
    let response = client
        .vcloud_get(&session.org_url)
        .header(api::VCLOUD_AUTH_HEADER, &session.token)
        .send()
        .await?;
    let org: OrgDocument = client
        .parse_api_response(response, &format!("org '{}'", session.org_name))
        .await?;

    Ok(resources_from_links(&org.link))
}

fn resources_from_links(links: &[Link]) -> Vec<OrgResource> {
    let mut resources: Vec<OrgResource> = links
        .iter()
        .filter_map(|link| {
            let kind = resource_kind(&link.link_type)?;
            Some(OrgResource {
                kind: kind.to_string(),
                name: link.name.clone().unwrap_or_default(),
            })
        })
        .collect();
    resources.sort();
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn link(link_type: &str, name: &str, href: &str) -> Link {
        Link {
            rel: "down".to_string(),
            link_type: link_type.to_string(),
            href: href.to_string(),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_session_from_document_uses_org_link() {
        let document = SessionDocument {
            user: Some("alice".to_string()),
            org: None,
            link: vec![link(
                "application/vnd.vmware.vcloud.org+json",
                "acme",
                "https://vcd/api/org/1",
            )],
        };
        let session = session_from_document("tok".to_string(), document, None).unwrap();
        assert_eq!(session.org_name, "acme");
        assert_eq!(session.org_url, "https://vcd/api/org/1");
        assert_eq!(session.token, "tok");
    }

    #[test]
    fn test_session_without_org_link_fails() {
        let document = SessionDocument {
            user: None,
            org: Some("acme".to_string()),
            link: vec![],
        };
        assert!(session_from_document("tok".to_string(), document, None).is_err());
    }

    #[test]
    fn test_resources_from_links_filters_and_sorts() {
        let links = vec![
            link("application/vnd.vmware.vcloud.vdc+json", "vdc-b", "h1"),
            link("application/vnd.vmware.vcloud.catalog+json", "public", "h2"),
            link("application/vnd.vmware.vcloud.tasksList+json", "tasks", "h3"),
            link("application/vnd.vmware.vcloud.orgNetwork+json", "net-1", "h4"),
            link("application/vnd.vmware.vcloud.vdc+json", "vdc-a", "h5"),
        ];
        let resources = resources_from_links(&links);
        let pairs: Vec<(&str, &str)> = resources
            .iter()
            .map(|r| (r.kind.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("catalog", "public"),
                ("network", "net-1"),
                ("vdc", "vdc-a"),
                ("vdc", "vdc-b"),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_org_resources_sends_token() {
        let mock_server = MockServer::start().await;
        let client = VcaClient::new(&mock_server.uri(), "5.5", false).unwrap();
        let session = VcloudSession {
            token: "vcd-token".to_string(),
            org_name: "acme".to_string(),
            org_url: format!("{}/api/org/1", mock_server.uri()),
        };

        Mock::given(method("GET"))
            .and(path("/api/org/1"))
            .and(header(api::VCLOUD_AUTH_HEADER, "vcd-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "acme",
                "link": [{
                    "rel": "down",
                    "type": "application/vnd.vmware.vcloud.vdc+json",
                    "name": "vdc-1",
                    "href": "https://vcd/api/vdc/1"
                }]
            })))
            .mount(&mock_server)
            .await;

        let resources = fetch_org_resources(&client, &session).await.unwrap();
        assert_eq!(
            resources,
            vec![OrgResource {
                kind: "vdc".to_string(),
                name: "vdc-1".to_string()
            }]
        );
    }
}
