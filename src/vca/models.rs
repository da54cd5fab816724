//! vCloud Air data models
//!
//! Wire models deserialize the JSON documents of the three service variants;
//! summary models are what the command layer works with.

use serde::{Deserialize, Serialize};

// --- vCloud Air On Demand (5.7) ---

/// Response wrapper for the instances list
#[derive(Deserialize, Debug)]
pub struct InstancesResponse {
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// Compute instance of an On Demand account
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub service_group_id: String,
    /// JSON encoded attributes, carries the SSO session endpoint
    #[serde(default)]
    pub instance_attributes: Option<String>,
}

impl Instance {
    /// Region without the domain suffix ("us-california-1-3.vchs.vmware.com" -> "us-california-1-3")
    pub fn short_region(&self) -> &str {
        self.region.split('.').next().unwrap_or("")
    }

    /// Decode the embedded instance attributes
    pub fn attributes(&self) -> Option<InstanceAttributes> {
        self.instance_attributes
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// Decoded `instanceAttributes`
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstanceAttributes {
    #[serde(default)]
    pub org_name: Option<String>,
    pub session_uri: String,
}

/// Response wrapper for the plans list
#[derive(Deserialize, Debug)]
pub struct PlansResponse {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// Service plan
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service_name: Option<String>,
}

/// Response wrapper for the service groups list
#[derive(Deserialize, Debug)]
pub struct ServiceGroupsResponse {
    #[serde(rename = "serviceGroup", default)]
    pub service_group: Vec<ServiceGroup>,
}

/// Billing service group
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

// --- vCloud Air subscription (5.6) ---

/// Response wrapper for the subscription services list
#[derive(Deserialize, Debug)]
pub struct ServicesResponse {
    #[serde(default)]
    pub service: Vec<Service>,
}

/// Subscription service (an instance in CLI terms)
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_id: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Compute service document listing its virtual data centers
#[derive(Deserialize, Debug)]
pub struct ComputeResponse {
    #[serde(rename = "vdcRef", default)]
    pub vdc_ref: Vec<VdcRef>,
}

/// Reference to a virtual data center (an org in CLI terms)
#[derive(Deserialize, Debug, Clone)]
pub struct VdcRef {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub link: Vec<Link>,
}

/// Answer of a vcloudsession request
#[derive(Deserialize, Debug)]
pub struct VcloudSessionResponse {
    #[serde(rename = "vdcLink", default)]
    pub vdc_link: Vec<VdcLink>,
    #[serde(default)]
    pub link: Vec<Link>,
}

/// VDC link carrying the vCloud Director token
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VdcLink {
    #[serde(default)]
    pub name: String,
    pub href: String,
    pub authorization_token: String,
    #[serde(default)]
    pub authorization_header: Option<String>,
}

// --- vCloud Director ---

/// Typed link of a vCloud document
#[derive(Deserialize, Debug, Clone)]
pub struct Link {
    #[serde(default)]
    pub rel: String,
    #[serde(rename = "type", default)]
    pub link_type: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// vCloud Director session document
#[derive(Deserialize, Debug)]
pub struct SessionDocument {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub link: Vec<Link>,
}

/// vCloud Director organization document
#[derive(Deserialize, Debug)]
pub struct OrgDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: Vec<Link>,
}

/// Authenticated vCloud Director session of an org
#[derive(Debug, Clone, PartialEq)]
pub struct VcloudSession {
    pub token: String,
    pub org_name: String,
    pub org_url: String,
}

// --- Summaries ---

/// Instance row shown by `instance list`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceSummary {
    pub id: String,
    pub region: String,
    pub plan: Option<String>,
    pub service_group: Option<String>,
    pub service_type: Option<String>,
}

/// Org (virtual data center) of an instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgSummary {
    pub name: String,
    pub status: String,
}

/// Resource linked from an org document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct OrgResource {
    pub kind: String,
    pub name: String,
}

/// Raw instance document and its plan
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceDetails {
    pub instance: serde_json::Value,
    pub plan: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_deserialize_and_region() {
        let instance: Instance = serde_json::from_value(serde_json::json!({
            "id": "a1b2",
            "region": "us-california-1-3.vchs.vmware.com",
            "planId": "region:us-california-1-3:plan:ondemand",
            "serviceGroupId": "sg-1",
            "instanceAttributes": "{\"orgName\":\"a1b2-org\",\"sessionUri\":\"https://vcd/api/sessions\"}"
        }))
        .unwrap();
        assert_eq!(instance.short_region(), "us-california-1-3");
        let attrs = instance.attributes().unwrap();
        assert_eq!(attrs.org_name.as_deref(), Some("a1b2-org"));
        assert_eq!(attrs.session_uri, "https://vcd/api/sessions");
    }

    #[test]
    fn test_instance_without_attributes() {
        let instance: Instance =
            serde_json::from_value(serde_json::json!({"id": "x"})).unwrap();
        assert!(instance.attributes().is_none());
        assert_eq!(instance.short_region(), "");
    }

    #[test]
    fn test_service_groups_wrapper() {
        let groups: ServiceGroupsResponse = serde_json::from_value(serde_json::json!({
            "serviceGroup": [{"id": "sg-1", "displayName": "Dev"}]
        }))
        .unwrap();
        assert_eq!(groups.service_group[0].display_name, "Dev");
    }

    #[test]
    fn test_vdc_ref_links() {
        let compute: ComputeResponse = serde_json::from_value(serde_json::json!({
            "vdcRef": [{
                "name": "VDC1",
                "status": "Active",
                "link": [{
                    "rel": "down",
                    "type": "application/xml;class=vnd.vmware.vchs.vcloudsession",
                    "href": "https://vchs/api/vchs/compute/M1/vdc/VDC1/vcloudsession"
                }]
            }]
        }))
        .unwrap();
        assert_eq!(compute.vdc_ref[0].link.len(), 1);
        assert!(compute.vdc_ref[0].link[0].link_type.contains("vcloudsession"));
    }

    #[test]
    fn test_empty_wrappers_default() {
        let instances: InstancesResponse = serde_json::from_str("{}").unwrap();
        let services: ServicesResponse = serde_json::from_str("{}").unwrap();
        assert!(instances.instances.is_empty());
        assert!(services.service.is_empty());
    }
}
