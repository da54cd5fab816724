//! vCloud Air API module
//!
//! One provider per service variant (On Demand, subscription, standalone
//! vCloud Director) behind the [`Provider`] capability trait.

mod client;
mod dispatch;
pub mod models;
mod on_demand;
mod provider;
mod service;
mod standalone;
mod subscription;
#[cfg(test)]
pub(crate) mod testing;
mod vcloud;

pub use client::VcaClient;
pub use dispatch::{HttpConnector, ProviderClient};
pub use models::{InstanceDetails, InstanceSummary, OrgResource, OrgSummary, VcloudSession};
pub use on_demand::{summarize_instances, OnDemandProvider};
pub use provider::{unsupported, Connector, Provider};
pub use service::ServiceType;
pub use standalone::StandaloneProvider;
pub use subscription::SubscriptionProvider;
