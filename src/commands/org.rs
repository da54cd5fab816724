//! org {list|info|use}

use serde_json::Value;

use crate::cli::{Operation, SelectorArgs};
use crate::error::{Result, VcaError};
use crate::output::{selected_marker, Report};
use crate::session::{require_selector, Session};
use crate::vca::{Connector, OrgResource, Provider, ServiceType};

use super::instance::orgs_in_instance_report;
use super::{open_session, reauthenticate, CommandContext};

/// The org of the current session, if any
pub fn org_report(instance: &str, profile_name: &str, session_org: Option<&str>) -> Report {
    let mut report = Report::new(
        format!(
            "Available orgs in instance '{}', profile '{}':",
            instance, profile_name
        ),
        &["Org", "Selected"],
    );
    if let Some(org) = session_org {
        report.push_row(vec![Value::from(org), selected_marker(true)]);
    }
    report.sorted()
}

/// Resources of the session org
pub fn org_resources_report(
    instance: &str,
    org: &str,
    profile_name: &str,
    resources: &[OrgResource],
) -> Report {
    let mut report = Report::new(
        format!(
            "Details for instance:org '{}':'{}', profile '{}':",
            instance, org, profile_name
        ),
        &["Type", "Name"],
    );
    for resource in resources {
        report.push_row(vec![
            Value::from(resource.kind.as_str()),
            Value::from(resource.name.as_str()),
        ]);
    }
    report
}

/// Reject `org use` on variants that cannot switch orgs, with a hint
fn check_org_switch<P: Provider>(session: &Session<P>) -> Result<()> {
    let Some(provider) = session.provider() else {
        return Ok(());
    };
    if provider.supports_org_switch() {
        return Ok(());
    }
    let hint = match provider.service_type() {
        ServiceType::Vca => ". Use the 'instance' command to change instances",
        ServiceType::Standalone => {
            ". Use the '--org' param in the login command to select another organization"
        }
        ServiceType::Vchs => "",
    };
    Err(VcaError::Unsupported(format!(
        "Operation not supported in this service type{}",
        hint
    )))
}

pub async fn run_org_command<C: Connector>(
    ctx: &CommandContext,
    connector: &C,
    args: &SelectorArgs,
) -> Result<()> {
    let mut session = open_session(ctx, connector)?;
    if args.operation == Operation::Use {
        check_org_switch(&session)?;
        require_selector(&args.instance, "instance", "instance")?;
        require_selector(&args.org, "organization", "org")?;
    }

    reauthenticate(ctx, &mut session).await?;
    let result = match args.operation {
        Operation::List => list_orgs(ctx, &session, args).await,
        Operation::Info => org_info(ctx, &session, args).await,
        Operation::Use => use_org(ctx, &mut session, args).await,
    };
    ctx.save(&session)?;
    result
}

async fn list_orgs<P: Provider>(
    ctx: &CommandContext,
    session: &Session<P>,
    args: &SelectorArgs,
) -> Result<()> {
    let provider = session.connected()?;
    let selected_instance = session.profile().instance.as_deref().unwrap_or_default();

    if provider.orgs_scoped_to_instance() {
        let instance = if args.instance.is_empty() {
            selected_instance
        } else {
            args.instance.as_str()
        };
        require_selector(instance, "instance", "instance")?;
        let orgs = provider.orgs_in_instance(instance).await?;
        ctx.output.report(&orgs_in_instance_report(
            instance,
            &ctx.profile_name,
            &orgs,
            session.state().org(),
        ));
        return Ok(());
    }

    ctx.output.report(&org_report(
        selected_instance,
        &ctx.profile_name,
        session.state().org(),
    ));
    Ok(())
}

async fn org_info<P: Provider>(
    ctx: &CommandContext,
    session: &Session<P>,
    args: &SelectorArgs,
) -> Result<()> {
    let provider = session.connected()?;
    let session_org = session.state().org();
    let org = if args.org.is_empty() {
        session_org.unwrap_or_default()
    } else {
        args.org.as_str()
    };
    if org.is_empty() || session_org != Some(org) {
        return Err(VcaError::NotFound(format!("Org not found '{}'", org)));
    }

    let resources = provider.org_resources().await?;
    ctx.output.report(&org_resources_report(
        session.state().instance().unwrap_or_default(),
        org,
        &ctx.profile_name,
        &resources,
    ));
    Ok(())
}

async fn use_org<P: Provider>(
    ctx: &CommandContext,
    session: &mut Session<P>,
    args: &SelectorArgs,
) -> Result<()> {
    let org = session.select_org(&args.instance, &args.org).await?;
    ctx.output.message(&format!(
        "Using instance:org '{}':'{}', profile '{}'",
        args.instance, org, ctx.profile_name
    ));
    Ok(())
}
