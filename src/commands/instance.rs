//! instance {list|info|use}

use serde_json::{json, Value};

use crate::cli::{Operation, SelectorArgs};
use crate::error::{Result, VcaError};
use crate::output::{selected_marker, OutputMode, Report};
use crate::session::{require_selector, Session};
use crate::vca::{Connector, InstanceSummary, OrgSummary, Provider, ServiceType};

use super::{open_session, reauthenticate, CommandContext};

fn text(value: Option<&str>) -> Value {
    Value::from(value.unwrap_or_default())
}

/// Instances sorted by service group, the selected one marked
pub fn instance_report(
    service_type: ServiceType,
    user: &str,
    profile_name: &str,
    instances: &[InstanceSummary],
    selected: Option<&str>,
) -> Report {
    let with_type = service_type == ServiceType::Vchs;
    let mut headers = vec!["Service Group", "Region", "Plan", "Instance Id", "Selected"];
    if with_type {
        headers.push("Type");
    }
    let mut report = Report::new(
        format!(
            "Available instances for user '{}', profile '{}':",
            user, profile_name
        ),
        &headers,
    );
    for instance in instances {
        let mut row = vec![
            text(instance.service_group.as_deref()),
            Value::from(instance.region.as_str()),
            text(instance.plan.as_deref()),
            Value::from(instance.id.as_str()),
            selected_marker(selected == Some(instance.id.as_str())),
        ];
        if with_type {
            row.push(text(instance.service_type.as_deref()));
        }
        report.push_row(row);
    }
    report.sorted()
}

/// Orgs (virtual data centers) of an instance, the selected one marked
pub fn orgs_in_instance_report(
    instance: &str,
    profile_name: &str,
    orgs: &[OrgSummary],
    selected: Option<&str>,
) -> Report {
    let mut report = Report::new(
        format!(
            "Available orgs in instance '{}', profile '{}':",
            instance, profile_name
        ),
        &["Instance Id", "Org", "Status", "Selected"],
    );
    for org in orgs {
        report.push_row(vec![
            Value::from(instance),
            Value::from(org.name.as_str()),
            Value::from(org.status.as_str()),
            selected_marker(selected == Some(org.name.as_str())),
        ]);
    }
    report.sorted()
}

/// Instance argument, falling back to the selected instance
fn instance_or_selected<'a, P: Provider>(args: &'a SelectorArgs, session: &'a Session<P>) -> &'a str {
    if args.instance.is_empty() {
        session.profile().instance.as_deref().unwrap_or_default()
    } else {
        &args.instance
    }
}

pub async fn run_instance_command<C: Connector>(
    ctx: &CommandContext,
    connector: &C,
    args: &SelectorArgs,
) -> Result<()> {
    let mut session = open_session(ctx, connector)?;
    if let Some(provider) = session.provider() {
        if !provider.supports_instances() {
            return Err(VcaError::Unsupported(
                "This service type doesn't support this command".to_string(),
            ));
        }
    }
    if args.operation == Operation::Use {
        validate_use(&session, args)?;
    }

    reauthenticate(ctx, &mut session).await?;
    let result = match args.operation {
        Operation::List => list_instances(ctx, &session).await,
        Operation::Info => instance_info(ctx, &session, args).await,
        Operation::Use => use_instance(ctx, &mut session, args).await,
    };
    ctx.save(&session)?;
    result
}

fn validate_use<P: Provider>(session: &Session<P>, args: &SelectorArgs) -> Result<()> {
    require_selector(&args.instance, "instance", "instance")?;
    if session.provider().is_some_and(|p| p.supports_org_switch()) {
        require_selector(&args.org, "organization", "org")?;
    }
    Ok(())
}

async fn list_instances<P: Provider>(ctx: &CommandContext, session: &Session<P>) -> Result<()> {
    let provider = session.connected()?;
    let instances = provider.instances().await?;
    let report = instance_report(
        provider.service_type(),
        session.profile().user.as_deref().unwrap_or_default(),
        &ctx.profile_name,
        &instances,
        session.profile().instance.as_deref(),
    );
    ctx.output.report(&report);
    Ok(())
}

async fn instance_info<P: Provider>(
    ctx: &CommandContext,
    session: &Session<P>,
    args: &SelectorArgs,
) -> Result<()> {
    let provider = session.connected()?;
    let instance = instance_or_selected(args, session);
    require_selector(instance, "instance", "instance")?;

    if provider.orgs_scoped_to_instance() {
        let orgs = provider.orgs_in_instance(instance).await?;
        ctx.output.report(&orgs_in_instance_report(
            instance,
            &ctx.profile_name,
            &orgs,
            session.profile().org.as_deref(),
        ));
        return Ok(());
    }

    let details = provider.instance_details(instance).await?;
    let plan = details.plan.unwrap_or(Value::Null);
    match ctx.output.mode() {
        OutputMode::Table => {
            ctx.output.document("Instance details:", &details.instance);
            ctx.output.document("Plan details:", &plan);
        }
        OutputMode::Json | OutputMode::Xml => {
            let combined = json!({ "instance": details.instance, "plan": plan });
            ctx.output.document("Instance and Plan details", &combined);
        }
    }
    Ok(())
}

async fn use_instance<P: Provider>(
    ctx: &CommandContext,
    session: &mut Session<P>,
    args: &SelectorArgs,
) -> Result<()> {
    let org_switch = session.connected()?.supports_org_switch();
    let org = if org_switch {
        session.select_org(&args.instance, &args.org).await?
    } else {
        session.select_instance(&args.instance).await?
    };
    ctx.output.message(&format!(
        "Using instance:org '{}':'{}', profile '{}'",
        args.instance, org, ctx.profile_name
    ));
    Ok(())
}
