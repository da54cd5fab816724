//! status / profile handlers

use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::output::{selected_marker, Report};
use crate::profile::ProfileConfig;
use crate::session::Session;
use crate::vca::{Connector, Provider};

use super::{open_session, reauthenticate, CommandContext};

fn optional(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

/// Key/value report describing the profile and its session
pub fn status_report<P: Provider>(
    session: &Session<P>,
    profile_file: &Path,
    active: bool,
) -> Report {
    let profile = session.profile();
    let mut report = Report::new("Status:", &["Key", "Value"]);
    let mut add = |key: &str, value: Value| report.push_row(vec![Value::from(key), value]);

    add("vcactl_version", Value::from(env!("CARGO_PKG_VERSION")));
    add("profile_file", Value::from(profile_file.display().to_string()));
    add("profile", Value::from(session.name()));
    add("host", Value::from(profile.host.as_str()));
    add("user", optional(profile.user.as_deref()));
    add("instance", optional(profile.instance.as_deref()));
    add("org", optional(profile.org.as_deref()));
    add(
        "password",
        Value::from(if profile.has_password() {
            "<encrypted>"
        } else {
            "None"
        }),
    );
    if let Some(service_type) = session.service_type() {
        add("type", Value::from(service_type.to_string()));
        add("version", Value::from(service_type.version()));
    }
    if let Some(url) = session.provider().and_then(|p| p.session_url()) {
        add("org_url", Value::from(url));
    }
    add("last_login", optional(profile.last_login.as_deref()));
    add("active session", Value::from(active));
    report
}

/// Show the profile and whether its session can be re-established.
/// A failed re-authentication is reported as a warning only.
pub async fn run_status<C: Connector>(ctx: &CommandContext, connector: &C) -> Result<()> {
    let mut session = open_session(ctx, connector)?;
    ctx.save(&session)?;

    let active = match reauthenticate(ctx, &mut session).await {
        Ok(()) => true,
        Err(e) => {
            ctx.output.warning(&e.to_string());
            false
        }
    };
    ctx.output
        .report(&status_report(&session, ctx.store.path(), active));
    Ok(())
}

/// All stored profiles, the current one marked as selected
pub fn profiles_report(config: &ProfileConfig, current: &str, profile_file: &Path) -> Report {
    let mut report = Report::new(
        format!("Profiles in file '{}':", profile_file.display()),
        &["Profile", "Selected", "Host", "User", "Instance", "Org", "Type"],
    );
    for (name, profile) in &config.profiles {
        report.push_row(vec![
            Value::from(name.as_str()),
            selected_marker(name == current),
            Value::from(profile.host.as_str()),
            optional(profile.user.as_deref()),
            optional(profile.instance.as_deref()),
            optional(profile.org.as_deref()),
            profile
                .service_type
                .map(|st| Value::from(st.to_string()))
                .unwrap_or(Value::Null),
        ]);
    }
    report
}

/// List the profiles of the profile file
pub fn run_profile<C: Connector>(ctx: &CommandContext, connector: &C) -> Result<()> {
    let session = open_session(ctx, connector)?;
    ctx.save(&session)?;

    let config = ctx.store.load();
    ctx.output.report(&profiles_report(
        &config,
        &ctx.profile_name,
        ctx.store.path(),
    ));
    Ok(())
}
