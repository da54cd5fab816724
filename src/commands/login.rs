//! login / logout handlers

use log::debug;

use crate::cli::LoginArgs;
use crate::error::Result;
use crate::session::{LoginRequest, Session};
use crate::ui::{create_spinner, finish_spinner, prompt_password};
use crate::vca::{Connector, Provider, ServiceType};

use super::{open_session, CommandContext};

/// Prepend `https://` to a host given without a scheme
pub fn normalize_host(host: &str) -> String {
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Log in, then select the requested instance or org.
///
/// A failed selection after a successful login is only a warning.
pub async fn run_login<C: Connector>(
    ctx: &CommandContext,
    connector: &C,
    args: &LoginArgs,
) -> Result<()> {
    let host = normalize_host(&args.host);
    let service_type = ServiceType::from(args.service_version);
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password()?,
    };

    let mut session = open_session(ctx, connector)?;
    let provider = connector.connect(service_type, &host)?;
    let request = LoginRequest {
        host,
        user: args.user.clone(),
        password,
        org: args.org.clone(),
        save_password: !args.do_not_save_password,
    };

    let spinner = create_spinner(&format!("Logging in to {}...", request.host), ctx.quiet);
    let result = session.login(provider, &request).await;
    finish_spinner(spinner);
    if let Err(e) = result {
        ctx.save(&session)?;
        return Err(e);
    }

    ctx.output.message(&format!(
        "User '{}' logged in, profile '{}'",
        args.user, ctx.profile_name
    ));
    if request.save_password {
        ctx.output.warning(
            "Password encrypted and saved in local profile. \
             Use --do-not-save-password to disable it.",
        );
    }

    select_after_login(ctx, &mut session, args).await;
    ctx.save(&session)
}

async fn select_after_login<P: Provider>(
    ctx: &CommandContext,
    session: &mut Session<P>,
    args: &LoginArgs,
) {
    let Some((direct_login, org_switch)) = session
        .provider()
        .map(|p| (p.supports_direct_instance_login(), p.supports_org_switch()))
    else {
        return;
    };
    let instance = args.instance.as_deref();
    let org = args.org.as_deref();

    if direct_login {
        let Some(instance) = instance else {
            return;
        };
        match session.select_instance(instance).await {
            Ok(org) => ctx.output.message(&format!(
                "Using instance:org '{}':'{}', profile '{}'",
                instance, org, ctx.profile_name
            )),
            Err(e) => ctx.output.warning(&format!(
                "Unable to select instance '{}', profile '{}': {}",
                instance, ctx.profile_name, e
            )),
        }
    } else if org_switch && (instance.is_some() || org.is_some()) {
        let instance = instance.unwrap_or_default();
        let org = org.unwrap_or_default();
        match session.select_org(instance, org).await {
            Ok(org) => ctx.output.message(&format!(
                "Using instance:org '{}':'{}', profile '{}'",
                instance, org, ctx.profile_name
            )),
            Err(e) => ctx.output.warning(&format!(
                "Unable to select instance:org '{}':'{}', profile '{}': {}",
                instance, org, ctx.profile_name, e
            )),
        }
    } else {
        debug!("No selection requested after login");
    }
}

/// Forget the session of the profile. Never contacts the service.
pub fn run_logout<C: Connector>(ctx: &CommandContext, connector: &C) -> Result<()> {
    let mut session = open_session(ctx, connector)?;
    let user = session.profile().user.clone().unwrap_or_default();
    session.logout();
    ctx.save(&session)?;
    ctx.output.message(&format!(
        "User '{}' logged out, profile '{}'",
        user, ctx.profile_name
    ));
    Ok(())
}
