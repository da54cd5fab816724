//! Command handlers
//!
//! Each handler loads the profile, rebuilds the session, runs its action
//! and persists the profile (marking it current) before returning.

mod instance;
mod login;
mod org;
mod status;

use log::debug;

use crate::cli::{Cli, Command};
use crate::config::defaults;
use crate::error::Result;
use crate::output::{Output, OutputMode};
use crate::profile::{expand_path, resolve_password, resolve_profile_name, Profile, ProfileStore};
use crate::session::Session;
use crate::ui::{create_spinner, finish_spinner};
use crate::vca::{Connector, Provider};

pub use instance::{instance_report, orgs_in_instance_report, run_instance_command};
pub use login::{normalize_host, run_login, run_logout};
pub use org::{org_report, org_resources_report, run_org_command};
pub use status::{profiles_report, run_profile, run_status, status_report};

/// Per-invocation settings shared by all handlers
pub struct CommandContext {
    pub store: ProfileStore,
    pub profile_name: String,
    pub output: Output,
    /// Suppress spinners
    pub quiet: bool,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Self {
        let store = ProfileStore::with_path(expand_path(&cli.profile_file));
        let config = store.load();
        let profile_name = resolve_profile_name(cli.profile.as_deref(), &config);
        let output = Output::new(OutputMode::from_flags(cli.json, cli.xml));
        debug!(
            "Using profile '{}' from {} ({} output)",
            profile_name,
            store.path().display(),
            output.mode()
        );
        Self {
            store,
            profile_name,
            output,
            quiet: cli.debug || output.mode().is_structured(),
        }
    }

    /// Stored profile, or a fresh one pointing at the default host
    pub fn load_profile(&self) -> Profile {
        self.store
            .load_profile(&self.profile_name)
            .unwrap_or_else(|| {
                let mut profile = Profile::default();
                profile.host = defaults::HOST.to_string();
                profile
            })
    }

    /// Persist the session profile and mark it current
    pub fn save<P: Provider>(&self, session: &Session<P>) -> Result<()> {
        self.store.save_profile(&self.profile_name, session.profile())
    }
}

/// Rebuild the session of the profile; the provider is attached only if the
/// profile has logged in before
pub fn open_session<C: Connector>(
    ctx: &CommandContext,
    connector: &C,
) -> Result<Session<C::Provider>> {
    let profile = ctx.load_profile();
    let provider = match profile.service_type {
        Some(service_type) => Some(connector.connect(service_type, &profile.host)?),
        None => None,
    };
    Ok(Session::new(&ctx.profile_name, profile, provider))
}

/// Re-establish the stored session before a command's main action
pub async fn reauthenticate<P: Provider>(
    ctx: &CommandContext,
    session: &mut Session<P>,
) -> Result<()> {
    let password = resolve_password(session.profile());
    let spinner = create_spinner("Connecting...", ctx.quiet);
    let result = session.reauthenticate(password).await;
    finish_spinner(spinner);
    result
}

/// Dispatch a parsed command line
pub async fn run_command<C: Connector>(
    cli: &Cli,
    command: &Command,
    connector: &C,
) -> Result<()> {
    let ctx = CommandContext::from_cli(cli);
    match command {
        Command::Status => run_status(&ctx, connector).await,
        Command::Profile => run_profile(&ctx, connector),
        Command::Login(args) => run_login(&ctx, connector, args).await,
        Command::Logout => run_logout(&ctx, connector),
        Command::Instance(args) => run_instance_command(&ctx, connector, args).await,
        Command::Org(args) => run_org_command(&ctx, connector, args).await,
    }
}
