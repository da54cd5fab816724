//! CLI argument parsing
//!
//! Global flags must precede the subcommand; several short flags (`-p`,
//! `-v`, `-d`, `-i`) mean something else once inside `login`.

mod login;
mod selector;

use clap::{Parser, Subcommand};

use crate::config::defaults;

pub use login::{LoginArgs, ServiceVersion};
pub use selector::{Operation, SelectorArgs};

/// VMware vCloud Air command line interface
#[derive(Parser, Debug)]
#[command(name = "vcactl")]
#[command(about = "VMware vCloud Air command line interface", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Profile name (defaults to VCA_PROFILE, then the current profile)
    #[arg(short = 'p', long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Profile file
    #[arg(short = 'f', long, value_name = "FILE", default_value = defaults::PROFILE_FILE)]
    pub profile_file: String,

    /// Show version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Results as a JSON document
    #[arg(short = 'j', long, conflicts_with = "xml")]
    pub json: bool,

    /// Results as an XML document
    #[arg(short = 'x', long)]
    pub xml: bool,

    /// Perform insecure TLS connections (no certificate verification)
    #[arg(short = 'i', long)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show current status
    Status,

    /// Show profiles
    Profile,

    /// Login to a vCloud service
    Login(LoginArgs),

    /// Logout from a vCloud service
    Logout,

    /// Operations with instances
    Instance(SelectorArgs),

    /// Operations with organizations
    Org(SelectorArgs),
}
