//! vcactl - VMware vCloud Air command line interface
//!
//! Logs in to vCloud Air (On Demand and subscription) or a standalone
//! vCloud Director, keeps the selected instance and organization in a named
//! profile, and lists instances, organizations and their resources.
//!
//! # Example
//!
//! ```bash
//! # Log in and select an instance
//! vcactl login alice@example.com --instance a1b2c3
//!
//! # List instances, the selected one is marked
//! vcactl instance
//!
//! # Switch organization on a subscription account
//! vcactl org use --instance M123 --org VDC-A
//!
//! # Status as JSON
//! vcactl --json status
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod session;
pub mod ui;
pub mod vca;

pub use cli::{Cli, Command, LoginArgs, Operation, SelectorArgs, ServiceVersion};
pub use commands::{run_command, CommandContext};
pub use error::{Result, VcaError};
pub use output::{Output, OutputMode, Report};
pub use profile::{Profile, ProfileConfig, ProfileStore};
pub use session::{LoginRequest, Session, SessionState};
pub use vca::{Connector, HttpConnector, Provider, ProviderClient, ServiceType};
