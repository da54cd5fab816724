//! Arguments shared by the `instance` and `org` commands

use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Operation {
    /// List available entries (default)
    #[default]
    List,
    /// Show details
    Info,
    /// Select an entry
    Use,
}

#[derive(Args, Debug)]
pub struct SelectorArgs {
    /// Operation to perform
    #[arg(value_enum, default_value_t = Operation::List)]
    pub operation: Operation,

    /// Instance id
    #[arg(short = 'i', long, default_value = "")]
    pub instance: String,

    /// Organization name
    #[arg(short = 'o', long, default_value = "")]
    pub org: String,
}
