//! Terminal interaction: progress spinners and the password prompt

mod prompt;
mod spinner;

pub use prompt::prompt_password;
pub use spinner::{create_spinner, finish_spinner};
