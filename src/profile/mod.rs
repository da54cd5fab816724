//! Profile management module
//!
//! Provides named profiles that bundle the connection parameters (host, user,
//! password, selected instance and org) of a vCloud Air account, persisted in
//! a single profile file.

mod models;
mod password;
mod resolve;
mod store;

pub use models::{Profile, ProfileConfig};
pub use resolve::{resolve_password, resolve_profile_name};
pub use store::{expand_path, ProfileStore};
