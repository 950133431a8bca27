//! archprofile Library
//!
//! This library provides the profile model of the Arch Linux installer: the
//! profile taxonomy, selection trees beneath top level profiles, and the
//! resolution of a selection into packages, services and install hooks.

pub mod cli;
pub mod config;
pub mod config_file;
pub mod error;
pub mod installer;
pub mod logic;
pub mod package_utils;
pub mod profiles;
pub mod types;

// Re-export main types for convenience
pub use config::ProfileContext;
pub use config_file::{ProfileConfiguration, ProfileSelection};
pub use error::{ProfileError, Result};
pub use installer::{install_greeter, install_profile, InstallAction, InstallPlan, InstallSession};
pub use profiles::{
    BaseHooks, CustomSettings, Profile, ProfileCatalog, ProfileDefinition, ProfileHooks,
};
pub use types::{GreeterType, ProfileType, SelectResult};

// Selection resolution
pub use logic::resolver::{effective_greeter, resolve_packages, resolve_services};
pub use logic::selector::ProfileSelector;
