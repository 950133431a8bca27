//! Loader-facing profile definitions.
//!
//! A definition is the minimal contract for a profile discovered outside the
//! built-in catalog: a name, the packages it needs and the services it
//! enables. Installing one queues those packages and services on the session.
//!
//! ```json
//! { "name": "docker", "packages": ["docker"], "services": ["docker"] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builtin::ServiceHooks;
use super::Profile;
use crate::error::Result;
use crate::types::ProfileType;

fn default_profile_type() -> ProfileType {
    ProfileType::Application
}

/// A profile described as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_profile_type")]
    pub profile_type: ProfileType,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub advanced: bool,
}

impl ProfileDefinition {
    /// Create an application definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            profile_type: default_profile_type(),
            packages: Vec::new(),
            services: Vec::new(),
            advanced: false,
        }
    }

    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a definition from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let definition = Self::from_json(&content)?;
        debug!(
            "Loaded profile definition {} from {:?}",
            definition.name,
            path.as_ref()
        );
        Ok(definition)
    }

    /// Turn the definition into a catalog profile.
    pub fn into_profile(self) -> Profile {
        Profile::new(self.name, self.profile_type)
            .with_description(self.description)
            .with_packages(self.packages)
            .with_services(self.services)
            .with_advanced(self.advanced)
            .with_hooks(ServiceHooks)
    }
}
