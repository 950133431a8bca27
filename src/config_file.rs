//! Configuration file handling for saving and loading profile selections.
//!
//! The persisted form records names, not profiles: the main profile, the
//! names selected beneath it, and per-profile settings. Loading rebuilds the
//! tree from catalog definitions and pushes the settings back through each
//! profile's `set_custom_settings` hook.
//!
//! ```json
//! {
//!   "profile": {
//!     "main": "Desktop",
//!     "details": ["Sway"],
//!     "custom_settings": { "Sway": { "seat_access": "seatd" } }
//!   },
//!   "gfx_driver": "All open-source",
//!   "greeter": "lightdm-gtk-greeter"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProfileContext;
use crate::error::ProfileError;
use crate::profiles::{CustomSettings, Profile, ProfileCatalog};
use crate::types::GreeterType;

/// A persisted top level profile and its selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSelection {
    /// Name of the top level profile
    pub main: String,
    /// Names of the selected child profiles, in order
    #[serde(default)]
    pub details: Vec<String>,
    /// Settings keyed by profile name (main or detail)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_settings: BTreeMap<String, CustomSettings>,
    /// Detail names with `custom_enabled` set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_enabled: Vec<String>,
}

/// Profile section of an installation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gfx_driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeter: Option<GreeterType>,
}

/// Settings worth persisting for one profile: its `json()` output, or the raw
/// custom settings when the hooks export nothing.
fn persisted_settings(profile: &Profile) -> CustomSettings {
    let json = profile.json();
    if json.is_empty() {
        profile.custom_settings().clone()
    } else {
        json
    }
}

impl ProfileSelection {
    /// Capture the selection tree rooted at a top level profile.
    pub fn from_profile(profile: &Profile) -> Self {
        let mut custom_settings = BTreeMap::new();
        for node in std::iter::once(profile).chain(profile.current_selection.iter()) {
            let settings = persisted_settings(node);
            if !settings.is_empty() {
                custom_settings.insert(node.name().to_string(), settings);
            }
        }

        Self {
            main: profile.name().to_string(),
            details: profile.current_selection_names(),
            custom_settings,
            custom_enabled: profile
                .current_selection
                .iter()
                .filter(|p| p.custom_enabled)
                .map(|p| p.name().to_string())
                .collect(),
        }
    }

    /// Rebuild the selection tree from catalog definitions.
    pub fn apply(
        &self,
        catalog: &ProfileCatalog,
        ctx: &ProfileContext,
    ) -> crate::error::Result<Profile> {
        for name in self.custom_settings.keys() {
            if name != &self.main && !self.details.contains(name) {
                return Err(ProfileError::invalid_selection(format!(
                    "settings given for {} which is not selected",
                    name
                )));
            }
        }

        let mut profile = catalog.select(&self.main, &self.details, ctx)?;

        if let Some(settings) = self.custom_settings.get(&self.main) {
            profile.set_custom_settings(settings.clone());
        }
        for child in profile.current_selection.iter_mut() {
            if let Some(settings) = self.custom_settings.get(child.name()) {
                child.set_custom_settings(settings.clone());
            }
            child.custom_enabled = self.custom_enabled.iter().any(|n| n == child.name());
        }

        debug!("Restored profile selection {}", self.main);
        Ok(profile)
    }
}

impl ProfileConfiguration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a selected profile and greeter
    pub fn from_profile(profile: &Profile, greeter: Option<GreeterType>) -> Self {
        Self {
            profile: Some(ProfileSelection::from_profile(profile)),
            gfx_driver: None,
            greeter,
        }
    }

    /// Rebuild the selected profile, if any
    pub fn apply(
        &self,
        catalog: &ProfileCatalog,
        ctx: &ProfileContext,
    ) -> crate::error::Result<Option<Profile>> {
        self.profile
            .as_ref()
            .map(|selection| selection.apply(catalog, ctx))
            .transpose()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize profile configuration to JSON")?;

        fs::write(&path, json).with_context(|| {
            format!("Failed to write profile configuration to {:?}", path.as_ref())
        })?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read profile configuration from {:?}", path.as_ref())
        })?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse profile configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration against a catalog
    pub fn validate(&self, catalog: &ProfileCatalog, ctx: &ProfileContext) -> Result<()> {
        if let Some(greeter) = self.greeter {
            if greeter.is_advanced() && !ctx.advanced {
                anyhow::bail!("Greeter {} requires advanced mode", greeter);
            }
        }

        let Some(profile) = self.apply(catalog, ctx)? else {
            if self.greeter.is_some() || self.gfx_driver.is_some() {
                anyhow::bail!("Greeter and graphics driver require a selected profile");
            }
            return Ok(());
        };

        if self.greeter.is_some() && !profile.is_greeter_supported() {
            anyhow::bail!("Profile {} does not support a greeter", profile.name());
        }
        if self.gfx_driver.is_some() && !profile.is_graphic_driver_supported() {
            anyhow::bail!(
                "Profile {} does not need a graphics driver",
                profile.name()
            );
        }

        Ok(())
    }
}
