//! Profile model.
//!
//! A [`Profile`] is a named, typed unit (server role, desktop environment,
//! window manager, application...) contributing packages and services to an
//! installation. Top level profiles hold the user's concrete choice as a list
//! of child profiles in `current_selection`, forming a small tree that the
//! installer queries for packages, services and install hooks.
//!
//! # Behaviour
//!
//! Every profile is a plain record plus an attached [`ProfileHooks`]
//! provider. Hooks have default implementations, so a concrete profile only
//! supplies the behaviour it changes:
//!
//! | Hook                   | Default |
//! |------------------------|---------|
//! | `install`              | no-op |
//! | `post_install`         | no-op |
//! | `json`                 | empty map |
//! | `do_on_select`         | `SelectResult::NewSelection` |
//! | `set_custom_settings`  | replace the map wholesale |
//! | `preview_text`         | `packages_text(false)` |
//! | `default_greeter_type` | `None` |
//!
//! # Visibility
//!
//! Profiles flagged `advanced` are hidden from desktop/xorg listings unless
//! the [`ProfileContext`] passed in has advanced mode enabled.

pub mod builtin;
pub mod catalog;
pub mod definition;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::ProfileContext;
use crate::error::Result;
use crate::installer::InstallSession;
use crate::package_utils::format_cols;
use crate::types::{GreeterType, ProfileType, SelectResult};

pub use catalog::ProfileCatalog;
pub use definition::ProfileDefinition;

/// Free-form per-profile settings, persisted as a JSON object.
pub type CustomSettings = Map<String, Value>;

/// Header line of [`Profile::packages_text`] output.
pub const PACKAGES_HEADER: &str = "Installed packages";

// ============================================================================
// Hooks
// ============================================================================

/// Overridable behaviour attached to a profile.
///
/// Each method receives the profile it is attached to. Implementors override
/// only what they need.
pub trait ProfileHooks: fmt::Debug + Send + Sync {
    /// Performs installation steps when this profile was selected.
    fn install(&self, _profile: &Profile, _session: &mut dyn InstallSession) -> Result<()> {
        Ok(())
    }

    /// Runs once the main installation step has populated the target system.
    fn post_install(&self, _profile: &Profile, _session: &mut dyn InstallSession) -> Result<()> {
        Ok(())
    }

    /// JSON representation of the profile's configuration.
    fn json(&self, _profile: &Profile) -> CustomSettings {
        Map::new()
    }

    /// Called when the profile is chosen in a selector.
    fn do_on_select(&self, _profile: &Profile) -> SelectResult {
        SelectResult::NewSelection
    }

    /// Applies settings parsed from a configuration or entered by the user.
    ///
    /// Overrides decide whether to call [`Profile::replace_custom_settings`].
    fn set_custom_settings(&self, profile: &mut Profile, settings: CustomSettings) {
        profile.replace_custom_settings(settings);
    }

    /// Text shown while browsing profiles.
    fn preview_text(&self, profile: &Profile) -> Option<String> {
        profile.packages_text(false)
    }

    /// Greeter to preselect when this profile is chosen.
    fn default_greeter_type(&self, _profile: &Profile) -> Option<GreeterType> {
        None
    }
}

/// Hooks with every default left in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseHooks;

impl ProfileHooks for BaseHooks {}

// ============================================================================
// Profile
// ============================================================================

/// An installable profile and the user's selection beneath it.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    description: String,
    profile_type: ProfileType,
    packages: Vec<String>,
    services: Vec<String>,
    support_gfx_driver: bool,
    support_greeter: bool,
    advanced: bool,
    custom_settings: CustomSettings,
    hooks: Arc<dyn ProfileHooks>,

    /// Child profiles chosen under this one, in selection order.
    pub current_selection: Vec<Profile>,

    /// Only used for custom profiles.
    pub custom_enabled: bool,
}

impl Profile {
    /// Create a profile with no packages, services or selection.
    pub fn new(name: impl Into<String>, profile_type: ProfileType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            profile_type,
            packages: Vec::new(),
            services: Vec::new(),
            support_gfx_driver: false,
            support_greeter: false,
            advanced: false,
            custom_settings: Map::new(),
            hooks: Arc::new(BaseHooks),
            current_selection: Vec::new(),
            custom_enabled: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the base packages.
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the base services.
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Mark whether this profile needs a graphics driver.
    pub fn with_gfx_driver(mut self, supported: bool) -> Self {
        self.support_gfx_driver = supported;
        self
    }

    /// Mark whether this profile offers a greeter choice.
    pub fn with_greeter(mut self, supported: bool) -> Self {
        self.support_greeter = supported;
        self
    }

    /// Gate this profile behind advanced mode.
    pub fn with_advanced(mut self, advanced: bool) -> Self {
        self.advanced = advanced;
        self
    }

    /// Attach a behaviour provider.
    pub fn with_hooks(mut self, hooks: impl ProfileHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Set the initial selection.
    pub fn with_selection(mut self, selection: Vec<Profile>) -> Self {
        self.current_selection = selection;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn profile_type(&self) -> ProfileType {
        self.profile_type
    }

    /// Packages to install when this profile is among the chosen ones.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Services to enable when this profile is among the chosen ones.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn advanced(&self) -> bool {
        self.advanced
    }

    pub fn custom_settings(&self) -> &CustomSettings {
        &self.custom_settings
    }

    // ------------------------------------------------------------------------
    // Selection & settings
    // ------------------------------------------------------------------------

    /// Names of the selected child profiles, in selection order.
    pub fn current_selection_names(&self) -> Vec<String> {
        self.current_selection
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    /// Selected children that take part in installation.
    ///
    /// Entries under a `Custom` profile only count while `custom_enabled` is
    /// set; every other selection is installed as a whole.
    pub fn enabled_selection(&self) -> impl Iterator<Item = &Profile> {
        let custom = self.profile_type == ProfileType::Custom;
        self.current_selection
            .iter()
            .filter(move |p| !custom || p.custom_enabled)
    }

    /// Discard the current selection.
    pub fn reset(&mut self) {
        self.current_selection = Vec::new();
    }

    /// Apply custom settings through this profile's hooks.
    pub fn set_custom_settings(&mut self, settings: CustomSettings) {
        let hooks = Arc::clone(&self.hooks);
        hooks.set_custom_settings(self, settings);
    }

    /// Replace the custom settings map, bypassing hooks.
    pub fn replace_custom_settings(&mut self, settings: CustomSettings) {
        self.custom_settings = settings;
    }

    // ------------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------------

    /// Advanced profiles are only visible when advanced mode is on.
    fn advanced_check(&self, ctx: &ProfileContext) -> bool {
        ctx.allows(self.advanced)
    }

    pub fn is_top_level_profile(&self) -> bool {
        self.profile_type.is_top_level()
    }

    pub fn is_desktop_profile(&self, ctx: &ProfileContext) -> bool {
        self.advanced_check(ctx) && self.profile_type == ProfileType::Desktop
    }

    pub fn is_server_type_profile(&self) -> bool {
        self.profile_type == ProfileType::ServerType
    }

    /// Desktop environments and window managers.
    pub fn is_desktop_type_profile(&self, ctx: &ProfileContext) -> bool {
        self.advanced_check(ctx)
            && matches!(
                self.profile_type,
                ProfileType::DesktopEnv | ProfileType::WindowMgr
            )
    }

    pub fn is_xorg_type_profile(&self, ctx: &ProfileContext) -> bool {
        self.advanced_check(ctx) && self.profile_type == ProfileType::Xorg
    }

    pub fn is_tailored(&self) -> bool {
        self.profile_type == ProfileType::Tailored
    }

    pub fn is_custom_type_profile(&self) -> bool {
        self.profile_type == ProfileType::CustomType
    }

    /// Whether the effective selection needs a graphics driver.
    ///
    /// Without a selection this is the profile's own flag; otherwise any
    /// selected child (one level deep) asking for a driver decides it.
    pub fn is_graphic_driver_supported(&self) -> bool {
        if self.current_selection.is_empty() {
            return self.support_gfx_driver;
        }
        self.current_selection.iter().any(|p| p.support_gfx_driver)
    }

    pub fn is_greeter_supported(&self) -> bool {
        self.support_greeter
    }

    // ------------------------------------------------------------------------
    // Aggregation & preview
    // ------------------------------------------------------------------------

    /// Sorted, deduplicated package listing in columns.
    ///
    /// With `include_sub_packages` the packages of the directly selected
    /// children are included. Returns `None` when there is nothing to list.
    pub fn packages_text(&self, include_sub_packages: bool) -> Option<String> {
        let mut packages: Vec<&str> = self.packages.iter().map(String::as_str).collect();

        if include_sub_packages {
            for child in &self.current_selection {
                packages.extend(child.packages.iter().map(String::as_str));
            }
        }

        packages.sort_unstable();
        packages.dedup();

        let text = format_cols(&packages);
        if text.is_empty() {
            return None;
        }
        Some(format!("{}: \n{}", PACKAGES_HEADER, text))
    }

    pub fn preview_text(&self) -> Option<String> {
        self.hooks.preview_text(self)
    }

    // ------------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------------

    pub fn install(&self, session: &mut dyn InstallSession) -> Result<()> {
        self.hooks.install(self, session)
    }

    pub fn post_install(&self, session: &mut dyn InstallSession) -> Result<()> {
        self.hooks.post_install(self, session)
    }

    pub fn json(&self) -> CustomSettings {
        self.hooks.json(self)
    }

    pub fn do_on_select(&self) -> SelectResult {
        self.hooks.do_on_select(self)
    }

    pub fn default_greeter_type(&self) -> Option<GreeterType> {
        self.hooks.default_greeter_type(self)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Tests
// ============================================================================
