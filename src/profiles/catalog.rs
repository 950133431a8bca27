//! Profile catalog.
//!
//! The catalog owns one definition per profile name. Callers never mutate
//! definitions: they [`instantiate`](ProfileCatalog::instantiate) a copy and
//! build their selection tree on it, so state chosen in one session never
//! leaks into another.

use tracing::{debug, info};

use super::builtin;
use super::definition::ProfileDefinition;
use super::Profile;
use crate::config::ProfileContext;
use crate::error::{ProfileError, Result};
use crate::types::ProfileType;

/// All known profile definitions, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the profiles shipped with the installer.
    pub fn builtin() -> Self {
        let profiles = builtin::all_profiles();
        info!("Loaded {} built-in profiles", profiles.len());
        Self { profiles }
    }

    /// Add a definition. Names must be unique.
    pub fn register(&mut self, profile: Profile) -> Result<()> {
        if self.get(profile.name()).is_some() {
            return Err(ProfileError::duplicate_profile(profile.name()));
        }
        debug!(
            "Registered profile {} ({})",
            profile.name(),
            profile.profile_type()
        );
        self.profiles.push(profile);
        Ok(())
    }

    /// Add a profile described by a loader definition.
    pub fn register_definition(&mut self, definition: ProfileDefinition) -> Result<()> {
        self.register(definition.into_profile())
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name() == name)
    }

    /// A fresh copy of a definition with an empty selection.
    pub fn instantiate(&self, name: &str) -> Result<Profile> {
        let mut profile = self
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileError::unknown_profile(name))?;
        profile.reset();
        Ok(profile)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(Profile::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    // ------------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------------

    /// Top level profiles visible in the given context.
    pub fn top_level_profiles(&self, ctx: &ProfileContext) -> Vec<&Profile> {
        self.profiles
            .iter()
            .filter(|p| p.is_top_level_profile() && ctx.allows(p.advanced()))
            .collect()
    }

    pub fn server_profiles(&self) -> Vec<&Profile> {
        self.profiles
            .iter()
            .filter(|p| p.is_server_type_profile())
            .collect()
    }

    /// Desktop environments and window managers visible in the given context.
    pub fn desktop_profiles(&self, ctx: &ProfileContext) -> Vec<&Profile> {
        self.profiles
            .iter()
            .filter(|p| p.is_desktop_type_profile(ctx))
            .collect()
    }

    /// Custom entries and applications.
    pub fn custom_profiles(&self) -> Vec<&Profile> {
        self.profiles
            .iter()
            .filter(|p| p.is_custom_type_profile() || p.profile_type() == ProfileType::Application)
            .collect()
    }

    pub fn tailored_profiles(&self) -> Vec<&Profile> {
        self.profiles.iter().filter(|p| p.is_tailored()).collect()
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Candidates that may be selected under a top level profile.
    pub fn candidates_for(&self, parent: &Profile, ctx: &ProfileContext) -> Vec<&Profile> {
        match parent.profile_type() {
            ProfileType::Desktop => self.desktop_profiles(ctx),
            ProfileType::Server => self.server_profiles(),
            ProfileType::Custom => self.custom_profiles(),
            _ => Vec::new(),
        }
    }

    /// Build a top level profile with the named children selected.
    ///
    /// Entries chosen under `Custom` start out enabled. Fails when the main profile is not a visible top level profile or a
    /// child is not a valid candidate under it.
    pub fn select(&self, main: &str, details: &[String], ctx: &ProfileContext) -> Result<Profile> {
        let mut parent = self.instantiate(main)?;
        if !parent.is_top_level_profile() {
            return Err(ProfileError::invalid_selection(format!(
                "{} is not a top level profile",
                main
            )));
        }
        if !ctx.allows(parent.advanced()) {
            return Err(ProfileError::invalid_selection(format!(
                "{} requires advanced mode",
                main
            )));
        }

        let candidates = self.candidates_for(&parent, ctx);
        for name in details {
            if !candidates.iter().any(|p| p.name() == name.as_str()) {
                return Err(ProfileError::invalid_selection(format!(
                    "{} cannot be selected under {}",
                    name, main
                )));
            }
            let mut child = self.instantiate(name)?;
            child.custom_enabled = parent.profile_type() == ProfileType::Custom;
            parent.current_selection.push(child);
        }

        debug!("Selected {} with [{}]", main, details.join(", "));
        Ok(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(profiles: Vec<&Profile>) -> Vec<&str> {
        profiles.into_iter().map(Profile::name).collect()
    }

    #[test]
    fn test_builtin_top_level() {
        let catalog = ProfileCatalog::builtin();
        let top = names(catalog.top_level_profiles(&ProfileContext::default()));
        assert_eq!(top, vec!["Minimal", "Desktop", "Server", "Xorg", "Custom"]);
    }

    #[test]
    fn test_desktop_listing_hides_advanced() {
        let catalog = ProfileCatalog::builtin();
        let basic = names(catalog.desktop_profiles(&ProfileContext::default()));
        assert!(!basic.contains(&"Cosmic"));
        assert!(basic.contains(&"GNOME"));

        let advanced = names(catalog.desktop_profiles(&ProfileContext::advanced()));
        assert!(advanced.contains(&"Cosmic"));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut catalog = ProfileCatalog::builtin();
        let err = catalog
            .register(Profile::new("nginx", ProfileType::ServerType))
            .unwrap_err();
        assert!(matches!(err, ProfileError::DuplicateProfile(_)));
    }

    #[test]
    fn test_instantiate_unknown() {
        let catalog = ProfileCatalog::new();
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.instantiate("GNOME"),
            Err(ProfileError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_instantiate_is_independent() {
        let catalog = ProfileCatalog::builtin();
        let mut first = catalog.instantiate("Desktop").unwrap();
        first.current_selection.push(catalog.instantiate("GNOME").unwrap());

        let second = catalog.instantiate("Desktop").unwrap();
        assert!(second.current_selection.is_empty());
        assert!(catalog.get("Desktop").unwrap().current_selection.is_empty());
    }

    #[test]
    fn test_select_builds_tree() {
        let catalog = ProfileCatalog::builtin();
        let details = vec!["KDE Plasma".to_string(), "Sway".to_string()];
        let desktop = catalog
            .select("Desktop", &details, &ProfileContext::default())
            .unwrap();
        assert_eq!(desktop.current_selection_names(), details);
    }

    #[test]
    fn test_select_rejects_wrong_child_kind() {
        let catalog = ProfileCatalog::builtin();
        let err = catalog
            .select("Server", &["GNOME".to_string()], &ProfileContext::default())
            .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidSelection(_)));
    }

    #[test]
    fn test_select_rejects_non_top_level() {
        let catalog = ProfileCatalog::builtin();
        let err = catalog
            .select("nginx", &[], &ProfileContext::default())
            .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidSelection(_)));
    }

    #[test]
    fn test_select_advanced_child_requires_context() {
        let catalog = ProfileCatalog::builtin();
        let details = vec!["Cosmic".to_string()];
        assert!(catalog
            .select("Desktop", &details, &ProfileContext::default())
            .is_err());
        assert!(catalog
            .select("Desktop", &details, &ProfileContext::advanced())
            .is_ok());
    }

    #[test]
    fn test_register_definition_becomes_custom_candidate() {
        let mut catalog = ProfileCatalog::builtin();
        let definition =
            ProfileDefinition::from_json(r#"{"name": "docker", "packages": ["docker"], "services": ["docker"]}"#)
                .unwrap();
        catalog.register_definition(definition).unwrap();

        assert!(names(catalog.custom_profiles()).contains(&"docker"));
        let custom = catalog
            .select("Custom", &["docker".to_string()], &ProfileContext::default())
            .unwrap();
        assert_eq!(custom.current_selection_names(), vec!["docker"]);
        assert!(custom.current_selection[0].custom_enabled);
    }

    #[test]
    fn test_select_leaves_non_custom_children_disabled() {
        let catalog = ProfileCatalog::builtin();
        let server = catalog
            .select("Server", &["sshd".to_string()], &ProfileContext::default())
            .unwrap();
        assert!(!server.current_selection[0].custom_enabled);
    }
}
