//! Package & Service Resolver
//!
//! Flattens a selection tree into the concrete package and systemd unit names
//! it contributes.
//!
//! # Design
//!
//! - **One level deep**: a top level profile plus its directly selected children
//! - **Matches installation**: disabled `Custom` entries contribute nothing
//! - **Deduplication**: Output is deduplicated and sorted for deterministic results
//! - **Pure logic**: Only resolves names; no I/O and no side effects
//!
//! # Resolution Rules
//!
//! | Source               | Resolved To |
//! |----------------------|-------------|
//! | Top level profile    | Its own packages and services |
//! | Selected children    | Their packages and services, if enabled |
//! | Greeter (if chosen)  | Greeter packages and unit, only when supported |

use crate::package_utils::sorted_unique;
use crate::profiles::Profile;
use crate::types::GreeterType;

// ============================================================================
// Package Resolution
// ============================================================================

/// Resolve all packages a selection tree contributes.
///
/// The greeter is only included when the profile supports greeters. When
/// none is given, the profile's default greeter is used.
///
/// # What This Explicitly Refuses To Do
///
/// - Run install hooks: hook-queued packages only show up in an `InstallPlan`
/// - Recurse past the direct selection
pub fn resolve_packages(profile: &Profile, greeter: Option<GreeterType>) -> Vec<String> {
    let mut packages: Vec<String> = profile.packages().to_vec();

    for child in profile.enabled_selection() {
        packages.extend_from_slice(child.packages());
    }

    if let Some(greeter) = effective_greeter(profile, greeter) {
        packages.extend(greeter.packages().iter().map(|p| p.to_string()));
    }

    sorted_unique(packages)
}

// ============================================================================
// Service Resolution
// ============================================================================

/// Resolve all systemd units a selection tree enables.
pub fn resolve_services(profile: &Profile, greeter: Option<GreeterType>) -> Vec<String> {
    let mut services: Vec<String> = profile.services().to_vec();

    for child in profile.enabled_selection() {
        services.extend_from_slice(child.services());
    }

    if let Some(greeter) = effective_greeter(profile, greeter) {
        services.push(greeter.service().to_string());
    }

    sorted_unique(services)
}

// ============================================================================
// Helpers
// ============================================================================

/// The greeter that will actually be installed for this profile, if any.
pub fn effective_greeter(profile: &Profile, greeter: Option<GreeterType>) -> Option<GreeterType> {
    if !profile.is_greeter_supported() {
        return None;
    }
    greeter.or_else(|| profile.default_greeter_type())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileContext;
    use crate::profiles::ProfileCatalog;

    fn select(main: &str, details: &[&str]) -> Profile {
        let details: Vec<String> = details.iter().map(|s| s.to_string()).collect();
        ProfileCatalog::builtin()
            .select(main, &details, &ProfileContext::default())
            .unwrap()
    }

    #[test]
    fn test_resolve_packages_desktop_with_environment() {
        let desktop = select("Desktop", &["GNOME"]);
        let packages = resolve_packages(&desktop, None);

        assert!(packages.contains(&"vim".to_string()));
        assert!(packages.contains(&"gnome".to_string()));
        // Default greeter for GNOME
        assert!(packages.contains(&"gdm".to_string()));
    }

    #[test]
    fn test_resolve_packages_explicit_greeter_wins() {
        let desktop = select("Desktop", &["GNOME"]);
        let packages = resolve_packages(&desktop, Some(GreeterType::Ly));

        assert!(packages.contains(&"ly".to_string()));
        assert!(!packages.contains(&"gdm".to_string()));
    }

    #[test]
    fn test_resolve_packages_server_ignores_greeter() {
        let server = select("Server", &["sshd"]);
        let packages = resolve_packages(&server, Some(GreeterType::Sddm));
        assert_eq!(packages, vec!["openssh"]);
    }

    #[test]
    fn test_resolve_packages_deduplicated() {
        // Hyprland and KDE Plasma both ship dolphin
        let desktop = select("Desktop", &["Hyprland", "KDE Plasma"]);
        let packages = resolve_packages(&desktop, None);

        let mut sorted = packages.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(packages, sorted, "packages list is unsorted or has duplicates");
    }

    #[test]
    fn test_resolve_services_server_roles() {
        let server = select("Server", &["nginx", "cockpit"]);
        let services = resolve_services(&server, None);
        assert_eq!(services, vec!["cockpit.socket", "nginx"]);
    }

    #[test]
    fn test_resolve_services_desktop_greeter() {
        let desktop = select("Desktop", &["KDE Plasma"]);
        let services = resolve_services(&desktop, None);
        assert_eq!(services, vec!["sddm"]);
    }

    #[test]
    fn test_resolve_minimal_is_empty() {
        let minimal = select("Minimal", &[]);
        assert!(resolve_packages(&minimal, None).is_empty());
        assert!(resolve_services(&minimal, None).is_empty());
    }

    #[test]
    fn test_resolve_skips_disabled_custom_entries() {
        let mut catalog = ProfileCatalog::builtin();
        catalog
            .register(
                Profile::new("docker", crate::types::ProfileType::Application)
                    .with_packages(["docker"])
                    .with_services(["docker"]),
            )
            .unwrap();
        let mut custom = catalog
            .select("Custom", &["docker".to_string()], &ProfileContext::default())
            .unwrap();
        assert_eq!(resolve_packages(&custom, None), vec!["docker"]);

        custom.current_selection[0].custom_enabled = false;
        assert!(resolve_packages(&custom, None).is_empty());
        assert!(resolve_services(&custom, None).is_empty());
    }

    #[test]
    fn test_effective_greeter_without_selection() {
        let desktop = select("Desktop", &[]);
        assert_eq!(effective_greeter(&desktop, None), None);
        assert_eq!(
            effective_greeter(&desktop, Some(GreeterType::Gdm)),
            Some(GreeterType::Gdm)
        );
    }
}
