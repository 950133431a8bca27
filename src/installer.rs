//! Installer session seam
//!
//! Profiles never touch the target system directly. They queue work on an
//! [`InstallSession`], which the real installer implements by driving
//! pacstrap and systemctl. [`InstallPlan`] is the in-memory implementation
//! used for dry runs and tests: it records every queued package and service.

use std::fmt;

use tracing::{debug, info};

use crate::error::Result;
use crate::logic::resolver::effective_greeter;
use crate::profiles::Profile;
use crate::types::GreeterType;

/// Operations a profile may perform against the installation in progress.
pub trait InstallSession {
    /// Queue packages for installation on the target system.
    fn add_additional_packages(&mut self, packages: &[String]) -> Result<()>;

    /// Enable systemd units on the target system.
    fn enable_service(&mut self, services: &[String]) -> Result<()>;
}

/// A single recorded session action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallAction {
    /// Packages queued in one call
    AddPackages(Vec<String>),
    /// Services enabled in one call
    EnableServices(Vec<String>),
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddPackages(packages) => write!(f, "install {}", packages.join(" ")),
            Self::EnableServices(services) => write!(f, "enable {}", services.join(" ")),
        }
    }
}

/// Records session actions instead of executing them.
///
/// Packages and services are kept in first-queued order without duplicates.
#[derive(Debug, Clone, Default)]
pub struct InstallPlan {
    actions: Vec<InstallAction>,
    packages: Vec<String>,
    services: Vec<String>,
}

impl InstallPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made against this session, in order.
    pub fn actions(&self) -> &[InstallAction] {
        &self.actions
    }

    /// Unique packages in the order they were first queued.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Unique services in the order they were first enabled.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    fn push_unique(target: &mut Vec<String>, items: &[String]) {
        for item in items {
            if !target.contains(item) {
                target.push(item.clone());
            }
        }
    }
}

impl InstallSession for InstallPlan {
    fn add_additional_packages(&mut self, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        debug!("Queueing packages: {}", packages.join(" "));
        Self::push_unique(&mut self.packages, packages);
        self.actions.push(InstallAction::AddPackages(packages.to_vec()));
        Ok(())
    }

    fn enable_service(&mut self, services: &[String]) -> Result<()> {
        if services.is_empty() {
            return Ok(());
        }
        debug!("Enabling services: {}", services.join(" "));
        Self::push_unique(&mut self.services, services);
        self.actions.push(InstallAction::EnableServices(services.to_vec()));
        Ok(())
    }
}

/// Queue the packages and service of a greeter.
pub fn install_greeter(session: &mut dyn InstallSession, greeter: GreeterType) -> Result<()> {
    info!("Installing greeter: {}", greeter);
    let packages: Vec<String> = greeter.packages().iter().map(|p| p.to_string()).collect();
    session.add_additional_packages(&packages)?;
    session.enable_service(&[greeter.service().to_string()])
}

/// Run a selected top level profile against a session.
///
/// Order: the profile's own packages and services, its `install` hook, the
/// greeter (when the profile supports one), then `post_install`. Hooks of top
/// level profiles only handle their selection.
pub fn install_profile(
    session: &mut dyn InstallSession,
    profile: &Profile,
    greeter: Option<GreeterType>,
) -> Result<()> {
    info!(
        "Installing profile {} (selection: [{}])",
        profile.name(),
        profile.current_selection_names().join(", ")
    );

    session.add_additional_packages(profile.packages())?;
    session.enable_service(profile.services())?;
    profile.install(session)?;

    if let Some(greeter) = effective_greeter(profile, greeter) {
        install_greeter(session, greeter)?;
    }

    profile.post_install(session)?;
    info!("Profile {} installed", profile.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_records_actions_in_order() {
        let mut plan = InstallPlan::new();
        plan.add_additional_packages(&strings(&["nginx"])).unwrap();
        plan.enable_service(&strings(&["nginx"])).unwrap();

        assert_eq!(
            plan.actions(),
            &[
                InstallAction::AddPackages(strings(&["nginx"])),
                InstallAction::EnableServices(strings(&["nginx"])),
            ]
        );
    }

    #[test]
    fn test_plan_deduplicates_keeping_first_order() {
        let mut plan = InstallPlan::new();
        plan.add_additional_packages(&strings(&["vim", "git"])).unwrap();
        plan.add_additional_packages(&strings(&["git", "htop"])).unwrap();
        assert_eq!(plan.packages(), &strings(&["vim", "git", "htop"])[..]);
        assert_eq!(plan.actions().len(), 2);
    }

    #[test]
    fn test_plan_skips_empty_calls() {
        let mut plan = InstallPlan::new();
        plan.add_additional_packages(&[]).unwrap();
        plan.enable_service(&[]).unwrap();
        assert!(plan.actions().is_empty());
    }

    #[test]
    fn test_install_greeter() {
        let mut plan = InstallPlan::new();
        install_greeter(&mut plan, GreeterType::Lightdm).unwrap();
        assert_eq!(plan.packages(), &strings(&["lightdm", "lightdm-gtk-greeter"])[..]);
        assert_eq!(plan.services(), &strings(&["lightdm"])[..]);
    }

    #[test]
    fn test_install_profile_queues_own_packages_first() {
        let xorg = Profile::new("Xorg", crate::types::ProfileType::Xorg)
            .with_packages(["xorg-server"])
            .with_services(["xdm"]);

        let mut plan = InstallPlan::new();
        install_profile(&mut plan, &xorg, None).unwrap();
        assert_eq!(
            plan.actions(),
            &[
                InstallAction::AddPackages(strings(&["xorg-server"])),
                InstallAction::EnableServices(strings(&["xdm"])),
            ]
        );
    }

    #[test]
    fn test_action_display() {
        let action = InstallAction::AddPackages(strings(&["sway", "foot"]));
        assert_eq!(action.to_string(), "install sway foot");
    }
}
