//! Built-in profile definitions and their behaviour.
//!
//! Package lists are kept in Rust so they are checked by tests and can be
//! updated in one place. Greeters are not part of desktop package lists: the
//! greeter is installed from the user's [`GreeterType`] choice.

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{CustomSettings, Profile, ProfileHooks};
use crate::error::Result;
use crate::installer::InstallSession;
use crate::types::{GreeterType, ProfileType, SelectResult};

// ============================================================================
// Hooks
// ============================================================================

/// Queue the profile's own packages and enable its own services.
///
/// Used by server roles and applications.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceHooks;

impl ProfileHooks for ServiceHooks {
    fn install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        session.add_additional_packages(profile.packages())?;
        session.enable_service(profile.services())
    }
}

/// Server top level profile: installs every selected server role.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerHooks;

impl ProfileHooks for ServerHooks {
    fn install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        for role in &profile.current_selection {
            info!("Installing server role {}", role.name());
            role.install(session)?;
        }
        Ok(())
    }

    fn post_install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        for role in &profile.current_selection {
            role.post_install(session)?;
        }
        Ok(())
    }

    fn preview_text(&self, profile: &Profile) -> Option<String> {
        profile.packages_text(true)
    }
}

/// Desktop top level profile: common desktop tooling plus the selected
/// environments.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopHooks;

impl ProfileHooks for DesktopHooks {
    fn install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        for environment in &profile.current_selection {
            info!("Installing desktop profile {}", environment.name());
            session.add_additional_packages(environment.packages())?;
            session.enable_service(environment.services())?;
            environment.install(session)?;
        }
        Ok(())
    }

    fn post_install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        for environment in &profile.current_selection {
            environment.post_install(session)?;
        }
        Ok(())
    }

    /// An emptied sub-selection means the user backed out of the desktop choice.
    fn do_on_select(&self, profile: &Profile) -> SelectResult {
        if profile.current_selection.is_empty() {
            SelectResult::ResetCurrent
        } else {
            SelectResult::NewSelection
        }
    }

    fn preview_text(&self, profile: &Profile) -> Option<String> {
        profile.packages_text(true)
    }

    fn default_greeter_type(&self, profile: &Profile) -> Option<GreeterType> {
        profile
            .current_selection
            .iter()
            .find_map(|environment| environment.default_greeter_type())
    }
}

/// A desktop environment or window manager with a preferred greeter.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentHooks {
    pub greeter: GreeterType,
}

impl ProfileHooks for EnvironmentHooks {
    fn default_greeter_type(&self, _profile: &Profile) -> Option<GreeterType> {
        Some(self.greeter)
    }
}

/// Key under which wayland compositors store their seat provider.
pub const SEAT_ACCESS_KEY: &str = "seat_access";

/// How a wayland compositor gains access to the seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAccess {
    Polkit,
    Seatd,
}

impl SeatAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polkit => "polkit",
            Self::Seatd => "seatd",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "polkit" => Some(Self::Polkit),
            "seatd" => Some(Self::Seatd),
            _ => None,
        }
    }

    fn from_settings(settings: &CustomSettings) -> Option<Self> {
        settings
            .get(SEAT_ACCESS_KEY)
            .and_then(Value::as_str)
            .and_then(Self::parse)
    }
}

/// Wayland compositors that need a seat provider (Hyprland, Sway).
#[derive(Debug, Clone, Copy)]
pub struct CompositorHooks {
    pub greeter: GreeterType,
}

impl ProfileHooks for CompositorHooks {
    fn install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        let seat = SeatAccess::from_settings(profile.custom_settings()).unwrap_or(SeatAccess::Polkit);
        session.add_additional_packages(&[seat.as_str().to_string()])?;
        if seat == SeatAccess::Seatd {
            session.enable_service(&["seatd".to_string()])?;
        }
        Ok(())
    }

    fn json(&self, profile: &Profile) -> CustomSettings {
        let mut json = Map::new();
        if let Some(seat) = SeatAccess::from_settings(profile.custom_settings()) {
            json.insert(SEAT_ACCESS_KEY.to_string(), Value::from(seat.as_str()));
        }
        json
    }

    /// Drops a `seat_access` value that is not a known seat provider.
    fn set_custom_settings(&self, profile: &mut Profile, mut settings: CustomSettings) {
        if let Some(value) = settings.get(SEAT_ACCESS_KEY) {
            if value.as_str().and_then(SeatAccess::parse).is_none() {
                warn!(
                    "Ignoring invalid seat access {} for {}",
                    value,
                    profile.name()
                );
                settings.remove(SEAT_ACCESS_KEY);
            }
        }
        profile.replace_custom_settings(settings);
    }

    fn preview_text(&self, profile: &Profile) -> Option<String> {
        let seat = SeatAccess::from_settings(profile.custom_settings()).unwrap_or(SeatAccess::Polkit);
        let packages = profile.packages_text(false).unwrap_or_default();
        Some(format!("{}\nSeat access: {}\n", packages, seat.as_str()))
    }

    fn default_greeter_type(&self, _profile: &Profile) -> Option<GreeterType> {
        Some(self.greeter)
    }
}

/// Custom top level profile: installs every selected entry that is enabled.
///
/// The enabled set is persisted through `custom_enabled`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomHooks;

impl ProfileHooks for CustomHooks {
    fn install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        for entry in profile.enabled_selection() {
            info!("Installing custom profile {}", entry.name());
            entry.install(session)?;
        }
        Ok(())
    }

    fn post_install(&self, profile: &Profile, session: &mut dyn InstallSession) -> Result<()> {
        for entry in profile.enabled_selection() {
            entry.post_install(session)?;
        }
        Ok(())
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Packages every desktop installation gets.
pub const DESKTOP_PACKAGES: &[&str] = &[
    "nano",
    "vim",
    "openssh",
    "htop",
    "wget",
    "iwd",
    "wireless_tools",
    "wpa_supplicant",
    "smartmontools",
    "xdg-utils",
];

/// Top level profiles in listing order.
pub fn top_level_profiles() -> Vec<Profile> {
    vec![
        Profile::new("Minimal", ProfileType::Minimal)
            .with_description("Minimal system without GUI"),
        Profile::new("Desktop", ProfileType::Desktop)
            .with_description("Graphical desktop environment or window manager")
            .with_packages(DESKTOP_PACKAGES.iter().copied())
            .with_gfx_driver(true)
            .with_greeter(true)
            .with_hooks(DesktopHooks),
        Profile::new("Server", ProfileType::Server)
            .with_description("Headless server roles")
            .with_hooks(ServerHooks),
        Profile::new("Xorg", ProfileType::Xorg)
            .with_description("Installs a minimal X server without a desktop")
            .with_packages(["xorg-server"])
            .with_gfx_driver(true),
        Profile::new("Custom", ProfileType::Custom)
            .with_description("User supplied profiles and applications")
            .with_hooks(CustomHooks),
    ]
}

/// Server roles selectable under the Server profile.
pub fn server_profiles() -> Vec<Profile> {
    let role = |name: &str, description: &str, packages: &[&str], services: &[&str]| {
        Profile::new(name, ProfileType::ServerType)
            .with_description(description)
            .with_packages(packages.iter().copied())
            .with_services(services.iter().copied())
            .with_hooks(ServiceHooks)
    };

    vec![
        role("sshd", "OpenSSH server", &["openssh"], &["sshd"]),
        role("nginx", "Nginx web server", &["nginx"], &["nginx"]),
        role("httpd", "Apache HTTP server", &["apache"], &["httpd"]),
        role("lighttpd", "Lighttpd web server", &["lighttpd"], &["lighttpd"]),
        role("mariadb", "MariaDB database server", &["mariadb"], &["mariadb"]),
        role(
            "postgresql",
            "PostgreSQL database server",
            &["postgresql"],
            &["postgresql"],
        ),
        role(
            "cockpit",
            "Web based server administration",
            &["cockpit", "udisks2", "packagekit"],
            &["cockpit.socket"],
        ),
    ]
}

/// Desktop environments and window managers selectable under Desktop.
pub fn desktop_profiles() -> Vec<Profile> {
    let environment = |name: &str, kind: ProfileType, packages: &[&str]| {
        Profile::new(name, kind)
            .with_packages(packages.iter().copied())
            .with_gfx_driver(true)
            .with_greeter(true)
    };

    vec![
        environment(
            "GNOME",
            ProfileType::DesktopEnv,
            &["gnome", "gnome-tweaks", "gnome-terminal", "firefox", "file-roller"],
        )
        .with_description("GNOME desktop environment")
        .with_hooks(EnvironmentHooks {
            greeter: GreeterType::Gdm,
        }),
        environment(
            "KDE Plasma",
            ProfileType::DesktopEnv,
            &["plasma-meta", "konsole", "kate", "dolphin", "ark", "plasma-workspace"],
        )
        .with_description("KDE Plasma desktop")
        .with_hooks(EnvironmentHooks {
            greeter: GreeterType::Sddm,
        }),
        environment(
            "Xfce4",
            ProfileType::DesktopEnv,
            &["xfce4", "xfce4-goodies", "pavucontrol", "gvfs", "xarchiver"],
        )
        .with_description("XFCE desktop environment (lightweight)")
        .with_hooks(EnvironmentHooks {
            greeter: GreeterType::Lightdm,
        }),
        environment("Cosmic", ProfileType::DesktopEnv, &["cosmic", "xdg-user-dirs"])
            .with_description("COSMIC desktop environment")
            .with_advanced(true)
            .with_hooks(EnvironmentHooks {
                greeter: GreeterType::CosmicSession,
            }),
        environment(
            "Hyprland",
            ProfileType::WindowMgr,
            &[
                "hyprland",
                "dunst",
                "kitty",
                "wofi",
                "dolphin",
                "xdg-desktop-portal-hyprland",
                "qt5-wayland",
                "qt6-wayland",
                "polkit-kde-agent",
                "grim",
                "slurp",
            ],
        )
        .with_description("Hyprland Wayland compositor (tiling)")
        .with_hooks(CompositorHooks {
            greeter: GreeterType::Sddm,
        }),
        environment(
            "Sway",
            ProfileType::WindowMgr,
            &[
                "sway",
                "swaybg",
                "swaylock",
                "swayidle",
                "waybar",
                "wofi",
                "foot",
                "mako",
                "grim",
                "slurp",
                "wl-clipboard",
                "xorg-xwayland",
            ],
        )
        .with_description("Sway Wayland compositor (i3-compatible)")
        .with_hooks(CompositorHooks {
            greeter: GreeterType::Sddm,
        }),
        environment(
            "i3-wm",
            ProfileType::WindowMgr,
            &["i3-wm", "i3lock", "i3status", "i3blocks", "xss-lock", "xterm", "dmenu"],
        )
        .with_description("i3 window manager (X11 tiling)")
        .with_hooks(EnvironmentHooks {
            greeter: GreeterType::Lightdm,
        }),
    ]
}

/// Every built-in profile.
pub fn all_profiles() -> Vec<Profile> {
    let mut profiles = top_level_profiles();
    profiles.extend(server_profiles());
    profiles.extend(desktop_profiles());
    profiles
}

// ============================================================================
// Tests
// ============================================================================
