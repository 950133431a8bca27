//! Closed taxonomies used by the profile model
//!
//! Profile kinds, login greeters and the outcome of a selection event are all
//! plain enums, so matching on them stays exhaustive and typos in persisted
//! configuration fail at parse time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::config::ProfileContext;

/// Classification of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum ProfileType {
    // Top level profiles
    #[strum(serialize = "Server")]
    Server,
    #[strum(serialize = "Desktop")]
    Desktop,
    #[strum(serialize = "Xorg")]
    Xorg,
    #[strum(serialize = "Minimal")]
    Minimal,
    #[strum(serialize = "Custom")]
    Custom,

    // Detailed selections under a top level profile
    #[strum(serialize = "ServerType")]
    ServerType,
    #[serde(rename = "Window Manager")]
    #[strum(serialize = "Window Manager")]
    WindowMgr,
    #[serde(rename = "Desktop Environment")]
    #[strum(serialize = "Desktop Environment")]
    DesktopEnv,
    #[strum(serialize = "CustomType")]
    CustomType,

    // Special kinds
    #[strum(serialize = "Tailored")]
    Tailored,
    #[strum(serialize = "Application")]
    Application,
}

impl ProfileType {
    /// Check if this type is one of the primary installation categories
    pub fn is_top_level(&self) -> bool {
        matches!(
            self,
            Self::Server | Self::Desktop | Self::Xorg | Self::Minimal | Self::Custom
        )
    }
}

/// Login greeter (display manager) choices
///
/// `CosmicSession` is always part of the type but only listed by
/// [`GreeterType::available`] when advanced mode is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum GreeterType {
    #[serde(rename = "lightdm-gtk-greeter")]
    #[strum(serialize = "lightdm-gtk-greeter")]
    Lightdm,
    #[serde(rename = "lightdm-slick-greeter")]
    #[strum(serialize = "lightdm-slick-greeter")]
    LightdmSlick,
    #[serde(rename = "sddm")]
    #[strum(serialize = "sddm")]
    Sddm,
    #[serde(rename = "gdm")]
    #[strum(serialize = "gdm")]
    Gdm,
    #[serde(rename = "ly")]
    #[strum(serialize = "ly")]
    Ly,
    #[serde(rename = "cosmic-greeter")]
    #[strum(serialize = "cosmic-greeter")]
    CosmicSession,
}

impl GreeterType {
    /// Check if this greeter is hidden unless advanced mode is enabled
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::CosmicSession)
    }

    /// List the greeters visible in the given context
    pub fn available(ctx: &ProfileContext) -> Vec<GreeterType> {
        Self::iter()
            .filter(|greeter| !greeter.is_advanced() || ctx.advanced)
            .collect()
    }

    /// Packages that provide this greeter
    pub fn packages(&self) -> &'static [&'static str] {
        match self {
            Self::Lightdm => &["lightdm", "lightdm-gtk-greeter"],
            Self::LightdmSlick => &["lightdm", "lightdm-slick-greeter"],
            Self::Sddm => &["sddm"],
            Self::Gdm => &["gdm"],
            Self::Ly => &["ly"],
            Self::CosmicSession => &["cosmic-greeter"],
        }
    }

    /// The systemd unit to enable for this greeter
    pub fn service(&self) -> &'static str {
        match self {
            Self::Lightdm | Self::LightdmSlick => "lightdm",
            Self::Sddm => "sddm",
            Self::Gdm => "gdm",
            Self::Ly => "ly",
            Self::CosmicSession => "cosmic-greeter",
        }
    }
}

/// Outcome of a "profile was chosen" event
///
/// The selection driver branches on this to decide whether to replace,
/// keep, or clear the current choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SelectResult {
    NewSelection,
    SameSelection,
    ResetCurrent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_profile_type_display() {
        assert_eq!(ProfileType::WindowMgr.to_string(), "Window Manager");
        assert_eq!(ProfileType::DesktopEnv.to_string(), "Desktop Environment");
        assert_eq!(ProfileType::Server.to_string(), "Server");
    }

    #[test]
    fn test_profile_type_parsing() {
        assert_eq!(
            ProfileType::from_str("Window Manager").unwrap(),
            ProfileType::WindowMgr
        );
        assert_eq!(ProfileType::from_str("Tailored").unwrap(), ProfileType::Tailored);
        assert!(ProfileType::from_str("WindowMgr").is_err());
    }

    #[test]
    fn test_top_level_types() {
        let top_level: Vec<ProfileType> =
            ProfileType::iter().filter(|t| t.is_top_level()).collect();
        assert_eq!(
            top_level,
            vec![
                ProfileType::Server,
                ProfileType::Desktop,
                ProfileType::Xorg,
                ProfileType::Minimal,
                ProfileType::Custom,
            ]
        );
    }

    #[test]
    fn test_greeter_serialization() {
        assert_eq!(GreeterType::Lightdm.to_string(), "lightdm-gtk-greeter");
        let json = serde_json::to_string(&GreeterType::CosmicSession).unwrap();
        assert_eq!(json, "\"cosmic-greeter\"");
        let parsed: GreeterType = serde_json::from_str("\"sddm\"").unwrap();
        assert_eq!(parsed, GreeterType::Sddm);
    }

    #[test]
    fn test_greeter_availability() {
        let basic = GreeterType::available(&ProfileContext::default());
        assert_eq!(basic.len(), 5);
        assert!(!basic.contains(&GreeterType::CosmicSession));

        let advanced = GreeterType::available(&ProfileContext::advanced());
        assert_eq!(advanced.len(), 6);
        assert!(advanced.contains(&GreeterType::CosmicSession));
    }

    #[test]
    fn test_greeter_packages_include_service_provider() {
        assert_eq!(GreeterType::LightdmSlick.service(), "lightdm");
        assert!(GreeterType::LightdmSlick.packages().contains(&"lightdm"));
        for greeter in GreeterType::iter() {
            assert!(!greeter.packages().is_empty());
        }
    }

    #[test]
    fn test_profile_type_serde() {
        let json = serde_json::to_string(&ProfileType::DesktopEnv).unwrap();
        assert_eq!(json, "\"Desktop Environment\"");
        let parsed: ProfileType = serde_json::from_str("\"Application\"").unwrap();
        assert_eq!(parsed, ProfileType::Application);
    }
}
