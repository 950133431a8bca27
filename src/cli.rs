use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProfileContext;

/// archprofile - Browse, select and resolve Arch Linux installer profiles
#[derive(Parser, Debug)]
#[command(name = "archprofile")]
#[command(about = "Inspect installer profiles and resolve selections into packages and services")]
#[command(version)]
pub struct Cli {
    /// Advanced mode: show profiles and greeters that are hidden by default.
    #[arg(long, global = true)]
    pub advanced: bool,

    /// Extra profile definition files (JSON) to add to the catalog
    #[arg(long = "definition", global = true, value_name = "FILE")]
    pub definitions: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List profiles available for selection
    List {
        /// Only list profiles that can be selected under this top level profile
        #[arg(short, long)]
        under: Option<String>,
    },
    /// Show the preview text of a profile
    Show {
        /// Profile name (e.g., "KDE Plasma")
        name: String,
    },
    /// List the available greeters
    Greeters,
    /// Resolve a saved profile configuration into packages and services
    Resolve {
        /// Path to the profile configuration file
        config: PathBuf,
    },
    /// Write a profile configuration file
    Save {
        /// Top level profile name
        #[arg(short, long)]
        main: String,
        /// Profiles selected under the top level profile
        #[arg(short, long)]
        details: Vec<String>,
        /// Greeter to install (e.g., sddm)
        #[arg(short, long)]
        greeter: Option<String>,
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Visibility context derived from the arguments
    pub fn context(&self) -> ProfileContext {
        ProfileContext::from_flag(self.advanced)
    }
}
