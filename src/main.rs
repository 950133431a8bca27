//! archprofile - Main entry point
//!
//! Command line front end for the installer profile model.

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use archprofile::cli::{Cli, Commands};
use archprofile::config::ProfileContext;
use archprofile::config_file::ProfileConfiguration;
use archprofile::installer::{install_profile, InstallPlan};
use archprofile::logic::resolver::{effective_greeter, resolve_packages, resolve_services};
use archprofile::package_utils::format_cols;
use archprofile::profiles::{ProfileCatalog, ProfileDefinition};
use archprofile::types::GreeterType;

/// Initialize logging; `RUST_LOG` overrides the default `info` level.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse_args();
    let ctx = cli.context();
    debug!("CLI arguments parsed (advanced: {})", ctx.advanced);

    let mut catalog = ProfileCatalog::builtin();
    for path in &cli.definitions {
        let definition = ProfileDefinition::from_file(path)
            .with_context(|| format!("Failed to load profile definition {:?}", path))?;
        info!("Adding profile definition {}", definition.name);
        catalog.register_definition(definition)?;
    }

    match cli.command {
        Commands::List { under } => list_profiles(&catalog, &ctx, under.as_deref()),
        Commands::Show { name } => show_profile(&catalog, &name),
        Commands::Greeters => {
            for greeter in GreeterType::available(&ctx) {
                println!("{}", greeter);
            }
            Ok(())
        }
        Commands::Resolve { config } => {
            info!("Resolving profile configuration: {:?}", config);
            let config = ProfileConfiguration::load_from_file(&config)?;
            resolve(&catalog, &ctx, &config)
        }
        Commands::Save {
            main,
            details,
            greeter,
            output,
        } => {
            let greeter = greeter
                .map(|g| g.parse::<GreeterType>())
                .transpose()
                .context("Unknown greeter")?;
            let profile = catalog.select(&main, &details, &ctx)?;
            let config = ProfileConfiguration::from_profile(&profile, greeter);
            config.validate(&catalog, &ctx)?;
            config.save_to_file(&output)?;
            println!("✓ Profile configuration saved to {:?}", output);
            Ok(())
        }
    }
}

fn list_profiles(catalog: &ProfileCatalog, ctx: &ProfileContext, under: Option<&str>) -> Result<()> {
    let profiles = match under {
        Some(parent) => {
            let parent = catalog.instantiate(parent)?;
            catalog.candidates_for(&parent, ctx)
        }
        None => catalog.top_level_profiles(ctx),
    };

    for profile in profiles {
        println!("{:<12} {:<20} {}", profile.name(), profile.profile_type(), profile.description());
    }
    Ok(())
}

fn show_profile(catalog: &ProfileCatalog, name: &str) -> Result<()> {
    let profile = catalog.instantiate(name)?;
    println!("{} ({})", profile.name(), profile.profile_type());
    if !profile.description().is_empty() {
        println!("{}", profile.description());
    }
    match profile.preview_text() {
        Some(text) => print!("\n{}", text),
        None => println!("\nNo packages"),
    }
    Ok(())
}

fn resolve(catalog: &ProfileCatalog, ctx: &ProfileContext, config: &ProfileConfiguration) -> Result<()> {
    config.validate(catalog, ctx)?;

    let Some(profile) = config.apply(catalog, ctx)? else {
        println!("No profile selected");
        return Ok(());
    };

    let greeter = effective_greeter(&profile, config.greeter);
    let packages = resolve_packages(&profile, greeter);
    let services = resolve_services(&profile, greeter);

    let mut plan = InstallPlan::new();
    install_profile(&mut plan, &profile, greeter)?;

    println!("Profile: {} [{}]", profile.name(), profile.current_selection_names().join(", "));
    if let Some(greeter) = greeter {
        println!("Greeter: {}", greeter);
    }
    if profile.is_graphic_driver_supported() {
        let driver = config.gfx_driver.as_deref().unwrap_or("not selected");
        println!("Graphics driver: {}", driver);
    }
    println!("\nPackages:\n{}", format_cols(&packages));
    println!("Services:\n{}", format_cols(&services));

    println!("Install actions (dry run):");
    for action in plan.actions() {
        println!("  {}", action);
    }
    Ok(())
}
