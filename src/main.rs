//! Zonekit CLI
//!
//! Usage:
//!   zonekit [-v...] <COMMAND>
//!
//! Commands:
//!   resolve   Resolve the variation for a rendering context
//!   palette   List the component types offered in a zone
//!   check     Load a theme file and report its contents

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use zonekit::logging::{init_logging, LogConfig, LogFormat};
use zonekit::{ThemeEngine, VariationContext, ZoneEditOptions, ZoneTypeId};

#[derive(Parser)]
#[command(name = "zonekit")]
#[command(about = "Theme zones, components and variation resolution")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Single-line log output
    #[arg(long, global = true)]
    compact: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    /// Include the module path in log lines
    #[arg(long, global = true)]
    log_target: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the variation for a rendering context
    Resolve {
        #[command(flatten)]
        target: Target,

        /// Narrow the context to one component type
        #[arg(long)]
        component_type: Option<String>,

        /// List every eligible variation, best first
        #[arg(long)]
        all: bool,
    },
    /// List the component types offered in a zone and their variations
    Palette {
        #[command(flatten)]
        target: Target,
    },
    /// Load a theme file and report its contents
    Check {
        /// Theme file (TOML format)
        theme: PathBuf,
    },
}

#[derive(Args)]
struct Target {
    /// Theme file (TOML format)
    theme: PathBuf,

    #[arg(long)]
    content_type: String,

    #[arg(long)]
    template_type: String,

    #[arg(long)]
    zone_type: String,
}

impl Target {
    fn options(&self, engine: &ThemeEngine) -> ZoneEditOptions {
        ZoneEditOptions::new(
            engine.catalog().id.clone(),
            self.content_type.as_str(),
            self.template_type.as_str(),
        )
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&log_config(&cli)) {
        eprintln!("Error initializing logging: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Command::Resolve {
            target,
            component_type,
            all,
        } => run_resolve(&target, component_type.as_deref(), all),
        Command::Palette { target } => run_palette(&target),
        Command::Check { theme } => run_check(&theme),
    }
}

fn log_config(cli: &Cli) -> LogConfig {
    let format = if cli.compact {
        LogFormat::Compact
    } else {
        LogFormat::Pretty
    };
    LogConfig::from_verbosity(cli.verbose)
        .with_format(format)
        .with_ansi(!cli.no_color)
        .with_target(cli.log_target)
}

fn load(path: &Path) -> ThemeEngine {
    match ThemeEngine::from_file(path) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error loading theme '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn run_resolve(target: &Target, component_type: Option<&str>, all: bool) {
    let engine = load(&target.theme);

    let mut mapping = target
        .options(&engine)
        .context_mapping(&ZoneTypeId::new(target.zone_type.as_str()));
    if let Some(component_type) = component_type {
        mapping.insert(
            "component_type".to_string(),
            toml::Value::String(component_type.to_string()),
        );
    }
    let context = match VariationContext::denormalize(&mapping) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if all {
        let candidates = engine.resolver().candidates(&context);
        if candidates.is_empty() {
            eprintln!("Error: no variation matches context {}", context);
            std::process::exit(1);
        }
        for variation in candidates {
            println!(
                "#{} {} exact={} template={}",
                variation.index,
                variation.name.as_deref().unwrap_or("-"),
                variation.specificity.exact,
                variation.template().unwrap_or("-")
            );
        }
        return;
    }

    match engine.resolve(&context) {
        Ok(variation) => {
            println!(
                "#{} {} template={}",
                variation.index,
                variation.name.as_deref().unwrap_or("-"),
                variation.template().unwrap_or("-")
            );
            for (key, value) in &variation.payload.options {
                println!("  {} = {}", key, value);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_palette(target: &Target) {
    let engine = load(&target.theme);
    let zone_type = ZoneTypeId::new(target.zone_type.as_str());

    let session = match engine.open_zone(&zone_type, &target.options(&engine)) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let view = session.view();
    println!("{} ({})", view.zone_name, view.zone_type_id);
    if !session.can_add_components() {
        println!("  no component can be added");
        return;
    }
    for entry in session.palette() {
        println!(
            "  {} [{}] template={}",
            entry.component_type.name,
            entry.component_type.id,
            entry.variation.template().unwrap_or("-")
        );
    }
}

fn run_check(path: &Path) {
    let engine = load(path);
    let catalog = engine.catalog();

    println!("theme {} ({})", catalog.name, catalog.id);
    for zone_type in catalog.zone_types() {
        let allowed: Vec<&str> = zone_type
            .allowed_component_types()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        println!("  zone {}: {}", zone_type.id, allowed.join(", "));
    }
    println!("  {} variation(s)", engine.resolver().registry().len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_flags() {
        let cli = Cli::try_parse_from([
            "zonekit",
            "-vv",
            "--no-color",
            "--log-target",
            "check",
            "theme.toml",
        ])
        .expect("Should parse");
        let config = log_config(&cli);
        assert_eq!(config.level, tracing::Level::DEBUG);
        assert!(!config.with_ansi);
        assert!(config.with_target);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_default_log_flags() {
        let cli = Cli::try_parse_from(["zonekit", "check", "theme.toml", "--compact"])
            .expect("Should parse");
        let config = log_config(&cli);
        assert!(config.with_ansi);
        assert!(!config.with_target);
        assert_eq!(config.format, LogFormat::Compact);
    }
}
