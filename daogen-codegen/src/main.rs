//! CLI entry point for daogen-codegen

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use daogen_codegen::config::CodegenConfig;
use daogen_codegen::model::{extract_interface, ignored_methods, DeclarationSet, QueryIntent};

#[derive(Parser)]
#[command(name = "daogen-codegen")]
#[command(about = "Generate DAO trait implementations from declarative interface models")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the declaration file (overrides config)
    #[arg(short, long)]
    declarations: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    /// Exit with an error if any diagnostics were reported
    #[arg(long)]
    deny_diagnostics: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate DAO implementations
    Generate,
    /// Inspect declarations (show extracted interfaces for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(declarations) = cli.declarations {
        config.declarations_file = declarations;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.validate()?;

    if let Some(Commands::Inspect) = cli.command {
        return inspect_declarations(&config);
    }

    info!(
        "Generating DAO implementations from: {:?}",
        config.declarations_file
    );
    let summary = daogen_codegen::generate(&config)?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for file in &summary.files {
            println!("  {}", file.display());
        }
    }
    for diagnostic in &summary.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
    for interface in &summary.skipped_interfaces {
        eprintln!("skipped: {}", interface);
    }

    if cli.deny_diagnostics && summary.has_diagnostics() {
        bail!(
            "{} diagnostic(s) reported and --deny-diagnostics is set",
            summary.diagnostics.len()
        );
    }

    info!("Code generation completed successfully");
    Ok(())
}

fn inspect_declarations(config: &CodegenConfig) -> Result<()> {
    let declarations = DeclarationSet::from_file(&config.declarations_file)?;

    println!("Parsed {} entities:\n", declarations.entities.len());
    for entity in &declarations.entities {
        println!("Entity: {} (table {})", entity.name, entity.table_name());
        for field in &entity.fields {
            let mut accessors = Vec::new();
            if let Some(getter) = &field.accessors.getter {
                accessors.push(format!("get {}()", getter));
            }
            if let Some(setter) = &field.accessors.setter {
                accessors.push(format!("set {}()", setter));
            }
            println!(
                "    - {}: {} -> {}{}",
                field.name,
                field.ty,
                field.column_name(),
                if accessors.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", accessors.join(", "))
                }
            );
        }
        println!();
    }

    println!("Parsed {} interfaces:\n", declarations.interfaces.len());
    for raw in &declarations.interfaces {
        let interface = extract_interface(raw);
        println!("Interface: {}", interface.qualified_name());
        for method in &interface.methods {
            let intent = match &method.intent {
                QueryIntent::Persist { entity } => match entity {
                    Some(entity) => format!("persist {}", entity),
                    None => "persist".to_string(),
                },
                QueryIntent::AdHocQuery {
                    query_text,
                    result_shape,
                } => match result_shape {
                    Some(shape) => format!("query {:?} -> {}", query_text, shape),
                    None => format!("query {:?}", query_text),
                },
            };
            println!("    - {} -> {}: {}", method.name, method.return_type, intent);
            if !method.conflicting_markers.is_empty() {
                println!(
                    "      also marked: {}",
                    method.conflicting_markers.join(", ")
                );
            }
        }
        let ignored = ignored_methods(raw);
        if !ignored.is_empty() {
            println!("  Ignored: {}", ignored.join(", "));
        }
        println!();
    }

    Ok(())
}
