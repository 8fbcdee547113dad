//! rulec: CLI for compiling filter lists from a configuration file.

use clap::{Parser, Subcommand};
use rulec::{compile_to_file, read_configuration, CompiledPlan, ConfigFormat, DefaultFetcher};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulec")]
#[command(version = "0.1.0")]
#[command(about = "Compile filter lists for DNS-level blockers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a configuration into an output rule list
    Compile {
        /// Input configuration file (JSON, YAML or TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Output rule list file
        #[arg(short, long)]
        output: PathBuf,

        /// Configuration format override (json, yaml, toml)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Validate a configuration without fetching any source
    Validate {
        /// Input configuration file (JSON, YAML or TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Configuration format override (json, yaml, toml)
        #[arg(short, long)]
        format: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            config,
            output,
            format,
        } => {
            if let Err(e) = run_compile(&config, &output, format.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { config, format } => {
            if let Err(e) = run_validate(&config, format.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_format(format: Option<&str>) -> Result<Option<ConfigFormat>, Box<dyn std::error::Error>> {
    match format {
        None => Ok(None),
        Some(s) => match ConfigFormat::parse(s) {
            Some(f) => Ok(Some(f)),
            None => Err(format!("unknown configuration format: {}", s).into()),
        },
    }
}

fn run_compile(
    config_path: &PathBuf,
    output: &PathBuf,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = parse_format(format)?;
    let config = read_configuration(config_path, format)?;

    let result = compile_to_file(&config, &DefaultFetcher, output)?;
    if !result.success {
        return Err(result
            .error_message
            .unwrap_or_else(|| "compilation failed".to_string())
            .into());
    }

    println!(
        "Compiled {} rules -> {} ({} ms)",
        result.rule_count,
        output.display(),
        result.elapsed_ms
    );
    println!("SHA-384: {}", result.hash);
    Ok(())
}

fn run_validate(
    config_path: &PathBuf,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = parse_format(format)?;
    let config = read_configuration(config_path, format)?;

    let plan = CompiledPlan::new(config)?;
    println!("Configuration OK: {} sources", plan.source_count());
    Ok(())
}
