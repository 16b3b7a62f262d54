//! crysgen command-line interface.
//!
//! ```sh
//! crysgen build recipe.json -o structure.json
//! crysgen elements
//! crysgen init-config
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use crysgen::config::Config;
use crysgen::model::ELEMENTS;
use crysgen::recipe::Recipe;
use crysgen::utils::{logger, report};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crysgen")]
#[command(about = "Build explicit crystal structures from lattice parameters and a motif")]
#[command(version)]
struct Cli {
    /// Log debug output (overrides the configured level).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a crystal from a JSON recipe and print a summary.
    Build {
        /// Path to the recipe file.
        recipe: PathBuf,
        /// Write the generated structure as JSON to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the element table.
    Elements,
    /// Write the default configuration file.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Installed before the config is read so its warnings are not lost
    let startup = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    logger::init(startup).map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;

    let config = Config::load();
    if !cli.verbose {
        logger::set_level(logger::parse_level(&config.log_level));
    }

    match cli.command {
        Commands::Build { recipe, output } => {
            let text = fs::read_to_string(&recipe)
                .with_context(|| format!("reading recipe {}", recipe.display()))?;
            let recipe_data = Recipe::from_json(&text)
                .with_context(|| format!("parsing recipe {}", recipe.display()))?;

            let structure = recipe_data
                .build(&config)
                .with_context(|| format!("building {}", recipe_data.title()))?;

            print!(
                "{}",
                report::structure_summary(&structure, &recipe_data.title(), config.summary_atoms)
            );

            if let Some(out) = output {
                fs::write(&out, structure.to_json()?)
                    .with_context(|| format!("writing {}", out.display()))?;
                log::info!("Structure written to {}", out.display());
            }
            Ok(())
        }
        Commands::Elements => {
            println!("{:<4} {:<8} {}", "Z", "Symbol", "Name");
            for e in ELEMENTS.iter() {
                println!("{:<4} {:<8} {}", e.number, e.symbol, e.name);
            }
            Ok(())
        }
        Commands::InitConfig => {
            let path = Config::default()
                .save()
                .context("writing default config")?;
            println!("Config saved to {}", path.display());
            Ok(())
        }
    }
}
