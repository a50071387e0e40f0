use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::path::PathBuf;
use tracing::debug;

use meteo_core::{Config, OpenMeteoProvider, Summary, dashboard, pipeline::{self, FetchEvent}};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City weather dashboard from Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current conditions, print a summary and write the dashboard image.
    Run {
        /// Where to write the dashboard; overrides the configured path.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the fetched table as JSON instead of a text table.
        #[arg(long)]
        json: bool,
    },

    /// List the cities that will be queried.
    Cities,

    /// Interactively edit the configuration file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run { output: None, json: false }) {
            Command::Run { output, json } => run_dashboard(output, json).await,
            Command::Cities => {
                let config = Config::load()?;
                print!("{}", report::format_registry(&config.registry()));
                Ok(())
            }
            Command::Configure => configure(),
        }
    }
}

async fn run_dashboard(output: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let output = output.unwrap_or_else(|| config.output.clone());
    let provider = OpenMeteoProvider::from_config(&config);
    let cities = config.registry();
    debug!(
        endpoint = %config.base_url,
        cities = cities.len(),
        output = %output.display(),
        "configuration loaded"
    );

    println!("Fetching weather data from Open-Meteo (No API key needed)...");
    println!("{}", report::RULE);

    let fetched = pipeline::collect_with(&provider, &cities, config.concurrency(), |event| match event {
        FetchEvent::Started(city) => println!("{}", report::fetching(city)),
        FetchEvent::Finished(city) => {
            if let Some(line) = report::format_outcome(city) {
                println!("{line}");
            }
        }
    })
    .await;

    let summary = match Summary::compute(&fetched.table) {
        Ok(summary) => summary,
        Err(err) => {
            println!("\n❌ ERROR: No data was fetched. Please check your internet connection.");
            return Err(err.into());
        }
    };

    println!("\n{}", report::banner("DATA FETCHED SUCCESSFULLY!"));
    if json {
        let body = serde_json::to_string_pretty(&fetched.table)
            .context("Failed to serialize weather table")?;
        println!("{body}");
    } else {
        print!("{}", report::format_table(&fetched.table));
    }

    dashboard::render(&fetched.table, &output)?;
    println!("\n✓ Dashboard saved as '{}'", output.display());

    println!("\n{}", report::banner("SUMMARY STATISTICS"));
    println!("\n{summary}");

    println!("\n{}", report::banner("TASK COMPLETED SUCCESSFULLY! ✓"));
    print!("{}", report::completion(&output));

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.base_url = Text::new("Forecast endpoint:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    let output = Text::new("Dashboard output path:")
        .with_default(&config.output.display().to_string())
        .prompt()
        .context("Failed to read output path")?;
    config.output = PathBuf::from(output);

    config.concurrency = CustomType::<usize>::new("Concurrent requests (1 = sequential):")
        .with_default(config.concurrency())
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Failed to read concurrency")?;

    config.validate()?;
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
