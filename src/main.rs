//! roomwatch - Status dashboard for server-room telemetry logs
//!
//! Renders the newest record of a telemetry log as an HTML page, prints it as
//! text or JSON, or appends a new record for the acquisition side.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use roomwatch::parsers::types::Field;
use roomwatch::render::{cards, render_dashboard, render_error};
use roomwatch::settings::DashboardSettings;
use roomwatch::{load_snapshot, writer, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "roomwatch", version, about)]
struct Cli {
    /// Settings file, defaults to the user config directory
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the newest record as an HTML dashboard
    Render {
        /// Telemetry log file
        source: PathBuf,
        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the newest record
    Show {
        /// Telemetry log file
        source: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update the saved dashboard settings
    Config {
        /// Page title
        #[arg(long)]
        title: Option<String>,
        /// Browser refresh interval in seconds, 0 disables refresh
        #[arg(long)]
        refresh_secs: Option<u32>,
        /// Logo shown in the page header
        #[arg(long)]
        logo: Option<String>,
    },
    /// Append a timestamped record
    Append {
        /// Telemetry log file
        source: PathBuf,
        /// Sensor detail pairs, e.g. "TEMP:23||HUM:41||..."
        #[arg(long)]
        detail: String,
        /// UPS readings, comma separated; empty entries are written as 0
        #[arg(long, value_delimiter = ',')]
        ups: Vec<String>,
        /// IPDU readings, comma separated; empty entries are written as 0
        #[arg(long, value_delimiter = ',')]
        ipdu: Vec<String>,
    },
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("Recorded: {}", snapshot.timestamp);
    for card in cards(snapshot) {
        println!("{:<26}{} {}", card.title, card.value, card.unit);
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr so rendered output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => DashboardSettings::load_from(path),
        None => DashboardSettings::load(),
    };

    match cli.command {
        Command::Render { source, output } => {
            let result = load_snapshot(&source);
            let html = match &result {
                Ok(snapshot) => render_dashboard(snapshot, &settings),
                Err(e) => render_error(e, &settings),
            };

            match output {
                Some(path) => std::fs::write(&path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{}", html),
            }

            if let Err(e) = result {
                bail!("{}: {}", source.display(), e);
            }
        }
        Command::Show { source, json } => {
            let snapshot = load_snapshot(&source)
                .with_context(|| format!("Failed to load {}", source.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_snapshot(&snapshot);
            }
        }
        Command::Config {
            title,
            refresh_secs,
            logo,
        } => {
            if let Some(title) = title {
                settings.title = title;
            }
            if let Some(refresh_secs) = refresh_secs {
                settings.refresh_secs = refresh_secs;
            }
            if let Some(logo) = logo {
                settings.logo = Some(logo).filter(|l| !l.is_empty());
            }

            let saved = match &cli.settings {
                Some(path) => settings.save_to(path),
                None => settings.save(),
            };
            saved.map_err(anyhow::Error::msg)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Append {
            source,
            detail,
            ups,
            ipdu,
        } => {
            let ups = writer::fit_readings(ups, Field::Ups.arity().unwrap_or_default());
            let ipdu = writer::fit_readings(ipdu, Field::Ipdu.arity().unwrap_or_default());
            let detail = writer::compose_detail(detail.trim(), &ups, &ipdu)
                .context("Refusing to write record")?;
            let record = writer::format_record(chrono::Local::now().naive_local(), &detail);
            writer::append_record(&source, &record)
                .with_context(|| format!("Failed to append to {}", source.display()))?;
        }
    }

    Ok(())
}
