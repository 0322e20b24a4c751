//! Command-line front end for the Kartverket registries.
//!
//! Runs one search per invocation, prints the hits as a table or exports
//! them as a GeoJSON or CSV layer.

use std::fs::File;
use std::future::Future;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use kvseek::config::Config;
use kvseek::crs::working_or_default;
use kvseek::export::{layer_for, write_csv, write_geojson};
use kvseek::kartverket::{AddressQuery, PlaceQuery, PropertyQuery};
use kvseek::models::{AdminKind, AdminUnit};
use kvseek::search::{ResultList, SearchOutcome, Searcher};

mod table;

#[derive(Parser, Debug)]
#[command(name = "kvseek")]
#[command(about = "Search Kartverket's address, property, place-name and boundary registries")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working EPSG code for returned coordinates (0 means the default)
    #[arg(long, global = true)]
    epsg: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log request details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search street addresses
    Address {
        /// Street name
        street: Option<String>,

        /// House number
        #[arg(short, long, default_value = "")]
        number: String,

        /// House letter
        #[arg(short, long, default_value = "")]
        letter: String,
    },
    /// Look up a property by municipality and cadastral numbers
    Property {
        /// Municipality number or name, e.g. "5001" or "Trondheim"
        municipality: String,
        /// Farm number (gnr)
        gnr: u32,
        /// Property number (bnr)
        bnr: u32,
        /// Leasehold number (fnr)
        #[arg(long, default_value_t = 0)]
        fnr: u32,
        /// Section number (snr)
        #[arg(long, default_value_t = 0)]
        snr: u32,
    },
    /// Fetch a county boundary
    County {
        /// County number or name, e.g. "50" or "Trøndelag (50)"
        selection: String,
    },
    /// Fetch a municipality boundary
    Municipality {
        /// Municipality number or name, e.g. "0301" or "Oslo"
        selection: String,
    },
    /// Search place names
    Place {
        /// Search text (at least two characters)
        text: String,
    },
    /// List all counties
    Counties,
    /// List all municipalities
    Municipalities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Geojson,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(epsg) = args.epsg {
        config.search.working_epsg = working_or_default(epsg);
    }
    info!("Working EPSG: {}", config.search.working_epsg);

    let searcher = Searcher::new(&config)?;

    let outcome = match args.command {
        Command::Counties => {
            let units = list_units(&searcher, AdminKind::County).await?;
            return write_units(&units, args.format, args.output.as_deref());
        }
        Command::Municipalities => {
            let units = list_units(&searcher, AdminKind::Municipality).await?;
            return write_units(&units, args.format, args.output.as_deref());
        }
        command => run_search(&searcher, command).await?,
    };

    let mut results = ResultList::default();
    results.apply(outcome);
    eprintln!("{}", results.status());

    if let Some(preview) = results.preview(0) {
        let rect = preview.extent;
        info!(
            "Zoom to [{:.1}, {:.1}, {:.1}, {:.1}] around ({:.1}, {:.1}) in EPSG:{}",
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            preview.anchor.x(),
            preview.anchor.y(),
            preview.epsg
        );
    }

    let Some(kind) = results.kind() else {
        return Ok(());
    };

    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Table => {
            if !results.hits().is_empty() {
                write!(out, "{}", table::render_hits(kind, results.hits()))?;
            }
        }
        OutputFormat::Geojson => write_geojson(&mut out, kind, results.hits())?,
        OutputFormat::Csv => write_csv(&mut out, kind, results.hits())?,
    }
    out.flush()?;

    if let Some(path) = &args.output {
        info!("Wrote {} layer to {}", layer_for(kind).name, path.display());
    }

    Ok(())
}

async fn run_search(searcher: &Searcher, command: Command) -> Result<SearchOutcome> {
    match command {
        Command::Address {
            street,
            number,
            letter,
        } => {
            let query = AddressQuery {
                street: street.unwrap_or_default(),
                number,
                letter,
            };
            with_spinner("Søker adresse...", async {
                Ok(searcher.addresses(&query).await?)
            })
            .await
        }
        Command::Property {
            municipality,
            gnr,
            bnr,
            fnr,
            snr,
        } => {
            with_spinner("Søker eiendom...", async {
                let selection = searcher
                    .resolve_selection(AdminKind::Municipality, &municipality)
                    .await?
                    .with_context(|| format!("Unknown municipality '{}'", municipality))?;
                let query = PropertyQuery {
                    municipality_number: selection.number,
                    gnr,
                    bnr,
                    fnr,
                    snr,
                };
                Ok(searcher.properties(&query).await?)
            })
            .await
        }
        Command::County { selection } => area(searcher, AdminKind::County, &selection).await,
        Command::Municipality { selection } => {
            area(searcher, AdminKind::Municipality, &selection).await
        }
        Command::Place { text } => {
            let query = PlaceQuery { text };
            with_spinner("Søker stedsnavn...", async {
                Ok(searcher.place_names(&query).await?)
            })
            .await
        }
        Command::Counties | Command::Municipalities => {
            bail!("List commands do not produce search hits")
        }
    }
}

async fn area(searcher: &Searcher, kind: AdminKind, input: &str) -> Result<SearchOutcome> {
    let noun = kind.noun().to_lowercase();
    with_spinner(&format!("Henter {}...", noun), async {
        let selection = searcher
            .resolve_selection(kind, input)
            .await?
            .with_context(|| format!("Unknown {} '{}'", noun, input))?;
        Ok(searcher.area(kind, &selection).await?)
    })
    .await
}

async fn list_units(searcher: &Searcher, kind: AdminKind) -> Result<Vec<AdminUnit>> {
    let units = with_spinner(&format!("Laster {}liste...", kind.noun().to_lowercase()), async {
        searcher
            .admin_units(kind)
            .await
            .with_context(|| format!("Could not load {} list", kind.noun()))
    })
    .await?;
    if units.is_empty() {
        bail!("The {} list came back empty", kind.noun().to_lowercase());
    }
    Ok(units)
}

fn write_units(units: &[AdminUnit], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let mut out = open_output(output)?;

    match format {
        OutputFormat::Table => write!(out, "{}", table::render_units(units))?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut out);
            wtr.write_record(["navn", "nummer"])?;
            for unit in units {
                wtr.write_record([&unit.name, &unit.number])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Geojson => bail!("County and municipality lists have no geometry; use table or csv"),
    }

    out.flush()?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Await `fut` while a spinner shows `message`.
async fn with_spinner<T, F>(message: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let pb = spinner(message)?;
    let result = fut.await;
    pb.finish_and_clear();
    result
}
