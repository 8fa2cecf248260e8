mod app;
mod color;
mod state;
mod tasks;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eframe::egui;

use app::QuiverApp;
use quiver::catalog;
use quiver::config::DEFAULT_BASE_URL;
use quiver::{DatasetLoader, Planet, RecordingId, RemoteClient, Resource, ServiceConfig};

#[derive(Parser)]
#[command(name = "quiver")]
#[command(about = "Seismic recordings from Mars and the Moon: browse, fetch, and chart")]
#[command(version)]
struct Args {
    /// Analysis service base URL
    #[arg(long, env = "QUIVER_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Host serving the static recording files (local files are used if unset)
    #[arg(long, env = "QUIVER_STATIC_ROOT", global = true)]
    static_root: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer (the default when no command is given)
    View {
        /// Directory holding the catalogued recordings
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// List the catalogued recordings
    Catalog {
        /// Only list this planet (mars or moon)
        planet: Option<Planet>,
    },
    /// Load a recording and print its normalized series as JSON
    Load {
        /// File path, URL, or name under the static root
        name: String,

        /// Measure time from the first sample instead of converting to UTC seconds
        #[arg(long)]
        relative: bool,
    },
    /// Query the analysis service and print the response body
    Fetch {
        #[arg(value_enum)]
        resource: ResourceArg,

        /// mars or moon
        planet: String,

        /// Catalog filename, e.g. XB.ELYSE.02.BHV.2022-01-02HR04_evid0006.json
        filename: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceArg {
    Stalta,
    Spectogram,
    Landerdata,
}

impl From<ResourceArg> for Resource {
    fn from(arg: ResourceArg) -> Self {
        match arg {
            ResourceArg::Stalta => Resource::DetectionSeries,
            ResourceArg::Spectogram => Resource::Spectrogram,
            ResourceArg::Landerdata => Resource::InstrumentData,
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    env_logger::init();

    let args = Args::parse();
    let config = ServiceConfig::new(&args.base_url, args.static_root.as_deref())
        .context("invalid service configuration")?;
    log::debug!("Using {config:?}");

    let command = args.command.unwrap_or(Commands::View {
        data_dir: PathBuf::from("."),
    });

    match command {
        Commands::View { data_dir } => run_viewer(config, data_dir),
        Commands::Catalog { planet } => {
            print_catalog(planet);
            Ok(())
        }
        Commands::Load { name, relative } => block_on(load(config, name, relative)),
        Commands::Fetch {
            resource,
            planet,
            filename,
        } => block_on(fetch(config, resource.into(), planet, filename)),
    }
}

fn run_viewer(config: ServiceConfig, data_dir: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quiver – Seismic Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(QuiverApp::new(cc, &config, data_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(future)
}

fn print_catalog(planet: Option<Planet>) {
    let planets = match planet {
        Some(p) => vec![p],
        None => Planet::ALL.to_vec(),
    };
    for planet in planets {
        println!("{planet}:");
        for name in catalog::filenames(planet) {
            match RecordingId::parse(name) {
                Some(id) => println!("  {name}  {}", id.label()),
                None => println!("  {name}"),
            }
        }
    }
}

async fn load(config: ServiceConfig, name: String, relative: bool) -> Result<()> {
    let loader = DatasetLoader::new(&config);
    let json = if relative {
        serde_json::to_string_pretty(&loader.load_relative(&name).await?)?
    } else {
        serde_json::to_string_pretty(&loader.load_absolute(&name).await?)?
    };
    println!("{json}");
    Ok(())
}

async fn fetch(config: ServiceConfig, resource: Resource, planet: String, filename: String) -> Result<()> {
    let remote = RemoteClient::new(&config);
    let value = remote
        .fetch(resource, &planet, &filename)
        .await
        .with_context(|| format!("{} for {planet}/{filename}", resource.label()))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
