//! wx-cloud-pack - command line driver
//!
//! Runs the packaging pipeline over files exported by the host bundler:
//! - `generate` registers discovered functions and finalizes bundle passes
//! - `output-dir` prints where a function's bundle should be written

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wx_cloud_pack::plugin::EntryEvent;
use wx_cloud_pack::{EmitOutcome, OutputBundle, PackConfig, WxCloudPack};

#[derive(Parser)]
#[command(name = "wx-cloud-pack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate cloud function packages, client stub and deploy config")]
struct Cli {
    /// JSON configuration file; environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register functions and finalize bundle passes
    Generate {
        /// JSON array of discovered functions: [{ filePath, params, isMain }]
        #[arg(long)]
        entries: PathBuf,

        /// Bundler output map of one pass; repeat for several passes
        #[arg(long = "bundle", required = true)]
        bundles: Vec<PathBuf>,

        /// Base directory of function bundles
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Print the output directory of each function source path
    OutputDir {
        #[arg(long)]
        base_dir: PathBuf,

        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wx_cloud_pack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PackConfig::load(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?
            .with_env(),
        None => PackConfig::from_env(),
    };
    tracing::debug!("Configuration loaded: {:?}", config);

    match cli.command {
        Commands::Generate { entries, bundles, out_dir } => {
            generate(config, &entries, &bundles, &out_dir).await
        }
        Commands::OutputDir { base_dir, paths } => {
            let pack = WxCloudPack::new(config);
            for path in paths {
                println!("{}", pack.output_directory(&base_dir, &path).display());
            }
            Ok(())
        }
    }
}

async fn generate(
    config: PackConfig,
    entries: &Path,
    bundles: &[PathBuf],
    out_dir: &Path,
) -> Result<()> {
    let mut pack = WxCloudPack::new(config);

    let events: Vec<EntryEvent> = read_json(entries)?;
    for event in events {
        pack.on_entry(event);
    }
    tracing::info!("Registered {} functions", pack.registry().len());

    for path in bundles {
        let bundle: OutputBundle = read_json(path)?;
        let output = pack
            .generate_bundle(&bundle)
            .await
            .with_context(|| format!("Bundle pass failed: {:?}", path))?;

        match output.package {
            Some(asset) => {
                let dir = out_dir.join(&asset.function);
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
                let target = dir.join(&asset.file_name);
                std::fs::write(&target, &asset.source)
                    .with_context(|| format!("Failed to write {:?}", target))?;
                println!("{} -> {}", asset.function, target.display());
            }
            None => println!("{}: no registered function", path.display()),
        }

        if let EmitOutcome::Written { client, config } = output.meta {
            tracing::info!(client, config, "Meta files regenerated");
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}
