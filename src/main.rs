//! vsphere-userdata - cloud-init user data for vSphere control planes
//!
//! Reads generator inputs from YAML or JSON files and writes the rendered
//! document to stdout or a file.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vsphere_userdata::config::{InputLoader, load_input};
use vsphere_userdata::{
    CloudProviderConfigInput, ControlPlaneInitInput, ControlPlaneJoinInput, UserDataError,
    generate_cloud_provider_config, generate_control_plane_init, generate_control_plane_join,
};

#[derive(Parser)]
#[command(name = "vsphere-userdata")]
#[command(author, version, about = "Generate vSphere control plane user data", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User data for the machine that initializes the control plane
    Init(ControlPlaneArgs),
    /// User data for a machine joining the control plane
    Join(ControlPlaneArgs),
    /// vSphere cloud provider config file
    CloudConfig {
        /// Cloud provider input (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ControlPlaneArgs {
    /// Control plane input (YAML or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Load certificates and keys from a kubeadm PKI directory
    #[arg(long)]
    pki_dir: Option<PathBuf>,

    /// Render this cloud provider input into the document
    #[arg(long)]
    cloud_provider: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ControlPlaneArgs {
    fn loader(&self) -> InputLoader {
        let mut loader = InputLoader::new(&self.input);
        if let Some(dir) = &self.pki_dir {
            loader = loader.with_pki_dir(dir);
        }
        if let Some(path) = &self.cloud_provider {
            loader = loader.with_cloud_provider(path);
        }
        loader
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

async fn emit(document: &str, output: Option<&PathBuf>) -> Result<(), UserDataError> {
    match output {
        Some(path) => {
            tokio::fs::write(path, document).await?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(document.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), UserDataError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init(args) => {
            info!("Generating control plane init user data");
            let input: ControlPlaneInitInput = args.loader().load().await?;
            let document = generate_control_plane_init(&input)?;
            emit(&document, args.output.as_ref()).await?;
        }
        Commands::Join(args) => {
            info!("Generating control plane join user data");
            let input: ControlPlaneJoinInput = args.loader().load().await?;
            let document = generate_control_plane_join(&input)?;
            emit(&document, args.output.as_ref()).await?;
        }
        Commands::CloudConfig { input, output } => {
            info!("Generating cloud provider config");
            let input: CloudProviderConfigInput = load_input(&input).await?;
            let document = generate_cloud_provider_config(&input)?;
            emit(&document, output.as_ref()).await?;
        }
    }

    Ok(())
}
