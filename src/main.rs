/// kube-resolve - inspect how a Kubernetes client would be configured
///
/// Resolves in-cluster credentials or a local kubeconfig exactly as the
/// library does, and reports or exercises the result.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use k8s_openapi::apimachinery::pkg::version::Info;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kube_resolve::cli::KubeArgs;
use kube_resolve::k8s::{client_from_resolved, resolve_config};
use kube_resolve::ResolverOptions;

#[derive(Parser)]
#[command(name = "kube-resolve")]
#[command(about = "Resolve Kubernetes client configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Options file path
    #[arg(long, global = true, default_value = "kube-resolve.yaml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    kube: KubeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Build a client and query the API server version
    Version,

    /// Generate example options file
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("kube_resolve={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Show { output } => show_config(&cli, *output).await,
        Commands::Version => show_version(&cli).await,
        Commands::Init => init_options(&cli).await,
    };

    if let Err(e) = result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Merge CLI flags over the options file, when one exists
fn load_options(cli: &Cli) -> Result<ResolverOptions> {
    let flags = cli.kube.to_options();
    flags.validate()?;
    if !cli.config.exists() {
        return Ok(flags);
    }

    let file = ResolverOptions::from_file(&cli.config).with_context(|| {
        format!("Failed to load options file: {}", cli.config.display())
    })?;
    Ok(flags.or(file))
}

/// Resolve and print the configuration
async fn show_config(cli: &Cli, output: OutputFormat) -> Result<()> {
    let options = load_options(cli)?;
    let resolved = resolve_config(&options)
        .await
        .context("Failed to resolve Kubernetes configuration")?;

    match output {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "mode": resolved.mode().to_string(),
                "context": resolved.context(),
                "kubeconfig": resolved.kubeconfig().map(|p| p.display().to_string()),
                "server": resolved.server(),
                "namespace": resolved.namespace(),
                "auth": resolved.auth_kind(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            info!("Mode:       {}", resolved.mode());
            if let Some(path) = resolved.kubeconfig() {
                info!("Kubeconfig: {}", path.display());
            }
            info!("Context:    {}", resolved.context().unwrap_or("-"));
            info!("Server:     {}", resolved.server());
            info!("Namespace:  {}", resolved.namespace());
            info!("Auth:       {}", resolved.auth_kind());
        }
    }

    Ok(())
}

/// Connect to the API server and print its version
async fn show_version(cli: &Cli) -> Result<()> {
    let options = load_options(cli)?;
    let resolved = resolve_config(&options)
        .await
        .context("Failed to resolve Kubernetes configuration")?;
    let server = resolved.server();

    let client = client_from_resolved(resolved).context("Failed to create Kubernetes client")?;
    let version: Info = client
        .apiserver_version()
        .await
        .with_context(|| format!("Failed to query API server at {}", server))?;

    info!("Server:   {}", server);
    info!("Version:  {}", version.git_version);
    info!("Platform: {}", version.platform);

    Ok(())
}

/// Initialize example options file
async fn init_options(cli: &Cli) -> Result<()> {
    if cli.config.exists() {
        anyhow::bail!("Options file already exists: {}", cli.config.display());
    }

    let example = ResolverOptions::example();
    let yaml = serde_yaml::to_string(&example)?;

    tokio::fs::write(&cli.config, yaml)
        .await
        .context("Failed to write options file")?;

    info!("Example options created: {}", cli.config.display());
    info!("");
    info!("Next steps:");
    info!("  1. Point kubeconfig/context at your cluster");
    info!("  2. Check the result:");
    info!("     kube-resolve show");

    Ok(())
}
