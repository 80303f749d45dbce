use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fleet",
    about = "Fleet registry: vehicle records over a JSON REST API",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Load a seed file and summarize its contents
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to bind, overriding the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// JSON seed file, overriding the config file
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    pub path: PathBuf,
}
