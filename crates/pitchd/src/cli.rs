//! Command-line arguments for the pitchd binary.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pitchd", version, about = "Sales-roleplay backend: AI prospect replies with scored feedback")]
pub struct Cli {
    /// TOML config file (overrides PITCHD_CONFIG and /etc/pitchd/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    pub port: Option<u16>,
}
