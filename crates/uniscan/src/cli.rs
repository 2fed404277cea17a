//! Clap derive structures for the `uniscan` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// uniscan -- read-only inventory of a UniFi controller
#[derive(Debug, Parser)]
#[command(
    name = "uniscan",
    version,
    about = "List the sites, devices, and clients of a UniFi network controller",
    long_about = "Reads a UniFi controller through its Integration API using a static API key.\n\n\
        Prints the controller version and every site; --devices and --clients\n\
        add the per-site listings."
)]
pub struct Cli {
    /// Base URL for the UniFi controller
    #[arg(long, short = 'H', env = "UNISCAN_HOST")]
    pub host: Option<String>,

    /// File containing the API key
    #[arg(long = "key", short = 'k', value_name = "FILE", env = "UNISCAN_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", env = "UNISCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// List devices per site
    #[arg(long)]
    pub devices: bool,

    /// Fetch full device details (used together with --devices)
    #[arg(long)]
    pub device_details: bool,

    /// List clients per site
    #[arg(long)]
    pub clients: bool,

    /// Items requested per page on list endpoints
    #[arg(long, value_name = "N")]
    pub page_size: Option<i32>,

    /// Accept self-signed TLS certificates
    #[arg(long, env = "UNISCAN_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "plain")]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One line per item
    Plain,
    /// Pretty table
    Table,
    /// Pretty-printed JSON of the whole report
    Json,
}

impl Cli {
    /// Apply flag overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut uniscan_config::Config) {
        if let Some(ref host) = self.host {
            config.host = Some(host.clone());
        }
        if let Some(ref key_file) = self.key_file {
            config.key_file.clone_from(key_file);
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if self.insecure {
            config.insecure = true;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
    }
}
