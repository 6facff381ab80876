use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "execlog")]
#[command(about = "Masked execution logging", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "EXECLOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the masking pattern catalog
    Patterns {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mask a value
    Mask {
        /// Value to mask
        value: String,

        /// Catalog pattern (e.g. email, zip_code)
        #[arg(long, short)]
        pattern: Option<String>,

        /// Custom regex, takes precedence over --pattern
        #[arg(long, short)]
        regex: Option<String>,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Run intercepted calls and print their records
    Demo,

    /// Serve the masking engine over HTTP with request logging
    Serve {
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the default config file location
    Path,
}
