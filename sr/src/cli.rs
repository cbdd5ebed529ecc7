//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solicitud relay - form submission intake and notification
#[derive(Parser)]
#[command(
    name = "sr",
    about = "Relay for transport solicitud submissions",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP relay (the default when no subcommand is given)
    Serve {
        /// Listen port, overriding config and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load and print the effective configuration, then exit
    CheckConfig,

    /// Hash a clave for use as clave-hash in config
    HashClave {
        /// Clave to hash
        clave: String,

        /// Salt prepended before hashing
        #[arg(long, default_value = "")]
        salt: String,
    },
}
