//! Command-line argument definitions for the Blueprint CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects what to do with the project; the
//! global options control configuration file selection and logging verbosity.

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};

use blueprint::view::ViewKind;

/// Command-line arguments for the Blueprint architecture tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the page of every view below an output directory
    Export {
        /// Path to the project directory
        project: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the DOT input of one view
    Dot {
        /// Path to the project directory
        project: PathBuf,

        /// View level: context, container or component
        #[arg(long, default_value = "context")]
        kind: ViewKind,

        /// Focal entity; omit for the generic context view
        #[arg(long)]
        name: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the views of a project over HTTP
    Serve {
        /// Path to the project directory
        project: PathBuf,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        http: SocketAddr,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dot_command() {
        let args = Args::parse_from([
            "blueprint",
            "dot",
            "model",
            "--kind",
            "containers",
            "--name",
            "Shop",
            "--log-level",
            "off",
        ]);

        assert_eq!(args.log_level, "off");
        match args.command {
            Command::Dot { kind, name, output, .. } => {
                assert_eq!(kind, ViewKind::Container);
                assert_eq!(name.as_deref(), Some("Shop"));
                assert_eq!(output, None);
            }
            other => panic!("Expected dot command, got {other:?}"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let args = Args::parse_from(["blueprint", "serve", "model"]);

        match args.command {
            Command::Serve { http, .. } => assert_eq!(http.to_string(), "127.0.0.1:8080"),
            other => panic!("Expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let result = Args::try_parse_from(["blueprint", "dot", "model", "--kind", "deployment"]);

        assert!(result.is_err());
    }
}
