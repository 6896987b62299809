//! Command-line interface.
//!
//! Flags use the single-dash long form (`-url`, `-insecureSkipVerify`);
//! [`normalize_args`] rewrites them into the `--flag` form clap parses.
//! The double-dash form is accepted as well.

// ============================================================================
// Imports
// ============================================================================

use std::ffi::OsString;

use clap::{CommandFactory, Parser};

use crate::config::{ClientConfig, DEFAULT_ORIGIN, DEFAULT_URL};
use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Long flag names accepted with a single dash.
const LONG_FLAGS: &[&str] = &[
    "url",
    "origin",
    "protocol",
    "insecureSkipVerify",
    "debug",
    "help",
    "version",
];

// ============================================================================
// Cli
// ============================================================================

/// Interactive WebSocket client.
///
/// Lines read from standard input are sent as messages; received messages
/// are printed to standard output. When input is piped, each line waits for
/// one reply before the next is sent.
#[derive(Debug, Clone, Parser)]
#[command(name = "wsd", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// WebSocket server address to connect to
    #[arg(long, value_name = "URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Origin of WebSocket client
    #[arg(long, value_name = "ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// WebSocket subprotocol
    #[arg(long, value_name = "PROTOCOL", default_value = "")]
    pub protocol: String,

    /// Skip TLS certificate verification
    #[arg(long = "insecureSkipVerify")]
    pub insecure_skip_verify: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Display help information about wsd
    #[arg(long)]
    pub help: bool,

    /// Display version number
    #[arg(long)]
    pub version: bool,
}

impl Cli {
    /// Parses the process arguments.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Converts the flags into a validated configuration.
    ///
    /// # Errors
    ///
    /// Any [`ClientConfigBuilder::build`](crate::ClientConfigBuilder::build)
    /// validation error.
    pub fn to_config(&self) -> Result<ClientConfig> {
        ClientConfig::builder()
            .url(&self.url)
            .origin(&self.origin)
            .protocol(&self.protocol)
            .insecure_skip_verify(self.insecure_skip_verify)
            .build()
    }

    /// Renders the usage text.
    #[must_use]
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}

// ============================================================================
// Argument Normalization
// ============================================================================

/// Rewrites `-flag` and `-flag=value` into `--flag` and `--flag=value`.
///
/// Only known long flags are rewritten; the program name, values and
/// anything after a bare `--` pass through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || passthrough {
            out.push(arg);
            continue;
        }

        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|text| {
            let name = text.strip_prefix('-')?;
            if name.starts_with('-') {
                return None;
            }
            let key = name.split_once('=').map_or(name, |(key, _)| key);
            LONG_FLAGS.contains(&key).then(|| OsString::from(format!("-{text}")))
        });

        out.push(rewritten.unwrap_or(arg));
    }

    out
}

// ============================================================================
// Tests
// ============================================================================
