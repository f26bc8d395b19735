//! Command-line interface definitions for `apdu-gen`.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::config::CliOverrides;
use crate::emit::Dialect;

/// Parsed CLI arguments for `apdu-gen`.
#[derive(Debug, Parser)]
#[command(name = "apdu-gen")]
#[command(about = "Generate ISO/IEC 7816-4 instruction declarations")]
#[command(version)]
pub struct Args {
    /// Configuration file to load instead of the discovered ones.
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Host language for the generated declarations.
    #[arg(long, value_enum)]
    pub dialect: Option<Dialect>,
    /// Fail if the destination is not up to date instead of rewriting it.
    #[arg(long = "check")]
    pub should_check: bool,
    /// File to overwrite; the document goes to standard output when omitted.
    #[arg(value_name = "DESTINATION")]
    pub destinations: Vec<String>,
}

impl Args {
    /// Flags that override lower configuration layers.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dialect: self.dialect,
            check: self.should_check.then_some(true),
        }
    }
}
