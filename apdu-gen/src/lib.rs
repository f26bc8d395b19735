//! Library interface for `apdu-gen`.
//!
//! `apdu-gen` turns the ISO/IEC 7816-4 instruction table compiled into this
//! crate into source declarations for a host library: one raw byte-array
//! constant and one typed `Instruction` value per table row.
//!
//! The pipeline is a single pass: [`table::parse_table`] produces records,
//! [`emit::DeclarationSet`] derives identifiers and renders the document, and
//! [`output`] delivers it to standard output or a file.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod ident;
pub mod output;
pub mod table;

use crate::config::GenConfig;
use crate::emit::{DeclarationSet, Dialect};
use crate::error::GenError;
use crate::output::Destination;
use crate::table::{INSTRUCTION_TABLE, parse_table};

/// Renders the declarations for `table` without writing anything.
///
/// `args` are the positional arguments of the run; they are echoed into the
/// regeneration directive and must number at most one.
///
/// # Errors
///
/// Returns [`GenError::TooManyArguments`] before any parsing when `args` has
/// more than one entry, and [`GenError::MalformedRow`] for a bad table row.
pub fn generate(table: &str, dialect: Dialect, args: &[String]) -> Result<String, GenError> {
    Destination::from_args(args)?;
    let records = parse_table(table)?;
    Ok(DeclarationSet::from_records(&records).render(dialect, args))
}

/// Generates the embedded table and delivers it according to `config`.
///
/// Nothing is written unless generation succeeds in full.
///
/// # Errors
///
/// Propagates every [`GenError`] raised while validating arguments,
/// generating, writing, or checking.
pub fn run(config: &GenConfig, args: &[String]) -> Result<(), GenError> {
    let destination = Destination::from_args(args)?;
    if config.check && destination == Destination::Stdout {
        return Err(GenError::CheckWithoutDestination);
    }

    let document = generate(INSTRUCTION_TABLE, config.dialect, args)?;
    match destination {
        Destination::Stdout => output::write_stdout(&document),
        Destination::File(path) if config.check => output::check_up_to_date(&path, &document),
        Destination::File(path) => output::write_atomic(&path, &document),
    }
}
