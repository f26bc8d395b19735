//! Declaration emitter for `apdu-gen`.
//!
//! Turns parsed instruction records into a single source document holding two
//! parallel blocks: raw byte-array constants, then typed `Instruction` values
//! that borrow from them. The block layout is shared by every [`Dialect`]; the
//! dialect only decides the concrete syntax.

#![allow(
    clippy::format_push_string,
    reason = "templating uses format! for clarity"
)]

mod go;
mod rust;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ident::derive_identifier;
use crate::table::InstructionRecord;

/// Clause of the standard the instruction table is drawn from.
pub const STANDARD: &str = "ISO/IEC 7816-4:2005(E)";

/// Host languages the generated declarations can target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// A Go source file for the `apdu` package.
    #[default]
    Go,
    /// A Rust module of `const` items.
    Rust,
}

impl Dialect {
    /// Returns the CLI-friendly string for this dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    fn writer(self) -> &'static dyn DialectWriter {
        match self {
            Self::Go => &go::GoWriter,
            Self::Rust => &rust::RustWriter,
        }
    }
}

/// Syntax hooks a dialect provides to the shared document layout.
///
/// Implementations append to `out` and never reorder declarations.
trait DialectWriter {
    /// Identity line, do-not-edit marker and regeneration directive.
    fn preamble(&self, out: &mut String, args: &[String]);
    /// All raw byte-array declarations.
    fn raw_block(&self, out: &mut String, declarations: &[Declaration<'_>]);
    /// The wrapper type referenced by the typed block.
    fn wrapper_type(&self, out: &mut String);
    /// All typed declarations.
    fn typed_block(&self, out: &mut String, declarations: &[Declaration<'_>]);
}

/// A record paired with the identifier derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    identifier: String,
    record: InstructionRecord<'a>,
}

impl<'a> Declaration<'a> {
    /// Derives the identifier for `record`.
    #[must_use]
    pub fn new(record: InstructionRecord<'a>) -> Self {
        Self {
            identifier: derive_identifier(record.name),
            record,
        }
    }

    /// Identifier fragment shared by both declarations.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The source record.
    #[must_use]
    pub const fn record(&self) -> &InstructionRecord<'a> {
        &self.record
    }

    /// Name of the raw byte-array declaration, `RawInstr<Identifier>`.
    #[must_use]
    pub fn raw_name(&self) -> String {
        format!("RawInstr{}", self.identifier)
    }

    /// Name of the typed declaration, `Instr<Identifier>`.
    #[must_use]
    pub fn typed_name(&self) -> String {
        format!("Instr{}", self.identifier)
    }

    /// Explanatory comment text for the declaration called `declared`.
    #[must_use]
    pub fn describe(&self, declared: &str) -> String {
        format!(
            "{declared} represents the {} instruction as defined in {STANDARD} {}",
            quote_ascii(self.record.name),
            self.record.reference,
        )
    }
}

/// Ordered declarations ready to be rendered.
///
/// Identifiers are derived once up front so both blocks iterate the same list
/// and stay in lock-step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet<'a> {
    declarations: Vec<Declaration<'a>>,
}

impl<'a> DeclarationSet<'a> {
    /// Builds declarations for `records`, keeping their order.
    #[must_use]
    pub fn from_records(records: &[InstructionRecord<'a>]) -> Self {
        let declarations = records.iter().copied().map(Declaration::new).collect();
        Self { declarations }
    }

    /// The declarations in table order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration<'a>] {
        &self.declarations
    }

    /// Renders the complete document for `dialect`.
    ///
    /// `args` are echoed verbatim into the regeneration directive.
    #[must_use]
    pub fn render(&self, dialect: Dialect, args: &[String]) -> String {
        let writer = dialect.writer();
        let mut out = String::with_capacity(256 * (self.declarations.len() + 1));
        writer.preamble(&mut out, args);
        writer.raw_block(&mut out, &self.declarations);
        writer.wrapper_type(&mut out);
        writer.typed_block(&mut out, &self.declarations);
        debug!(
            dialect = dialect.as_str(),
            declarations = self.declarations.len(),
            bytes = out.len(),
            "rendered declarations"
        );
        out
    }
}

/// Joins directive arguments, each preceded by a single space.
fn directive_args(args: &[String]) -> String {
    args.iter().map(|arg| format!(" {arg}")).collect()
}

/// Double-quotes `text`, escaping everything outside printable ASCII.
///
/// Escapes follow Go's `%+q` verb: the short forms `\a \b \f \n \r \t \v`,
/// then `\xHH` for other ASCII controls, `\uXXXX` and `\UXXXXXXXX` beyond.
///
/// # Examples
///
/// ```
/// use apdu_gen::emit::quote_ascii;
///
/// assert_eq!(quote_ascii("SELECT"), "\"SELECT\"");
/// assert_eq!(quote_ascii("caf\u{e9}"), "\"caf\\u00e9\"");
/// ```
#[must_use]
pub fn quote_ascii(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            ' '..='~' => quoted.push(ch),
            _ => {
                let code = u32::from(ch);
                if code < 0x80 {
                    quoted.push_str(&format!("\\x{code:02x}"));
                } else if code <= 0xFFFF {
                    quoted.push_str(&format!("\\u{code:04x}"));
                } else {
                    quoted.push_str(&format!("\\U{code:08x}"));
                }
            }
        }
    }
    quoted.push('"');
    quoted
}
