//! Go syntax for the `apdu` package.
//!
//! Output is already `gofmt`-clean: tab indentation, one blank line between
//! grouped `var` entries so no alignment padding is introduced.

use super::{Declaration, DialectWriter, directive_args};

pub(super) struct GoWriter;

impl DialectWriter for GoWriter {
    fn preamble(&self, out: &mut String, args: &[String]) {
        out.push_str("package apdu\n\n");
        out.push_str("// Code generated by apdu-gen. DO NOT EDIT.\n\n");
        out.push_str(&format!("//go:generate apdu-gen{}\n", directive_args(args)));
        out.push_str("//go:generate gofmt -w -s $GOFILE\n\n");
    }

    fn raw_block(&self, out: &mut String, declarations: &[Declaration<'_>]) {
        var_block(out, declarations, |decl| {
            let name = decl.raw_name();
            format!(
                "\t// {}\n\t{name} = [...]byte{{{}}}\n",
                decl.describe(&name),
                decl.record().byte_sequence,
            )
        });
    }

    fn wrapper_type(&self, out: &mut String) {
        out.push_str("\n// Instruction is an ISO/IEC 7816-4 instruction code.\n");
        out.push_str("type Instruction []byte\n\n");
    }

    fn typed_block(&self, out: &mut String, declarations: &[Declaration<'_>]) {
        var_block(out, declarations, |decl| {
            let name = decl.typed_name();
            format!(
                "\t// {}\n\t{name} = Instruction({}[:])\n",
                decl.describe(&name),
                decl.raw_name(),
            )
        });
    }
}

fn var_block<F>(out: &mut String, declarations: &[Declaration<'_>], entry: F)
where
    F: Fn(&Declaration<'_>) -> String,
{
    out.push_str("var (\n");
    for (idx, decl) in declarations.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&entry(decl));
    }
    out.push_str(")\n");
}
