//! Rust syntax: a module of `const` items.

use super::{Declaration, DialectWriter, directive_args};

pub(super) struct RustWriter;

impl DialectWriter for RustWriter {
    fn preamble(&self, out: &mut String, args: &[String]) {
        out.push_str("//! ISO/IEC 7816-4 instruction codes.\n");
        out.push_str("// Code generated by apdu-gen. DO NOT EDIT.\n");
        out.push_str(&format!(
            "// Regenerate with: apdu-gen --dialect rust{}\n\n",
            directive_args(args)
        ));
        out.push_str("#![allow(non_upper_case_globals)]\n\n");
    }

    fn raw_block(&self, out: &mut String, declarations: &[Declaration<'_>]) {
        for decl in declarations {
            let name = decl.raw_name();
            let record = decl.record();
            out.push_str(&format!(
                "/// {}\npub const {name}: [u8; {}] = [{}];\n\n",
                decl.describe(&name),
                record.byte_count(),
                record.byte_sequence,
            ));
        }
    }

    fn wrapper_type(&self, out: &mut String) {
        out.push_str("/// Instruction is an ISO/IEC 7816-4 instruction code.\n");
        out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        out.push_str("pub struct Instruction(pub &'static [u8]);\n");
    }

    fn typed_block(&self, out: &mut String, declarations: &[Declaration<'_>]) {
        for decl in declarations {
            let name = decl.typed_name();
            out.push_str(&format!(
                "\n/// {}\npub const {name}: Instruction = Instruction({}.as_slice());\n",
                decl.describe(&name),
                decl.raw_name(),
            ));
        }
    }
}
