//! The embedded instruction table and its parser.
//!
//! Each non-blank row has the form `<bytes>; <name>; <reference>`. Fields are
//! trimmed, extra trailing fields are ignored, and the byte list is kept as
//! source text rather than parsed into numbers.

use tracing::debug;

use crate::error::GenError;

/// Instruction codes from ISO/IEC 7816-4:2005(E) 5.1.2.
pub const INSTRUCTION_TABLE: &str = "
0x04; DEACTIVATE FILE; Part 9
0x0C; ERASE RECORD (S); 7.3.8
0x0E, 0x0F; ERASE BINARY; 7.2.7
0x10; PERFORM SCQL OPERATION; Part 7
0x12; PERFORM TRANSACTION OPERATION; Part 7
0x14; PERFORM USER OPERATION; Part 7
0x20, 0x21; VERIFY; 7.5.6
0x22; MANAGE SECURITY ENVIRONMENT; 7.5.11
0x24; CHANGE REFERENCE DATA; 7.5.7
0x26; DISABLE VERIFICATION REQUIREMENT; 7.5.9
0x28; ENABLE VERIFICATION REQUIREMENT; 7.5.8
0x2A; PERFORM SECURITY OPERATION; Part 8
0x2C; RESET RETRY COUNTER; 7.5.10
0x44; ACTIVATE FILE; Part 9
0x46; GENERATE ASYMMETRIC KEY PAIR; Part 8
0x70; MANAGE CHANNEL; 7.1.2
0x82; EXTERNAL (/ MUTUAL) AUTHENTICATE; 7.5.4
0x84; GET CHALLENGE; 7.5.3
0x86, 0x87; GENERAL AUTHENTICATE; 7.5.5
0x88; INTERNAL AUTHENTICATE; 7.5.2
0xA0, 0xA1; SEARCH BINARY; 7.2.6
0xA2; SEARCH RECORD; 7.3.7
0xA4; SELECT; 7.1.1
0xB0, 0xB1; READ BINARY; 7.2.3
0xB2, 0xB3; READ RECORD; (S) 7.3.3
0xC0; GET RESPONSE; 7.6.1
0xC2, 0xC3; ENVELOPE; 7.6.2
0xCA, 0xCB; GET DATA; 7.4.2
0xD0, 0xD1; WRITE BINARY; 7.2.6
0xD2; WRITE RECORD; 7.3.4
0xD6, 0xD7; UPDATE BINARY; 7.2.5
0xDA, 0xDB; PUT DATA; 7.4.3
0xDC, 0xDD; UPDATE RECORD; 7.3.5
0xE0; CREATE FILE; Part 9
0xE2; APPEND RECORD; 7.3.6
0xE4; DELETE FILE; Part 9
0xE6; TERMINATE DF; Part 9
0xE8; TERMINATE EF; Part 9
0xFE; TERMINATE CARD USAGE; Part 9
";

/// One row of the instruction table, borrowed from the table text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionRecord<'a> {
    /// Comma-separated byte literals, for example `0x0E, 0x0F`.
    pub byte_sequence: &'a str,
    /// Human-readable instruction name.
    pub name: &'a str,
    /// Clause of the standard that defines the instruction.
    pub reference: &'a str,
}

impl InstructionRecord<'_> {
    /// Counts the items in the byte list without interpreting them.
    ///
    /// A trailing comma does not add an item.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.byte_sequence
            .split(',')
            .filter(|item| !item.trim().is_empty())
            .count()
    }
}

/// Parses table text into records, preserving row order.
///
/// Blank lines are skipped. Parsing stops at the first malformed row; no
/// partial result is returned.
///
/// # Errors
///
/// Returns [`GenError::MalformedRow`] when a row has fewer than three fields
/// or one of its first three fields is empty.
pub fn parse_table(text: &str) -> Result<Vec<InstructionRecord<'_>>, GenError> {
    let records = text
        .lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| parse_row(line_number, line))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = records.len(), "parsed instruction table");
    Ok(records)
}

fn parse_row(line_number: usize, line: &str) -> Result<InstructionRecord<'_>, GenError> {
    let mut fields = line.split(';').map(str::trim);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(byte_sequence), Some(name), Some(reference))
            if !(byte_sequence.is_empty() || name.is_empty() || reference.is_empty()) =>
        {
            Ok(InstructionRecord {
                byte_sequence,
                name,
                reference,
            })
        }
        _ => Err(GenError::MalformedRow {
            line_number,
            line: line.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    //! Tests for table parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn embedded_table_has_one_record_per_row() {
        let records = parse_table(INSTRUCTION_TABLE).expect("embedded table parses");
        let rows = INSTRUCTION_TABLE
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count();
        assert_eq!(records.len(), rows);
        assert_eq!(records.len(), 39);
    }

    #[rstest]
    fn records_keep_table_order() {
        let records = parse_table(INSTRUCTION_TABLE).expect("embedded table parses");
        let first = records.first().expect("first record");
        let last = records.last().expect("last record");
        assert_eq!(first.name, "DEACTIVATE FILE");
        assert_eq!(last.name, "TERMINATE CARD USAGE");
    }

    #[rstest]
    fn fields_are_trimmed_and_blank_lines_skipped() {
        let text = "\n   \n  0x0E, 0x0F ;  ERASE BINARY ;7.2.7  \n\n";
        let records = parse_table(text).expect("table parses");
        assert_eq!(
            records,
            vec![InstructionRecord {
                byte_sequence: "0x0E, 0x0F",
                name: "ERASE BINARY",
                reference: "7.2.7",
            }]
        );
    }

    #[rstest]
    fn extra_fields_are_ignored() {
        let records = parse_table("0xA4; SELECT; 7.1.1; see also 7.1.2").expect("table parses");
        let record = records.first().expect("one record");
        assert_eq!(record.reference, "7.1.1");
    }

    #[rstest]
    fn reference_may_contain_parentheses() {
        let records = parse_table("0xB2, 0xB3; READ RECORD; (S) 7.3.3").expect("table parses");
        let record = records.first().expect("one record");
        assert_eq!(record.reference, "(S) 7.3.3");
    }

    #[rstest]
    #[case("0xA4; SELECT", "0x84; GET CHALLENGE; 7.5.3\n0xA4; SELECT\n0xC0; GET RESPONSE; 7.6.1", 2)]
    #[case("0xA4", "0xA4", 1)]
    #[case("0xA4; SELECT;", "\n\n0xA4; SELECT;", 3)]
    #[case("; SELECT; 7.1.1", "; SELECT; 7.1.1", 1)]
    #[case("0xA4;  ; 7.1.1", "0xA4;  ; 7.1.1", 1)]
    fn malformed_rows_are_rejected_with_their_text(
        #[case] row: &str,
        #[case] text: &str,
        #[case] line_number: usize,
    ) {
        let err = parse_table(text).expect_err("malformed row must fail");
        match err {
            GenError::MalformedRow {
                line_number: actual_number,
                line,
            } => {
                assert_eq!(actual_number, line_number);
                assert_eq!(line, row);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("0xA4", 1)]
    #[case("0x0E, 0x0F", 2)]
    #[case("0x0E, 0x0F,", 2)]
    #[case("", 0)]
    fn byte_count_counts_list_items(#[case] byte_sequence: &str, #[case] expected: usize) {
        let record = InstructionRecord {
            byte_sequence,
            name: "SELECT",
            reference: "7.1.1",
        };
        assert_eq!(record.byte_count(), expected);
    }
}
