//! Identifier derivation for instruction names.

/// Converts a free-text instruction name into an identifier fragment.
///
/// Each whitespace-delimited word has its first character upper-cased and
/// the rest lower-cased, then the words are joined with no separator.
///
/// Only case folding is applied. Punctuation and digits pass through
/// untouched, so a name such as `EXTERNAL (/ MUTUAL) AUTHENTICATE` yields
/// `External(/Mutual)Authenticate`, which is not a legal identifier in most
/// host languages. Keeping table names free of such characters is up to
/// whoever edits the table.
///
/// Folding uses Rust's full Unicode case mappings, which agree with Go's
/// `strings.Title(strings.ToLower(..))` for ASCII but not everywhere else.
/// A mapping may expand one character into several (`ß` upper-cases to
/// `SS`, where Go keeps `ß`), and there is no title-case form (`ǆ` becomes
/// `Ǆ`, where Go produces `ǅ`). The embedded table is pure ASCII.
///
/// # Examples
///
/// ```
/// use apdu_gen::ident::derive_identifier;
///
/// assert_eq!(derive_identifier("SELECT"), "Select");
/// assert_eq!(derive_identifier("GET CHALLENGE"), "GetChallenge");
/// ```
#[must_use]
pub fn derive_identifier(name: &str) -> String {
    name.split_whitespace().map(capitalise).collect()
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    let mut result = String::with_capacity(word.len());
    if let Some(first) = chars.next() {
        result.extend(first.to_uppercase());
    }
    for ch in chars {
        result.extend(ch.to_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT", "Select")]
    #[case("GET CHALLENGE", "GetChallenge")]
    #[case("GENERATE ASYMMETRIC KEY PAIR", "GenerateAsymmetricKeyPair")]
    #[case("TERMINATE DF", "TerminateDf")]
    #[case("EXTERNAL (/ MUTUAL) AUTHENTICATE", "External(/Mutual)Authenticate")]
    #[case("ERASE RECORD (S)", "EraseRecord(s)")]
    #[case("a", "A")]
    #[case("x Y z", "XYZ")]
    #[case("  read \t binary  ", "ReadBinary")]
    #[case("", "")]
    fn derives_title_cased_identifiers(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(derive_identifier(name), expected);
    }

    #[rstest]
    fn punctuation_is_kept_verbatim() {
        let ident = derive_identifier("(/ MUTUAL)");
        assert!(ident.starts_with("(/"), "leading punctuation preserved: {ident}");
        assert_eq!(ident, "(/Mutual)");
    }

    #[rstest]
    #[case("\u{df}", "SS")]
    #[case("\u{1c6}x", "\u{1c4}x")]
    fn non_ascii_folding_uses_full_case_mappings(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(derive_identifier(name), expected);
    }

    #[rstest]
    fn non_ascii_letters_are_folded() {
        assert_eq!(derive_identifier("ÉCRIRE DONNÉES"), "ÉcrireDonnées");
    }
}
