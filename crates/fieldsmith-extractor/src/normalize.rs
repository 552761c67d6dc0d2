//! Character normalization
//!
//! Maps typographic punctuation and Unicode whitespace variants to their
//! ASCII equivalents so the line heuristics downstream only ever see plain
//! quotes, dashes and spaces. Every replacement is ASCII, which makes the
//! mapping idempotent.

/// Normalize punctuation, whitespace and line endings
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{2026}' => out.push_str("..."),
            _ => {
                if let Some(mapped) = replacement(c) {
                    out.push(mapped);
                } else if !is_removed(c) {
                    out.push(c);
                }
            }
        }
    }

    out
}

fn replacement(c: char) -> Option<char> {
    let mapped = match c {
        // Double quote variants, guillemets and angle quotes
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}'
        | '\u{275D}' | '\u{275E}' | '\u{301D}' | '\u{301E}' | '\u{FF02}' | '\u{00AB}'
        | '\u{00BB}' | '\u{2039}' | '\u{203A}' => '"',

        // Single quote and apostrophe variants
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}'
        | '\u{275B}' | '\u{275C}' | '\u{02BC}' | '\u{FF07}' => '\'',

        // Dashes and minus signs
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}' => '-',

        // Bullets
        '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{2219}' | '\u{25AA}' | '\u{25CF}'
        | '\u{25E6}' | '\u{25A0}' | '\u{2981}' => '-',

        // Space variants
        '\u{00A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}'
        | '\u{3000}' => ' ',

        _ => return None,
    };
    Some(mapped)
}

fn is_removed(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quotes() {
        assert_eq!(normalize("\u{201C}Status\u{201D}"), "\"Status\"");
        assert_eq!(normalize("\u{00AB}Oui\u{00BB}"), "\"Oui\"");
        assert_eq!(normalize("patient\u{2019}s"), "patient's");
    }

    #[test]
    fn test_dashes_and_bullets() {
        assert_eq!(normalize("1\u{2013}255"), "1-255");
        assert_eq!(normalize("a \u{2014} b"), "a - b");
        assert_eq!(normalize("\u{2022} Field Label: Status"), "- Field Label: Status");
    }

    #[test]
    fn test_spaces_and_zero_width() {
        assert_eq!(normalize("API\u{00A0}Name"), "API Name");
        assert_eq!(normalize("\u{FEFF}Status__c"), "Status__c");
        assert_eq!(normalize("Sta\u{200B}tus"), "Status");
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(normalize("and so on\u{2026}"), "and so on...");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize("\r\r\n"), "\n\n");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "## 1. Patient_Name__c\n- Type: Text(255)";
        assert_eq!(normalize(text), text);
    }

    const SOURCES: &[char] = &[
        '\u{201C}', '\u{201D}', '\u{2019}', '\u{2013}', '\u{2014}', '\u{2022}', '\u{00A0}',
        '\u{2026}', '\u{200B}', '\u{FEFF}', '\u{00AB}', '\u{3000}', '\r',
    ];

    fn noisy_text() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            "[a-zA-Z0-9 _:\n]{0,8}",
            proptest::sample::select(SOURCES).prop_map(|c| c.to_string()),
        ];
        proptest::collection::vec(piece, 0..40).prop_map(|parts| parts.concat())
    }

    proptest! {
        /// Property: normalizing twice equals normalizing once
        #[test]
        fn test_idempotent(s in any::<String>()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: idempotent on text dense with mapped characters
        #[test]
        fn test_idempotent_noisy(s in noisy_text()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: no mapped source character survives
        #[test]
        fn test_sources_removed(s in noisy_text()) {
            let out = normalize(&s);
            for c in SOURCES {
                prop_assert!(!out.contains(*c));
            }
        }
    }
}
