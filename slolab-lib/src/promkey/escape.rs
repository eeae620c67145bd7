use crate::Result;
use ohno::bail;

/// Escape a label value for the Prometheus text format.
///
/// Backslash, double quote, newline, tab and carriage return are escaped; every other
/// character is emitted as-is.
#[must_use]
pub fn escape_label_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str(r"\n"),
            '\t' => out.push_str(r"\t"),
            '\r' => out.push_str(r"\r"),
            other => out.push(other),
        }
    }
    out
}

/// Reverse [`escape_label_value`].
///
/// An unknown escape sequence yields the escaped character itself, matching how Prometheus
/// treats them. A trailing lone backslash is an error.
pub fn unescape_label_value(value: &str) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => bail!("dangling escape at end of label value {value:?}"),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_value_is_unchanged() {
        assert_eq!(escape_label_value("success"), "success");
        assert_eq!(escape_label_value(""), "");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_label_value(r"a\b"), r"a\\b");
        assert_eq!(escape_label_value("say \"hi\""), r#"say \"hi\""#);
        assert_eq!(escape_label_value("line1\nline2"), r"line1\nline2");
        assert_eq!(escape_label_value("a\tb\rc"), r"a\tb\rc");
    }

    #[test]
    fn test_unescape_known_sequences() {
        assert_eq!(unescape_label_value(r#"\\ \" \n \t \r"#).unwrap(), "\\ \" \n \t \r");
    }

    #[test]
    fn test_unescape_unknown_sequence_is_literal() {
        assert_eq!(unescape_label_value(r"\x\y").unwrap(), "xy");
    }

    #[test]
    fn test_unescape_dangling_backslash() {
        let err = unescape_label_value("abc\\").unwrap_err();
        assert!(err.to_string().contains("dangling escape"));
    }

    #[test]
    fn test_escape_unescape_inverse() {
        let samples = [
            "",
            "plain",
            "\\",
            "\\\\",
            "\"",
            "\n\t\r",
            "mixed \\n literal and \n real newline",
            "trailing backslash \\",
            "\u{0}\u{1}\u{7f} control",
            "unicode ✓ ünïcödé",
            "\\\"\\n",
        ];

        for s in samples {
            let escaped = escape_label_value(s);
            assert_eq!(unescape_label_value(&escaped).unwrap(), s, "roundtrip failed for {s:?}");
        }
    }
}
