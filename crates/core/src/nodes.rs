//! Line classification for section bodies.
//!
//! Each body line is classified on its own, with no state carried between lines. The rules
//! are tried in a fixed priority order:
//!
//! 1. `- **Key**: value` → [`LineNode::KeyValuePair`]
//! 2. `1. **Title**: detail` → [`LineNode::NumberedItem`]; any other `1.` line is
//!    [`LineNode::Plain`] with its number kept
//! 3. `- anything` → [`LineNode::BulletItem`], split into key and value when it carries a bold
//!    prefix
//! 4. any other non-blank line → [`LineNode::Plain`]
//!
//! Blank lines produce no node. Lines that look like rule 1 but do not complete its pattern
//! fall through to the later rules.

/// Render node for one line of a section body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineNode {
    KeyValuePair {
        key: String,
        value: String,
    },
    NumberedItem {
        title: String,
        detail: String,
    },
    /// A bulleted line. With a `key`, `text` holds the value that followed the bold key;
    /// without one it is the line minus its bullet marker.
    BulletItem {
        key: Option<String>,
        text: String,
    },
    Plain {
        text: String,
    },
}

/// Classifies every line of a section body.
pub fn content_nodes(content: &str) -> Vec<LineNode> {
    content.lines().filter_map(classify_line).collect()
}

/// Classifies a single body line, returning `None` for blank lines.
pub fn classify_line(line: &str) -> Option<LineNode> {
    key_value_pair(line)
        .or_else(|| numbered_line(line))
        .or_else(|| bullet_item(line))
        .or_else(|| plain(line))
}

fn key_value_pair(line: &str) -> Option<LineNode> {
    let rest = line.trim_start().strip_prefix("- **")?;
    let (key, value) = split_bold(rest, strict_value)?;
    Some(LineNode::KeyValuePair {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

/// Numbered lines always produce a node once the `<digits>.` prefix is present.
fn numbered_line(line: &str) -> Option<LineNode> {
    let after_number = strip_ordinal(line)?;

    let item = strip_leading_whitespace(after_number)
        .and_then(|rest| rest.strip_prefix("**"))
        .and_then(|rest| split_bold(rest, loose_value));

    Some(match item {
        Some((title, detail)) => LineNode::NumberedItem {
            title: title.to_owned(),
            detail: detail.to_owned(),
        },
        None => LineNode::Plain {
            text: line.to_owned(),
        },
    })
}

fn bullet_item(line: &str) -> Option<LineNode> {
    if !line.trim().starts_with('-') {
        return None;
    }
    let after_dash = line.trim_start().strip_prefix('-')?;

    let pair = strip_leading_whitespace(after_dash)
        .and_then(|rest| rest.strip_prefix("**"))
        .and_then(|rest| split_bold(rest, loose_value));

    Some(match pair {
        Some((key, value)) => LineNode::BulletItem {
            key: Some(key.to_owned()),
            text: value.to_owned(),
        },
        None => LineNode::BulletItem {
            key: None,
            text: after_dash.trim_start().to_owned(),
        },
    })
}

fn plain(line: &str) -> Option<LineNode> {
    if line.trim().is_empty() {
        return None;
    }
    Some(LineNode::Plain {
        text: line.to_owned(),
    })
}

/// Strips a leading `<digits>.` from the raw line.
fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}

/// Strips at least one leading whitespace character.
fn strip_leading_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start();
    (trimmed.len() < s.len()).then_some(trimmed)
}

/// Splits `rest` (the text just after an opening `**`) into a bold key and its tail.
///
/// The key is the shortest non-empty prefix closed by `**` whose tail is accepted by
/// `tail_value`.
fn split_bold<'a>(
    rest: &'a str,
    tail_value: fn(&'a str) -> Option<&'a str>,
) -> Option<(&'a str, &'a str)> {
    rest.char_indices()
        .skip(1)
        .filter(|(i, _)| rest[*i..].starts_with("**"))
        .find_map(|(i, _)| tail_value(&rest[i + 2..]).map(|value| (&rest[..i], value)))
}

/// Optional colon, exactly one space, then a non-empty value kept verbatim.
fn strict_value(tail: &str) -> Option<&str> {
    let tail = tail.strip_prefix(':').unwrap_or(tail);
    tail.strip_prefix(' ').filter(|value| !value.is_empty())
}

/// Optional colon, any whitespace, then a non-blank value.
fn loose_value(tail: &str) -> Option<&str> {
    let tail = tail.strip_prefix(':').unwrap_or(tail);
    Some(tail.trim_start()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv(key: &str, value: &str) -> LineNode {
        LineNode::KeyValuePair {
            key: key.into(),
            value: value.into(),
        }
    }

    fn plain_node(text: &str) -> LineNode {
        LineNode::Plain { text: text.into() }
    }

    #[test]
    fn test_key_value_pair() {
        assert_eq!(
            classify_line("- **Hemoglobin**: 11.0 gms/dl"),
            Some(kv("Hemoglobin", "11.0 gms/dl"))
        );
        assert_eq!(
            classify_line("- **Anemia** (mild to moderate)"),
            Some(kv("Anemia", "(mild to moderate)"))
        );
    }

    #[test]
    fn test_key_value_pair_on_indented_line() {
        assert_eq!(
            classify_line("   - **Severity**: Mild to moderate."),
            Some(kv("Severity", "Mild to moderate."))
        );
    }

    #[test]
    fn test_key_value_pair_keeps_value_spacing() {
        assert_eq!(classify_line("- **Note**:  spaced"), Some(kv("Note", " spaced")));
    }

    #[test]
    fn test_key_value_prefix_without_value_falls_through() {
        assert_eq!(
            classify_line("- **Anemia**"),
            Some(LineNode::BulletItem {
                key: None,
                text: "**Anemia**".into()
            })
        );
    }

    #[test]
    fn test_numbered_item() {
        assert_eq!(
            classify_line("1. **Hemoglobin**: low"),
            Some(LineNode::NumberedItem {
                title: "Hemoglobin".into(),
                detail: "low".into()
            })
        );
        assert_eq!(
            classify_line("12.  **S. Calcium**:8.1 mg/dl"),
            Some(LineNode::NumberedItem {
                title: "S. Calcium".into(),
                detail: "8.1 mg/dl".into()
            })
        );
    }

    #[test]
    fn test_numbered_without_bold_keeps_number() {
        assert_eq!(
            classify_line("2. plain text with no bold"),
            Some(plain_node("2. plain text with no bold"))
        );
        assert_eq!(classify_line("3.**Tight**: x"), Some(plain_node("3.**Tight**: x")));
        assert_eq!(classify_line("4. **Title**"), Some(plain_node("4. **Title**")));
    }

    #[test]
    fn test_numbered_colon_without_detail_is_plain() {
        assert_eq!(classify_line("1. **Title**:"), Some(plain_node("1. **Title**:")));
        assert_eq!(classify_line("1. **Title**:   "), Some(plain_node("1. **Title**:   ")));
    }

    #[test]
    fn test_content_nodes_strips_crlf() {
        assert_eq!(
            content_nodes("- **A**: x\r\nplain\r\n1. **B**: y\r\n"),
            vec![
                kv("A", "x"),
                plain_node("plain"),
                LineNode::NumberedItem {
                    title: "B".into(),
                    detail: "y".into()
                },
            ]
        );
    }

    #[test]
    fn test_indented_number_is_not_numbered() {
        assert_eq!(classify_line("  1. **A**: b"), Some(plain_node("  1. **A**: b")));
    }

    #[test]
    fn test_bullet_with_bold_key() {
        assert_eq!(
            classify_line("-\t**Next Steps**:Allergy testing"),
            Some(LineNode::BulletItem {
                key: Some("Next Steps".into()),
                text: "Allergy testing".into()
            })
        );
    }

    #[test]
    fn test_plain_bullet_strips_marker() {
        assert_eq!(
            classify_line("  -   drink more water"),
            Some(LineNode::BulletItem {
                key: None,
                text: "drink more water".into()
            })
        );
        assert_eq!(
            classify_line("-no space"),
            Some(LineNode::BulletItem {
                key: None,
                text: "no space".into()
            })
        );
    }

    #[test]
    fn test_plain_and_blank() {
        assert_eq!(
            classify_line("  Calcium is essential."),
            Some(plain_node("  Calcium is essential."))
        );
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line(" \t "), None);
    }

    #[test]
    fn test_lazy_key_match() {
        assert_eq!(
            classify_line("- **A** and **B**: c"),
            Some(kv("A", "and **B**: c"))
        );
    }

    #[test]
    fn test_content_nodes_skips_blank_lines() {
        let nodes = content_nodes("1. **Hemoglobin**: low\n\n   - **Severity**: Mild.\nDone");
        assert_eq!(
            nodes,
            vec![
                LineNode::NumberedItem {
                    title: "Hemoglobin".into(),
                    detail: "low".into()
                },
                kv("Severity", "Mild."),
                plain_node("Done"),
            ]
        );
    }

    #[test]
    fn test_node_serialises_with_kind_tag() {
        let json = serde_json::to_value(kv("Hemoglobin", "low")).unwrap();
        assert_eq!(json["kind"], "key_value_pair");
        assert_eq!(json["key"], "Hemoglobin");
    }
}
