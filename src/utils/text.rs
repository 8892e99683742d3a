//! Safe HTML-to-text extraction
//!
//! Campaign titles come from a rich-text admin editor and may carry markup.
//! This strips tags and decodes the common entities so the display never
//! renders raw HTML.

/// Strip tags and decode entities, leaving plain text.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                // Skip to the closing '>'; an unterminated tag swallows the rest
                for n in chars.by_ref() {
                    if n == '>' {
                        break;
                    }
                }
            }
            '&' => {
                let mut entity = String::new();
                let mut terminated = false;
                while let Some(&n) = chars.peek() {
                    if n == ';' {
                        chars.next();
                        terminated = true;
                        break;
                    }
                    if !(n.is_ascii_alphanumeric() || n == '#') || entity.len() > 8 {
                        break;
                    }
                    entity.push(n);
                    chars.next();
                }
                if terminated {
                    match decode_entity(&entity) {
                        Some(decoded) => out.push(decoded),
                        None => {
                            out.push('&');
                            out.push_str(&entity);
                            out.push(';');
                        }
                    }
                } else {
                    out.push('&');
                    out.push_str(&entity);
                }
            }
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(strip_html("Jackpot Offer"), "Jackpot Offer");
    }

    #[test]
    fn test_tags_stripped() {
        assert_eq!(
            strip_html("<p>Ramadan <strong>Jackpot</strong> Offer</p>"),
            "Ramadan Jackpot Offer"
        );
        assert_eq!(strip_html("<br/>"), "");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(strip_html("Courses &amp; Gifts"), "Courses & Gifts");
        assert_eq!(strip_html("&lt;150&gt; hours"), "<150> hours");
        assert_eq!(strip_html("A&nbsp;B"), "A B");
        assert_eq!(strip_html("&#2453;"), "ক");
        assert_eq!(strip_html("&#x2728;"), "✨");
    }

    #[test]
    fn test_unknown_entity_kept_verbatim() {
        assert_eq!(strip_html("AT&T"), "AT&T");
        assert_eq!(strip_html("a &bogus; b"), "a &bogus; b");
    }
}
