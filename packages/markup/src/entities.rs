//! Character reference handling for text and attribute values.

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
];

/// Decode named and numeric character references.
///
/// Unknown or malformed references are kept verbatim.
pub fn decode(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];

        match candidate.find(';').and_then(|end| {
            decode_reference(&candidate[..end]).map(|ch| (ch, end))
        }) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let hex = numeric
            .strip_prefix('x')
            .or_else(|| numeric.strip_prefix('X'));
        let code = match hex {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    NAMED
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, ch)| *ch)
}

/// Escape text content
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a double-quoted attribute value
pub fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_and_numeric() {
        assert_eq!(decode("a &amp; b"), "a & b");
        assert_eq!(decode("&lt;video&gt;"), "<video>");
        assert_eq!(decode("&#39;q&#x27;"), "'q'");
        assert_eq!(decode("x&nbsp;y"), "x\u{a0}y");
    }

    #[test]
    fn test_decode_keeps_unknown_references() {
        assert_eq!(decode("AT&T"), "AT&T");
        assert_eq!(decode("&bogus; &amp;"), "&bogus; &");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute(r#"https://x/y.mp4?a=1&b="2""#),
            "https://x/y.mp4?a=1&amp;b=&quot;2&quot;"
        );
    }

    #[test]
    fn test_escape_then_decode() {
        let raw = r#"<a href="x">&'"#;
        assert_eq!(decode(&escape_attribute(raw)), raw);
        assert_eq!(decode(&escape_text(raw)), raw);
    }
}
