// nmlrs/src/scanner/quoting.rs

//! Quoting-aware character search and quote escaping.
//!
//! Every position handled here is a byte offset into a `&str`. A quote mark
//! preceded by a backslash is escaped and does not open or close a quoted
//! region.

/// The quote mark used by namelist input and output.
pub const QUOTE: char = '"';

/// Characters that force a string value to be quoted on output.
const QUOTE_TRIGGERS: [char; 4] = ['$', '"', ',', '&'];

/// Literal used to represent a null string slot.
pub const NULL_STRING: &str = "{NULL}";

/// Check whether byte position `pos` of `s` lies inside a `quote`-delimited region.
///
/// The scan starts at the beginning of `s` and toggles on every unescaped
/// quote mark strictly before `pos`, so an opening quote itself is outside
/// and a closing quote is inside.
pub fn is_quoted(s: &str, pos: usize, quote: char) -> bool {
    let mut in_quotes = false;
    let mut prev = None;
    for (i, c) in s.char_indices() {
        if i >= pos {
            break;
        }
        if c == quote && prev != Some('\\') {
            in_quotes = !in_quotes;
        }
        prev = Some(c);
    }
    in_quotes
}

/// Find the first occurrence of `c` in `s` that is not inside a quoted region.
///
/// `s` is assumed to start outside quotes.
pub fn next_unquoted(s: &str, c: char, quote: char) -> Option<usize> {
    next_unquoted_from(s, c, quote, false)
}

/// [`next_unquoted`] for a slice that may start inside a quoted region.
pub fn next_unquoted_from(s: &str, c: char, quote: char, starts_quoted: bool) -> Option<usize> {
    let mut in_quotes = starts_quoted;
    let mut prev = None;
    for (i, ch) in s.char_indices() {
        if ch == quote && prev != Some('\\') {
            in_quotes = !in_quotes;
        } else if ch == c && !in_quotes {
            return Some(i);
        }
        prev = Some(ch);
    }
    None
}

/// Byte positions of every unquoted occurrence of `c` in `s`.
pub fn unquoted_positions(s: &str, c: char, quote: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut offset = 0;
    let mut rest = s;
    // Quote state carries across slices because each hit is outside quotes.
    while let Some(pos) = next_unquoted(rest, c, quote) {
        positions.push(offset + pos);
        let step = pos + c.len_utf8();
        offset += step;
        rest = &rest[step..];
    }
    positions
}

/// Count occurrences of `c` in `s` before byte position `end`, ignoring quoted ones.
pub fn count_occurrences(s: &str, c: char, end: usize) -> usize {
    let mut end = end.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    unquoted_positions(&s[..end], c, QUOTE).len()
}

/// Check that every unescaped quote mark in `s` has a partner.
pub fn has_balanced_quotes(s: &str, quote: char) -> bool {
    let mut count = 0usize;
    let mut prev = None;
    for c in s.chars() {
        if c == quote && prev != Some('\\') {
            count += 1;
        }
        prev = Some(c);
    }
    count % 2 == 0
}

/// Strip a matching pair of surrounding quote marks in place.
///
/// Embedded `\"` sequences become plain `"`. Strings that are not wrapped in
/// quotes are left untouched.
pub fn un_quote(s: &mut String) {
    if !is_wrapped_in_quotes(s) {
        return;
    }
    let inner = s[1..s.len() - 1].replace("\\\"", "\"");
    *s = inner;
}

fn is_wrapped_in_quotes(s: &str) -> bool {
    if s.len() < 2 || !s.starts_with(QUOTE) || !s.ends_with(QUOTE) {
        return false;
    }
    // The closing mark must not itself be escaped, unless it is the `""` pair.
    s.len() == 2 || !s[..s.len() - 1].ends_with('\\')
}

/// Prepend a backslash to every quote mark not already preceded by one.
pub fn escape_quotes(s: &mut String) {
    if !s.contains(QUOTE) {
        return;
    }
    let mut escaped = String::with_capacity(s.len() * 2);
    let mut prev = None;
    for c in s.chars() {
        if c == QUOTE && prev != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        prev = Some(c);
    }
    *s = escaped;
}

/// Check whether `s` contains any whitespace.
pub fn contains_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Check whether a string value must be quoted on output.
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty() || contains_whitespace(s) || s.contains(&QUOTE_TRIGGERS[..])
}

/// Render a string slot for output: escape embedded quotes and wrap in quotes
/// when the content requires it. `None` renders as `{NULL}`.
pub fn render_string(value: Option<&str>) -> String {
    let mut text = value.unwrap_or(NULL_STRING).to_string();
    escape_quotes(&mut text);
    if needs_quotes(&text) {
        format!("{}{}{}", QUOTE, text, QUOTE)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quoted() {
        let s = r#"a = "x, y", b"#;
        let comma_inside = s.find(", y").unwrap();
        let comma_outside = s.rfind(',').unwrap();
        assert!(is_quoted(s, comma_inside, QUOTE));
        assert!(!is_quoted(s, comma_outside, QUOTE));
        assert!(!is_quoted(s, 0, QUOTE));
    }

    #[test]
    fn test_is_quoted_ignores_escaped_marks() {
        let s = r#""a \" b", c"#;
        let comma = s.find(',').unwrap();
        assert!(!is_quoted(s, comma, QUOTE));
        let b = s.find('b').unwrap();
        assert!(is_quoted(s, b, QUOTE));
    }

    #[test]
    fn test_next_unquoted() {
        assert_eq!(next_unquoted(r#""a,b",c"#, ',', QUOTE), Some(5));
        assert_eq!(next_unquoted(r#""a,b""#, ',', QUOTE), None);
        assert_eq!(next_unquoted("x=1", '=', QUOTE), Some(1));
        assert_eq!(next_unquoted("", ',', QUOTE), None);
    }

    #[test]
    fn test_next_unquoted_from_quoted_start() {
        assert_eq!(next_unquoted_from(r#"a! b" ! c"#, '!', QUOTE, true), Some(6));
        assert_eq!(next_unquoted_from(r#"a! b" ! c"#, '!', QUOTE, false), Some(1));
    }

    #[test]
    fn test_unquoted_positions() {
        assert_eq!(unquoted_positions(r#"1, "2,3", 4,"#, ',', QUOTE), vec![1, 8, 11]);
    }

    #[test]
    fn test_count_occurrences() {
        let s = r#"a,b,"c,d",e"#;
        assert_eq!(count_occurrences(s, ',', s.len()), 3);
        assert_eq!(count_occurrences(s, ',', 3), 1);
        assert_eq!(count_occurrences(s, ',', 100), 3);
    }

    #[test]
    fn test_balanced_quotes() {
        assert!(has_balanced_quotes(r#"a = "b", c = "d""#, QUOTE));
        assert!(has_balanced_quotes(r#"a = "say \"hi\"""#, QUOTE));
        assert!(!has_balanced_quotes(r#"a = "b"#, QUOTE));
    }

    #[test]
    fn test_un_quote() {
        let mut s = r#""hello world""#.to_string();
        un_quote(&mut s);
        assert_eq!(s, "hello world");

        let mut s = r#""say \"hi\"""#.to_string();
        un_quote(&mut s);
        assert_eq!(s, r#"say "hi""#);

        let mut s = r#""""#.to_string();
        un_quote(&mut s);
        assert_eq!(s, "");

        let mut s = "bare".to_string();
        un_quote(&mut s);
        assert_eq!(s, "bare");

        let mut s = r#""open"#.to_string();
        un_quote(&mut s);
        assert_eq!(s, r#""open"#);
    }

    #[test]
    fn test_escape_quotes() {
        let mut s = r#"say "hi""#.to_string();
        escape_quotes(&mut s);
        assert_eq!(s, r#"say \"hi\""#);

        let mut s = r#"already \"done\""#.to_string();
        escape_quotes(&mut s);
        assert_eq!(s, r#"already \"done\""#);

        let mut s = r#"""#.to_string();
        escape_quotes(&mut s);
        assert_eq!(s, r#"\""#);
    }

    #[test]
    fn test_quote_symmetry() {
        for original in ["plain", "a, b, c", r#"say "hi""#, "", "tab\there", "&end"] {
            let mut s = original.to_string();
            escape_quotes(&mut s);
            let mut quoted = format!("\"{}\"", s);
            un_quote(&mut quoted);
            assert_eq!(quoted, original);
        }
    }

    #[test]
    fn test_render_string() {
        assert_eq!(render_string(Some("simple")), "simple");
        assert_eq!(render_string(Some("a, b")), "\"a, b\"");
        assert_eq!(render_string(Some("")), "\"\"");
        assert_eq!(render_string(Some("$HOME")), "\"$HOME\"");
        assert_eq!(render_string(Some(r#"q"x"#)), r#""q\"x""#);
        assert_eq!(render_string(None), "{NULL}");
    }
}
