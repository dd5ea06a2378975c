use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{ascii_regex, PatternSet};

lazy_static! {
    static ref FILE_PATH: Regex = ascii_regex(
        r"(([A-Z]:)?([\\/]+(\w|-|_|\.)+)+(\.(\w|-|_)+)+(:\d+)?)",
        false,
    )
    .expect("file path pattern compiles");
}

/// Strips summary lines, escapes, links file paths and trims, in that order.
pub fn clean_body(raw: &str) -> String {
    clean_body_with(PatternSet::builtin(), raw)
}

pub(crate) fn clean_body_with(set: &PatternSet, raw: &str) -> String {
    let stripped = set.strip(raw);
    let escaped = escape_html(&stripped);
    let linked = FILE_PATH.replace_all(&escaped, "<a>$1</a>");
    linked.trim().to_string()
}

/// Replaces `<`, `>`, `&` and every char in `U+00A0..=U+9999` with a
/// decimal character reference. The range is matched case-insensitively,
/// so a char whose simple uppercase lies in it is escaped too.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '<' | '>' | '&') || in_escaped_range(c) || uppercase_in_escaped_range(c) {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

fn in_escaped_range(c: char) -> bool {
    ('\u{00A0}'..='\u{9999}').contains(&c)
}

// Multi-char uppercases and non-ASCII to ASCII mappings never fold.
fn uppercase_in_escaped_range(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if !u.is_ascii() => in_escaped_range(u),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn links_path_with_line() {
        assert_eq!(
            clean_body("Error in /src/Foo.php:42 occurred"),
            "Error in <a>/src/Foo.php:42</a> occurred"
        );
    }

    #[test]
    fn links_windows_and_relative_paths() {
        assert_eq!(
            clean_body(r"see C:\app\spec\FooSpec.php:7"),
            r"see <a>C:\app\spec\FooSpec.php:7</a>"
        );
        assert_eq!(
            clean_body("in ./vendor/acme/lib.inc.php"),
            "in .<a>/vendor/acme/lib.inc.php</a>"
        );
    }

    #[test]
    fn escapes_markup_and_high_code_points() {
        assert_eq!(escape_html("a < b && c > d"), "a &#60; b &#38;&#38; c &#62; d");
        assert_eq!(escape_html("✔ passed"), "&#10004; passed");
        assert_eq!(escape_html("café"), "caf&#233;");
        // Just past the escaped range.
        assert_eq!(escape_html("\u{9999}\u{999A}"), "&#39321;\u{999A}");
        assert_eq!(escape_html("plain \"quotes\" 'stay'"), "plain \"quotes\" 'stay'");
    }

    #[test]
    fn case_folds_into_the_escaped_range() {
        // Cherokee small letter a uppercases to U+13A0.
        assert_eq!(escape_html("\u{AB70}"), "&#43888;");
        // fullwidth a uppercases to fullwidth A, both outside the range
        assert_eq!(escape_html("\u{FF41}"), "\u{FF41}");
        assert_eq!(escape_html("\u{10428}"), "\u{10428}");
    }

    #[test]
    fn escaping_runs_before_linking() {
        let body = clean_body("<error> in /src/Foo.php & more");
        assert_eq!(body, "&#60;error&#62; in <a>/src/Foo.php</a> &#38; more");

        let without_tags = body.replace("<a>", "").replace("</a>", "");
        assert!(!without_tags.contains('<'));
        assert!(!without_tags.contains('>'));
        assert!(without_tags
            .match_indices('&')
            .all(|(i, _)| without_tags[i..].starts_with("&#")));
    }

    #[test]
    fn strips_summary_lines_and_trims() {
        let raw = "PHPUnit 9.6.0 by Sebastian Bergmann\n\n  spec body  \n\nTime: 1 ms, Memory: 2 MB\n\nOK (1 test, 1 assertion)\n";
        assert_eq!(clean_body(raw), "spec body");
    }

    #[test]
    fn idempotent_on_plain_text() {
        let once = clean_body("  3 specs\n  5 examples (5 passed)\n  12ms  \n");
        assert_eq!(clean_body(&once), once);
    }
}
