use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{ascii_regex, PatternSet};

pub const FALLBACK_HEADER: &str = "phpspec output";

const DIVIDER: &str = "<span class=\"divider\"> | </span>";

lazy_static! {
    static ref COMMAND_PATTERNS: [Regex; 2] = [
        // phpspec run spec/Acme/FooSpec.php -> FooSpec
        ascii_regex(r"phpspec [/\w\- _=]+/(\w+)(?:\.php)?$", true)
            .expect("target pattern compiles"),
        ascii_regex(r"--filter=([\w_]+)", true).expect("filter pattern compiles"),
    ];
}

/// Builds the header markup from whichever summary lines `raw` contains.
pub fn extract_header(raw: &str, invoked: Option<&str>) -> String {
    extract_header_with(PatternSet::builtin(), raw, invoked)
}

pub(crate) fn extract_header_with(set: &PatternSet, raw: &str, invoked: Option<&str>) -> String {
    let mut info: Vec<String> = set
        .fragments(raw)
        .into_iter()
        .map(|(_, frag)| format!("<span>{frag}</span>"))
        .collect();

    let Some(first) = info.first_mut() else {
        return FALLBACK_HEADER.to_string();
    };
    *first = format!("<strong>{first}</strong>");

    let mut header = String::new();
    if let Some(label) = invoked.map(parse_command).filter(|l| !l.is_empty()) {
        header.push_str(&format!("<div>{label}</div>"));
    }
    header.push_str(&info.join(DIVIDER));
    header
}

/// Short `Spec::filter` label for an invocation, empty if nothing matched.
pub fn parse_command(cmd: &str) -> String {
    COMMAND_PATTERNS
        .iter()
        .filter_map(|re| re.captures(cmd).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join("::")
}
