use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref ANCHOR: Regex = Regex::new(r"<a>([^<]*)</a>").expect("anchor pattern compiles");
}

/// A file location that was linked in a cleaned body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLink {
    pub path: String,
    pub line: Option<u32>,
}

impl FileLink {
    fn parse(anchor_text: &str) -> Self {
        let split = anchor_text
            .rsplit_once(':')
            .filter(|(_, line)| line.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|(path, line)| Some((path, line.parse::<u32>().ok()?)));
        match split {
            Some((path, line)) => Self {
                path: path.to_string(),
                line: Some(line),
            },
            // no line, or one too large to be real
            None => Self {
                path: anchor_text.to_string(),
                line: None,
            },
        }
    }
}

impl std::fmt::Display for FileLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => f.write_str(&self.path),
        }
    }
}

/// Anchors of a body produced by [`super::clean_body`], in order.
pub fn file_links(body_html: &str) -> Vec<FileLink> {
    ANCHOR
        .captures_iter(body_html)
        .filter_map(|c| c.get(1))
        .map(|m| FileLink::parse(m.as_str()))
        .collect()
}
