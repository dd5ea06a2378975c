//! Turns raw phpspec output into a display-ready [`Summary`].
//!
//! Everything here is a pure `&str -> String` function so the views can
//! recompute a summary on every output chunk.

mod body;
mod header;
mod links;
mod patterns;

pub use body::{clean_body, escape_html};
pub use header::{extract_header, parse_command, FALLBACK_HEADER};
pub use links::{file_links, FileLink};
pub use patterns::{PatternRole, PatternSet};

use serde::Serialize;

/// Header and body markup for one snapshot of a run's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub header_html: String,
    pub body_html: String,
    pub is_error: bool,
}

impl Summary {
    /// What an idle panel shows before (or between) runs.
    pub fn placeholder() -> Self {
        Self {
            header_html: FALLBACK_HEADER.to_string(),
            body_html: "No Output".to_string(),
            is_error: false,
        }
    }
}

/// Builds a [`Summary`] from `raw` using the built-in pattern set.
pub fn summarize(raw: &str, invoked: Option<&str>, is_error: bool) -> Summary {
    Summary {
        header_html: extract_header(raw, invoked),
        body_html: clean_body(raw),
        is_error,
    }
}
