use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// What a summary pattern picks out of the runner output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRole {
    /// `OK (3 tests, 5 assertions)` or `Tests: 4, Assertions: 9, Failures: 1`
    Outcome,
    /// `Time: 21 ms, Memory: 4.00 MB`
    Timing,
    /// Runner version banner.
    Banner,
}

/// Ordered `(role, regex)` pairs. Every regex has exactly one capture group.
/// The first pattern that matches becomes the emphasised header fragment.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<(PatternRole, Regex)>,
}

const OUTCOME: &str = r"\n+(?:Failures!\n)?(OK \([\d,\w ]+\)|Tests: \d+, Assertions: \d+, (?:Failures|Risky): \d+)\.?\n*";
const TIMING: &str = r"(Time: [\d\. \w]+, Memory: [\d\. \w]+)\n*";
const BANNER: &str = r"(PHPUnit [\d\. \w]+)\n+";

lazy_static! {
    static ref BUILTIN: PatternSet = PatternSet::new(&[
        (PatternRole::Outcome, OUTCOME),
        (PatternRole::Timing, TIMING),
        (PatternRole::Banner, BANNER),
    ])
    .expect("built-in summary patterns compile");
}

impl PatternSet {
    /// Compiles case-insensitive, ASCII-only patterns (`\w` and `\d` never
    /// match non-ASCII text).
    pub fn new(patterns: &[(PatternRole, &str)]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|(role, p)| Ok((*role, ascii_regex(p, true)?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    pub fn builtin() -> &'static PatternSet {
        &BUILTIN
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternRole, &Regex)> {
        self.patterns.iter().map(|(role, re)| (*role, re))
    }

    /// Capture group 1 of each matching pattern, in pattern order.
    pub fn fragments<'t>(&self, text: &'t str) -> Vec<(PatternRole, &'t str)> {
        self.iter()
            .filter_map(|(role, re)| {
                re.captures(text)
                    .and_then(|c| c.get(1))
                    .map(|m| (role, m.as_str()))
            })
            .collect()
    }

    /// Removes the leftmost match of each pattern, in order.
    pub fn strip(&self, text: &str) -> String {
        self.iter().fold(text.to_string(), |acc, (_, re)| {
            re.replacen(&acc, 1, "").into_owned()
        })
    }
}

pub(crate) fn ascii_regex(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .unicode(false)
        .case_insensitive(case_insensitive)
        .build()
}
