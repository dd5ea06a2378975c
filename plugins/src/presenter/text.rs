use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LABEL: Regex = Regex::new(r"<div>(.*?)</div>").expect("label pattern compiles");
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("tag pattern compiles");
    static ref CHAR_REF: Regex = Regex::new(r"&#(\d+);").expect("char ref pattern compiles");
}

/// Plain-text rendering of summary markup: the command label becomes a
/// `[label]` prefix, tags are dropped and character references decoded.
pub fn html_to_text(html: &str) -> String {
    let labelled = LABEL.replace_all(html, "[$1] ");
    let untagged = TAG.replace_all(&labelled, "");
    CHAR_REF
        .replace_all(&untagged, |caps: &regex::Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
