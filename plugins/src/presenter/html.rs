use std::path::{Path, PathBuf};

use anyhow::Context;

use specview_core::api as core_api;

/// Panel kept as a standalone HTML document on disk, rewritten on every
/// change so a browser tab (or editor preview) can follow along.
pub struct HtmlPanel {
    path: PathBuf,
    visible: bool,
    font_size: String,
    current: core_api::Summary,
}

impl HtmlPanel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            visible: false,
            font_size: "14px".to_string(),
            current: core_api::Summary::placeholder(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> String {
        let mut classes = String::from("specview");
        if self.current.is_error {
            classes.push_str(" error");
        }
        if !self.visible {
            classes.push_str(" hidden");
        }
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>phpspec output</title>\n\
             <style>\n\
             .hidden {{ display: none; }}\n\
             .error .header {{ color: #c0392b; }}\n\
             .divider {{ color: #999; }}\n\
             </style>\n</head>\n<body>\n\
             <div class=\"{classes}\">\n\
             <header class=\"header\">{header}</header>\n\
             <div class=\"message\"><pre class=\"output\" style=\"font-size: {font_size}\">{body}</pre></div>\n\
             </div>\n</body>\n</html>\n",
            header = self.current.header_html,
            body = self.current.body_html,
            font_size = self.font_size,
        )
    }

    fn write(&self) {
        if let Err(e) = self.try_write() {
            tracing::warn!(target: "specview.presenter", error = %format!("{e:#}"), "html panel not written");
        }
    }

    fn try_write(&self) -> anyhow::Result<()> {
        std::fs::write(&self.path, self.document())
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl core_api::Presenter for HtmlPanel {
    fn name(&self) -> &str {
        "html"
    }

    fn update(&mut self, summary: &core_api::Summary) {
        self.current = summary.clone();
        self.write();
    }

    fn show(&mut self) {
        self.visible = true;
        self.write();
        tracing::info!(target: "specview.presenter", path = %self.path.display(), "output written");
    }

    fn hide(&mut self) {
        self.visible = false;
        self.write();
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_font_size(&mut self, size: &str) {
        self.font_size = size.to_string();
        self.write();
    }
}
