use std::io::Write;

use specview_core::api as core_api;

use super::text::html_to_text;

/// Panel printed to a terminal. Content is written whenever the panel is
/// shown, and on updates while it is visible.
pub struct TerminalPanel<W: Write = std::io::Stdout> {
    out: W,
    visible: bool,
    current: core_api::Summary,
    rendered: Option<core_api::Summary>,
}

impl TerminalPanel {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalPanel<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: false,
            current: core_api::Summary::placeholder(),
            rendered: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self) {
        if self.rendered.as_ref() == Some(&self.current) {
            return;
        }
        let marker = if self.current.is_error { "✘" } else { "✔" };
        let mut text = format!(
            "{marker} {}\n\n{}\n",
            html_to_text(&self.current.header_html),
            html_to_text(&self.current.body_html)
        );
        let links = core_api::file_links(&self.current.body_html);
        if !links.is_empty() {
            text.push_str("\nLocations:\n");
            for (i, link) in links.iter().enumerate() {
                text.push_str(&format!("  {}) {}\n", i + 1, link));
            }
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(target: "specview.presenter", error = %e, "terminal write failed");
            return;
        }
        self.rendered = Some(self.current.clone());
    }
}

impl<W: Write> core_api::Presenter for TerminalPanel<W> {
    fn name(&self) -> &str {
        "terminal"
    }

    fn update(&mut self, summary: &core_api::Summary) {
        self.current = summary.clone();
        if self.visible {
            self.render();
        }
    }

    fn show(&mut self) {
        self.visible = true;
        self.render();
    }

    fn hide(&mut self) {
        self.visible = false;
        self.rendered = None;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_font_size(&mut self, size: &str) {
        tracing::debug!(target: "specview.presenter", size, "font size has no effect on a terminal");
    }
}
