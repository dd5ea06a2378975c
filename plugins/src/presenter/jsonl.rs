use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use specview_core::api as core_api;

#[derive(Debug, Serialize)]
struct PanelEvent<'a> {
    v: u8,
    #[serde(rename = "type")]
    event_type: &'static str,
    ts: String,
    visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<&'a str>,
}

impl<'a> PanelEvent<'a> {
    fn new(event_type: &'static str, visible: bool) -> Self {
        Self {
            v: 1,
            event_type,
            ts: Utc::now().to_rfc3339(),
            visible,
            header_html: None,
            body_html: None,
            is_error: None,
            font_size: None,
        }
    }
}

/// Panel for tooling: one JSON object per line for every panel change.
pub struct JsonlPanel<W: Write = std::io::Stdout> {
    out: W,
    visible: bool,
}

impl JsonlPanel {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonlPanel<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &PanelEvent<'_>) {
        let line = match serde_json::to_string(event) {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(target: "specview.presenter", error = %e, "panel event not serialisable");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            tracing::warn!(target: "specview.presenter", error = %e, "jsonl write failed");
        }
    }
}

impl<W: Write> core_api::Presenter for JsonlPanel<W> {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn update(&mut self, summary: &core_api::Summary) {
        let mut event = PanelEvent::new("panel.update", self.visible);
        event.header_html = Some(&summary.header_html);
        event.body_html = Some(&summary.body_html);
        event.is_error = Some(summary.is_error);
        self.emit(&event);
    }

    fn show(&mut self) {
        self.visible = true;
        self.emit(&PanelEvent::new("panel.show", true));
    }

    fn hide(&mut self) {
        self.visible = false;
        self.emit(&PanelEvent::new("panel.hide", false));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_font_size(&mut self, size: &str) {
        let mut event = PanelEvent::new("panel.font_size", self.visible);
        event.font_size = Some(size);
        self.emit(&event);
    }
}
