use std::cell::RefCell;
use std::io::Write;

use specview_core::api as core_api;

/// Prints notifications to stderr, keeping stdout for panel output.
pub struct TerminalNotifier<W: Write = std::io::Stderr> {
    out: RefCell<W>,
}

impl TerminalNotifier {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

fn format_notification(n: &core_api::Notification) -> String {
    let marker = match n.level {
        core_api::NotificationLevel::Success => "✔",
        core_api::NotificationLevel::Error => "✘",
    };
    let mut text = format!("{marker} {}\n", n.title);
    if let Some(desc) = &n.description {
        text.push_str(&format!("  {desc}\n"));
    }
    if let Some(detail) = n.detail.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        text.push('\n');
        for line in detail.lines() {
            text.push_str(&format!("  {line}\n"));
        }
    }
    text
}

impl<W: Write> core_api::Notifier for TerminalNotifier<W> {
    fn notify(&self, notification: &core_api::Notification) {
        match notification.level {
            core_api::NotificationLevel::Success => {
                tracing::debug!(target: "specview.notify", title = %notification.title, "success")
            }
            core_api::NotificationLevel::Error => {
                tracing::debug!(target: "specview.notify", title = %notification.title, "error")
            }
        }
        let text = format_notification(notification);
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(target: "specview.notify", error = %e, "notification not written");
        }
    }
}
