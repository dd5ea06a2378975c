use std::path::{Path, PathBuf};

use crate::annotate::Summary;

/// The output panel.
pub trait Presenter {
    fn name(&self) -> &str;

    /// Replaces the panel content. Does not change visibility.
    fn update(&mut self, summary: &Summary);

    fn show(&mut self);

    fn hide(&mut self);

    fn is_visible(&self) -> bool;

    fn toggle(&mut self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    fn set_font_size(&mut self, size: &str);

    /// Called once when the session is torn down.
    fn destroy(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: None,
            detail: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: None,
            detail: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// The file the user is looking at. `path` is `None` for unsaved buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFile {
    pub path: Option<PathBuf>,
    pub modified: bool,
}

pub trait Workspace {
    fn active_file(&self) -> Option<ActiveFile>;

    fn save(&mut self, file: &ActiveFile) -> std::io::Result<()>;

    /// Project folder containing `file`, used as the working directory.
    fn project_folder(&self, file: &Path) -> Option<PathBuf>;

    /// Working directory for whole-suite runs.
    fn root_folder(&self) -> Option<PathBuf> {
        None
    }

    /// Makes `path` the active file.
    fn open(&mut self, path: &Path) -> std::io::Result<()>;
}
