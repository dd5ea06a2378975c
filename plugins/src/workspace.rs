use std::path::{Path, PathBuf};

use specview_core::api as core_api;

/// Marker file of a PHP project root.
const PROJECT_MARKER: &str = "composer.json";

/// Workspace backed by the filesystem: the active file is whatever the user
/// named last, and project folders are the configured roots.
#[derive(Debug, Clone, Default)]
pub struct FsWorkspace {
    active: Option<PathBuf>,
    roots: Vec<PathBuf>,
}

impl FsWorkspace {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            active: None,
            roots: roots.into_iter().map(absolute).collect(),
        }
    }

    pub fn with_active(mut self, file: Option<PathBuf>) -> Self {
        self.active = file.map(absolute);
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

fn nearest_project(file: &Path) -> Option<PathBuf> {
    file.ancestors()
        .skip(1)
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .map(Path::to_path_buf)
}

impl core_api::Workspace for FsWorkspace {
    /// Files are only ever read from disk and there are no unsaved buffers,
    /// so the active file is always reported unmodified. The session only
    /// saves modified files, so [`Workspace::save`] is never reached here.
    ///
    /// [`Workspace::save`]: core_api::Workspace::save
    fn active_file(&self) -> Option<core_api::ActiveFile> {
        self.active.as_ref().map(|p| core_api::ActiveFile {
            path: Some(p.clone()),
            modified: false,
        })
    }

    /// Nothing to write: see `active_file`.
    fn save(&mut self, file: &core_api::ActiveFile) -> std::io::Result<()> {
        tracing::debug!(target: "specview.workspace", path = ?file.path, "save requested");
        Ok(())
    }

    fn project_folder(&self, file: &Path) -> Option<PathBuf> {
        self.roots
            .iter()
            .find(|root| file.starts_with(root))
            .cloned()
            .or_else(|| nearest_project(file))
    }

    fn root_folder(&self) -> Option<PathBuf> {
        self.roots.first().cloned()
    }

    fn open(&mut self, path: &Path) -> std::io::Result<()> {
        let path = absolute(path.to_path_buf());
        if !path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a file", path.display()),
            ));
        }
        tracing::info!(target: "specview.workspace", path = %path.display(), "active file changed");
        self.active = Some(path);
        Ok(())
    }
}
