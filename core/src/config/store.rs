use tokio::sync::watch;

use crate::error::ConfigError;

use super::types::AppConfig;

/// Live configuration shared by a session and its views.
///
/// Readers take cheap snapshots with [`ConfigStore::get`]. Views that care
/// about the font size subscribe with [`ConfigStore::observe_font_size`].
pub struct ConfigStore {
    cfg: watch::Sender<AppConfig>,
    font_size: watch::Sender<String>,
}

impl ConfigStore {
    pub fn new(cfg: AppConfig) -> Self {
        let (font_size, _) = watch::channel(cfg.output_view_font_size.clone());
        let (cfg, _) = watch::channel(cfg);
        Self { cfg, font_size }
    }

    pub fn get(&self) -> AppConfig {
        self.cfg.borrow().clone()
    }

    pub fn set_key(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.get();
        next.set_key(key, value)?;
        let font_size = next.output_view_font_size.clone();
        self.cfg.send_replace(next);
        self.font_size.send_if_modified(|current| {
            if *current == font_size {
                return false;
            }
            *current = font_size;
            true
        });
        tracing::debug!(target: "specview.config", key, value, "config updated");
        Ok(())
    }

    /// A receiver whose value is the current font size. It is marked
    /// changed only when `outputViewFontSize` actually changes.
    pub fn observe_font_size(&self) -> watch::Receiver<String> {
        self.font_size.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_observers_wake_only_on_change() {
        let store = ConfigStore::new(AppConfig::default());
        let mut rx = store.observe_font_size();
        assert_eq!(*rx.borrow(), "14px");
        assert!(!rx.has_changed().unwrap());

        store.set_key("useVendor", "false").unwrap();
        assert!(!rx.has_changed().unwrap());

        store.set_key("outputViewFontSize", "12px").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "12px");

        store.set_key("outputViewFontSize", "12px").unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn rejected_update_leaves_config_untouched() {
        let store = ConfigStore::new(AppConfig::default());
        assert!(store.set_key("useVendor", "sideways").is_err());
        assert!(store.get().use_vendor);
    }
}
