use std::borrow::Cow;

use crate::config::AppConfig;

/// Binary used when `use_vendor` is on, relative to the project folder.
pub const VENDOR_BINARY: &str = "./vendor/bin/phpspec";

/// Flags that make phpdbg run a script quietly without entering its REPL.
pub const PHPDBG_FLAGS: &str = "-qrr";

/// Command line for one phpspec run, e.g. `./vendor/bin/phpspec run spec/FooSpec.php`.
pub fn build_command(cfg: &AppConfig, target: Option<&str>) -> String {
    let binary = phpspec_binary(cfg);
    let mut cmd = if cfg.use_phpdbg {
        format!("{} {} {}", expand(&cfg.phpdbg_path), PHPDBG_FLAGS, binary)
    } else {
        binary.into_owned()
    };

    cmd.push_str(" run");
    if let Some(target) = target {
        cmd.push(' ');
        cmd.push_str(target);
    }
    cmd
}

fn phpspec_binary(cfg: &AppConfig) -> Cow<'_, str> {
    if cfg.use_vendor {
        Cow::Borrowed(VENDOR_BINARY)
    } else {
        expand(&cfg.phpspec_path)
    }
}

/// `~` and `$VAR` expansion. Paths that fail to expand are used as written.
fn expand(path: &str) -> Cow<'_, str> {
    match shellexpand::full(path) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(target: "specview.command", path, error = %e, "path expansion failed");
            Cow::Borrowed(path)
        }
    }
}
