//! Opening a rendered chart in the desktop's default image viewer.

use log::{debug, warn};
use std::path::Path;
use std::process::Command;

fn opener(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Launches the platform viewer for `path` without waiting for it.
///
/// Failing to launch only logs a warning, the chart itself is already saved.
pub fn show(path: &Path) {
    match opener(path).spawn() {
        Ok(child) => debug!("Opened {:?} in viewer (pid {})", path, child.id()),
        Err(e) => warn!("Could not open {:?} in an image viewer: {}", path, e),
    }
}
