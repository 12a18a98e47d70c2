//! Open files with the host's default application.

use crate::session::FileLauncher;
use std::path::Path;
use std::process::{Command, Stdio};

/// Launches files through `open`, `xdg-open` or `start`, depending on the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    /// Command that opens `path` on this platform
    pub fn command(path: &Path) -> Command {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // The empty string is the window title `start` expects first
            cmd.args(["/C", "start", ""]);
            cmd
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(path);
        cmd
    }
}

impl FileLauncher for SystemLauncher {
    fn open(&mut self, path: &Path) {
        let spawned = Self::command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        // Failures are logged only; the session carries on either way
        if let Err(e) = spawned {
            tracing::warn!(path = %path.display(), "failed to launch opener: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_passes_path_last() {
        let path = Path::new("/tmp/some file.txt");
        let cmd = SystemLauncher::command(path);
        let last = cmd.get_args().last().expect("path argument");
        assert_eq!(last, path.as_os_str());
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_command_uses_xdg_open() {
        let cmd = SystemLauncher::command(Path::new("/tmp/a.txt"));
        assert_eq!(cmd.get_program(), "xdg-open");
    }
}
