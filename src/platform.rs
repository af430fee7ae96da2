//! OS-specific URL opening and process launching

use std::process::{Command, Stdio};

use crate::{Error, Result};

/// Host platform, as far as launching applications is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux under Windows Subsystem for Linux
    Wsl,
    Windows,
    MacOs,
    /// Any other Unix-like desktop
    Other,
}

impl Platform {
    /// Detect the current platform
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if is_wsl() {
            Self::Wsl
        } else {
            Self::Other
        }
    }
}

fn is_wsl() -> bool {
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .is_ok_and(|release| release.to_lowercase().contains("microsoft"))
}

/// One way of starting something on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStep {
    /// Spawn a program with arguments
    Program {
        program: &'static str,
        args: Vec<&'static str>,
    },
    /// Open a URL in the default handler
    Url(&'static str),
}

/// Launches URLs and programs on the host
pub trait Launcher: Send + Sync {
    /// Platform the launcher targets
    fn platform(&self) -> Platform;

    /// Open a URL in the default handler
    ///
    /// # Errors
    ///
    /// Returns error if the handler cannot be started
    fn open_url(&self, url: &str) -> Result<()>;

    /// Spawn a program without waiting for it
    ///
    /// # Errors
    ///
    /// Returns error if the program is missing or fails to start
    fn spawn(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Run a single launch step
    ///
    /// # Errors
    ///
    /// Returns error if the step fails
    fn run_step(&self, step: &LaunchStep) -> Result<()> {
        match step {
            LaunchStep::Program { program, args } => self.spawn(program, args),
            LaunchStep::Url(url) => self.open_url(url),
        }
    }
}

/// Launcher that starts real processes
#[derive(Debug, Clone, Copy)]
pub struct SystemLauncher {
    platform: Platform,
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}

impl SystemLauncher {
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Launcher for SystemLauncher {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn open_url(&self, url: &str) -> Result<()> {
        tracing::info!(url = %url, platform = ?self.platform, "opening url");

        match self.platform {
            // cmd.exe returns quickly once the handler is started
            Platform::Wsl => {
                let status = Command::new("cmd.exe")
                    .args(["/c", "start", url])
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .map_err(|e| Error::Launch(format!("cmd.exe: {e}")))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(Error::Launch(format!("cmd.exe exited with {status}")))
                }
            }
            Platform::Windows => self.spawn("cmd", &["/C", "start", "", url]),
            Platform::MacOs => self.spawn("open", &[url]),
            Platform::Other => self.spawn("xdg-open", &[url]),
        }
    }

    fn spawn(&self, program: &str, args: &[&str]) -> Result<()> {
        let path = which::which(program)
            .map_err(|e| Error::Launch(format!("{program} not found: {e}")))?;

        tracing::debug!(program = %path.display(), ?args, "spawning process");

        Command::new(path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| Error::Launch(format!("{program}: {e}")))
    }
}
