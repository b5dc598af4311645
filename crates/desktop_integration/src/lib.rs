//! Capabilities the registry core needs from the surrounding desktop layer.

use std::{
    io,
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Free-text entry. `None` means the person cancelled the prompt.
pub trait Prompt {
    fn ask_text(&mut self, label: &str, default: Option<&str>) -> Option<String>;
}

/// Yes/no gate in front of destructive actions.
pub trait Confirm {
    fn ask_yes_no(&mut self, label: &str) -> bool;
}

pub trait Notify {
    fn show(&mut self, message: &str);
}

pub trait BrowserOpener {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// Renders a standalone form that does not touch the registry.
pub trait FormRenderer {
    fn render(&mut self);
}

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("malformed URI: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Exited { program: String, status: String },
}

/// How long a launcher may take to fail before it is assumed to be running.
const LAUNCH_GRACE: Duration = Duration::from_millis(250);
const LAUNCH_POLL: Duration = Duration::from_millis(10);

/// Hands URLs to the platform's default browser, or to a configured program.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowserOpener {
    command: Option<String>,
}

impl SystemBrowserOpener {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    fn command_for(&self, url: &Url) -> (String, Command) {
        if let Some(program) = &self.command {
            let mut cmd = Command::new(program);
            cmd.arg(url.as_str());
            return (program.clone(), cmd);
        }
        platform_command(url)
    }
}

#[cfg(target_os = "windows")]
fn platform_command(url: &Url) -> (String, Command) {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(url.as_str());
    ("cmd".to_string(), cmd)
}

#[cfg(target_os = "macos")]
fn platform_command(url: &Url) -> (String, Command) {
    let mut cmd = Command::new("open");
    cmd.arg(url.as_str());
    ("open".to_string(), cmd)
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_command(url: &Url) -> (String, Command) {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url.as_str());
    ("xdg-open".to_string(), cmd)
}

/// Returns once the launcher has exited or `grace` has passed. A launcher still running
/// after `grace` is left detached; only an early non-zero exit is reported.
fn watch_launch(program: String, mut child: Child, grace: Duration) -> Result<(), OpenError> {
    let deadline = Instant::now() + grace;
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Ok(()),
            Ok(Some(status)) => {
                warn!(%program, %status, "browser launcher reported failure");
                return Err(OpenError::Exited {
                    program,
                    status: status.to_string(),
                });
            }
            Ok(None) if Instant::now() >= deadline => {
                debug!(%program, pid = child.id(), "browser still running, detaching");
                return Ok(());
            }
            Ok(None) => thread::sleep(LAUNCH_POLL),
            Err(source) => return Err(OpenError::Launch { program, source }),
        }
    }
}

/// Parses `raw` as an absolute URI. Relative references and bare words are rejected.
pub fn parse_uri(raw: &str) -> Result<Url, OpenError> {
    Ok(Url::parse(raw.trim())?)
}

impl BrowserOpener for SystemBrowserOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        let parsed = parse_uri(url)?;
        let (program, mut cmd) = self.command_for(&parsed);
        debug!(%program, url = %parsed, "launching browser");
        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OpenError::Launch {
                program: program.clone(),
                source,
            })?;
        watch_launch(program, child, LAUNCH_GRACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_text_that_is_not_an_absolute_uri() {
        assert!(matches!(parse_uri("a.com"), Err(OpenError::Malformed(_))));
        assert!(matches!(parse_uri(""), Err(OpenError::Malformed(_))));
        assert!(matches!(
            parse_uri("http://exa mple.com"),
            Err(OpenError::Malformed(_))
        ));
    }

    #[test]
    fn accepts_absolute_uris() {
        let parsed = parse_uri(" https://sdgs.un.org/goals/goal13 ").expect("parse");
        assert_eq!(parsed.host_str(), Some("sdgs.un.org"));
    }

    #[test]
    fn malformed_url_fails_before_launching_anything() {
        let opener = SystemBrowserOpener::new(Some("definitely-not-a-real-program".into()));
        let err = opener.open("no scheme here").expect_err("should fail");
        assert!(matches!(err, OpenError::Malformed(_)));
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let opener =
            SystemBrowserOpener::new(Some("registry-test-missing-browser-binary".into()));
        let err = opener.open("http://a.com").expect_err("should fail");
        assert!(matches!(err, OpenError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn launcher_exiting_non_zero_is_reported() {
        let opener = SystemBrowserOpener::new(Some("/bin/false".into()));
        let err = opener.open("http://a.com").expect_err("should fail");
        assert!(matches!(err, OpenError::Exited { ref program, .. } if program == "/bin/false"));
    }

    #[cfg(unix)]
    #[test]
    fn long_running_browser_does_not_block_open() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("slow-browser.sh");
        std::fs::write(&script, "#!/bin/sh\nsleep 3\nexit 0\n").expect("write script");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");

        let opener = SystemBrowserOpener::new(Some(script.to_string_lossy().into_owned()));
        let started = Instant::now();
        opener.open("http://a.com").expect("open");
        assert!(
            started.elapsed() < Duration::from_secs(1),
            "open waited {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn blank_command_falls_back_to_platform_default() {
        let opener = SystemBrowserOpener::new(Some("   ".into()));
        assert!(opener.command.is_none());
    }
}
