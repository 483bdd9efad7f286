use std::process::Command;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("empty target")]
    EmptyTarget,
    #[error("invalid url '{0}'")]
    InvalidUrl(String),
    #[error("unsupported url scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("launch failed: {message}")]
    LaunchFailed { message: String, code: Option<i32> },
}

/// Opens a fully formed URL in a new browser tab or window.
pub trait TabOpener {
    fn open(&mut self, url: &str) -> Result<(), LaunchError>;
}

/// Opens URLs with the OS handler, or with `browser_command` when configured.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    browser_command: Option<String>,
}

impl SystemBrowser {
    pub fn new(browser_command: Option<String>) -> Self {
        let browser_command = browser_command
            .map(|command| command.trim().to_string())
            .filter(|command| !command.is_empty());
        Self { browser_command }
    }
}

impl TabOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<(), LaunchError> {
        let target = validate_web_target(url)?;
        match &self.browser_command {
            Some(program) => run_command(Command::new(program).arg(target.as_str())),
            None => open_with_system_handler(target.as_str()),
        }
    }
}

/// Accepts only absolute http(s) URLs.
pub fn validate_web_target(url: &str) -> Result<Url, LaunchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyTarget);
    }
    let parsed = Url::parse(trimmed).map_err(|_| LaunchError::InvalidUrl(trimmed.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(LaunchError::UnsupportedScheme(other.to_string())),
    }
}

fn run_command(command: &mut Command) -> Result<(), LaunchError> {
    let status = command.status().map_err(|error| LaunchError::LaunchFailed {
        message: error.to_string(),
        code: None,
    })?;
    if status.success() {
        tracing::debug!(%status, "browser command finished");
        Ok(())
    } else {
        Err(LaunchError::LaunchFailed {
            message: format!("browser command exited with {status}"),
            code: status.code(),
        })
    }
}

#[cfg(target_os = "windows")]
fn open_with_system_handler(url: &str) -> Result<(), LaunchError> {
    use windows_sys::Win32::UI::Shell::ShellExecuteW;
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    let operation = to_wide("open");
    let target = to_wide(url);
    let result = unsafe {
        ShellExecuteW(
            std::ptr::null_mut(),
            operation.as_ptr(),
            target.as_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            SW_SHOWNORMAL,
        )
    };

    // ShellExecuteW reports failure as a value <= 32.
    let code = result as isize;
    if code <= 32 {
        return Err(LaunchError::LaunchFailed {
            message: "ShellExecuteW failed".to_string(),
            code: Some(code as i32),
        });
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(target_os = "macos")]
fn open_with_system_handler(url: &str) -> Result<(), LaunchError> {
    run_command(Command::new("open").arg(url))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_with_system_handler(url: &str) -> Result<(), LaunchError> {
    run_command(Command::new("xdg-open").arg(url))
}
