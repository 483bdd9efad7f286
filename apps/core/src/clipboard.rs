use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Writes plain text to the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        write_system_clipboard_text(text)
    }
}

#[cfg(target_os = "windows")]
fn write_system_clipboard_text(value: &str) -> Result<(), ClipboardError> {
    use windows_sys::Win32::System::DataExchange::{
        CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
    };
    use windows_sys::Win32::System::Memory::{
        GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock, GMEM_MOVEABLE,
    };

    // CF_UNICODETEXT
    const UNICODE_TEXT_FORMAT: u32 = 13;

    let wide: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
    let bytes = wide.len() * std::mem::size_of::<u16>();
    unsafe {
        if OpenClipboard(std::ptr::null_mut()) == 0 {
            return Err(ClipboardError::Unavailable(
                "failed to open clipboard".to_string(),
            ));
        }
        if EmptyClipboard() == 0 {
            CloseClipboard();
            return Err(ClipboardError::WriteFailed(
                "failed to clear clipboard".to_string(),
            ));
        }

        let mem = GlobalAlloc(GMEM_MOVEABLE, bytes);
        if mem.is_null() {
            CloseClipboard();
            return Err(ClipboardError::WriteFailed(
                "failed to allocate clipboard memory".to_string(),
            ));
        }

        let ptr = GlobalLock(mem) as *mut u16;
        if ptr.is_null() {
            GlobalFree(mem);
            CloseClipboard();
            return Err(ClipboardError::WriteFailed(
                "failed to lock clipboard memory".to_string(),
            ));
        }
        std::ptr::copy_nonoverlapping(wide.as_ptr(), ptr, wide.len());
        GlobalUnlock(mem);

        if SetClipboardData(UNICODE_TEXT_FORMAT, mem).is_null() {
            GlobalFree(mem);
            CloseClipboard();
            return Err(ClipboardError::WriteFailed(
                "failed to set clipboard data".to_string(),
            ));
        }

        CloseClipboard();
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn write_system_clipboard_text(value: &str) -> Result<(), ClipboardError> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut last_error = String::from("no clipboard tool found");
    for (program, args) in clipboard_tools() {
        let child = Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(error) => {
                last_error = format!("{program}: {error}");
                continue;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(value.as_bytes())
                .map_err(|e| ClipboardError::WriteFailed(format!("{program}: {e}")))?;
        }
        let status = child
            .wait()
            .map_err(|e| ClipboardError::WriteFailed(format!("{program}: {e}")))?;
        if status.success() {
            tracing::debug!(program, "clipboard written");
            return Ok(());
        }
        last_error = format!("{program} exited with {status}");
    }

    Err(ClipboardError::Unavailable(last_error))
}

#[cfg(target_os = "macos")]
fn clipboard_tools() -> &'static [(&'static str, &'static [&'static str])] {
    &[("pbcopy", &[])]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn clipboard_tools() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ]
}
