//! Foreground window handling for TV mode.
//!
//! When a session ends (or fails to start) in TV mode the launcher's
//! full-screen window is brought back to the front, found by its title.

/// Restore and focus the top-level window titled `title`.
///
/// Returns `false` when no such window exists.
#[cfg(target_os = "windows")]
pub fn focus_window_by_title(title: &str) -> bool {
    use windows::Win32::UI::WindowsAndMessaging::{
        FindWindowW, IsIconic, SW_RESTORE, SetForegroundWindow, ShowWindow,
    };
    use windows::core::{HSTRING, PCWSTR};

    let name = HSTRING::from(title);
    // SAFETY: both arguments are valid null-terminated strings (or null).
    let hwnd = match unsafe { FindWindowW(PCWSTR::null(), &name) } {
        Ok(hwnd) if !hwnd.is_invalid() => hwnd,
        _ => {
            tracing::debug!("No window titled {:?}", title);
            return false;
        }
    };

    // SAFETY: hwnd was just returned by FindWindowW. A stale handle makes
    // these calls fail without side effects.
    unsafe {
        if IsIconic(hwnd).as_bool() {
            let _ = ShowWindow(hwnd, SW_RESTORE);
        }
        SetForegroundWindow(hwnd).as_bool()
    }
}

#[cfg(not(target_os = "windows"))]
pub fn focus_window_by_title(title: &str) -> bool {
    tracing::debug!("Window focus is only supported on Windows ({:?})", title);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_window_is_not_focused() {
        assert!(!focus_window_by_title("ps2bonus test window that does not exist"));
    }
}
