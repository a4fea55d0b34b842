use fltk::{prelude::*, window::Window};

/// Open a link with the desktop's default handler.
pub fn open_link(url: &str) -> std::io::Result<()> {
    log::debug!("opening {}", url);
    open::that(url)
}

/// True when standard input can be read without blocking.
///
/// An idle pipe that a parent process keeps open reports `false`, so the
/// caller never waits on it. Without a readiness check (non-Unix) this is
/// always `false` and stdin is only read when asked for explicitly.
pub fn stdin_has_data() -> bool {
    #[cfg(unix)]
    {
        fd_has_data(libc::STDIN_FILENO)
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(unix)]
fn fd_has_data(fd: std::os::raw::c_int) -> bool {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    // SAFETY: one valid pollfd, zero timeout.
    let ready = unsafe { libc::poll(&mut pfd, 1, 0) };
    ready > 0 && pfd.revents & (libc::POLLIN | libc::POLLHUP) != 0
}

/// Bring the main window in front of the terminal that launched it.
pub fn raise_window(window: &mut Window) {
    window.show();
    let _ = window.take_focus();

    // A freshly spawned process is not frontmost on macOS until asked.
    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        let script = format!(
            "tell application \"System Events\" to set frontmost of every process whose unix id is {} to true",
            std::process::id()
        );
        match Command::new("/usr/bin/osascript").args(["-e", &script]).status() {
            Ok(status) if !status.success() => {
                log::warn!("/usr/bin/osascript returned with {}", status);
            }
            Ok(_) => {}
            Err(e) => log::warn!("could not run osascript: {}", e),
        }
    }
}
