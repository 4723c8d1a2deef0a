#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII-based terminal lifecycle management that ensures cleanup even on
//! panic. The session owns raw-mode entry/exit and tracks every terminal
//! state change it makes.
//!
//! # Lifecycle Guarantees
//!
//! 1. Each enabled mode (raw, alt-screen, mouse) has a corresponding flag.
//! 2. Drop disables the enabled modes in reverse order of enabling.
//! 3. Because cleanup lives in [`Drop`], it runs during panic unwinding.
//!
//! # Cleanup Order
//!
//! 1. Disable mouse capture (if enabled)
//! 2. Show cursor (always)
//! 3. Leave alternate screen (if enabled)
//! 4. Exit raw mode (always)
//! 5. Flush stdout

use std::io::{self, Write};

/// Which terminal modes the session enables at startup.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,
    /// Enable SGR mouse capture for card click gestures.
    pub mouse_capture: bool,
}

/// A terminal session that manages raw mode and cleanup.
///
/// Only one session should exist at a time; creating it enters raw mode,
/// dropping it restores the terminal whether the program exits normally,
/// via `?`, or by panic.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested modes.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
        };

        let mut stdout = io::stdout();

        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
        }

        if options.mouse_capture {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
        }

        crossterm::execute!(stdout, crossterm::cursor::Hide)?;

        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Poll for an event; `Ok(true)` when one is available within `timeout`.
    pub fn poll_event(&self, timeout: std::time::Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event (blocking until available).
    pub fn read_event(&self) -> io::Result<crossterm::event::Event> {
        crossterm::event::read()
    }

    /// Cleanup helper shared between drop and explicit teardown.
    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
        }

        // Always show cursor before leaving
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }

        // Exit raw mode last
        let _ = crossterm::terminal::disable_raw_mode();

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}
