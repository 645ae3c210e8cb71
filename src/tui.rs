use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal, Stderr};
use std::sync::atomic::{AtomicBool, Ordering};

/// The UI draws on stderr so stdout carries only the machine-readable result.
pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Set while our keyboard enhancement flags are pushed; `restore` pops them.
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen, EnableBracketedPaste)?;
    // Without the kitty protocol Shift+Enter arrives as plain Enter; Ctrl+J
    // still inserts a newline there.
    let enhanced = match supports_keyboard_enhancement() {
        Ok(true) => execute!(
            io::stderr(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )
        .is_ok(),
        _ => false,
    };
    KEYBOARD_ENHANCED.store(enhanced, Ordering::SeqCst);
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
/// Uses best-effort: each step runs independently so a failure
/// in one doesn't prevent the others from executing.
pub fn restore() -> Result<()> {
    if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
        let _ = execute!(io::stderr(), PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableBracketedPaste);
    Ok(())
}

/// Both the input and the drawing surface must be a terminal.
pub fn interactive_terminal_available() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}
