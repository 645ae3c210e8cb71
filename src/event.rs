use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::{Stream, StreamExt};
use std::io;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::action::Action;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Paste(String),
    Resize,
}

/// Forwards crossterm events from a background task so the modal loop can
/// drain everything that is pending before redrawing.
///
/// The forwarding task is aborted when the reader is dropped, so a closed
/// modal never keeps reading the terminal.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl EventReader {
    pub fn new() -> Self {
        Self::from_stream(EventStream::new())
    }

    /// Forward events from any crossterm-shaped stream.
    pub fn from_stream<S>(mut reader: S) -> Self
    where
        S: Stream<Item = io::Result<CrosstermEvent>> + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            loop {
                let event = match reader.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    Some(Ok(CrosstermEvent::Paste(text))) => Event::Paste(text),
                    Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                    Some(Err(_)) | None => break,
                    _ => continue,
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

impl Default for EventReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Closed set of keys the modals understand, decoded once from raw crossterm events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    ShiftUp,
    ShiftDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    /// Shift+Enter, Alt+Enter or Ctrl+J.
    Newline,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    /// Ctrl+W.
    DeleteWord,
    /// Ctrl+U.
    ClearLine,
    /// Ctrl+C / Ctrl+D.
    Interrupt,
    Char(char),
    Paste(String),
}

pub fn decode_event(event: Event) -> Option<Key> {
    match event {
        Event::Key(key) => decode_key(key),
        Event::Paste(text) => Some(Key::Paste(text)),
        Event::Resize => None,
    }
}

pub fn decode_key(key: KeyEvent) -> Option<Key> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Key::Interrupt),
            KeyCode::Char('j') => Some(Key::Newline),
            KeyCode::Char('w') => Some(Key::DeleteWord),
            KeyCode::Char('u') => Some(Key::ClearLine),
            KeyCode::Char('a') => Some(Key::Home),
            KeyCode::Char('e') => Some(Key::End),
            KeyCode::Enter => Some(Key::Newline),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up if shift => Some(Key::ShiftUp),
        KeyCode::Down if shift => Some(Key::ShiftDown),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Enter if shift || alt => Some(Key::Newline),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab if shift => Some(Key::BackTab),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Char(c) if !alt => Some(Key::Char(c)),
        _ => None,
    }
}

/// Which modal (and which of its modes) a key is being interpreted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Resolution session with the choice list active.
    Browsing { has_suggestion: bool },
    /// Free-text entry in the resolution session.
    Editing,
    /// Walker collecting a response for the current item.
    Navigating,
    /// Walker asking whether to submit.
    ConfirmingSubmit,
}

/// Map a decoded key to an action for the current modal context.
pub fn map_key_to_action(key: Key, ctx: KeyContext) -> Option<Action> {
    // Priority 0: interrupt always cancels, even inside the editor
    if key == Key::Interrupt {
        return Some(Action::Cancel);
    }

    match ctx {
        // Editing gates out every shortcut: only Esc and Enter are not text.
        KeyContext::Editing => match key {
            Key::Esc => Some(Action::CancelEdit),
            Key::Enter => Some(Action::SubmitEdit),
            other => editor_action(other),
        },
        KeyContext::ConfirmingSubmit => match key {
            Key::Enter | Key::Char('y') | Key::Char('Y') => Some(Action::ConfirmSubmit),
            Key::Esc | Key::Char('n') | Key::Char('N') => Some(Action::DeclineSubmit),
            _ => None,
        },
        KeyContext::Navigating => match key {
            Key::Esc => Some(Action::Cancel),
            Key::Enter | Key::Tab => Some(Action::NextItem),
            Key::BackTab => Some(Action::PrevItem),
            Key::Up | Key::ShiftUp => Some(Action::ScrollLineUp),
            Key::Down | Key::ShiftDown => Some(Action::ScrollLineDown),
            Key::PageUp => Some(Action::ScrollPageUp),
            Key::PageDown => Some(Action::ScrollPageDown),
            other => editor_action(other),
        },
        KeyContext::Browsing { has_suggestion } => match key {
            Key::Esc => Some(Action::Cancel),
            Key::Up | Key::Char('k') => Some(Action::ChoiceUp),
            Key::Down | Key::Char('j') => Some(Action::ChoiceDown),
            Key::Enter => Some(Action::ConfirmChoice),
            Key::Char('o') => Some(Action::PickOurs),
            Key::Char('t') => Some(Action::PickTheirs),
            Key::Char('s') if has_suggestion => Some(Action::PickSuggestion),
            Key::Char('c') => Some(Action::StartCustom),
            Key::ShiftUp => Some(Action::ScrollLineUp),
            Key::ShiftDown => Some(Action::ScrollLineDown),
            Key::PageUp => Some(Action::ScrollPageUp),
            Key::PageDown => Some(Action::ScrollPageDown),
            Key::Home => Some(Action::ScrollTop),
            Key::End => Some(Action::ScrollBottom),
            _ => None,
        },
    }
}

fn editor_action(key: Key) -> Option<Action> {
    match key {
        Key::Char(c) => Some(Action::EditorChar(c)),
        Key::Paste(text) => Some(Action::EditorPaste(text)),
        Key::Newline => Some(Action::EditorNewline),
        Key::Backspace => Some(Action::EditorBackspace),
        Key::Delete => Some(Action::EditorDelete),
        Key::DeleteWord => Some(Action::EditorDeleteWord),
        Key::ClearLine => Some(Action::EditorClearLine),
        Key::Left => Some(Action::EditorLeft),
        Key::Right => Some(Action::EditorRight),
        Key::Home => Some(Action::EditorHome),
        Key::End => Some(Action::EditorEnd),
        _ => None,
    }
}
