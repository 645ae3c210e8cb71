use anyhow::Result;
use ratatui::{backend::Backend, Frame, Terminal};
use tracing::{debug, trace};

use crate::action::Action;
use crate::components::conflict_view::ConflictView;
use crate::components::walker_view::WalkerView;
use crate::components::Component;
use crate::event::{decode_event, map_key_to_action, Event, EventReader, KeyContext};
use crate::state::{ResolveState, WalkerState};
use crate::types::{ResolutionOutcome, WalkOutcome};

/// A full-screen modal that runs until it produces exactly one outcome.
pub trait Modal {
    type Output;

    fn key_context(&self) -> KeyContext;

    /// Apply one action; `Some` ends the modal.
    fn update(&mut self, action: Action) -> Option<Self::Output>;

    fn render(&mut self, frame: &mut Frame);
}

impl Modal for ResolveState {
    type Output = ResolutionOutcome;

    fn key_context(&self) -> KeyContext {
        ResolveState::key_context(self)
    }

    fn update(&mut self, action: Action) -> Option<ResolutionOutcome> {
        ResolveState::update(self, action)
    }

    fn render(&mut self, frame: &mut Frame) {
        ConflictView.render(frame, frame.area(), self);
    }
}

impl Modal for WalkerState {
    type Output = WalkOutcome;

    fn key_context(&self) -> KeyContext {
        WalkerState::key_context(self)
    }

    fn update(&mut self, action: Action) -> Option<WalkOutcome> {
        WalkerState::update(self, action)
    }

    fn render(&mut self, frame: &mut Frame) {
        WalkerView.render(frame, frame.area(), self);
    }
}

/// Translate one raw event for the modal's current mode and apply it.
///
/// The key context is read per event, so a batch of buffered keys that
/// switches mode midway (e.g. `c` then text) is interpreted correctly.
pub fn dispatch<M: Modal>(modal: &mut M, event: Event) -> Option<M::Output> {
    let action = match event {
        Event::Resize => Some(Action::Resize),
        other => decode_event(other).and_then(|key| map_key_to_action(key, modal.key_context())),
    };
    let action = action?;
    trace!(?action, "dispatch");
    modal.update(action)
}

/// Draw, wait for input, drain everything pending, repeat until an outcome.
/// Returns `None` only if the event stream closes first.
pub async fn run_modal<B: Backend, M: Modal>(
    terminal: &mut Terminal<B>,
    modal: &mut M,
) -> Result<Option<M::Output>> {
    let mut events = EventReader::new();

    loop {
        terminal.draw(|frame| modal.render(frame))?;

        // Wait for at least one event, then drain all pending events
        // to avoid input lag from buffered keys.
        let Some(first) = events.next().await else {
            debug!("event stream closed");
            return Ok(None);
        };
        let mut pending = vec![first];
        while let Some(ev) = events.try_next() {
            pending.push(ev);
        }

        for event in pending {
            if let Some(outcome) = dispatch(modal, event) {
                return Ok(Some(outcome));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiOptions;
    use crate::theme::Theme;
    use crate::types::{ChosenOption, ConflictUnit, ExtractedItem};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn chars(s: &str) -> Vec<Event> {
        s.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn resolve_state() -> ResolveState {
        let unit = ConflictUnit {
            identifier: "h".to_string(),
            location: String::new(),
            context: String::new(),
            side_a: "A".to_string(),
            side_b: "B".to_string(),
            suggestion: None,
        };
        ResolveState::new(unit, Theme::default(), UiOptions::default())
    }

    fn run<M: Modal>(modal: &mut M, events: Vec<Event>) -> Option<M::Output> {
        for event in events {
            if let Some(out) = dispatch(modal, event) {
                return Some(out);
            }
        }
        None
    }

    #[test]
    fn test_batched_keys_follow_mode_switch() {
        let mut state = resolve_state();
        let mut events = chars("cot");
        events.push(key(KeyCode::Enter));
        let outcome = run(&mut state, events).unwrap();
        assert_eq!(outcome, ResolutionOutcome::resolved(ChosenOption::Custom, "ot"));
    }

    #[test]
    fn test_shortcut_ends_modal() {
        let mut state = resolve_state();
        let outcome = run(&mut state, chars("t")).unwrap();
        assert_eq!(outcome.resolved_text.as_deref(), Some("B"));
    }

    #[test]
    fn test_ctrl_c_cancels() {
        let mut state = resolve_state();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(dispatch(&mut state, ev).unwrap().is_cancelled());
    }

    #[test]
    fn test_walker_round_trip_through_keys() {
        let items = vec![
            ExtractedItem {
                ordinal: 1,
                section_label: "S".to_string(),
                body_text: "first".to_string(),
            },
            ExtractedItem {
                ordinal: 2,
                section_label: "S".to_string(),
                body_text: "second".to_string(),
            },
        ];
        let mut state = WalkerState::new(items, Theme::default(), UiOptions::default()).unwrap();
        let mut events = chars("yes");
        events.push(key(KeyCode::Tab));
        events.push(key(KeyCode::Enter));
        events.push(key(KeyCode::Char('y')));
        let outcome = run(&mut state, events).unwrap();
        assert_eq!(outcome.document(), Some("## S\n\n**1. first**\nyes\n"));
    }

    #[test]
    fn test_resize_invalidates_cache() {
        let mut state = resolve_state();
        state.viewport.content(40, |_| Vec::new());
        assert_eq!(dispatch(&mut state, Event::Resize), None);
        assert!(!state.viewport.is_cached());
    }
}
