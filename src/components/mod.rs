pub mod choice_list;
pub mod confirm_submit;
pub mod conflict_view;
pub mod key_hints;
pub mod text_input;
pub mod text_region;
pub mod walker_view;

use ratatui::{layout::Rect, Frame};

/// Trait for renderable modal views. Rendering may clamp scroll state and
/// fill render caches, so it takes the state mutably.
pub trait Component<S> {
    fn render(&self, frame: &mut Frame, area: Rect, state: &mut S);
}
