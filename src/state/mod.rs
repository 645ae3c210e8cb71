pub mod choice_state;
pub mod editor;
pub mod resolve_state;
pub mod text_buffer;
pub mod viewport_state;
pub mod walker_state;

pub use choice_state::{Choice, ChoiceState};
pub use editor::{EditorSignal, InlineEditor};
pub use resolve_state::{ResolveMode, ResolveState};
pub use text_buffer::TextBuffer;
pub use viewport_state::{compose_frame, ComposedFrame, ViewportState};
pub use walker_state::{assemble_document, WalkerMode, WalkerState};
