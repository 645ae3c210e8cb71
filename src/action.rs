/// Every modal state mutation is expressed as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Lifecycle
    Cancel,
    Resize,

    // Choice list
    ChoiceUp,
    ChoiceDown,
    ConfirmChoice,
    PickOurs,
    PickTheirs,
    PickSuggestion,
    StartCustom,

    // Viewport
    ScrollLineUp,
    ScrollLineDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    ScrollBottom,

    // Inline editor
    EditorChar(char),
    EditorPaste(String),
    EditorNewline,
    EditorBackspace,
    EditorDelete,
    EditorDeleteWord,
    EditorClearLine,
    EditorLeft,
    EditorRight,
    EditorHome,
    EditorEnd,
    SubmitEdit,
    CancelEdit,

    // Walker
    NextItem,
    PrevItem,
    ConfirmSubmit,
    DeclineSubmit,
}
