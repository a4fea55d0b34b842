/// All messages that can be sent through the FLTK channel.
/// Widget callbacks and timers send one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Buttons
    Parse,
    Save,
    SaveAndClose,
    Close,

    // Tag selector
    TagSelected(String),

    // Text pane
    TextEdited,
    Restyle,
    RescanHighlights,
    OpenLink(String),
}
