use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    enums::{Color, Event, EventState, Font, Key},
    prelude::*,
    text::{StyleTableEntry, TextBuffer, TextEditor, WrapMode},
};

use crate::app::domain::Message;
use crate::app::infrastructure::buffer::buffer_text;
use crate::app::services::markers::{Link, find_links, link_at, style_string};

const RESTYLE_DELAY: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct TextPaneOptions {
    pub read_only: bool,
    pub font: Font,
    pub font_size: i32,
    pub word_wrap: bool,
    pub line_numbers: bool,
}

impl Default for TextPaneOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            font: Font::Courier,
            font_size: 12,
            word_wrap: true,
            line_numbers: false,
        }
    }
}

/// Editable (or read-only) text with marker and link highlighting.
///
/// Styles are recomputed from the whole text on every restyle, so the style
/// buffer never needs incremental bookkeeping.
pub struct TextPane {
    editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
    markers: Vec<String>,
    links: Rc<RefCell<Vec<Link>>>,
    restyle_pending: bool,
    sender: Sender<Message>,
}

impl TextPane {
    /// Create the pane inside the current group.
    pub fn new(options: &TextPaneOptions, sender: Sender<Message>) -> Self {
        let buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let mut editor = TextEditor::default_fill();
        editor.set_buffer(buffer.clone());
        editor.set_text_font(options.font);
        editor.set_text_size(options.font_size);
        if options.word_wrap {
            editor.wrap_mode(WrapMode::AtBounds, 0);
        }
        editor.set_linenumber_width(if options.line_numbers { 40 } else { 0 });
        editor.set_highlight_data(
            style_buffer.clone(),
            style_table(options.font, options.font_size),
        );

        let links = Rc::new(RefCell::new(Vec::new()));
        install_event_handler(&mut editor, options.read_only, links.clone(), sender);

        Self {
            editor,
            buffer,
            style_buffer,
            markers: Vec::new(),
            links,
            restyle_pending: false,
            sender,
        }
    }

    pub fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }

    /// Replace all displayed text.
    pub fn set_content(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.editor.set_insert_position(0);
        self.rescan();
    }

    pub fn content(&self) -> String {
        buffer_text(&self.buffer)
    }

    /// Replace the highlighted substrings; an empty list clears highlighting.
    pub fn set_markers(&mut self, markers: &[String]) {
        self.markers = markers.to_vec();
        self.rescan();
    }

    /// Mark every marker occurrence and every link in the current text.
    pub fn rescan(&mut self) {
        self.restyle_pending = false;
        let text = self.content();
        let links = find_links(&text);
        let style = style_string(&text, &self.markers, &links);
        self.style_buffer.set_text(&style);
        *self.links.borrow_mut() = links;
        self.editor.redraw();
    }

    /// Restyle shortly after an edit, coalescing bursts of keystrokes.
    pub fn schedule_restyle(&mut self) {
        if self.restyle_pending {
            return;
        }
        self.restyle_pending = true;
        let s = self.sender;
        app::add_timeout3(RESTYLE_DELAY, move |_| {
            s.send(Message::Restyle);
        });
    }

    /// Start the periodic re-scan; the timer lives as long as the app.
    pub fn start_polling(&self, interval_secs: f64) {
        let s = self.sender;
        app::add_timeout3(interval_secs, move |handle| {
            s.send(Message::RescanHighlights);
            app::repeat_timeout3(interval_secs, handle);
        });
    }
}

fn style_table(font: Font, size: i32) -> Vec<StyleTableEntry> {
    vec![
        // A: plain
        StyleTableEntry {
            color: Color::Foreground,
            font,
            size,
        },
        // B: marker
        StyleTableEntry {
            color: Color::Red,
            font: bold(font),
            size,
        },
        // C: link
        StyleTableEntry {
            color: Color::Blue,
            font,
            size,
        },
        // D: marker inside a link
        StyleTableEntry {
            color: Color::DarkRed,
            font: bold(font),
            size,
        },
    ]
}

fn bold(font: Font) -> Font {
    match font {
        Font::Courier => Font::CourierBold,
        Font::Screen => Font::ScreenBold,
        Font::Helvetica => Font::HelveticaBold,
        other => other,
    }
}

fn install_event_handler(
    editor: &mut TextEditor,
    read_only: bool,
    links: Rc<RefCell<Vec<Link>>>,
    sender: Sender<Message>,
) {
    editor.handle(move |ed, ev| match ev {
        Event::KeyDown if read_only => !is_navigation(app::event_key()),
        Event::Paste | Event::DndRelease if read_only => true,
        Event::KeyUp | Event::Paste | Event::DndRelease => {
            sender.send(Message::TextEdited);
            false
        }
        Event::Released if app::event_is_click() => {
            let pos = ed.insert_position();
            if pos >= 0 {
                if let Some(link) = link_at(&links.borrow(), pos as usize) {
                    sender.send(Message::OpenLink(link.url.clone()));
                }
            }
            false
        }
        _ => false,
    });
}

/// Keys a read-only pane still honours: cursor movement, copy and select-all.
fn is_navigation(key: Key) -> bool {
    let command = app::event_state().intersects(EventState::Ctrl | EventState::Command);
    if command {
        return key == Key::from_char('c') || key == Key::from_char('a');
    }
    matches!(
        key,
        Key::Left
            | Key::Right
            | Key::Up
            | Key::Down
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown
            | Key::ShiftL
            | Key::ShiftR
            | Key::ControlL
            | Key::ControlR
    )
}
