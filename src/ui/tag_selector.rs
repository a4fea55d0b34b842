use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app::Sender, menu::Choice, prelude::*};

use crate::app::domain::Message;
use crate::app::services::text_ops::escape_menu_label;

/// Dropdown of the distinct tag names in the document.
///
/// A user selection sends `Message::TagSelected`.
pub struct TagSelector {
    choice: Choice,
    tags: Rc<RefCell<Vec<String>>>,
}

impl TagSelector {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut choice = Choice::default();
        let tags: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let callback_tags = tags.clone();
        choice.set_callback(move |c| {
            let index = c.value();
            if index < 0 {
                return;
            }
            if let Some(tag) = callback_tags.borrow().get(index as usize) {
                sender.send(Message::TagSelected(tag.clone()));
            }
        });

        Self { choice, tags }
    }

    /// Replace the options and select the first one, which is returned.
    pub fn set_tags(&mut self, tags: &[String]) -> Option<String> {
        self.choice.clear();
        for tag in tags {
            self.choice.add_choice(&escape_menu_label(tag));
        }
        *self.tags.borrow_mut() = tags.to_vec();

        let first = tags.first().cloned();
        if first.is_some() {
            self.choice.set_value(0);
        }
        self.choice.redraw();
        first
    }
}
