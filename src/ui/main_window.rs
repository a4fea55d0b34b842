use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Event},
    frame::Frame,
    group::{Flex, Tabs},
    prelude::*,
    window::Window,
};

use crate::app::domain::Message;
use super::tag_selector::TagSelector;
use super::text_pane::{TextPane, TextPaneOptions};
use super::tree_view::TreeView;

pub const MIN_WIDTH: i32 = 800;
pub const MIN_HEIGHT: i32 = 600;
const BUTTON_ROW_HEIGHT: i32 = 32;

pub struct MainWidgets {
    pub wind: Window,
    pub tabs: Tabs,
    pub tree_view: TreeView,
    pub text_pane: TextPane,
    pub tag_selector: TagSelector,
    pub file_label: Frame,
}

pub fn build_main_window(
    title: &str,
    file_name: &str,
    pane_options: &TextPaneOptions,
    sender: Sender<Message>,
) -> MainWidgets {
    let mut wind = Window::new(100, 100, MIN_WIDTH, MIN_HEIGHT, None);
    wind.set_label(title);
    wind.set_xclass("xmlview");
    wind.size_range(MIN_WIDTH, MIN_HEIGHT, 0, 0);

    let mut flex = Flex::new(0, 0, MIN_WIDTH, MIN_HEIGHT, None).column();
    flex.set_margin(4);
    flex.set_spacing(4);

    let mut tabs = Tabs::default_fill();

    let view_tab = Flex::default_fill().with_label("View").column();
    let tree_view = TreeView::new();
    view_tab.end();

    let edit_tab = Flex::default_fill().with_label("Edit File").column();
    let text_pane = TextPane::new(pane_options, sender);
    edit_tab.end();

    tabs.end();
    tabs.auto_layout();

    // Tag selector, Parse, file name
    let top_row = Flex::default().row();
    let tag_selector = TagSelector::new(sender);
    let mut parse_btn = Button::default().with_label("Parse XML");
    parse_btn.emit(sender, Message::Parse);
    let mut file_label = Frame::default().with_label(file_name);
    file_label.set_align(Align::Center | Align::Inside | Align::Clip);
    top_row.end();
    flex.fixed(&top_row, BUTTON_ROW_HEIGHT);

    // Save, Save&Close, Close
    let bottom_row = Flex::default().row();
    let mut save_btn = Button::default().with_label("Save");
    save_btn.emit(sender, Message::Save);
    let mut save_close_btn = Button::default().with_label("Save&&Close");
    save_close_btn.emit(sender, Message::SaveAndClose);
    let mut close_btn = Button::default().with_label("Close");
    close_btn.emit(sender, Message::Close);
    bottom_row.end();
    flex.fixed(&bottom_row, BUTTON_ROW_HEIGHT);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    // Window manager close goes through the same path as the Close button.
    wind.set_callback(move |_| {
        if fltk::app::event() == Event::Close {
            sender.send(Message::Close);
        }
    });

    MainWidgets {
        wind,
        tabs,
        tree_view,
        text_pane,
        tag_selector,
        file_label,
    }
}
