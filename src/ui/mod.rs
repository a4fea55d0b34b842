pub mod dialogs;
pub mod main_window;
pub mod tag_selector;
pub mod text_pane;
pub mod theme;
pub mod tree_view;
