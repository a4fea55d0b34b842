use fltk::{enums::Color, prelude::*, text::TextEditor, tree::Tree, window::Window};

pub fn apply_theme(editor: &mut TextEditor, tree: &mut Tree, window: &mut Window, is_dark: bool) {
    if is_dark {
        editor.set_color(Color::from_rgb(30, 30, 30));
        editor.set_text_color(Color::from_rgb(220, 220, 220));
        editor.set_cursor_color(Color::from_rgb(255, 255, 255));
        editor.set_selection_color(Color::from_rgb(70, 70, 100));
        editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
        editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        tree.set_color(Color::from_rgb(30, 30, 30));
        tree.set_item_label_fgcolor(Color::from_rgb(220, 220, 220));
        tree.set_selection_color(Color::from_rgb(70, 70, 100));
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
    } else {
        editor.set_color(Color::White);
        editor.set_text_color(Color::Black);
        editor.set_cursor_color(Color::Black);
        editor.set_selection_color(Color::from_rgb(173, 216, 230));
        editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
        editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        tree.set_color(Color::White);
        tree.set_item_label_fgcolor(Color::Black);
        tree.set_selection_color(Color::from_rgb(173, 216, 230));
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
    }

    editor.redraw();
    tree.redraw();
    window.redraw();
}
