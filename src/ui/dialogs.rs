use fltk::dialog;

pub fn show_error(title: &str, message: &str) {
    dialog::message_title(title);
    dialog::alert_default(message);
}

pub fn show_warning(title: &str, message: &str) {
    dialog::message_title(title);
    dialog::message_default(message);
}

/// Ask before handing a link to the desktop. Returns `true` on "Open".
pub fn confirm_open(url: &str) -> bool {
    dialog::message_title("Open?");
    dialog::choice2_default(url, "Cancel", "Open", "") == Some(1)
}
