use std::ffi::{CStr, c_char, c_void};

use fltk::text::TextBuffer;

unsafe extern "C" {
    fn Fl_Text_Buffer_text(buf: *mut c_void) -> *mut c_char;
    fn free(ptr: *mut c_void);
}

/// Whole text of the pane's buffer.
///
/// `TextBuffer::text()` never frees the C copy it reads from, and the pane
/// reads its buffer on every parse, save and restyle.
pub fn buffer_text(buf: &TextBuffer) -> String {
    // SAFETY: the pointer is the live Fl_Text_Buffer behind `buf`; the
    // returned string is malloc'd by FLTK and released here exactly once.
    unsafe {
        let raw = Fl_Text_Buffer_text(buf.as_ptr() as *mut c_void);
        if raw.is_null() {
            return String::new();
        }
        let owned = CStr::from_ptr(raw).to_string_lossy().into_owned();
        free(raw.cast());
        owned
    }
}
