use fltk::{app::Sender, enums::Font, prelude::*};

use super::config::AppContext;
use super::controllers::document::{DocumentController, ParsedView};
use super::domain::{AppSettings, FontChoice, Message, ThemeMode};
use super::infrastructure::error::AppError;
use super::infrastructure::platform::{open_link, raise_window};
use super::services::text_ops::extract_filename;
use crate::ui::dialogs::{confirm_open, show_error, show_warning};
use crate::ui::main_window::{MainWidgets, build_main_window};
use crate::ui::tag_selector::TagSelector;
use crate::ui::text_pane::{TextPane, TextPaneOptions};
use crate::ui::theme::apply_theme;
use crate::ui::tree_view::TreeView;

pub struct AppState {
    pub controller: DocumentController,
    pub widgets: MainWidgets,
    pub settings: AppSettings,
}

impl AppState {
    pub fn new(ctx: &AppContext, settings: AppSettings, sender: Sender<Message>) -> Self {
        let controller = DocumentController::new(
            ctx.input_path.clone(),
            ctx.output_path.clone(),
            ctx.debug,
        );

        let pane_options = TextPaneOptions {
            read_only: ctx.read_only,
            font: font_for(settings.font),
            font_size: settings.font_size as i32,
            word_wrap: settings.word_wrap_enabled,
            line_numbers: settings.line_numbers_enabled,
        };
        let title = format!("xmlview @ {}", ctx.output_dir.display());
        let file_name = if ctx.uses_inline_text() {
            "<text>".to_string()
        } else {
            extract_filename(&ctx.input_path)
        };
        let mut widgets = build_main_window(&title, &file_name, &pane_options, sender);

        apply_theme(
            widgets.text_pane.editor_mut(),
            widgets.tree_view.widget_mut(),
            &mut widgets.wind,
            settings.theme_mode == ThemeMode::Dark,
        );

        Self {
            controller,
            widgets,
            settings,
        }
    }

    /// Put the initial document into the text pane and build the views.
    pub fn open_initial(&mut self, ctx: &AppContext) {
        let text = if ctx.uses_inline_text() {
            ctx.text.clone()
        } else {
            match self.controller.load(None) {
                Ok(text) => text,
                Err(e) => {
                    log::error!("{}", e);
                    show_error("Failed reading file", &e.to_string());
                    return;
                }
            }
        };
        self.widgets.text_pane.set_content(&text);
        self.parse();
    }

    pub fn show(&mut self) {
        raise_window(&mut self.widgets.wind);
        let _ = self.widgets.text_pane.editor_mut().take_focus();
        self.widgets
            .text_pane
            .start_polling(self.settings.highlight_interval_secs);
    }

    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::Parse => self.parse(),
            Message::Save => {
                self.save();
            }
            Message::SaveAndClose => self.save_and_close(),
            Message::Close => self.close(),
            Message::TagSelected(tag) => self.select_tag(&tag),
            Message::TextEdited => self.widgets.text_pane.schedule_restyle(),
            Message::Restyle | Message::RescanHighlights => self.widgets.text_pane.rescan(),
            Message::OpenLink(url) => self.open_link(&url),
        }
    }

    pub fn parse(&mut self) {
        let text = self.widgets.text_pane.content();
        match self.controller.parse(&text) {
            Ok(view) => self.apply_view(view),
            Err(e) => {
                log::error!("{}", e);
                let detail = match e {
                    AppError::Xml(xml) => xml.to_string(),
                    other => other.to_string(),
                };
                show_error("Failed parsing XML", &detail);
            }
        }
    }

    fn apply_view(&mut self, view: ParsedView) {
        let MainWidgets {
            tree_view,
            text_pane,
            tag_selector,
            ..
        } = &mut self.widgets;
        refresh_views(tree_view, text_pane, tag_selector, &mut self.controller, view);
    }

    pub fn save(&mut self) -> bool {
        let text = self.widgets.text_pane.content();
        match self.controller.save(&text) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}", e);
                show_error("Failed saving file", &e.to_string());
                false
            }
        }
    }

    pub fn save_and_close(&mut self) {
        if self.save() {
            self.close();
        }
    }

    pub fn close(&mut self) {
        self.widgets.wind.hide();
    }

    pub fn select_tag(&mut self, tag: &str) {
        log::debug!("tag: {}", tag);
        let markers = self.controller.select_tag(tag);
        self.widgets.text_pane.set_markers(markers);
    }

    fn open_link(&mut self, url: &str) {
        if !confirm_open(url) {
            return;
        }
        if let Err(e) = open_link(url) {
            log::error!("Execution failed: {}", e);
        }
    }

    /// Create the save target if needed. `Err` means the app cannot continue.
    pub fn bootstrap_output(controller: &DocumentController) -> Result<(), AppError> {
        if controller.ensure_exists()? {
            show_warning(
                "Failed opening file",
                &format!(
                    "Trying to make default output: {}",
                    controller.path().display()
                ),
            );
        }
        Ok(())
    }
}

/// Push a fresh parse into the tree, the text and the tag list.
///
/// The tag selector's first entry is selected, which re-targets the markers.
fn refresh_views(
    tree_view: &mut TreeView,
    text_pane: &mut TextPane,
    tag_selector: &mut TagSelector,
    controller: &mut DocumentController,
    view: ParsedView,
) {
    tree_view.render(&view.outline);
    text_pane.set_content(&view.formatted);
    let selected = tag_selector.set_tags(&view.tags).unwrap_or_default();
    let markers = controller.select_tag(&selected);
    text_pane.set_markers(markers);
}

fn font_for(choice: FontChoice) -> Font {
    match choice {
        FontChoice::ScreenBold => Font::ScreenBold,
        FontChoice::Courier => Font::Courier,
        FontChoice::HelveticaMono => Font::Screen,
    }
}
