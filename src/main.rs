use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;
use fltk::app;

use xml_view::app::config::{AppContext, Args};
use xml_view::app::controllers::document::DocumentController;
use xml_view::app::domain::{AppSettings, Message};
use xml_view::app::infrastructure::error::Result;
use xml_view::app::infrastructure::platform::stdin_has_data;
use xml_view::app::services::file_io;
use xml_view::app::state::AppState;
use xml_view::ui::dialogs::show_error;

fn main() {
    let mut ctx = AppContext::from_args(Args::parse());

    env_logger::Builder::new()
        .filter_level(ctx.log_level())
        .parse_default_env()
        .init();

    let forced = ctx.read_stdin;
    if forced || (!io::stdin().is_terminal() && stdin_has_data()) {
        match capture_stdin(&ctx, forced) {
            Ok(Some(path)) => ctx.set_working_file(path),
            Ok(None) => {}
            Err(e) => log::error!("failed reading standard input: {}", e),
        }
    }

    if ctx.dump {
        process::exit(dump(&ctx));
    }

    if !ctx.uses_inline_text() {
        let probe =
            DocumentController::new(ctx.input_path.clone(), ctx.output_path.clone(), ctx.debug);
        if let Err(e) = AppState::bootstrap_output(&probe) {
            log::error!("{}", e);
            show_error("Failed opening file", &e.to_string());
            process::exit(-1);
        }
    }

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let mut state = AppState::new(&ctx, settings, sender);
    state.open_initial(&ctx);
    state.show();

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            state.handle(msg);
        }
    }
}

/// Copy the working file's content plus everything on stdin to a temp file.
///
/// Unless reading was forced, an empty stdin leaves the working file alone.
fn capture_stdin(ctx: &AppContext, forced: bool) -> Result<Option<std::path::PathBuf>> {
    let piped = file_io::read_all_lines("", io::stdin().lock())?;
    if piped.is_empty() && !forced {
        return Ok(None);
    }
    let existing = if ctx.uses_inline_text() {
        ctx.text.clone()
    } else {
        file_io::read_document(&ctx.input_path).unwrap_or_default()
    };
    let path = file_io::write_temp_document(&format!("{existing}{piped}"))?;
    log::info!("reading from stdin into {}", path.display());
    Ok(Some(path))
}

/// Print the formatted document and its outline. Returns the exit code.
fn dump(ctx: &AppContext) -> i32 {
    let mut controller =
        DocumentController::new(ctx.input_path.clone(), ctx.output_path.clone(), ctx.debug);
    let text = if ctx.uses_inline_text() {
        Ok(ctx.text.clone())
    } else {
        controller.load(None)
    };

    match text.and_then(|t| controller.parse(&t)) {
        Ok(view) => {
            print!("{}", view.formatted);
            println!();
            for node in &view.outline {
                println!("{}{}", "  ".repeat(node.depth), node.label);
            }
            println!();
            println!("tags: {}", view.tags.join(", "));
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}
