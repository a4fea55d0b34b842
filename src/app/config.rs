//! Command-line configuration.
//!
//! `Args` is what the user typed; `AppContext` is the resolved configuration
//! handed to the controller and the window at construction time.

use clap::Parser;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "default.xml";
pub const DEFAULT_OUTPUT_DIR: &str = "$PWD";

#[derive(Debug, Parser)]
#[command(name = "xmlview")]
#[command(about = "View and lightly edit an XML file as a tree and as text")]
#[command(version)]
pub struct Args {
    /// File name to process
    #[arg(default_value = DEFAULT_FILE)]
    pub fname: String,

    /// Read the document from standard input
    #[arg(short = 'i', long = "stdin")]
    pub stdin: bool,

    /// Output directory; saves go to <outputdir>/<file name>
    #[arg(short = 'o', long = "outputdir", default_value = DEFAULT_OUTPUT_DIR)]
    pub outputdir: String,

    /// Print the formatted document and its outline, then exit
    #[arg(short = 'd', long = "dump")]
    pub dump: bool,

    /// Verbose tree display and debug logging
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    /// Document text used when no file name is given
    #[arg(short = 't', long = "text", default_value = "")]
    pub text: String,

    /// Open the text pane read-only; navigation and copy still work
    #[arg(short = 'r', long = "readonly")]
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    /// File the document is read from.
    pub input_path: PathBuf,
    /// File edits are saved to.
    pub output_path: PathBuf,
    pub output_dir: PathBuf,
    pub read_stdin: bool,
    pub dump: bool,
    pub debug: bool,
    pub text: String,
    pub read_only: bool,
}

impl AppContext {
    pub fn from_args(args: Args) -> Self {
        let fname = expand_vars(&args.fname);
        let output_dir_raw = expand_vars(&args.outputdir);
        let redirected = args.outputdir != DEFAULT_OUTPUT_DIR;

        let output_dir = if output_dir_raw.is_empty() {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        } else {
            PathBuf::from(output_dir_raw)
        };

        let input_path = PathBuf::from(&fname);
        let output_path = if redirected && !fname.is_empty() {
            redirect(&input_path, &output_dir)
        } else {
            input_path.clone()
        };

        Self {
            input_path,
            output_path,
            output_dir,
            read_stdin: args.stdin,
            dump: args.dump,
            debug: args.debug,
            text: args.text,
            read_only: args.readonly,
        }
    }

    /// True when there is no file to work on and the inline text is the document.
    pub fn uses_inline_text(&self) -> bool {
        self.input_path.as_os_str().is_empty()
    }

    /// Switch both input and output to a new working file (used for captured stdin).
    pub fn set_working_file(&mut self, path: PathBuf) {
        self.output_path = path.clone();
        self.input_path = path;
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

fn redirect(path: &Path, dir: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => dir.join(name),
        None => path.to_path_buf(),
    }
}

/// Expand `$VAR` and `${VAR}` from the environment; unset variables expand to nothing.
pub fn expand_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        if let Some(&(_, '{')) = chars.peek() {
            let rest = &input[i + 2..];
            if let Some(close) = rest.find('}') {
                let name = &rest[..close];
                out.push_str(&lookup(name).unwrap_or_default());
                // Skip "{", the name and "}".
                for _ in 0..name.chars().count() + 2 {
                    chars.next();
                }
                continue;
            }
            out.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&(_, n)) = chars.peek() {
            if n.is_ascii_alphanumeric() || n == '_' {
                name.push(n);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            out.push('$');
        } else {
            out.push_str(&lookup(&name).unwrap_or_default());
        }
    }
    out
}
