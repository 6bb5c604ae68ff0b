//! Command-line interface for hilite
//! Highlights a source file with a built-in or user-supplied grammar and prints it as HTML,
//! JSON or ANSI-colored text.
//!
//! Usage:
//!   hilite `<path>` [--language `<id>`] [--format `<format>`]   - Highlight a file (`-` for stdin)
//!   hilite --list-languages                                    - List known grammars
//!   hilite --list-formats                                      - List output formats

mod highlight;
mod logging;

use clap::{Arg, ArgAction, ArgMatches, Command};
use hilite_config::{HiliteConfig, Loader};
use hilite_core::hilite::loader::SourceLoader;
use highlight::Session;
use std::io;
use std::path::PathBuf;

fn main() {
    if let Err(e) = logging::init_logging() {
        eprintln!("{}", e);
    }

    let matches = Command::new("hilite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A grammar driven syntax highlighter")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the source file, or '-' to read stdin")
                .required_unless_present_any(["list-languages", "list-formats"])
                .index(1),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("Language name, alias or file extension (default: inferred from the path)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: html, json or ansi (default: highlight.default_format)"),
        )
        .arg(
            Arg::new("grammar")
                .long("grammar")
                .short('g')
                .help("Extra grammar file (YAML or JSON); may be repeated")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("list-languages")
                .long("list-languages")
                .help("List available languages")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = load_config(matches.get_one::<String>("config"));
    let grammar_files: Vec<PathBuf> = matches
        .get_many::<String>("grammar")
        .map(|files| files.map(PathBuf::from).collect())
        .unwrap_or_default();
    let session = Session::new(config, &grammar_files).unwrap_or_else(|e| fail(&e));

    if matches.get_flag("list-languages") {
        print!("{}", session.list_languages());
        return;
    }
    if matches.get_flag("list-formats") {
        print!("{}", session.list_formats());
        return;
    }

    handle_highlight_command(&session, &matches);
}

/// Handle the highlight command
fn handle_highlight_command(session: &Session, matches: &ArgMatches) {
    let Some(path) = matches.get_one::<String>("path") else {
        fail("a path is required unless listing languages or formats");
    };
    let loader = if path == "-" {
        let source = io::read_to_string(io::stdin())
            .unwrap_or_else(|e| fail(&format!("cannot read stdin: {}", e)));
        SourceLoader::from_string(source)
    } else {
        SourceLoader::from_path(path).unwrap_or_else(|e| fail(&e.to_string()))
    };

    let output = session
        .highlight(
            &loader,
            matches.get_one::<String>("language").map(String::as_str),
            matches.get_one::<String>("format").map(String::as_str),
        )
        .unwrap_or_else(|e| fail(&e));
    print!("{}", output);
}

fn load_config(path: Option<&String>) -> HiliteConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(&format!("Configuration error: {}", e)))
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
