use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use tracing::Level;

use volcdef::{parsing, problem, rendering, templating};

enum Mode {
    Check,
    Dump,
    Html,
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("volcdef")
        .version(VERSION)
        .propagate_version(true)
        .about("A processor for records of volcano deformation.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug-level diagnostic output on standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given volcano records and report any problems")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .num_args(1..)
                        .help("The files containing the volcano records you want to check."),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Print a field-by-field dump of the given volcano records")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .num_args(1..)
                        .help("The files containing the volcano records you want to dump."),
                ),
        )
        .subcommand(
            Command::new("html")
                .about("Render the given volcano records as HTML pages")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .num_args(1..)
                        .help("The files containing the volcano records you want to render."),
                ),
        )
        .get_matches();

    if matches.get_flag("debug") {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    match matches.subcommand() {
        Some(("check", submatches)) => process(submatches, Mode::Check),
        Some(("dump", submatches)) => process(submatches, Mode::Dump),
        Some(("html", submatches)) => process(submatches, Mode::Html),
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: volcdef [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn process(matches: &ArgMatches, mode: Mode) {
    let filenames = matches
        .get_many::<String>("filename")
        .into_iter()
        .flatten();

    for filename in filenames {
        let filename = Path::new(filename);

        let content = match parsing::load(filename) {
            Ok(content) => content,
            Err(error) => {
                eprintln!("{}", problem::concise_loading_error(&error));
                std::process::exit(1);
            }
        };

        let volcano = match parsing::parse(&content) {
            Ok(volcano) => volcano,
            Err(error) => {
                eprintln!("{}", problem::full_parsing_error(&error, filename, &content));
                std::process::exit(1);
            }
        };

        match mode {
            Mode::Check => println!("{}: ok", filename.display()),
            Mode::Dump => print!("{}", rendering::render(&volcano)),
            Mode::Html => print!("{}", templating::page(&volcano)),
        }
    }
}
