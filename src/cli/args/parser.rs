//! Module defining the command line argument parser.

use std::env;
use std::path::PathBuf;

use clap::{self, crate_authors, AppSettings, Arg, ArgMatches};
use lazy_static::lazy_static;

use crate::{NAME, VERSION};
use super::model::{ArgsError, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Error = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Error> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let path = |name| matches.value_of(name).map(|p| PathBuf::from(p.trim()));
        let number = |name: &'static str| -> Result<usize, ArgsError> {
            match matches.value_of(name) {
                Some(value) => value.trim().parse().map_err(|e| ArgsError::Number{
                    flag: name, value: value.to_owned(), source: e,
                }),
                None => Ok(0),
            }
        };

        Ok(Options{
            verbosity,
            prefix: matches.value_of(OPT_PREFIX).map(str::to_owned),
            catalog: path(OPT_CATALOG).unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
            templates: path(OPT_TEMPLATES),
            font: path(OPT_FONT).unwrap_or_else(|| PathBuf::from(DEFAULT_FONT)),
            invalid: path(OPT_INVALID).unwrap_or_else(|| PathBuf::from(DEFAULT_INVALID)),
            threads: number(OPT_THREADS)?,
            output_dir: path(OPT_OUTPUT).unwrap_or_else(|| PathBuf::from(".")),
            user: matches.value_of(OPT_USER).map(str::to_owned)
                .unwrap_or_else(default_user),
            fail_deliveries: number(OPT_FAIL_DELIVERIES)?,
            print_commands: matches.is_present(OPT_COMMANDS),
            commands: matches.values_of(ARG_COMMAND)
                .map(|vs| vs.map(str::to_owned).collect())
                .unwrap_or_default(),
        })
    }
}

fn default_user() -> String {
    env::var("USER").ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "shell".into())
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const DEFAULT_CATALOG: &str = "data/memes/memes.json";
const DEFAULT_FONT: &str = "data/fonts/DejaVuSans-Bold.ttf";
const DEFAULT_INVALID: &str = "data/invalid";

const ARG_COMMAND: &str = "command";
const OPT_PREFIX: &str = "prefix";
const OPT_CATALOG: &str = "catalog";
const OPT_TEMPLATES: &str = "templates";
const OPT_FONT: &str = "font";
const OPT_INVALID: &str = "invalid";
const OPT_THREADS: &str = "threads";
const OPT_OUTPUT: &str = "output";
const OPT_USER: &str = "user";
const OPT_FAIL_DELIVERIES: &str = "fail-deliveries";
const OPT_COMMANDS: &str = "commands";
const OPT_VERBOSE: &str = "verbose";
const OPT_QUIET: &str = "quiet";


/// Create the parser for application's command line.
#[allow(unknown_lints, dangerous_implicit_autorefs)]
pub fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version);
    }
    parser
        .about(*ABOUT)
        .author(crate_authors!(", "))

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // Commands to handle.
        .arg(Arg::with_name(ARG_COMMAND)
            .value_name("COMMAND")
            .multiple(true)
            .required(false)
            .help("Bot command(s) to handle")
            .long_help(concat!(
                "Bot command(s) to handle, as they would be sent in a chat message, ",
                "e.g. '!meme aliens \"top text\" \"bottom text\"'.\n\n",
                "If none are given, commands are read from standard input, one per line. ",
                "Use --commands to list the available ones.")))

        // Resources.
        .arg(Arg::with_name(OPT_CATALOG)
            .long("catalog")
            .value_name("FILE")
            .help("JSON file mapping meme names to image files")
            .long_help(concat!(
                "JSON file with an object that maps meme names to the names of their ",
                "image files.\n\nDefaults to data/memes/memes.json.")))
        .arg(Arg::with_name(OPT_TEMPLATES)
            .long("templates")
            .value_name("DIR")
            .help("Directory with the meme images")
            .long_help(concat!(
                "Directory that the image files listed in the catalog are relative to.\n\n",
                "By default, it's the directory of the catalog file.")))
        .arg(Arg::with_name(OPT_FONT)
            .long("font")
            .value_name("FILE")
            .help("Font file to render captions with"))
        .arg(Arg::with_name(OPT_INVALID)
            .long("invalid")
            .value_name("DIR")
            .help("Directory with fallback 'argument invalid' images"))
        .arg(Arg::with_name(OPT_PREFIX)
            .long("prefix")
            .value_name("PREFIX")
            .help("Prefix of bot commands (`!` by default)"))
        .arg(Arg::with_name(OPT_THREADS)
            .long("threads")
            .value_name("N")
            .help("Number of threads rendering memes (one per CPU by default)"))

        // Delivery.
        .arg(Arg::with_name(OPT_OUTPUT)
            .long("output").short("o")
            .value_name("DIR")
            .help("Directory to deliver the images to")
            .long_help(concat!(
                "Directory where the images sent in reply are copied to.\n\n",
                "By default, it's the current directory. Text replies are always printed ",
                "to standard output.")))
        .arg(Arg::with_name(OPT_USER)
            .long("user").short("u")
            .value_name("NAME")
            .help("Name of the user sending the commands"))
        .arg(Arg::with_name(OPT_FAIL_DELIVERIES)
            .long("fail-deliveries")
            .value_name("N")
            .help("Make the first N image deliveries fail"))

        .arg(Arg::with_name(OPT_COMMANDS)
            .long("commands")
            .conflicts_with(ARG_COMMAND)
            .help("Print the usage of bot commands and exit"))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}
