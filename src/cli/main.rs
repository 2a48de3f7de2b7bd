//!
//! memesh -- Memes in the shell
//!


mod args;
mod logging;
mod transport;


use std::env;
use std::io::{self, BufRead, Write};
use std::process::exit;

use futures::executor::block_on;
use lazy_static::lazy_static;
use log::{debug, error, info, trace, warn};
use memebot::{BuildError, CatalogError, Config, DeliveryError, Dispatcher,
              FontError, PoolError, Requester, Transport};

use crate::args::{ArgsError, Options};
use crate::transport::DirectoryTransport;


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("memesh");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
}


fn main() {
    exit(run());
}

/// Run the application and return its exit code.
///
/// The logger guard is dropped at the end, before `exit` is called.
fn run() -> exitcode::ExitCode {
    let opts = match args::parse() {
        Ok(opts) => opts,
        Err(e) => return print_args_error(e),
    };

    let _guard = match logging::init(opts.verbosity) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return exitcode::SOFTWARE;
        }
    };
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let config = match build_config(&opts) {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot set up the meme bot: {}", e);
            return build_error_exitcode(&e);
        }
    };
    if opts.print_commands {
        for line in config.parser().usage() {
            println!("{}", line);
        }
        return exitcode::OK;
    }

    if !opts.output_dir.is_dir() {
        error!("Output directory {} doesn't exist", opts.output_dir.display());
        return exitcode::CANTCREAT;
    }
    let transport = DirectoryTransport::new(&opts.output_dir).fail_first(opts.fail_deliveries);
    debug!("Delivering images to {}", transport.directory().display());

    let dispatcher = Dispatcher::new(config, transport);
    let requester = Requester::new(opts.user.as_str());
    info!("Handling commands as {}", requester);

    if opts.commands.is_empty() {
        trace!("No commands given, reading them from standard input");
        handle_stdin(&dispatcher, &requester)
    } else {
        handle_all(&dispatcher, &requester, opts.commands.iter().map(String::as_str))
    }
}

/// Print an error that may occur while parsing arguments
/// and return the matching exit code.
fn print_args_error(e: ArgsError) -> exitcode::ExitCode {
    match e {
        ArgsError::Parse(ref e) => match e.kind {
            clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => {
                println!("{}", e.message);
                exitcode::OK
            }
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            _ => {
                let _ = writeln!(&mut io::stderr(), "{}", e.message);
                exitcode::USAGE
            }
        },
        e => {
            let _ = writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e);
            exitcode::USAGE
        },
    }
}


/// Set up the meme bot according to command line options.
fn build_config(opts: &Options) -> Result<Config, BuildError> {
    let mut builder = memebot::Builder::new()
        .catalog_file(&opts.catalog)
        .font_file(&opts.font)
        .invalid_directory(&opts.invalid)
        .render_threads(opts.threads);
    if let Some(ref prefix) = opts.prefix {
        builder = builder.prefix(prefix.as_str());
    }
    if let Some(ref templates) = opts.templates {
        builder = builder.template_directory(templates);
    }
    builder.build()
}

fn build_error_exitcode(e: &BuildError) -> exitcode::ExitCode {
    match *e {
        BuildError::Catalog(CatalogError::Io(_)) |
        BuildError::Font(FontError::Io(..)) |
        BuildError::Pool(PoolError::Io(..)) => exitcode::NOINPUT,
        BuildError::Catalog(_) | BuildError::Font(_) | BuildError::Pool(_) => exitcode::DATAERR,
        BuildError::ThreadPool(_) => exitcode::UNAVAILABLE,
        _ => exitcode::CONFIG,
    }
}


/// Handle commands read from standard input, one per line.
fn handle_stdin<T: Transport>(dispatcher: &Dispatcher<T>,
                              requester: &Requester) -> exitcode::ExitCode {
    let stdin = io::stdin();
    let mut status = exitcode::OK;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read commands from standard input: {}", e);
                return exitcode::IOERR;
            }
        };
        let line_status = handle_all(dispatcher, requester, Some(line.as_str()).into_iter());
        if line_status != exitcode::OK {
            status = line_status;
        }
    }
    status
}

/// Handle given commands one after another.
///
/// Returns an error exit code if any of the replies could not be delivered,
/// but carries on with the remaining commands.
fn handle_all<'c, T, I>(dispatcher: &Dispatcher<T>, requester: &Requester,
                        commands: I) -> exitcode::ExitCode
    where T: Transport, I: Iterator<Item=&'c str>
{
    let mut status = exitcode::OK;
    for command in commands.map(str::trim).filter(|c| !c.is_empty()) {
        if let Err(e) = handle(dispatcher, requester, command) {
            error!("{}", e);
            status = exitcode::UNAVAILABLE;
        }
    }
    status
}

fn handle<T: Transport>(dispatcher: &Dispatcher<T>, requester: &Requester,
                        command: &str) -> Result<(), DeliveryError> {
    match block_on(dispatcher.handle(requester, command))? {
        Some(outcome) => debug!("Reply to {:?}: {}", command, outcome),
        None => warn!("Not a meme command: {:?} (see --commands)", command),
    }
    Ok(())
}
