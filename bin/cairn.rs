//! cairn command-line interpreter.
//!
//! Usage:
//!   cairn <file.cairn>     Evaluate a file
//!   cairn -e <code>        Evaluate a string
//!   cairn                  Read from stdin

use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use cairn::{Mode, Session, SessionConfig, SessionError};
use log::LevelFilter;

const USAGE: &str = "\
Usage: cairn [OPTIONS] [FILE]

Arguments:
  [FILE]  Source file to evaluate, or - for stdin

Options:
  -e <CODE>            Evaluate CODE string
  -m, --mode <MODE>    strict, non-strict, reorder or infer
  --max-steps <N>      Stop after N rewriting steps
  --trace              Print every intermediate state
  -c, --config <PATH>  Read settings from PATH (default: ./cairn.toml if present)
  -v                   Log at debug level (-vv for trace)
  -q                   Disable logging
  -h, --help           Print this help message

If no source is given, reads from stdin.";

const DEFAULT_CONFIG: &str = "cairn.toml";

enum Source {
    Stdin,
    Code(String),
    File(PathBuf),
}

#[derive(Default)]
struct Options {
    source: Option<Source>,
    mode: Option<Mode>,
    max_steps: Option<usize>,
    trace: bool,
    config: Option<PathBuf>,
    log_level: Option<LevelFilter>,
}

enum Action {
    Eval(Options),
    Help,
}

fn read_stdin() -> Result<String, io::Error> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn value<'a>(flag: &str, args: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, String> {
    args.next().ok_or_else(|| format!("{flag} needs a value\n\n{USAGE}"))
}

fn set_source(options: &mut Options, source: Source) -> Result<(), String> {
    if options.source.replace(source).is_some() {
        return Err(format!("more than one source given\n\n{USAGE}"));
    }
    Ok(())
}

fn parse_args() -> Result<Action, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-e" => {
                let code = value(arg, &mut args)?;
                set_source(&mut options, Source::Code(code.clone()))?;
            }
            "-m" | "--mode" => options.mode = Some(value(arg, &mut args)?.parse()?),
            "--max-steps" => {
                let n = value(arg, &mut args)?;
                let n = n
                    .parse::<usize>()
                    .map_err(|e| format!("invalid step count '{n}': {e}"))?;
                options.max_steps = Some(n);
            }
            "--trace" => options.trace = true,
            "-c" | "--config" => options.config = Some(PathBuf::from(value(arg, &mut args)?)),
            "-v" => options.log_level = Some(LevelFilter::Debug),
            "-vv" => options.log_level = Some(LevelFilter::Trace),
            "-q" => options.log_level = Some(LevelFilter::Off),
            "-" => set_source(&mut options, Source::Stdin)?,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option {flag}\n\n{USAGE}"));
            }
            file => set_source(&mut options, Source::File(PathBuf::from(file)))?,
        }
    }
    Ok(Action::Eval(options))
}

/// Start from the config file, then let flags override it.
fn load_config(options: &Options) -> Result<SessionConfig, SessionError> {
    let mut config = match &options.config {
        Some(path) => SessionConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            SessionConfig::from_file(Path::new(DEFAULT_CONFIG))?
        }
        None => SessionConfig::default(),
    };
    if let Some(mode) = options.mode {
        config.mode = mode;
    }
    if options.max_steps.is_some() {
        config.max_steps = options.max_steps;
    }
    if let Some(level) = options.log_level {
        config.log_level = level;
    }
    Ok(config)
}

fn read_source(source: Option<&Source>) -> Result<String, String> {
    match source {
        None | Some(Source::Stdin) => read_stdin().map_err(|e| format!("error reading stdin: {e}")),
        Some(Source::Code(code)) => Ok(code.clone()),
        Some(Source::File(path)) => fs::read_to_string(path)
            .map_err(|e| format!("error reading {}: {e}", path.display())),
    }
}

fn eval(options: Options) -> Result<(), String> {
    let config = load_config(&options).map_err(|e| e.to_string())?;
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()
    {
        eprintln!("warning: could not install logger: {e}");
    }

    let source = read_source(options.source.as_ref())?;
    let mut session = Session::with_config(config);

    if options.trace {
        for state in session.trace(&source).map_err(|e| e.to_string())? {
            println!("{}", state.pivot());
        }
        return Ok(());
    }

    let outcome = session.run(&source).map_err(|e| e.to_string())?;
    println!("{outcome}");
    Ok(())
}

fn main() -> ExitCode {
    match parse_args() {
        Ok(Action::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Action::Eval(options)) => match eval(options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
