//! Stylesheet equivalence comparison binary.

use anyhow::{Context, Result};
use css_engine::compare_files;
use env_logger::{Builder, Env};
use log::error;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::exit;

const USAGE: &str = "usage: css_compare [options] CSS_1 CSS_2 [OUTPUT]\n\
                     \n\
                     Prints `true` when the two stylesheets are semantically\n\
                     equivalent, `false` otherwise.\n\
                     \n\
                     -h, --help       print this help\n\
                     -v, --version    print version";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Compare {
        first: PathBuf,
        second: PathBuf,
        output: Option<PathBuf>,
    },
    Help,
    Version,
    Invalid,
}

/// Scan arguments (program name already skipped). Flags win over
/// positionals; anything else dash-prefixed, or the wrong positional count,
/// is a usage error.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Invocation {
    let mut positionals: Vec<String> = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Invocation::Help,
            "-v" | "--version" => return Invocation::Version,
            _ if arg.starts_with('-') => return Invocation::Invalid,
            _ => positionals.push(arg),
        }
    }
    if positionals.len() != 2 && positionals.len() != 3 {
        return Invocation::Invalid;
    }
    let output = if positionals.len() == 3 {
        positionals.pop().map(PathBuf::from)
    } else {
        None
    };
    match (positionals.pop(), positionals.pop()) {
        (Some(second), Some(first)) => Invocation::Compare {
            first: PathBuf::from(first),
            second: PathBuf::from(second),
            output,
        },
        _ => Invocation::Invalid,
    }
}

fn run(first: &PathBuf, second: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let verdict = compare_files(first, second)?;
    let line = format!("{verdict}\n");
    match output {
        Some(path) => fs::write(path, line)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{line}"),
    }
    Ok(())
}

fn main() {
    let _log_init: Result<(), _> = Builder::from_env(Env::default().filter_or("RUST_LOG", "warn"))
        .is_test(false)
        .try_init();
    match parse_args(env::args().skip(1)) {
        Invocation::Help => println!("{USAGE}"),
        Invocation::Version => println!("css_compare {}", env!("CARGO_PKG_VERSION")),
        Invocation::Invalid => {
            eprintln!("{USAGE}");
            exit(1);
        }
        Invocation::Compare {
            first,
            second,
            output,
        } => {
            if let Err(err) = run(&first, &second, output.as_ref()) {
                error!("error: {err:#}");
                exit(1);
            }
        }
    }
}
