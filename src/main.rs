use std::{fs, io, path::PathBuf};

use clap::Parser;
use lambda::{
    DEFAULT_RECURSION_LIMIT, Environment,
    repl::{Repl, process, report},
};

/// lambda is a small Lisp-style interpreter. Without arguments it starts an
/// interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates the expressions in a script file instead.
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Maximum depth of nested user function calls.
    #[arg(long, default_value_t = DEFAULT_RECURSION_LIMIT)]
    recursion_limit: usize,

    /// Expression to evaluate.
    expression: Option<String>,
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

/// Prints every result; returns `false` if evaluation stopped at an error.
fn run_source(env: &mut Environment, source: &str) -> io::Result<bool> {
    if source.trim().is_empty() {
        return Ok(true);
    }

    let (mut out, mut err) = (io::stdout().lock(), io::stderr().lock());
    let mut ok = true;
    for result in process(env, source) {
        report(&result, &mut out, &mut err)?;
        ok &= result.is_ok();
    }

    Ok(ok)
}

/// Runs `source` and exits with status 1 if it fails.
fn run_or_exit(env: &mut Environment, source: &str) {
    match run_source(env, source) {
        Ok(true) => {},
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        },
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let mut env = Environment::with_recursion_limit(args.recursion_limit);

    if let Some(path) = &args.file {
        let script = fs::read_to_string(path).unwrap_or_else(|_| {
                                                 eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                                           path.display());
                                                 std::process::exit(1);
                                             });
        let source = script.lines().collect::<Vec<_>>().join(" ");

        run_or_exit(&mut env, &source);
    } else if let Some(expression) = &args.expression {
        run_or_exit(&mut env, expression);
    } else if let Err(err) = Repl::new(env).run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
