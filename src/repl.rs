use std::io::{self, Write};

use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::debug;

use crate::{Environment, Evaluation, eval};

/// Prompt shown before every line.
pub const PROMPT: &str = "lambda> ";
/// File the line history is loaded from and saved to.
pub const HISTORY_FILE: &str = ".lambda_history";

/// Evaluates every expression on a line of input, in order.
///
/// Evaluation stops after the first error; the failed evaluation is the last
/// element of the returned list.
///
/// # Example
/// ```
/// use lambda::{Environment, repl::process};
///
/// let mut env = Environment::new();
/// let results = process(&mut env, "(defvar x 3) (* x 2) (foo) (+ 1 1)");
///
/// assert_eq!(results.len(), 3);
/// assert_eq!(results[1].value.as_deref(), Some("6"));
/// assert!(results[2].error.is_some());
/// ```
pub fn process(env: &mut Environment, text: &str) -> Vec<Evaluation> {
    let mut results = Vec::new();
    let mut pending = text.to_string();

    loop {
        let result = eval(&pending, env);
        let done = !result.is_ok() || result.remaining.is_empty();
        pending.clone_from(&result.remaining);
        results.push(result);

        if done {
            return results;
        }
    }
}

/// Writes one evaluation result for a user.
///
/// Values go to `out`, one per line. Errors go to `err` as `Error: <message>`.
/// Every front end reports through this function, so both the REPL and the
/// command line keep results and errors on separate streams.
///
/// # Errors
/// Failures of either writer.
///
/// # Example
/// ```
/// use lambda::{Environment, eval, repl::report};
///
/// let mut env = Environment::new();
/// let (mut out, mut err) = (Vec::new(), Vec::new());
///
/// report(&eval("(+ 1 2)", &mut env), &mut out, &mut err).unwrap();
/// report(&eval("(foo 1)", &mut env), &mut out, &mut err).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "3\n");
/// assert!(String::from_utf8(err).unwrap().starts_with("Error: "));
/// ```
pub fn report<W, E>(result: &Evaluation, out: &mut W, err: &mut E) -> io::Result<()>
    where W: Write,
          E: Write
{
    if let Some(value) = &result.value {
        writeln!(out, "{value}")?;
    }
    if let Some(error) = &result.error {
        writeln!(err, "Error: {error}")?;
    }

    Ok(())
}

/// Interactive session around one [`Environment`].
pub struct Repl {
    env: Environment,
}

impl Repl {
    #[must_use]
    pub const fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Reads lines until end of input, printing one line per result.
    ///
    /// Ctrl-C discards the current line; Ctrl-D ends the session.
    ///
    /// # Errors
    /// Failures of the terminal itself. Evaluation errors are printed and
    /// the session continues.
    pub fn run(&mut self) -> rustyline::Result<()> {
        let mut editor = DefaultEditor::new()?;
        if editor.load_history(HISTORY_FILE).is_err() {
            debug!(file = HISTORY_FILE, "no history loaded");
        }

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    if let Err(err) = editor.add_history_entry(line.as_str()) {
                        eprintln!("Error adding to history: {err}");
                    }

                    for result in process(&mut self.env, &line) {
                        report(&result, &mut io::stdout(), &mut io::stderr())?;
                    }
                },
                Err(ReadlineError::Interrupted) => {},
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        if let Err(err) = editor.save_history(HISTORY_FILE) {
            eprintln!("Error saving history: {err}");
        }

        Ok(())
    }
}
