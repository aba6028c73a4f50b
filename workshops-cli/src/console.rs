//! Blocking stdin prompts.

use std::io::{self, BufRead, Write};

use workshops_sync::Confirm;

/// Print `prompt` on stderr and read one line from stdin, without the line
/// ending. Stdout stays reserved for the report.
pub fn prompt_line(prompt: &str) -> io::Result<String> {
    ask(prompt, &mut io::stderr().lock(), &mut io::stdin().lock())
}

fn ask(prompt: &str, out: &mut impl Write, input: &mut impl BufRead) -> io::Result<String> {
    write!(out, "{prompt} ")?;
    out.flush()?;
    read_answer(input)
}

fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut buffer = String::new();
    input.read_line(&mut buffer)?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

/// Only `y` / `Y` counts as yes.
fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// `[Y/N]` prompt on the terminal.
pub struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        match prompt_line(&format!("{question} [Y/N]")) {
            Ok(answer) => is_yes(&answer),
            Err(err) => {
                tracing::warn!("failed to read confirmation from stdin: {err}");
                false
            }
        }
    }
}
