//! Interactive shell
//!
//! Reads one command per line until `exit` or end of input. Errors are
//! printed and the loop carries on.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;

use super::output::Output;
use crate::command::Liszt;

const EXIT: &str = "exit";

pub fn run(liszt: &mut Liszt, output: &Output, prompt: bool) -> Result<()> {
    let stdin = io::stdin();
    let prompt = prompt && stdin.is_terminal();
    let mut lines = stdin.lock().lines();

    loop {
        if prompt {
            print!("({})> ", board_label(liszt));
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = line.trim_end_matches(['\r', '\n']);

        if command == EXIT {
            break;
        }
        if command.trim().is_empty() {
            continue;
        }

        match liszt.execute(command) {
            Ok(reply) => output.reply(&reply),
            Err(err) => output.error(&err.to_string()),
        }
    }

    output.verbose("shell closed");
    Ok(())
}

/// Active board title for the prompt
fn board_label(liszt: &mut Liszt) -> String {
    liszt
        .run_command("where")
        .unwrap_or_else(|_| "no board".to_string())
}
