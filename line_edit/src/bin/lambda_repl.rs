// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A tiny REPL to try the line editor by hand. Every line is echoed back, unless its
//! parentheses don't balance, in which case a parse error is shown. Press `\` to type
//! `λ`, and `:quit` (or closing stdin) exits.

use clap::Parser;
use crossterm::style::Stylize as _;
use line_edit::{DEFAULT_PROMPT, EditorConfig, ReadlineAsync, ReadlineError,
                TracingConfig, WriterArg, tracing_setup};

const QUIT_COMMAND: &str = ":quit";

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "lambda_repl")]
#[command(about = "Echo REPL on top of the line_edit line editor")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    #[arg(long, short = 'p', default_value = DEFAULT_PROMPT, help = "Prompt to show before each line.")]
    pub prompt: String,

    #[arg(long, help = "Type a plain `\\` instead of substituting `λ` for it.")]
    pub no_lambda: bool,

    #[arg(
        long,
        short = 'w',
        value_delimiter = ',',
        default_value = "file",
        help = "Where tracing output goes: any of stdout, stderr, file, none."
    )]
    pub tracing_writer: Vec<WriterArg>,

    #[arg(long, default_value = "debug", help = "One of trace, debug, info, warn, error.")]
    pub log_level: tracing::Level,

    #[arg(long, default_value = line_edit::DEFAULT_LOG_FILE, help = "Log file used by the `file` writer.")]
    pub log_file: String,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    tracing_setup::init(TracingConfig {
        writers: cli_arg.tracing_writer.clone(),
        level: cli_arg.log_level,
        tracing_log_file_path_and_prefix: cli_arg.log_file.clone(),
    })?;

    let config = if cli_arg.no_lambda {
        EditorConfig::without_literal_substitution()
    } else {
        EditorConfig::default()
    };

    let Some(mut readline_async) = ReadlineAsync::try_new(config)? else {
        return Err(miette::miette!(
            "lambda_repl needs an interactive terminal on stdin and stdout"
        ));
    };

    loop {
        match readline_async.read_line(Some(&cli_arg.prompt)).await {
            Ok(line) if line.trim() == QUIT_COMMAND => break,
            Ok(line) => {
                tracing::info!(message = "evaluate", %line);
                match evaluate(&line) {
                    Ok(output) => readline_async.print_line(&output)?,
                    Err(message) => readline_async.print_line(&format!(
                        "{} {message}",
                        "** PARSE ERROR **".red().bold()
                    ))?,
                }
            }
            Err(ReadlineError::InputClosed) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Stand-in evaluator: echo the line if its parentheses balance.
fn evaluate(line: &str) -> Result<String, String> {
    let mut depth = 0_usize;
    for (index, ch) in line.chars().enumerate() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unexpected `)` at {index}"))?;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(format!("{depth} unclosed `(`"));
    }
    Ok(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate("(λx.x) y"), Ok("(λx.x) y".to_string()));
        assert_eq!(evaluate("(λx.x"), Err("1 unclosed `(`".to_string()));
        assert_eq!(evaluate("x)"), Err("unexpected `)` at 1".to_string()));
    }
}
