//! Interactive prompt: ask for a conflict number, analyze it, repeat.

use std::io::{BufRead, Write};

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use crate::summary::format_output;
use crate::Session;

const PROMPT: &str = "conflict> ";
const GREETING: &str = "Enter a conflict number to analyze, or 'exit' to quit";

/// One line of input, interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Exit,
    Empty,
    Analyze(i64),
    Invalid(String),
}

/// Whether the loop keeps prompting after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    match line {
        "" => ReplCommand::Empty,
        "exit" | "quit" | "q" => ReplCommand::Exit,
        _ => match line.parse::<i64>() {
            Ok(id) => ReplCommand::Analyze(id),
            Err(_) => ReplCommand::Invalid(line.to_string()),
        },
    }
}

/// Act on one line. Reports go to `out`, problems with the input or the
/// analysis go to `err`; neither ends the session.
pub fn handle_line<W: Write, E: Write>(
    session: &Session,
    line: &str,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> std::io::Result<Flow> {
    match parse_command(line) {
        ReplCommand::Exit => return Ok(Flow::Exit),
        ReplCommand::Empty => {}
        ReplCommand::Invalid(input) => {
            writeln!(err, "'{input}' is not a conflict number")?;
        }
        ReplCommand::Analyze(id) => analyze_one(session, id, json, out, err)?,
    }
    Ok(Flow::Continue)
}

fn analyze_one<W: Write, E: Write>(
    session: &Session,
    conflict_id: i64,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> std::io::Result<()> {
    match session.analyze(conflict_id) {
        Ok(Some(report)) => match format_output(&report, json) {
            Ok(text) => writeln!(out, "{text}"),
            Err(e) => writeln!(err, "Failed to format report: {e}"),
        },
        Ok(None) => writeln!(err, "Conflict {conflict_id} not found"),
        Err(e) => {
            warn!(conflict_id, error = %e, "Analysis failed");
            writeln!(err, "Analysis of conflict {conflict_id} failed: {e}")
        }
    }
}

/// Run the prompt until `exit` or end of input.
pub fn run_repl(session: &Session, json: bool) -> anyhow::Result<()> {
    println!("{GREETING}");

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if matches!(parse_command(&line), ReplCommand::Analyze(_)) {
                    editor.add_history_entry(line.trim()).ok();
                }
                if handle_line(session, &line, json, &mut out, &mut err)? == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use 'exit' to quit");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(anyhow::Error::new(e).context("Failed to read input")),
        }
    }

    Ok(())
}

/// Same loop over non-interactive input, one command per line.
pub fn run_lines<R: BufRead, W: Write, E: Write>(
    session: &Session,
    input: R,
    json: bool,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if handle_line(session, &line, json, out, err)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use midtrade_analysis::test_support::{july_crisis, MockRegressor};
    use midtrade_models::MidtradeConfig;
    use std::sync::Arc;

    fn session() -> Session {
        let mut config = MidtradeConfig::default();
        config.render.enabled = false;
        Session::new(config, july_crisis(), Arc::new(MockRegressor::default()))
    }

    fn run(script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_lines(&session(), script.as_bytes(), false, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn exit_words_end_the_session() {
        for word in ["exit", "quit", "q", "  exit  "] {
            assert_eq!(parse_command(word), ReplCommand::Exit);
        }
    }

    #[test]
    fn numbers_are_conflicts() {
        assert_eq!(parse_command("258"), ReplCommand::Analyze(258));
        assert_eq!(parse_command(" 12\n"), ReplCommand::Analyze(12));
        assert_eq!(parse_command(""), ReplCommand::Empty);
    }

    #[test]
    fn anything_else_is_rejected() {
        assert_eq!(
            parse_command("twelve"),
            ReplCommand::Invalid("twelve".to_string())
        );
        assert_eq!(
            parse_command("12.5"),
            ReplCommand::Invalid("12.5".to_string())
        );
        assert_eq!(parse_command("EXIT"), ReplCommand::Invalid("EXIT".to_string()));
    }

    #[test]
    fn bad_input_and_unknown_ids_keep_the_session_going() {
        let (out, err) = run("twelve\n999\n\n12\n");

        assert!(err.contains("'twelve' is not a conflict number"));
        assert!(err.contains("Conflict 999 not found"));
        assert!(out.contains("Conflict 12 (began 1914, trade year 1913)"));
        assert!(out.contains("instigators:    AUH"));
        assert!(out.contains("combatants:     SER, RUS, FRN, UKG"));
    }

    #[test]
    fn exit_stops_before_later_lines() {
        let (out, err) = run("5\nquit\n12\n");

        assert!(out.contains("Conflict 5 "));
        assert!(!out.contains("Conflict 12 "));
        assert!(err.is_empty());
    }

    #[test]
    fn handle_line_reports_flow() {
        let session = session();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let flow = handle_line(&session, "404", false, &mut out, &mut err).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());

        let flow = handle_line(&session, "q", false, &mut out, &mut err).unwrap();
        assert_eq!(flow, Flow::Exit);
    }

    #[test]
    fn failed_analysis_is_reported_and_not_fatal() {
        let session = Session::new(
            MidtradeConfig::default(),
            july_crisis(),
            Arc::new(MockRegressor::failing()),
        );
        let mut out = Vec::new();
        let mut err = Vec::new();

        let flow = handle_line(&session, "12", false, &mut out, &mut err).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(String::from_utf8(err)
            .unwrap()
            .contains("Analysis of conflict 12 failed"));
    }
}
