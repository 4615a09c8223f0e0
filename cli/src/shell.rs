//! The interactive shell.
//!
//! A thin line loop over the session: `targets`, `matches`, `cmd`,
//! `output`, `timeout`, `help`, `exit`. All real behavior lives in
//! [`Session`]; this module only parses lines and prints confirmations.

use std::io::Write as _;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use mrcli_common::failure;
use mrcli_common::model::OutputMode;
use mrcli_core::session::Session;

use crate::terminal::print;

const PREFIX: &str = "mr.cli";

const HELP: &str = "\
targets <regex>   select target devices (full-name match)
targets a,b,...   select a comma-separated device list
targets           show the current target set
matches <regex>   preview matching devices without selecting them
cmd <command>     run a command on every target
output <mode>     set the output mode (raw, structured)
timeout [secs]    show or set the per-target timeout
exit | quit       leave the shell";

pub async fn run(session: &mut Session) -> anyhow::Result<()> {
    print::header("mr. cli");
    print::print("Welcome to mrcli. Type 'help' if you need it.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(session)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "exit" | "quit" => break,
            "help" => print::body(HELP),
            "targets" => targets(session, rest),
            "matches" => matches(session, rest),
            "cmd" => cmd(session, rest).await,
            "output" => output(session, rest),
            "timeout" => timeout(session, rest),
            other => failure!("Unknown command: {other}. Try \"help\"."),
        }
    }

    print::print("Bye.");
    Ok(())
}

fn prompt(session: &Session) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{PREFIX} [t: {}] > ", session.targets().len())?;
    stdout.flush()
}

fn targets(session: &mut Session, pattern: &str) {
    if pattern.is_empty() {
        if session.targets().is_empty() {
            print::print_status("There are no targets.");
        } else {
            print::print_status(format!(
                "Current targets [{}]: {}",
                session.targets().len(),
                session.targets()
            ));
        }
        return;
    }

    match session.select_targets(&expand_target_list(pattern)) {
        Ok(set) => print::print_status(format!("Targets changed to: {set}")),
        Err(e) => failure!("{e}"),
    }
}

/// `a,b,c` is shorthand for the alternation `(?:a|b|c)`; each part is
/// still a full-name pattern in its own right.
fn expand_target_list(spec: &str) -> String {
    if !spec.contains(',') {
        return spec.to_owned();
    }
    let parts: Vec<&str> = spec
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    format!("(?:{})", parts.join("|"))
}

fn matches(session: &Session, pattern: &str) {
    if pattern.is_empty() {
        failure!("matches requires a pattern");
        return;
    }
    match session.matches(pattern) {
        Ok(set) if set.is_empty() => print::print_status("No targets matched your query."),
        Ok(set) => print::print_status(format!("Matching device names ({}): {set}", set.len())),
        Err(e) => failure!("{e}"),
    }
}

async fn cmd(session: &Session, command: &str) {
    match session.run(command).await {
        Ok(body) => print::body(&body),
        Err(e) => failure!("{e}"),
    }
}

fn output(session: &mut Session, mode: &str) {
    if mode.is_empty() {
        print::print_status(format!("Output mode is {}.", session.output_mode()));
        return;
    }
    let parsed: OutputMode = match mode.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            failure!("{e}");
            return;
        }
    };
    match session.set_output(parsed) {
        Ok(()) => print::print_status(format!("Changed to output mode: {parsed}")),
        Err(e) => failure!("{e}"),
    }
}

fn timeout(session: &mut Session, value: &str) {
    if !value.is_empty() {
        match parse_timeout(value) {
            Ok(timeout) => {
                if let Err(e) = session.set_timeout(timeout) {
                    failure!("{e}");
                }
            }
            Err(msg) => failure!("{msg}"),
        }
    }
    print::print_status(format!(
        "Timeout is {:.1} seconds.",
        session.timeout().as_secs_f64()
    ));
}

/// Parses the timeout operand, rejecting negative and non-finite values
/// before they ever reach a `Duration`. The session applies the 1 second
/// floor on top of this.
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("The value {value:?} must be a number of seconds."))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("The value {value:?} must be a non-negative number of seconds."))
}
