//! Reading and parsing of stdin input lines

use std::io::{self, BufRead, BufReader};
use std::thread;

use tokio::sync::mpsc;

/// What a line typed on stdin asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Forward this text to the destination
    Forward(String),
    /// `/connect HOST:PORT`
    Connect(String),
    /// `/disconnect`
    Disconnect,
    /// `/status`
    Status,
    /// `/history`
    History,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Blank line
    Empty,
    /// Unrecognised `/command`
    Unknown(String),
}

/// Help text for the interactive commands
pub const INPUT_HELP: &str = "Commands: /connect HOST:PORT, /disconnect, /status, /history, /quit. \
Start a line with // to send a literal '/'.";

/// Interpret one input line
pub fn parse_input(line: &str) -> InputCommand {
    if line.trim().is_empty() {
        return InputCommand::Empty;
    }

    if let Some(rest) = line.strip_prefix("//") {
        return InputCommand::Forward(format!("/{}", rest));
    }

    let Some(command) = line.strip_prefix('/') else {
        return InputCommand::Forward(line.to_string());
    };

    let mut parts = command.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim();

    match name {
        "connect" => InputCommand::Connect(arg.to_string()),
        "disconnect" => InputCommand::Disconnect,
        "status" => InputCommand::Status,
        "history" => InputCommand::History,
        "help" => InputCommand::Help,
        "quit" | "exit" => InputCommand::Quit,
        other => InputCommand::Unknown(other.to_string()),
    }
}

/// Read lines from `reader` on a dedicated thread.
///
/// The receiver yields each line without its terminator and closes at end of
/// input. A read error is delivered once and ends the stream. The thread is
/// never joined: a read blocked on a terminal must not hold up process exit.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(64);

    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;

    Ok(rx)
}

/// Read process stdin line by line, see [`spawn_line_reader`]
pub fn spawn_stdin_reader() -> io::Result<mpsc::Receiver<io::Result<String>>> {
    spawn_line_reader(BufReader::new(io::stdin()))
}
