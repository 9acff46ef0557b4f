//! Line commands understood by the headless driver.

use tandem_common::{InputError, LayoutMode, ProjectId, Rect};
use tandem_input::KeyCombo;
use tandem_layout::Point;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),

    #[error("unknown layout '{0}'")]
    InvalidLayout(String),

    #[error(transparent)]
    Chord(#[from] InputError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverCommand {
    /// Press a key chord.
    Key(KeyCombo),
    /// Raw input to the active session.
    Type(String),
    /// A line of input followed by Enter.
    Run(String),
    /// Address bar input for the active content tab.
    Go(String),
    Viewport(Rect),
    Press(Point),
    Move(Point),
    Release,
    Layout(LayoutMode),
    Switch(ProjectId),
    Rename(String),
    Status,
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  key <chord>          press a chord, e.g. key Ctrl+Shift+T
  type <text>          send raw text to the terminal (\\r \\n \\t \\e escapes)
  run <text>           send text followed by Enter
  go <address>         load an address in the content tab
  viewport <w> <h>     set the window content size
  press|move <x> <y>   pointer down / move (drags the divider)
  release              pointer up
  layout <mode>        split | terminal-only | content-only | split-vertical
  switch <project id>  activate a project
  rename <name>        rename the active project
  status | list | help | quit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<DriverCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));

    let command = match verb {
        "key" => DriverCommand::Key(KeyCombo::parse(required(rest, "key")?)?),
        "type" => DriverCommand::Type(unescape(required(rest, "type")?)),
        "run" => DriverCommand::Run(unescape(rest)),
        "go" => DriverCommand::Go(required(rest, "go")?.to_string()),
        "viewport" => {
            let (w, h) = pair(rest, "viewport")?;
            DriverCommand::Viewport(Rect::new(0.0, 0.0, w, h))
        }
        "press" => {
            let (x, y) = pair(rest, "press")?;
            DriverCommand::Press(Point::new(x, y))
        }
        "move" => {
            let (x, y) = pair(rest, "move")?;
            DriverCommand::Move(Point::new(x, y))
        }
        "release" => DriverCommand::Release,
        "layout" => DriverCommand::Layout(layout_mode(required(rest, "layout")?)?),
        "switch" => {
            let id = required(rest, "switch")?;
            let id = id
                .parse::<u32>()
                .map_err(|_| CommandError::InvalidNumber(id.to_string()))?;
            DriverCommand::Switch(ProjectId(id))
        }
        "rename" => DriverCommand::Rename(required(rest, "rename")?.to_string()),
        "status" => DriverCommand::Status,
        "list" | "ls" => DriverCommand::List,
        "help" | "?" => DriverCommand::Help,
        "quit" | "exit" => DriverCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, verb: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(verb))
    } else {
        Ok(rest)
    }
}

fn pair(rest: &str, verb: &'static str) -> Result<(f64, f64), CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(a), Some(b)) = (parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument(verb));
    };
    let num = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::InvalidNumber(s.to_string()))
    };
    Ok((num(a)?, num(b)?))
}

fn layout_mode(name: &str) -> Result<LayoutMode, CommandError> {
    match name {
        "split" => Ok(LayoutMode::Split),
        "terminal-only" | "terminal" => Ok(LayoutMode::TerminalOnly),
        "content-only" | "content" => Ok(LayoutMode::ContentOnly),
        "split-vertical" | "vertical" => Ok(LayoutMode::SplitVertical),
        other => Err(CommandError::InvalidLayout(other.to_string())),
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('e') => out.push('\x1b'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
