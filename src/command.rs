use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  new <name> <label> <label>...      define a list mode
  bool <name> [on|off] [description] define a boolean mode
  json <name> <json arguments>       define a mode from JSON arguments
  cycle <name>                       next value
  back <name>                        previous value
  toggle <name>                      flip a boolean mode
  set <name> <value>                 select a value
  reset <name>                       back to the default
  reset-all                          reset every mode
  describe <name> <text>             set the description
  show [name]                        print modes
  remove <name>                      forget a mode
  help                               this text
  quit                               exit";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownVerb(String),
    #[error("{verb}: missing {what}")]
    Missing { verb: &'static str, what: &'static str },
    #[error("{0}: unexpected arguments")]
    TrailingArguments(&'static str),
}

/// One line of input to a [`ModeSet`](crate::modeset::ModeSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New { name: String, labels: Vec<String> },
    Bool {
        name: String,
        default: bool,
        description: Option<String>,
    },
    Json { name: String, args: String },
    Cycle(String),
    Back(String),
    Toggle(String),
    Set { name: String, value: String },
    Reset(String),
    ResetAll,
    Describe { name: String, text: String },
    Show(Option<String>),
    Remove(String),
    Help,
    Quit,
}

/// Split off the first whitespace-delimited word, returning it and the
/// trimmed remainder.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn take_name<'a>(
    verb: &'static str,
    rest: &'a str,
) -> Result<(String, &'a str), CommandError> {
    let (name, rest) = split_word(rest);
    if name.is_empty() {
        return Err(CommandError::Missing { verb, what: "mode name" });
    }
    Ok((name.to_string(), rest))
}

fn only_name(verb: &'static str, rest: &str) -> Result<String, CommandError> {
    let (name, rest) = take_name(verb, rest)?;
    if !rest.is_empty() {
        return Err(CommandError::TrailingArguments(verb));
    }
    Ok(name)
}

fn non_empty(verb: &'static str, what: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Missing { verb, what });
    }
    Ok(rest.to_string())
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(s);
        if verb.is_empty() {
            return Err(CommandError::Empty);
        }

        match verb.to_lowercase().as_str() {
            "new" | "list" => {
                let (name, rest) = take_name("new", rest)?;
                let labels: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                if labels.is_empty() {
                    return Err(CommandError::Missing {
                        verb: "new",
                        what: "labels",
                    });
                }
                Ok(Command::New { name, labels })
            }
            "bool" => {
                let (name, rest) = take_name("bool", rest)?;
                let (first, remainder) = split_word(rest);
                let (default, description) = match first.to_lowercase().as_str() {
                    "on" | "true" => (true, remainder),
                    "off" | "false" => (false, remainder),
                    _ => (false, rest),
                };
                Ok(Command::Bool {
                    name,
                    default,
                    description: (!description.is_empty()).then(|| description.to_string()),
                })
            }
            "json" => {
                let (name, rest) = take_name("json", rest)?;
                let args = non_empty("json", "arguments", rest)?;
                Ok(Command::Json { name, args })
            }
            "cycle" | "next" => Ok(Command::Cycle(only_name("cycle", rest)?)),
            "back" | "cycleback" | "prev" => Ok(Command::Back(only_name("back", rest)?)),
            "toggle" => Ok(Command::Toggle(only_name("toggle", rest)?)),
            "set" => {
                let (name, rest) = take_name("set", rest)?;
                let value = non_empty("set", "value", rest)?;
                Ok(Command::Set { name, value })
            }
            "reset" => Ok(Command::Reset(only_name("reset", rest)?)),
            "reset-all" => {
                if !rest.is_empty() {
                    return Err(CommandError::TrailingArguments("reset-all"));
                }
                Ok(Command::ResetAll)
            }
            "describe" => {
                let (name, rest) = take_name("describe", rest)?;
                let text = non_empty("describe", "description", rest)?;
                Ok(Command::Describe { name, text })
            }
            "show" | "ls" => {
                if rest.is_empty() {
                    Ok(Command::Show(None))
                } else {
                    Ok(Command::Show(Some(only_name("show", rest)?)))
                }
            }
            "remove" | "rm" => Ok(Command::Remove(only_name("remove", rest)?)),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::UnknownVerb(verb.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::New { name, labels } => write!(f, "new {} {}", name, labels.join(" ")),
            Command::Bool {
                name,
                default,
                description,
            } => {
                write!(f, "bool {} {}", name, if *default { "on" } else { "off" })?;
                if let Some(description) = description {
                    write!(f, " {}", description)?;
                }
                Ok(())
            }
            Command::Json { name, args } => write!(f, "json {} {}", name, args),
            Command::Cycle(name) => write!(f, "cycle {}", name),
            Command::Back(name) => write!(f, "back {}", name),
            Command::Toggle(name) => write!(f, "toggle {}", name),
            Command::Set { name, value } => write!(f, "set {} {}", name, value),
            Command::Reset(name) => write!(f, "reset {}", name),
            Command::ResetAll => write!(f, "reset-all"),
            Command::Describe { name, text } => write!(f, "describe {} {}", name, text),
            Command::Show(None) => write!(f, "show"),
            Command::Show(Some(name)) => write!(f, "show {}", name),
            Command::Remove(name) => write!(f, "remove {}", name),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
