use super::command::Event;
use thiserror::Error;

/// Help text listing the accepted commands.
///
pub const USAGE: &str = "\
commands:
  type <text>     set the search box text
  search [<text>] look up the user in the search box (optionally typing first)
  user <id>       list repositories of <id> directly
  select <id>     select a repository by id
  show            show the selected repository
  dismiss         clear the current error
  status          print the current state
  help            show this text
  quit            exit";

/// Why a line of input could not be turned into events.
///
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a repository id")]
    InvalidRepoId(String),
}

/// Parse one line of user input into the events it stands for. Blank lines
/// yield no events.
///
pub fn parse_line(line: &str) -> Result<Vec<Event>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(vec![]);
    }
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let events = match command.to_lowercase().as_str() {
        "type" => vec![Event::SearchQueryChanged(argument.to_string())],
        "search" if argument.is_empty() => vec![Event::Search],
        "search" => vec![
            Event::SearchQueryChanged(argument.to_string()),
            Event::Search,
        ],
        "user" => vec![Event::SetUserId(required("user", argument)?.to_string())],
        "select" => {
            let id = required("select", argument)?;
            let id = id
                .parse()
                .map_err(|_| InputError::InvalidRepoId(id.to_string()))?;
            vec![Event::SelectRepo(id)]
        }
        "show" => vec![Event::ShowSelected],
        "dismiss" => vec![Event::DismissError],
        "status" => vec![Event::Status],
        "help" | "?" => vec![Event::Help],
        "quit" | "exit" | "q" => vec![Event::Quit],
        _ => return Err(InputError::UnknownCommand(command.to_string())),
    };
    Ok(events)
}

fn required<'a>(command: &'static str, argument: &'a str) -> Result<&'a str, InputError> {
    if argument.is_empty() {
        Err(InputError::MissingArgument(command))
    } else {
        Ok(argument)
    }
}
