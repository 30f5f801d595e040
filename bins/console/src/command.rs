//! Console command parsing.

use std::fmt;

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  signup <email> <username> <password>   create an account and log in
  login <email> <password>               log in
  logout                                 log out
  budget <amount>                        set your budget
  category <name>                        add a category
  add <category> <amount> [note...]      record an expense
  summary                                totals per category
  list                                   every expense, newest first
  search <text>                          find expenses by category or note
  delete                                 delete your account
  help                                   show this text
  quit                                   leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Signup {
        email: String,
        username: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Budget(String),
    Category(String),
    Add {
        category: String,
        amount: String,
        note: Option<String>,
    },
    Summary,
    List,
    Search(String),
    Delete,
    Help,
    Quit,
}

/// Input that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace.
    Empty,
    /// First word is not a command.
    Unknown(String),
    /// Command with missing arguments.
    Usage(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Type a command, or `help`."),
            Self::Unknown(word) => write!(f, "Unknown command `{word}`. Type `help`."),
            Self::Usage(usage) => write!(f, "Usage: {usage}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Command {
    /// Parses one line. Words are split on whitespace; trailing words of
    /// `category`, `search` and the note of `add` are joined back with
    /// single spaces.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        let command = match name.to_lowercase().as_str() {
            "signup" => match rest.as_slice() {
                [email, username, password] => Self::Signup {
                    email: (*email).to_string(),
                    username: (*username).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(ParseError::Usage("signup <email> <username> <password>")),
            },
            "login" => match rest.as_slice() {
                [email, password] => Self::Login {
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(ParseError::Usage("login <email> <password>")),
            },
            "logout" => Self::Logout,
            "budget" => match rest.as_slice() {
                [amount] => Self::Budget((*amount).to_string()),
                _ => return Err(ParseError::Usage("budget <amount>")),
            },
            "category" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("category <name>"));
                }
                Self::Category(rest.join(" "))
            }
            "add" => match rest.as_slice() {
                [category, amount, note @ ..] => Self::Add {
                    category: (*category).to_string(),
                    amount: (*amount).to_string(),
                    note: (!note.is_empty()).then(|| note.join(" ")),
                },
                _ => return Err(ParseError::Usage("add <category> <amount> [note...]")),
            },
            "summary" => Self::Summary,
            "list" => Self::List,
            "search" => Self::Search(rest.join(" ")),
            "delete" => Self::Delete,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
