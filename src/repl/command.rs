//! Prompt command parsing

use crate::state_machine::FollowUpPrompt;
use thiserror::Error;

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Comma-separated ingredients
    Add(Vec<String>),
    Remove(String),
    List,
    Suggest,
    Pick(MealChoice),
    Ask(String),
    Prompt(FollowUpPrompt),
    Show,
    Reset,
    Help,
    Quit,
}

/// How the user referred to a suggested meal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealChoice {
    /// 1-based position in the shown list
    Index(usize),
    Name(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("Unknown command {0:?}. Type `help` for the list of commands.")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let require = |name: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(rest.to_string())
        }
    };

    match keyword.to_ascii_lowercase().as_str() {
        "add" | "a" => {
            let items: Vec<String> = rest
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if items.is_empty() {
                Err(CommandError::MissingArgument("add"))
            } else {
                Ok(Command::Add(items))
            }
        }
        "remove" | "rm" => require("remove").map(Command::Remove),
        "list" | "ls" => Ok(Command::List),
        "suggest" | "go" => Ok(Command::Suggest),
        "pick" | "p" => {
            let arg = require("pick")?;
            Ok(Command::Pick(match arg.parse::<usize>() {
                Ok(n) => MealChoice::Index(n),
                Err(_) => MealChoice::Name(arg),
            }))
        }
        "ask" => require("ask").map(Command::Ask),
        "subs" => Ok(Command::Prompt(FollowUpPrompt::Substitutes)),
        "simpler" => Ok(Command::Prompt(FollowUpPrompt::Simpler)),
        "tips" => Ok(Command::Prompt(FollowUpPrompt::Tips)),
        "show" => Ok(Command::Show),
        "reset" | "back" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(keyword.to_string())),
    }
}
