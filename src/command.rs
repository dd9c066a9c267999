// command.rs - commands
//
// simple-irc-helpop - help service of simple IRC server
// Copyright (C) 2022  Mateusz Szpakowski
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA

use const_table::const_table;
use std::error::Error;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MessageError {
    Empty,
    NoCommand,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::Empty => write!(f, "Message is empty"),
            MessageError::NoCommand => write!(f, "No command"),
        }
    }
}

impl Error for MessageError {}

// line already split into command and its parameters. source prefix is
// skipped, last parameter after ':' may contain spaces.
#[derive(PartialEq, Eq, Debug)]
pub(crate) struct Message<'a> {
    pub(crate) command: &'a str,
    pub(crate) params: Vec<&'a str>,
}

impl<'a> Message<'a> {
    pub(crate) fn from_shared_str(input: &'a str) -> Result<Self, MessageError> {
        let trimmed = input.trim_start();
        if trimmed.is_empty() {
            return Err(MessageError::Empty);
        }
        // skip source
        let trimmed = if trimmed.starts_with(':') {
            trimmed
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim_start())
                .unwrap_or("")
        } else {
            trimmed
        };

        let (rest, last_param) = if let Some((rest, lp)) = trimmed.split_once(" :") {
            (rest, Some(lp))
        } else {
            (trimmed, None)
        };

        let mut rest_words = rest.split_ascii_whitespace();
        let command = rest_words.next().ok_or(MessageError::NoCommand)?;
        let mut params = rest_words.collect::<Vec<_>>();
        if let Some(lp) = last_param {
            params.push(lp); // add last parameter
        }
        Ok(Message { command, params })
    }
}

#[const_table]
pub(crate) enum CommandId {
    CommandName {
        pub(crate) name: &'static str,
    },
    HELPId = CommandName { name: "HELP" },
    HELPOPId = CommandName { name: "HELPOP" },
    OPERId = CommandName { name: "OPER" },
    QUITId = CommandName { name: "QUIT" },
}

use CommandId::*;

#[derive(Clone, Debug)]
pub(crate) enum CommandError {
    UnknownCommand(String),
    NeedMoreParams(CommandId),
}

use CommandError::*;

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownCommand(s) => write!(f, "Unknown command '{}'", s),
            NeedMoreParams(s) => write!(f, "Command '{}' needs more parameters", s.name),
        }
    }
}

impl Error for CommandError {}

#[derive(PartialEq, Eq, Debug)]
pub(crate) enum Command<'a> {
    // HELP and HELPOP are same query.
    HELP { params: Vec<&'a str> },
    OPER { name: &'a str, password: &'a str },
    QUIT {},
}

use Command::*;

impl<'a> Command<'a> {
    pub(crate) fn from_message(message: &Message<'a>) -> Result<Self, CommandError> {
        let command = message.command.to_ascii_uppercase();
        if command == HELPId.name || command == HELPOPId.name {
            Ok(HELP {
                params: message.params.clone(),
            })
        } else if command == OPERId.name {
            if message.params.len() >= 2 {
                Ok(OPER {
                    name: message.params[0],
                    password: message.params[1],
                })
            } else {
                Err(NeedMoreParams(OPERId))
            }
        } else if command == QUITId.name {
            Ok(QUIT {})
        } else {
            Err(UnknownCommand(message.command.to_string()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_message_from_shared_str() {
        assert_eq!(
            Ok(Message {
                command: "HELP",
                params: vec![]
            }),
            Message::from_shared_str("HELP")
        );
        assert_eq!(
            Ok(Message {
                command: "HELP",
                params: vec!["away"]
            }),
            Message::from_shared_str("  HELP away")
        );
        assert_eq!(
            Ok(Message {
                command: "HELPOP",
                params: vec!["foo", "bar baz"]
            }),
            Message::from_shared_str("HELPOP foo :bar baz")
        );
        assert_eq!(
            Ok(Message {
                command: "OPER",
                params: vec!["guru", "NoWay"]
            }),
            Message::from_shared_str(":guru!~guru@host OPER guru NoWay")
        );
        assert_eq!(
            Ok(Message {
                command: "HELP",
                params: vec![""]
            }),
            Message::from_shared_str("HELP :")
        );
        assert_eq!(Err(MessageError::Empty), Message::from_shared_str("   "));
        assert_eq!(
            Err(MessageError::NoCommand),
            Message::from_shared_str(":guru!~guru@host")
        );
    }

    #[test]
    fn test_command_from_message() {
        assert_eq!(
            Ok(HELP {
                params: vec!["index"]
            }),
            Command::from_message(&Message {
                command: "HELP",
                params: vec!["index"]
            })
            .map_err(|e| e.to_string())
        );
        assert_eq!(
            Ok(HELP {
                params: vec!["cmode", "s"]
            }),
            Command::from_message(&Message {
                command: "helpop",
                params: vec!["cmode", "s"]
            })
            .map_err(|e| e.to_string())
        );
        assert_eq!(
            Ok(HELP { params: vec![] }),
            Command::from_message(&Message {
                command: "Help",
                params: vec![]
            })
            .map_err(|e| e.to_string())
        );
        assert_eq!(
            Ok(OPER {
                name: "guru",
                password: "NoWay"
            }),
            Command::from_message(&Message {
                command: "OPER",
                params: vec!["guru", "NoWay"]
            })
            .map_err(|e| e.to_string())
        );
        assert_eq!(
            Err("Command 'OPER' needs more parameters".to_string()),
            Command::from_message(&Message {
                command: "OPER",
                params: vec!["guru"]
            })
            .map_err(|e| e.to_string())
        );
        assert_eq!(
            Ok(QUIT {}),
            Command::from_message(&Message {
                command: "QUIT",
                params: vec!["bye"]
            })
            .map_err(|e| e.to_string())
        );
        assert_eq!(
            Err("Unknown command 'JOIN'".to_string()),
            Command::from_message(&Message {
                command: "JOIN",
                params: vec!["#channel"]
            })
            .map_err(|e| e.to_string())
        );
    }
}
