// reply.rs - replies
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


use std::fmt;

use crate::help::HelpReply;

// all replies used by this server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reply<'a> {
    RplYoureOper381 {
        client: &'a str,
    },
    ErrInputTooLong417 {
        client: &'a str,
    },
    ErrUnknownCommand421 {
        client: &'a str,
        command: &'a str,
    },
    ErrNeedMoreParams461 {
        client: &'a str,
        command: &'a str,
    },
    ErrPasswdMismatch464 {
        client: &'a str,
    },
    ErrHelpNotFound524 {
        client: &'a str,
        params: &'a [&'a str],
    },
    RplHelpStart704 {
        client: &'a str,
        subject: &'a str,
        line: &'a str,
    },
    RplHelpTxt705 {
        client: &'a str,
        subject: &'a str,
        line: &'a str,
    },
    RplEndOfHelp706 {
        client: &'a str,
        subject: &'a str,
    },
}

use Reply::*;

impl<'a> Reply<'a> {
    // help replies get client name that is not known to help subsystem.
    pub(crate) fn from_help(client: &'a str, reply: HelpReply<'a>) -> Reply<'a> {
        match reply {
            HelpReply::HelpStart { subject, line } => RplHelpStart704 {
                client,
                subject,
                line,
            },
            HelpReply::HelpText { subject, line } => RplHelpTxt705 {
                client,
                subject,
                line,
            },
            HelpReply::EndOfHelp { subject } => RplEndOfHelp706 { client, subject },
            HelpReply::HelpNotFound { params } => ErrHelpNotFound524 { client, params },
        }
    }
}

impl<'a> fmt::Display for Reply<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RplYoureOper381 { client } => {
                write!(f, "381 {} :You are now an IRC operator", client)
            }
            ErrInputTooLong417 { client } => {
                write!(f, "417 {} :Input line was too long", client)
            }
            ErrUnknownCommand421 { client, command } => {
                write!(f, "421 {} {} :Unknown command", client, command)
            }
            ErrNeedMoreParams461 { client, command } => {
                write!(f, "461 {} {} :Not enough parameters", client, command)
            }
            ErrPasswdMismatch464 { client } => {
                write!(f, "464 {} :Password incorrect", client)
            }
            ErrHelpNotFound524 { client, params } => {
                write!(f, "524 {}", client)?;
                // echoed words must stay middle parameters.
                params
                    .iter()
                    .flat_map(|p| p.split_ascii_whitespace())
                    .map(|w| w.trim_start_matches(':'))
                    .filter(|w| !w.is_empty())
                    .try_for_each(|w| write!(f, " {}", w))?;
                write!(f, " :Help not found")
            }
            RplHelpStart704 {
                client,
                subject,
                line,
            } => {
                write!(f, "704 {} {} :{}", client, subject, line)
            }
            RplHelpTxt705 {
                client,
                subject,
                line,
            } => {
                write!(f, "705 {} {} :{}", client, subject, line)
            }
            RplEndOfHelp706 { client, subject } => {
                write!(f, "706 {} {} :End of help", client, subject)
            }
        }
    }
}
