// frame.rs - help reply framing
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

use crate::reply::Reply;

/// Single outbound line produced by help subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HelpReply<'a> {
    HelpStart { subject: &'a str, line: &'a str },
    HelpText { subject: &'a str, line: &'a str },
    EndOfHelp { subject: &'a str },
    // echoes request parameters.
    HelpNotFound { params: &'a [&'a str] },
}

/// Per-client outbound capability. Lines are passed in emission order;
/// delivery failure is reported by the sink and only propagated.
pub(crate) trait ReplySink {
    type Error;

    fn send_reply(&mut self, reply: HelpReply<'_>) -> Result<(), Self::Error>;
}

// collects replies rendered for unnamed client '*' - handy for logs and tests.
impl ReplySink for Vec<String> {
    type Error = std::convert::Infallible;

    fn send_reply(&mut self, reply: HelpReply<'_>) -> Result<(), Self::Error> {
        self.push(Reply::from_help("*", reply).to_string());
        Ok(())
    }
}

/// Splits body into lines: first line goes in start reply, rest in text
/// replies, then single end reply.
pub(crate) fn frame<'a>(subject: &'a str, body: &'a str) -> impl Iterator<Item = HelpReply<'a>> {
    body.split('\n')
        .enumerate()
        .map(move |(i, line)| {
            if i == 0 {
                HelpReply::HelpStart { subject, line }
            } else {
                HelpReply::HelpText { subject, line }
            }
        })
        .chain(std::iter::once(HelpReply::EndOfHelp { subject }))
}

pub(crate) fn send_framed<S: ReplySink>(
    sink: &mut S,
    subject: &str,
    body: &str,
) -> Result<(), S::Error> {
    frame(subject, body).try_for_each(|reply| sink.send_reply(reply))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_frame() {
        assert_eq!(
            vec![
                HelpReply::HelpStart {
                    subject: "AWAY",
                    line: "AWAY [message]"
                },
                HelpReply::HelpText {
                    subject: "AWAY",
                    line: ""
                },
                HelpReply::HelpText {
                    subject: "AWAY",
                    line: "Marks you away."
                },
                HelpReply::EndOfHelp { subject: "AWAY" },
            ],
            frame("AWAY", "AWAY [message]\n\nMarks you away.").collect::<Vec<_>>()
        );
        assert_eq!(
            vec![
                HelpReply::HelpStart {
                    subject: "PING",
                    line: "PING"
                },
                HelpReply::EndOfHelp { subject: "PING" },
            ],
            frame("PING", "PING").collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_frame_line_counts() {
        for k in 1..20 {
            let body = (0..k).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
            let replies = frame("TOPIC", &body).collect::<Vec<_>>();
            assert_eq!(k + 1, replies.len());
            assert!(matches!(replies[0], HelpReply::HelpStart { line: "line 0", .. }));
            assert_eq!(
                k - 1,
                replies
                    .iter()
                    .filter(|r| matches!(r, HelpReply::HelpText { .. }))
                    .count()
            );
            assert_eq!(HelpReply::EndOfHelp { subject: "TOPIC" }, replies[k]);
            for (i, reply) in replies[1..k].iter().enumerate() {
                assert_eq!(
                    HelpReply::HelpText {
                        subject: "TOPIC",
                        line: &format!("line {}", i + 1)
                    },
                    *reply
                );
            }
        }
    }

    struct FailingSink {
        sent: usize,
        capacity: usize,
    }

    impl ReplySink for FailingSink {
        type Error = String;

        fn send_reply(&mut self, _: HelpReply<'_>) -> Result<(), String> {
            if self.sent == self.capacity {
                Err("Connection closed".to_string())
            } else {
                self.sent += 1;
                Ok(())
            }
        }
    }

    #[test]
    fn test_send_framed() {
        let mut sink = Vec::<String>::new();
        send_framed(&mut sink, "NICK", "NICK <newnick>\n\nSets your nickname.").unwrap();
        assert_eq!(
            vec![
                "704 * NICK :NICK <newnick>".to_string(),
                "705 * NICK :".to_string(),
                "705 * NICK :Sets your nickname.".to_string(),
                "706 * NICK :End of help".to_string(),
            ],
            sink
        );

        let mut sink = FailingSink { sent: 0, capacity: 2 };
        assert_eq!(
            Err("Connection closed".to_string()),
            send_framed(&mut sink, "NICK", "a\nb\nc")
        );
        assert_eq!(2, sink.sent);
    }
}
