// topics.rs - help topics
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

// literal help topic data set. registry builds itself from this table.
// bodies are published text and kept byte for byte, tab-indented lines and
// upstream server name included - never reformat them.

use super::registry::{TopicCategory, TopicFlag};

use TopicCategory::*;
use TopicFlag::*;

pub(crate) struct TopicSource {
    pub(crate) name: &'static str,
    pub(crate) category: TopicCategory,
    pub(crate) flags: &'static [TopicFlag],
    pub(crate) text: &'static str,
}

const fn command(name: &'static str, text: &'static str) -> TopicSource {
    TopicSource { name, category: Command, flags: &[], text }
}

const fn oper_command(name: &'static str, text: &'static str) -> TopicSource {
    TopicSource { name, category: Command, flags: &[OperOnly], text }
}

// usage shown when HELP or HELPOP is sent without any argument.
pub(crate) const USAGE_LABEL: &str = "HELPOP";
pub(crate) const USAGE_TEXT: &str = r##"HELPOP <argument>

Get an explanation of <argument>, or "index" for a list of help topics."##;

// shared bodies - canonical topics and their aliases must stay identical.
macro_rules! cmode_help_text {
    () => {
        r##"== Channel Modes ==

Oragono supports the following channel modes:

  +b  |  Client masks that are banned from the channel (e.g. *!*@127.0.0.1)
  +e  |  Client masks that are exempted from bans.
  +I  |  Client masks that are exempted from the invite-only flag.
  +i  |  Invite-only mode, only invited clients can join the channel.
  +k  |  Key required when joining the channel.
  +l  |  Client join limit for the channel.
  +m  |  Moderated mode, only privileged clients can talk on the channel.
  +n  |  No-outside-messages mode, only users that are on the channel can send
      |  messages to it.
  +r  |  Only registered users can talk in the channel.
  +s  |  Secret mode, channel won't show up in /LIST or whois replies.
  +t  |  Only channel opers can modify the topic.

= Prefixes =

  +q (~)  |  Founder channel mode.
  +a (&)  |  Admin channel mode.
  +o (@)  |  Operator channel mode.
  +h (%)  |  Halfop channel mode.
  +v (+)  |  Voice channel mode."##
    };
}

macro_rules! umode_help_text {
    () => {
        r##"== User Modes ==

Oragono supports the following user modes:

  +a  |  User is marked as being away. This mode is set with the /AWAY command.
  +i  |  User is marked as invisible (their channels are hidden from whois replies).
  +o  |  User is an IRC operator.
  +s  |  Server Notice Masks (see help with /HELPOP snomasks).
  +Z  |  User is connected via TLS."##
    };
}

macro_rules! snomask_help_text {
    () => {
        r##"== Server Notice Masks ==

Oragono supports the following server notice masks for operators:

  a  |  Local announcements.
  c  |  Local client connections.
  j  |  Local channel actions.
  k  |  Local kills.
  n  |  Local nick changes.
  o  |  Local oper actions.
  q  |  Local quits.
  t  |  Local /STATS usage.
  u  |  Local client account actions.
  x  |  Local X-lines (DLINE/KLINE/etc).

To set a snomask, do this with your nickname:

  /MODE <nick> +s <chars>

For instance, this would set the kill, oper, account and xline snomasks on dan:

  /MODE dan +s koux"##
    };
}

pub(crate) static HELP_TOPICS: &[TopicSource] = &[
    // commands
    command(
        "acc",
        r##"ACC REGISTER <accountname> [callback_namespace:]<callback> [cred_type] :<credential>
ACC VERIFY <accountname> <auth_code>

Used in account registration. See the relevant specs for more info:
http://oragono.io/specs.html"##,
    ),
    command(
        "ambiance",
        r##"AMBIANCE <target> <text to be sent>

The AMBIANCE command is used to send a scene notification to the given target."##,
    ),
    command(
        "authenticate",
        r##"AUTHENTICATE

Used during SASL authentication. See the IRCv3 specs for more info:
http://ircv3.net/specs/extensions/sasl-3.1.html"##,
    ),
    command(
        "away",
        r##"AWAY [message]

If [message] is sent, marks you away. If [message] is not sent, marks you no
longer away."##,
    ),
    command(
        "cap",
        r##"CAP <subcommand> [:<capabilities>]

Used in capability negotiation. See the IRCv3 specs for more info:
http://ircv3.net/specs/core/capability-negotiation-3.1.html
http://ircv3.net/specs/core/capability-negotiation-3.2.html"##,
    ),
    command(
        "chanserv",
        r##"CHANSERV <subcommand> [params]

ChanServ controls channel registrations."##,
    ),
    command(
        "cs",
        r##"CS <subcommand> [params]

ChanServ controls channel registrations."##,
    ),
    oper_command(
        "debug",
        r##"DEBUG <option>

Prints debug information about the IRCd. <option> can be one of:

* GCSTATS: Garbage control statistics.
* NUMGOROUTINE: Number of goroutines in use.
* STARTCPUPROFILE: Starts the CPU profiler.
* STOPCPUPROFILE: Stops the CPU profiler.
* PROFILEHEAP: Writes out the CPU profiler info."##,
    ),
    oper_command(
        "dline",
        r##"DLINE [ANDKILL] [MYSELF] [duration] <ip>/<net> [ON <server>] [reason [| oper reason]]

Bans an IP address or network from connecting to the server. If the duration is
given then only for that long. The reason is shown to the user themselves, but
everyone else will see a standard message. The oper reason is shown to
operators getting info about the DLINEs that exist.

Bans are saved across subsequent launches of the server.

"ANDKILL" means that all matching clients are also removed from the server.

"MYSELF" is required when the DLINE matches the address the person applying it is connected
from. If "MYSELF" is not given, trying to DLINE yourself will result in an error.

[duration] can be of the following forms:
	1y 12mo 31d 10h 8m 13s

<net> is specified in typical CIDR notation. For example:
	127.0.0.1/8
	8.8.8.8/24

ON <server> specifies that the ban is to be set on that specific server.

[reason] and [oper reason], if they exist, are separated by a vertical bar (|)."##,
    ),
    command(
        "help",
        r##"HELP <argument>

Get an explanation of <argument>, or "index" for a list of help topics."##,
    ),
    command("helpop", USAGE_TEXT),
    command(
        "invite",
        r##"INVITE <nickname> <channel>

Invites the given user to the given channel, so long as you have the
appropriate channel privs."##,
    ),
    command(
        "ison",
        r##"ISON <nickname>{ <nickname>}

Returns whether the given nicks exist on the network."##,
    ),
    command(
        "join",
        r##"JOIN <channel>{,<channel>} [<key>{,<key>}]

Joins the given channels with the matching keys."##,
    ),
    command(
        "kick",
        r##"KICK <channel> <user> [reason]

Removes the user from the given channel, so long as you have the appropriate
channel privs."##,
    ),
    oper_command(
        "kill",
        r##"KILL <nickname> [reason]

Removes the given user from the network, showing them the reason if it is
supplied."##,
    ),
    oper_command(
        "kline",
        r##"KLINE [ANDKILL] [MYSELF] [duration] <mask> [ON <server>] [reason [| oper reason]]

Bans a mask from connecting to the server. If the duration is given then only for that
long. The reason is shown to the user themselves, but everyone else will see a standard
message. The oper reason is shown to operators getting info about the KLINEs that exist.

Bans are saved across subsequent launches of the server.

"ANDKILL" means that all matching clients are also removed from the server.

"MYSELF" is required when the KLINE matches the address the person applying it is connected
from. If "MYSELF" is not given, trying to KLINE yourself will result in an error.

[duration] can be of the following forms:
	1y 12mo 31d 10h 8m 13s

<mask> is specified in typical IRC format. For example:
	dan
	dan!5*@127.*

ON <server> specifies that the ban is to be set on that specific server.

[reason] and [oper reason], if they exist, are separated by a vertical bar (|)."##,
    ),
    command(
        "list",
        r##"LIST [<channel>{,<channel>}] [<elistcond>{,<elistcond>}]

Shows information on the given channels (or if none are given, then on all
channels). <elistcond>s modify how the channels are selected."##,
    ),
    command(
        "lusers",
        r##"LUSERS [<mask> [<server>]]

Shows statistics about the size of the network. If <mask> is given, only
returns stats for servers matching the given mask.  If <server> is given, the
command is processed by that server."##,
    ),
    command(
        "mode",
        r##"MODE <target> [<modestring> [<mode arguments>...]]

Sets and removes modes from the given target. For more specific information on
mode characters, see the help for "modes"."##,
    ),
    command(
        "monitor",
        r##"MONITOR <subcmd>

Allows the monitoring of nicknames, for alerts when they are online and
offline. The subcommands are:

    MONITOR + target{,target}
Adds the given names to your list of monitored nicknames.

    MONITOR - target{,target}
Removes the given names from your list of monitored nicknames.

    MONITOR C
Clears your list of monitored nicknames.

    MONITOR L
Lists all the nicknames you are currently monitoring.

    MONITOR S
Lists whether each nick in your MONITOR list is online or offline."##,
    ),
    command(
        "motd",
        r##"MOTD [server]

Returns the message of the day for this, or the given, server."##,
    ),
    command(
        "names",
        r##"NAMES [<channel>{,<channel>}]

Views the clients joined to a channel and their channel membership prefixes. To
view the channel membership prefixes supported by this server, see the help for
"PREFIX"."##,
    ),
    command(
        "nick",
        r##"NICK <newnick>

Sets your nickname to the new given one."##,
    ),
    command(
        "nickserv",
        r##"NICKSERV <subcommand> [params]

NickServ controls accounts and user registrations."##,
    ),
    command(
        "notice",
        r##"NOTICE <target>{,<target>} <text to be sent>

Sends the text to the given targets as a NOTICE."##,
    ),
    command(
        "npc",
        r##"NPC <target> <sourcenick> <text to be sent>
		
The NPC command is used to send a message to the target as the source.

Requires the roleplay mode (+E) to be set on the target."##,
    ),
    command(
        "npca",
        r##"NPCA <target> <sourcenick> <text to be sent>
		
The NPC command is used to send an action to the target as the source.

Requires the roleplay mode (+E) to be set on the target."##,
    ),
    command(
        "ns",
        r##"NS <subcommand> [params]

NickServ controls accounts and user registrations."##,
    ),
    command(
        "oper",
        r##"OPER <name> <password>

If the correct details are given, gives you IRCop privs."##,
    ),
    command(
        "part",
        r##"PART <channel>{,<channel>} [reason]

Leaves the given channels and shows people the given reason."##,
    ),
    command(
        "pass",
        r##"PASS <password>

When the server requires a connection password to join, used to send us the
password."##,
    ),
    command(
        "ping",
        r##"PING <args>...

Requests a PONG. Used to check link connectivity."##,
    ),
    command(
        "pong",
        r##"PONG <args>...

Replies to a PING. Used to check link connectivity."##,
    ),
    command(
        "privmsg",
        r##"PRIVMSG <target>{,<target>} <text to be sent>

Sends the text to the given targets as a PRIVMSG."##,
    ),
    command(
        "rename",
        r##"RENAME <channel> <newname> [<reason>]

Renames the given channel with the given reason, if possible.

For example:
	RENAME #ircv2 #ircv3 :Protocol upgrades!"##,
    ),
    oper_command(
        "sanick",
        r##"SANICK <currentnick> <newnick>

Gives the given user a new nickname."##,
    ),
    oper_command(
        "samode",
        r##"SAMODE <target> [<modestring> [<mode arguments>...]]

Forcibly sets and removes modes from the given target -- only available to
opers. For more specific information on mode characters, see the help for
"cmode" and "umode"."##,
    ),
    command(
        "scene",
        r##"SCENE <target> <text to be sent>

The SCENE command is used to send a scene notification to the given target."##,
    ),
    command(
        "tagmsg",
        r##"@+client-only-tags TAGMSG <target>{,<target>}

Sends the given client-only tags to the given targets as a TAGMSG. See the IRCv3
specs for more info: http://ircv3.net/specs/core/message-tags-3.3.html"##,
    ),
    command(
        "quit",
        r##"QUIT [reason]

Indicates that you're leaving the server, and shows everyone the given reason."##,
    ),
    oper_command(
        "rehash",
        r##"REHASH

Reloads the config file and updates TLS certificates on listeners"##,
    ),
    command(
        "time",
        r##"TIME [server]

Shows the time of the current, or the given, server."##,
    ),
    command(
        "topic",
        r##"TOPIC <channel> [topic]

If [topic] is given, sets the topic in the channel to that. If [topic] is not
given, views the current topic on the channel."##,
    ),
    oper_command(
        "undline",
        r##"UNDLINE <ip>/<net>

Removes an existing ban on an IP address or a network.

<net> is specified in typical CIDR notation. For example:
	127.0.0.1/8
	8.8.8.8/24"##,
    ),
    oper_command(
        "unkline",
        r##"UNKLINE <mask>

Removes an existing ban on a mask.

For example:
	dan
	dan!5*@127.*"##,
    ),
    command(
        "user",
        r##"USER <username> 0 * <realname>

Used in connection registration, sets your username and realname to the given
values (though your username may also be looked up with Ident)."##,
    ),
    command(
        "userhost",
        r##"USERHOST <nickname>{ <nickname>}
		
Shows information about the given users. Takes up to 10 nicknames."##,
    ),
    command(
        "version",
        r##"VERSION [server]

Views the version of software and the RPL_ISUPPORT tokens for the given server."##,
    ),
    command(
        "who",
        r##"WHO <name> [o]

Returns information for the given user."##,
    ),
    command(
        "whois",
        r##"WHOIS <client>{,<client>}

Returns information for the given user(s)."##,
    ),
    command(
        "whowas",
        r##"WHOWAS <nickname>

Returns historical information on the last user with the given nickname."##,
    ),
    // informational
    TopicSource {
        name: "modes",
        category: Information,
        flags: &[],
        text: concat!(cmode_help_text!(), "\n\n", umode_help_text!()),
    },
    TopicSource {
        name: "cmode",
        category: Information,
        flags: &[],
        text: cmode_help_text!(),
    },
    TopicSource {
        name: "cmodes",
        category: Information,
        flags: &[Alias],
        text: cmode_help_text!(),
    },
    TopicSource {
        name: "umode",
        category: Information,
        flags: &[],
        text: umode_help_text!(),
    },
    TopicSource {
        name: "umodes",
        category: Information,
        flags: &[Alias],
        text: umode_help_text!(),
    },
    TopicSource {
        name: "snomask",
        category: Information,
        flags: &[OperOnly, Alias],
        text: snomask_help_text!(),
    },
    TopicSource {
        name: "snomasks",
        category: Information,
        flags: &[OperOnly],
        text: snomask_help_text!(),
    },
    // RPL_ISUPPORT
    TopicSource {
        name: "casemapping",
        category: ISupportToken,
        flags: &[],
        text: r##"RPL_ISUPPORT CASEMAPPING

Oragono supports an experimental unicode casemapping designed for extended
Unicode support. This casemapping is based off RFC 7613 and the draft rfc7613
casemapping spec here: http://oragono.io/specs.html"##,
    },
    TopicSource {
        name: "prefix",
        category: ISupportToken,
        flags: &[],
        text: r##"RPL_ISUPPORT PREFIX

Oragono supports the following channel membership prefixes:

  +q (~)  |  Founder channel mode.
  +a (&)  |  Admin channel mode.
  +o (@)  |  Operator channel mode.
  +h (%)  |  Halfop channel mode.
  +v (+)  |  Voice channel mode."##,
    },
];

#[cfg(test)]
mod test {
    use super::*;

    fn topic_text(name: &str) -> &'static str {
        HELP_TOPICS.iter().find(|t| t.name == name).unwrap().text
    }

    #[test]
    fn test_topic_texts_verbatim() {
        assert_eq!(
            vec!["USERHOST <nickname>{ <nickname>}", "\t\t",
                "Shows information about the given users. Takes up to 10 nicknames."],
            topic_text("userhost").split('\n').collect::<Vec<_>>()
        );
        assert!(topic_text("dline").contains("\n\t127.0.0.1/8\n"));
        assert!(topic_text("rename").contains("\n\tRENAME #ircv2 #ircv3 :Protocol upgrades!"));
        assert!(topic_text("cmode").contains("\nOragono supports the following channel modes:\n"));
        assert!(topic_text("prefix").contains("Oragono supports the following channel membership"));
        assert!(topic_text("debug").contains("* GCSTATS: Garbage control statistics."));
        // no line ends with carriage return or trailing newline
        assert!(HELP_TOPICS.iter().all(|t| !t.text.contains('\r') && !t.text.ends_with('\n')));
    }
}
