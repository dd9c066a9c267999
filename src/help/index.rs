// index.rs - help index
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

use super::registry::{TopicCategory, TopicEntry};

/// Generates the help index text. Aliases are skipped, operator-only topics
/// appear only in the operator variant. Each section is sorted by name.
pub(crate) fn build_index<'a, I>(entries: I, for_opers: bool) -> String
where
    I: IntoIterator<Item = &'a TopicEntry>,
{
    let mut commands = vec![];
    let mut isupport = vec![];
    let mut information = vec![];

    entries
        .into_iter()
        .filter(|e| !e.is_alias() && e.is_visible(for_opers))
        .for_each(|e| match e.category {
            TopicCategory::Command => commands.push(e.name),
            TopicCategory::ISupportToken => isupport.push(e.name),
            TopicCategory::Information => information.push(e.name),
        });

    format!(
        "= Help Topics =\n\nCommands:\n{}\n\nRPL_ISUPPORT Tokens:\n{}\n\nInformation:\n{}",
        index_section(commands),
        index_section(isupport),
        index_section(information)
    )
}

fn index_section(mut names: Vec<&str>) -> String {
    names.sort_unstable();
    names
        .iter()
        .map(|name| format!("   {}", name))
        .collect::<Vec<_>>()
        .join("\n")
}
