// registry.rs - help topic registry
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

use flagset::{flags, FlagSet};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use tracing::*;

use super::index::build_index;
use super::topics::{TopicSource, HELP_TOPICS};

// reserved query - never a registry key.
pub(crate) const INDEX_TOPIC: &str = "index";

/// Index section of the topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TopicCategory {
    Command,
    Information,
    ISupportToken,
}

flags! {
    pub(crate) enum TopicFlag: u8 {
        OperOnly = 0b01,
        // duplicates content of other topic; queryable but never indexed.
        Alias = 0b10,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TopicEntry {
    pub(crate) name: &'static str,
    pub(crate) body: &'static str,
    pub(crate) category: TopicCategory,
    pub(crate) flags: FlagSet<TopicFlag>,
}

impl TopicEntry {
    fn from_source(src: &TopicSource) -> TopicEntry {
        let flags = src
            .flags
            .iter()
            .fold(FlagSet::default(), |acc, f| acc | *f);
        TopicEntry {
            name: src.name,
            body: src.text,
            category: src.category,
            flags,
        }
    }

    pub(crate) fn is_oper_only(&self) -> bool {
        self.flags.contains(TopicFlag::OperOnly)
    }

    pub(crate) fn is_alias(&self) -> bool {
        self.flags.contains(TopicFlag::Alias)
    }

    /// The single access rule shared by lookups and index generation.
    pub(crate) fn is_visible(&self, is_operator: bool) -> bool {
        !self.is_oper_only() || is_operator
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RegistryError {
    DuplicateTopic(String),
    NotCanonicalName(String),
    ReservedName(String),
    EmptyBody(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateTopic(name) => write!(f, "Duplicate help topic '{}'", name),
            RegistryError::NotCanonicalName(name) => {
                write!(f, "Help topic name '{}' is not lowercase word", name)
            }
            RegistryError::ReservedName(name) => {
                write!(f, "Help topic name '{}' is reserved", name)
            }
            RegistryError::EmptyBody(name) => write!(f, "Help topic '{}' has empty text", name),
        }
    }
}

impl Error for RegistryError {}

/// Immutable help topic registry. Built once at startup, kept in main state
/// and read by all connections without locking.
#[derive(Debug)]
pub(crate) struct HelpRegistry {
    topics: HashMap<&'static str, TopicEntry>,
    // both indexes computed once - registry never changes after build.
    index: String,
    oper_index: String,
}

impl HelpRegistry {
    pub(crate) fn new() -> Result<HelpRegistry, RegistryError> {
        Self::from_sources(HELP_TOPICS)
    }

    pub(crate) fn from_sources(sources: &[TopicSource]) -> Result<HelpRegistry, RegistryError> {
        let mut topics = HashMap::with_capacity(sources.len());
        for src in sources {
            validate_source(src)?;
            if topics
                .insert(src.name, TopicEntry::from_source(src))
                .is_some()
            {
                return Err(RegistryError::DuplicateTopic(src.name.to_string()));
            }
        }

        let index = build_index(topics.values(), false);
        let oper_index = build_index(topics.values(), true);
        let registry = HelpRegistry {
            topics,
            index,
            oper_index,
        };
        registry.check_aliases();
        info!("Help registry loaded with {} topics", registry.len());
        Ok(registry)
    }

    // aliases should duplicate some canonical topic. only reported, never enforced.
    fn check_aliases(&self) {
        self.entries().filter(|e| e.is_alias()).for_each(|alias| {
            let has_canonical = self
                .entries()
                .any(|e| !e.is_alias() && e.body == alias.body);
            if !has_canonical {
                warn!("Help alias '{}' has no canonical topic with same text", alias.name);
            }
        });
    }

    /// Finds topic by its canonical (lowercase) name.
    pub(crate) fn lookup(&self, name: &str) -> Option<&TopicEntry> {
        self.topics.get(name)
    }

    pub(crate) fn index(&self, for_opers: bool) -> &str {
        if for_opers {
            &self.oper_index
        } else {
            &self.index
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.topics.len()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &TopicEntry> {
        self.topics.values()
    }
}

fn validate_source(src: &TopicSource) -> Result<(), RegistryError> {
    if src.name.is_empty()
        || src.name.contains(char::is_whitespace)
        || src.name.to_lowercase() != src.name
    {
        Err(RegistryError::NotCanonicalName(src.name.to_string()))
    } else if src.name == INDEX_TOPIC {
        Err(RegistryError::ReservedName(src.name.to_string()))
    } else if src.text.is_empty() {
        Err(RegistryError::EmptyBody(src.name.to_string()))
    } else {
        Ok(())
    }
}
