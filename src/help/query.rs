// query.rs - help query resolving
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

use tracing::*;

use super::frame::{send_framed, HelpReply, ReplySink};
use super::registry::{HelpRegistry, INDEX_TOPIC};
use super::topics::{USAGE_LABEL, USAGE_TEXT};

pub(crate) const INDEX_LABEL: &str = "HELP";

/// What a help query ended with. `NotFound` covers both a missing topic and
/// a topic hidden from non-operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HelpOutcome {
    Usage,
    Index,
    Topic,
    NotFound,
}

// joins parameters back into single case-insensitive topic name.
pub(crate) fn normalize_query(params: &[&str]) -> String {
    params.join(" ").trim().to_lowercase()
}

impl HelpRegistry {
    /// Resolves HELP/HELPOP parameters and streams the answer to the sink.
    /// On `NotFound` nothing is sent - the caller renders the error reply.
    pub(crate) fn resolve<S: ReplySink>(
        &self,
        params: &[&str],
        is_operator: bool,
        sink: &mut S,
    ) -> Result<HelpOutcome, S::Error> {
        let query = normalize_query(params);

        if query.is_empty() {
            send_framed(sink, USAGE_LABEL, USAGE_TEXT)?;
            return Ok(HelpOutcome::Usage);
        }

        if query == INDEX_TOPIC {
            send_framed(sink, INDEX_LABEL, self.index(is_operator))?;
            return Ok(HelpOutcome::Index);
        }

        match self.lookup(&query) {
            Some(entry) if entry.is_visible(is_operator) => {
                send_framed(sink, &query.to_uppercase(), entry.body)?;
                Ok(HelpOutcome::Topic)
            }
            _ => {
                debug!("Help topic '{}' not found", query);
                Ok(HelpOutcome::NotFound)
            }
        }
    }

    /// Resolves query and renders `NotFound` as single error reply.
    pub(crate) fn respond<S: ReplySink>(
        &self,
        params: &[&str],
        is_operator: bool,
        sink: &mut S,
    ) -> Result<HelpOutcome, S::Error> {
        let outcome = self.resolve(params, is_operator, sink)?;
        if outcome == HelpOutcome::NotFound {
            sink.send_reply(HelpReply::HelpNotFound { params })?;
        }
        Ok(outcome)
    }
}
