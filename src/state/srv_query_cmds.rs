// srv_query_cmds.rs - server query commands
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

use super::*;

impl MainState {
    // HELP and HELPOP - registry is shared by all connections and never changes.
    pub(super) fn process_help(
        &self,
        conn_state: &mut ConnState,
        params: &[&str],
    ) -> Result<(), Box<dyn Error>> {
        let mut sink = conn_state.reply_sink(&self.config.name);
        let outcome = self.help.respond(params, conn_state.oper, &mut sink)?;
        debug!(
            "Help query {:?} from {}: {:?}",
            params, conn_state.client, outcome
        );
        Ok(())
    }
}
