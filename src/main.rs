// main.rs - main program
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

mod command;
mod config;
mod help;
mod reply;
mod state;
mod utils;

use std::error::Error;
use tracing::*;
use tracing_subscriber::EnvFilter;

use crate::config::*;
use crate::help::HelpRegistry;
use crate::state::*;
use crate::utils::*;

fn init_logging() {
    // RUST_LOG overrides default level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// fail before listening if help topics are broken.
fn build_help_registry() -> Result<HelpRegistry, Box<dyn Error>> {
    HelpRegistry::new().map_err(|e| {
        error!("Help registry error: {}", e);
        e.into()
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse_args();

    if cli.gen_password_hash {
        let password = if let Some(password) = cli.password {
            password
        } else {
            rpassword::prompt_password("Enter password: ")?
        };
        println!("Password Hash: {}", argon2_hash_password(&password)?);
        return Ok(());
    }

    init_logging();
    let config = MainConfig::new(cli)?;
    let help = build_help_registry()?;
    let (main_state, mut handle) = run_server(config, help).await?;
    info!("Listening on {}", main_state.local_addr());
    tokio::select! {
        res = &mut handle => res?,
        res = tokio::signal::ctrl_c() => {
            res?;
            main_state.quit("Interrupted").await;
            handle.await?;
        }
    }
    Ok(())
}
