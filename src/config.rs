// config.rs - configuration
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

use clap::Parser;
use serde_derive::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::net::{IpAddr, Ipv4Addr};
use validator::Validate;

use crate::utils::validate_username;

#[derive(clap::Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[clap(short, long, help = "Configuration file path")]
    pub(crate) config: Option<String>,
    #[clap(short, long, help = "Listen bind address")]
    pub(crate) listen: Option<IpAddr>,
    #[clap(short, long, help = "Listen port")]
    pub(crate) port: Option<u16>,
    #[clap(short = 'n', long, help = "Server name")]
    pub(crate) name: Option<String>,
    #[clap(short, long, help = "Generate password hash")]
    pub(crate) gen_password_hash: bool,
    #[clap(short = 'P', long, help = "Password for generated hash")]
    pub(crate) password: Option<String>,
}

impl Cli {
    pub(crate) fn parse_args() -> Cli {
        Cli::parse()
    }
}

#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Validate)]
pub(crate) struct OperatorConfig {
    #[validate(custom = "validate_username")]
    pub(crate) name: String,
    // argon2 hash in PHC format - generate it with '-g' option.
    pub(crate) password: String,
}

/// Main configuration structure.
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Validate)]
pub(crate) struct MainConfig {
    #[validate(contains = ".")]
    pub(crate) name: String,
    pub(crate) listen: IpAddr,
    pub(crate) port: u16,
    pub(crate) max_connections: Option<usize>,
    #[validate]
    pub(crate) operators: Option<Vec<OperatorConfig>>,
}

impl MainConfig {
    pub(crate) fn new(cli: Cli) -> Result<MainConfig, Box<dyn Error>> {
        let config_path = cli.config.as_deref().unwrap_or("simple-irc-helpop.toml");
        let mut config_file = File::open(config_path)?;
        let mut config_str = String::new();
        config_file.read_to_string(&mut config_str)?;
        // modify configuration by CLI options
        let mut config: MainConfig = toml::from_str(&config_str)?;
        if let Some(addr) = cli.listen {
            config.listen = addr;
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(name) = cli.name {
            config.name = name;
        }
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn find_operator(&self, name: &str) -> Option<&OperatorConfig> {
        self.operators
            .as_ref()
            .and_then(|ops| ops.iter().find(|op| op.name == name))
    }
}

impl Default for MainConfig {
    fn default() -> Self {
        MainConfig {
            name: "irc.irc".to_string(),
            listen: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 6667,
            max_connections: None,
            operators: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::env::temp_dir;
    use std::fs;

    struct TempFileHandle {
        path: String,
    }

    impl TempFileHandle {
        fn new(path: &str) -> TempFileHandle {
            TempFileHandle {
                path: temp_dir().join(path).to_string_lossy().to_string(),
            }
        }
    }

    impl Drop for TempFileHandle {
        fn drop(&mut self) {
            fs::remove_file(self.path.as_str()).unwrap();
        }
    }

    fn cli_with_config(path: &str) -> Cli {
        Cli {
            config: Some(path.to_string()),
            listen: None,
            port: None,
            name: None,
            gen_password_hash: false,
            password: None,
        }
    }

    #[test]
    fn test_mainconfig_new() {
        let file_handle = TempFileHandle::new("temp_helpop_config.toml");
        let cli = cli_with_config(&file_handle.path);

        fs::write(
            file_handle.path.as_str(),
            r##"
name = "irci.localhost"
listen = "127.0.0.1"
port = 6667
max_connections = 4000

[[operators]]
name = "matiszpaki"
password = "$argon2id$v=19$m=4096,t=3,p=1$aGVsbG9zYWx0$c29tZWhhc2g"
"##,
        )
        .unwrap();
        let result = MainConfig::new(cli.clone()).map_err(|e| e.to_string());
        assert_eq!(
            Ok(MainConfig {
                name: "irci.localhost".to_string(),
                listen: "127.0.0.1".parse().unwrap(),
                port: 6667,
                max_connections: Some(4000),
                operators: Some(vec![OperatorConfig {
                    name: "matiszpaki".to_string(),
                    password: "$argon2id$v=19$m=4096,t=3,p=1$aGVsbG9zYWx0$c29tZWhhc2g"
                        .to_string()
                }]),
            }),
            result
        );

        let cli2 = Cli {
            listen: Some("192.168.1.4".parse().unwrap()),
            port: Some(6668),
            name: Some("ircer.localhost".to_string()),
            ..cli
        };
        let result = MainConfig::new(cli2).map_err(|e| e.to_string());
        assert_eq!(
            Ok(MainConfig {
                name: "ircer.localhost".to_string(),
                listen: "192.168.1.4".parse().unwrap(),
                port: 6668,
                max_connections: Some(4000),
                operators: Some(vec![OperatorConfig {
                    name: "matiszpaki".to_string(),
                    password: "$argon2id$v=19$m=4096,t=3,p=1$aGVsbG9zYWx0$c29tZWhhc2g"
                        .to_string()
                }]),
            }),
            result
        );
    }

    #[test]
    fn test_mainconfig_new_minimal() {
        let file_handle = TempFileHandle::new("temp_helpop_config_min.toml");
        let cli = cli_with_config(&file_handle.path);
        fs::write(
            file_handle.path.as_str(),
            r##"
name = "irc.local"
listen = "0.0.0.0"
port = 7000
"##,
        )
        .unwrap();
        let result = MainConfig::new(cli).map_err(|e| e.to_string());
        assert_eq!(
            Ok(MainConfig {
                name: "irc.local".to_string(),
                listen: "0.0.0.0".parse().unwrap(),
                port: 7000,
                max_connections: None,
                operators: None,
            }),
            result
        );
    }

    #[test]
    fn test_mainconfig_validation() {
        let file_handle = TempFileHandle::new("temp_helpop_config_bad.toml");
        let cli = cli_with_config(&file_handle.path);

        fs::write(
            file_handle.path.as_str(),
            r##"
name = "irci"
listen = "127.0.0.1"
port = 6667
"##,
        )
        .unwrap();
        assert!(MainConfig::new(cli.clone()).is_err());

        fs::write(
            file_handle.path.as_str(),
            r##"
name = "irci.localhost"
listen = "127.0.0.1"
port = 6667

[[operators]]
name = "#matiszpaki"
password = "xxx"
"##,
        )
        .unwrap();
        assert!(MainConfig::new(cli.clone()).is_err());

        fs::write(
            file_handle.path.as_str(),
            r##"
name = "irci.localhost"
listen = "127.0.0.1"
"##,
        )
        .unwrap();
        assert!(MainConfig::new(cli).is_err());
    }

    #[test]
    fn test_mainconfig_find_operator() {
        let mut config = MainConfig::default();
        assert_eq!(None, config.find_operator("guru"));
        config.operators = Some(vec![
            OperatorConfig {
                name: "guru".to_string(),
                password: "hash1".to_string(),
            },
            OperatorConfig {
                name: "guru2".to_string(),
                password: "hash2".to_string(),
            },
        ]);
        assert_eq!(
            Some("hash2"),
            config.find_operator("guru2").map(|op| op.password.as_str())
        );
        assert_eq!(None, config.find_operator("gurux"));
    }
}
