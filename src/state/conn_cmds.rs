// conn_cmds.rs - connection commands
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
    pub(super) async fn process_oper<'a>(
        &self,
        conn_state: &mut ConnState,
        name: &'a str,
        password: &'a str,
    ) -> Result<(), Box<dyn Error>> {
        // unknown operator and bad password give same reply.
        let verified = if let Some(op_config) = self.config.find_operator(name) {
            argon2_verify_password_async(password.to_string(), op_config.password.clone())
                .await
                .is_ok()
        } else {
            false
        };

        if verified {
            conn_state.oper = true;
            conn_state.send_msg_display(
                &self.config.name,
                RplYoureOper381 {
                    client: &conn_state.client,
                },
            )?;
            info!("New IRC operator {} from {}", name, conn_state.client);
        } else {
            conn_state.send_msg_display(
                &self.config.name,
                ErrPasswdMismatch464 {
                    client: &conn_state.client,
                },
            )?;
            info!("Failed OPER {} from {}", name, conn_state.client);
        }
        Ok(())
    }

    pub(super) fn process_quit(&self, conn_state: &mut ConnState) -> Result<(), Box<dyn Error>> {
        conn_state.quit = true;
        info!("Client {} quit", conn_state.client);
        conn_state
            .sender
            .send("ERROR :Closing connection".to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::test::*;
    use super::*;

    #[tokio::test]
    async fn test_command_oper() {
        let (main_state, handle, port) = run_test_server(config_with_operator("NoWay")).await;

        {
            let mut line_stream = connect_to_test(port).await;
            line_stream.send("OPER guru".to_string()).await.unwrap();
            assert_eq!(
                ":irc.irc 461 127.0.0.1 OPER :Not enough parameters".to_string(),
                line_stream.next().await.unwrap().unwrap()
            );
            line_stream
                .send("OPER guru NoWayX".to_string())
                .await
                .unwrap();
            assert_eq!(
                ":irc.irc 464 127.0.0.1 :Password incorrect".to_string(),
                line_stream.next().await.unwrap().unwrap()
            );
            line_stream
                .send("OPER guruX NoWay".to_string())
                .await
                .unwrap();
            assert_eq!(
                ":irc.irc 464 127.0.0.1 :Password incorrect".to_string(),
                line_stream.next().await.unwrap().unwrap()
            );
            line_stream
                .send("OPER guru NoWay".to_string())
                .await
                .unwrap();
            assert_eq!(
                ":irc.irc 381 127.0.0.1 :You are now an IRC operator".to_string(),
                line_stream.next().await.unwrap().unwrap()
            );
        }

        quit_test_server(main_state, handle).await;
    }

    #[tokio::test]
    async fn test_command_oper_no_operators() {
        let (main_state, handle, port) = run_test_server(MainConfig::default()).await;

        {
            let mut line_stream = connect_to_test(port).await;
            line_stream
                .send("OPER guru NoWay".to_string())
                .await
                .unwrap();
            assert_eq!(
                ":irc.irc 464 127.0.0.1 :Password incorrect".to_string(),
                line_stream.next().await.unwrap().unwrap()
            );
        }

        quit_test_server(main_state, handle).await;
    }

    #[tokio::test]
    async fn test_command_quit() {
        let (main_state, handle, port) = run_test_server(MainConfig::default()).await;

        {
            let mut line_stream = connect_to_test(port).await;
            line_stream.send("QUIT :Bye".to_string()).await.unwrap();
            assert_eq!(
                "ERROR :Closing connection".to_string(),
                line_stream.next().await.unwrap().unwrap()
            );
            assert!(line_stream.next().await.is_none());
        }

        quit_test_server(main_state, handle).await;
    }
}
