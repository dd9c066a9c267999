// mod.rs - main state
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

use futures::SinkExt;
use std::error::Error;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::ops::Drop;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tokio_util::codec::{Framed, LinesCodecError};
use tracing::*;

use crate::command::*;
use crate::config::*;
use crate::help::{HelpRegistry, HelpReply, ReplySink};
use crate::reply::*;
use crate::utils::*;

use Reply::*;

// state of single client connection.
#[derive(Debug)]
pub(crate) struct ConnState {
    stream: Framed<TcpStream, IRCLinesCodec>,
    sender: UnboundedSender<String>,
    receiver: UnboundedReceiver<String>,
    // client name used in replies - peer address.
    client: String,
    oper: bool,
    quit: bool,
    conns_count: Arc<AtomicUsize>,
}

impl ConnState {
    fn new(
        ip_addr: IpAddr,
        stream: Framed<TcpStream, IRCLinesCodec>,
        conns_count: Arc<AtomicUsize>,
    ) -> ConnState {
        let (sender, receiver) = unbounded_channel();
        ConnState {
            stream,
            sender,
            receiver,
            client: ip_addr.to_string(),
            oper: false,
            quit: false,
            conns_count,
        }
    }

    pub(crate) fn is_quit(&self) -> bool {
        self.quit
    }

    fn send_msg_display<T: fmt::Display>(
        &self,
        source: &str,
        t: T,
    ) -> Result<(), SendError<String>> {
        self.sender.send(format!(":{} {}", source, t))
    }

    fn reply_sink<'a>(&'a self, source: &'a str) -> ConnReplySink<'a> {
        ConnReplySink {
            source,
            client: &self.client,
            sender: &self.sender,
        }
    }

    // write all queued replies to client in order they were sent.
    async fn feed_queued(&mut self) -> Result<(), LinesCodecError> {
        while let Ok(msg) = self.receiver.try_recv() {
            self.stream.feed(msg).await?;
        }
        SinkExt::<String>::flush(&mut self.stream).await
    }
}

impl Drop for ConnState {
    fn drop(&mut self) {
        self.conns_count.fetch_sub(1, Ordering::SeqCst);
    }
}

// puts help replies to connection queue with server name and client name.
pub(crate) struct ConnReplySink<'a> {
    source: &'a str,
    client: &'a str,
    sender: &'a UnboundedSender<String>,
}

impl<'a> ReplySink for ConnReplySink<'a> {
    type Error = SendError<String>;

    fn send_reply(&mut self, reply: HelpReply<'_>) -> Result<(), Self::Error> {
        self.sender.send(format!(
            ":{} {}",
            self.source,
            Reply::from_help(self.client, reply)
        ))
    }
}

pub(crate) struct MainState {
    config: MainConfig,
    help: HelpRegistry,
    local_addr: SocketAddr,
    conns_count: Arc<AtomicUsize>,
    quit_sender: Mutex<Option<oneshot::Sender<String>>>,
}

impl MainState {
    fn new(
        config: MainConfig,
        help: HelpRegistry,
        local_addr: SocketAddr,
        quit_sender: oneshot::Sender<String>,
    ) -> MainState {
        MainState {
            config,
            help,
            local_addr,
            conns_count: Arc::new(AtomicUsize::new(0)),
            quit_sender: Mutex::new(Some(quit_sender)),
        }
    }

    pub(crate) fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub(crate) fn register_conn_state(
        &self,
        ip_addr: IpAddr,
        stream: Framed<TcpStream, IRCLinesCodec>,
    ) -> Result<ConnState, Framed<TcpStream, IRCLinesCodec>> {
        if let Some(max_conns) = self.config.max_connections {
            if self.conns_count.fetch_add(1, Ordering::SeqCst) < max_conns {
                Ok(ConnState::new(ip_addr, stream, self.conns_count.clone()))
            } else {
                self.conns_count.fetch_sub(1, Ordering::SeqCst);
                Err(stream)
            }
        } else {
            self.conns_count.fetch_add(1, Ordering::SeqCst);
            Ok(ConnState::new(ip_addr, stream, self.conns_count.clone()))
        }
    }

    pub(crate) async fn quit(&self, msg: &str) {
        if let Some(sender) = self.quit_sender.lock().await.take() {
            // receiver is gone only if server loop already finished.
            let _ = sender.send(msg.to_string());
        }
    }

    pub(crate) async fn process(&self, conn_state: &mut ConnState) -> Result<(), String> {
        // use conversion error to string to avoid problems with thread safety
        let res = self
            .process_internal(conn_state)
            .await
            .map_err(|e| e.to_string());
        conn_state.feed_queued().await.map_err(|e| e.to_string())?;
        res
    }

    async fn process_internal(&self, conn_state: &mut ConnState) -> Result<(), Box<dyn Error>> {
        let msg_str = match conn_state.stream.next().await {
            Some(Ok(msg_str)) => msg_str,
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                conn_state.send_msg_display(
                    &self.config.name,
                    ErrInputTooLong417 {
                        client: &conn_state.client,
                    },
                )?;
                return Ok(());
            }
            Some(Err(e)) => {
                conn_state.quit = true;
                return Err(Box::new(e));
            }
            None => {
                // connection closed by client
                conn_state.quit = true;
                return Ok(());
            }
        };

        let msg = match Message::from_shared_str(&msg_str) {
            Ok(msg) => msg,
            // ignore empty lines
            Err(MessageError::Empty) => return Ok(()),
            Err(e) => {
                conn_state.sender.send(format!("ERROR :{}", e))?;
                return Err(Box::new(e));
            }
        };

        let cmd = match Command::from_message(&msg) {
            Ok(cmd) => cmd,
            Err(e) => {
                match e {
                    CommandError::UnknownCommand(ref command) => {
                        conn_state.send_msg_display(
                            &self.config.name,
                            ErrUnknownCommand421 {
                                client: &conn_state.client,
                                command: command.as_str(),
                            },
                        )?;
                    }
                    CommandError::NeedMoreParams(ref command) => {
                        conn_state.send_msg_display(
                            &self.config.name,
                            ErrNeedMoreParams461 {
                                client: &conn_state.client,
                                command: command.name,
                            },
                        )?;
                    }
                }
                return Err(Box::new(e));
            }
        };

        use Command::*;
        match cmd {
            HELP { params } => self.process_help(conn_state, &params),
            OPER { name, password } => self.process_oper(conn_state, name, password).await,
            QUIT {} => self.process_quit(conn_state),
        }
    }
}

pub(crate) async fn user_state_process(
    main_state: Arc<MainState>,
    stream: TcpStream,
    addr: SocketAddr,
) {
    let line_stream = Framed::new(stream, IRCLinesCodec::new_with_max_length(2000));
    match main_state.register_conn_state(addr.ip(), line_stream) {
        Ok(mut conn_state) => {
            info!("New connection from {}", addr);
            while !conn_state.is_quit() {
                if let Err(e) = main_state.process(&mut conn_state).await {
                    warn!("Error for {}: {}", conn_state.client, e);
                }
            }
            info!("Connection from {} closed", addr);
        }
        Err(mut line_stream) => {
            warn!("Too many connections, rejected {}", addr);
            if let Err(e) = line_stream
                .send("ERROR :Too many connections".to_string())
                .await
            {
                error!("Error for {}: {}", addr, e);
            }
        }
    }
}

pub(crate) async fn run_server(
    config: MainConfig,
    help: HelpRegistry,
) -> Result<(Arc<MainState>, JoinHandle<()>), Box<dyn Error>> {
    let listener = TcpListener::bind((config.listen, config.port)).await?;
    let local_addr = listener.local_addr()?;
    let (quit_sender, mut quit_receiver) = oneshot::channel();
    let main_state = Arc::new(MainState::new(config, help, local_addr, quit_sender));
    let main_state_to_return = main_state.clone();
    let handle = tokio::spawn(async move {
        let mut do_quit = false;
        while !do_quit {
            tokio::select! {
                res = listener.accept() => {
                    match res {
                        Ok((stream, addr)) => {
                            tokio::spawn(user_state_process(
                                        main_state.clone(), stream, addr)); }
                        Err(e) => { error!("Accept connection error: {}", e); }
                    };
                }
                Ok(msg) = &mut quit_receiver => {
                    info!("Server quit: {}", msg);
                    do_quit = true;
                }
            };
        }
    });
    Ok((main_state_to_return, handle))
}


mod conn_cmds;
mod srv_query_cmds;
