//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Client connection wrapper

use crate::{ClientConfig, ClientError, Result};
use bytes::Bytes;
use otelnet_telnetcodec::naws::WindowSize;
use otelnet_telnetcodec::{TelnetCodec, TelnetOption};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, trace};

/// Traffic counters for one connection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConnectionStats {
    /// Bytes written to the socket, negotiation included
    pub bytes_sent: u64,
    /// Raw bytes read from the socket
    pub bytes_received: u64,
    /// Time since the connection was established
    pub duration: Duration,
}

impl fmt::Display for ConnectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Connection Statistics ===")?;
        writeln!(f, "Bytes sent:     {}", self.bytes_sent)?;
        writeln!(f, "Bytes received: {}", self.bytes_received)?;
        writeln!(f, "Duration:       {} seconds", self.duration.as_secs())?;
        write!(f, "============================")
    }
}

///
/// A connected Telnet session: the socket, the protocol engine driving it, and the
/// traffic counters.
///
/// All methods are non-blocking on the read side. [`Connection::try_read`] returns
/// `Ok(None)` when nothing is pending so the caller can keep polling other inputs.
/// Every reply the codec queues is written by [`Connection::flush`], which the sending
/// and processing methods call themselves.
///
pub struct Connection {
    stream: TcpStream,
    codec: TelnetCodec,
    peer: SocketAddr,
    bytes_sent: u64,
    bytes_received: u64,
    connected_at: Instant,
    receive_buffer: Vec<u8>,
}

impl Connection {
    /// Dials `config.address()`, bounded by the configured connect timeout.
    pub async fn connect(config: &ClientConfig) -> Result<Connection> {
        let address = config.address();
        info!("Connecting to {}...", address);

        let stream = match config.connect_timeout {
            Some(limit) => match timeout(limit, TcpStream::connect(&address)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(ClientError::ConnectionTimeout {
                        address: address.clone(),
                    });
                }
            },
            None => TcpStream::connect(&address).await?,
        };
        Self::from_stream(stream, config)
    }

    /// Wraps an already connected stream.
    pub fn from_stream(stream: TcpStream, config: &ClientConfig) -> Result<Connection> {
        stream.set_nodelay(true)?;
        let peer = stream.peer_addr()?;
        info!("Connected to {}", peer);
        Ok(Connection {
            stream,
            codec: TelnetCodec::with_config(config.telnet_config()),
            peer,
            bytes_sent: 0,
            bytes_received: 0,
            connected_at: Instant::now(),
            receive_buffer: vec![0; config.buffer_size.max(1)],
        })
    }

    pub fn codec(&self) -> &TelnetCodec {
        &self.codec
    }

    pub fn codec_mut(&mut self) -> &mut TelnetCodec {
        &mut self.codec
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn stats(&self) -> ConnectionStats {
        ConnectionStats {
            bytes_sent: self.bytes_sent,
            bytes_received: self.bytes_received,
            duration: self.connected_at.elapsed(),
        }
    }

    /// Sends the opening capability offers.
    pub async fn send_initial_negotiation(&mut self) -> Result<()> {
        debug!("Sending initial negotiation");
        self.codec.initial_negotiation();
        self.flush().await
    }

    /// Writes everything the codec has queued.
    pub async fn flush(&mut self) -> Result<()> {
        if let Some(output) = self.codec.take_output() {
            self.write_raw(&output).await?;
        }
        Ok(())
    }

    /// Escapes and sends application data, returning the bytes that went on the wire.
    pub async fn send_data(&mut self, data: &[u8]) -> Result<Bytes> {
        let escaped = TelnetCodec::prepare_output(data);
        self.write_raw(&escaped).await?;
        Ok(escaped)
    }

    /// Sends `IAC <command> <option>`.
    pub async fn send_negotiate(&mut self, command: u8, option: TelnetOption) -> Result<()> {
        self.codec.send_negotiate(command, option);
        self.flush().await
    }

    /// Sends `IAC SB <payload> IAC SE`.
    pub async fn send_subnegotiation(&mut self, payload: &[u8]) -> Result<()> {
        self.codec.send_subnegotiation(payload);
        self.flush().await
    }

    /// Reports a new window size if it changed and NAWS is enabled.
    pub async fn update_window_size(&mut self, size: WindowSize) -> Result<bool> {
        let sent = self.codec.update_window_size(size);
        self.flush().await?;
        Ok(sent)
    }

    ///
    /// Reads whatever the socket has pending without waiting.
    ///
    /// Returns the raw wire bytes, `Ok(None)` if nothing was available, and
    /// [`ClientError::ConnectionClosed`] once the peer has closed the stream.
    ///
    pub fn try_read(&mut self) -> Result<Option<Bytes>> {
        match self.stream.try_read(&mut self.receive_buffer) {
            Ok(0) => {
                info!("Connection closed by {}", self.peer);
                Err(ClientError::ConnectionClosed)
            }
            Ok(n) => {
                self.bytes_received += n as u64;
                trace!("Received {} bytes", n);
                Ok(Some(Bytes::copy_from_slice(&self.receive_buffer[..n])))
            }
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Runs raw bytes through the protocol engine, sends its replies and returns the payload.
    pub async fn process_input(&mut self, raw: &[u8]) -> Result<Bytes> {
        let payload = self.codec.process_input(raw);
        self.flush().await?;
        Ok(payload)
    }

    /// Shuts down the write half of the socket.
    pub async fn shutdown(&mut self) -> Result<()> {
        debug!("Shutting down connection to {}", self.peer);
        self.stream.shutdown().await?;
        Ok(())
    }

    async fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.stream.write_all(data).await?;
        self.bytes_sent += data.len() as u64;
        trace!("Sent {} bytes", data.len());
        Ok(())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("peer", &self.peer)
            .field("bytes_sent", &self.bytes_sent)
            .field("bytes_received", &self.bytes_received)
            .finish()
    }
}
