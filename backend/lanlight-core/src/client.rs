//! The UDP endpoint every device conversation goes through.
//!
//! One socket, bound to an ephemeral port with broadcast enabled. Sending is
//! shared by cloning the [`Client`]; reading belongs to whoever drives
//! [`Client::recv_message`] (the device manager's receive task, or a one-shot
//! [`Client::receive`] call).

use crate::config::LanConfig;
use crate::error::client::ClientError;
use crate::protocol::Message;
use crate::RECV_BUFFER_SIZE;

use models::Serial;

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};

/// Outbound half of a client, as seen by device sessions.
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(
        &self,
        dst: SocketAddr,
        message: Message,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    socket: Arc<UdpSocket>,
    source: u32,
    broadcast: SocketAddr,
}

impl Client {
    /// Binds `0.0.0.0:0` using the source and broadcast target from `config`.
    pub async fn bind(config: &LanConfig) -> Result<Self, ClientError> {
        let local = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
        Self::bind_to(local, config.source(), config.broadcast_addr()).await
    }

    pub async fn bind_to(
        local: SocketAddr,
        source: u32,
        broadcast: SocketAddr,
    ) -> Result<Self, ClientError> {
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| ClientError::bind(format!("Failed to bind {local}"), e))?;
        socket
            .set_broadcast(true)
            .map_err(|e| ClientError::bind("Failed to enable broadcast", e))?;

        debug!(
            "UDP client bound to {} (source {source:#010x})",
            socket.local_addr().map_or_else(|_| local.to_string(), |a| a.to_string())
        );

        Ok(Client {
            socket: Arc::new(socket),
            source,
            broadcast,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ClientError> {
        self.socket.local_addr().map_err(ClientError::receive)
    }

    pub fn source(&self) -> u32 {
        self.source
    }

    pub fn broadcast_addr(&self) -> SocketAddr {
        self.broadcast
    }

    /// Stamps the source, encodes and writes one datagram. Not retried.
    pub async fn send(&self, dst: SocketAddr, mut message: Message) -> Result<(), ClientError> {
        message.set_source(self.source);
        let datagram = message.encode().map_err(ClientError::encode)?;

        self.socket
            .send_to(&datagram, dst)
            .await
            .map_err(|e| ClientError::send(dst, e))?;

        trace!(
            "-> {dst} {} seq={} target={}",
            message.payload.name(),
            message.header.sequence,
            message.header.target
        );
        Ok(())
    }

    /// Sends to every device on the broadcast address.
    pub async fn send_broadcast(&self, mut message: Message) -> Result<(), ClientError> {
        message.set_target(Serial::BROADCAST);
        self.send(self.broadcast, message).await
    }

    /// Reads one datagram.
    ///
    /// `Ok(None)` means a datagram arrived but was not a valid message.
    pub async fn recv_message(
        &self,
        buf: &mut [u8],
    ) -> Result<Option<(Message, SocketAddr)>, ClientError> {
        let (len, addr) = self
            .socket
            .recv_from(buf)
            .await
            .map_err(ClientError::receive)?;

        match Message::decode(&buf[..len]) {
            Ok(message) => {
                trace!(
                    "<- {addr} {} seq={} target={}",
                    message.payload.name(),
                    message.header.sequence,
                    message.header.target
                );
                Ok(Some((message, addr)))
            }
            Err(e) => {
                trace!("Dropping malformed datagram from {addr}: {e}");
                Ok(None)
            }
        }
    }

    /// Reads messages and hands each to `handler`.
    ///
    /// With a nonzero `timeout` the loop ends without error when the deadline
    /// passes; with zero it runs until `once` is satisfied or the socket
    /// fails. `once` returns after the first well-formed message.
    pub async fn receive<F>(
        &self,
        timeout: Duration,
        once: bool,
        mut handler: F,
    ) -> Result<(), ClientError>
    where
        F: FnMut(Message, SocketAddr),
    {
        let deadline = (!timeout.is_zero()).then(|| Instant::now() + timeout);
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];

        loop {
            let received = match deadline {
                Some(deadline) => match timeout_at(deadline, self.recv_message(&mut buf)).await {
                    Ok(received) => received?,
                    Err(_) => return Ok(()),
                },
                None => self.recv_message(&mut buf).await?,
            };

            if let Some((message, addr)) = received {
                handler(message, addr);
                if once {
                    return Ok(());
                }
            }
        }
    }
}

impl Transport for Client {
    fn send(
        &self,
        dst: SocketAddr,
        message: Message,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        Client::send(self, dst, message)
    }
}
