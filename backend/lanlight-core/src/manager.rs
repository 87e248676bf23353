//! Discovery and demultiplexing.
//!
//! The manager's receive task is the only reader of the socket and the only
//! owner of the session map. Callers reach the map through a command channel.

use crate::client::Client;
use crate::commands;
use crate::config::LanConfig;
use crate::error::CoreError;
use crate::error::client::ClientError;
use crate::error::session::SessionError;
use crate::protocol::enums::DeviceService;
use crate::protocol::{Message, Payload};
use crate::session::{DeviceSession, SessionOptions};
use crate::RECV_BUFFER_SIZE;

use models::{Device, Serial, sort_devices};

use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::SocketAddr;

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

const COMMAND_CHANNEL_CAPACITY: usize = 16;

type SessionMap = HashMap<SocketAddr, DeviceSession>;

#[derive(Debug)]
enum ManagerCommand {
    Sessions {
        reply: oneshot::Sender<Vec<DeviceSession>>,
    },
}

pub struct DeviceManager {
    client: Option<Client>,
    commands: mpsc::Sender<ManagerCommand>,
    shutdown: watch::Sender<bool>,
    receiver: Option<JoinHandle<SessionMap>>,
}

impl DeviceManager {
    /// Binds a client from `config`, starts the receive task and broadcasts
    /// one discovery request.
    pub async fn new(config: &LanConfig) -> Result<Self, CoreError> {
        let client = Client::bind(config).await?;
        let manager = Self::with_client(client, SessionOptions::from(config)).await?;
        Ok(manager)
    }

    pub async fn with_client(
        client: Client,
        options: SessionOptions,
    ) -> Result<Self, ClientError> {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let receiver = tokio::spawn(run_receiver(
            client.clone(),
            options,
            command_rx,
            shutdown_rx,
        ));

        let manager = DeviceManager {
            client: Some(client),
            commands: command_tx,
            shutdown: shutdown_tx,
            receiver: Some(receiver),
        };
        manager.discover().await?;
        Ok(manager)
    }

    /// Broadcasts `DeviceGetService`.
    pub async fn discover(&self) -> Result<(), ClientError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ClientError::closed("Device manager is closed"))?;
        client.send_broadcast(commands::get_service()).await
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub async fn sessions(&self) -> Result<Vec<DeviceSession>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(ManagerCommand::Sessions { reply })
            .await
            .map_err(|_| SessionError::manager_closed("Receive task has stopped"))?;
        response
            .await
            .map_err(|_| SessionError::manager_closed("Receive task dropped the request"))
    }

    /// Snapshots of every known device, ordered for display.
    pub async fn devices(&self) -> Result<Vec<Device>, SessionError> {
        let mut devices = Vec::new();
        for session in self.sessions().await? {
            devices.push(session.device().await);
        }
        sort_devices(&mut devices);
        Ok(devices)
    }

    pub async fn session_for(&self, serial: Serial) -> Result<Option<DeviceSession>, SessionError> {
        Ok(self
            .sessions()
            .await?
            .into_iter()
            .find(|session| session.serial() == serial))
    }

    /// Finds a session by serial, or by label (case-insensitive).
    pub async fn find(&self, target: &str) -> Result<DeviceSession, SessionError> {
        let wanted: Option<Serial> = target.parse().ok();

        for session in self.sessions().await? {
            if wanted == Some(session.serial()) {
                return Ok(session);
            }
            if session.device().await.label.eq_ignore_ascii_case(target) {
                return Ok(session);
            }
        }
        Err(SessionError::not_found(target))
    }

    /// Stops the receive task, releases the socket handle, then closes every
    /// session. Safe to call more than once.
    pub async fn close(&mut self) {
        self.shutdown.send_replace(true);

        let Some(receiver) = self.receiver.take() else {
            return;
        };

        let sessions = match receiver.await {
            Ok(sessions) => sessions,
            Err(e) => {
                error!("Receive task ended abnormally: {e}");
                SessionMap::new()
            }
        };

        self.client = None;

        for session in sessions.values() {
            session.close();
        }
        for session in sessions.values() {
            session.wait().await;
        }
        info!("Device manager closed ({} sessions)", sessions.len());
    }
}

impl Drop for DeviceManager {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

async fn run_receiver(
    client: Client,
    options: SessionOptions,
    mut commands: mpsc::Receiver<ManagerCommand>,
    mut shutdown: watch::Receiver<bool>,
) -> SessionMap {
    let mut sessions = SessionMap::new();
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        if *shutdown.borrow_and_update() {
            break;
        }

        tokio::select! {
            _ = shutdown.changed() => break,
            Some(command) = commands.recv() => match command {
                ManagerCommand::Sessions { reply } => {
                    let _ = reply.send(sessions.values().cloned().collect());
                }
            },
            received = client.recv_message(&mut buf) => match received {
                Ok(Some((message, addr))) => dispatch(&client, &options, &mut sessions, message, addr),
                Ok(None) => {}
                Err(ClientError::Receive { source, .. })
                    if source.kind() == ErrorKind::ConnectionReset =>
                {
                    debug!("Ignoring connection reset on receive");
                }
                Err(e) => {
                    error!("Receive failed, stopping device manager: {e}");
                    break;
                }
            },
        }
    }

    debug!("Receive task exiting with {} sessions", sessions.len());
    sessions
}

fn dispatch(
    client: &Client,
    options: &SessionOptions,
    sessions: &mut SessionMap,
    message: Message,
    addr: SocketAddr,
) {
    if let Some(session) = sessions.get(&addr) {
        session.enqueue(message);
        return;
    }

    let Payload::DeviceStateService(state) = &message.payload else {
        debug!(
            "Ignoring {} from unknown address {addr}",
            message.payload.name()
        );
        return;
    };

    if state.service != DeviceService::UDP {
        return;
    }

    let serial = message.target();
    if serial.is_nil() {
        warn!("Service announcement from {addr} carries no serial");
        return;
    }

    info!("Discovered device {serial} at {addr}");
    let session = DeviceSession::start(client.clone(), addr, serial, options);
    sessions.insert(addr, session);
}
