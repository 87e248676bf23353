//! Per-device session.
//!
//! Each discovered device gets two tasks:
//!
//! - the send task owns the sequence counter. It sends the startup bundle,
//!   re-sends the refresh bundle every period and serves [`DeviceSession::send`]
//!   requests from any caller;
//! - the apply task owns writes to the [`Device`] record and applies inbound
//!   state messages in arrival order.
//!
//! The manager hands inbound messages over through a bounded queue that never
//! blocks it: when the queue is full the new message is dropped.

use crate::client::Transport;
use crate::commands;
use crate::config::LanConfig;
use crate::error::client::ClientError;
use crate::error::session::SessionError;
use crate::protocol::wire::label_from_bytes;
use crate::protocol::{Message, Payload};

use models::{Color, Device, DeviceType, Serial};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, RwLock, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Per-session message sequence numbers, 0 first, wrapping after 255.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceCounter {
    next: u8,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number and moves past it.
    pub fn advance(&mut self) -> u8 {
        let current = self.next;
        self.next = self.next.wrapping_add(1);
        current
    }

    /// The number the next message will carry.
    pub fn peek(&self) -> u8 {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub refresh_period: Duration,
    pub inbound_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions::from(&LanConfig::default())
    }
}

impl From<&LanConfig> for SessionOptions {
    fn from(config: &LanConfig) -> Self {
        SessionOptions {
            refresh_period: config.refresh_period(),
            inbound_capacity: config.session.inbound_capacity.max(1),
        }
    }
}

/// What the apply task did with one inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// Known chatter that carries no device state.
    Ignored,
    Unhandled,
}

/// Applies one state payload to the device record.
pub fn apply_payload(device: &mut Device, payload: &Payload) -> Applied {
    match payload {
        Payload::DeviceStateLabel(state) => device.label = label_from_bytes(&state.label),
        Payload::LightState(state) => {
            device.color = Color::from_raw(
                state.color.hue,
                state.color.saturation,
                state.color.brightness,
                state.color.kelvin,
            );
            device.powered_on = state.power > 0;
        }
        Payload::DeviceStateVersion(state) => device.product_id = state.product,
        Payload::DeviceStateHostFirmware(state) => {
            device.firmware_version = format!("{}.{}", state.version_major, state.version_minor);
        }
        Payload::DeviceStateLocation(state) => device.location = label_from_bytes(&state.label),
        Payload::DeviceStateGroup(state) => device.group = label_from_bytes(&state.label),
        Payload::ButtonState(state) => {
            if state.buttons_count == 0 {
                return Applied::Ignored;
            }
            device.device_type = DeviceType::Switch;
        }
        Payload::DeviceStateService(_) | Payload::DeviceStateUnhandled(_) => {
            return Applied::Ignored;
        }
        _ => return Applied::Unhandled,
    }
    Applied::Updated
}

enum SessionCommand {
    Send {
        messages: Vec<Message>,
        reply: oneshot::Sender<Result<(), ClientError>>,
    },
}

/// Handle to one device session. Clones share the same session.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    serial: Serial,
    address: SocketAddr,
    device: Arc<RwLock<Device>>,
    inbound: mpsc::Sender<Message>,
    commands: mpsc::Sender<SessionCommand>,
    shutdown: Arc<watch::Sender<bool>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl std::fmt::Debug for SessionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionCommand::Send { messages, .. } => {
                write!(f, "Send({} messages)", messages.len())
            }
        }
    }
}

/// The not-yet-running half of a session; see [`DeviceSession::prepare`].
pub struct SessionTasks<T: Transport> {
    sender: OutboundSender<T>,
    device: Arc<RwLock<Device>>,
    inbound: mpsc::Receiver<Message>,
    commands: mpsc::Receiver<SessionCommand>,
    shutdown: watch::Receiver<bool>,
    refresh_period: Duration,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl DeviceSession {
    /// Creates the session and starts its tasks.
    pub fn start<T: Transport>(
        transport: T,
        address: SocketAddr,
        serial: Serial,
        options: &SessionOptions,
    ) -> DeviceSession {
        let (session, tasks) = Self::prepare(transport, address, serial, options);
        tasks.spawn();
        session
    }

    /// Creates the session without starting it. Inbound messages queue up
    /// (and overflow) until [`SessionTasks::spawn`] runs.
    pub fn prepare<T: Transport>(
        transport: T,
        address: SocketAddr,
        serial: Serial,
        options: &SessionOptions,
    ) -> (DeviceSession, SessionTasks<T>) {
        let device = Arc::new(RwLock::new(Device::new(address, serial)));
        let (inbound_tx, inbound_rx) = mpsc::channel(options.inbound_capacity.max(1));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let tasks = Arc::new(Mutex::new(Vec::new()));

        let session = DeviceSession {
            serial,
            address,
            device: Arc::clone(&device),
            inbound: inbound_tx,
            commands: command_tx,
            shutdown: Arc::new(shutdown_tx),
            tasks: Arc::clone(&tasks),
        };

        let pending = SessionTasks {
            sender: OutboundSender {
                transport,
                address,
                serial,
                sequence: SequenceCounter::new(),
            },
            device,
            inbound: inbound_rx,
            commands: command_rx,
            shutdown: shutdown_rx,
            refresh_period: options.refresh_period,
            tasks,
        };

        (session, pending)
    }

    pub fn serial(&self) -> Serial {
        self.serial
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Snapshot of the device record.
    pub async fn device(&self) -> Device {
        self.device.read().await.clone()
    }

    /// Stamps target and sequence on each message and sends them in order,
    /// stopping at the first failure.
    pub async fn send(&self, messages: Vec<Message>) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(SessionCommand::Send { messages, reply })
            .await
            .map_err(|_| SessionError::closed(self.serial))?;

        response
            .await
            .map_err(|_| SessionError::closed(self.serial))?
            .map_err(|e| SessionError::send(self.serial, e))
    }

    pub async fn send_one(&self, message: Message) -> Result<(), SessionError> {
        self.send(vec![message]).await
    }

    /// Non-blocking handoff of an inbound message. Returns `false` when the
    /// message was dropped because the queue is full or the session closed.
    pub fn enqueue(&self, message: Message) -> bool {
        match self.inbound.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                debug!(
                    "Inbound queue full for {}, dropping {}",
                    self.serial,
                    message.payload.name()
                );
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Signals both tasks to stop. Safe to call more than once.
    pub fn close(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Waits for the session's tasks to exit. Call after [`close`](Self::close).
    pub async fn wait(&self) {
        let handles: Vec<JoinHandle<()>> = self.tasks.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Session task for {} ended abnormally: {e}", self.serial);
            }
        }
    }
}

impl<T: Transport> SessionTasks<T> {
    /// Starts the send and apply tasks.
    pub fn spawn(self) {
        let serial = self.sender.serial;
        let send_task = tokio::spawn(run_sender(
            self.sender,
            self.commands,
            self.shutdown.clone(),
            self.refresh_period,
        ));
        let apply_task = tokio::spawn(run_applier(
            serial,
            self.device,
            self.inbound,
            self.shutdown,
        ));

        match self.tasks.try_lock() {
            Ok(mut tasks) => tasks.extend([send_task, apply_task]),
            Err(_) => warn!("Could not record session tasks for {serial}"),
        }
        debug!("Session for {serial} started");
    }
}

struct OutboundSender<T: Transport> {
    transport: T,
    address: SocketAddr,
    serial: Serial,
    sequence: SequenceCounter,
}

impl<T: Transport> OutboundSender<T> {
    async fn send_all(&mut self, messages: Vec<Message>) -> Result<(), ClientError> {
        for mut message in messages {
            message.set_target(self.serial);
            message.set_sequence(self.sequence.advance());
            self.transport.send(self.address, message).await?;
        }
        Ok(())
    }
}

async fn run_sender<T: Transport>(
    mut sender: OutboundSender<T>,
    mut commands: mpsc::Receiver<SessionCommand>,
    mut shutdown: watch::Receiver<bool>,
    refresh_period: Duration,
) {
    let serial = sender.serial;

    if !*shutdown.borrow_and_update() {
        if let Err(e) = sender.send_all(commands::device_state_messages()).await {
            warn!("Failed to request initial state from {serial}: {e}");
        }
    }

    let refresh = sleep(refresh_period);
    tokio::pin!(refresh);

    loop {
        if *shutdown.borrow_and_update() {
            break;
        }

        tokio::select! {
            _ = shutdown.changed() => break,
            _ = &mut refresh => {
                if let Err(e) = sender.send_all(commands::refresh_messages()).await {
                    warn!("Failed to refresh {serial}: {e}");
                }
                refresh.as_mut().reset(Instant::now() + refresh_period);
            }
            command = commands.recv() => match command {
                Some(SessionCommand::Send { messages, reply }) => {
                    let result = sender.send_all(messages).await;
                    let _ = reply.send(result);
                }
                None => break,
            },
        }
    }

    debug!("Exiting send task for device {serial}");
}

async fn run_applier(
    serial: Serial,
    device: Arc<RwLock<Device>>,
    mut inbound: mpsc::Receiver<Message>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow_and_update() {
            break;
        }

        tokio::select! {
            _ = shutdown.changed() => break,
            message = inbound.recv() => {
                let Some(message) = message else { break };
                let applied = apply_payload(&mut *device.write().await, &message.payload);
                if applied == Applied::Unhandled {
                    debug!(
                        "Unhandled message type {} ({}) from {serial}",
                        message.payload.pkt_type(),
                        message.payload.name()
                    );
                }
            }
        }
    }

    info!("Exiting apply task for device {serial}");
}
