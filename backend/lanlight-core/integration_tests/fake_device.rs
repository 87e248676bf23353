// A LIFX bulb on the loopback interface, answering enough of the protocol to
// drive discovery and session refreshes. It can also push unsolicited reports
// the way a bulb does after a change made from another controller.

use lanlight_core::RECV_BUFFER_SIZE;
use lanlight_core::protocol::enums::DeviceService;
use lanlight_core::protocol::fields::LightHsbk;
use lanlight_core::protocol::packets::{
    DeviceStateHostFirmware, DeviceStateLabel, DeviceStateService, DeviceStateVersion, LightState,
};
use lanlight_core::protocol::wire::label_to_bytes;
use lanlight_core::{Message, Payload};

use models::Serial;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

pub const FAKE_SERIAL: Serial = Serial([0xd0, 0x73, 0xd5, 0x11, 0x22, 0x33, 0, 0]);
pub const FAKE_LABEL: &str = "Fake Bulb";
pub const FAKE_PRODUCT: u32 = 27;

/// What the bulb answers with. Replies are built from the current state.
#[derive(Debug, Clone)]
pub struct FakeState {
    pub label: String,
    pub product: u32,
    pub power: u16,
    pub kelvin: u16,
}

pub struct FakeDevice {
    pub addr: SocketAddr,
    pub serial: Serial,
    socket: Arc<UdpSocket>,
    state: Arc<Mutex<FakeState>>,
    received: Arc<Mutex<Vec<Message>>>,
    handle: JoinHandle<()>,
}

impl FakeDevice {
    pub async fn start() -> Self {
        Self::with_identity(FAKE_SERIAL, FAKE_LABEL, FAKE_PRODUCT).await
    }

    pub async fn with_identity(serial: Serial, label: &str, product: u32) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake device");
        let addr = socket.local_addr().unwrap();
        let socket = Arc::new(socket);
        let state = Arc::new(Mutex::new(FakeState {
            label: label.to_string(),
            product,
            power: 65535,
            kelvin: 2700,
        }));
        let received = Arc::new(Mutex::new(Vec::new()));

        let handle = tokio::spawn({
            let socket = Arc::clone(&socket);
            let state = Arc::clone(&state);
            let log = Arc::clone(&received);
            async move {
                let mut buf = vec![0u8; RECV_BUFFER_SIZE];
                loop {
                    let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                        return;
                    };
                    let Ok(request) = Message::decode(&buf[..len]) else {
                        continue;
                    };
                    log.lock().unwrap().push(request.clone());

                    let current = state.lock().unwrap().clone();
                    if let Some(reply) = reply_to(&request, addr, serial, &current) {
                        let _ = socket.send_to(&reply, peer).await;
                    }
                }
            }
        });

        FakeDevice {
            addr,
            serial,
            socket,
            state,
            received,
            handle,
        }
    }

    pub fn received(&self) -> Vec<Message> {
        self.received.lock().unwrap().clone()
    }

    /// Changes what later replies report.
    pub fn update(&self, change: impl FnOnce(&mut FakeState)) {
        change(&mut *self.state.lock().unwrap());
    }

    /// Sends `payload` to `to` from the bulb's own address, unprompted.
    pub async fn report(&self, to: SocketAddr, payload: impl Into<Payload>) {
        let mut message = Message::new(payload.into());
        message.set_target(self.serial);
        let bytes = message.encode().expect("Failed to encode report");
        self.socket
            .send_to(&bytes, to)
            .await
            .expect("Failed to send report");
    }

    /// Announces the UDP service to `to`, as a reply to a broadcast would.
    pub async fn announce(&self, to: SocketAddr) {
        self.report(to, service_state(self.addr)).await;
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn label_state(label: &str) -> DeviceStateLabel {
    DeviceStateLabel {
        label: label_to_bytes(label),
    }
}

pub fn version_state(product: u32) -> DeviceStateVersion {
    DeviceStateVersion {
        vendor: 1,
        product,
        ..Default::default()
    }
}

pub fn light_state(label: &str, power: u16, kelvin: u16) -> LightState {
    LightState {
        color: LightHsbk {
            hue: 0,
            saturation: 0,
            brightness: 65535,
            kelvin,
        },
        power,
        label: label_to_bytes(label),
        ..Default::default()
    }
}

fn service_state(addr: SocketAddr) -> DeviceStateService {
    DeviceStateService {
        service: DeviceService::UDP,
        port: u32::from(addr.port()),
    }
}

fn reply_to(
    request: &Message,
    addr: SocketAddr,
    serial: Serial,
    state: &FakeState,
) -> Option<Vec<u8>> {
    let payload: Payload = match &request.payload {
        Payload::DeviceGetService(_) => service_state(addr).into(),
        Payload::DeviceGetLabel(_) => label_state(&state.label).into(),
        Payload::DeviceGetVersion(_) => version_state(state.product).into(),
        Payload::DeviceGetHostFirmware(_) => DeviceStateHostFirmware {
            version_major: 3,
            version_minor: 90,
            ..Default::default()
        }
        .into(),
        Payload::LightGet(_) => light_state(&state.label, state.power, state.kelvin).into(),
        _ => return None,
    };

    let mut reply = Message::new(payload);
    reply.set_target(serial);
    reply.set_source(request.header.source);
    reply.set_sequence(request.header.sequence);
    reply.encode().ok()
}
