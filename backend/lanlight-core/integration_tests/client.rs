use lanlight_core::Client;
use lanlight_core::Message;
use lanlight_core::commands::get_service;
use lanlight_core::protocol::packets::LightGet;

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;

use crate::fake_device::{FAKE_SERIAL, FakeDevice};

async fn loopback_client(broadcast: SocketAddr) -> Client {
    Client::bind_to("127.0.0.1:0".parse().unwrap(), 0x1234, broadcast)
        .await
        .expect("Failed to bind client")
}

/// **VALUE**: A receive with a deadline and no traffic ends cleanly.
///
/// **BUG THIS CATCHES**: Would catch deadline expiry surfacing as an error,
/// or the loop ignoring the deadline and hanging.
#[tokio::test]
async fn given_no_traffic_when_receive_with_timeout_then_returns_ok_after_deadline() {
    // GIVEN
    let client = loopback_client("127.0.0.1:9".parse().unwrap()).await;
    let started = Instant::now();
    let mut seen = 0;

    // WHEN
    let result = client
        .receive(Duration::from_millis(100), false, |_, _| seen += 1)
        .await;

    // THEN
    assert!(result.is_ok());
    assert_eq!(seen, 0);
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn given_broadcast_when_device_answers_then_receive_once_hands_over_the_reply() {
    // GIVEN
    let device = FakeDevice::start().await;
    let client = loopback_client(device.addr).await;

    // WHEN
    client.send_broadcast(get_service()).await.unwrap();
    let mut replies = Vec::new();
    client
        .receive(Duration::from_secs(2), true, |message, addr| {
            replies.push((message, addr))
        })
        .await
        .unwrap();

    // THEN
    assert_eq!(replies.len(), 1);
    let (reply, addr) = &replies[0];
    assert_eq!(*addr, device.addr);
    assert_eq!(reply.payload.name(), "DeviceStateService");
    assert_eq!(reply.target(), FAKE_SERIAL);

    let request = &device.received()[0];
    assert!(request.header.tagged);
    assert_eq!(request.header.source, 0x1234);
}

/// **VALUE**: Garbage on the socket is skipped, not fatal.
///
/// **BUG THIS CATCHES**: Would catch a receive loop that stops (or hands the
/// handler a half-decoded message) when anything on the LAN sends junk.
#[tokio::test]
async fn given_malformed_datagram_when_receive_then_it_is_skipped() {
    // GIVEN
    let client = loopback_client("127.0.0.1:9".parse().unwrap()).await;
    let client_addr = client.local_addr().unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.send_to(&[0xde, 0xad], client_addr).await.unwrap();
    let valid = Message::new(LightGet::default()).encode().unwrap();
    sender.send_to(&valid, client_addr).await.unwrap();

    // WHEN
    let mut names = Vec::new();
    client
        .receive(Duration::from_secs(2), true, |message, _| {
            names.push(message.payload.name())
        })
        .await
        .unwrap();

    // THEN
    assert_eq!(names, vec!["LightGet"]);
}
