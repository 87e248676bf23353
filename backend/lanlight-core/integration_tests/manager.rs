use lanlight_core::commands::set_power_off;
use lanlight_core::session::SessionOptions;
use lanlight_core::{Client, DeviceManager, Payload};

use models::{Device, Serial};

use std::time::Duration;

use crate::fake_device::{
    FAKE_LABEL, FAKE_PRODUCT, FAKE_SERIAL, FakeDevice, label_state, light_state, version_state,
};

const WAIT: Duration = Duration::from_secs(3);

async fn manager_for(device: &FakeDevice) -> DeviceManager {
    let client = Client::bind_to("127.0.0.1:0".parse().unwrap(), 0xfeed, device.addr)
        .await
        .expect("Failed to bind client");
    DeviceManager::with_client(client, SessionOptions::default())
        .await
        .expect("Failed to start device manager")
}

async fn wait_for_labelled_device(manager: &DeviceManager) -> Device {
    tokio::time::timeout(WAIT, async {
        loop {
            let devices = manager.devices().await.unwrap();
            if let Some(device) = devices.into_iter().find(|d| d.label == FAKE_LABEL) {
                return device;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("Device never reported its label")
}

async fn wait_until<F>(manager: &DeviceManager, done: F) -> Vec<Device>
where
    F: Fn(&[Device]) -> bool,
{
    tokio::time::timeout(WAIT, async {
        loop {
            let devices = manager.devices().await.unwrap();
            if done(&devices) {
                return devices;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("Devices never reached the expected state")
}

fn has_label(devices: &[Device], label: &str) -> bool {
    devices.iter().any(|d| d.label == label)
}

/// **VALUE**: Discovery creates a session and the session fills in the
/// device record from the device's own replies.
///
/// **WHY THIS MATTERS**: This is the whole runtime path: broadcast, service
/// announcement, session start, startup requests, demultiplexed replies.
///
/// **BUG THIS CATCHES**: Would catch replies not reaching the session that
/// owns their address, or a session created under the wrong serial.
#[tokio::test]
async fn given_device_on_lan_when_manager_starts_then_device_record_is_populated() {
    // GIVEN
    let device = FakeDevice::start().await;

    // WHEN
    let mut manager = manager_for(&device).await;
    let record = wait_for_labelled_device(&manager).await;

    // THEN
    assert_eq!(record.serial, FAKE_SERIAL);
    assert_eq!(record.address, device.addr);
    assert_eq!(record.product_id, FAKE_PRODUCT);
    assert!(record.powered_on);
    assert_eq!(record.color.brightness, 100.0);
    assert_eq!(record.color.kelvin, 2700);

    manager.close().await;
}

#[tokio::test]
async fn given_known_device_when_rediscovered_then_no_second_session_is_created() {
    // GIVEN
    let device = FakeDevice::start().await;
    let mut manager = manager_for(&device).await;
    wait_for_labelled_device(&manager).await;

    // WHEN
    manager.discover().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // THEN
    assert_eq!(manager.sessions().await.unwrap().len(), 1);

    manager.close().await;
}

#[tokio::test]
async fn given_discovered_device_when_found_by_label_then_commands_reach_it() {
    // GIVEN
    let device = FakeDevice::start().await;
    let mut manager = manager_for(&device).await;
    wait_for_labelled_device(&manager).await;

    // WHEN
    let session = manager.find("fake bulb").await.unwrap();
    session.send_one(set_power_off()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // THEN
    let power = device
        .received()
        .into_iter()
        .find(|m| matches!(m.payload, Payload::DeviceSetPower(_)))
        .expect("Device never saw the power command");
    assert_eq!(power.target(), FAKE_SERIAL);
    assert!(!power.header.tagged);
    assert!(matches!(power.payload, Payload::DeviceSetPower(p) if p.level == 0));

    let by_serial = manager.session_for(FAKE_SERIAL).await.unwrap();
    assert!(by_serial.is_some());

    manager.close().await;
}

/// **VALUE**: Closing the manager stops the receive task and every session.
///
/// **BUG THIS CATCHES**: Would catch sessions outliving the manager and
/// continuing to poll devices after shutdown.
#[tokio::test]
async fn given_running_manager_when_closed_then_sessions_are_closed_and_queries_fail() {
    // GIVEN
    let device = FakeDevice::start().await;
    let mut manager = manager_for(&device).await;
    wait_for_labelled_device(&manager).await;
    let session = manager.session_for(FAKE_SERIAL).await.unwrap().unwrap();

    // WHEN
    manager.close().await;
    manager.close().await;

    // THEN
    assert!(session.is_closed());
    assert!(manager.sessions().await.is_err());
    assert!(manager.discover().await.is_err());
}

#[tokio::test]
async fn given_unknown_target_when_find_then_not_found() {
    let device = FakeDevice::start().await;
    let mut manager = manager_for(&device).await;

    let result = manager.find("no such lamp").await;

    assert!(result.is_err());
    manager.close().await;
}

/// **VALUE**: Two bulbs sending interleaved label, light and version reports
/// each end up with their own last values in their own record.
///
/// **WHY THIS MATTERS**: Every bulb on the LAN answers through the same
/// socket; the manager must route by sender and each session must apply its
/// reports in arrival order.
///
/// **BUG THIS CATCHES**: Would catch replies routed to the wrong session, a
/// report applied to every record, or reports applied out of order so an
/// earlier value wins.
#[tokio::test]
async fn given_two_devices_interleaving_reports_when_applied_then_each_keeps_its_last_values() {
    // GIVEN
    let kitchen = FakeDevice::start().await;
    let porch = FakeDevice::with_identity(
        Serial([0xd0, 0x73, 0xd5, 0x44, 0x55, 0x66, 0, 0]),
        "Porch Bulb",
        31,
    )
    .await;
    let mut manager = manager_for(&kitchen).await;
    let client = manager.client().unwrap().local_addr().unwrap();
    porch.announce(client).await;
    wait_until(&manager, |devices| {
        has_label(devices, FAKE_LABEL) && has_label(devices, "Porch Bulb")
    })
    .await;

    kitchen.update(|state| {
        state.label = "Kitchen".to_string();
        state.product = 22;
        state.power = 0;
        state.kelvin = 3500;
    });
    porch.update(|state| {
        state.label = "Porch".to_string();
        state.product = 31;
        state.power = 65535;
        state.kelvin = 6500;
    });

    // WHEN
    kitchen.report(client, label_state("Kitchen draft")).await;
    porch.report(client, label_state("Porch draft")).await;
    porch.report(client, version_state(99)).await;
    kitchen.report(client, light_state("Kitchen draft", 65535, 9000)).await;
    kitchen.report(client, version_state(77)).await;
    porch.report(client, light_state("Porch draft", 0, 2500)).await;
    porch.report(client, version_state(31)).await;
    kitchen.report(client, version_state(22)).await;
    porch.report(client, light_state("Porch draft", 65535, 6500)).await;
    kitchen.report(client, light_state("Kitchen draft", 0, 3500)).await;
    kitchen.report(client, label_state("Kitchen")).await;
    porch.report(client, label_state("Porch")).await;

    // THEN
    let devices = wait_until(&manager, |devices| {
        devices.iter().any(|d| d.label == "Kitchen" && d.product_id == 22 && !d.powered_on)
            && devices.iter().any(|d| d.label == "Porch" && d.color.kelvin == 6500)
    })
    .await;
    assert_eq!(devices.len(), 2);

    let kitchen_record = devices.iter().find(|d| d.serial == FAKE_SERIAL).unwrap();
    assert_eq!(kitchen_record.label, "Kitchen");
    assert_eq!(kitchen_record.address, kitchen.addr);
    assert_eq!(kitchen_record.product_id, 22);
    assert!(!kitchen_record.powered_on);
    assert_eq!(kitchen_record.color.kelvin, 3500);

    let porch_record = devices.iter().find(|d| d.serial == porch.serial).unwrap();
    assert_eq!(porch_record.label, "Porch");
    assert_eq!(porch_record.address, porch.addr);
    assert_eq!(porch_record.product_id, 31);
    assert!(porch_record.powered_on);
    assert_eq!(porch_record.color.kelvin, 6500);

    manager.close().await;
}
