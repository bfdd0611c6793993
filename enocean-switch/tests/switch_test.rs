use std::sync::Arc;

use enocean_api::{Channel, DeviceAddress, Rorg};
use enocean_switch::device::{EnOceanDevice, EnOceanSwitch, SwitchEntity};
use enocean_switch::services::{GatewayService, PlatformService};

use crate::common::mock_app::{MockApp, power_telegram, status_telegram};

mod common;

const DEVICE: [u8; 4] = [0x01, 0x94, 0xE3, 0xB9];

async fn setup(app: &MockApp) -> Vec<Arc<EnOceanSwitch>> {
    PlatformService::new(app.store.clone(), app.sink.clone())
        .setup(&app.settings)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_turn_on_and_off_send_commands() {
    let app = MockApp::new().with_switch([0x01, 0x94, 0xE3, 0xB9], Some(2));
    let switches = setup(&app).await;
    let switch = &switches[0];

    switch.turn_on().await.unwrap();
    switch.turn_off().await.unwrap();

    let sent = app.sent().await;
    assert_eq!(sent.len(), 2);
    for telegram in &sent {
        assert_eq!(telegram.rorg().unwrap(), Rorg::Vld);
        assert_eq!(telegram.destination(), DeviceAddress::new(DEVICE));
        assert_eq!(telegram.sender(), DeviceAddress::new([0xFF, 0x8F, 0x21, 0x80]));
    }
    // CMD 1, channel 2, output 100% then 0%
    assert_eq!(sent[0].payload(), &[0x01, 0x02, 0x64]);
    assert_eq!(sent[1].payload(), &[0x01, 0x02, 0x00]);

    // Not confirmed by the actuator yet
    assert!(!switch.is_on());
}

#[tokio::test]
async fn test_all_channels_command() {
    let app = MockApp::new().with_switch([0x01, 0x94, 0xE3, 0xB9], None);
    let switches = setup(&app).await;

    assert!(switches[0].channel().is_all());
    switches[0].turn_on().await.unwrap();

    assert_eq!(app.sent().await[0].payload(), &[0x01, 0x1E, 0x64]);
}

#[tokio::test]
async fn test_status_confirms_state() {
    let app = MockApp::new().with_switch([0x01, 0x94, 0xE3, 0xB9], Some(0));
    let switches = setup(&app).await;
    let switch = &switches[0];
    let mut updates = switch.subscribe();

    switch.value_changed(&status_telegram(DEVICE, 0x00, 0x64)).unwrap();
    updates.changed().await.unwrap();
    assert!(updates.borrow_and_update().is_on);
    assert!(switch.is_on());

    switch.value_changed(&status_telegram(DEVICE, 0x00, 0x00)).unwrap();
    assert!(!switch.is_on());
}

#[tokio::test]
async fn test_power_reading_turns_on_only() {
    let app = MockApp::new().with_switch([0x01, 0x94, 0xE3, 0xB9], None);
    let switches = setup(&app).await;
    let switch = &switches[0];

    // 15.0 W
    switch.value_changed(&power_telegram(DEVICE, 150, 1)).unwrap();
    assert!(switch.is_on());

    // 0.5 W leaves the state untouched
    switch.value_changed(&power_telegram(DEVICE, 5, 1)).unwrap();
    assert!(switch.is_on());
}

#[tokio::test]
async fn test_configured_power_threshold() {
    let mut app = MockApp::new().with_switch([0x01, 0x94, 0xE3, 0xB9], None);
    app.settings.power.threshold_watts = 20.0;
    let switches = setup(&app).await;

    switches[0].value_changed(&power_telegram(DEVICE, 150, 1)).unwrap();
    assert!(!switches[0].is_on());

    switches[0].value_changed(&power_telegram(DEVICE, 250, 1)).unwrap();
    assert!(switches[0].is_on());
}

#[tokio::test]
async fn test_gateway_routes_to_channel() {
    let app = MockApp::new()
        .with_switch([0x01, 0x94, 0xE3, 0xB9], Some(0))
        .with_switch([0x01, 0x94, 0xE3, 0xB9], Some(1))
        .with_switch([0x01, 0x94, 0xE3, 0xB9], None);
    let switches = setup(&app).await;

    let mut gateway = GatewayService::new();
    for switch in &switches {
        gateway.register(switch.clone());
    }

    assert_eq!(gateway.dispatch(&status_telegram(DEVICE, 0x01, 0x64)), 3);

    assert!(!switches[0].is_on());
    assert!(switches[1].is_on());
    assert!(switches[2].is_on());
}

#[tokio::test]
async fn test_query_status_asks_for_configured_channel() {
    let app = MockApp::new().with_switch([0x01, 0x94, 0xE3, 0xB9], Some(7));
    let switches = setup(&app).await;

    switches[0].query_status().await.unwrap();

    let sent = app.sent().await;
    assert_eq!(sent[0].payload(), &[0x03, 0x07]);
    assert_eq!(switches[0].channel(), Channel::new(7).unwrap());
}
