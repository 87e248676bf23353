//! Subcommand implementations.

use crate::cli::{Cli, Command, PowerState};
use crate::error::AppError;
use crate::output::{device_table, scan_table};

use common::ErrorLocation;
use lanlight_core::commands::{get_service, set_color, set_power_off, set_power_on};
use lanlight_core::protocol::enums::DeviceService;
use lanlight_core::session::DeviceSession;
use lanlight_core::{Client, DeviceManager, LanConfig, Message, Payload};

use models::Serial;

use std::net::SocketAddr;
use std::panic::Location;
use std::time::Duration;

use log::{debug, info};
use tokio::time::{Instant, sleep};

const FIND_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Validated components of a `color` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorArgs {
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub brightness: Option<f64>,
    pub kelvin: Option<u16>,
    pub duration: Duration,
}

impl ColorArgs {
    #[track_caller]
    pub fn new(
        hue: Option<f64>,
        saturation: Option<f64>,
        brightness: Option<f64>,
        kelvin: Option<u16>,
        duration_ms: u64,
    ) -> Result<Self, AppError> {
        if hue.is_none() && saturation.is_none() && brightness.is_none() && kelvin.is_none() {
            return Err(argument_error(
                "color needs at least one of --hue, --saturation, --brightness, --kelvin",
            ));
        }
        check_range("hue", hue, 360.0)?;
        check_range("saturation", saturation, 100.0)?;
        check_range("brightness", brightness, 100.0)?;

        Ok(ColorArgs {
            hue,
            saturation,
            brightness,
            kelvin,
            duration: Duration::from_millis(duration_ms),
        })
    }

    pub fn message(&self) -> Message {
        set_color(
            self.hue,
            self.saturation,
            self.brightness,
            self.kelvin,
            self.duration,
        )
    }
}

#[track_caller]
fn check_range(name: &str, value: Option<f64>, max: f64) -> Result<(), AppError> {
    match value {
        Some(v) if !(0.0..=max).contains(&v) => {
            Err(argument_error(format!("--{name} must be between 0 and {max}, got {v}")))
        }
        _ => Ok(()),
    }
}

#[track_caller]
fn argument_error(message: impl Into<String>) -> AppError {
    AppError::Argument {
        message: message.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

pub fn load_config(cli: &Cli) -> Result<LanConfig, AppError> {
    let dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => LanConfig::default_dir()?,
    };
    Ok(LanConfig::load(&dir)?)
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Scan { timeout_ms } => scan(&config, Duration::from_millis(timeout_ms)).await,
        Command::Devices { json, wait_ms } => {
            devices(&config, json, Duration::from_millis(wait_ms)).await
        }
        Command::Power {
            target,
            state,
            wait_ms,
        } => {
            let message = match state {
                PowerState::On => set_power_on(),
                PowerState::Off => set_power_off(),
            };
            control(&config, &target, message, Duration::from_millis(wait_ms)).await
        }
        Command::Color {
            target,
            hue,
            saturation,
            brightness,
            kelvin,
            duration_ms,
            wait_ms,
        } => {
            let color = ColorArgs::new(hue, saturation, brightness, kelvin, duration_ms)?;
            control(&config, &target, color.message(), Duration::from_millis(wait_ms)).await
        }
    }
}

/// One broadcast, then collect service announcements until the timeout.
async fn scan(config: &LanConfig, timeout: Duration) -> Result<(), AppError> {
    let client = Client::bind(config).await?;
    client.send_broadcast(get_service()).await?;

    let mut responders: Vec<(Serial, SocketAddr)> = Vec::new();
    client
        .receive(timeout, false, |message, addr| {
            if let Payload::DeviceStateService(state) = &message.payload {
                if state.service == DeviceService::UDP
                    && !responders.iter().any(|(_, known)| *known == addr)
                {
                    responders.push((message.target(), addr));
                }
            }
        })
        .await?;

    info!("Scan found {} devices", responders.len());
    print!("{}", scan_table(&responders));
    Ok(())
}

async fn devices(config: &LanConfig, json: bool, wait: Duration) -> Result<(), AppError> {
    let mut manager = DeviceManager::new(config).await?;
    sleep(wait).await;

    let devices = manager.devices().await;
    manager.close().await;
    let devices = devices?;

    if json {
        let rendered = serde_json::to_string_pretty(&devices).map_err(|e| AppError::Lanlight {
            message: format!("Failed to render devices as JSON: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        println!("{rendered}");
    } else {
        print!("{}", device_table(&devices));
    }
    Ok(())
}

async fn control(
    config: &LanConfig,
    target: &str,
    message: Message,
    wait: Duration,
) -> Result<(), AppError> {
    let mut manager = DeviceManager::new(config).await?;

    let result = match find_session(&manager, target, wait).await {
        Ok(session) => {
            debug!("Sending {} to {}", message.payload.name(), session.serial());
            session.send_one(message).await.map_err(AppError::from)
        }
        Err(e) => Err(e),
    };

    manager.close().await;
    result
}

/// Polls the manager until a session matching `target` shows up or `wait`
/// runs out. Labels only match once the device has reported one.
async fn find_session(
    manager: &DeviceManager,
    target: &str,
    wait: Duration,
) -> Result<DeviceSession, AppError> {
    let deadline = Instant::now() + wait;
    loop {
        match manager.find(target).await {
            Ok(session) => return Ok(session),
            Err(e) if Instant::now() >= deadline => return Err(e.into()),
            Err(_) => sleep(FIND_POLL_INTERVAL).await,
        }
    }
}
