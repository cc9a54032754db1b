#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Delay, Duration, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::BatteryStatus,
    display::Display,
};
use pinetime_motd::{
    config::{BACKLIGHT_LEVEL, MESSAGE, SCROLL_FRAME_MS, UTC_OFFSET_SECS},
    ui::{BatteryInfo, MotdWatchface, WatchFace, WatchFaceState},
};
use system::{
    bluetooth::{self, Server},
    config::SystemConfig,
    time::{TimeManager, TimeReference},
};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static BLE_BATTERY_LEVEL: Signal<ThreadModeRawMutex, u8> = Signal::new();
static CONNECTION: Signal<ThreadModeRawMutex, bool> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

static BACKLIGHT: StaticCell<Backlight<'static>> = StaticCell::new();
static SERVER: StaticCell<Server> = StaticCell::new();

/// Run the SoftDevice event loop.
#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, then serve the connected central until it disconnects.
#[embassy_executor::task]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) {
    loop {
        let conn = match bluetooth::advertise(sd).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {}", e);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        defmt::info!("Bluetooth connected");
        CONNECTION.signal(true);

        bluetooth::serve(&conn, server, &BLE_BATTERY_LEVEL).await;

        defmt::info!("Bluetooth disconnected");
        CONNECTION.signal(false);
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task]
async fn update_battery_status(mut battery: BatteryStatus<'static>) {
    loop {
        match battery.update().await {
            Ok(true) => {
                // Battery status changed
                let info = battery.info();
                defmt::info!(
                    "Battery status: {}% ({}, {} mV)",
                    info.percent,
                    if info.charging {
                        "charging"
                    } else {
                        "discharging"
                    },
                    battery.voltage(),
                );
                BATTERY_STATUS.signal(info);
                BLE_BATTERY_LEVEL.signal(info.percent);
            }
            Ok(false) => {}
            Err(e) => defmt::warn!("Battery update failed: {}", e),
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Deliver events to the watch face and draw it.
#[embassy_executor::task]
async fn update_lcd(mut display: Display<'static, SPI2>, initial: WatchFaceState) {
    let mut watchface = MotdWatchface::load(MESSAGE, &initial);
    if display.render(&watchface).is_err() {
        defmt::warn!("Failed to draw watchface");
    }

    loop {
        let time = TIME.wait().await;

        if CONNECTION.signaled() {
            watchface.handle_connection(CONNECTION.wait().await);
        }

        if BATTERY_STATUS.signaled() {
            watchface.handle_battery(BATTERY_STATUS.wait().await);
        }

        watchface.handle_tick(&time);
        defmt::debug!(
            "Scroll: {} {}",
            watchface.scroll_phase(),
            watchface.scroll_state()
        );

        if let Err(e) = display.render(&watchface) {
            defmt::warn!("Failed to draw watchface: {}", e);
            continue;
        }

        // Play the scroll animation, if any
        while watchface.next_frame() {
            Timer::after(Duration::from_millis(SCROLL_FRAME_MS)).await;
            if let Err(e) = display.render_frame(&watchface) {
                defmt::warn!("Failed to draw scroll frame: {}", e);
                break;
            }
        }
    }
}

/// Get the current time.
#[embassy_executor::task]
async fn update_time(clock: TimeManager) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        let time = clock.get_time();
        defmt::debug!(
            "Current time: {}:{}:{}",
            time.hour(),
            time.minute(),
            time.second(),
        );

        // Send time to channel
        TIME.signal(time);

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    SystemConfig::set_interrupt_priorities();
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize time
    let clock = TimeManager::init(TimeReference::now(UTC_EPOCH), UTC_OFFSET_SECS);

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight, kept alive for the lifetime of the firmware
    let backlight = BACKLIGHT.init(unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        BACKLIGHT_LEVEL,
    )));
    defmt::info!("Backlight level {}", backlight.brightness());

    // Initalize Battery
    let battery = unwrap!(BatteryStatus::init(Input::new(p.P0_12, Pull::None), saadc).await);
    let battery_info = battery.info();

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        &mut Delay,
    ));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    unwrap!(server.bas.battery_level_set(&battery_info.percent));

    defmt::info!("Initialization finished");

    let initial = WatchFaceState {
        time: clock.get_time(),
        battery: battery_info,
        connected: false,
    };

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(update_lcd(display, initial)));
    unwrap!(spawner.spawn(update_time(clock)));
}
