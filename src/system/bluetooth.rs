//! Bluetooth module
//!
//! Advertises the watch as a connectable peripheral and serves the standard
//! Battery Service while a central is connected.

// Core
use core::mem;

// Embassy
use embassy_futures::select::select;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};

// BLE
use nrf_softdevice::{
    self,
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
            ServiceUuid16,
        },
        gatt_server, peripheral, Connection,
    },
    raw, Config, Softdevice,
};

/// Name shown to scanning centrals
const DEVICE_NAME: &[u8] = b"PineTime";

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .full_name("PineTime")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

/// SoftDevice configuration for a single peripheral connection
pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Advertise until a central connects.
pub async fn advertise(sd: &Softdevice) -> Result<Connection, peripheral::AdvertiseError> {
    let config = peripheral::Config::default();
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    peripheral::advertise_connectable(sd, adv, &config).await
}

/// Serve GATT requests until the connection drops.
///
/// Battery levels signaled on `battery_level` are stored in the Battery
/// Service and notified to the central.
pub async fn serve(
    conn: &Connection,
    server: &Server,
    battery_level: &Signal<ThreadModeRawMutex, u8>,
) {
    let gatt = gatt_server::run(conn, server, |e| match e {
        ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
            defmt::info!("Battery level notifications: {}", notifications);
        }
    });

    let notify = async {
        loop {
            let level = battery_level.wait().await;
            if let Err(e) = server.bas.battery_level_set(&level) {
                defmt::warn!("Failed to store battery level: {}", e);
            }
            // Fails while the central has not enabled notifications
            if let Err(e) = server.bas.battery_level_notify(conn, &level) {
                defmt::debug!("Battery level not notified: {}", e);
            }
        }
    };

    select(gatt, notify).await;
}
