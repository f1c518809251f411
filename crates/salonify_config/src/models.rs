// --- File: crates/salonify_config/src/models.rs ---

use chrono::Weekday;
use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Scheduling Config ---
// Business hours are kept as "HH:MM" strings here and parsed by the scheduling crate.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    #[serde(default = "default_business_start")]
    pub business_start: String,
    #[serde(default = "default_business_end")]
    pub business_end: String,
    #[serde(default = "default_granularity_minutes")]
    pub granularity_minutes: u32,
    /// Week-days on which the salon is closed, e.g. ["Sun"].
    #[serde(default = "default_closed_weekdays")]
    pub closed_weekdays: Vec<Weekday>,
    /// How many days ahead of "today" a booking may be placed.
    #[serde(default = "default_booking_horizon_days")]
    pub booking_horizon_days: u32,
    /// IANA zone name used to determine the business "today", e.g. "Europe/Zurich".
    #[serde(default)]
    pub time_zone: Option<String>,
}

fn default_business_start() -> String {
    "09:00".to_string()
}

fn default_business_end() -> String {
    "18:00".to_string()
}

fn default_granularity_minutes() -> u32 {
    30
}

fn default_closed_weekdays() -> Vec<Weekday> {
    vec![Weekday::Sun]
}

fn default_booking_horizon_days() -> u32 {
    30
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            business_start: default_business_start(),
            business_end: default_business_end(),
            granularity_minutes: default_granularity_minutes(),
            closed_weekdays: default_closed_weekdays(),
            booking_horizon_days: default_booking_horizon_days(),
            time_zone: None,
        }
    }
}

// --- Remote Appointment API Config ---
// The token is normally configured as "secret_from_env" and injected from
// SALONIFY_SECRET_REMOTE_API_API_TOKEN.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RemoteApiConfig {
    pub base_url: String, // Mandatory, e.g. http://localhost:8080/api
    pub timeout_secs: Option<u64>,
    pub api_token: Option<String>,
}

// --- Embedded Service Catalog ---
// Used when the appointment API is not in use.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in the smallest currency unit (e.g., cents).
    pub price: i64,
    pub duration_minutes: u32,
    /// One of MANICURE, PEDICURE, GEL, NAIL_ART, TREATMENT.
    pub category: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scheduling: SchedulingConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_remote_api: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub remote_api: Option<RemoteApiConfig>,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}
