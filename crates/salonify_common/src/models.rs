// --- File: crates/salonify_common/src/models.rs ---

// Value types shared by the scheduling core, the booking services and the HTTP layer.
// Times are wall-clock times in the single business timezone; dates carry no time component.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike, Weekday};
use salonify_config::ServiceEntry;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type StaffId = i64;
pub type CustomerId = i64;
pub type ServiceId = i64;
pub type BookingId = i64;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Errors raised while building or parsing model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Interval start {start} must be before end {end}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },
    #[error("Unknown service category '{0}'")]
    UnknownCategory(String),
    #[error("Service {0} must have a positive duration")]
    InvalidDuration(ServiceId),
}

// --- TimeOfDay ---

/// Wall-clock time of day with minute resolution.
///
/// Ordering follows minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Const constructor for literal times. Panics on out-of-range values.
    pub const fn hm(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self { hour, minute }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Total minutes since midnight.
    pub fn to_minutes(self) -> u32 {
        u32::from(self.hour) * MINUTES_PER_HOUR + u32::from(self.minute)
    }

    /// Inverse of [`TimeOfDay::to_minutes`]; `None` for values past 23:59.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        Some(Self {
            hour: (minutes / MINUTES_PER_HOUR) as u8,
            minute: (minutes % MINUTES_PER_HOUR) as u8,
        })
    }

    /// Adds minutes, staying on the same day.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.to_minutes().checked_add(minutes)?)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ModelError;

    /// Accepts `HH:MM`, and `HH:MM:SS` when the seconds are zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|_| ModelError::InvalidTime(s.to_string()))?;
        if parsed.second() != 0 || parsed.nanosecond() != 0 {
            return Err(ModelError::InvalidTime(s.to_string()));
        }
        TimeOfDay::new(parsed.hour() as u8, parsed.minute() as u8)
            .ok_or_else(|| ModelError::InvalidTime(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// --- DateKey ---

/// A calendar date without a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn checked_add_days(self, days: u32) -> Option<Self> {
        self.0.checked_add_days(Days::new(u64::from(days))).map(Self)
    }

    pub fn checked_sub_days(self, days: u32) -> Option<Self> {
        self.0.checked_sub_days(Days::new(u64::from(days))).map(Self)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: DateKey) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ModelError::InvalidDate(s.to_string()))
    }
}

// --- Interval ---

/// Half-open `[start, end)` interval on a single day; `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Interval {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:30"))]
    start: TimeOfDay,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawInterval> for Interval {
    type Error = ModelError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ModelError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(ModelError::InvalidInterval { start, end })
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.to_minutes() - self.start.to_minutes()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// --- Bookings ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum BookingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Cancelled bookings never block a slot.
    pub fn blocks_slots(self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Scheduled => "SCHEDULED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// A booking as seen in a fetched snapshot.
///
/// Start and end are kept raw: a record from the system of record may be
/// malformed (`start_time >= end_time`) and the scheduling core decides how
/// to treat it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentBooking {
    pub id: BookingId,
    pub staff_id: StaffId,
    pub customer_id: CustomerId,
    pub service_id: ServiceId,
    #[serde(rename = "appointmentDate")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-05-05"))]
    pub date: DateKey,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: TimeOfDay,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:30"))]
    pub end_time: TimeOfDay,
    pub status: BookingStatus,
}

impl AppointmentBooking {
    /// The declared interval, or `None` for a malformed record.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start_time, self.end_time).ok()
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_time < self.end_time
    }
}

/// Body of a create-appointment call, as the appointment API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRequest {
    pub customer_id: CustomerId,
    pub staff_id: StaffId,
    pub service_id: ServiceId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-05-05"))]
    pub appointment_date: DateKey,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: TimeOfDay,
}

// --- Services ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ServiceCategory {
    Manicure,
    Pedicure,
    Gel,
    NailArt,
    Treatment,
}

impl FromStr for ServiceCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MANICURE" => Ok(ServiceCategory::Manicure),
            "PEDICURE" => Ok(ServiceCategory::Pedicure),
            "GEL" => Ok(ServiceCategory::Gel),
            "NAIL_ART" => Ok(ServiceCategory::NailArt),
            "TREATMENT" => Ok(ServiceCategory::Treatment),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}

/// A bookable salon service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceSpec {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in the smallest currency unit (e.g., cents).
    pub price: i64,
    /// Always positive once the spec is in a [`ServiceCatalog`].
    pub duration_minutes: u32,
    pub category: ServiceCategory,
}

impl TryFrom<&ServiceEntry> for ServiceSpec {
    type Error = ModelError;

    fn try_from(entry: &ServiceEntry) -> Result<Self, Self::Error> {
        if entry.duration_minutes == 0 {
            return Err(ModelError::InvalidDuration(entry.id));
        }
        Ok(ServiceSpec {
            id: entry.id,
            name: entry.name.clone(),
            description: entry.description.clone(),
            price: entry.price,
            duration_minutes: entry.duration_minutes,
            category: entry.category.parse()?,
        })
    }
}

/// Services keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: BTreeMap<ServiceId, ServiceSpec>,
}

impl ServiceCatalog {
    /// Builds a catalog, rejecting zero-length services.
    pub fn new(specs: impl IntoIterator<Item = ServiceSpec>) -> Result<Self, ModelError> {
        let mut services = BTreeMap::new();
        for spec in specs {
            if spec.duration_minutes == 0 {
                return Err(ModelError::InvalidDuration(spec.id));
            }
            services.insert(spec.id, spec);
        }
        Ok(Self { services })
    }

    pub fn from_entries(entries: &[ServiceEntry]) -> Result<Self, ModelError> {
        let specs = entries
            .iter()
            .map(ServiceSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(specs)
    }

    pub fn resolve(&self, id: ServiceId) -> Option<&ServiceSpec> {
        self.services.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceSpec> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
