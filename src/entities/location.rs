use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A fix reported by the guest's device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Position {
    pub coordinates: Coordinates,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            coordinates: Coordinates { lat, lng },
            accuracy: None,
            timestamp: None,
        }
    }
}

/// Options handed to the browser geolocation API.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocateOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl LocateOptions {
    /// Continuous tracking never accepts cached positions.
    pub fn tracking() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 0,
        }
    }

    pub fn best_effort() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout_ms: 10_000,
            maximum_age_ms: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationErrorKind {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl LocationErrorKind {
    /// Maps a `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationError {
    pub kind: LocationErrorKind,
    #[serde(default)]
    pub message: Option<String>,
}

#[test]
fn coordinates_validity() {
    assert!(Coordinates::from((9.589305, 6.541952)).is_valid());
    assert!(!Coordinates::from((91.0, 0.0)).is_valid());
    assert!(!Coordinates::from((0.0, f64::NAN)).is_valid());
}

#[test]
fn location_error_codes() {
    assert_eq!(
        LocationErrorKind::from_code(1),
        LocationErrorKind::PermissionDenied
    );
    assert_eq!(LocationErrorKind::from_code(3), LocationErrorKind::Timeout);
    assert_eq!(LocationErrorKind::from_code(42), LocationErrorKind::Unknown);
}
