use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{configuration_error, Error};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_COUPLE: &str = "Victor & Joy";
pub const DEFAULT_EVENT_START: &str = "2025-07-11T13:00:00+01:00";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 2 * 60 * 60;
pub const DEFAULT_LIVESTREAM_URL: &str = "https://www.facebook.com/plugins/video.php?href=https%3A%2F%2Fwww.facebook.com%2Fvictor.idakwo.5%2Fvideos%2F2637333386460126%2F&width=1280";

/// Site-wide settings. Every field has a default so an empty environment
/// still serves the stock microsite.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub addr: SocketAddr,
    pub couple: String,
    pub event_start: DateTime<FixedOffset>,
    pub livestream_url: String,
    /// Navigation sessions with no events for this long are dropped.
    pub session_idle_secs: u64,
    pub assets: AssetPaths,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetPaths {
    pub invitation: PathBuf,
    pub program_image: PathBuf,
    pub program_pdf: PathBuf,
    pub media_dir: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            invitation: "assets/invitation_card.jpeg".into(),
            program_image: "assets/wedding_program.jpeg".into(),
            program_pdf: "assets/wedding_program.pdf".into(),
            media_dir: "assets/media".into(),
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());
        let defaults = AssetPaths::default();

        let addr = var("NUPTIAE_ADDR", DEFAULT_ADDR);
        let addr = addr
            .parse()
            .map_err(|_| configuration_error(&format!("invalid NUPTIAE_ADDR `{}`", addr)))?;

        let event_start = var("NUPTIAE_EVENT_START", DEFAULT_EVENT_START);
        let event_start = DateTime::parse_from_rfc3339(&event_start).map_err(|_| {
            configuration_error(&format!("invalid NUPTIAE_EVENT_START `{}`", event_start))
        })?;

        let couple = var("NUPTIAE_COUPLE", DEFAULT_COUPLE);
        if couple.trim().is_empty() {
            return Err(configuration_error("NUPTIAE_COUPLE is empty"));
        }

        let session_idle_secs = match lookup("NUPTIAE_SESSION_IDLE_SECS") {
            Some(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(configuration_error(&format!(
                        "invalid NUPTIAE_SESSION_IDLE_SECS `{}`",
                        secs
                    )))
                }
            },
            None => DEFAULT_SESSION_IDLE_SECS,
        };

        let path = |key: &str, default: &PathBuf| {
            lookup(key)
                .map(PathBuf::from)
                .unwrap_or_else(|| default.clone())
        };

        Ok(Self {
            addr,
            couple,
            event_start,
            livestream_url: var("NUPTIAE_LIVESTREAM_URL", DEFAULT_LIVESTREAM_URL),
            session_idle_secs,
            assets: AssetPaths {
                invitation: path("NUPTIAE_INVITATION", &defaults.invitation),
                program_image: path("NUPTIAE_PROGRAM_IMAGE", &defaults.program_image),
                program_pdf: path("NUPTIAE_PROGRAM_PDF", &defaults.program_pdf),
                media_dir: path("NUPTIAE_MEDIA_DIR", &defaults.media_dir),
            },
        })
    }
}

#[test]
fn empty_environment_uses_defaults() {
    let config = Config::from_lookup(|_| None).unwrap();

    assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
    assert_eq!(config.couple, "Victor & Joy");
    assert_eq!(config.event_start.to_rfc3339(), "2025-07-11T13:00:00+01:00");
    assert_eq!(config.session_idle_secs, 7200);
    assert_eq!(
        config.assets.invitation,
        PathBuf::from("assets/invitation_card.jpeg")
    );
}

#[test]
fn overrides_are_read_from_lookup() {
    let config = Config::from_lookup(|key| match key {
        "NUPTIAE_ADDR" => Some("0.0.0.0:8080".into()),
        "NUPTIAE_MEDIA_DIR" => Some("/srv/media".into()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.addr.port(), 8080);
    assert_eq!(config.assets.media_dir, PathBuf::from("/srv/media"));
}

#[test]
fn invalid_values_are_configuration_errors() {
    let err = Config::from_lookup(|key| match key {
        "NUPTIAE_EVENT_START" => Some("next friday".into()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err.code, 102);

    let err = Config::from_lookup(|key| match key {
        "NUPTIAE_ADDR" => Some("localhost".into()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err.code, 102);

    let err = Config::from_lookup(|key| match key {
        "NUPTIAE_SESSION_IDLE_SECS" => Some("0".into()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err.code, 102);
}
