mod asset_api;
mod livestream_api;
mod navigation_api;
mod venue_api;

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{api::API, config::Config, entities::Countdown, entities::RouteSession};

pub struct Engine {
    config: Config,
    sessions: Mutex<HashMap<Uuid, RouteSession>>,
    countdown: Mutex<Countdown>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: Config) -> Self {
        let countdown = Countdown::new(config.event_start.with_timezone(&Utc));

        tracing::info!(
            couple = %config.couple,
            event_start = %config.event_start,
            "engine ready"
        );

        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
            countdown: Mutex::new(countdown),
        }
    }

    fn session_ttl(&self) -> Duration {
        Duration::seconds(self.config.session_idle_secs as i64)
    }

    /// Drops navigation sessions whose page stopped reporting, typically
    /// because it was closed without the final `DELETE` reaching us.
    pub(crate) async fn evict_idle_sessions(&self, now: DateTime<Utc>) -> usize {
        let ttl = self.session_ttl();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();

        sessions.retain(|id, session| {
            let idle = session.is_idle(now, ttl);
            if idle {
                tracing::info!(session = %id, "evicting idle navigation session");
            }
            !idle
        });

        before - sessions.len()
    }

    /// Spoken once when a guest starts navigating.
    pub fn welcome_message(&self) -> String {
        format!(
            "Welcome to {}'s Wedding navigation. Please follow the directions.",
            self.config.couple.replace(" & ", " and ")
        )
    }
}

impl API for Engine {
    fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
pub(crate) fn test_engine() -> Engine {
    Engine::new(Config::from_lookup(|_| None).unwrap())
}

#[test]
fn welcome_message_spells_out_the_couple() {
    let engine = test_engine();

    assert_eq!(
        engine.welcome_message(),
        "Welcome to Victor and Joy's Wedding navigation. Please follow the directions."
    );
}
