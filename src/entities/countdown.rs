use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum CountdownStatus {
    Pending {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Live,
}

impl CountdownStatus {
    pub fn at(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let distance = target.signed_duration_since(now).num_milliseconds();

        if distance <= 0 {
            return Self::Live;
        }

        const SECOND: i64 = 1000;
        const MINUTE: i64 = 60 * SECOND;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;

        Self::Pending {
            days: distance / DAY,
            hours: (distance % DAY) / HOUR,
            minutes: (distance % HOUR) / MINUTE,
            seconds: (distance % MINUTE) / SECOND,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn label(&self) -> String {
        match self {
            Self::Pending {
                days,
                hours,
                minutes,
                seconds,
            } => format!("⏳ Live in {}d {}h {}m {}s", days, hours, minutes, seconds),
            Self::Live => "🔴 Live now".into(),
        }
    }
}

/// Countdown to the livestream. Switches to `Live` once, after which the
/// timer is cleared and further ticks yield nothing.
#[derive(Clone, Debug)]
pub struct Countdown {
    target: DateTime<Utc>,
    cleared: bool,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            cleared: false,
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn status(&self, now: DateTime<Utc>) -> CountdownStatus {
        CountdownStatus::at(self.target, now)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<CountdownStatus> {
        if self.cleared {
            return None;
        }

        let status = self.status(now);
        if status.is_live() {
            self.cleared = true;
        }

        Some(status)
    }
}

#[cfg(test)]
fn event_start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-07-11T13:00:00+01:00")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn pending_breakdown() {
    let now = DateTime::parse_from_rfc3339("2025-07-10T10:58:57+01:00")
        .unwrap()
        .with_timezone(&Utc);

    assert_eq!(
        CountdownStatus::at(event_start(), now),
        CountdownStatus::Pending {
            days: 1,
            hours: 2,
            minutes: 1,
            seconds: 3
        }
    );
    assert_eq!(
        CountdownStatus::at(event_start(), now).label(),
        "⏳ Live in 1d 2h 1m 3s"
    );
}

#[test]
fn switches_to_live_exactly_once() {
    let mut countdown = Countdown::new(event_start());
    let before = event_start() - chrono::Duration::seconds(2);

    assert!(matches!(
        countdown.tick(before),
        Some(CountdownStatus::Pending { .. })
    ));
    assert!(!countdown.is_cleared());

    // 12:00 UTC is 13:00 at +01:00
    let at = DateTime::parse_from_rfc3339("2025-07-11T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(countdown.tick(at), Some(CountdownStatus::Live));
    assert!(countdown.is_cleared());

    assert_eq!(countdown.tick(at + chrono::Duration::seconds(1)), None);
    assert_eq!(countdown.tick(at + chrono::Duration::hours(5)), None);
}

#[test]
fn already_past_is_live() {
    let now = event_start() + chrono::Duration::days(30);

    assert_eq!(CountdownStatus::at(event_start(), now), CountdownStatus::Live);
}
