use super::Engine;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{api::LivestreamAPI, entities::CountdownStatus, error::Error};

#[async_trait]
impl LivestreamAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn countdown_status(&self, now: DateTime<Utc>) -> Result<CountdownStatus, Error> {
        let mut countdown = self.countdown.lock().await;

        match countdown.tick(now) {
            Some(CountdownStatus::Live) => {
                tracing::info!("countdown finished, livestream is live");
                Ok(CountdownStatus::Live)
            }
            Some(pending) => Ok(pending),
            // timer already cleared
            None => Ok(CountdownStatus::Live),
        }
    }
}

#[test]
fn countdown_goes_live_and_stays_live() {
    use chrono::Duration;
    use tokio_test::block_on;

    let engine = super::test_engine();
    let start = engine.config.event_start.with_timezone(&Utc);

    let pending = block_on(engine.countdown_status(start - Duration::minutes(90))).unwrap();
    assert_eq!(
        pending,
        CountdownStatus::Pending {
            days: 0,
            hours: 1,
            minutes: 30,
            seconds: 0
        }
    );

    let live = block_on(engine.countdown_status(start)).unwrap();
    assert_eq!(live, CountdownStatus::Live);
    assert!(block_on(engine.countdown.lock()).is_cleared());

    // once cleared the clock no longer matters
    let later = block_on(engine.countdown_status(start - Duration::days(1))).unwrap();
    assert_eq!(later, CountdownStatus::Live);
}
