use super::Engine;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::NavigationAPI,
    entities::{
        AcquisitionMode, Directive, LocationError, Position, RouteSession, RouteSummary, Venue,
    },
    error::{not_found_error, Error},
};

impl Engine {
    async fn with_session<F>(&self, id: Uuid, f: F) -> Result<Vec<Directive>, Error>
    where
        F: FnOnce(&mut RouteSession) -> Result<Vec<Directive>, Error> + Send,
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found_error())?;
        session.touch(Utc::now());

        f(session)
    }
}

#[async_trait]
impl NavigationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn start_navigation(
        &self,
        venue: &str,
        mode: AcquisitionMode,
    ) -> Result<(RouteSession, Vec<Directive>), Error> {
        let venue: Venue = venue.parse()?;

        let evicted = self.evict_idle_sessions(Utc::now()).await;
        if evicted > 0 {
            tracing::info!(evicted, "dropped idle navigation sessions");
        }

        let (session, directives) = RouteSession::start(venue, mode, &self.welcome_message());

        tracing::info!(session = %session.id, venue = venue.name(), "navigation started");

        self.sessions
            .lock()
            .await
            .insert(session.id, session.clone());

        Ok((session, directives))
    }

    #[tracing::instrument(skip(self))]
    async fn find_session(&self, id: Uuid) -> Result<RouteSession, Error> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(&id).ok_or_else(|| not_found_error())?;

        Ok(session.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn report_position(
        &self,
        id: Uuid,
        subscription: Uuid,
        position: Position,
    ) -> Result<Vec<Directive>, Error> {
        self.with_session(id, |session| {
            session.update_position(subscription, position)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn report_location_error(
        &self,
        id: Uuid,
        subscription: Uuid,
        error: LocationError,
    ) -> Result<Vec<Directive>, Error> {
        self.with_session(id, |session| session.location_failed(subscription, error))
            .await
    }

    #[tracing::instrument(skip(self, routes))]
    async fn report_routes(
        &self,
        id: Uuid,
        control_id: Uuid,
        routes: Vec<RouteSummary>,
    ) -> Result<Vec<Directive>, Error> {
        self.with_session(id, |session| session.routes_found(control_id, &routes))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn change_venue(&self, id: Uuid, venue: &str) -> Result<Vec<Directive>, Error> {
        let venue: Venue = venue.parse()?;
        let welcome = self.welcome_message();

        self.with_session(id, |session| session.change_venue(venue, &welcome))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn end_navigation(&self, id: Uuid) -> Result<Vec<Directive>, Error> {
        let mut session = self
            .sessions
            .lock()
            .await
            .remove(&id)
            .ok_or_else(|| not_found_error())?;

        tracing::info!(session = %id, "navigation ended");

        session.close()
    }
}

#[test]
fn live_tracking_through_the_engine() {
    use crate::entities::SessionStatus;
    use tokio_test::block_on;

    let engine = super::test_engine();

    let (session, directives) =
        block_on(engine.start_navigation("SAFTEC Hotels", AcquisitionMode::Tracking)).unwrap();
    let subscription = session.subscription.unwrap();

    assert!(directives.contains(&Directive::PlaceMarker {
        coordinates: Venue::SaftecHotels.coordinates(),
        label: "Destination: SAFTEC Hotels".into(),
    }));
    assert!(directives.contains(&Directive::Speak {
        text: engine.welcome_message()
    }));

    let first =
        block_on(engine.report_position(session.id, subscription, Position::new(9.6, 6.5)))
            .unwrap();
    assert!(matches!(&first[..], [Directive::CreateRouteControl { .. }]));

    let second =
        block_on(engine.report_position(session.id, subscription, Position::new(9.59, 6.52)))
            .unwrap();
    assert!(matches!(&second[..], [Directive::SetWaypoints { .. }]));

    let stored = block_on(engine.find_session(session.id)).unwrap();
    assert_eq!(stored.status, SessionStatus::Routing);
    assert_eq!(
        stored.control.unwrap().waypoints.origin,
        Position::new(9.59, 6.52).coordinates
    );
}

#[test]
fn unknown_venue_and_session() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let err = block_on(engine.start_navigation("Registry", AcquisitionMode::Tracking)).unwrap_err();
    assert_eq!(err.code, 102);

    let err = block_on(engine.find_session(Uuid::new_v4())).unwrap_err();
    assert_eq!(err.code, 105);
}

#[test]
fn ending_navigation_forgets_the_session() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let (session, _) =
        block_on(engine.start_navigation("Reception - PSS Hall", AcquisitionMode::OneShot))
            .unwrap();
    let subscription = session.subscription.unwrap();

    let directives = block_on(engine.end_navigation(session.id)).unwrap();
    assert_eq!(directives[0], Directive::ClearWatch { subscription });

    let err = block_on(engine.report_position(session.id, subscription, Position::new(9.6, 6.5)))
        .unwrap_err();
    assert_eq!(err.code, 105);
}

#[test]
fn switching_venue_through_the_engine() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let (session, _) =
        block_on(engine.start_navigation("Traditional Marriage", AcquisitionMode::Tracking))
            .unwrap();

    let err = block_on(engine.change_venue(session.id, "Nowhere")).unwrap_err();
    assert_eq!(err.code, 102);

    block_on(engine.change_venue(session.id, "SAFTEC Hotels")).unwrap();
    let stored = block_on(engine.find_session(session.id)).unwrap();
    assert_eq!(stored.venue, Venue::SaftecHotels);
    assert_ne!(stored.subscription, session.subscription);
}

#[test]
fn abandoned_sessions_are_evicted() {
    use crate::entities::LocationErrorKind;
    use chrono::Duration;
    use tokio_test::block_on;

    let engine = super::test_engine();
    let ttl = Duration::seconds(engine.config.session_idle_secs as i64);

    let mut abandoned = Vec::new();
    for _ in 0..50 {
        let (session, _) =
            block_on(engine.start_navigation("SAFTEC Hotels", AcquisitionMode::Tracking)).unwrap();
        let error = LocationError {
            kind: LocationErrorKind::from_code(1),
            message: None,
        };
        block_on(engine.report_location_error(
            session.id,
            session.subscription.unwrap(),
            error,
        ))
        .unwrap();
        abandoned.push(session.id);
    }
    assert_eq!(block_on(engine.sessions.lock()).len(), 50);

    // nothing is idle yet
    assert_eq!(block_on(engine.evict_idle_sessions(Utc::now())), 0);

    let later = Utc::now() + ttl + Duration::seconds(1);
    assert_eq!(block_on(engine.evict_idle_sessions(later)), 50);
    assert!(block_on(engine.sessions.lock()).is_empty());

    let err = block_on(engine.find_session(abandoned[0])).unwrap_err();
    assert_eq!(err.code, 105);
}

#[test]
fn starting_navigation_sweeps_idle_sessions() {
    use chrono::Duration;
    use tokio_test::block_on;

    let engine = super::test_engine();
    let ttl = Duration::seconds(engine.config.session_idle_secs as i64);

    let (stale, _) =
        block_on(engine.start_navigation("Traditional Marriage", AcquisitionMode::OneShot))
            .unwrap();
    let (active, _) =
        block_on(engine.start_navigation("Reception - PSS Hall", AcquisitionMode::Tracking))
            .unwrap();

    block_on(engine.sessions.lock())
        .get_mut(&stale.id)
        .unwrap()
        .touch(Utc::now() - ttl);

    // events keep a session alive
    block_on(engine.report_position(
        active.id,
        active.subscription.unwrap(),
        Position::new(9.6, 6.5),
    ))
    .unwrap();

    let (fresh, _) =
        block_on(engine.start_navigation("SAFTEC Hotels", AcquisitionMode::Tracking)).unwrap();

    let sessions = block_on(engine.sessions.lock());
    assert!(!sessions.contains_key(&stale.id));
    assert!(sessions.contains_key(&active.id));
    assert!(sessions.contains_key(&fresh.id));
}

#[test]
fn switching_venue_replays_the_welcome() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let (session, _) =
        block_on(engine.start_navigation("Traditional Marriage", AcquisitionMode::Tracking))
            .unwrap();
    let directives = block_on(engine.change_venue(session.id, "SAFTEC Hotels")).unwrap();

    assert_eq!(
        directives.last(),
        Some(&Directive::Speak {
            text: engine.welcome_message()
        })
    );
}
