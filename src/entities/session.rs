use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    first_instruction, Coordinates, Directive, LocateOptions, LocationError, Position,
    RouteControl, RouteSummary, RoutesOutcome, SpeechGuide, Venue, Waypoints,
};
use crate::error::{invalid_input_error, invalid_state_error, location_unavailable_error, Error};

pub const LOCATION_UNAVAILABLE_ALERT: &str =
    "Could not get your location. Please enable GPS or location access.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    Tracking,
    OneShot,
}

impl Default for AcquisitionMode {
    fn default() -> Self {
        Self::Tracking
    }
}

impl AcquisitionMode {
    fn subscribe(&self, subscription: Uuid) -> Directive {
        match self {
            Self::Tracking => Directive::WatchPosition {
                subscription,
                options: LocateOptions::tracking(),
            },
            Self::OneShot => Directive::LocateOnce {
                subscription,
                options: LocateOptions::best_effort(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    AwaitingFix,
    Routing,
    LocationUnavailable,
    Closed,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::AwaitingFix => "awaiting_fix".into(),
            Self::Routing => "routing".into(),
            Self::LocationUnavailable => "location_unavailable".into(),
            Self::Closed => "closed".into(),
        }
    }
}

/// Navigation state for one page view.
///
/// Browser events (position fixes, location errors, routes found) are applied
/// in delivery order; each returns the directives the page must carry out.
/// Events tagged with a subscription or route control the session no longer
/// owns are discarded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSession {
    pub id: Uuid,
    pub venue: Venue,
    pub mode: AcquisitionMode,
    pub status: Status,
    pub subscription: Option<Uuid>,
    pub control: Option<RouteControl>,
    pub guide: SpeechGuide,
    pub last_active_at: DateTime<Utc>,
}

impl RouteSession {
    pub fn start(venue: Venue, mode: AcquisitionMode, welcome: &str) -> (Self, Vec<Directive>) {
        let mut session = Self {
            id: Uuid::new_v4(),
            venue,
            mode,
            status: Status::AwaitingFix,
            subscription: None,
            control: None,
            guide: SpeechGuide::default(),
            last_active_at: Utc::now(),
        };

        let mut directives = session.begin();
        session.guide.announce(&mut directives, welcome);

        (session, directives)
    }

    pub fn destination(&self) -> Coordinates {
        self.venue.coordinates()
    }

    pub fn is_closed(&self) -> bool {
        self.status == Status::Closed
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active_at = now;
    }

    /// True once no event has reached the session for `ttl`.
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_active_at) >= ttl
    }

    fn begin(&mut self) -> Vec<Directive> {
        let subscription = Uuid::new_v4();
        self.subscription = Some(subscription);
        self.status = Status::AwaitingFix;

        vec![
            Directive::PlaceMarker {
                coordinates: self.destination(),
                label: self.venue.marker_label(),
            },
            self.mode.subscribe(subscription),
        ]
    }

    fn owns_subscription(&self, subscription: Uuid) -> bool {
        self.subscription == Some(subscription)
    }

    fn unsubscribe(&mut self) -> Option<Directive> {
        self.subscription
            .take()
            .map(|subscription| Directive::ClearWatch { subscription })
    }

    #[tracing::instrument(skip(self), fields(session = %self.id))]
    pub fn update_position(
        &mut self,
        subscription: Uuid,
        position: Position,
    ) -> Result<Vec<Directive>, Error> {
        if self.is_closed() {
            return Err(invalid_state_error());
        }

        if !self.owns_subscription(subscription) {
            tracing::warn!("discarding position from stale subscription");
            return Ok(vec![]);
        }

        if !position.coordinates.is_valid() {
            return Err(invalid_input_error());
        }

        let waypoints = Waypoints {
            origin: position.coordinates,
            destination: self.destination(),
        };

        match self.status {
            Status::AwaitingFix => {
                let control = RouteControl::new(waypoints);
                self.control = Some(control.clone());
                self.status = Status::Routing;

                if self.mode == AcquisitionMode::OneShot {
                    // a single fix ends a one-shot locate
                    self.subscription = None;
                }

                Ok(vec![Directive::CreateRouteControl { control }])
            }
            Status::Routing if self.mode == AcquisitionMode::Tracking => {
                let control = self
                    .control
                    .as_mut()
                    .ok_or_else(|| invalid_state_error())?;
                control.set_waypoints(waypoints);

                Ok(vec![Directive::SetWaypoints {
                    control_id: control.id,
                    waypoints,
                }])
            }
            Status::LocationUnavailable => Err(location_unavailable_error()),
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(session = %self.id))]
    pub fn location_failed(
        &mut self,
        subscription: Uuid,
        error: LocationError,
    ) -> Result<Vec<Directive>, Error> {
        if self.is_closed() {
            return Err(invalid_state_error());
        }

        if !self.owns_subscription(subscription) {
            tracing::warn!("discarding location error from stale subscription");
            return Ok(vec![]);
        }

        match self.status {
            Status::AwaitingFix | Status::Routing => {
                tracing::warn!(kind = ?error.kind, "location unavailable");

                self.status = Status::LocationUnavailable;

                let mut directives: Vec<Directive> = self.unsubscribe().into_iter().collect();
                directives.push(Directive::Alert {
                    message: LOCATION_UNAVAILABLE_ALERT.into(),
                });

                Ok(directives)
            }
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip(self, routes), fields(session = %self.id))]
    pub fn routes_found(
        &mut self,
        control_id: Uuid,
        routes: &[RouteSummary],
    ) -> Result<Vec<Directive>, Error> {
        if self.is_closed() {
            return Err(invalid_state_error());
        }

        match &self.control {
            Some(control) if control.id == control_id => {}
            _ => {
                tracing::warn!("discarding routes from a stale route control");
                return Ok(vec![]);
            }
        }

        let mut directives = Vec::new();

        match first_instruction(routes) {
            RoutesOutcome::NoRoute => {
                tracing::warn!(venue = self.venue.name(), "no route found");
                directives.push(Directive::Alert {
                    message: format!("No route found to {}.", self.venue.name()),
                });
            }
            RoutesOutcome::NoInstruction => {}
            RoutesOutcome::Instruction(text) => {
                self.guide.announce(&mut directives, text);
            }
        }

        Ok(directives)
    }

    /// Cancels the current subscription and route, then starts over towards
    /// `venue` with a fresh welcome.
    #[tracing::instrument(skip(self, welcome), fields(session = %self.id))]
    pub fn change_venue(&mut self, venue: Venue, welcome: &str) -> Result<Vec<Directive>, Error> {
        if self.is_closed() {
            return Err(invalid_state_error());
        }

        let mut directives = self.teardown();

        self.venue = venue;
        self.guide.reset();
        directives.extend(self.begin());
        self.guide.announce(&mut directives, welcome);

        Ok(directives)
    }

    #[tracing::instrument(skip(self), fields(session = %self.id))]
    pub fn close(&mut self) -> Result<Vec<Directive>, Error> {
        if self.is_closed() {
            return Err(invalid_state_error());
        }

        let directives = self.teardown();
        self.status = Status::Closed;

        Ok(directives)
    }

    fn teardown(&mut self) -> Vec<Directive> {
        let mut directives: Vec<Directive> = self.unsubscribe().into_iter().collect();

        if let Some(control) = self.control.take() {
            directives.push(Directive::RemoveRouteControl {
                control_id: control.id,
            });
        }
        directives.push(Directive::CancelSpeech);

        directives
    }
}

#[cfg(test)]
fn subscription_of(session: &RouteSession) -> Uuid {
    session.subscription.unwrap()
}

#[cfg(test)]
fn route(texts: &[&str]) -> RouteSummary {
    use crate::entities::Instruction;

    RouteSummary {
        instructions: texts
            .iter()
            .map(|text| Instruction {
                text: (*text).into(),
                distance: 100.0,
                time: 20.0,
            })
            .collect(),
        ..Default::default()
    }
}

#[cfg(test)]
fn permission_denied() -> LocationError {
    use crate::entities::LocationErrorKind;

    LocationError {
        kind: LocationErrorKind::PermissionDenied,
        message: None,
    }
}

#[test]
fn start_places_marker_subscribes_and_welcomes() {
    let (session, directives) =
        RouteSession::start(Venue::SaftecHotels, AcquisitionMode::Tracking, "Welcome");

    assert_eq!(session.status, Status::AwaitingFix);
    assert_eq!(
        directives[0],
        Directive::PlaceMarker {
            coordinates: Coordinates {
                lat: 9.589305,
                lng: 6.541952
            },
            label: "Destination: SAFTEC Hotels".into(),
        }
    );
    assert_eq!(
        directives[1],
        Directive::WatchPosition {
            subscription: subscription_of(&session),
            options: LocateOptions::tracking(),
        }
    );
    assert_eq!(directives[2], Directive::CancelSpeech);
    assert_eq!(
        directives[3],
        Directive::Speak {
            text: "Welcome".into()
        }
    );
}

#[test]
fn tracking_creates_then_updates_one_control() {
    let (mut session, _) =
        RouteSession::start(Venue::Reception, AcquisitionMode::Tracking, "Welcome");
    let subscription = subscription_of(&session);

    let first = session
        .update_position(subscription, Position::new(9.60, 6.50))
        .unwrap();
    let control = match &first[..] {
        [Directive::CreateRouteControl { control }] => control.clone(),
        other => panic!("unexpected directives: {:?}", other),
    };
    assert_eq!(control.waypoints.destination, Venue::Reception.coordinates());

    let second = session
        .update_position(subscription, Position::new(9.61, 6.51))
        .unwrap();
    assert_eq!(
        second,
        vec![Directive::SetWaypoints {
            control_id: control.id,
            waypoints: Waypoints {
                origin: Coordinates {
                    lat: 9.61,
                    lng: 6.51
                },
                destination: Venue::Reception.coordinates(),
            },
        }]
    );
    assert_eq!(session.control.as_ref().unwrap().id, control.id);
    assert_eq!(session.status, Status::Routing);
}

#[test]
fn one_shot_creates_exactly_one_control() {
    let (mut session, directives) =
        RouteSession::start(Venue::ChurchWedding, AcquisitionMode::OneShot, "Welcome");
    let subscription = subscription_of(&session);
    assert!(directives
        .iter()
        .any(|d| matches!(d, Directive::LocateOnce { .. })));

    let first = session
        .update_position(subscription, Position::new(9.60, 6.50))
        .unwrap();
    assert!(matches!(&first[..], [Directive::CreateRouteControl { .. }]));
    assert_eq!(session.subscription, None);

    let second = session
        .update_position(subscription, Position::new(9.61, 6.51))
        .unwrap();
    assert!(second.is_empty());
}

#[test]
fn location_failure_alerts_once_without_a_route() {
    let (mut session, _) =
        RouteSession::start(Venue::SaftecHotels, AcquisitionMode::Tracking, "Welcome");
    let subscription = subscription_of(&session);

    let first = session
        .location_failed(subscription, permission_denied())
        .unwrap();
    let second = session
        .location_failed(subscription, permission_denied())
        .unwrap();

    let alerts = first
        .iter()
        .chain(second.iter())
        .filter(|d| matches!(d, Directive::Alert { message: _ }))
        .count();
    assert_eq!(alerts, 1);
    assert!(first.contains(&Directive::ClearWatch { subscription }));
    assert!(session.control.is_none());
    assert_eq!(session.status, Status::LocationUnavailable);

    let late = session
        .update_position(subscription, Position::new(9.6, 6.5))
        .unwrap();
    assert!(late.is_empty());
    assert!(session.control.is_none());
}

#[test]
fn one_shot_failure_alerts() {
    let (mut session, _) =
        RouteSession::start(Venue::Reception, AcquisitionMode::OneShot, "Welcome");
    let subscription = subscription_of(&session);

    let directives = session
        .location_failed(subscription, permission_denied())
        .unwrap();

    assert_eq!(
        directives.last(),
        Some(&Directive::Alert {
            message: LOCATION_UNAVAILABLE_ALERT.into()
        })
    );
    assert!(session.control.is_none());
}

#[test]
fn routes_found_speaks_first_instruction_once() {
    let (mut session, _) =
        RouteSession::start(Venue::SaftecHotels, AcquisitionMode::Tracking, "Welcome");
    let subscription = subscription_of(&session);
    session
        .update_position(subscription, Position::new(9.6, 6.5))
        .unwrap();
    let control_id = session.control.as_ref().unwrap().id;

    let first = session
        .routes_found(control_id, &[route(&["Head east", "Turn left"])])
        .unwrap();
    assert_eq!(
        first,
        vec![
            Directive::CancelSpeech,
            Directive::Speak {
                text: "Head east".into()
            }
        ]
    );

    let repeated = session
        .routes_found(control_id, &[route(&["Head east"])])
        .unwrap();
    assert!(repeated.is_empty());

    let changed = session
        .routes_found(control_id, &[route(&["Turn left"])])
        .unwrap();
    assert_eq!(changed[0], Directive::CancelSpeech);
    assert_eq!(
        changed[1],
        Directive::Speak {
            text: "Turn left".into()
        }
    );
}

#[test]
fn no_route_alerts_and_empty_instructions_are_silent() {
    let (mut session, _) =
        RouteSession::start(Venue::SaftecHotels, AcquisitionMode::Tracking, "Welcome");
    let subscription = subscription_of(&session);
    session
        .update_position(subscription, Position::new(9.6, 6.5))
        .unwrap();
    let control_id = session.control.as_ref().unwrap().id;

    let none = session.routes_found(control_id, &[]).unwrap();
    assert_eq!(
        none,
        vec![Directive::Alert {
            message: "No route found to SAFTEC Hotels.".into()
        }]
    );

    let silent = session.routes_found(control_id, &[route(&[])]).unwrap();
    assert!(silent.is_empty());
}

#[test]
fn changing_venue_cancels_and_restarts() {
    let (mut session, _) =
        RouteSession::start(Venue::Reception, AcquisitionMode::Tracking, "Welcome");
    let old_subscription = subscription_of(&session);
    session
        .update_position(old_subscription, Position::new(9.6, 6.5))
        .unwrap();
    let old_control = session.control.as_ref().unwrap().id;
    session
        .routes_found(old_control, &[route(&["Head north"])])
        .unwrap();

    let directives = session
        .change_venue(Venue::WhitehillsHotel, "Welcome")
        .unwrap();

    assert_eq!(
        directives[0],
        Directive::ClearWatch {
            subscription: old_subscription
        }
    );
    assert_eq!(
        directives[1],
        Directive::RemoveRouteControl {
            control_id: old_control
        }
    );
    assert_eq!(directives[2], Directive::CancelSpeech);
    assert_eq!(
        directives[3],
        Directive::PlaceMarker {
            coordinates: Venue::WhitehillsHotel.coordinates(),
            label: "Destination: WhiteHills Luxery Hotel".into(),
        }
    );
    assert!(matches!(directives[4], Directive::WatchPosition { .. }));
    // the welcome is replayed even though it was already spoken
    assert_eq!(
        &directives[5..],
        &[
            Directive::CancelSpeech,
            Directive::Speak {
                text: "Welcome".into()
            }
        ]
    );
    assert!(session.control.is_none());
    assert_eq!(session.guide.last_spoken(), Some("Welcome"));
    assert_ne!(session.subscription, Some(old_subscription));

    // the previous watcher and control are no longer heard
    let stale = session
        .update_position(old_subscription, Position::new(9.6, 6.5))
        .unwrap();
    assert!(stale.is_empty());
    let stale = session
        .routes_found(old_control, &[route(&["Head north"])])
        .unwrap();
    assert!(stale.is_empty());

    let fresh = session
        .update_position(subscription_of(&session), Position::new(9.6, 6.5))
        .unwrap();
    match &fresh[..] {
        [Directive::CreateRouteControl { control }] => {
            assert_eq!(
                control.waypoints.destination,
                Venue::WhitehillsHotel.coordinates()
            )
        }
        other => panic!("unexpected directives: {:?}", other),
    }
}

#[test]
fn closed_session_rejects_events() {
    let (mut session, _) =
        RouteSession::start(Venue::Reception, AcquisitionMode::Tracking, "Welcome");
    let subscription = subscription_of(&session);

    let directives = session.close().unwrap();
    assert_eq!(directives[0], Directive::ClearWatch { subscription });
    assert!(session.is_closed());

    let err = session
        .update_position(subscription, Position::new(9.6, 6.5))
        .unwrap_err();
    assert_eq!(err.code, 100);
    assert_eq!(session.close().unwrap_err().code, 100);
}

#[test]
fn invalid_coordinates_are_rejected() {
    let (mut session, _) =
        RouteSession::start(Venue::Reception, AcquisitionMode::Tracking, "Welcome");
    let subscription = subscription_of(&session);

    let err = session
        .update_position(subscription, Position::new(120.0, 6.5))
        .unwrap_err();
    assert_eq!(err.code, 101);
    assert!(session.control.is_none());
}

#[test]
fn idle_sessions_expire_after_the_ttl() {
    let (mut session, _) =
        RouteSession::start(Venue::Reception, AcquisitionMode::Tracking, "Welcome");
    let ttl = Duration::minutes(30);
    let start = session.last_active_at;

    assert!(!session.is_idle(start + Duration::minutes(29), ttl));
    assert!(session.is_idle(start + ttl, ttl));

    session.touch(start + Duration::minutes(20));
    assert!(!session.is_idle(start + ttl, ttl));
}
