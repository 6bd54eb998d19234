mod asset;
mod countdown;
mod directive;
mod location;
mod route;
mod session;
mod speech;
mod venue;

pub use asset::{is_carousel_name, sort_carousel, Asset, AssetKind, MediaItem, MediaType};
pub use countdown::{Countdown, CountdownStatus};
pub use directive::Directive;
pub use location::{Coordinates, LocateOptions, LocationError, LocationErrorKind, Position};
pub use route::{
    first_instruction, Instruction, RouteControl, RouteSummary, RoutesOutcome, RoutingOptions,
    Waypoints,
};
pub use session::{
    AcquisitionMode, RouteSession, Status as SessionStatus, LOCATION_UNAVAILABLE_ALERT,
};
pub use speech::{Speaker, SpeechGuide};
pub use venue::{select_venue, Venue, VenueListing};
