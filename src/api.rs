use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::entities::{
    AcquisitionMode, Asset, AssetKind, Coordinates, CountdownStatus, Directive, LocationError,
    MediaItem, Position, RouteSession, RouteSummary, VenueListing,
};
use crate::error::Error;

#[async_trait]
pub trait VenueAPI {
    async fn list_venues(&self) -> Result<Vec<VenueListing>, Error>;
    async fn select_venue(&self, name: &str) -> Result<Coordinates, Error>;
}

#[async_trait]
pub trait NavigationAPI {
    async fn start_navigation(
        &self,
        venue: &str,
        mode: AcquisitionMode,
    ) -> Result<(RouteSession, Vec<Directive>), Error>;

    async fn find_session(&self, id: Uuid) -> Result<RouteSession, Error>;

    async fn report_position(
        &self,
        id: Uuid,
        subscription: Uuid,
        position: Position,
    ) -> Result<Vec<Directive>, Error>;

    async fn report_location_error(
        &self,
        id: Uuid,
        subscription: Uuid,
        error: LocationError,
    ) -> Result<Vec<Directive>, Error>;

    async fn report_routes(
        &self,
        id: Uuid,
        control_id: Uuid,
        routes: Vec<RouteSummary>,
    ) -> Result<Vec<Directive>, Error>;

    async fn change_venue(&self, id: Uuid, venue: &str) -> Result<Vec<Directive>, Error>;

    async fn end_navigation(&self, id: Uuid) -> Result<Vec<Directive>, Error>;
}

#[async_trait]
pub trait AssetAPI {
    async fn find_asset(&self, kind: AssetKind) -> Result<Asset, Error>;
    async fn read_asset(&self, kind: AssetKind) -> Result<(Asset, Vec<u8>), Error>;
    async fn list_media(&self) -> Result<Vec<MediaItem>, Error>;
    async fn read_media(&self, name: &str) -> Result<(MediaItem, Vec<u8>), Error>;
}

#[async_trait]
pub trait LivestreamAPI {
    async fn countdown_status(&self, now: DateTime<Utc>) -> Result<CountdownStatus, Error>;
}

pub trait API: VenueAPI + NavigationAPI + AssetAPI + LivestreamAPI {
    fn config(&self) -> &Config;
}

pub type DynAPI = Arc<dyn API + Send + Sync>;
