use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{
    AcquisitionMode, Directive, LocationError, LocationErrorKind, Position, RouteSession,
    RouteSummary,
};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct StartParams {
    venue: String,
    #[serde(default)]
    mode: AcquisitionMode,
}

#[derive(Serialize, Deserialize)]
pub struct StartResponse {
    session: RouteSession,
    directives: Vec<Directive>,
}

#[derive(Serialize, Deserialize)]
pub struct PositionParams {
    subscription: Uuid,
    position: Position,
}

/// Mirrors the browser's `GeolocationPositionError`.
#[derive(Serialize, Deserialize)]
pub struct LocationErrorParams {
    subscription: Uuid,
    code: u16,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RoutesParams {
    control_id: Uuid,
    #[serde(default)]
    routes: Vec<RouteSummary>,
}

#[derive(Serialize, Deserialize)]
pub struct ChangeVenueParams {
    venue: String,
}

pub async fn start(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<StartParams>,
) -> Result<Json<StartResponse>, Error> {
    let (session, directives) = api.start_navigation(&params.venue, params.mode).await?;

    Ok(StartResponse {
        session,
        directives,
    }
    .into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteSession>, Error> {
    let session = api.find_session(id).await?;

    Ok(session.into())
}

pub async fn position(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<PositionParams>,
) -> Result<Json<Vec<Directive>>, Error> {
    let directives = api
        .report_position(id, params.subscription, params.position)
        .await?;

    Ok(directives.into())
}

pub async fn location_error(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<LocationErrorParams>,
) -> Result<Json<Vec<Directive>>, Error> {
    let error = LocationError {
        kind: LocationErrorKind::from_code(params.code),
        message: params.message,
    };

    let directives = api
        .report_location_error(id, params.subscription, error)
        .await?;

    Ok(directives.into())
}

pub async fn routes(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<RoutesParams>,
) -> Result<Json<Vec<Directive>>, Error> {
    let directives = api
        .report_routes(id, params.control_id, params.routes)
        .await?;

    Ok(directives.into())
}

pub async fn change_venue(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<ChangeVenueParams>,
) -> Result<Json<Vec<Directive>>, Error> {
    let directives = api.change_venue(id, &params.venue).await?;

    Ok(directives.into())
}

pub async fn end(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Directive>>, Error> {
    let directives = api.end_navigation(id).await?;

    Ok(directives.into())
}
