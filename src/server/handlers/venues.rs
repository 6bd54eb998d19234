use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Coordinates, VenueListing};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct SelectParams {
    name: String,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<VenueListing>>, Error> {
    let venues = api.list_venues().await?;

    Ok(venues.into())
}

pub async fn select(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SelectParams>,
) -> Result<Json<Coordinates>, Error> {
    let coordinates = api.select_venue(&params.name).await?;

    Ok(coordinates.into())
}
