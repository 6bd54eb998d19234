use axum::extract::{Extension, Json};
use chrono::Utc;

use crate::api::DynAPI;
use crate::entities::CountdownStatus;
use crate::error::Error;

pub async fn status(Extension(api): Extension<DynAPI>) -> Result<Json<CountdownStatus>, Error> {
    let status = api.countdown_status(Utc::now()).await?;

    Ok(status.into())
}
