use axum::extract::{Extension, Json, Path, Query};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{AssetKind, MediaItem};
use crate::error::Error;

#[derive(Default, Serialize, Deserialize)]
pub struct DownloadParams {
    #[serde(default)]
    download: bool,
}

async fn serve_asset(api: DynAPI, kind: AssetKind, params: DownloadParams) -> Result<Response, Error> {
    let (asset, data) = api.read_asset(kind).await?;

    let disposition = match params.download {
        true => format!("attachment; filename=\"{}\"", asset.file_name.replace('"', "")),
        false => "inline".into(),
    };

    Ok((
        [
            (header::CONTENT_TYPE, asset.media_type.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

pub async fn invitation(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, Error> {
    serve_asset(api, AssetKind::Invitation, params).await
}

pub async fn program_image(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, Error> {
    serve_asset(api, AssetKind::ProgramImage, params).await
}

pub async fn program_pdf(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, Error> {
    serve_asset(api, AssetKind::ProgramPdf, params).await
}

pub async fn list_media(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<MediaItem>>, Error> {
    let items = api.list_media().await?;

    Ok(items.into())
}

pub async fn media(
    Extension(api): Extension<DynAPI>,
    Path(name): Path<String>,
) -> Result<Response, Error> {
    let (item, data) = api.read_media(&name).await?;

    Ok((
        [(header::CONTENT_TYPE, item.media_type.content_type())],
        data,
    )
        .into_response())
}
