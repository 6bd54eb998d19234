mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::server::handlers::{assets, livestream, navigation, pages, venues};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/venues", get(venues::list))
        .route("/venues/select", get(venues::select))
        .route("/navigation", post(navigation::start))
        .route(
            "/navigation/:id",
            get(navigation::find).delete(navigation::end),
        )
        .route("/navigation/:id/position", post(navigation::position))
        .route(
            "/navigation/:id/location_error",
            post(navigation::location_error),
        )
        .route("/navigation/:id/routes", post(navigation::routes))
        .route("/navigation/:id/venue", patch(navigation::change_venue))
        .route("/livestream/status", get(livestream::status))
        .route("/assets/invitation", get(assets::invitation))
        .route("/assets/program/image", get(assets::program_image))
        .route("/assets/program/pdf", get(assets::program_pdf))
        .route("/assets/media", get(assets::list_media))
        .route("/assets/media/:name", get(assets::media))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("server error: {}", err);
    }
}
