use axum::extract::Extension;
use axum::response::Html;
use chrono::Utc;

use crate::api::DynAPI;
use crate::entities::AssetKind;
use crate::error::Error;
use crate::html::{render_index, IndexView};

pub async fn index(Extension(api): Extension<DynAPI>) -> Result<Html<String>, Error> {
    // a missing asset only costs its own section, so these are not `?`-ed
    let (invitation, program_image, program_pdf, media) = futures::join!(
        api.find_asset(AssetKind::Invitation),
        api.find_asset(AssetKind::ProgramImage),
        api.find_asset(AssetKind::ProgramPdf),
        api.list_media(),
    );

    let venues = api.list_venues().await?;
    let countdown = api.countdown_status(Utc::now()).await?;
    let config = api.config();

    let view = IndexView {
        couple: &config.couple,
        invitation,
        program_image,
        program_pdf,
        media,
        venues,
        event_start: config.event_start,
        livestream_url: &config.livestream_url,
        countdown,
    };

    Ok(Html(render_index(&view)))
}
