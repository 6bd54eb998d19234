use chrono::{DateTime, FixedOffset};

use crate::entities::{Asset, AssetKind, CountdownStatus, MediaItem, VenueListing};
use crate::error::Error;

use super::{escape, livestream, navigation};

const STYLE: &str = r#"
<style>
  body { font-family: sans-serif; margin: 0 auto; max-width: 1200px; padding: 0 16px; }
  @keyframes marquee {
    0%   { transform: translate(0, 0); }
    100% { transform: translate(-100%, 0); }
  }
  .marquee { overflow: hidden; white-space: nowrap; }
  .marquee > div {
    display: inline-block; padding-left: 100%; animation: marquee 15s linear infinite;
    color: #d63384; font-size: 1.1em; font-weight: bold;
  }
  .tabs { display: flex; gap: 8px; border-bottom: 1px solid #ddd; margin: 12px 0; }
  .tabs button { border: none; background: none; padding: 8px 12px; cursor: pointer; font-size: 1em; }
  .tabs button.active { border-bottom: 3px solid #d63384; font-weight: bold; }
  .tab { display: none; }
  .tab.active { display: block; }
  .warning { background: #fff3cd; color: #664d03; padding: 8px 12px; border-radius: 6px; margin: 8px 0; }
  .info { background: #cff4fc; color: #055160; padding: 8px 12px; border-radius: 6px; margin: 8px 0; }
  .full-width { width: 100%; }
  .carousel-container { white-space: nowrap; overflow: hidden; width: 100%; margin-top: 10px; padding-bottom: 30px; }
  .carousel-img {
    display: inline-block; margin: 0 10px; height: 160px; border-radius: 12px;
    box-shadow: 0 2px 8px rgba(0,0,0,0.2); animation: scroll-left 30s linear infinite;
  }
  @keyframes scroll-left {
    0% { transform: translateX(100%); }
    100% { transform: translateX(-100%); }
  }
  footer { text-align: center; color: gray; font-size: 0.9em; padding: 16px 0; }
</style>
"#;

const TAB_SCRIPT: &str = r#"
<script>
document.querySelectorAll('.tabs button').forEach(function (button) {
  button.addEventListener('click', function () {
    document.querySelectorAll('.tabs button, .tab').forEach(function (el) { el.classList.remove('active'); });
    button.classList.add('active');
    document.getElementById(button.dataset.tab).classList.add('active');
    // let the map resize itself when its tab becomes visible
    window.dispatchEvent(new Event('resize'));
  });
});
</script>
"#;

pub struct IndexView<'a> {
    pub couple: &'a str,
    pub invitation: Result<Asset, Error>,
    pub program_image: Result<Asset, Error>,
    pub program_pdf: Result<Asset, Error>,
    pub media: Result<Vec<MediaItem>, Error>,
    pub venues: Vec<VenueListing>,
    pub event_start: DateTime<FixedOffset>,
    pub livestream_url: &'a str,
    pub countdown: CountdownStatus,
}

fn notice(class: &str, text: &str) -> String {
    format!(r#"<div class="{}">{}</div>"#, class, escape(text))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn asset_warning(kind: AssetKind, err: &Error) -> String {
    notice("warning", &format!("{}: {}.", capitalize(kind.description()), err.message))
}

fn asset_url(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Invitation => "/assets/invitation",
        AssetKind::ProgramImage => "/assets/program/image",
        AssetKind::ProgramPdf => "/assets/program/pdf",
    }
}

fn pdf_viewer(url: &str) -> String {
    format!(
        r#"<iframe src="{}" width="100%" height="600px" type="application/pdf"></iframe>"#,
        url
    )
}

fn download_link(asset: &Asset, label: &str) -> String {
    format!(
        r#"<p><a href="{}?download=true" download="{}">📥 {}</a></p>"#,
        asset_url(asset.kind),
        escape(&asset.file_name),
        escape(label)
    )
}

fn card_tab(view: &IndexView) -> String {
    let mut html = format!(
        r#"<h1 style="text-align: center;">{}'s Wedding 💍</h1>
<h3 style="text-align: center;">You're Invited!</h3>"#,
        escape(view.couple)
    );

    match &view.invitation {
        Ok(asset) => {
            if asset.is_pdf() {
                html.push_str(&pdf_viewer(asset_url(asset.kind)));
            } else {
                html.push_str(&format!(
                    r#"<figure><img class="full-width" src="{}" alt="Wedding Invitation" /><figcaption>Wedding Invitation - Pinch to Zoom on Mobile</figcaption></figure>"#,
                    asset_url(asset.kind)
                ));
            }
            html.push_str(&download_link(asset, "Download Invitation"));
        }
        Err(err) => html.push_str(&asset_warning(AssetKind::Invitation, err)),
    }

    match &view.media {
        Ok(items) if items.is_empty() => html.push_str(&notice(
            "info",
            "No images found in the media folder. Upload .jpg or .png files.",
        )),
        Ok(items) => {
            html.push_str("<hr><h2>Memories ❤️ (Swipe → or wait...)</h2>");
            html.push_str(r#"<div class="carousel-container">"#);
            for item in items {
                html.push_str(&format!(
                    r#"<img src="/assets/media/{}" class="carousel-img" alt="" />"#,
                    escape(&urlencoding::encode(&item.name))
                ));
            }
            html.push_str("</div>");
        }
        Err(_) => html.push_str(&notice(
            "warning",
            "Media folder not found. Please create it and add images.",
        )),
    }

    html
}

fn program_tab(view: &IndexView) -> String {
    let mut html = String::from(r#"<h1 style="text-align: center;">Wedding Program 📜</h1>"#);

    match &view.program_image {
        Ok(asset) => html.push_str(&format!(
            r#"<figure><img class="full-width" src="{}" alt="Wedding Program" /><figcaption>Wedding Program (Pinch to Zoom on Mobile)</figcaption></figure>"#,
            asset_url(asset.kind)
        )),
        Err(err) => {
            html.push_str(&asset_warning(AssetKind::ProgramImage, err));
            html.push_str(&notice("warning", "Preview image not found."));
        }
    }

    match &view.program_pdf {
        Ok(asset) => {
            html.push_str(&format!(
                "<details><summary>📄 Tap to View Full Wedding Program PDF</summary>{}</details><br>",
                pdf_viewer(asset_url(asset.kind))
            ));
            html.push_str(&download_link(asset, "Download Wedding Program"));
        }
        Err(err) => {
            html.push_str(&asset_warning(AssetKind::ProgramPdf, err));
            html.push_str(&notice("warning", "Wedding program PDF not found."));
        }
    }

    html
}

pub fn render_index(view: &IndexView) -> String {
    let couple = escape(view.couple);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{couple} Wedding</title>
{style}
</head>
<body>
<div class="marquee"><div>Please explore each section of {couple}'s wedding using the top tabs. 💕</div></div>
<nav class="tabs">
  <button class="active" data-tab="tab-card">💌 Wedding Card</button>
  <button data-tab="tab-program">📜 Wedding Program</button>
  <button data-tab="tab-navigation">📍 Wedding Navigation</button>
  <button data-tab="tab-livestream">🎥 Live Stream</button>
</nav>
<section id="tab-card" class="tab active">{card}</section>
<section id="tab-program" class="tab">{program}</section>
<section id="tab-navigation" class="tab">{navigation}</section>
<section id="tab-livestream" class="tab">{livestream}</section>
<footer><hr>With ❤️ from {couple} | © {year}</footer>
{tab_script}
</body>
</html>"#,
        couple = couple,
        style = STYLE,
        card = card_tab(view),
        program = program_tab(view),
        navigation = navigation::render(&view.venues),
        livestream = livestream::render(
            view.couple,
            view.event_start,
            view.livestream_url,
            view.countdown
        ),
        year = view.event_start.format("%Y"),
        tab_script = TAB_SCRIPT,
    )
}

#[cfg(test)]
fn view_without_assets() -> IndexView<'static> {
    use crate::entities::Venue;
    use crate::error::asset_missing_error;

    IndexView {
        couple: "Victor & Joy",
        invitation: Err(asset_missing_error("assets/invitation_card.jpeg")),
        program_image: Err(asset_missing_error("assets/wedding_program.jpeg")),
        program_pdf: Err(asset_missing_error("assets/wedding_program.pdf")),
        media: Err(asset_missing_error("assets/media")),
        venues: Venue::ALL.iter().copied().map(Into::into).collect(),
        event_start: DateTime::parse_from_rfc3339("2025-07-11T13:00:00+01:00").unwrap(),
        livestream_url: "https://example.com/live",
        countdown: CountdownStatus::Live,
    }
}

#[test]
fn missing_assets_render_inline_warnings() {
    let html = render_index(&view_without_assets());

    assert!(html.contains("Invitation card: asset not found at `assets/invitation_card.jpeg`."));
    assert!(html.contains("Wedding program PDF not found."));
    assert!(html.contains("Media folder not found."));
    // other sections still render
    assert!(html.contains(r#"id="tab-navigation""#));
    assert!(html.contains("SAFTEC Hotels"));
    assert!(html.contains("© 2025"));
}

#[test]
fn present_assets_render_viewers() {
    use chrono::Utc;
    use std::path::PathBuf;

    let mut view = view_without_assets();
    view.invitation = Ok(Asset::new(
        AssetKind::Invitation,
        PathBuf::from("assets/invitation_card.pdf"),
        100,
    ));
    view.program_pdf = Ok(Asset::new(
        AssetKind::ProgramPdf,
        PathBuf::from("assets/wedding_program.pdf"),
        100,
    ));
    view.media = Ok(vec![MediaItem {
        name: "first dance.jpg".into(),
        media_type: crate::entities::MediaType::Jpeg,
        modified: Utc::now(),
    }]);

    let html = render_index(&view);

    assert!(html.contains(r#"<iframe src="/assets/invitation""#));
    assert!(html.contains("/assets/invitation?download=true"));
    assert!(html.contains("Download Wedding Program"));
    assert!(html.contains("/assets/media/first%20dance.jpg"));

    view.media = Ok(vec![MediaItem {
        name: "a#b?.png".into(),
        media_type: crate::entities::MediaType::Png,
        modified: Utc::now(),
    }]);
    let html = render_index(&view);
    assert!(html.contains(r#"src="/assets/media/a%23b%3F.png""#));
}

#[test]
fn empty_media_folder_is_an_info_notice() {
    let mut view = view_without_assets();
    view.media = Ok(vec![]);

    let html = render_index(&view);

    assert!(html.contains(r#"<div class="info">No images found"#));
}
