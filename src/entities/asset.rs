use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Invitation,
    ProgramImage,
    ProgramPdf,
}

impl AssetKind {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Invitation => "invitation card",
            Self::ProgramImage => "program image",
            Self::ProgramPdf => "program file",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Jpeg,
    Png,
    Pdf,
    Other,
}

impl MediaType {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            Some("png") => Self::Png,
            Some("pdf") => Self::Pdf,
            _ => Self::Other,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
            Self::Other => "application/octet-stream",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }
}

/// A configured file, known to exist when this is constructed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: MediaType,
    pub size: u64,
}

impl Asset {
    pub fn new(kind: AssetKind, path: PathBuf, size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = MediaType::from_path(&path);

        Self {
            kind,
            path,
            file_name,
            media_type,
            size,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == MediaType::Pdf
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaItem {
    pub name: String,
    pub media_type: MediaType,
    pub modified: DateTime<Utc>,
}

/// Carousel entries are single path segments with an image extension.
pub fn is_carousel_name(name: &str) -> bool {
    let plain = !name.is_empty() && name != ".." && !name.contains(['/', '\\']);

    plain && MediaType::from_path(Path::new(name)).is_image()
}

/// Oldest first; ties keep directory order.
pub fn sort_carousel(items: &mut [MediaItem]) {
    items.sort_by_key(|item| item.modified);
}

#[test]
fn media_types_from_extension() {
    assert_eq!(MediaType::from_path(Path::new("a/b/card.JPEG")), MediaType::Jpeg);
    assert_eq!(MediaType::from_path(Path::new("x.png")), MediaType::Png);
    assert_eq!(MediaType::from_path(Path::new("program.pdf")), MediaType::Pdf);
    assert_eq!(MediaType::from_path(Path::new("clip.gif")), MediaType::Other);
    assert_eq!(MediaType::from_path(Path::new("README")), MediaType::Other);
}

#[test]
fn carousel_name_filter() {
    assert!(is_carousel_name("first-dance.jpg"));
    assert!(is_carousel_name("Proposal.PNG"));
    assert!(!is_carousel_name("clip.mp4"));
    assert!(is_carousel_name("wedding..final.jpg"));
    assert!(!is_carousel_name("../secret.jpg"));
    assert!(!is_carousel_name("..\\secret.jpg"));
    assert!(!is_carousel_name("nested/photo.jpg"));
    assert!(!is_carousel_name(""));
}

#[test]
fn asset_file_name() {
    let asset = Asset::new(
        AssetKind::ProgramPdf,
        PathBuf::from("assets/wedding_program.pdf"),
        10,
    );

    assert_eq!(asset.file_name, "wedding_program.pdf");
    assert!(asset.is_pdf());
}
