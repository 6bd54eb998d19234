use super::Engine;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{
    api::AssetAPI,
    entities::{is_carousel_name, sort_carousel, Asset, AssetKind, MediaItem, MediaType},
    error::{asset_missing_error, invalid_input_error, io_error, Error},
};

impl Engine {
    fn asset_path(&self, kind: AssetKind) -> &PathBuf {
        let assets = &self.config.assets;

        match kind {
            AssetKind::Invitation => &assets.invitation,
            AssetKind::ProgramImage => &assets.program_image,
            AssetKind::ProgramPdf => &assets.program_pdf,
        }
    }
}

fn missing_or_io(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => {
            tracing::warn!("asset not found at `{}`", path.display());
            asset_missing_error(&path.display().to_string())
        }
        _ => io_error(err),
    }
}

#[async_trait]
impl AssetAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_asset(&self, kind: AssetKind) -> Result<Asset, Error> {
        let path = self.asset_path(kind);

        let metadata = fs::metadata(path)
            .await
            .map_err(|err| missing_or_io(path, err))?;

        if !metadata.is_file() {
            return Err(asset_missing_error(&path.display().to_string()));
        }

        Ok(Asset::new(kind, path.clone(), metadata.len()))
    }

    #[tracing::instrument(skip(self))]
    async fn read_asset(&self, kind: AssetKind) -> Result<(Asset, Vec<u8>), Error> {
        let asset = self.find_asset(kind).await?;

        let data = fs::read(&asset.path)
            .await
            .map_err(|err| missing_or_io(&asset.path, err))?;

        Ok((asset, data))
    }

    #[tracing::instrument(skip(self))]
    async fn list_media(&self) -> Result<Vec<MediaItem>, Error> {
        let dir = &self.config.assets.media_dir;

        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|err| missing_or_io(dir, err))?;

        let mut items = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();

            if !is_carousel_name(&name) {
                continue;
            }

            // unreadable entries are skipped, not fatal
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("skipping media `{}`: {}", name, err);
                    continue;
                }
            };
            let modified = match metadata.modified() {
                Ok(modified) => modified,
                Err(err) => {
                    tracing::warn!("skipping media `{}`: {}", name, err);
                    continue;
                }
            };

            items.push(MediaItem {
                media_type: MediaType::from_path(Path::new(&name)),
                name,
                modified: DateTime::<Utc>::from(modified),
            });
        }

        sort_carousel(&mut items);

        Ok(items)
    }

    #[tracing::instrument(skip(self))]
    async fn read_media(&self, name: &str) -> Result<(MediaItem, Vec<u8>), Error> {
        if !is_carousel_name(name) {
            return Err(invalid_input_error());
        }

        let path = self.config.assets.media_dir.join(name);

        let metadata = fs::metadata(&path)
            .await
            .map_err(|err| missing_or_io(&path, err))?;
        let data = fs::read(&path)
            .await
            .map_err(|err| missing_or_io(&path, err))?;

        let item = MediaItem {
            name: name.into(),
            media_type: MediaType::from_path(&path),
            modified: DateTime::<Utc>::from(metadata.modified()?),
        };

        Ok((item, data))
    }
}

#[cfg(test)]
fn engine_with_assets(root: &Path) -> Engine {
    use crate::config::Config;

    let root = root.to_path_buf();
    let config = Config::from_lookup(move |key| {
        let path = match key {
            "NUPTIAE_INVITATION" => root.join("invitation_card.pdf"),
            "NUPTIAE_PROGRAM_IMAGE" => root.join("wedding_program.jpeg"),
            "NUPTIAE_PROGRAM_PDF" => root.join("wedding_program.pdf"),
            "NUPTIAE_MEDIA_DIR" => root.join("media"),
            _ => return None,
        };
        Some(path.to_string_lossy().into_owned())
    })
    .unwrap();

    Engine::new(config)
}

#[cfg(test)]
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nuptiae-{}-{}", name, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_assets_are_reported_not_fatal() {
    use tokio_test::block_on;

    let root = scratch_dir("missing");
    let engine = engine_with_assets(&root);

    let err = block_on(engine.find_asset(AssetKind::Invitation)).unwrap_err();
    assert_eq!(err.code, 103);
    assert!(err.message.contains("invitation_card.pdf"));

    let err = block_on(engine.list_media()).unwrap_err();
    assert_eq!(err.code, 103);

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn reads_configured_assets() {
    use tokio_test::block_on;

    let root = scratch_dir("read");
    std::fs::write(root.join("invitation_card.pdf"), b"%PDF-1.4").unwrap();
    let engine = engine_with_assets(&root);

    let (asset, data) = block_on(engine.read_asset(AssetKind::Invitation)).unwrap();
    assert!(asset.is_pdf());
    assert_eq!(asset.file_name, "invitation_card.pdf");
    assert_eq!(asset.size, 8);
    assert_eq!(data, b"%PDF-1.4");

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn carousel_is_filtered_and_ordered_by_mtime() {
    use std::time::{Duration, SystemTime};
    use tokio_test::block_on;

    let root = scratch_dir("carousel");
    let media = root.join("media");
    std::fs::create_dir_all(&media).unwrap();

    let base = SystemTime::now() - Duration::from_secs(3600);
    for (name, offset) in [("c.png", 10), ("a.jpg", 30), ("b.JPEG", 20), ("notes.txt", 0)] {
        let path = media.join(name);
        std::fs::write(&path, b"x").unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(base + Duration::from_secs(offset)).unwrap();
    }
    std::fs::create_dir_all(media.join("album.jpg")).unwrap();

    let engine = engine_with_assets(&root);
    let items = block_on(engine.list_media()).unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();

    assert_eq!(names, vec!["c.png", "b.JPEG", "a.jpg"]);

    let (item, data) = block_on(engine.read_media("a.jpg")).unwrap();
    assert_eq!(item.media_type, MediaType::Jpeg);
    assert_eq!(data, b"x");

    let err = block_on(engine.read_media("../invitation_card.pdf")).unwrap_err();
    assert_eq!(err.code, 101);

    let err = block_on(engine.read_media("missing.png")).unwrap_err();
    assert_eq!(err.code, 103);

    std::fs::remove_dir_all(&root).unwrap();
}
