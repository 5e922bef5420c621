/// Tag extraction using lofty
use crate::cover::cover_from_bytes;
use crate::error::MetadataError;
use groove_core::{traits::MetadataExtractor, types::MetadataPatch};
use lofty::{AudioFile, ItemKey, PictureType, TaggedFileExt};
use std::path::Path;
use tracing::{debug, warn};

/// Metadata extractor backed by lofty
///
/// Reads title, artist, album, duration, and the front cover (or first
/// picture). Anything missing is simply left out of the patch.
#[derive(Debug, Default)]
pub struct LoftyExtractor;

impl LoftyExtractor {
    pub fn new() -> Self {
        Self
    }

    fn read_tag(tag: &lofty::Tag, patch: &mut MetadataPatch) {
        for item in tag.items() {
            let slot = match item.key() {
                ItemKey::TrackTitle => &mut patch.title,
                ItemKey::TrackArtist => &mut patch.artist,
                ItemKey::AlbumTitle => &mut patch.album,
                _ => continue,
            };
            if slot.is_none() {
                *slot = item.value().text().map(str::to_string);
            }
        }
    }

    fn read_cover(tag: &lofty::Tag, path: &Path, patch: &mut MetadataPatch) {
        let pictures = tag.pictures();
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first());

        let Some(picture) = picture else {
            return;
        };

        match cover_from_bytes(picture.data()) {
            Ok(cover) => patch.cover = Some(cover),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping cover art"),
        }
    }
}

impl MetadataExtractor for LoftyExtractor {
    fn extract(&self, path: &Path) -> groove_core::Result<MetadataPatch> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()).into());
        }

        let tagged_file = lofty::read_from_path(path).map_err(MetadataError::from)?;

        let mut patch = MetadataPatch::default();
        let duration = tagged_file.properties().duration().as_secs_f64();
        if duration > 0.0 {
            patch.duration_seconds = Some(duration);
        }

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());
        if let Some(tag) = tag {
            Self::read_tag(tag, &mut patch);
            Self::read_cover(tag, path, &mut patch);
        }

        debug!(
            path = %path.display(),
            has_title = patch.title.is_some(),
            has_cover = patch.cover.is_some(),
            "Extracted metadata"
        );
        Ok(patch)
    }
}
