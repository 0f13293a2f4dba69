// SPDX-License-Identifier: MPL-2.0
//! Turns a path into something the session can display.

use super::image::{load_animation, load_image, AnimationData, ImageData};
use super::video::VideoSource;
use super::{detect_media_kind, MediaKind};
use crate::error::{Error, Result};
use std::path::Path;

/// Result of a successful load, one variant per [`MediaKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedMedia {
    StillImage(ImageData),
    AnimatedImage(AnimationData),
    /// Videos are not decoded up front; the backend opens them.
    Video(VideoSource),
}

impl LoadedMedia {
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::StillImage(_) => MediaKind::StillImage,
            Self::AnimatedImage(_) => MediaKind::AnimatedImage,
            Self::Video(_) => MediaKind::Video,
        }
    }

    /// Frame count for animations. Videos report `None` until the backend
    /// has opened them; still images have no duration at all.
    #[must_use]
    pub fn frame_count(&self) -> Option<usize> {
        match self {
            Self::AnimatedImage(anim) => Some(anim.frame_count()),
            _ => None,
        }
    }

    /// Pixel dimensions, when known without a backend.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Self::StillImage(image) => Some((image.width, image.height)),
            Self::AnimatedImage(anim) => Some((anim.width, anim.height)),
            Self::Video(_) => None,
        }
    }
}

/// Loads media from a path. Implemented by the filesystem loader and by
/// test fakes.
pub trait MediaLoader {
    /// # Errors
    ///
    /// Returns [`Error::MediaDecode`] for unsupported or corrupt files and
    /// [`Error::Io`] for unreadable ones.
    fn load(&mut self, path: &Path) -> Result<LoadedMedia>;
}

/// Loader backed by the filesystem and the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMediaLoader;

impl MediaLoader for FsMediaLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedMedia> {
        let kind = detect_media_kind(path).ok_or_else(|| {
            Error::MediaDecode(format!("unsupported file type: {}", path.display()))
        })?;

        let media = match kind {
            MediaKind::StillImage => LoadedMedia::StillImage(load_image(path)?),
            MediaKind::AnimatedImage => LoadedMedia::AnimatedImage(load_animation(path)?),
            MediaKind::Video => {
                if !path.is_file() {
                    return Err(Error::Io(format!("file not found: {}", path.display())));
                }
                LoadedMedia::Video(VideoSource::new(path))
            }
        };

        tracing::debug!(path = %path.display(), ?kind, "media decoded");
        Ok(media)
    }
}
