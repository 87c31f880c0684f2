//! Picker backed by a path the user typed into the screen.

use async_trait::async_trait;
use camino::Utf8PathBuf;

use crate::api::ReviewError;

use super::files::{detect_mime, ensure_regular_file, file_uri, kind_for_mime, read_media_header};
use super::{MediaPickRequest, MediaPicker, PickedAsset};

/// Resolves a user-selected local file into a [`PickedAsset`].
///
/// The selection is captured when the picker is built; an empty selection
/// means the user dismissed the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFileMediaPicker {
    selection: Option<Utf8PathBuf>,
}

impl LocalFileMediaPicker {
    /// Picker for the given selection; `None` or a blank path cancels.
    #[must_use]
    pub fn new(selection: Option<Utf8PathBuf>) -> Self {
        let selection = selection.filter(|path| !path.as_str().trim().is_empty());
        Self { selection }
    }

    /// Picker that behaves as if the user cancelled.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self { selection: None }
    }

    fn resolve(&self, request: MediaPickRequest) -> Result<Option<PickedAsset>, ReviewError> {
        let Some(path) = self.selection.as_deref() else {
            return Ok(None);
        };

        ensure_regular_file(path)?;

        let header = read_media_header(path)?;
        let mime = detect_mime(path, &header);
        if mime.and_then(kind_for_mime) != Some(request.kind) {
            return Err(ReviewError::MediaKindMismatch {
                path: path.to_string(),
                expected: request.kind.label().to_owned(),
            });
        }

        Ok(Some(PickedAsset {
            uri: file_uri(path),
            mime_type: mime.map(ToOwned::to_owned),
            file_name: path.file_name().map(ToOwned::to_owned),
        }))
    }
}

#[async_trait]
impl MediaPicker for LocalFileMediaPicker {
    async fn pick(&self, request: MediaPickRequest) -> Result<Option<PickedAsset>, ReviewError> {
        let picker = self.clone();
        tokio::task::spawn_blocking(move || picker.resolve(request))
            .await
            .map_err(|error| ReviewError::Io {
                message: format!("media picker task failed: {error}"),
            })?
    }
}
