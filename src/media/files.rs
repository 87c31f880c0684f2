//! Local media file helpers shared by the picker and the upload gateway.

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::api::ReviewError;

use super::MediaKind;

const FILE_SCHEME: &str = "file://";

/// Bytes read from the start of a file for content sniffing.
const SNIFF_LEN: u64 = 8192;

/// Known extensions and their MIME types.
const MIME_TABLE: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("bmp", "image/bmp"),
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("3gp", "video/3gpp"),
    ("avi", "video/x-msvideo"),
];

/// Detects the MIME type from file contents.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|kind| kind.mime_type())
}

/// MIME type from the file header, falling back to the extension.
#[must_use]
pub fn detect_mime(path: &Utf8Path, header: &[u8]) -> Option<&'static str> {
    sniff_mime(header).or_else(|| mime_for_path(path))
}

/// Guesses the MIME type from a file extension.
#[must_use]
pub fn mime_for_path(path: &Utf8Path) -> Option<&'static str> {
    let extension = path.extension()?.to_ascii_lowercase();
    MIME_TABLE
        .iter()
        .find(|(known, _)| *known == extension)
        .map(|(_, mime)| *mime)
}

/// Returns the media kind implied by a MIME type.
#[must_use]
pub fn kind_for_mime(mime: &str) -> Option<MediaKind> {
    if mime.starts_with("image/") {
        Some(MediaKind::Photo)
    } else if mime.starts_with("video/") {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Formats a local path as a `file://` URI.
#[must_use]
pub fn file_uri(path: &Utf8Path) -> String {
    format!("{FILE_SCHEME}{path}")
}

/// Converts an attachment URI back into a local path.
///
/// Plain paths are accepted as-is; any scheme other than `file://` is
/// rejected.
///
/// # Errors
///
/// Returns [`ReviewError::UnsupportedMediaUri`] for remote or content URIs.
pub fn local_path_from_uri(uri: &str) -> Result<Utf8PathBuf, ReviewError> {
    if let Some(path) = uri.strip_prefix(FILE_SCHEME) {
        return Ok(Utf8PathBuf::from(path));
    }
    if uri.contains("://") || uri.is_empty() {
        return Err(ReviewError::UnsupportedMediaUri {
            uri: uri.to_owned(),
        });
    }
    Ok(Utf8PathBuf::from(uri))
}

/// Splits a path into its parent directory and file name.
fn split_path(path: &Utf8Path) -> Result<(&Utf8Path, &str), ReviewError> {
    let name = path.file_name().ok_or_else(|| ReviewError::MediaNotFound {
        path: path.to_string(),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Ok((parent, name))
}

fn map_io_error(path: &Utf8Path, error: &io::Error) -> ReviewError {
    if error.kind() == io::ErrorKind::NotFound {
        ReviewError::MediaNotFound {
            path: path.to_string(),
        }
    } else {
        ReviewError::Io {
            message: format!("failed to access '{path}': {error}"),
        }
    }
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), ReviewError> {
    let (parent, name) = split_path(path)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| map_io_error(path, &error))?;
    Ok((dir, name))
}

/// Checks that `path` names an existing regular file.
///
/// # Errors
///
/// Returns [`ReviewError::MediaNotFound`] when the file is missing or is not
/// a regular file, or [`ReviewError::Io`] for other access failures.
pub fn ensure_regular_file(path: &Utf8Path) -> Result<(), ReviewError> {
    let (dir, name) = open_parent(path)?;
    let metadata = dir
        .metadata(name)
        .map_err(|error| map_io_error(path, &error))?;
    if metadata.is_file() {
        Ok(())
    } else {
        Err(ReviewError::MediaNotFound {
            path: path.to_string(),
        })
    }
}

/// Reads the first bytes of a local media file for type detection.
///
/// # Errors
///
/// Returns [`ReviewError::MediaNotFound`] or [`ReviewError::Io`] when the
/// file cannot be read.
pub fn read_media_header(path: &Utf8Path) -> Result<Vec<u8>, ReviewError> {
    let (dir, name) = open_parent(path)?;
    let file = dir.open(name).map_err(|error| map_io_error(path, &error))?;
    let mut header = Vec::new();
    file.take(SNIFF_LEN)
        .read_to_end(&mut header)
        .map_err(|error| map_io_error(path, &error))?;
    Ok(header)
}

/// Reads the full contents of a local media file.
///
/// # Errors
///
/// Returns [`ReviewError::MediaNotFound`] or [`ReviewError::Io`] when the
/// file cannot be read.
pub fn read_media(path: &Utf8Path) -> Result<Vec<u8>, ReviewError> {
    let (dir, name) = open_parent(path)?;
    dir.read(name).map_err(|error| map_io_error(path, &error))
}

#[cfg(test)]
mod tests {
    use camino::Utf8Path;
    use rstest::rstest;

    use super::{detect_mime, kind_for_mime, local_path_from_uri, mime_for_path, sniff_mime};
    use crate::api::ReviewError;
    use crate::media::MediaKind;

    #[rstest]
    #[case("photo.JPG", Some("image/jpeg"))]
    #[case("clip.mov", Some("video/quicktime"))]
    #[case("notes.txt", None)]
    #[case("no_extension", None)]
    fn mime_lookup_is_case_insensitive(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(mime_for_path(Utf8Path::new(path)), expected);
    }

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];

    #[rstest]
    #[case::jpeg(JPEG_HEADER, Some("image/jpeg"))]
    #[case::png(PNG_HEADER, Some("image/png"))]
    #[case::plain_text(b"just some notes", None)]
    #[case::empty(b"", None)]
    fn sniffs_mime_from_contents(#[case] bytes: &[u8], #[case] expected: Option<&str>) {
        assert_eq!(sniff_mime(bytes), expected);
    }

    #[rstest]
    #[case::contents_beat_extension("shot.png", JPEG_HEADER, Some("image/jpeg"))]
    #[case::no_extension("snapshot", PNG_HEADER, Some("image/png"))]
    #[case::extension_fallback("clip.mov", b"not a header", Some("video/quicktime"))]
    #[case::unknown("notes", b"not a header", None)]
    fn detection_prefers_contents(
        #[case] path: &str,
        #[case] header: &[u8],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(detect_mime(Utf8Path::new(path), header), expected);
    }

    #[rstest]
    #[case("image/png", Some(MediaKind::Photo))]
    #[case("video/mp4", Some(MediaKind::Video))]
    #[case("application/pdf", None)]
    fn mime_maps_to_kind(#[case] mime: &str, #[case] expected: Option<MediaKind>) {
        assert_eq!(kind_for_mime(mime), expected);
    }

    #[test]
    fn file_uri_strips_scheme() {
        let path = local_path_from_uri("file:///tmp/a.png").expect("file URI should resolve");
        assert_eq!(path.as_str(), "/tmp/a.png");
    }

    #[test]
    fn content_uri_is_rejected() {
        let result = local_path_from_uri("content://media/external/images/1");
        assert!(
            matches!(result, Err(ReviewError::UnsupportedMediaUri { .. })),
            "expected UnsupportedMediaUri, got {result:?}"
        );
    }
}
