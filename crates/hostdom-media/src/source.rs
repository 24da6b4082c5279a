//! Image source classification and data-URI parsing

use std::path::PathBuf;

use url::Url;

use crate::LoadError;

/// Where an image source points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    DataUri(DataUri),
    Remote(Url),
    Local(PathBuf),
}

/// Parsed base64 data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Base64 payload (everything after the first comma)
    pub payload: String,
    /// File extension detected from the payload
    pub extension: &'static str,
}

impl DataUri {
    pub fn parse(src: &str) -> Result<Self, LoadError> {
        let (_, payload) = src.split_once(',').ok_or(LoadError::InvalidDataUri)?;
        let extension = extension_for_base64(payload).ok_or_else(|| {
            LoadError::UnknownEncoding(src.chars().take(32).collect())
        })?;
        Ok(Self {
            payload: payload.to_string(),
            extension,
        })
    }
}

/// Guess the file extension from the first character of a base64 payload.
///
/// The first byte of each format's magic number encodes to a fixed
/// character: JPEG `/`, PNG `i`, GIF `R`, WebP (RIFF) `U`.
pub fn extension_for_base64(payload: &str) -> Option<&'static str> {
    match payload.chars().next()? {
        '/' => Some("jpg"),
        'i' => Some("png"),
        'R' => Some("gif"),
        'U' => Some("webp"),
        _ => None,
    }
}

/// Classify an image `src`
pub fn classify_source(src: &str) -> Result<ImageSource, LoadError> {
    if src.starts_with("data:") {
        return DataUri::parse(src).map(ImageSource::DataUri);
    }
    match Url::parse(src) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map(ImageSource::Local)
            .map_err(|_| LoadError::Probe(format!("not a local file path: {src}"))),
        // Single-letter schemes are drive letters, not URLs
        Ok(url) if url.scheme().len() > 1 => Ok(ImageSource::Remote(url)),
        _ => Ok(ImageSource::Local(PathBuf::from(src))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(extension_for_base64("/9j/4AAQ"), Some("jpg"));
        assert_eq!(extension_for_base64("iVBORw0KGgo"), Some("png"));
        assert_eq!(extension_for_base64("R0lGODlh"), Some("gif"));
        assert_eq!(extension_for_base64("UklGRg"), Some("webp"));
        assert_eq!(extension_for_base64("PHN2Zz4="), None);
        assert_eq!(extension_for_base64(""), None);
    }

    #[test]
    fn test_parse_data_uri() {
        let uri = DataUri::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(uri.payload, "iVBORw0KGgo=");
        assert_eq!(uri.extension, "png");
    }

    #[test]
    fn test_parse_data_uri_errors() {
        assert!(matches!(DataUri::parse("data:image/png;base64"), Err(LoadError::InvalidDataUri)));
        assert!(matches!(
            DataUri::parse("data:image/svg+xml;base64,PHN2Zz4="),
            Err(LoadError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_classify() {
        assert!(matches!(classify_source("https://example.com/a.png"), Ok(ImageSource::Remote(_))));
        assert_eq!(
            classify_source("assets/a.png").unwrap(),
            ImageSource::Local(PathBuf::from("assets/a.png"))
        );
        assert_eq!(
            classify_source("/var/mobile/a.png").unwrap(),
            ImageSource::Local(PathBuf::from("/var/mobile/a.png"))
        );
        assert!(matches!(classify_source("data:,"), Err(LoadError::UnknownEncoding(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_file_url() {
        assert_eq!(
            classify_source("file:///tmp/a.png").unwrap(),
            ImageSource::Local(PathBuf::from("/tmp/a.png"))
        );
    }
}
