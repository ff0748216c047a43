//! Publish path encoding.
//!
//! A published image is addressed by a path that carries every label's
//! geometry followed by the hosted image path:
//!
//! ```text
//! /{top}/{left}/{height}/{width}/{rotation}/.../image/{remote}
//! ```
//!
//! Labels appear in board order, one group of five numbers each.

use thiserror::Error;

use crate::geometry::AbsoluteRect;

/// Numbers per label in the path.
const FIELDS_PER_LABEL: usize = 5;

/// Errors raised while parsing a publish path.
#[derive(Debug, Error, PartialEq)]
pub enum PublishError {
    /// The path does not start with the route prefix.
    #[error("Path does not start with {0:?}")]
    MissingPrefix(String),

    /// The path has no image separator.
    #[error("Path has no {0:?} separator")]
    MissingSeparator(String),

    /// A label segment is not a number.
    #[error("Invalid label value {0:?}")]
    InvalidNumber(String),

    /// The label segments do not form whole groups of five.
    #[error("Expected a multiple of 5 label values, found {0}")]
    IncompleteLabel(usize),
}

/// Labels and image path recovered from a publish path.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedImage {
    pub labels: Vec<AbsoluteRect>,
    pub image_path: String,
}

/// Build the publish path for `labels` and a hosted image.
///
/// # Arguments
///
/// * `labels` - Committed label geometry, in display order
/// * `remote_path` - Image path on the host, without the viewer domain
/// * `separator` - Segment between the numbers and the image path, e.g. `"/image/"`
pub fn encode_publish_path(labels: &[AbsoluteRect], remote_path: &str, separator: &str) -> String {
    let params = labels
        .iter()
        .map(|label| {
            format!(
                "{}/{}/{}/{}/{}",
                label.top, label.left, label.height, label.width, label.rotation
            )
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("/{}{}{}", params, separator, remote_path)
}

/// Parse a path produced by [`encode_publish_path`].
///
/// `prefix` is the route the viewer is mounted on (`"/"` at the root). The
/// path is split at the first `separator`; everything after it is the image
/// path, untouched.
pub fn parse_publish_path(
    path: &str,
    prefix: &str,
    separator: &str,
) -> Result<PublishedImage, PublishError> {
    let (params, image_path) = path
        .split_once(separator)
        .ok_or_else(|| PublishError::MissingSeparator(separator.to_string()))?;

    // With no labels the path starts directly with the separator.
    let params = if params.is_empty() {
        params
    } else {
        params
            .strip_prefix(prefix)
            .ok_or_else(|| PublishError::MissingPrefix(prefix.to_string()))?
    };

    let values = params
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<f64>()
                .map_err(|_| PublishError::InvalidNumber(segment.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % FIELDS_PER_LABEL != 0 {
        return Err(PublishError::IncompleteLabel(values.len()));
    }

    let labels = values
        .chunks_exact(FIELDS_PER_LABEL)
        .map(|group| AbsoluteRect::new(group[0], group[1], group[3], group[2], group[4]))
        .collect();

    Ok(PublishedImage {
        labels,
        image_path: image_path.to_string(),
    })
}

/// Strip the host's viewer domain from a display URL.
///
/// A URL on another domain is returned unchanged.
pub fn remote_image_path<'a>(display_url: &'a str, viewer_domain: &str) -> &'a str {
    match display_url.strip_prefix(viewer_domain) {
        Some(path) => path,
        None => {
            log::warn!(
                "display url {} is not under {}, using it as is",
                display_url,
                viewer_domain
            );
            display_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEPARATOR: &str = "/image/";

    #[test]
    fn test_encode_orders_fields() {
        let labels = [AbsoluteRect::new(20.0, 30.0, 120.0, 25.0, 45.0)];
        assert_eq!(
            encode_publish_path(&labels, "abc/photo.jpg", SEPARATOR),
            "/20/30/25/120/45/image/abc/photo.jpg"
        );
    }

    #[test]
    fn test_encode_multiple_labels() {
        let labels = [
            AbsoluteRect::new(1.0, 2.0, 3.0, 4.0, 5.0),
            AbsoluteRect::new(6.5, -7.0, 8.0, 9.0, -10.25),
        ];
        assert_eq!(
            encode_publish_path(&labels, "x.png", SEPARATOR),
            "/1/2/4/3/5/6.5/-7/9/8/-10.25/image/x.png"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let labels = vec![
            AbsoluteRect::new(20.0, 20.0, 120.0, 25.0, 0.0),
            AbsoluteRect::new(80.5, 10.0, 200.0, 40.0, -12.5),
        ];
        let path = encode_publish_path(&labels, "abc/photo.jpg", SEPARATOR);
        let parsed = parse_publish_path(&path, "/", SEPARATOR).unwrap();
        assert_eq!(parsed.labels, labels);
        assert_eq!(parsed.image_path, "abc/photo.jpg");
    }

    #[test]
    fn test_parse_without_labels() {
        let path = encode_publish_path(&[], "x.png", SEPARATOR);
        let parsed = parse_publish_path(&path, "/", SEPARATOR).unwrap();
        assert!(parsed.labels.is_empty());
        assert_eq!(parsed.image_path, "x.png");
    }

    #[test]
    fn test_parse_with_route_prefix() {
        let parsed = parse_publish_path("/view/1/2/3/4/5/image/a/b", "/view/", SEPARATOR).unwrap();
        assert_eq!(parsed.labels, vec![AbsoluteRect::new(1.0, 2.0, 4.0, 3.0, 5.0)]);
        assert_eq!(parsed.image_path, "a/b");
    }

    #[test]
    fn test_parse_splits_at_first_separator() {
        let parsed = parse_publish_path("/1/2/3/4/5/image/a/image/b", "/", SEPARATOR).unwrap();
        assert_eq!(parsed.image_path, "a/image/b");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_publish_path("/1/2/3/4/5", "/", SEPARATOR),
            Err(PublishError::MissingSeparator(SEPARATOR.to_string()))
        );
        assert_eq!(
            parse_publish_path("/1/2/x/4/5/image/a", "/", SEPARATOR),
            Err(PublishError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            parse_publish_path("/1/2/3/image/a", "/", SEPARATOR),
            Err(PublishError::IncompleteLabel(3))
        );
        assert_eq!(
            parse_publish_path("/other/1/2/3/4/5/image/a", "/view/", SEPARATOR),
            Err(PublishError::MissingPrefix("/view/".to_string()))
        );
    }

    #[test]
    fn test_remote_image_path() {
        assert_eq!(
            remote_image_path("https://host.example/abc/photo.jpg", "https://host.example/"),
            "abc/photo.jpg"
        );
        assert_eq!(
            remote_image_path("https://elsewhere/x.jpg", "https://host.example/"),
            "https://elsewhere/x.jpg"
        );
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================
