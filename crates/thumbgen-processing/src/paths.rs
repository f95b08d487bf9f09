//! Deterministic derivative-path derivation.
//!
//! The destination key is a pure function of the original key, so repeated
//! attempts to process the same input converge on the same destination.
//!
//! Rule: the thumbnail marker is always prefixed to the base name. If any
//! directory segment equals the upload namespace, that segment (first
//! occurrence) is replaced by the thumbnail namespace and the rest of the
//! directory structure is kept; otherwise the directory is reset to the
//! thumbnail namespace alone.

use thumbgen_core::Config;

/// Compute the thumbnail destination key for an original object key.
pub fn thumbnail_path(original: &str, config: &Config) -> String {
    let (dir, name) = match original.rfind('/') {
        Some(idx) => (&original[..idx], &original[idx + 1..]),
        None => ("", original),
    };

    let thumb_name = format!("{}{}", config.thumbnail_prefix, name);

    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    match segments.iter().position(|s| *s == config.upload_folder) {
        Some(pos) => {
            segments[pos] = &config.thumbnail_folder;
            format!("{}/{}", segments.join("/"), thumb_name)
        }
        None => format!("{}/{}", config.thumbnail_folder, thumb_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_segment_is_replaced() {
        let config = Config::default();
        assert_eq!(
            thumbnail_path("uploads/42_cat.png", &config),
            "thumbnails/thumb_42_cat.png"
        );
    }

    #[test]
    fn test_nested_upload_segment_keeps_surrounding_structure() {
        let config = Config::default();
        assert_eq!(
            thumbnail_path("a/uploads/b/x.png", &config),
            "a/thumbnails/b/thumb_x.png"
        );
    }

    #[test]
    fn test_no_upload_segment_falls_back_to_flat_namespace() {
        let config = Config::default();
        assert_eq!(thumbnail_path("x.png", &config), "thumbnails/thumb_x.png");
        assert_eq!(
            thumbnail_path("misc/x.png", &config),
            "thumbnails/thumb_x.png"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let config = Config::default();
        let first = thumbnail_path("uploads/42_cat.png", &config);
        let second = thumbnail_path("uploads/42_cat.png", &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_inputs_do_not_collide() {
        let config = Config::default();
        assert_ne!(
            thumbnail_path("uploads/a.png", &config),
            thumbnail_path("uploads/b.png", &config)
        );
    }

    #[test]
    fn test_custom_namespaces() {
        let mut config = Config::default();
        config.upload_folder = "incoming".to_string();
        config.thumbnail_folder = "derived".to_string();
        config.thumbnail_prefix = "t-".to_string();
        assert_eq!(
            thumbnail_path("incoming/p.jpg", &config),
            "derived/t-p.jpg"
        );
    }
}
