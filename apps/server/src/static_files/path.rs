//! Request path decoding and the directory-traversal guard.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::errors::AppError;

/// Characters that must stay escaped in a re-encoded path.
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-decodes a raw URI path.
/// Paths that do not decode to UTF-8 are rejected as bad requests.
pub fn decode_path(raw: &str) -> Result<String, AppError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|p| p.into_owned())
        .map_err(|_| AppError::Validation("Bad Request".to_string()))
}

/// Decodes the path and rejects any parent-directory sequence.
pub fn checked_path(raw: &str) -> Result<String, AppError> {
    let decoded = decode_path(raw)?;
    if decoded.contains("..") {
        tracing::warn!("Path traversal attempt blocked: {raw}");
        return Err(AppError::PathTraversal);
    }
    Ok(decoded)
}

/// Re-encodes a decoded path with the minimal escape set, so equivalent
/// spellings of a path (`/api/%63ontact`, `/api/contact`) compare equal.
pub fn canonical_path(decoded: &str) -> String {
    utf8_percent_encode(decoded, PATH_ESCAPES).to_string()
}

/// Maps a checked request path to a path relative to the asset root.
/// `/` and directory-style paths resolve to the root document.
pub fn relative_asset_path(decoded: &str) -> &str {
    let trimmed = decoded.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        super::ROOT_DOCUMENT
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_pass() {
        assert_eq!(checked_path("/assets/app.js").unwrap(), "/assets/app.js");
        assert_eq!(checked_path("/about").unwrap(), "/about");
    }

    #[test]
    fn test_percent_encoded_paths_are_decoded() {
        assert_eq!(checked_path("/my%20file.txt").unwrap(), "/my file.txt");
    }

    #[test]
    fn test_traversal_is_rejected_in_any_encoding() {
        for raw in [
            "/../etc/passwd",
            "/assets/../../secret",
            "/%2e%2e/etc/passwd",
            "/%2E%2E%2Fetc",
            "/..%2f..%2fetc",
            "/notes..txt",
        ] {
            assert!(
                matches!(checked_path(raw), Err(AppError::PathTraversal)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_utf8_is_bad_request() {
        assert!(matches!(
            checked_path("/%ff%fe"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_canonical_path_unescapes_plain_characters() {
        let decoded = checked_path("/api/%63ontact").unwrap();
        assert_eq!(canonical_path(&decoded), "/api/contact");

        let decoded = checked_path("/my%20file%3F.txt").unwrap();
        assert_eq!(canonical_path(&decoded), "/my%20file%3F.txt");
        assert_eq!(canonical_path("/100%"), "/100%25");
    }

    #[test]
    fn test_relative_asset_path() {
        assert_eq!(relative_asset_path("/"), "index.html");
        assert_eq!(relative_asset_path("/docs/"), "index.html");
        assert_eq!(relative_asset_path("/assets/app.js"), "assets/app.js");
    }
}
