//! Resource address helpers

use nfield_domain::{NfieldError, Result};
use url::Url;

/// Append the segments of `path` to `base`, treating `base` as a directory
/// whether or not it ends with a slash. Query and fragment stay untouched.
pub fn join_path(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| NfieldError::InvalidArgument(format!("'{base}' cannot be used as a base address")))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

/// Append one percent-encoded path segment, typically a resource identity.
pub fn push_segment(base: &Url, segment: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| NfieldError::InvalidArgument(format!("'{base}' cannot be used as a base address")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_ignores_trailing_slash() {
        let with_slash = Url::parse("http://x/").unwrap();
        let without = Url::parse("http://x/v1").unwrap();

        assert_eq!(join_path(&with_slash, "SignIn").unwrap().as_str(), "http://x/SignIn");
        assert_eq!(
            join_path(&without, "api/interviewers").unwrap().as_str(),
            "http://x/v1/api/interviewers"
        );
        assert_eq!(
            join_path(&Url::parse("http://x/v1/").unwrap(), "/SignIn").unwrap().as_str(),
            "http://x/v1/SignIn"
        );
    }

    #[test]
    fn join_path_extends_path_not_query() {
        let base = Url::parse("http://x/v1?tenant=a#top").unwrap();
        let joined = join_path(&base, "SignIn").unwrap();

        assert_eq!(joined.path(), "/v1/SignIn");
        assert_eq!(joined.query(), Some("tenant=a"));
        assert_eq!(joined.as_str(), "http://x/v1/SignIn?tenant=a#top");
    }

    #[test]
    fn push_segment_encodes_identity() {
        let base = Url::parse("http://x/api/interviewers").unwrap();
        assert_eq!(push_segment(&base, "abc").unwrap().as_str(), "http://x/api/interviewers/abc");
        assert_eq!(
            push_segment(&base, "a b/c").unwrap().as_str(),
            "http://x/api/interviewers/a%20b%2Fc"
        );
    }

    #[test]
    fn push_segment_rejects_opaque_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(push_segment(&base, "x"), Err(NfieldError::InvalidArgument(_))));
    }
}
