//! Segment-wise path prefix helpers shared by the tree builder and grouper

use core_mapping::path::segments;

/// Check if `prefix` is a segment-wise prefix of `path`.
///
/// `/accounts` is a prefix of `/accounts` and `/accounts/:id`, but not of
/// `/accountsettings`. A prefix without segments (`/`) only prefixes paths
/// that have no segments either, so a root endpoint never swallows the whole
/// route table.
#[must_use]
pub fn is_path_prefix(prefix: &str, path: &str) -> bool {
    let mut prefix_segments = segments(prefix).peekable();
    if prefix_segments.peek().is_none() {
        return segments(path).next().is_none();
    }

    let mut path_segments = segments(path);
    prefix_segments.all(|p| path_segments.next() == Some(p))
}

/// Number of leading segments `a` and `b` have in common
#[must_use]
pub fn shared_segment_count(a: &str, b: &str) -> usize {
    segments(a)
        .zip(segments(b))
        .take_while(|(x, y)| x == y)
        .count()
}

/// Rebuild a path from its first `count` segments
#[must_use]
pub fn leading_segments(path: &str, count: usize) -> String {
    segments(path)
        .take(count)
        .fold(String::new(), |mut acc, s| {
            acc.push('/');
            acc.push_str(s);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_path_prefix() {
        assert!(is_path_prefix("/accounts", "/accounts"));
        assert!(is_path_prefix("/accounts", "/accounts/:id/documents"));
        assert!(is_path_prefix("/accounts/", "/accounts/:id"));
        assert!(!is_path_prefix("/accounts", "/accountsettings"));
        assert!(!is_path_prefix("/accounts/:id", "/accounts"));
        assert!(!is_path_prefix("/", "/accounts"));
        assert!(is_path_prefix("/", "/"));
    }

    #[test]
    fn test_shared_segment_count() {
        assert_eq!(
            shared_segment_count("/accounts/:id/suspend", "/accounts/:id/reactivate"),
            2
        );
        assert_eq!(shared_segment_count("/a/b", "/c/b"), 0);
        assert_eq!(shared_segment_count("/a", "/a/b"), 1);
    }

    #[test]
    fn test_leading_segments() {
        assert_eq!(leading_segments("/accounts/:id/suspend", 2), "/accounts/:id");
        assert_eq!(leading_segments("/accounts", 0), "");
    }
}
