//! Path canonicalization.

use crate::types::CanonicalizationOptions;
use crate::url::percent::lowercase_escapes;

/// Length of the id inside an ASP.NET cookieless session segment.
const ASP_SESSION_ID_LEN: usize = 24;

/// Canonicalize a URI path for the key.
///
/// The result always starts with `/`. Dot segments are resolved and empty
/// segments collapse. With default options the path is lowercased, ASP.NET
/// session segments are removed and a trailing `/` is dropped. Escape hex
/// digits are lowercased even when `path_lowercase` is off.
///
/// ```
/// use surtkey::{canonicalize_path, CanonicalizationOptions};
///
/// let options = CanonicalizationOptions::default();
/// assert_eq!(canonicalize_path("", &options), "/");
/// assert_eq!(canonicalize_path("/Goo/", &options), "/goo");
/// assert_eq!(canonicalize_path("/a/./b/../C%7E/", &options), "/a/c%7e");
///
/// let options = options.path_lowercase(false);
/// assert_eq!(canonicalize_path("/a/./b/../C%7E/", &options), "/a/C%7e");
/// ```
pub fn canonicalize_path(path: &str, options: &CanonicalizationOptions) -> String {
    let path = if options.path_lowercase {
        path.to_lowercase()
    } else {
        lowercase_escapes(path)
    };

    let mut kept: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                kept.pop();
            }
            _ => kept.push(segment),
        }
    }

    if options.path_strip_session_id {
        strip_session_segments(&mut kept);
    }

    let mut out = format!("/{}", kept.join("/"));
    if !options.path_strip_trailing_slash_unless_empty && !kept.is_empty() && path.ends_with('/') {
        out.push('/');
    }
    out
}

/// Drop `(<id>)` and `(S(<id>)...)` segments that precede an `.aspx` page.
fn strip_session_segments(segments: &mut Vec<&str>) {
    let Some(page) = segments
        .iter()
        .rposition(|s| s.to_ascii_lowercase().contains(".aspx"))
    else {
        return;
    };

    let mut index = 0;
    segments.retain(|segment| {
        let keep = index >= page || !is_session_segment(segment);
        index += 1;
        keep
    });
}

fn is_session_segment(segment: &str) -> bool {
    let inner = match segment.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) if !inner.is_empty() => inner,
        _ => return false,
    };

    if is_session_id(inner) {
        return true;
    }

    // one or more `x(<id>)` groups
    let group_len = ASP_SESSION_ID_LEN + 3;
    let mut rest = inner;
    while !rest.is_empty() {
        let bytes = rest.as_bytes();
        if bytes.len() < group_len
            || !bytes[0].is_ascii_alphabetic()
            || bytes[1] != b'('
            || bytes[group_len - 1] != b')'
            || !is_session_id(&rest[2..group_len - 1])
        {
            return false;
        }
        rest = &rest[group_len..];
    }
    true
}

fn is_session_id(text: &str) -> bool {
    text.len() == ASP_SESSION_ID_LEN && text.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(path: &str) -> String {
        canonicalize_path(path, &CanonicalizationOptions::default())
    }

    #[test]
    fn test_root_and_empty() {
        assert_eq!(canon(""), "/");
        assert_eq!(canon("/"), "/");
        assert_eq!(canon("///"), "/");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        assert_eq!(canon("/goo/"), "/goo");
        assert_eq!(canon("/info/"), "/info");
        assert_eq!(canon("/index.php"), "/index.php");
    }

    #[test]
    fn test_trailing_slash_kept_when_disabled() {
        let options = CanonicalizationOptions::default().path_strip_trailing_slash_unless_empty(false);
        assert_eq!(canonicalize_path("/goo/", &options), "/goo/");
        assert_eq!(canonicalize_path("/goo", &options), "/goo");
        assert_eq!(canonicalize_path("/", &options), "/");
    }

    #[test]
    fn test_lowercased_by_default() {
        assert_eq!(canon("/Goo/Bar.HTML"), "/goo/bar.html");
        assert_eq!(canon("/Photos/36050182@N05/"), "/photos/36050182@n05");
    }

    #[test]
    fn test_case_kept_when_disabled() {
        let options = CanonicalizationOptions::default().path_lowercase(false);
        assert_eq!(canonicalize_path("/Photos/36050182@N05/", &options), "/Photos/36050182@N05");
        assert_eq!(canonicalize_path("/%7Ea%2Fb", &options), "/%7ea%2fb");
    }

    #[test]
    fn test_dot_segments() {
        assert_eq!(canon("/a/./b/../c/"), "/a/c");
        assert_eq!(canon("/../a"), "/a");
        assert_eq!(canon("/a/b/.."), "/a");
    }

    #[test]
    fn test_empty_segments_collapse() {
        assert_eq!(canon("/a//b"), "/a/b");
        assert_eq!(canon("//www.example.com/x"), "/www.example.com/x");
    }

    #[test]
    fn test_escapes_lowercased() {
        assert_eq!(canon("/%7Ea%2Fb"), "/%7ea%2fb");
        assert_eq!(canon("/100%"), "/100%");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(canon("shaveh.co.il"), "/shaveh.co.il");
    }

    #[test]
    fn test_asp_session_segments_stripped() {
        assert_eq!(canon("/(S(4hqa0555fwsecu455xqckv45))/mileg.aspx"), "/mileg.aspx");
        assert_eq!(canon("/(4hqa0555fwsecu455xqckv45)/mileg.aspx"), "/mileg.aspx");
        assert_eq!(
            canon("/(a(4hqa0555fwsecu455xqckv45)S(4hqa0555fwsecu455xqckv45)f(4hqa0555fwsecu455xqckv45))/mileg.aspx"),
            "/mileg.aspx"
        );
        assert_eq!(
            canon("/app/(S(4hqa0555fwsecu455xqckv45))/sub/Page.aspx"),
            "/app/sub/page.aspx"
        );
    }

    #[test]
    fn test_asp_session_segments_need_aspx_page() {
        assert_eq!(
            canon("/(S(4hqa0555fwsecu455xqckv45))/mileg.html"),
            "/(s(4hqa0555fwsecu455xqckv45))/mileg.html"
        );
        // id one character short
        assert_eq!(
            canon("/(4hqa0555fwsecu455xqckv4)/mileg.aspx"),
            "/(4hqa0555fwsecu455xqckv4)/mileg.aspx"
        );
        assert_eq!(canon("/photos/36050182@N05/"), "/photos/36050182@n05");
    }

    #[test]
    fn test_asp_session_segments_kept_when_disabled() {
        let options = CanonicalizationOptions::default().path_strip_session_id(false);
        assert_eq!(
            canonicalize_path("/(S(4hqa0555fwsecu455xqckv45))/mileg.aspx", &options),
            "/(s(4hqa0555fwsecu455xqckv45))/mileg.aspx"
        );
    }
}
