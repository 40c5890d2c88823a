/// How a non-empty path reference relates to the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Already a fully-qualified `http://` or `https://` URL
    Absolute,
    /// Starts with `/`
    RootRelative,
    /// Anything else, including other schemes such as `data:`
    Relative,
}

/// Classify a path reference by its prefix
pub fn classify(path: &str) -> PathKind {
    if has_http_scheme(path) {
        PathKind::Absolute
    } else if path.starts_with('/') {
        PathKind::RootRelative
    } else {
        PathKind::Relative
    }
}

fn has_http_scheme(path: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        path.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Build an absolute URL from a base URL and a path
pub fn absolute_url(base_url: &str, path: &str) -> String {
    match classify(path) {
        PathKind::Absolute => path.to_string(),
        PathKind::RootRelative => format!("{}{}", base_url, path),
        PathKind::Relative => format!("{}/{}", base_url, path),
    }
}

/// Resolve an image path against `base_url`.
///
/// An absent or empty `path` yields `fallback` untouched. Paths are not
/// normalized: `..`, duplicate slashes, queries and fragments pass through.
///
/// ```
/// use wasa::resolve_image_url;
///
/// let base = "http://api.example.com";
/// assert_eq!(resolve_image_url(base, None, None), None);
/// assert_eq!(
///     resolve_image_url(base, Some("images/x.png"), None).as_deref(),
///     Some("http://api.example.com/images/x.png")
/// );
/// ```
pub fn resolve_image_url(base_url: &str, path: Option<&str>, fallback: Option<&str>) -> Option<String> {
    match path {
        Some(p) if !p.is_empty() => {
            let resolved = absolute_url(base_url, p);
            tracing::trace!(path = p, %resolved, "resolved image url");
            Some(resolved)
        }
        _ => fallback.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://api.example.com";

    #[test]
    fn absent_path_returns_fallback() {
        assert_eq!(resolve_image_url(BASE, None, None), None);
        assert_eq!(
            resolve_image_url(BASE, Some(""), Some("placeholder.png")).as_deref(),
            Some("placeholder.png")
        );
        assert_eq!(resolve_image_url(BASE, None, Some("")).as_deref(), Some(""));
    }

    #[test]
    fn absolute_urls_are_untouched() {
        for url in [
            "https://cdn.example.com/x.png",
            "http://cdn.example.com/x.png",
            "HTTPS://CDN.example.com/x.png",
            "Http://cdn.example.com/a//b/../c.png?w=10#top",
        ] {
            assert_eq!(resolve_image_url(BASE, Some(url), None).as_deref(), Some(url));
        }
    }

    #[test]
    fn root_relative_joins_directly() {
        assert_eq!(
            absolute_url(BASE, "/images/x.png"),
            "http://api.example.com/images/x.png"
        );
        assert_eq!(absolute_url(BASE, "/"), "http://api.example.com/");
        assert_eq!(absolute_url(BASE, "//x.png"), "http://api.example.com//x.png");
    }

    #[test]
    fn bare_relative_gets_a_slash() {
        assert_eq!(
            absolute_url(BASE, "images/x.png"),
            "http://api.example.com/images/x.png"
        );
        assert_eq!(absolute_url(BASE, "../x.png"), "http://api.example.com/../x.png");
    }

    #[test]
    fn other_schemes_are_relative() {
        assert_eq!(classify("data:image/png;base64,AAAA"), PathKind::Relative);
        assert_eq!(classify("ftp://host/x.png"), PathKind::Relative);
        assert_eq!(classify("http:/x.png"), PathKind::Relative);
        assert_eq!(
            absolute_url(BASE, "data:image/png;base64,AAAA"),
            "http://api.example.com/data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn short_and_multibyte_paths_do_not_panic() {
        assert_eq!(classify("h"), PathKind::Relative);
        assert_eq!(classify("héllo://"), PathKind::Relative);
        assert_eq!(classify("ünïcødé.png"), PathKind::Relative);
    }
}
