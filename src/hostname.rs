/// Hostname extraction: the key every stored preference is filed under
use url::Url;

/// Extract the hostname from a tab URL
///
/// Uses the WHATWG parser, so the result matches what the page itself sees
/// as `window.location.hostname`:
/// - https://Example.com:8443/path → example.com
/// - http://127.0.0.1:8080 → 127.0.0.1
/// - chrome://settings → settings
///
/// Returns `None` for unparsable input and for URLs without a host
/// (about:blank, file:///..., data:...).
pub fn hostname_from_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_basic() {
        assert_eq!(hostname_from_url("https://example.com/"), Some("example.com".to_string()));
        assert_eq!(hostname_from_url("http://example.com"), Some("example.com".to_string()));
        assert_eq!(hostname_from_url("https://www.example.com/a/b?c=d#e"), Some("www.example.com".to_string()));
    }

    #[test]
    fn test_hostname_keeps_subdomains() {
        // Preferences are per hostname, not per registrable domain
        assert_eq!(hostname_from_url("https://docs.microsoft.com"), Some("docs.microsoft.com".to_string()));
        assert_eq!(hostname_from_url("https://news.bbc.co.uk/article"), Some("news.bbc.co.uk".to_string()));
    }

    #[test]
    fn test_hostname_normalization() {
        assert_eq!(hostname_from_url("HTTPS://Example.COM/Path"), Some("example.com".to_string()));
        assert_eq!(hostname_from_url("  https://example.com  "), Some("example.com".to_string()));
    }

    #[test]
    fn test_hostname_drops_port() {
        assert_eq!(hostname_from_url("http://localhost:3000"), Some("localhost".to_string()));
        assert_eq!(hostname_from_url("http://127.0.0.1:8080/index.html"), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_hostname_internal_pages() {
        assert_eq!(hostname_from_url("chrome://settings"), Some("settings".to_string()));
        assert_eq!(hostname_from_url("about:blank"), None);
        assert_eq!(hostname_from_url("file:///home/user/notes.html"), None);
        assert_eq!(hostname_from_url("data:text/html,hello"), None);
    }

    #[test]
    fn test_hostname_edge_cases() {
        assert_eq!(hostname_from_url(""), None);
        assert_eq!(hostname_from_url("not-a-url"), None);
        assert_eq!(hostname_from_url("https://"), None);
    }
}
