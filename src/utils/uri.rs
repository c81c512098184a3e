/// Return the local name of a URI: the part after the last `/` or `#`.
pub fn localname(uri: &str) -> &str {
    let tail = uri.rsplit('/').next().unwrap_or(uri);
    tail.rsplit('#').next().unwrap_or(tail)
}

/// Remove surrounding angle brackets from a URI, if any.
pub fn cleanup_uri(uri: &str) -> &str {
    uri.strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localname() {
        assert_eq!(localname("http://example.org/vocab/p123"), "p123");
        assert_eq!(localname("http://example.org/vocab#cats"), "cats");
        assert_eq!(localname("http://example.org/a#b/c"), "c");
        assert_eq!(localname("plain"), "plain");
        assert_eq!(localname("http://example.org/"), "");
    }

    #[test]
    fn test_cleanup_uri() {
        assert_eq!(cleanup_uri("<http://example.org/x>"), "http://example.org/x");
        assert_eq!(cleanup_uri("http://example.org/x"), "http://example.org/x");
        assert_eq!(cleanup_uri("<http://example.org/x"), "<http://example.org/x");
    }
}
