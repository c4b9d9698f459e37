use url::Url;

/// Host component of an absolute URL, as the `url` crate parses it.
///
/// Scheme, port, and path are ignored. Unparseable or host-less URLs (e.g.
/// `mailto:`) have no host and never take part in domain grouping.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_string)
}
