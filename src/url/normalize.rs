use crate::url::Address;
use crate::UrlError;
use url::Url;

/// Normalizes a locator into an [`Address`]
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything but HTTP and HTTPS, and URLs without a host
/// 3. Remove fragment (everything after #)
/// 4. Remove trailing path separators; slashes inside a query are kept
///
/// Host lowercasing and dot-segment removal come from the URL parser itself.
///
/// # Arguments
///
/// * `input` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Address)` - Normalized address
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use sitewalk::url::normalize_address;
///
/// let address = normalize_address("http://EXAMPLE.com/page/#top").unwrap();
/// assert_eq!(address.as_str(), "http://example.com/page");
/// ```
pub fn normalize_address(input: &str) -> Result<Address, UrlError> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(format!("{input}: {e}")))?;
    normalize_url(url)
}

/// Normalizes an already-parsed URL, e.g. one resolved against a page
pub(crate) fn normalize_url(mut url: Url) -> Result<Address, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    url.set_fragment(None);

    // Only path separators are trimmed; a query keeps its trailing slashes.
    let text = if url.query().is_some() {
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url.as_str().to_string()
    } else {
        url.as_str().trim_end_matches('/').to_string()
    };

    // The textual form may have lost the root slash; the parsed form is
    // re-derived from it so both always describe the same resource.
    let url = Url::parse(&text).map_err(|e| UrlError::Parse(format!("{text}: {e}")))?;

    Ok(Address::from_parts(text, url))
}
