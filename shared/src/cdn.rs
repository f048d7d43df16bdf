//! Rewrites signed storage URLs onto the region-appropriate CDN alias.
//!
//! Presentation concern only: a URL that cannot be rewritten is returned
//! unchanged rather than failing the request.

use lambda_http::Request;

const CDN_HOST_CN: &str = "storage.vfs-tracker.cn";
const CDN_HOST_DEFAULT: &str = "storage.vfs-tracker.app";

/// The host the client reached us through, lowercased. Prefers the
/// forwarded-host header set by the edge, falling back to the plain Host.
pub fn request_host(event: &Request) -> String {
    let headers = event.headers();
    headers
        .get("x-forwarded-host")
        .or_else(|| headers.get("host"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Pick the CDN alias for a caller: mainland hosts route to the CN
/// distribution, everything else to the default one.
pub fn cdn_host_for(request_host: &str) -> &'static str {
    if request_host.ends_with(".cn") {
        CDN_HOST_CN
    } else {
        CDN_HOST_DEFAULT
    }
}

/// Replace the authority of a signed URL with the CDN alias, keeping scheme,
/// path and query intact. Falls back to the original URL when it does not
/// look like an absolute http(s) URL.
pub fn rewrite_signed_host(url: &str, request_host: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) if scheme == "http" || scheme == "https" => (scheme, rest),
        _ => return url.to_string(),
    };

    let (host, path_and_query) = match rest.split_once('/') {
        Some((host, tail)) => (host, tail),
        None => (rest, ""),
    };
    if host.is_empty() {
        return url.to_string();
    }

    format!(
        "{}://{}/{}",
        scheme,
        cdn_host_for(request_host),
        path_and_query
    )
}
