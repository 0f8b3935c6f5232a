//! Captions and URLs for sharing a product or seller page.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

const URL_PLACEHOLDER: &str = "{{url}}";
const CACHE_BUSTER_PARAM: &str = "v";

/// Opening message for a chat started from a seller's page.
#[must_use]
pub fn seller_greeting(seller_name: &str, parish_name: &str) -> String {
    format!("Halo {seller_name}! Saya lihat produk di Parokios ({parish_name}). Bisa info stok & cara order?")
}

/// Caption for sharing a product: `custom` when it has content, otherwise
/// title, price and link on three lines.
#[must_use]
pub fn share_text(title: &str, price_label: &str, url: &str, custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|c| !c.is_empty()) {
        Some(custom) => custom.to_string(),
        None => format!("\u{1f357} {title}\n{price_label}\n{url}"),
    }
}

/// Fill every `{{url}}` in a broadcast caption template.
#[must_use]
pub fn apply_template(template: &str, url: &str) -> String {
    template.replace(URL_PLACEHOLDER, url).trim().to_string()
}

/// Join a site-relative path onto `origin`. Absolute URLs, and any path when
/// the origin is unknown, come back unchanged.
#[must_use]
pub fn absolute_url(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if origin.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

/// Base-36 stamp for cache busting, from milliseconds since the epoch.
#[must_use]
pub fn cache_stamp(millis: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if millis == 0 {
        return "0".to_string();
    }
    let mut n = millis;
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[usize::try_from(n % 36).unwrap_or_default()]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Set the `v` query parameter so chat apps fetch a fresh link preview.
/// Any existing `v` is replaced; other parameters and the fragment are kept.
#[must_use]
pub fn with_cache_buster(url: &str, stamp: &str) -> String {
    let (without_fragment, fragment) = match url.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (url, None),
    };
    let (base, query) = match without_fragment.split_once('?') {
        Some((base, query)) => (base, query),
        None => (without_fragment, ""),
    };

    let mut params: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(CACHE_BUSTER_PARAM))
        .collect();
    let buster = format!("{CACHE_BUSTER_PARAM}={stamp}");
    params.push(&buster);

    let mut out = format!("{base}?{}", params.join("&"));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
