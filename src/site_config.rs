use allhalal_web_core::SiteConfig;

pub(crate) fn load_site_config() -> SiteConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    let (config, errors) = SiteConfig::from_query_pairs(parse_query_pairs(&search));
    for err in errors {
        gloo::console::warn!(format!("site config: {err}"));
    }
    config
}

fn decode_query_value(value: &str) -> String {
    let raw = value.trim().replace('+', " ");
    if raw.is_empty() {
        return String::new();
    }
    js_sys::decode_uri_component(&raw)
        .ok()
        .and_then(|decoded| decoded.as_string())
        .unwrap_or(raw)
}

fn parse_query_pairs(search: &str) -> Vec<(String, String)> {
    let raw = search.trim().trim_start_matches('?');
    let mut pairs = Vec::new();
    for chunk in raw.split('&') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let mut iter = chunk.splitn(2, '=');
        let key = iter.next().unwrap_or("").trim();
        if key.is_empty() {
            continue;
        }
        let value = decode_query_value(iter.next().unwrap_or(""));
        pairs.push((decode_query_value(key), value));
    }
    pairs
}
