use std::collections::BTreeMap;

use crate::config::CommentApiConfig;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "user-agent";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const ACCEPT_TEXT: &str = "text/plain";

/// Build a deterministic header map for comment requests.
///
/// Extra headers are applied after the defaults and may override them, except
/// for `content-type`: the body is always JSON.
pub fn build_headers(config: &CommentApiConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    headers.insert(HEADER_ACCEPT.to_owned(), ACCEPT_TEXT.to_owned());

    let ua = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(default_user_agent);
    headers.insert(HEADER_USER_AGENT.to_owned(), ua);

    for (key, value) in &config.extra_headers {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            continue;
        }
        headers.insert(key, value.trim().to_owned());
    }

    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        CONTENT_TYPE_JSON.to_owned(),
    );

    headers
}

fn default_user_agent() -> String {
    format!(
        "code-commenter/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
