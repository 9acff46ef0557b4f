//! Address bar input normalization.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+://").unwrap());
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.-]+\.\w{2,}").unwrap());

/// Where relative paths and searches resolve.
#[derive(Debug, Clone, Copy)]
pub struct AddressContext<'a> {
    /// Base for `./` paths.
    pub cwd: &'a Path,
    /// Expansion of `~`. Falls back to `cwd` when unknown.
    pub home: Option<&'a Path>,
    /// Prefix for free-text searches.
    pub search_endpoint: &'a str,
}

/// Turn address bar input into a URL. Empty input yields `None`.
///
/// - `/…`, `./…` and `~…` become `file://` URLs
/// - `scheme://…` and `about:…` pass through
/// - anything that looks like a domain gets `https://`
/// - everything else becomes a search
pub fn normalize_address(input: &str, ctx: &AddressContext<'_>) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(path) = local_path(input, ctx) {
        return Some(format!("file://{path}"));
    }
    if SCHEME_RE.is_match(input) || input.starts_with("about:") {
        return Some(input.to_string());
    }
    if !input.contains(char::is_whitespace) && DOMAIN_RE.is_match(input) {
        return Some(format!("https://{input}"));
    }
    Some(format!(
        "{}{}",
        ctx.search_endpoint,
        urlencoding::encode(input)
    ))
}

fn local_path(input: &str, ctx: &AddressContext<'_>) -> Option<String> {
    if input.starts_with('/') {
        return Some(input.to_string());
    }
    if let Some(rest) = input.strip_prefix("./") {
        return Some(ctx.cwd.join(rest).display().to_string());
    }
    if let Some(rest) = input.strip_prefix('~') {
        let home = ctx.home.unwrap_or(ctx.cwd);
        return Some(match rest.strip_prefix('/') {
            Some(rest) => home.join(rest).display().to_string(),
            None => format!("{}{rest}", home.display()),
        });
    }
    None
}
