use super::EmbedURLResolver;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_EMBED_URL_TEMPLATE: &str = "https://www.youtube.com/embed/{video_id}";

const IFRAME_MARKER: &str = "<iframe";

static IFRAME_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src=["']([^"']+)["']"#).expect("iframe src pattern must compile"));

// Order matters: the first pattern that matches decides the video id.
static VIDEO_ID_PATTERNS: Lazy<[Regex; 6]> = Lazy::new(|| {
    [
        // watch?v=ID
        r"youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
        // watch?feature=share&v=ID
        r"youtube\.com/watch\?.*v=([a-zA-Z0-9_-]{11})",
        r"youtu\.be/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/v/([a-zA-Z0-9_-]{11})",
        r"m\.youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})",
    ]
    .map(|pattern| Regex::new(pattern).expect("video id pattern must compile"))
});

pub fn new(embed_url_template: String) -> Resolver {
    Resolver { embed_url_template }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    embed_url_template: String,
}

impl Default for Resolver {
    fn default() -> Self {
        new(DEFAULT_EMBED_URL_TEMPLATE.to_string())
    }
}

impl EmbedURLResolver for Resolver {
    fn resolve(&self, link: Option<&str>) -> Option<String> {
        let link = link.filter(|link| !link.is_empty())?.trim();

        if let Some(src) = iframe_src(link) {
            tracing::trace!(src, "using iframe src as embed url");
            return Some(src.to_string());
        }

        let video_id = video_id(link)?;

        Some(self.embed_url_template.replace("{video_id}", video_id))
    }
}

/// The `src` attribute of a pasted `<iframe>` snippet, taken as-is.
///
/// This is a text scan, not a markup parse: broken or partial tags still
/// yield their `src` as long as it is there.
fn iframe_src(link: &str) -> Option<&str> {
    if !link.contains(IFRAME_MARKER) {
        return None;
    }

    IFRAME_SRC
        .captures(link)
        .and_then(|captures| captures.get(1))
        .map(|src| src.as_str())
}

fn video_id(link: &str) -> Option<&str> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(link))
        .and_then(|captures| captures.get(1))
        .map(|video_id| video_id.as_str())
}
