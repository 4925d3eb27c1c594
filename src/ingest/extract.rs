// src/ingest/extract.rs
//! Listing-page extraction: run a source's selector cascade, then validate and
//! normalize each hit into a [`Candidate`].

use once_cell::sync::OnceCell;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::ingest::providers::{RelativeLinks, SourceConfig};
use crate::ingest::types::Candidate;

/// Selects one tier's elements (anchors or containers), in document order.
pub type Matcher = for<'a> fn(&'a Html) -> Vec<ElementRef<'a>>;

/// Picks the headline anchor for one selected element.
pub type LinkPicker = for<'a> fn(ElementRef<'a>) -> Option<ElementRef<'a>>;

/// One cascade tier. The tier wins as soon as `select` finds anything; `link`
/// is then applied per element and misses are skipped.
#[derive(Clone, Copy)]
pub struct Tier {
    pub select: Matcher,
    pub link: LinkPicker,
}

impl Tier {
    /// Tier whose elements are already the headline anchors.
    pub fn anchors(select: Matcher) -> Self {
        Self {
            select,
            link: itself,
        }
    }

    /// Tier selecting containers; `link` finds the anchor inside each.
    pub fn containers(select: Matcher, link: LinkPicker) -> Self {
        Self { select, link }
    }
}

fn itself<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    Some(el)
}

/// Parse a selector literal. Only called with static CSS strings.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid static selector {css:?}: {e:?}"))
}

/// True if the element's class attribute contains any of `needles` (case-insensitive).
pub(crate) fn class_contains_any(el: &ElementRef<'_>, needles: &[&str]) -> bool {
    el.value()
        .attr("class")
        .map(|c| {
            let c = c.to_ascii_lowercase();
            needles.iter().any(|n| c.contains(n))
        })
        .unwrap_or(false)
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    re.replace_all(s, " ").trim().to_string()
}

/// Visible text of an element: text nodes outside `script`/`style`, trimmed,
/// joined by one space.
pub fn visible_text(root: ElementRef<'_>) -> String {
    let parts: Vec<&str> = root
        .descendants()
        .filter_map(|node| node.value().as_text().map(|t| (node, t)))
        .filter(|(node, _)| {
            !node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style"))
            })
        })
        .map(|(_, t)| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    collapse_ws(&parts.join(" "))
}

/// Resolve an `href` against the source's base URL. Returns `None` when the link
/// cannot become an absolute http(s) URL under the given policy.
pub fn resolve_url(href: &str, base: &str, policy: RelativeLinks) -> Option<String> {
    let href = href.trim();
    // Protocol-relative links would escape the source's host.
    if href.is_empty() || href.starts_with("//") {
        return None;
    }
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    if policy == RelativeLinks::RootRelativeOnly && !href.starts_with('/') {
        return None;
    }
    let joined = Url::parse(base).ok()?.join(href).ok()?;
    matches!(joined.scheme(), "http" | "https").then(|| joined.to_string())
}

/// Case-insensitive keyword hit in either the title or the raw link.
pub fn matches_keywords(title: &str, href: &str, keywords: &[&str]) -> bool {
    let t = title.to_lowercase();
    let u = href.to_lowercase();
    keywords.iter().any(|k| t.contains(k) || u.contains(k))
}

/// Run the cascade and return at most `cfg.max_records` validated candidates.
///
/// The first tier selecting at least one element wins; later tiers are never
/// consulted, even if none of the winner's elements yields a usable link.
pub fn extract(markup: &str, cfg: &SourceConfig) -> Vec<Candidate> {
    let doc = Html::parse_document(markup);

    let Some((index, tier, elements)) = cfg
        .cascade
        .iter()
        .enumerate()
        .map(|(i, t)| (i, t, (t.select)(&doc)))
        .find(|(_, _, els)| !els.is_empty())
    else {
        tracing::debug!(target: "ingest", source = %cfg.source, "no selector tier matched");
        return Vec::new();
    };
    tracing::debug!(
        target: "ingest",
        source = %cfg.source,
        tier = index,
        elements = elements.len(),
        "selector tier matched"
    );

    let mut out = Vec::with_capacity(cfg.max_records);
    for el in elements {
        if out.len() >= cfg.max_records {
            break;
        }
        let Some(link) = (tier.link)(el) else {
            continue;
        };
        let title = visible_text(link);
        if title.chars().count() < cfg.min_title_chars {
            continue;
        }
        let href = link.value().attr("href").unwrap_or_default();
        if let Some(keywords) = cfg.keywords {
            if !matches_keywords(&title, href, keywords) {
                continue;
            }
        }
        let Some(url) = resolve_url(href, &cfg.base_url, cfg.relative_links) else {
            continue;
        };
        out.push(Candidate { title, url });
    }
    out
}
