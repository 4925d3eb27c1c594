// src/ingest/body.rs
use metrics::counter;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::ingest::extract::{sel, visible_text};
use crate::ingest::types::{Fetcher, TEXT_UNAVAILABLE};

static ARTICLE: Lazy<Selector> = Lazy::new(|| sel("article"));
static ARTICLE_CLASS: Lazy<Selector> = Lazy::new(|| sel(r#"div[class*="article"]"#));
static CONTENT_CLASS: Lazy<Selector> = Lazy::new(|| sel(r#"div[class*="content"]"#));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| sel("p"));

/// Fetch an article page and return its body text, or [`TEXT_UNAVAILABLE`].
/// Never fails the caller.
pub async fn fetch_body(fetcher: &dyn Fetcher, url: &str, max_chars: usize) -> String {
    let html = match fetcher.fetch(url).await {
        Ok(h) => h,
        Err(e) => {
            tracing::debug!(target: "ingest", %url, error = %e, "article body fetch failed");
            counter!("scrape_body_unavailable_total").increment(1);
            return TEXT_UNAVAILABLE.to_string();
        }
    };
    match extract_body(&html, max_chars) {
        Some(text) => text,
        None => {
            tracing::debug!(target: "ingest", %url, "article page had no extractable text");
            counter!("scrape_body_unavailable_total").increment(1);
            TEXT_UNAVAILABLE.to_string()
        }
    }
}

/// Pull readable text out of an article page.
///
/// Container priority: `<article>`, a div with "article" in its class, a div with
/// "content" in its class. The first container present wins; if it holds no
/// text (or none exists) every `<p>` is concatenated instead. Script and style
/// text never counts. Result is capped at `max_chars` characters.
pub fn extract_body(html: &str, max_chars: usize) -> Option<String> {
    let doc = Html::parse_document(html);

    let from_container = [&*ARTICLE, &*ARTICLE_CLASS, &*CONTENT_CLASS]
        .into_iter()
        .find_map(|s| doc.select(s).next())
        .map(visible_text)
        .filter(|t| !t.is_empty());

    let text = match from_container {
        Some(t) => t,
        None => doc
            .select(&PARAGRAPH)
            .map(visible_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    };

    let text = truncate_chars(&text, max_chars);
    (!text.is_empty()).then_some(text)
}

/// Char-boundary-safe truncation.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
