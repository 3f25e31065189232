use scraper::{ElementRef, Html, Selector};

/// Best-effort content pulled from one parsed page. Either field may be
/// absent without failing the fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub title: Option<String>,
    pub body_text: Option<String>,
}

/// Extraction is a strategy over parsed markup, so alternate site layouts
/// can be supported without touching the scrape loop.
pub trait ExtractStrategy {
    fn extract(&self, doc: &Html) -> PageContent;
}

/// Default strategy for case-study pages: the first `<h1>` is the title,
/// the body is every `<p>` inside the rich-content container, one per line.
pub struct RichContentExtractor {
    heading: Selector,
    container: Selector,
    paragraph: Selector,
}

impl RichContentExtractor {
    pub fn new() -> Self {
        Self {
            heading: Selector::parse("h1").unwrap(),
            container: Selector::parse("div.rich-editor-content").unwrap(),
            paragraph: Selector::parse("p").unwrap(),
        }
    }
}

impl Default for RichContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for RichContentExtractor {
    fn extract(&self, doc: &Html) -> PageContent {
        let title = doc.select(&self.heading).next().and_then(element_text);

        let body_text = doc.select(&self.container).next().and_then(|container| {
            let paragraphs: Vec<String> = container
                .select(&self.paragraph)
                .filter_map(element_text)
                .collect();
            if paragraphs.is_empty() {
                None
            } else {
                Some(paragraphs.join("\n"))
            }
        });

        PageContent { title, body_text }
    }
}

/// Trimmed text content of an element; whitespace-only collapses to `None`
/// so absence is never represented as an empty string.
fn element_text(el: ElementRef) -> Option<String> {
    let text = el.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
