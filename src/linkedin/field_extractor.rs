// src/linkedin/field_extractor.rs
use super::types::SENTINEL;
use crate::error::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "pre", "section", "table", "tr", "ul",
];

const PARAGRAPH_ELEMENTS: &[&str] = &["p"];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Read-only text lookups over one parsed page.
pub struct FieldExtractor<'a> {
    document: &'a Html,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self { document }
    }

    /// Text of the first element matching `selector`.
    pub fn try_text(&self, selector: &str) -> Result<String, ExtractionError> {
        let parsed = parse_selector(selector)?;
        self.document
            .select(&parsed)
            .next()
            .map(inner_text)
            .ok_or_else(|| ExtractionError::NoMatch {
                selector: selector.to_string(),
            })
    }

    /// Like [`try_text`](Self::try_text) but never fails: misses become the sentinel.
    pub fn text(&self, selector: &str) -> String {
        match self.try_text(selector) {
            Ok(text) => text,
            Err(e) => {
                warn!("Error extracting text: {}", e);
                SENTINEL.to_string()
            }
        }
    }

    /// First non-empty text over an ordered list of fallbacks.
    pub fn text_any(&self, selectors: &[&str]) -> String {
        for selector in selectors {
            match self.try_text(selector) {
                Ok(text) if !text.is_empty() => return text,
                Ok(_) => debug!("Selector '{}' matched an empty element", selector),
                Err(e @ ExtractionError::InvalidSelector { .. }) => warn!("{}", e),
                Err(e) => debug!("{}", e),
            }
        }

        warn!("No selector produced text: {}", selectors.join(" | "));
        SENTINEL.to_string()
    }

    /// Non-empty texts of every element matching any of `selectors`.
    pub fn texts(&self, selectors: &[&str]) -> Vec<String> {
        let mut texts = Vec::new();
        for selector in selectors {
            let parsed = match parse_selector(selector) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };
            texts.extend(
                self.document
                    .select(&parsed)
                    .map(inner_text)
                    .filter(|text| !text.is_empty()),
            );
        }
        texts
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Rendered text of an element, close to what a browser's `innerText` gives:
/// block boundaries become line breaks and paragraphs are separated by a blank
/// line. Whitespace runs collapse outside `<pre>` and the result is trimmed.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut sink = TextSink::default();
    collect_children(element, &mut sink);
    sink.out
}

fn collect_children(element: ElementRef<'_>, sink: &mut TextSink) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            sink.push_text(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_element(child_element, sink);
        }
    }
}

fn collect_element(element: ElementRef<'_>, sink: &mut TextSink) {
    let name = element.value().name();
    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        sink.line_break();
        return;
    }

    let breaks = if PARAGRAPH_ELEMENTS.contains(&name) {
        2
    } else if BLOCK_ELEMENTS.contains(&name) {
        1
    } else {
        0
    };

    let preformatted = name == "pre";
    sink.require_breaks(breaks);
    if preformatted {
        sink.preformatted += 1;
    }
    collect_children(element, sink);
    if preformatted {
        sink.end_preformatted();
    }
    sink.require_breaks(breaks);
}

#[derive(Default)]
struct TextSink {
    out: String,
    pending_breaks: usize,
    pending_space: bool,
    /// Whitespace kept verbatim inside `<pre>`, emitted before the next character.
    pending_raw: String,
    preformatted: usize,
}

impl TextSink {
    fn require_breaks(&mut self, count: usize) {
        self.pending_breaks = self.pending_breaks.max(count);
    }

    fn line_break(&mut self) {
        self.pending_breaks = (self.pending_breaks + 1).min(2);
    }

    fn end_preformatted(&mut self) {
        self.preformatted -= 1;
        if self.preformatted == 0 {
            self.pending_raw.clear();
        }
    }

    fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                if self.preformatted == 0 {
                    self.pending_space = true;
                } else if c != '\r' {
                    self.pending_raw.push(c);
                }
                continue;
            }
            if c.is_control() {
                continue;
            }

            self.flush_separator();
            self.out.push(c);
        }
    }

    fn flush_separator(&mut self) {
        if !self.out.is_empty() {
            for _ in 0..self.pending_breaks {
                self.out.push('\n');
            }
            if !self.pending_raw.is_empty() {
                self.out.push_str(&self.pending_raw);
            } else if self.pending_breaks == 0 && self.pending_space {
                self.out.push(' ');
            }
        }
        self.pending_breaks = 0;
        self.pending_space = false;
        self.pending_raw.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="title"><h1>  Senior   SWE  </h1></div>
          <div class="empty"></div>
          <ul class="pills">
            <li>Workplace type is Remote</li>
            <li>Job type is Full-time</li>
          </ul>
          <div class="description">
            <h2>About the job</h2>
            <p>We build <strong>things</strong>.</p>
            <p>Line one<br>Line two</p>
            <script>var ignored = 1;</script>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_text_is_trimmed_and_collapsed() {
        let document = Html::parse_document(PAGE);
        let extractor = FieldExtractor::new(&document);
        assert_eq!(extractor.text(".title h1"), "Senior SWE");
    }

    #[test]
    fn test_missing_or_invalid_selector_yields_sentinel() {
        let document = Html::parse_document(PAGE);
        let extractor = FieldExtractor::new(&document);
        assert_eq!(extractor.text(".does-not-exist"), SENTINEL);
        assert_eq!(extractor.text("div[[["), SENTINEL);
        assert!(matches!(
            extractor.try_text("div[[["),
            Err(ExtractionError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_text_any_skips_empty_matches() {
        let document = Html::parse_document(PAGE);
        let extractor = FieldExtractor::new(&document);
        assert_eq!(extractor.text_any(&[".empty", ".nope", ".title h1"]), "Senior SWE");
        assert_eq!(extractor.text_any(&[".empty", ".nope"]), SENTINEL);
    }

    #[test]
    fn test_texts_collects_all_matches() {
        let document = Html::parse_document(PAGE);
        let extractor = FieldExtractor::new(&document);
        assert_eq!(
            extractor.texts(&[".pills li"]),
            vec!["Workplace type is Remote", "Job type is Full-time"]
        );
    }

    #[test]
    fn test_inner_text_keeps_preformatted_whitespace() {
        let document = Html::parse_document(
            "<div class=\"setup\"><p>Run:</p><pre>cargo  build\n    --release   </pre>\
             <p>Then   deploy</p></div>",
        );
        let extractor = FieldExtractor::new(&document);
        assert_eq!(
            extractor.text(".setup"),
            "Run:\n\ncargo  build\n    --release\n\nThen deploy"
        );
    }

    #[test]
    fn test_inner_text_keeps_paragraph_structure() {
        let document = Html::parse_document(PAGE);
        let extractor = FieldExtractor::new(&document);
        assert_eq!(
            extractor.text(".description"),
            "About the job\n\nWe build things.\n\nLine one\nLine two"
        );
    }
}
