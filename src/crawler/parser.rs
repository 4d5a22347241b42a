//! HTML extraction for wiki pages
//!
//! This module pulls two things out of parsed wiki pages:
//! - The category link list (`<div id="mw-pages">` anchors)
//! - A spell description, from whichever known layout the page uses

use scraper::{ElementRef, Html, Selector};

/// Selector of the element holding a category page's member links
pub const LINK_CONTAINER: &str = "div#mw-pages";

/// Anchor text to href, in page order
pub type Links = Vec<(String, String)>;

/// One way a page may lay out its description
pub type Layout = fn(&Html) -> Option<String>;

/// Known description layouts, tried in order
pub const DESCRIPTION_LAYOUTS: &[(&str, Layout)] = &[
    ("header-cell", description_from_header_cell),
    ("bold-label", description_from_bold_label),
];

/// Extracts the member links of a category page
///
/// Returns `None` when the page has no link container. Anchors without
/// text are skipped; a repeated anchor text keeps its first position but
/// takes the later href.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use wiki_crawler::crawler::extract_links;
///
/// let html = r#"<div id="mw-pages"><a href="/bg/Cocoon">Cocoon</a></div>"#;
/// let links = extract_links(&Html::parse_document(html)).unwrap();
/// assert_eq!(links, vec![("Cocoon".to_string(), "/bg/Cocoon".to_string())]);
/// ```
pub fn extract_links(document: &Html) -> Option<Links> {
    let container_selector = Selector::parse(LINK_CONTAINER).ok()?;
    let anchor_selector = Selector::parse("a[href]").ok()?;

    let container = document.select(&container_selector).next()?;

    let mut links: Links = Vec::new();
    for anchor in container.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let text = element_text(&anchor);
        if text.is_empty() {
            continue;
        }

        match links.iter_mut().find(|(name, _)| *name == text) {
            Some(entry) => entry.1 = href.to_string(),
            None => links.push((text, href.to_string())),
        }
    }

    Some(links)
}

/// Extracts a description using the first layout that matches
pub fn extract_description(document: &Html) -> Option<String> {
    DESCRIPTION_LAYOUTS.iter().find_map(|(name, layout)| {
        let description = layout(document);
        if description.is_some() {
            tracing::trace!("Description found with '{}' layout", name);
        }
        description
    })
}

/// `<tr><th>Description</th><td>…</td></tr>`
fn description_from_header_cell(document: &Html) -> Option<String> {
    let th = Selector::parse("th").ok()?;
    let td = Selector::parse("td").ok()?;

    let header = document
        .select(&th)
        .find(|el| element_text(el) == "Description")?;
    let row = parent_element(&header)?;
    let cell = row.select(&td).next()?;

    Some(element_text(&cell))
}

/// `<tr><td><b>Description:</b></td>…<td>…</td></tr>`, description in the
/// row's last cell
fn description_from_bold_label(document: &Html) -> Option<String> {
    let b = Selector::parse("b").ok()?;
    let td = Selector::parse("td").ok()?;

    let label = document
        .select(&b)
        .find(|el| element_text(el) == "Description:")?;
    let row = parent_element(&label).and_then(|cell| parent_element(&cell))?;
    let cell = row.select(&td).last()?;

    Some(element_text(&cell))
}

fn parent_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.parent().and_then(ElementRef::wrap)
}

/// All text below an element, trimmed
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
