//! Small helpers for walking scraped HTML.

use scraper::{ElementRef, Html, Selector};

/// Parse a CSS selector, turning a bad pattern into a plain message.
pub(crate) fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("bad selector '{}': {}", css, e))
}

/// First `tag` element whose text contains `needle`.
pub(crate) fn find_heading<'a>(
    doc: &'a Html,
    tag: &str,
    needle: &str,
) -> Result<Option<ElementRef<'a>>, String> {
    let sel = selector(tag)?;
    Ok(doc
        .select(&sel)
        .find(|el| el.text().collect::<String>().contains(needle)))
}

/// Where [`table_after`] looks for the table belonging to a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableScope {
    /// Only `table` elements that are siblings of the heading.
    Siblings,
    /// Also tables nested inside sibling wrapper elements.
    Nested,
}

fn is_table(el: &ElementRef<'_>) -> bool {
    el.value().name() == "table"
}

fn is_heading(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// First `table` after `anchor` in its section. The search stops at the
/// next heading, so a later section's table is never returned.
pub(crate) fn table_after(anchor: ElementRef<'_>, scope: TableScope) -> Option<ElementRef<'_>> {
    for sibling in anchor.next_siblings().filter_map(ElementRef::wrap) {
        let found = match scope {
            TableScope::Siblings => Some(sibling).filter(|el| is_heading(el) || is_table(el)),
            TableScope::Nested => sibling
                .descendants()
                .filter_map(ElementRef::wrap)
                .find(|el| is_heading(el) || is_table(el)),
        };
        match found {
            Some(el) if is_table(&el) => return Some(el),
            Some(_) => return None,
            None => {}
        }
    }
    None
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// The `td` cells of every row in `table` that has at least one.
pub(crate) fn data_rows<'a>(table: ElementRef<'a>) -> Result<Vec<Vec<ElementRef<'a>>>, String> {
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    Ok(table
        .select(&row_sel)
        .map(|row| row.select(&cell_sel).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect())
}
