use monitor_core::{PageAccessError, PageHandle, RowHandle, RowStrategy};
use scraper::{ElementRef, Html, Node, Selector};

/// One parsed dashboard page plus the URL it was captured from.
///
/// The browser collaborator hands over rendered HTML; this adapter only
/// answers structural queries against it.
pub struct HtmlPage {
    doc: Html,
    url: Option<String>,
}

impl HtmlPage {
    pub fn parse(html: &str, url: Option<String>) -> Self {
        Self {
            doc: Html::parse_document(html),
            url,
        }
    }

    /// Best-effort deep link for records harvested from this page.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A row borrowed from a parsed page.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRow<'a> {
    element: ElementRef<'a>,
}

impl<'a> PageHandle for &'a HtmlPage {
    type Row = HtmlRow<'a>;

    fn select_rows(&self, strategy: &RowStrategy) -> Result<Vec<HtmlRow<'a>>, PageAccessError> {
        let rows = match strategy {
            RowStrategy::CssSelector(css) => {
                let selector = parse_selector(css)?;
                self.doc
                    .select(&selector)
                    .map(|element| HtmlRow { element })
                    .collect()
            }
            RowStrategy::ClassContains(fragment) => {
                // Covers table rows and the div-based layouts some
                // dashboards fall back to.
                let selector = parse_selector(&format!(
                    "tr[class*={fragment:?}], div[class*={fragment:?}]"
                ))?;
                self.doc
                    .select(&selector)
                    .map(|element| HtmlRow { element })
                    .collect()
            }
            RowStrategy::MinCells(min) => {
                let row_selector = parse_selector("table tr")?;
                let cell_selector = parse_selector("td")?;
                self.doc
                    .select(&row_selector)
                    .filter(|row| row.select(&cell_selector).count() >= *min)
                    .map(|element| HtmlRow { element })
                    .collect()
            }
        };
        Ok(rows)
    }
}

impl<'a> RowHandle for HtmlRow<'a> {
    type Cell = ElementRef<'a>;

    fn cells(&self) -> Result<Vec<ElementRef<'a>>, PageAccessError> {
        let selector = parse_selector("td, th")?;
        let cells: Vec<_> = self.element.select(&selector).collect();
        if cells.is_empty() {
            // Div-based rows carry their fields in direct children.
            return Ok(self.element.child_elements().collect());
        }
        Ok(cells)
    }

    fn text(&self, cell: &ElementRef<'a>) -> Result<String, PageAccessError> {
        Ok(direct_text(cell))
    }

    fn descendant_texts(&self, cell: &ElementRef<'a>) -> Result<Vec<String>, PageAccessError> {
        Ok(cell
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(|element| subtree_text(&element))
            .collect())
    }
}

fn parse_selector(css: &str) -> Result<Selector, PageAccessError> {
    Selector::parse(css).map_err(|err| PageAccessError::new(format!("bad selector {css:?}: {err}")))
}

/// Text nodes that belong to the element itself, with `<br>` rendered
/// as a line break. Text inside child elements is deliberately left to
/// the descendant fallback tier.
fn direct_text(element: &ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Full text of an element's subtree, with line breaks preserved for
/// `<br>` and block-level children so multi-line status cells keep
/// their structure.
fn subtree_text(element: &ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if matches!(el.name(), "br" | "div" | "p") => out.push('\n'),
            _ => {}
        }
    }
    out.trim().to_string()
}
