//! CVE keyword search against the MITRE CVE list.
//!
//! The search page lists matches in a two-column table (identifier with a
//! link, description) below a "Search Results" heading.

use super::html::{data_rows, find_heading, selector, table_after, text_of, TableScope};
use super::http::fetch_page;
use super::traits::CveSearch;
use crate::error::{ConfigError, ConfigResult, FetchError, FetchResult};
use crate::types::Record;
use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::Html;
use tracing::{debug, info};

/// Default keyword search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://cve.mitre.org/cgi-bin/cvekey.cgi";

/// Keyword search over the MITRE CVE list.
pub struct MitreSearch {
    client: Client,
    search_url: Url,
}

impl MitreSearch {
    /// Create a search source. Relative record links are resolved against
    /// `search_url`.
    pub fn new(client: Client, search_url: &str) -> ConfigResult<Self> {
        let search_url = Url::parse(search_url).map_err(|e| ConfigError::InvalidValue {
            field: "search_url",
            reason: e.to_string(),
        })?;
        Ok(Self { client, search_url })
    }
}

#[async_trait]
impl CveSearch for MitreSearch {
    async fn search(&self, keyword: &str) -> FetchResult<Vec<Record>> {
        debug!(keyword = %keyword, url = %self.search_url, "Searching CVE list");

        let request = self
            .client
            .get(self.search_url.clone())
            .query(&[("keyword", keyword)]);
        let body = fetch_page(request, keyword).await?;

        let records = parse_search_results(&body, &self.search_url, keyword)?;
        info!(keyword = %keyword, count = records.len(), "Search complete");
        Ok(records)
    }
}

/// Extract base records from a search results page.
///
/// `keyword` only labels errors.
pub fn parse_search_results(body: &str, base: &Url, keyword: &str) -> FetchResult<Vec<Record>> {
    let doc = Html::parse_document(body);
    let parse_err = |msg: String| FetchError::parse(keyword, msg);

    let heading = find_heading(&doc, "h2", "Search Results")
        .map_err(parse_err)?
        .ok_or_else(|| parse_err("no 'Search Results' heading".to_string()))?;
    let table = table_after(heading, TableScope::Nested)
        .ok_or_else(|| parse_err("no results table after heading".to_string()))?;
    let link_sel = selector("a[href]").map_err(parse_err)?;

    let mut records = Vec::new();
    for cells in data_rows(table).map_err(parse_err)? {
        let id_cell = cells[0];
        let id = text_of(id_cell);
        if id.is_empty() {
            continue;
        }

        let link = id_cell
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| base.join(href).ok())
            .map(String::from)
            .unwrap_or_default();
        let description = cells.get(1).map(|cell| text_of(*cell)).unwrap_or_default();

        records.push(Record::new(id, link, description));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchErrorKind;

    const PAGE: &str = r#"
        <html><body>
        <h2>Search Results</h2>
        <div class="smaller">There are 2 CVE Records that match your search.</div>
        <div id="TableWithRules">
          <table>
            <tr><th>Name</th><th>Description</th></tr>
            <tr>
              <td nowrap><a href="/cgi-bin/cvename.cgi?name=CVE-2024-0002">CVE-2024-0002</a></td>
              <td>USB stack overflow in driver.</td>
            </tr>
            <tr>
              <td>CVE-2024-0001</td>
              <td>  Hub descriptor parsing bug.  </td>
            </tr>
          </table>
        </div>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse(DEFAULT_SEARCH_URL).unwrap()
    }

    #[test]
    fn test_parse_search_results() {
        let records = parse_search_results(PAGE, &base(), "usb").unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, "CVE-2024-0002");
        assert_eq!(
            records[0].link,
            "https://cve.mitre.org/cgi-bin/cvename.cgi?name=CVE-2024-0002"
        );
        assert_eq!(records[0].description, "USB stack overflow in driver.");
        assert!(records[0].weaknesses.is_empty());

        assert_eq!(records[1].id, "CVE-2024-0001");
        assert_eq!(records[1].link, "");
        assert_eq!(records[1].description, "Hub descriptor parsing bug.");
    }

    #[test]
    fn test_missing_heading_is_parse_error() {
        let err = parse_search_results("<html><body><table></table></body></html>", &base(), "usb")
            .unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Parse);
        assert_eq!(err.identifier, "usb");
    }

    #[test]
    fn test_missing_table_is_parse_error() {
        let err = parse_search_results("<h2>Search Results</h2><p>none</p>", &base(), "usb")
            .unwrap_err();
        assert_eq!(err.kind, FetchErrorKind::Parse);
    }

    #[test]
    fn test_empty_results_table() {
        let records = parse_search_results(
            "<h2>Search Results</h2><table><tr><th>Name</th></tr></table>",
            &base(),
            "nothing",
        )
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let client = Client::new();
        assert!(MitreSearch::new(client, "not a url").is_err());
    }
}
