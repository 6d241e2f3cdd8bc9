//! CWE lookup from NVD vulnerability detail pages.
//!
//! https://nvd.nist.gov/vuln/detail/<CVE-ID>

use super::html::{data_rows, find_heading, table_after, text_of, TableScope};
use super::http::fetch_page;
use super::traits::WeaknessFetcher;
use crate::error::{FetchError, FetchResult};
use crate::types::Weakness;
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use tracing::{debug, trace};

/// Default detail page prefix; the identifier is appended.
pub const DEFAULT_DETAIL_URL: &str = "https://nvd.nist.gov/vuln/detail/";

/// Reads the "Weakness Enumeration" table of an NVD detail page.
pub struct NvdFetcher {
    client: Client,
    detail_url: String,
}

impl NvdFetcher {
    /// Create a fetcher using `detail_url` as the page prefix.
    pub fn new(client: Client, detail_url: impl Into<String>) -> Self {
        Self {
            client,
            detail_url: detail_url.into(),
        }
    }

    fn page_url(&self, identifier: &str) -> String {
        format!("{}{}", self.detail_url, identifier)
    }
}

#[async_trait]
impl WeaknessFetcher for NvdFetcher {
    async fn fetch_weaknesses(&self, identifier: &str) -> FetchResult<Vec<Weakness>> {
        let url = self.page_url(identifier);
        debug!(identifier = %identifier, url = %url, "Fetching weaknesses");

        let body = fetch_page(self.client.get(&url), identifier).await?;
        let weaknesses = parse_weaknesses(&body, identifier)?;

        trace!(identifier = %identifier, count = weaknesses.len(), "Parsed weaknesses");
        Ok(weaknesses)
    }
}

/// Extract `(code, description)` pairs from a detail page.
///
/// A page without a weakness section (reserved or rejected entries) yields
/// an empty list.
pub fn parse_weaknesses(body: &str, identifier: &str) -> FetchResult<Vec<Weakness>> {
    let doc = Html::parse_document(body);
    let parse_err = |msg: String| FetchError::parse(identifier, msg);

    let Some(heading) = find_heading(&doc, "h3", "Weakness Enumeration").map_err(parse_err)? else {
        return Ok(Vec::new());
    };
    let Some(table) = table_after(heading, TableScope::Siblings) else {
        return Ok(Vec::new());
    };

    Ok(data_rows(table)
        .map_err(parse_err)?
        .into_iter()
        .map(|cells| {
            let code = text_of(cells[0]);
            let description = cells.get(1).map(|cell| text_of(*cell)).unwrap_or_default();
            Weakness::new(code, description)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div id="vulnTechnicalDetailsDiv">
          <h3 id="VulnChangeHistorySection">Weakness Enumeration</h3>
          <table class="table table-striped">
            <thead><tr><th>CWE-ID</th><th>CWE Name</th><th>Source</th></tr></thead>
            <tbody>
              <tr>
                <td><a href="http://cwe.mitre.org/data/definitions/79.html">
                  CWE-79
                </a></td>
                <td>Improper Neutralization of Input During Web Page Generation</td>
                <td>NIST</td>
              </tr>
              <tr>
                <td>NVD-CWE-noinfo</td>
                <td>Insufficient Information</td>
                <td>NIST</td>
              </tr>
            </tbody>
          </table>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_weaknesses() {
        let weaknesses = parse_weaknesses(PAGE, "CVE-2024-0001").unwrap();
        assert_eq!(
            weaknesses,
            vec![
                Weakness::new(
                    "CWE-79",
                    "Improper Neutralization of Input During Web Page Generation"
                ),
                Weakness::new("NVD-CWE-noinfo", "Insufficient Information"),
            ]
        );
    }

    #[test]
    fn test_page_without_section() {
        let weaknesses =
            parse_weaknesses("<html><body><h3>Description</h3></body></html>", "CVE-1").unwrap();
        assert!(weaknesses.is_empty());
    }

    #[test]
    fn test_section_without_table_ignores_later_tables() {
        let page = r#"
            <div>
              <h3>Weakness Enumeration</h3>
              <p>Weakness data is awaiting analysis.</p>
              <div class="refs">
                <table><tr><td>https://example.com/fix</td><td>Patch</td></tr></table>
              </div>
            </div>
        "#;
        assert!(parse_weaknesses(page, "CVE-2024-0003").unwrap().is_empty());
    }

    #[test]
    fn test_page_url() {
        let fetcher = NvdFetcher::new(Client::new(), DEFAULT_DETAIL_URL);
        assert_eq!(
            fetcher.page_url("CVE-2021-44228"),
            "https://nvd.nist.gov/vuln/detail/CVE-2021-44228"
        );
    }
}
