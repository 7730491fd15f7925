//! Listing URL construction.
//!
//! Site layout, relative to the base URL:
//! - front page: `<base>`
//! - later pages: `<base>latest-updates/<page>/`
//! - search: `<base>search/<slug>/relevance/` and `.../relevance/<page>/`

use url::Url;

use crate::error::{BridgeError, Result};

/// Translate an item offset into a 1-based page number.
///
/// `items_per_page` of zero is treated as one.
pub fn page_for_skip(skip: u32, items_per_page: u32) -> u32 {
    skip / items_per_page.max(1) + 1
}

/// Trim the query and collapse each whitespace run into one hyphen.
pub fn search_slug(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Build the listing URL for `page` and an optional search query.
pub fn listing_url(base: &Url, page: u32, query: Option<&str>) -> Result<Url> {
    let slug = query.map(search_slug).filter(|s| !s.is_empty());

    let path = match (slug, page) {
        (Some(slug), 0 | 1) => format!("search/{}/relevance/", urlencoding::encode(&slug)),
        (Some(slug), page) => format!("search/{}/relevance/{page}/", urlencoding::encode(&slug)),
        (None, 0 | 1) => return Ok(base.clone()),
        (None, page) => format!("latest-updates/{page}/"),
    };

    base.join(&path)
        .map_err(|e| BridgeError::Parse(format!("cannot build listing URL from {base}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.wow.xxx/es/").unwrap()
    }

    #[test]
    fn skip_maps_to_page() {
        assert_eq!(page_for_skip(0, 24), 1);
        assert_eq!(page_for_skip(23, 24), 1);
        assert_eq!(page_for_skip(24, 24), 2);
        assert_eq!(page_for_skip(30, 24), 2);
        assert_eq!(page_for_skip(48, 24), 3);
        assert_eq!(page_for_skip(5, 0), 6);
    }

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(search_slug("the matrix"), "the-matrix");
        assert_eq!(search_slug("  the \t  matrix\nreloaded "), "the-matrix-reloaded");
        assert_eq!(search_slug("   "), "");
    }

    #[test]
    fn front_page_is_base() {
        assert_eq!(listing_url(&base(), 1, None).unwrap().as_str(), "https://www.wow.xxx/es/");
    }

    #[test]
    fn later_pages_use_latest_updates() {
        assert_eq!(
            listing_url(&base(), 3, None).unwrap().as_str(),
            "https://www.wow.xxx/es/latest-updates/3/"
        );
    }

    #[test]
    fn search_first_page_has_no_page_segment() {
        let url = listing_url(&base(), page_for_skip(0, 24), Some("the matrix")).unwrap();
        assert_eq!(url.as_str(), "https://www.wow.xxx/es/search/the-matrix/relevance/");
    }

    #[test]
    fn search_later_page() {
        let url = listing_url(&base(), page_for_skip(30, 24), Some("the matrix")).unwrap();
        assert_eq!(url.as_str(), "https://www.wow.xxx/es/search/the-matrix/relevance/2/");
    }

    #[test]
    fn search_query_is_percent_encoded() {
        let url = listing_url(&base(), 1, Some("café & co")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.wow.xxx/es/search/caf%C3%A9-%26-co/relevance/"
        );
    }

    #[test]
    fn blank_query_falls_back_to_latest() {
        assert_eq!(
            listing_url(&base(), 2, Some("   ")).unwrap().as_str(),
            "https://www.wow.xxx/es/latest-updates/2/"
        );
    }
}
