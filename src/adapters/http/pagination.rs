//! Page-number pagination with `links`, `count`, `page` and `results`.

use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::models::{Page, PageRequest, PaginationConfig};

/// Raw `page` and `page_size` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
}

impl PageParams {
    /// Resolve the request against the configured sizes.
    ///
    /// A page number that is not a positive integer is an invalid page;
    /// a bad `page_size` falls back to the default.
    pub fn resolve(&self, config: PaginationConfig) -> Result<PageRequest, DomainError> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or(DomainError::InvalidPage)?,
        };
        let page_size = self
            .page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .map_or(config.page_size, |size| size.min(config.max_page_size));
        Ok(PageRequest::new(page, page_size))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub links: Links,
    pub count: u64,
    pub page: u32,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(page: Page<T>, uri: &Uri) -> Self {
        let next = page.has_next().then(|| page_link(uri, page.page + 1));
        let previous = page.has_previous().then(|| page_link(uri, page.page - 1));
        Self {
            links: Links { next, previous },
            count: page.count,
            page: page.page,
            results: page.items,
        }
    }
}

/// The request path with `page` replaced. Page 1 drops the parameter.
fn page_link(uri: &Uri, page: u32) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some("page"))
        .map(str::to_string)
        .collect();
    if page > 1 {
        pairs.push(format!("page={page}"));
    }

    if pairs.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            page_size: 5,
            max_page_size: 10,
        }
    }

    fn params(page: Option<&str>, page_size: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_defaults_and_clamps() {
        assert_eq!(params(None, None).resolve(config()).unwrap(), PageRequest::new(1, 5));
        assert_eq!(
            params(Some("3"), Some("50")).resolve(config()).unwrap(),
            PageRequest::new(3, 10)
        );
        assert_eq!(
            params(None, Some("zero")).resolve(config()).unwrap(),
            PageRequest::new(1, 5)
        );
        assert!(matches!(
            params(Some("0"), None).resolve(config()),
            Err(DomainError::InvalidPage)
        ));
        assert!(matches!(
            params(Some("abc"), None).resolve(config()),
            Err(DomainError::InvalidPage)
        ));
    }

    #[test]
    fn test_links_keep_other_params() {
        let uri: Uri = "/api/airport/routes/?s_city=Kyiv&page=2&page_size=2".parse().unwrap();
        let page = Page::new(vec![1, 2], 5, PageRequest::new(2, 2)).unwrap();
        let paginated = Paginated::new(page, &uri);

        assert_eq!(
            paginated.links.next.as_deref(),
            Some("/api/airport/routes/?s_city=Kyiv&page_size=2&page=3")
        );
        assert_eq!(
            paginated.links.previous.as_deref(),
            Some("/api/airport/routes/?s_city=Kyiv&page_size=2")
        );
    }

    #[test]
    fn test_single_page_has_no_links() {
        let uri: Uri = "/api/airport/crew/".parse().unwrap();
        let page = Page::new(Vec::<u8>::new(), 0, PageRequest::new(1, 5)).unwrap();
        let paginated = Paginated::new(page, &uri);
        assert_eq!(paginated.links, Links { next: None, previous: None });
        assert_eq!(paginated.count, 0);
    }
}
