//! Store abstraction and the paginated listing loop.

use std::future::Future;
use std::pin::Pin;

use envbuild_core::{Environment, Parameter};

use crate::error::StoreError;

/// Boxed future for async trait methods that need `dyn` dispatch.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One page of a recursive path listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub parameters: Vec<Parameter>,
    /// Cursor for the next page; `None` (or empty) when the listing is done.
    pub next_token: Option<String>,
}

/// A hierarchical key-value store that can list entries under a path.
pub trait ParameterStore: Send + Sync {
    /// Fetch one page of entries under `path`, including nested sub-paths.
    fn fetch_page(&self, path: &str, next_token: Option<&str>)
        -> BoxFuture<'_, Result<Page, StoreError>>;
}

/// List every parameter under `/<environment>`, in store order.
///
/// Stops when the store returns no cursor. A store that keeps handing out
/// cursors is cut off after `max_pages` pages with
/// [`StoreError::PageLimitExceeded`]; no partial listing is returned.
pub async fn fetch_parameters<S>(
    store: &S,
    environment: &Environment,
    max_pages: usize,
) -> Result<Vec<Parameter>, StoreError>
where
    S: ParameterStore + ?Sized,
{
    if max_pages == 0 {
        return Err(StoreError::InvalidPageLimit);
    }

    let path = environment.namespace_path();
    let mut parameters = Vec::new();
    let mut next_token: Option<String> = None;

    for page_number in 1..=max_pages {
        let page = store.fetch_page(&path, next_token.as_deref()).await?;
        tracing::debug!(
            "page {} under {}: {} parameters",
            page_number,
            path,
            page.parameters.len()
        );
        parameters.extend(page.parameters);

        match page.next_token.filter(|token| !token.is_empty()) {
            Some(token) => next_token = Some(token),
            None => return Ok(parameters),
        }
    }

    Err(StoreError::PageLimitExceeded { path, max_pages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn dev() -> Environment {
        Environment::parse("dev").unwrap()
    }

    #[tokio::test]
    async fn two_pages_are_joined_in_page_order() {
        let store = MemoryStore::with_pages(vec![
            vec![Parameter::new("/dev/A", "1")],
            vec![Parameter::new("/dev/B", "2")],
        ]);
        let params = fetch_parameters(&store, &dev(), 10).await.unwrap();
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["/dev/A", "/dev/B"]);
        assert_eq!(store.requests().len(), 2);
    }

    #[tokio::test]
    async fn empty_namespace_is_not_an_error() {
        let store = MemoryStore::default();
        let params = fetch_parameters(&store, &dev(), 10).await.unwrap();
        assert!(params.is_empty());
        assert_eq!(store.requests().len(), 1, "one request, no cursor follow-up");
    }

    #[tokio::test]
    async fn requests_use_namespace_path_and_follow_cursor() {
        let store = MemoryStore::with_pages(vec![
            vec![Parameter::new("/dev/A", "1")],
            vec![Parameter::new("/dev/B", "2")],
        ]);
        fetch_parameters(&store, &dev(), 10).await.unwrap();
        let requests = store.requests();
        assert_eq!(requests[0].path, "/dev");
        assert_eq!(requests[0].next_token, None);
        assert_eq!(requests[1].path, "/dev");
        assert!(requests[1].next_token.is_some());
    }

    #[tokio::test]
    async fn endless_cursor_hits_page_limit() {
        let store = MemoryStore::endless(Parameter::new("/dev/LOOP", "x"));
        let err = fetch_parameters(&store, &dev(), 3).await.unwrap_err();
        assert!(
            matches!(err, StoreError::PageLimitExceeded { max_pages: 3, .. }),
            "got: {err}"
        );
        assert_eq!(store.requests().len(), 3);
    }

    #[tokio::test]
    async fn exact_page_count_fits_under_limit() {
        let store = MemoryStore::with_pages(vec![
            vec![Parameter::new("/dev/A", "1")],
            vec![Parameter::new("/dev/B", "2")],
        ]);
        let params = fetch_parameters(&store, &dev(), 2).await.unwrap();
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    async fn zero_page_limit_is_rejected() {
        let store = MemoryStore::default();
        let err = fetch_parameters(&store, &dev(), 0).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPageLimit));
        assert!(store.requests().is_empty());
    }

    #[tokio::test]
    async fn failure_mid_listing_discards_earlier_pages() {
        let store = MemoryStore::with_pages(vec![
            vec![Parameter::new("/dev/A", "1")],
            vec![Parameter::new("/dev/B", "2")],
        ])
        .failing_at(1, "AccessDeniedException");
        let err = fetch_parameters(&store, &dev(), 10).await.unwrap_err();
        assert!(err.to_string().contains("AccessDeniedException"));
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let store = MemoryStore::with_pages(vec![vec![Parameter::new("/dev/A", "1")]]);
        let dyn_store: &dyn ParameterStore = &store;
        let params = fetch_parameters(dyn_store, &dev(), 10).await.unwrap();
        assert_eq!(params, vec![Parameter::new("/dev/A", "1")]);
    }
}
