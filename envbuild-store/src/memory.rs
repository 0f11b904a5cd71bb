//! In-memory paged store.
//!
//! Serves a fixed list of pages chained by synthetic cursors and records
//! every request, so the listing loop and the runner can be exercised
//! without a network.

use std::sync::{Mutex, PoisonError};

use envbuild_core::Parameter;

use crate::error::StoreError;
use crate::fetch::{BoxFuture, Page, ParameterStore};

const CURSOR_PREFIX: &str = "cursor-";

/// A request seen by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub next_token: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: Vec<Vec<Parameter>>,
    endless: Option<Parameter>,
    failure: Option<(usize, String)>,
    requests: Mutex<Vec<Request>>,
}

impl MemoryStore {
    /// Store whose listing returns `pages` in order, one cursor between each.
    pub fn with_pages(pages: Vec<Vec<Parameter>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Store that never stops handing out cursors.
    pub fn endless(parameter: Parameter) -> Self {
        Self {
            endless: Some(parameter),
            ..Self::default()
        }
    }

    /// Fail the request for page `index` (zero-based) with `message`.
    pub fn failing_at(mut self, index: usize, message: impl Into<String>) -> Self {
        self.failure = Some((index, message.into()));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn page(&self, path: &str, next_token: Option<&str>) -> Result<Page, StoreError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Request {
                path: path.to_string(),
                next_token: next_token.map(str::to_string),
            });

        let index = match next_token {
            None => 0,
            Some(token) => parse_cursor(token)?,
        };

        if let Some((failing, message)) = &self.failure {
            if *failing == index {
                return Err(StoreError::Backend(message.clone()));
            }
        }

        if let Some(parameter) = &self.endless {
            return Ok(Page {
                parameters: vec![parameter.clone()],
                next_token: Some(cursor(index + 1)),
            });
        }

        let Some(entries) = self.pages.get(index) else {
            return Ok(Page::default());
        };
        let parameters = entries
            .iter()
            .filter(|p| is_under(path, &p.name))
            .cloned()
            .collect();
        let next_token = (index + 1 < self.pages.len()).then(|| cursor(index + 1));
        Ok(Page {
            parameters,
            next_token,
        })
    }
}

impl ParameterStore for MemoryStore {
    fn fetch_page(
        &self,
        path: &str,
        next_token: Option<&str>,
    ) -> BoxFuture<'_, Result<Page, StoreError>> {
        Box::pin(std::future::ready(self.page(path, next_token)))
    }
}

fn cursor(index: usize) -> String {
    format!("{CURSOR_PREFIX}{index}")
}

fn parse_cursor(token: &str) -> Result<usize, StoreError> {
    token
        .strip_prefix(CURSOR_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StoreError::Backend(format!("invalid cursor '{token}'")))
}

fn is_under(path: &str, name: &str) -> bool {
    name.strip_prefix(path)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_is_scoped_to_requested_path() {
        let store = MemoryStore::with_pages(vec![vec![
            Parameter::new("/dev/A", "1"),
            Parameter::new("/development/B", "2"),
            Parameter::new("/prod/C", "3"),
        ]]);
        let page = store.page("/dev", None).unwrap();
        assert_eq!(page.parameters, vec![Parameter::new("/dev/A", "1")]);
        assert_eq!(page.next_token, None);
    }

    #[test]
    fn last_page_has_no_cursor() {
        let store = MemoryStore::with_pages(vec![vec![], vec![]]);
        let first = store.page("/dev", None).unwrap();
        assert_eq!(first.next_token.as_deref(), Some("cursor-1"));
        let second = store.page("/dev", first.next_token.as_deref()).unwrap();
        assert_eq!(second.next_token, None);
    }

    #[test]
    fn unknown_cursor_is_rejected() {
        let store = MemoryStore::default();
        let err = store.page("/dev", Some("bogus")).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }
}
