//! Paginated walking of search results.

use log::debug;

use crate::client::search_args;
use crate::error::Result;
use crate::protocol::Transport;
use crate::query::QueryOptions;
use crate::response::{DocumentKind, QueryResult, QueryResults, decode_search};

/// Walks all records matching a search, one page per request.
///
/// Created from the first page of results. When a page is used up the same
/// search is issued again with the offset moved forward by the number of
/// records in that page. The walk ends once as many records as the engine
/// reported in total have been seen, or when a fetched page is empty.
///
/// The iterator only moves forward. To start over, issue a new search. If
/// the index changes between pages, records may be skipped or repeated.
pub struct SearchIterator<T: Transport> {
    transport: T,
    index: String,
    query: String,
    options: QueryOptions,
    kind: DocumentKind,
    page: QueryResults,
    position: Option<usize>,
    consumed: u64,
    done: bool,
}

impl<T: Transport> SearchIterator<T> {
    /// Create an iterator positioned before the first record of `first`.
    ///
    /// `first` must be the decoded reply to the search described by
    /// `index`, `query` and `options`.
    pub fn new<S: Into<String>, Q: Into<String>>(
        transport: T,
        index: S,
        query: Q,
        options: QueryOptions,
        kind: DocumentKind,
        first: QueryResults,
    ) -> Self {
        SearchIterator {
            transport,
            index: index.into(),
            query: query.into(),
            options,
            kind,
            page: first,
            position: None,
            consumed: 0,
            done: false,
        }
    }

    /// Move to the next record, fetching the next page when needed.
    ///
    /// Returns `Ok(false)` once the results are exhausted. Errors from the
    /// transport or the decoder are returned as errors and end the walk.
    pub fn advance(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }

        let next = self.position.map_or(0, |p| p + 1);
        if next < self.page.len() {
            self.position = Some(next);
            self.consumed += 1;
            return Ok(true);
        }

        if self.page.is_empty() || self.consumed >= self.total_results() {
            self.done = true;
            return Ok(false);
        }

        match self.fetch_next_page() {
            Ok(true) => {
                self.position = Some(0);
                self.consumed += 1;
                Ok(true)
            }
            Ok(false) => {
                self.done = true;
                Ok(false)
            }
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }

    /// The record the iterator is positioned on.
    pub fn current(&self) -> Option<&QueryResult> {
        self.position.and_then(|p| self.page.get(p))
    }

    /// Total matches reported by the most recent page.
    pub fn total_results(&self) -> u64 {
        u64::try_from(self.page.total_results).unwrap_or(0)
    }

    /// Number of records yielded so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// The options used for the most recent request.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    fn fetch_next_page(&mut self) -> Result<bool> {
        self.options.limit.advance(self.page.len() as u64);
        debug!(
            "fetching {} from offset {} (limit {})",
            self.index, self.options.limit.offset, self.options.limit.num
        );

        let reply = self
            .transport
            .execute(search_args(&self.index, &self.query, &self.options))?;
        self.page = decode_search(&reply, &self.options, self.kind)?;
        Ok(!self.page.is_empty())
    }
}

impl<T: Transport> Iterator for SearchIterator<T> {
    type Item = Result<QueryResult>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.current().cloned().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::FtSearchError;
    use crate::protocol::{Arg, Reply};
    use crate::query::QueryBuilder;
    use crate::response::ReplyMeta;

    struct Pages {
        replies: VecDeque<Reply>,
        requests: Vec<Vec<Arg>>,
    }

    impl Transport for Pages {
        fn execute(&mut self, args: Vec<Arg>) -> Result<Reply> {
            self.requests.push(args);
            self.replies
                .pop_front()
                .ok_or_else(|| FtSearchError::transport("no more replies"))
        }
    }

    fn page(total: i64, keys: &[&str]) -> Reply {
        let mut items = vec![Reply::Integer(total)];
        items.extend(keys.iter().map(|k| Reply::bulk(*k)));
        Reply::Array(items)
    }

    fn first_page(total: i64, keys: &[&str]) -> QueryResults {
        QueryResults::new(
            total,
            ReplyMeta::legacy(),
            keys.iter().map(|k| QueryResult::new(*k)).collect(),
        )
    }

    #[test]
    fn test_walks_all_pages() {
        let mut transport = Pages {
            replies: VecDeque::from(vec![page(5, &["c", "d"]), page(5, &["e"])]),
            requests: Vec::new(),
        };
        let options = QueryBuilder::new().no_content().limit(0, 2).build();

        let keys = {
            let iter = SearchIterator::new(
                &mut transport,
                "idx",
                "*",
                options,
                DocumentKind::Hash,
                first_page(5, &["a", "b"]),
            );
            iter.map(|r| r.map(|r| r.key)).collect::<Result<Vec<_>>>().unwrap()
        };

        assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(transport.requests.len(), 2);
        assert_eq!(
            transport.requests[0],
            vec!["FT.SEARCH", "idx", "*", "NOCONTENT", "LIMIT", "2", "2"]
        );
        assert_eq!(
            transport.requests[1],
            vec!["FT.SEARCH", "idx", "*", "NOCONTENT", "LIMIT", "4", "2"]
        );
    }

    #[test]
    fn test_stops_on_empty_page() {
        let mut transport = Pages {
            replies: VecDeque::from(vec![page(10, &[])]),
            requests: Vec::new(),
        };
        let options = QueryBuilder::new().no_content().limit(0, 1).build();
        let mut iter = SearchIterator::new(
            &mut transport,
            "idx",
            "*",
            options,
            DocumentKind::Hash,
            first_page(10, &["a"]),
        );

        assert!(iter.advance().unwrap());
        assert_eq!(iter.current().unwrap().key, "a");
        assert!(!iter.advance().unwrap());
        assert!(!iter.advance().unwrap());
        assert_eq!(iter.consumed(), 1);
    }

    #[test]
    fn test_empty_first_page() {
        let mut transport = Pages {
            replies: VecDeque::new(),
            requests: Vec::new(),
        };
        let mut iter = SearchIterator::new(
            &mut transport,
            "idx",
            "*",
            QueryOptions::new(),
            DocumentKind::Hash,
            first_page(0, &[]),
        );
        assert!(!iter.advance().unwrap());
        assert!(iter.current().is_none());
        drop(iter);
        assert!(transport.requests.is_empty());
    }

    #[test]
    fn test_decode_error_is_not_exhaustion() {
        let mut transport = Pages {
            replies: VecDeque::from(vec![Reply::Integer(3)]),
            requests: Vec::new(),
        };
        let options = QueryBuilder::new().no_content().limit(0, 1).build();
        let mut iter = SearchIterator::new(
            &mut transport,
            "idx",
            "*",
            options,
            DocumentKind::Hash,
            first_page(2, &["a"]),
        );

        assert!(iter.advance().unwrap());
        assert!(iter.advance().unwrap_err().is_decode());
        assert!(!iter.advance().unwrap());
    }
}
