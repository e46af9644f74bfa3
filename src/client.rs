//! The search client.
//!
//! [`SearchClient`] turns option models into commands, hands them to a
//! [`Transport`] and decodes the replies. It holds no connection state of
//! its own.
//!
//! # Examples
//!
//! ```no_run
//! use ftsearch::client::SearchClient;
//! use ftsearch::error::Result;
//! use ftsearch::protocol::Transport;
//! use ftsearch::query::QueryBuilder;
//!
//! fn list_accounts<T: Transport>(client: &mut SearchClient<T>) -> Result<Vec<String>> {
//!     let options = QueryBuilder::new().no_content().limit(0, 100).build();
//!     let mut keys = Vec::new();
//!     for result in client.search_iter("customers", "*", options)? {
//!         keys.push(result?.key);
//!     }
//!     Ok(keys)
//! }
//! ```

use log::debug;

use crate::aggregate::AggregateOptions;
use crate::config::ClientConfig;
use crate::error::{FtSearchError, Result};
use crate::iterator::SearchIterator;
use crate::protocol::{Arg, Reply, Transport};
use crate::query::QueryOptions;
use crate::response::{AggregateResults, DocumentKind, Info, QueryResults, decode_aggregate, decode_search};
use crate::schema::IndexOptions;
use crate::serialize::ToArgs;

/// Build the full `FT.SEARCH` command.
pub fn search_args(index: &str, query: &str, options: &QueryOptions) -> Vec<Arg> {
    let mut args = vec![Arg::from("FT.SEARCH"), Arg::from(index), Arg::from(query)];
    options.write_args(&mut args);
    args
}

/// Build the full `FT.AGGREGATE` command.
pub fn aggregate_args(index: &str, query: &str, options: &AggregateOptions) -> Vec<Arg> {
    let mut args = vec![
        Arg::from("FT.AGGREGATE"),
        Arg::from(index),
        Arg::from(query),
    ];
    options.write_args(&mut args);
    args
}

/// Build the full `FT.CREATE` command.
pub fn create_args(index: &str, options: &IndexOptions) -> Vec<Arg> {
    let mut args = vec![Arg::from("FT.CREATE"), Arg::from(index)];
    options.write_args(&mut args);
    args
}

/// A client for the search commands, generic over the transport.
#[derive(Debug)]
pub struct SearchClient<T: Transport> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> SearchClient<T> {
    /// Create a client with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        SearchClient { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search options seeded from the client configuration.
    pub fn query_options(&self) -> QueryOptions {
        self.config.query_options()
    }

    /// Aggregate options seeded from the client configuration.
    pub fn aggregate_options(&self) -> AggregateOptions {
        self.config.aggregate_options()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn execute(&mut self, args: Vec<Arg>) -> Result<Reply> {
        if let Some(command) = args.first() {
            debug!("{command}: {} arguments", args.len() - 1);
        }
        self.transport.execute(args)
    }

    /// Search an index over hashes.
    pub fn search(
        &mut self,
        index: &str,
        query: &str,
        options: &QueryOptions,
    ) -> Result<QueryResults> {
        self.search_kind(index, query, options, DocumentKind::Hash)
    }

    /// Search an index over JSON documents.
    pub fn search_json(
        &mut self,
        index: &str,
        query: &str,
        options: &QueryOptions,
    ) -> Result<QueryResults> {
        self.search_kind(index, query, options, DocumentKind::Json)
    }

    fn search_kind(
        &mut self,
        index: &str,
        query: &str,
        options: &QueryOptions,
        kind: DocumentKind,
    ) -> Result<QueryResults> {
        let reply = self.execute(search_args(index, query, options))?;
        decode_search(&reply, options, kind)
    }

    /// Search an index over hashes and walk every match, page by page.
    ///
    /// The first page is fetched before this returns. The iterator owns
    /// `options` and moves its offset forward as pages are consumed.
    pub fn search_iter(
        &mut self,
        index: &str,
        query: &str,
        options: QueryOptions,
    ) -> Result<SearchIterator<&mut T>> {
        self.search_iter_kind(index, query, options, DocumentKind::Hash)
    }

    /// Like [`search_iter`](Self::search_iter) for an index over JSON
    /// documents.
    pub fn search_json_iter(
        &mut self,
        index: &str,
        query: &str,
        options: QueryOptions,
    ) -> Result<SearchIterator<&mut T>> {
        self.search_iter_kind(index, query, options, DocumentKind::Json)
    }

    fn search_iter_kind(
        &mut self,
        index: &str,
        query: &str,
        options: QueryOptions,
        kind: DocumentKind,
    ) -> Result<SearchIterator<&mut T>> {
        let first = self.search_kind(index, query, &options, kind)?;
        Ok(SearchIterator::new(
            &mut self.transport,
            index,
            query,
            options,
            kind,
            first,
        ))
    }

    /// Run an aggregation pipeline.
    pub fn aggregate(
        &mut self,
        index: &str,
        query: &str,
        options: &AggregateOptions,
    ) -> Result<AggregateResults> {
        let reply = self.execute(aggregate_args(index, query, options))?;
        decode_aggregate(&reply)
    }

    /// Read the next batch of rows from an aggregation cursor.
    pub fn cursor_read(
        &mut self,
        index: &str,
        cursor_id: i64,
        count: Option<u64>,
    ) -> Result<AggregateResults> {
        let mut args = vec![
            Arg::from("FT.CURSOR"),
            Arg::from("READ"),
            Arg::from(index),
            Arg::from(cursor_id),
        ];
        if let Some(count) = count {
            args.push(Arg::from("COUNT"));
            args.push(Arg::from(count));
        }
        let reply = self.execute(args)?;
        decode_aggregate(&reply)
    }

    /// Release an aggregation cursor.
    pub fn cursor_del(&mut self, index: &str, cursor_id: i64) -> Result<()> {
        let reply = self.execute(vec![
            Arg::from("FT.CURSOR"),
            Arg::from("DEL"),
            Arg::from(index),
            Arg::from(cursor_id),
        ])?;
        expect_ok(&reply, "FT.CURSOR DEL")
    }

    /// Create an index.
    pub fn create_index(&mut self, index: &str, options: &IndexOptions) -> Result<()> {
        let reply = self.execute(create_args(index, options))?;
        expect_ok(&reply, "FT.CREATE")
    }

    /// Describe an index.
    pub fn info(&mut self, index: &str) -> Result<Info> {
        let reply = self.execute(vec![Arg::from("FT.INFO"), Arg::from(index)])?;
        Info::from_reply(&reply)
    }
}

fn expect_ok(reply: &Reply, context: &str) -> Result<()> {
    match reply {
        Reply::Status(s) | Reply::Bulk(s) if s.eq_ignore_ascii_case("OK") => Ok(()),
        Reply::Integer(1) | Reply::Boolean(true) => Ok(()),
        other => Err(FtSearchError::decode(format!(
            "{context}: unexpected reply {other:?}"
        ))),
    }
}
