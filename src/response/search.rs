//! `FT.SEARCH` replies.

use std::slice;

use ahash::AHashMap;
use serde::Serialize;

use crate::error::{FtSearchError, Result};
use crate::protocol::Reply;
use crate::query::QueryOptions;
use crate::response::document::{Document, DocumentKind};
use crate::response::meta::ReplyMeta;
use crate::response::{Encoding, required};

const CONTEXT: &str = "FT.SEARCH";

/// One matched record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// The key of the matched document.
    pub key: String,
    /// Relevance score; 0 unless scores were requested.
    pub score: f64,
    /// Score explanation, present only when both scores and explanations
    /// were requested.
    pub explanation: Option<Reply>,
    /// Document content; `None` when content was suppressed.
    pub content: Option<Document>,
}

impl QueryResult {
    pub fn new<S: Into<String>>(key: S) -> Self {
        QueryResult {
            key: key.into(),
            score: 0.0,
            explanation: None,
            content: None,
        }
    }
}

/// The decoded records of one reply, in reply order.
///
/// A key index is kept alongside the records for lookup by key. It is
/// rebuilt from scratch whenever the records are replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResults {
    /// Number of matches reported by the engine, across all pages.
    pub total_results: i64,
    pub meta: ReplyMeta,
    results: Vec<QueryResult>,
    #[serde(skip)]
    keymap: AHashMap<String, usize>,
}

impl QueryResults {
    pub fn new(total_results: i64, meta: ReplyMeta, results: Vec<QueryResult>) -> Self {
        let mut query_results = QueryResults {
            total_results,
            meta,
            results: Vec::new(),
            keymap: AHashMap::new(),
        };
        query_results.set_results(results);
        query_results
    }

    /// Replace the records and rebuild the key index.
    pub fn set_results(&mut self, results: Vec<QueryResult>) {
        self.keymap = results
            .iter()
            .enumerate()
            .map(|(n, result)| (result.key.clone(), n))
            .collect();
        self.results = results;
    }

    pub fn results(&self) -> &[QueryResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<QueryResult> {
        self.results
    }

    /// Get the record stored under `key`, if it is in this reply.
    pub fn key(&self, key: &str) -> Option<&QueryResult> {
        self.keymap.get(key).and_then(|n| self.results.get(*n))
    }

    /// Keys of all records, in reply order.
    pub fn keys(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.key.as_str()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&QueryResult> {
        self.results.get(index)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, QueryResult> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a QueryResults {
    type Item = &'a QueryResult;
    type IntoIter = slice::Iter<'a, QueryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Decode an `FT.SEARCH` reply produced for `options`.
///
/// The options are needed to know which parts each record carries. Any
/// malformed record fails the whole reply.
pub fn decode_search(
    reply: &Reply,
    options: &QueryOptions,
    kind: DocumentKind,
) -> Result<QueryResults> {
    match Encoding::detect(reply, CONTEXT)? {
        Encoding::Legacy => decode_legacy(reply.array_value(CONTEXT)?, options, kind),
        Encoding::Modern => decode_modern(reply, options, kind),
    }
}

/// Decode a legacy reply: the match count followed by fixed-width records.
pub fn decode_legacy(
    items: &[Reply],
    options: &QueryOptions,
    kind: DocumentKind,
) -> Result<QueryResults> {
    let (total, records) = items
        .split_first()
        .ok_or_else(|| FtSearchError::decode("FT.SEARCH: empty reply"))?;
    let total_results = total.i64_value("FT.SEARCH total")?;

    let size = options.result_size();
    if records.len() % size != 0 {
        return Err(FtSearchError::decode(format!(
            "FT.SEARCH: {} reply elements do not divide into records of {size}",
            records.len()
        )));
    }

    let results = records
        .chunks(size)
        .map(|slot| decode_legacy_record(slot, options, kind))
        .collect::<Result<Vec<_>>>()?;

    Ok(QueryResults::new(total_results, ReplyMeta::legacy(), results))
}

fn decode_legacy_record(
    slot: &[Reply],
    options: &QueryOptions,
    kind: DocumentKind,
) -> Result<QueryResult> {
    let mut parts = slot.iter();
    let mut next = || {
        parts
            .next()
            .ok_or_else(|| FtSearchError::decode("FT.SEARCH: truncated record"))
    };

    let mut result = QueryResult::new(next()?.str_value("FT.SEARCH key")?);

    if options.scores_requested() {
        let score = next()?;
        if options.explains_scores() {
            let (score, explanation) = explained_score(score)?;
            result.score = score;
            result.explanation = Some(explanation);
        } else {
            result.score = score.f64_value("FT.SEARCH score")?;
        }
    }

    if !options.no_content {
        let content = next()?;
        result.content = Some(Document::from_reply(kind, content, "FT.SEARCH content")?);
    }

    Ok(result)
}

/// Decode a modern reply: a map with `total_results` and `results`.
pub fn decode_modern(
    reply: &Reply,
    options: &QueryOptions,
    kind: DocumentKind,
) -> Result<QueryResults> {
    let total_results = required(reply, "total_results", CONTEXT)?.i64_value("FT.SEARCH total")?;
    let meta = ReplyMeta::from_modern(reply, CONTEXT)?;

    let results = required(reply, "results", CONTEXT)?
        .array_value("FT.SEARCH results")?
        .iter()
        .map(|record| decode_modern_record(record, options, kind))
        .collect::<Result<Vec<_>>>()?;

    Ok(QueryResults::new(total_results, meta, results))
}

fn decode_modern_record(
    record: &Reply,
    options: &QueryOptions,
    kind: DocumentKind,
) -> Result<QueryResult> {
    if !matches!(record, Reply::Map(_)) {
        return Err(FtSearchError::unexpected_type(
            "FT.SEARCH record",
            "map",
            record.kind(),
        ));
    }

    let key = required(record, "id", "FT.SEARCH record")?.str_value("FT.SEARCH key")?;
    let mut result = QueryResult::new(key);

    if options.scores_requested() {
        let score = required(record, "score", "FT.SEARCH record")?;
        if options.explains_scores() {
            let (score, explanation) = explained_score(score)?;
            result.score = score;
            result.explanation = Some(explanation);
        } else {
            result.score = score.f64_value("FT.SEARCH score")?;
        }
    }

    if !options.no_content {
        let content = required(record, "extra_attributes", "FT.SEARCH record")?;
        result.content = Some(Document::from_reply(kind, content, "FT.SEARCH content")?);
    }

    Ok(result)
}

/// Split a `[score, explanation]` pair.
fn explained_score(reply: &Reply) -> Result<(f64, Reply)> {
    match reply.array_value("FT.SEARCH explained score")? {
        [score, explanation] => Ok((
            score.f64_value("FT.SEARCH score")?,
            explanation.clone(),
        )),
        other => Err(FtSearchError::decode(format!(
            "FT.SEARCH: explained score has {} elements, expected 2",
            other.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryBuilder;

    fn hash_content(name: &str) -> Reply {
        Reply::Array(vec![Reply::bulk("name"), Reply::bulk(name)])
    }

    #[test]
    fn test_legacy_with_content() {
        let reply = Reply::Array(vec![
            Reply::Integer(2),
            Reply::bulk("account:1"),
            hash_content("a"),
            Reply::bulk("account:2"),
            hash_content("b"),
        ]);

        let results = decode_search(&reply, &QueryOptions::new(), DocumentKind::Hash).unwrap();
        assert_eq!(results.total_results, 2);
        assert_eq!(results.keys(), vec!["account:1", "account:2"]);
        assert_eq!(results.meta.format, "STRING");

        let second = results.key("account:2").unwrap();
        assert_eq!(second.score, 0.0);
        assert_eq!(second.content.as_ref().unwrap().get("name"), Some("b"));
        assert!(results.key("account:3").is_none());
    }

    #[test]
    fn test_legacy_no_content() {
        let reply = Reply::Array(vec![Reply::Integer(1), Reply::bulk("account:1121175")]);
        let options = QueryBuilder::new().no_content().build();

        let results = decode_search(&reply, &options, DocumentKind::Hash).unwrap();
        assert_eq!(results.len(), 1);
        let result = results.key("account:1121175").unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.content.is_none());
        assert!(result.explanation.is_none());
    }

    #[test]
    fn test_legacy_explained_scores() {
        let explanation = Reply::Array(vec![Reply::bulk("Final TFIDF : words: 1")]);
        let reply = Reply::Array(vec![
            Reply::Integer(1),
            Reply::bulk("doc:1"),
            Reply::Array(vec![Reply::bulk("1.5"), explanation.clone()]),
            hash_content("a"),
        ]);
        let options = QueryBuilder::new().with_scores().explain_score().build();

        let results = decode_search(&reply, &options, DocumentKind::Hash).unwrap();
        let result = results.get(0).unwrap();
        assert_eq!(result.score, 1.5);
        assert_eq!(result.explanation, Some(explanation));
    }

    #[test]
    fn test_legacy_leftover_tokens() {
        let reply = Reply::Array(vec![
            Reply::Integer(1),
            Reply::bulk("doc:1"),
            hash_content("a"),
            Reply::bulk("stray"),
        ]);
        let err = decode_search(&reply, &QueryOptions::new(), DocumentKind::Hash).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_legacy_content_must_be_a_list() {
        let reply = Reply::Array(vec![
            Reply::Integer(1),
            Reply::bulk("doc:1"),
            Reply::bulk("not a list"),
        ]);
        assert!(decode_search(&reply, &QueryOptions::new(), DocumentKind::Hash).is_err());
    }

    #[test]
    fn test_bad_score_is_an_error() {
        let reply = Reply::Array(vec![
            Reply::Integer(1),
            Reply::bulk("doc:1"),
            Reply::bulk("high"),
            hash_content("a"),
        ]);
        let options = QueryBuilder::new().with_scores().build();
        assert!(decode_search(&reply, &options, DocumentKind::Hash).is_err());
    }

    #[test]
    fn test_modern_record() {
        let reply = Reply::map(vec![
            ("attributes", Reply::Array(Vec::new())),
            ("format", Reply::bulk("STRING")),
            ("total_results", Reply::Integer(1)),
            (
                "results",
                Reply::Array(vec![Reply::map(vec![
                    ("id", Reply::bulk("doc:1")),
                    ("score", Reply::Double(0.5)),
                    (
                        "extra_attributes",
                        Reply::map(vec![("$", Reply::bulk(r#"{"a":1}"#))]),
                    ),
                ])]),
            ),
        ]);
        let options = QueryBuilder::new().with_scores().build();

        let results = decode_search(&reply, &options, DocumentKind::Json).unwrap();
        assert_eq!(results.total_results, 1);
        let result = results.key("doc:1").unwrap();
        assert_eq!(result.score, 0.5);
        let content = result.content.as_ref().unwrap();
        assert_eq!(content.kind(), DocumentKind::Json);
        assert_eq!(content.get("$"), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_modern_missing_content() {
        let reply = Reply::map(vec![
            ("total_results", Reply::Integer(1)),
            (
                "results",
                Reply::Array(vec![Reply::map(vec![("id", Reply::bulk("doc:1"))])]),
            ),
        ]);
        assert!(decode_search(&reply, &QueryOptions::new(), DocumentKind::Hash).is_err());

        let options = QueryBuilder::new().no_content().build();
        let results = decode_search(&reply, &options, DocumentKind::Hash).unwrap();
        assert_eq!(results.keys(), vec!["doc:1"]);
    }

    #[test]
    fn test_set_results_rebuilds_index() {
        let mut results = QueryResults::new(
            2,
            ReplyMeta::legacy(),
            vec![QueryResult::new("a"), QueryResult::new("b")],
        );
        assert!(results.key("a").is_some());

        results.set_results(vec![QueryResult::new("c")]);
        assert!(results.key("a").is_none());
        assert_eq!(results.key("c").unwrap().key, "c");
        assert_eq!(results.keys(), vec!["c"]);
    }
}
