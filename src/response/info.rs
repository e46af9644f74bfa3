//! `FT.INFO` replies.

use std::time::Duration;

use serde::Serialize;

use crate::error::{FtSearchError, Result};
use crate::protocol::Reply;
use crate::response::Encoding;
use crate::schema::{IndexOn, IndexOptions, SchemaAttribute};

const CONTEXT: &str = "FT.INFO";

/// Garbage collector statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GcStats {
    pub bytes_collected: i64,
    pub total_ms_run: Duration,
    pub total_cycles: i64,
    pub average_cycle_time: Duration,
    pub last_run_time: Duration,
    pub gc_numeric_trees_missed: i64,
    pub gc_blocks_denied: i64,
}

/// Aggregation cursor statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CursorStats {
    pub global_idle: i64,
    pub global_total: i64,
    pub index_capacity: i64,
    pub index_total: i64,
}

/// How often each query dialect has been used against the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DialectStats {
    pub dialect_1: i64,
    pub dialect_2: i64,
    pub dialect_3: i64,
    pub dialect_4: i64,
}

/// A snapshot of an index definition and its statistics.
///
/// Counters missing from the reply are left at zero; a counter that is
/// present but not numeric is a decode error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub index_name: String,
    /// The index definition, rebuilt so that it could be passed back to
    /// `FT.CREATE`.
    pub index: IndexOptions,
    pub num_docs: i64,
    pub max_doc_id: i64,
    pub num_terms: i64,
    pub num_records: i64,
    pub indexing: f64,
    pub percent_indexed: f64,
    pub hash_indexing_failures: i64,
    pub total_inverted_index_blocks: i64,
    pub inverted_size_mb: f64,
    pub vector_index_size_mb: f64,
    pub doc_table_size_mb: f64,
    pub offset_vectors_size_mb: f64,
    pub sortable_values_size_mb: f64,
    pub key_table_size_mb: f64,
    pub records_per_doc_avg: f64,
    pub bytes_per_record_avg: f64,
    pub offsets_per_term_avg: f64,
    pub offset_bits_per_record_avg: f64,
    pub total_indexing_time: Duration,
    pub number_of_uses: i64,
    pub gc_stats: GcStats,
    pub cursor_stats: CursorStats,
    pub dialect_stats: DialectStats,
}

impl Info {
    /// Decode an `FT.INFO` reply in either encoding.
    pub fn from_reply(reply: &Reply) -> Result<Self> {
        Encoding::detect(reply, CONTEXT)?;
        let info = Section::new(reply, CONTEXT)?;

        let index_name = info
            .get("index_name")
            .ok_or_else(|| FtSearchError::decode("FT.INFO: reply has no 'index_name' entry"))?
            .str_value("FT.INFO index_name")?
            .to_string();

        Ok(Info {
            index_name,
            index: parse_index_options(&info)?,
            num_docs: info.i64("num_docs")?,
            max_doc_id: info.i64("max_doc_id")?,
            num_terms: info.i64("num_terms")?,
            num_records: info.i64("num_records")?,
            indexing: info.f64("indexing")?,
            percent_indexed: info.f64("percent_indexed")?,
            hash_indexing_failures: info.i64("hash_indexing_failures")?,
            total_inverted_index_blocks: info.i64("total_inverted_index_blocks")?,
            inverted_size_mb: info.f64("inverted_sz_mb")?,
            vector_index_size_mb: info.f64("vector_index_sz_mb")?,
            doc_table_size_mb: info.f64("doc_table_size_mb")?,
            offset_vectors_size_mb: info.f64("offset_vectors_sz_mb")?,
            sortable_values_size_mb: info.f64("sortable_values_size_mb")?,
            key_table_size_mb: info.f64("key_table_size_mb")?,
            records_per_doc_avg: info.f64("records_per_doc_avg")?,
            bytes_per_record_avg: info.f64("bytes_per_record_avg")?,
            offsets_per_term_avg: info.f64("offsets_per_term_avg")?,
            offset_bits_per_record_avg: info.f64("offset_bits_per_record_avg")?,
            total_indexing_time: info.millis("total_indexing_time")?,
            number_of_uses: info.i64("number_of_uses")?,
            gc_stats: parse_gc_stats(&info)?,
            cursor_stats: parse_cursor_stats(&info)?,
            dialect_stats: parse_dialect_stats(&info)?,
        })
    }
}

/// A list of alternating names and values, or a map, viewed by name.
struct Section<'a> {
    context: &'a str,
    entries: Vec<(&'a str, &'a Reply)>,
}

impl<'a> Section<'a> {
    fn new(reply: &'a Reply, context: &'a str) -> Result<Self> {
        let entries = reply
            .pairs(context)?
            .into_iter()
            .map(|(name, value)| Ok((name.str_value(context)?, value)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Section { context, entries })
    }

    /// A nested section; absent sections are empty.
    fn section(&self, name: &'a str) -> Result<Section<'a>> {
        match self.get(name) {
            Some(reply) => Section::new(reply, name),
            None => Ok(Section {
                context: name,
                entries: Vec::new(),
            }),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Reply> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    fn string(&self, name: &str) -> Result<Option<String>> {
        match self.get(name) {
            None | Some(Reply::Nil) => Ok(None),
            Some(value) => Ok(Some(value.str_value(self.context)?.to_string())),
        }
    }

    fn strings(&self, name: &str) -> Result<Vec<String>> {
        match self.get(name) {
            None | Some(Reply::Nil) => Ok(Vec::new()),
            Some(value) => value
                .array_value(self.context)?
                .iter()
                .map(|item| Ok(item.str_value(self.context)?.to_string()))
                .collect(),
        }
    }

    fn i64(&self, name: &str) -> Result<i64> {
        match self.get(name) {
            None => Ok(0),
            Some(value) => value.i64_value(&format!("{} {name}", self.context)),
        }
    }

    fn f64(&self, name: &str) -> Result<f64> {
        match self.get(name) {
            None => Ok(0.0),
            Some(value) => value.f64_value(&format!("{} {name}", self.context)),
        }
    }

    /// A millisecond count as a duration. NaN (reported before any work
    /// was done) reads as zero.
    fn millis(&self, name: &str) -> Result<Duration> {
        let ms = self.f64(name)?;
        if ms.is_nan() {
            return Ok(Duration::ZERO);
        }
        Duration::try_from_secs_f64(ms / 1000.0).map_err(|e| {
            FtSearchError::decode(format!("{} {name}: {ms} is not a duration: {e}", self.context))
        })
    }
}

fn parse_gc_stats(info: &Section<'_>) -> Result<GcStats> {
    let gc = info.section("gc_stats")?;
    Ok(GcStats {
        bytes_collected: gc.i64("bytes_collected")?,
        total_ms_run: gc.millis("total_ms_run")?,
        total_cycles: gc.i64("total_cycles")?,
        average_cycle_time: gc.millis("average_cycle_time_ms")?,
        last_run_time: gc.millis("last_run_time_ms")?,
        gc_numeric_trees_missed: gc.i64("gc_numeric_trees_missed")?,
        gc_blocks_denied: gc.i64("gc_blocks_denied")?,
    })
}

fn parse_cursor_stats(info: &Section<'_>) -> Result<CursorStats> {
    let cursors = info.section("cursor_stats")?;
    Ok(CursorStats {
        global_idle: cursors.i64("global_idle")?,
        global_total: cursors.i64("global_total")?,
        index_capacity: cursors.i64("index_capacity")?,
        index_total: cursors.i64("index_total")?,
    })
}

fn parse_dialect_stats(info: &Section<'_>) -> Result<DialectStats> {
    let dialects = info.section("dialect_stats")?;
    Ok(DialectStats {
        dialect_1: dialects.i64("dialect_1")?,
        dialect_2: dialects.i64("dialect_2")?,
        dialect_3: dialects.i64("dialect_3")?,
        dialect_4: dialects.i64("dialect_4")?,
    })
}

/// Rebuild the index definition from `index_definition`, `index_options`,
/// `stopwords_list` and `attributes`.
fn parse_index_options(info: &Section<'_>) -> Result<IndexOptions> {
    let mut options = IndexOptions::new();

    let definition = info.section("index_definition")?;
    if let Some(key_type) = definition.string("key_type")? {
        options.on = IndexOn::parse(&key_type)?;
    }
    options.prefixes = definition
        .strings("prefixes")?
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    options.filter = definition.string("filter")?;
    options.language = definition.string("default_language")?;
    options.language_field = definition.string("language_field")?;
    options.score_field = definition.string("score_field")?;
    if definition.get("default_score").is_some() {
        options.score = definition.f64("default_score")?;
    }

    for flag in info.strings("index_options")? {
        match flag.to_ascii_uppercase().as_str() {
            "NOOFFSETS" => options.no_offsets = true,
            "NOFIELDS" => options.no_fields = true,
            "NOFREQS" => options.no_freqs = true,
            "NOHL" => options.no_highlight = true,
            "MAXTEXTFIELDS" => options.max_text_fields = true,
            "SKIPINITIALSCAN" => options.skip_initial_scan = true,
            _ => {}
        }
    }

    if info.get("stopwords_list").is_some() {
        options.stop_words = Some(info.strings("stopwords_list")?);
    }

    if let Some(attributes) = info.get("attributes") {
        options.schema = attributes
            .array_value("FT.INFO attributes")?
            .iter()
            .map(SchemaAttribute::from_info)
            .collect::<Result<Vec<_>>>()?;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::attribute::DEFAULT_VECTOR_TYPE;
    use crate::schema::{DistanceMetric, VectorAlgorithm};

    fn bulk_list(items: &[&str]) -> Reply {
        Reply::Array(items.iter().map(|s| Reply::bulk(*s)).collect())
    }

    fn legacy_info() -> Reply {
        Reply::Array(vec![
            Reply::bulk("index_name"),
            Reply::bulk("customers"),
            Reply::bulk("index_options"),
            bulk_list(&["NOOFFSETS"]),
            Reply::bulk("index_definition"),
            Reply::Array(vec![
                Reply::bulk("key_type"),
                Reply::bulk("HASH"),
                Reply::bulk("prefixes"),
                bulk_list(&["account:"]),
                Reply::bulk("default_score"),
                Reply::bulk("1"),
            ]),
            Reply::bulk("attributes"),
            Reply::Array(vec![
                bulk_list(&[
                    "identifier",
                    "email",
                    "attribute",
                    "email",
                    "type",
                    "TAG",
                    "SEPARATOR",
                    ",",
                    "SORTABLE",
                ]),
                bulk_list(&[
                    "identifier",
                    "balance",
                    "attribute",
                    "bal",
                    "type",
                    "NUMERIC",
                ]),
            ]),
            Reply::bulk("num_docs"),
            Reply::bulk("5"),
            Reply::bulk("records_per_doc_avg"),
            Reply::bulk("-nan"),
            Reply::bulk("total_indexing_time"),
            Reply::bulk("1500"),
            Reply::bulk("gc_stats"),
            Reply::Array(vec![
                Reply::bulk("total_cycles"),
                Reply::bulk("3"),
                Reply::bulk("average_cycle_time_ms"),
                Reply::bulk("-nan"),
            ]),
            Reply::bulk("dialect_stats"),
            Reply::Array(vec![Reply::bulk("dialect_2"), Reply::Integer(7)]),
        ])
    }

    #[test]
    fn test_legacy_info() {
        let info = Info::from_reply(&legacy_info()).unwrap();

        assert_eq!(info.index_name, "customers");
        assert_eq!(info.num_docs, 5);
        assert_eq!(info.num_terms, 0);
        assert!(info.records_per_doc_avg.is_nan());
        assert_eq!(info.total_indexing_time, Duration::from_millis(1500));
        assert_eq!(info.gc_stats.total_cycles, 3);
        assert_eq!(info.gc_stats.average_cycle_time, Duration::ZERO);
        assert_eq!(info.dialect_stats.dialect_2, 7);

        assert_eq!(info.index.on, IndexOn::Hash);
        assert_eq!(info.index.prefixes, vec!["account:".to_string()]);
        assert!(info.index.no_offsets);
        assert_eq!(info.index.schema.len(), 2);
        assert_eq!(info.index.schema[0].name(), "email");
        assert_eq!(info.index.schema[1].alias(), Some("bal"));
    }

    #[test]
    fn test_modern_info_with_flags() {
        let reply = Reply::map(vec![
            ("index_name", Reply::bulk("docs")),
            (
                "index_definition",
                Reply::map(vec![
                    ("key_type", Reply::bulk("JSON")),
                    ("prefixes", bulk_list(&[""])),
                    ("default_score", Reply::Double(0.5)),
                ]),
            ),
            (
                "attributes",
                Reply::Array(vec![Reply::map(vec![
                    ("identifier", Reply::bulk("$.title")),
                    ("attribute", Reply::bulk("title")),
                    ("type", Reply::bulk("TEXT")),
                    ("WEIGHT", Reply::bulk("1")),
                    ("flags", bulk_list(&["SORTABLE", "NOSTEM"])),
                ])]),
            ),
            ("num_docs", Reply::Integer(2)),
        ]);

        let info = Info::from_reply(&reply).unwrap();
        assert_eq!(info.index.on, IndexOn::Json);
        assert!(info.index.prefixes.is_empty());
        assert_eq!(info.index.score, 0.5);
        match &info.index.schema[0] {
            SchemaAttribute::Text(text) => {
                assert_eq!(text.name, "$.title");
                assert_eq!(text.alias.as_deref(), Some("title"));
                assert!(text.sortable);
                assert!(text.no_stem);
            }
            other => panic!("unexpected attribute {other:?}"),
        }
    }

    #[test]
    fn test_unknown_attribute_type() {
        let reply = Reply::map(vec![
            ("index_name", Reply::bulk("docs")),
            (
                "attributes",
                Reply::Array(vec![bulk_list(&[
                    "identifier",
                    "x",
                    "attribute",
                    "x",
                    "type",
                    "HOLOGRAM",
                ])]),
            ),
        ]);

        let err = Info::from_reply(&reply).unwrap_err();
        assert!(matches!(err, FtSearchError::Schema(_)));
        assert!(err.to_string().contains("HOLOGRAM"));
    }

    #[test]
    fn test_vector_without_parameters() {
        let reply = Reply::Array(vec![
            Reply::bulk("index_name"),
            Reply::bulk("idx"),
            Reply::bulk("attributes"),
            Reply::Array(vec![bulk_list(&[
                "identifier",
                "v",
                "attribute",
                "v",
                "type",
                "VECTOR",
            ])]),
        ]);

        let info = Info::from_reply(&reply).unwrap();
        match &info.index.schema[0] {
            SchemaAttribute::Vector(vector) => {
                assert_eq!(vector.name, "v");
                assert_eq!(vector.alias, None);
                assert_eq!(vector.algorithm, VectorAlgorithm::Flat);
                assert_eq!(vector.data_type, DEFAULT_VECTOR_TYPE);
                assert_eq!(vector.dim, 0);
                assert_eq!(vector.distance_metric, DistanceMetric::L2);
                assert_eq!(vector.m, None);
            }
            other => panic!("unexpected attribute {other:?}"),
        }
    }

    #[test]
    fn test_malformed_counter() {
        let reply = Reply::map(vec![
            ("index_name", Reply::bulk("docs")),
            ("num_docs", Reply::bulk("many")),
        ]);
        assert!(Info::from_reply(&reply).unwrap_err().is_decode());
    }
}
