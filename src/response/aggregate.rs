//! `FT.AGGREGATE` and `FT.CURSOR READ` replies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{FtSearchError, Result};
use crate::protocol::Reply;
use crate::response::meta::ReplyMeta;
use crate::response::{Encoding, required};

const CONTEXT: &str = "FT.AGGREGATE";

/// One output row of an aggregation: field name to value.
pub type Row = BTreeMap<String, Reply>;

/// Decoded aggregation output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResults {
    pub total_results: i64,
    pub meta: ReplyMeta,
    pub rows: Vec<Row>,
    /// Cursor to read the next batch with; 0 once the cursor is exhausted.
    pub cursor_id: Option<i64>,
}

impl AggregateResults {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the engine holds more rows behind the cursor.
    pub fn has_more(&self) -> bool {
        self.cursor_id.is_some_and(|id| id != 0)
    }
}

/// Decode an aggregation reply in either encoding.
///
/// Replies to requests made with `WITHCURSOR` arrive as `[page, cursor_id]`
/// and are recognized by their first element being a list or map.
pub fn decode_aggregate(reply: &Reply) -> Result<AggregateResults> {
    if let Some([page @ (Reply::Array(_) | Reply::Map(_)), cursor]) = reply.as_array() {
        let mut results = decode_page(page)?;
        results.cursor_id = Some(cursor.i64_value("FT.AGGREGATE cursor")?);
        return Ok(results);
    }
    decode_page(reply)
}

fn decode_page(reply: &Reply) -> Result<AggregateResults> {
    match Encoding::detect(reply, CONTEXT)? {
        Encoding::Legacy => decode_legacy(reply.array_value(CONTEXT)?),
        Encoding::Modern => decode_modern(reply),
    }
}

/// Legacy rows follow a leading count, each a list of alternating names and
/// values.
fn decode_legacy(items: &[Reply]) -> Result<AggregateResults> {
    let (total, rows) = items
        .split_first()
        .ok_or_else(|| FtSearchError::decode("FT.AGGREGATE: empty reply"))?;

    Ok(AggregateResults {
        total_results: total.i64_value("FT.AGGREGATE total")?,
        meta: ReplyMeta::legacy(),
        rows: rows.iter().map(decode_row).collect::<Result<Vec<_>>>()?,
        cursor_id: None,
    })
}

fn decode_modern(reply: &Reply) -> Result<AggregateResults> {
    let total_results =
        required(reply, "total_results", CONTEXT)?.i64_value("FT.AGGREGATE total")?;
    let meta = ReplyMeta::from_modern(reply, CONTEXT)?;

    let rows = required(reply, "results", CONTEXT)?
        .array_value("FT.AGGREGATE results")?
        .iter()
        .map(|row| decode_row(row.map_get("extra_attributes").unwrap_or(row)))
        .collect::<Result<Vec<_>>>()?;

    Ok(AggregateResults {
        total_results,
        meta,
        rows,
        cursor_id: None,
    })
}

fn decode_row(reply: &Reply) -> Result<Row> {
    reply
        .pairs("FT.AGGREGATE row")?
        .into_iter()
        .map(|(name, value)| Ok((name.str_value("FT.AGGREGATE field")?.to_string(), value.clone())))
        .collect()
}
