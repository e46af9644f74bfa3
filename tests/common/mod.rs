//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use ftsearch::error::{FtSearchError, Result};
use ftsearch::protocol::{Arg, Reply, Transport};

/// A transport that answers from a fixed list of replies and records every
/// command it is sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Reply>,
    pub requests: Vec<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        ScriptedTransport {
            replies: replies.into(),
            requests: Vec::new(),
        }
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, args: Vec<Arg>) -> Result<Reply> {
        self.requests.push(args.iter().map(Arg::to_wire).collect());
        self.replies
            .pop_front()
            .ok_or_else(|| FtSearchError::transport("connection closed"))
    }
}

pub fn bulk_list(items: &[&str]) -> Reply {
    Reply::Array(items.iter().map(|s| Reply::bulk(*s)).collect())
}

pub fn hash_content(pairs: &[(&str, &str)]) -> Reply {
    Reply::Array(
        pairs
            .iter()
            .flat_map(|(k, v)| [Reply::bulk(*k), Reply::bulk(*v)])
            .collect(),
    )
}

/// A legacy keys-only page.
pub fn key_page(total: i64, keys: &[String]) -> Reply {
    let mut items = vec![Reply::Integer(total)];
    items.extend(keys.iter().map(|k| Reply::bulk(k.as_str())));
    Reply::Array(items)
}
