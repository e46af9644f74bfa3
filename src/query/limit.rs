//! Result paging (`LIMIT offset num`).

use serde::{Deserialize, Serialize};

use crate::protocol::Arg;
use crate::serialize::ToArgs;

/// Default first result offset.
pub const DEFAULT_OFFSET: u64 = 0;
/// Default number of results per reply.
pub const DEFAULT_LIMIT: u64 = 10;

/// The window of results to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub offset: u64,
    pub num: u64,
}

impl Limit {
    pub fn new(offset: u64, num: u64) -> Self {
        Limit { offset, num }
    }

    pub fn is_default(&self) -> bool {
        self.offset == DEFAULT_OFFSET && self.num == DEFAULT_LIMIT
    }

    /// Move the window forward by `consumed` results.
    pub fn advance(&mut self, consumed: u64) {
        self.offset += consumed;
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit::new(DEFAULT_OFFSET, DEFAULT_LIMIT)
    }
}

/// Emits nothing for the engine's default window.
impl ToArgs for Limit {
    fn write_args(&self, args: &mut Vec<Arg>) {
        if !self.is_default() {
            args.push(Arg::from("LIMIT"));
            args.push(Arg::from(self.offset));
            args.push(Arg::from(self.num));
        }
    }
}
