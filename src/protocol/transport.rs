//! The command execution seam.

use crate::error::Result;
use crate::protocol::{Arg, Reply};

/// Executes one command against the search engine.
///
/// Implementations own the connection, authentication, retries and any
/// client-side timeout. The library only hands over the full token list
/// (command name first) and decodes whatever comes back. A reply is
/// delivered whole; there is no partial or streaming delivery.
pub trait Transport {
    /// Execute a command and return its raw reply.
    fn execute(&mut self, args: Vec<Arg>) -> Result<Reply>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, args: Vec<Arg>) -> Result<Reply> {
        (**self).execute(args)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&mut self, args: Vec<Arg>) -> Result<Reply> {
        (**self).execute(args)
    }
}
