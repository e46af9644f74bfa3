//! Wire-level primitives shared by the request serializers and the reply
//! decoders.
//!
//! # Module Structure
//!
//! - `arg`: request tokens handed to the transport
//! - `reply`: raw reply values returned by the transport
//! - `transport`: the command execution seam

pub mod arg;
pub mod reply;
pub mod transport;

pub use self::arg::Arg;
pub use self::reply::Reply;
pub use self::transport::Transport;
