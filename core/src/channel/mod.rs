//! Message channel module
//!
//! Queue and topic notifications share one seam: create by name, then deliver
//! a message body to the address the create call returned.

mod kind;
mod outbox;

pub use kind::{ChannelKind, MessageChannel};
pub use outbox::{OutboxChannel, OutboxEntry};
