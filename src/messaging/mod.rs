//! # Messaging Module
//!
//! Wire types exchanged with the queue runtime: the inbound batch of envelopes and the
//! outbound partial batch failure report.

pub mod message;

pub use message::*;
