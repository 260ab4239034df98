//! Protocol Buffers compatible binary codec with per-type specialised
//! message drivers.
//!
//! Message types get their drivers either from `protoflat-gen`, which turns a
//! schema descriptor set into Rust source, or from the derives re-exported
//! here:
//!
//! ```ignore
//! use protoflat::Message;
//!
//! #[derive(Clone, Debug, Default, PartialEq, Message)]
//! struct Reading {
//!     #[protoflat(uint32, tag = 1)]
//!     sensor: u32,
//!
//!     #[protoflat(sint64, tag = 2, repeated)]
//!     deltas: Vec<i64>,
//! }
//!
//! let reading = Reading { sensor: 7, deltas: vec![-1, 2] };
//! let bytes = protoflat::serialize(&reading);
//! assert_eq!(protoflat::deserialize::<Reading>(&bytes)?, reading);
//! ```

// derives expand to `::protoflat` paths, which must also resolve in here
extern crate self as protoflat;

pub use protoflat_core::*;
pub use protoflat_macros::{Enumeration, Message, Oneof};
