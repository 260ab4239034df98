//! Schema model, schema-to-binding mapper and Rust emitter.
//!
//! Used by the `protoflat-gen` binary to turn a descriptor set into source
//! files, and by `protoflat_macros` to derive the same drivers for
//! hand-written types.

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod mapper;
pub mod naming;
pub mod schema;

pub use config::GeneratorConfig;
pub use emit::Emitter;
pub use error::{Error, Result, SchemaError};
pub use generator::{generate, GeneratedFile};
pub use schema::FileDescriptorSet;
