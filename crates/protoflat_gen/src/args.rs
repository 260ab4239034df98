//! CLI args

use std::path::PathBuf;

use clap::Parser;
use protoflat_codegen::config::DEFAULT_RUNTIME_PATH;

/// Generates protoflat message bindings from a schema descriptor set
#[derive(Parser, Debug)]
#[clap(version, about)]
pub(crate) struct GenArgs {
    /// JSON descriptor set produced by the schema front end.
    pub descriptor_set: PathBuf,

    /// Directory the generated files are written under.
    #[clap(short, long)]
    #[clap(default_value = ".")]
    pub out_dir: PathBuf,

    /// Path to the protoflat runtime as seen from the generated code.
    #[clap(short, long)]
    #[clap(default_value = DEFAULT_RUNTIME_PATH)]
    pub runtime_path: String,

    /// Do not emit typed accessors for enum fields.
    #[clap(long)]
    pub no_accessors: bool,
}
