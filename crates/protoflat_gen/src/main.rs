mod args;

use anyhow::Context;
use args::GenArgs;
use clap::Parser;
use protoflat_codegen::{generate, FileDescriptorSet, GeneratorConfig};

fn main() -> anyhow::Result<()> {
    match std::env::var("RUST_LOG") {
        Ok(_) => (),
        Err(_) => std::env::set_var("RUST_LOG", "INFO"),
    }

    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_default())
        .init();

    let args = GenArgs::parse();
    log::debug!("{:?}", args);

    let set = FileDescriptorSet::from_path(&args.descriptor_set).with_context(|| {
        format!("failed to read descriptor set {}", args.descriptor_set.display())
    })?;

    let config = GeneratorConfig::default()
        .with_runtime_path(args.runtime_path)
        .with_accessors(!args.no_accessors);

    let files = generate(&set, &config).context("failed to generate bindings")?;

    for file in &files {
        file.write(&args.out_dir)
            .with_context(|| format!("failed to write {}", file.name))?;
    }

    log::info!("generated {} file(s) into {}", files.len(), args.out_dir.display());
    Ok(())
}
