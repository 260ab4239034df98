//! Generator configuration

/// Where generated code finds the runtime when nothing else is configured.
pub const DEFAULT_RUNTIME_PATH: &str = "::protoflat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Rust path generated code uses to reach the runtime crate.
    pub runtime_path: String,

    /// Emit typed getters and setters for enum fields.
    pub emit_accessors: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            emit_accessors: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    pub fn with_accessors(mut self, emit: bool) -> Self {
        self.emit_accessors = emit;
        self
    }
}
