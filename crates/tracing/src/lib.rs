//! Tracing setup for intcode drivers.
//!
//! Builds a `tracing_subscriber` registry out of an optional stdout layer and an optional
//! file layer, each with its own format and filter.

pub use tracing_subscriber;

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};

use layers::Layers;

use tracing_subscriber::{filter::Directive, layer::SubscriberExt, util::SubscriberInitExt};

/// A type that can set up the global tracing subscriber.
pub trait Tracer {
    /// Installs the tracer as the global default, returning a guard for any file writer.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// Configuration for a single logging layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [`LayerInfo`].
    ///
    /// `default_directive` applies to every target not matched by `filters`, which is a
    /// comma-separated list of `tracing` directives such as `intcode_vm=trace`.
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: "info".to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Tracer for intcode drivers. Starts empty; add layers with the `with_*` methods.
#[derive(Debug, Clone, Default)]
pub struct IntcodeTracer {
    stdout: Option<LayerInfo>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl IntcodeTracer {
    /// Creates a tracer with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs to stdout with the given layer configuration.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = Some(config);
        self
    }

    /// Logs to `dir/file_name` with the given layer configuration.
    pub fn with_file(mut self, config: LayerInfo, file: FileInfo) -> Self {
        self.file = Some((config, file));
        self
    }
}

impl Tracer for IntcodeTracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        if let Some(config) = self.stdout {
            layers.stdout(
                config.format,
                config.default_directive.parse::<Directive>()?,
                &config.filters,
                config.color,
            )?;
        }

        let mut guard = None;
        if let Some((config, file)) = self.file {
            guard = Some(layers.file(config.format, &config.filters, file)?);
        }

        // a global subscriber may already be installed, e.g. by another test
        let _ = tracing_subscriber::registry().with(layers.into_inner()).try_init();

        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_file_layer_writes_log() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");

        let guard = IntcodeTracer::new()
            .with_stdout(LayerInfo::default())
            .with_file(
                LayerInfo::new(LogFormat::Json, "debug".to_string(), String::new(), None),
                FileInfo::new(dir.path().to_path_buf(), "intcode.log".to_string()),
            )
            .init()
            .expect("failed to init tracer");

        assert!(guard.is_some());
        assert!(dir.path().exists());
    }

    #[test]
    fn test_invalid_directive_is_rejected() {
        let result = IntcodeTracer::new()
            .with_stdout(LayerInfo::new(
                LogFormat::Json,
                "intcode_vm=loudest".to_string(),
                String::new(),
                None,
            ))
            .init();

        assert!(result.is_err());
    }
}
