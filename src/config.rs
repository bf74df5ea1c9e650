//! Run-wide configuration.
//!
//! A `CodecConfig` is created once at the application boundary (CLI flags, a
//! JSON/YAML file, whatever the host uses) and shared read-only through the
//! pipeline via `Arc<CodecConfig>`. Nothing below the boundary mutates it or
//! re-reads the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::kernels::deflate;

/// Configuration for one encode run.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Deflate level for the whole-batch compression pass.
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Worker threads for per-symbol encoding. `None` means one per
    /// available core.
    #[serde(default)]
    pub workers: Option<usize>,

    /// Root of the output tree; artifacts land in `<output_dir>/<year>_<month>/`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
            workers: None,
            output_dir: default_output_dir(),
        }
    }
}

fn default_compression_level() -> u32 {
    deflate::DEFAULT_LEVEL
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("snapshot_binary")
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.compression_level, 6);
        assert_eq!(config.workers, None);
        assert_eq!(config.output_dir, PathBuf::from("snapshot_binary"));
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: CodecConfig = serde_json::from_str(
            r#"{ "compression_level": 9, "workers": 4, "output_dir": "/tmp/out" }"#,
        )
        .unwrap();
        assert_eq!(config.compression_level, 9);
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }
}
