//! Engine configuration.
//!
//! Accepted as JSON or TOML. Unknown keys are rejected with their dotted path
//! so that typos do not silently fall back to defaults.

use anyhow::{anyhow, Context, Result};
use resonance_encoding::{builtin_registry, EncodingRegistry};
use resonance_graph::{Color, ColorMode, LayoutConfig, DEFAULT_LARGE_GROUP_WARN};
use resonance_indexer::{canonicalize, IMPORTED_LIST_ORIGIN, MANUAL_ORIGIN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorConfig {
    pub mode: ColorMode,
    /// Node palette; empty selects the default palette.
    pub palette: Vec<Color>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            mode: ColorMode::Palette,
            palette: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    /// Built-in encodings to index, in order. Empty indexes all of them.
    pub layers: Vec<String>,
    pub protected_origins: Vec<String>,
    pub large_group_warn: usize,
    pub layout: LayoutConfig,
    pub color: ColorConfig,
    pub layer_colors: BTreeMap<String, Color>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            protected_origins: vec![MANUAL_ORIGIN.to_string(), IMPORTED_LIST_ORIGIN.to_string()],
            large_group_warn: DEFAULT_LARGE_GROUP_WARN,
            layout: LayoutConfig::default(),
            color: ColorConfig::default(),
            layer_colors: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    schema_version: Option<u32>,
    layers: Option<Vec<String>>,
    protected_origins: Option<Vec<String>>,
    large_group_warn: Option<usize>,
    layout: Option<LayoutConfig>,
    color: Option<RawColorConfig>,
    layer_colors: Option<BTreeMap<String, Color>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawColorConfig {
    mode: Option<ColorMode>,
    palette: Option<Vec<Color>>,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_raw(parse_raw(bytes)?)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != CONFIG_SCHEMA_VERSION {
                return Err(anyhow!(
                    "schema_version {schema_version} is not supported (expected {CONFIG_SCHEMA_VERSION})"
                ));
            }
        }

        let defaults = Self::default();
        let catalogue = builtin_registry();

        let layers = raw.layers.unwrap_or_default();
        catalogue
            .ensure_known(layers.iter().map(String::as_str))
            .context("Invalid layers")?;

        let layer_colors = raw.layer_colors.unwrap_or_default();
        catalogue
            .ensure_known(layer_colors.keys().map(String::as_str))
            .context("Invalid layer_colors")?;

        let protected_origins = raw.protected_origins.unwrap_or(defaults.protected_origins);
        if protected_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(anyhow!("protected_origins entries must not be empty"));
        }

        let mut layout = raw.layout.unwrap_or(defaults.layout);
        if let Some(anchor) = layout.anchor.take() {
            let anchor = canonicalize(&anchor).context("Invalid layout.anchor")?;
            layout.anchor = Some(anchor.text);
        }

        let color = raw
            .color
            .map(|c| ColorConfig {
                mode: c.mode.unwrap_or_default(),
                palette: c.palette.unwrap_or_default(),
            })
            .unwrap_or_default();

        Ok(Self {
            layers,
            protected_origins,
            large_group_warn: raw.large_group_warn.unwrap_or(defaults.large_group_warn),
            layout,
            color,
            layer_colors,
        })
    }

    /// Encodings selected by `layers`, drawn from the built-in catalogue.
    pub fn encodings(&self) -> resonance_encoding::Result<EncodingRegistry> {
        let catalogue = builtin_registry();
        if self.layers.is_empty() {
            Ok(catalogue)
        } else {
            catalogue.select(self.layers.iter().map(String::as_str))
        }
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawConfig> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
        }
    };

    validate_config_value(&value)?;
    serde_json::from_value(value).map_err(|err| anyhow!("Config parse error: {err}"))
}

fn validate_config_value(value: &serde_json::Value) -> Result<()> {
    fn validate_object_keys(
        unknown: &mut Vec<String>,
        obj: &serde_json::Map<String, serde_json::Value>,
        base: &str,
        allowed: &[&str],
    ) {
        for key in obj.keys() {
            if !allowed.contains(&key.as_str()) {
                if base.is_empty() {
                    unknown.push(key.clone());
                } else {
                    unknown.push(format!("{base}.{key}"));
                }
            }
        }
    }

    let serde_json::Value::Object(root) = value else {
        return Err(anyhow!("Config must be a JSON object"));
    };

    let mut unknown = Vec::new();
    validate_object_keys(
        &mut unknown,
        root,
        "",
        &[
            "schema_version",
            "layers",
            "protected_origins",
            "large_group_warn",
            "layout",
            "color",
            "layer_colors",
        ],
    );
    if let Some(serde_json::Value::Object(layout)) = root.get("layout") {
        validate_object_keys(
            &mut unknown,
            layout,
            "layout",
            &["seed", "iterations", "anchor", "anchor_position"],
        );
    }
    if let Some(serde_json::Value::Object(color)) = root.get("color") {
        validate_object_keys(&mut unknown, color, "color", &["mode", "palette"]);
    }

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Unknown config keys: {}", unknown.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use resonance_encoding::{BINARY, SIMPLE};
    use resonance_graph::GOLD;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EngineConfig::from_bytes(b"{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn json_config_overrides_fields() {
        let config = EngineConfig::from_bytes(
            br##"{
                "schema_version": 1,
                "layers": ["Simple", "Binary"],
                "large_group_warn": 8,
                "layout": {"seed": 7, "anchor": "  dream "},
                "color": {"mode": "resonance_weighted"},
                "layer_colors": {"Simple": "gold"}
            }"##,
        )
        .unwrap();
        assert_eq!(config.layers, vec![SIMPLE.to_string(), BINARY.to_string()]);
        assert_eq!(config.large_group_warn, 8);
        assert_eq!(config.layout.seed, 7);
        assert_eq!(config.layout.iterations, 50);
        assert_eq!(config.layout.anchor.as_deref(), Some("Dream"));
        assert_eq!(config.color.mode, ColorMode::ResonanceWeighted);
        assert_eq!(config.layer_colors[SIMPLE], GOLD);
        assert_eq!(config.encodings().unwrap().len(), 2);
    }

    #[test]
    fn toml_config_is_accepted() {
        let config = EngineConfig::from_bytes(
            br##"
layers = ["Simple"]
protected_origins = ["_MANUAL_"]

[color]
palette = ["#112233", "red"]
"##,
        )
        .unwrap();
        assert_eq!(config.protected_origins, vec!["_MANUAL_".to_string()]);
        assert_eq!(config.color.palette.len(), 2);
    }

    #[test]
    fn rejects_unknown_keys_and_layers() {
        let err = EngineConfig::from_bytes(br#"{"layout": {"sed": 1}}"#).unwrap_err();
        assert!(format!("{err:#}").contains("layout.sed"));

        let err = EngineConfig::from_bytes(br#"{"layers": ["Nope"]}"#).unwrap_err();
        assert!(format!("{err:#}").contains("Nope"));

        assert!(EngineConfig::from_bytes(br#"{"schema_version": 2}"#).is_err());
        assert!(EngineConfig::from_bytes(br##"{"color": {"palette": ["#zzzzzz"]}}"##).is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resonance.toml");
        std::fs::write(&path, "large_group_warn = 3\n").unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap().large_group_warn, 3);
        assert!(EngineConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
