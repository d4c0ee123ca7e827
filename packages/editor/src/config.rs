use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vellum_model::{NodeType, Theme};

pub const DEFAULT_CONFIG_NAME: &str = "vellum.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Name used in log output to tell editors apart
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Class names handed to decorations
    #[serde(default)]
    pub theme: Theme,

    /// Node types registered on top of root, paragraph and text
    #[serde(default)]
    pub nodes: Vec<NodeType>,
}

fn default_namespace() -> String {
    "vellum".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            theme: Theme::default(),
            nodes: vec![],
        }
    }
}

impl EditorConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = NodeType>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load `vellum.config.json` from a directory, or the default config if
    /// there is none
    pub fn load_from_dir(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "namespace": "playground",
            "theme": { "embedBlock": { "base": "embed", "focus": "embed-focus" } },
            "nodes": ["Video"]
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.namespace, "playground");
        assert_eq!(config.nodes, vec![NodeType::Video]);

        let block = config.theme.embed_block.unwrap();
        assert_eq!(block.base.as_deref(), Some("embed"));
        assert_eq!(block.focus.as_deref(), Some("embed-focus"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert!(config.nodes.is_empty());
    }

    #[test]
    fn test_unknown_node_type_is_rejected() {
        let result = EditorConfig::from_json(r#"{ "nodes": ["YouTube"] }"#);
        assert!(matches!(result, Err(EditorError::Json(_))));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            EditorConfig::load_from_dir(dir.path()).unwrap(),
            EditorConfig::default()
        );

        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "nodes": ["Video"] }"#,
        )
        .unwrap();
        let config = EditorConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.nodes, vec![NodeType::Video]);
        assert_eq!(config.namespace, "vellum");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = EditorConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(EditorError::Io(_))));
    }
}
