use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementFormat {
    #[default]
    #[serde(rename = "")]
    None,
    Left,
    Start,
    Center,
    Right,
    End,
    Justify,
}

impl ElementFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementFormat::None => "",
            ElementFormat::Left => "left",
            ElementFormat::Start => "start",
            ElementFormat::Center => "center",
            ElementFormat::Right => "right",
            ElementFormat::End => "end",
            ElementFormat::Justify => "justify",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ElementFormat::None)
    }
}

impl fmt::Display for ElementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(ElementFormat::None),
            "left" => Ok(ElementFormat::Left),
            "start" => Ok(ElementFormat::Start),
            "center" => Ok(ElementFormat::Center),
            "right" => Ok(ElementFormat::Right),
            "end" => Ok(ElementFormat::End),
            "justify" => Ok(ElementFormat::Justify),
            other => Err(format!("Unknown element format: {}", other)),
        }
    }
}
