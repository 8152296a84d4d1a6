//! Definition input formats.

use std::{fmt, path::Path, str::FromStr};

/// The textual format a diagram definition is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    #[default]
    Json,
    Yaml,
    /// Recognised so it can be named in errors; never decoded.
    JavaScript,
}

impl InputFormat {
    /// Infers the format from a file extension.
    ///
    /// Returns `None` for unknown or missing extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use trestle_parser::InputFormat;
    /// assert_eq!(InputFormat::from_extension(Path::new("rule.yml")), Some(InputFormat::Yaml));
    /// assert_eq!(InputFormat::from_extension(Path::new("rule")), None);
    /// ```
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "js" => Some(Self::JavaScript),
            _ => None,
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "javascript" | "js" => Ok(Self::JavaScript),
            _ => Err(format!(
                "unknown input format `{s}`, expected json, yaml or javascript"
            )),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::JavaScript => write!(f, "javascript"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("json".parse::<InputFormat>(), Ok(InputFormat::Json));
        assert_eq!("YAML".parse::<InputFormat>(), Ok(InputFormat::Yaml));
        assert_eq!("js".parse::<InputFormat>(), Ok(InputFormat::JavaScript));
        assert!("toml".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(
            InputFormat::from_extension(Path::new("a/b.JSON")),
            Some(InputFormat::Json)
        );
        assert_eq!(
            InputFormat::from_extension(Path::new("b.yaml")),
            Some(InputFormat::Yaml)
        );
        assert_eq!(
            InputFormat::from_extension(Path::new("b.js")),
            Some(InputFormat::JavaScript)
        );
        assert_eq!(InputFormat::from_extension(Path::new("b.txt")), None);
    }

    #[test]
    fn test_display_round_trips() {
        for format in [InputFormat::Json, InputFormat::Yaml, InputFormat::JavaScript] {
            assert_eq!(format.to_string().parse::<InputFormat>(), Ok(format));
        }
    }
}
