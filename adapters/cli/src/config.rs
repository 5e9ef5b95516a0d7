use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use pathtable_java::JavaTarget;
use serde::Deserialize;

/// Radius used when neither the flags nor the configuration name one.
pub(crate) const DEFAULT_RADIUS: u32 = 20;

/// Optional on-disk configuration.
///
/// ```toml
/// radius = 20
/// output = "src/util/BellmanFord20.java"
///
/// [java]
/// package = "trainwreck.util"
/// comments = false
/// ```
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) radius: Option<u32>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) java: JavaTarget,
}

impl Config {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse configuration toml contents")?;
        if let Some(output) = &config.output {
            if output.as_os_str().is_empty() {
                bail!("configuration names an empty output path");
            }
        }
        Ok(config)
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) radius: Option<u32>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) package: Option<String>,
    pub(crate) class_name: Option<String>,
    pub(crate) no_comments: bool,
}

/// Effective settings after merging flags over the configuration.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) radius: u32,
    pub(crate) output: Option<PathBuf>,
    pub(crate) target: JavaTarget,
}

impl Settings {
    pub(crate) fn resolve(config: Config, overrides: Overrides) -> Self {
        let mut target = config.java;
        if overrides.package.is_some() {
            target.package = overrides.package;
        }
        if overrides.class_name.is_some() {
            target.class_name = overrides.class_name;
        }
        if overrides.no_comments {
            target.comments = false;
        }

        Self {
            radius: overrides.radius.or(config.radius).unwrap_or(DEFAULT_RADIUS),
            output: overrides.output.or(config.output),
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_configuration() {
        let config = Config::parse(
            r#"
radius = 34
output = "out/BellmanFord34.java"

[java]
package = "trainwreck.util"
class_name = "Navigator"
comments = false
"#,
        )
        .expect("configuration parses");

        assert_eq!(config.radius, Some(34));
        assert_eq!(config.output, Some(PathBuf::from("out/BellmanFord34.java")));
        assert_eq!(
            config.java,
            JavaTarget {
                package: Some("trainwreck.util".to_owned()),
                class_name: Some("Navigator".to_owned()),
                comments: false,
            }
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::parse("").expect("empty configuration parses");
        assert_eq!(config, Config::default());
        assert!(config.java.comments);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("radus = 20").is_err());
        assert!(Config::parse("[java]\nclass = \"A\"").is_err());
        assert!(Config::parse("output = \"\"").is_err());
    }

    #[test]
    fn flags_override_the_configuration() {
        let config = Config::parse(
            r#"
radius = 34
output = "from-config.java"

[java]
package = "config.pkg"
class_name = "FromConfig"
"#,
        )
        .expect("configuration parses");
        let overrides = Overrides {
            radius: Some(8),
            class_name: Some("FromFlags".to_owned()),
            no_comments: true,
            ..Overrides::default()
        };

        let settings = Settings::resolve(config, overrides);
        assert_eq!(settings.radius, 8);
        assert_eq!(settings.output, Some(PathBuf::from("from-config.java")));
        assert_eq!(settings.target.package.as_deref(), Some("config.pkg"));
        assert_eq!(settings.target.class_name.as_deref(), Some("FromFlags"));
        assert!(!settings.target.comments);
    }

    #[test]
    fn radius_defaults_when_unset() {
        let settings = Settings::resolve(Config::default(), Overrides::default());
        assert_eq!(settings.radius, DEFAULT_RADIUS);
        assert_eq!(settings.output, None);
        assert_eq!(settings.target, JavaTarget::default());
    }
}
