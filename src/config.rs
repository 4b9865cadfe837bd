use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::GitLsError;
use crate::output::{OutputFormat, TabStyle};
use crate::system::FsOps;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorChoice {
    /// Color when stdout is a terminal, honoring `NO_COLOR` and `CLICOLOR_FORCE`.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Install the choice as the process-wide coloring policy and report whether the
    /// presenter should emit styles at all.
    pub fn apply(self) -> bool {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
        self != Self::Never
    }
}

/// Optional settings, as read from the config file or given on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub color: Option<ColorChoice>,
    pub show_mode: Option<bool>,
    pub output: Option<OutputFormat>,
    pub tab_style: Option<TabStyle>,
}

/// Fully resolved presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub color: ColorChoice,
    pub show_mode: bool,
    pub output: OutputFormat,
    pub tab_style: TabStyle,
}

impl Config {
    /// Layer `overrides` (the command line) over this file config, then defaults.
    #[must_use]
    pub fn resolve(&self, overrides: &Config) -> Settings {
        Settings {
            color: overrides.color.or(self.color).unwrap_or_default(),
            show_mode: overrides.show_mode.or(self.show_mode).unwrap_or(true),
            output: overrides.output.or(self.output).unwrap_or_default(),
            tab_style: overrides.tab_style.or(self.tab_style).unwrap_or_default(),
        }
    }
}

/// Read and parse a config file that must exist.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid config TOML.
pub fn load_config(path: &Path) -> Result<Config, GitLsError> {
    let text = std::fs::read_to_string(path).map_err(|source| GitLsError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &text)
}

/// Read the config at the default location, if there is one.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config(fs: &dyn FsOps) -> Result<Config, GitLsError> {
    let path = default_config_path(fs);
    let text = fs
        .read_optional(&path)
        .map_err(|source| GitLsError::ConfigRead {
            path: path.clone(),
            source,
        })?;
    match text {
        Some(text) => parse_config(&path, &text),
        None => {
            tracing::debug!(path = %path.display(), "no config file");
            Ok(Config::default())
        }
    }
}

#[must_use]
pub fn default_config_path(fs: &dyn FsOps) -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map_or_else(|| fs.expand_tilde(Path::new("~/.config")), PathBuf::from);
    base.join("git-ls").join("config.toml")
}

fn parse_config(path: &Path, text: &str) -> Result<Config, GitLsError> {
    toml::from_str(text).map_err(|source| GitLsError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_config_reads_kebab_case_keys() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "color = \"never\"\nshow-mode = false\noutput = \"tab\"\ntab-style = \"modern-rounded\"\n",
        )
        .expect("write config");

        let config = load_config(&path).expect("config");
        assert_eq!(
            config,
            Config {
                color: Some(ColorChoice::Never),
                show_mode: Some(false),
                output: Some(OutputFormat::Tab),
                tab_style: Some(TabStyle::ModernRounded),
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "colour = \"always\"\n").expect("write config");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, GitLsError::ConfigParse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let err = load_config(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, GitLsError::ConfigRead { .. }));
    }

    #[test]
    fn command_line_overrides_file_then_defaults() {
        let file = Config {
            color: Some(ColorChoice::Always),
            show_mode: Some(false),
            output: None,
            tab_style: Some(TabStyle::Psql),
        };
        let cli = Config {
            color: Some(ColorChoice::Never),
            ..Config::default()
        };
        assert_eq!(
            file.resolve(&cli),
            Settings {
                color: ColorChoice::Never,
                show_mode: false,
                output: OutputFormat::Lines,
                tab_style: TabStyle::Psql,
            }
        );
        assert_eq!(
            Config::default().resolve(&Config::default()),
            Settings {
                color: ColorChoice::Auto,
                show_mode: true,
                output: OutputFormat::Lines,
                tab_style: TabStyle::Rounded,
            }
        );
    }
}
