use crate::core::score::{MarginCurve, Tuning};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "howbad.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub prop: PropConfig,
    pub combo: ComboConfig,
    pub spread: SpreadConfig,
    pub total: TotalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropConfig {
    pub alpha: f64,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            alpha: Tuning::default().prop_alpha,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComboConfig {
    pub alpha: f64,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            alpha: Tuning::default().combo_alpha,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpreadConfig {
    pub distance: f64,
    pub exponent: f64,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        let curve = Tuning::default().spread;
        Self {
            distance: curve.distance,
            exponent: curve.exponent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TotalConfig {
    pub distance: f64,
    pub exponent: f64,
}

impl Default for TotalConfig {
    fn default() -> Self {
        let curve = Tuning::default().total;
        Self {
            distance: curve.distance,
            exponent: curve.exponent,
        }
    }
}

impl Config {
    pub fn tuning(&self) -> Tuning {
        Tuning {
            prop_alpha: self.prop.alpha,
            combo_alpha: self.combo.alpha,
            spread: MarginCurve {
                distance: self.spread.distance,
                exponent: self.spread.exponent,
            },
            total: MarginCurve {
                distance: self.total.distance,
                exponent: self.total.exponent,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        let values = [
            ("prop.alpha", self.prop.alpha),
            ("combo.alpha", self.combo.alpha),
            ("spread.distance", self.spread.distance),
            ("spread.exponent", self.spread.exponent),
            ("total.distance", self.total.distance),
            ("total.exponent", self.total.exponent),
        ];
        for (key, value) in values {
            if !value.is_finite() || value <= 0.0 {
                bail!("{} must be a positive number (got {})", key, value);
            }
        }
        Ok(())
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
        });
    }

    let local_path = cwd.join(CONFIG_FILE);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    let config = toml::from_str::<Config>(content).context("failed parsing toml")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_built_in_tuning() {
        assert_eq!(Config::default().tuning(), Tuning::default());
    }

    #[test]
    fn default_toml_round_trips() {
        let rendered = default_config_toml().unwrap();
        assert!(rendered.contains("[spread]"));
        assert_eq!(parse_config(&rendered).unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = parse_config(
            r#"
[general]
json = true

[total]
distance = 20.0
"#,
        )
        .unwrap();
        assert!(config.general.json);
        assert!(config.general.color);
        assert_eq!(config.total.distance, 20.0);
        assert_eq!(config.total.exponent, 1.0);
        assert_eq!(config.spread.distance, 10.0);
        assert_eq!(config.prop.alpha, 2.0);
    }

    #[test]
    fn rejects_non_positive_curve_values() {
        let err = parse_config("[spread]\ndistance = 0.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("spread.distance must be a positive number"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join(format!("howbad-init-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        let _ = fs::remove_file(&path);

        write_default_config(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::write(&path, "[prop]\nalpha = 3.0\n").unwrap();

        let err = write_default_config(&path).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[prop]\nalpha = 3.0\n");
        assert_eq!(parse_config(&written).unwrap(), Config::default());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cwd = std::env::temp_dir();
        let missing = cwd.join("howbad-definitely-missing.toml");
        let err = load_config(Some(&missing), &cwd).unwrap_err();
        assert!(err.to_string().contains("passed with --config"));
    }
}
