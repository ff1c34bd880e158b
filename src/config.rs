use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".gettextrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// File extensions (without the dot) that are scanned.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_component_extension")]
    pub component_extension: String,
    /// Whether component files are split into script and template blocks.
    /// When off they are parsed as plain script.
    #[serde(default = "default_vue_templates")]
    pub vue_templates: bool,
    #[serde(default)]
    pub callee_names: CalleeNames,
}

/// Callee names recognised for each gettext call shape.
///
/// Member calls are written out in full, e.g. `this.$gettext` or `i18n.gettext`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalleeNames {
    #[serde(default = "default_gettext")]
    pub gettext: Vec<String>,
    #[serde(default = "default_ngettext")]
    pub ngettext: Vec<String>,
    #[serde(default = "default_pgettext")]
    pub pgettext: Vec<String>,
    /// Also the plural calls that take a leading context argument when
    /// rewritten.
    #[serde(default = "default_npgettext")]
    pub npgettext: Vec<String>,
}

fn names(base: &str) -> Vec<String> {
    vec![base.to_string(), format!("${}", base), format!("this.${}", base)]
}

fn default_gettext() -> Vec<String> {
    names("gettext")
}

fn default_ngettext() -> Vec<String> {
    names("ngettext")
}

fn default_pgettext() -> Vec<String> {
    names("pgettext")
}

fn default_npgettext() -> Vec<String> {
    names("npgettext")
}

impl Default for CalleeNames {
    fn default() -> Self {
        Self {
            gettext: default_gettext(),
            ngettext: default_ngettext(),
            pgettext: default_pgettext(),
            npgettext: default_npgettext(),
        }
    }
}

impl CalleeNames {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &Vec<String>)> {
        [
            ("gettext", &self.gettext),
            ("ngettext", &self.ngettext),
            ("pgettext", &self.pgettext),
            ("npgettext", &self.npgettext),
        ]
        .into_iter()
    }
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts", "vue"]
        .map(String::from)
        .to_vec()
}

fn default_component_extension() -> String {
    ".vue".to_string()
}

fn default_vue_templates() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            source_root: default_source_root(),
            extensions: default_extensions(),
            component_extension: default_component_extension(),
            vue_templates: default_vue_templates(),
            callee_names: CalleeNames::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid, or if a call shape has no callee names at all.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if !self.component_extension.starts_with('.') {
            bail!(
                "'componentExtension' must start with a dot: \"{}\"",
                self.component_extension
            );
        }

        for (shape, names) in self.callee_names.iter() {
            if names.is_empty() || names.iter().any(|name| name.trim().is_empty()) {
                bail!("'calleeNames.{}' must list at least one non-empty name", shape);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
