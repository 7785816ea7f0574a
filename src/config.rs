use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".autotranslaterc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root", alias = "messagesDir")]
    pub messages_root: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// Directory the linter reports paths under, relative to the project root.
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Program and arguments of the hardcoded-string linter.
    #[serde(default = "default_lint_command")]
    pub lint_command: Vec<String>,
    /// Text that follows `<line>:` on every hardcoded-string finding.
    #[serde(default = "default_issue_marker")]
    pub issue_marker: String,
    #[serde(default = "default_hook_name")]
    pub hook_name: String,
    #[serde(default = "default_hook_module")]
    pub hook_module: String,
    #[serde(default = "default_translate_fn")]
    pub translate_fn: String,
    /// Module directives that must stay on the first line (e.g. `"use client"`).
    #[serde(default = "default_directives")]
    pub directives: Vec<String>,
    #[serde(default = "default_search_radius")]
    pub search_radius: usize,
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_extensions() -> Vec<String> {
    ["tsx", "ts", "jsx", "js"].map(String::from).to_vec()
}

fn default_lint_command() -> Vec<String> {
    ["npm", "run", "lint:i18n"].map(String::from).to_vec()
}

fn default_issue_marker() -> String {
    "Hardcoded string:".to_string()
}

fn default_hook_name() -> String {
    "useTranslation".to_string()
}

fn default_hook_module() -> String {
    "react-i18next".to_string()
}

fn default_translate_fn() -> String {
    "t".to_string()
}

fn default_directives() -> Vec<String> {
    vec!["use client".to_string()]
}

fn default_search_radius() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            primary_locale: default_primary_locale(),
            source_root: default_source_root(),
            extensions: default_extensions(),
            lint_command: default_lint_command(),
            issue_marker: default_issue_marker(),
            hook_name: default_hook_name(),
            hook_module: default_hook_module(),
            translate_fn: default_translate_fn(),
            directives: default_directives(),
            search_radius: default_search_radius(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// The hook and translation function names end up inside generated code
    /// and regex patterns, so they must be plain JS identifiers.
    pub fn validate(&self) -> Result<()> {
        if self.lint_command.is_empty() || self.lint_command[0].trim().is_empty() {
            bail!("'lintCommand' must name a program to run");
        }
        if self.extensions.is_empty() {
            bail!("'extensions' must contain at least one file extension");
        }
        if self.source_root.trim().is_empty() {
            bail!("'sourceRoot' must not be empty");
        }
        if self.issue_marker.trim().is_empty() {
            bail!("'issueMarker' must not be empty");
        }

        let identifier = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")?;
        for (field, value) in [
            ("hookName", &self.hook_name),
            ("translateFn", &self.translate_fn),
        ] {
            if !identifier.is_match(value) {
                bail!("Invalid identifier in '{}': \"{}\"", field, value);
            }
        }

        Ok(())
    }

    /// Path of the primary locale dictionary, relative to `project_root`.
    pub fn primary_messages_file(&self, project_root: &Path) -> PathBuf {
        project_root
            .join(&self.messages_root)
            .join(format!("{}.json", self.primary_locale))
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
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory the config file lives in, or the start directory when
    /// running on defaults. Report paths are resolved against it.
    pub project_root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let project_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                project_root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            project_root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
