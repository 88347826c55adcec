//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::model::{HostChoice, OsChoice};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".artgen/config.toml";

/// Default expression deciding whether the role escalates privileges.
pub const DEFAULT_BECOME_EXPRESSION: &str =
    "{{ 'True' if ansible_facts['system'] == 'Linux' else 'False' }}";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub playbook: Playbook,
    #[serde(default)]
    pub editor: Editor,
}

/// Initial values for the form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Defaults {
    #[serde(default)]
    output_file: Option<String>,
    #[serde(default)]
    os: Option<OsChoice>,
    #[serde(default)]
    hosts: Option<HostChoice>,
}

impl Defaults {
    fn default_output_file() -> &'static str {
        "output.yml"
    }

    /// Shown as the filename placeholder; never applied automatically.
    pub fn output_file(&self) -> &str {
        self.output_file
            .as_deref()
            .unwrap_or_else(|| Self::default_output_file())
    }

    pub fn os(&self) -> OsChoice {
        self.os.unwrap_or_default()
    }

    pub fn hosts(&self) -> HostChoice {
        self.hosts.unwrap_or_default()
    }

    pub fn set_output_file<S: Into<String>>(&mut self, output_file: S) {
        self.output_file = Some(output_file.into());
    }
}

/// Fixed parts of the emitted playbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Playbook {
    #[serde(default)]
    role_name: Option<String>,
    #[serde(default)]
    become_expression: Option<String>,
    #[serde(default)]
    vars_prefix: Option<String>,
}

impl Playbook {
    fn default_role_name() -> &'static str {
        "art-execution-role"
    }

    fn default_vars_prefix() -> &'static str {
        "art_tids_"
    }

    pub fn role_name(&self) -> String {
        self.role_name
            .clone()
            .unwrap_or_else(|| Self::default_role_name().to_owned())
    }

    /// An empty expression drops `become` from the role's `apply` block.
    pub fn become_expression(&self) -> String {
        self.become_expression
            .clone()
            .unwrap_or_else(|| DEFAULT_BECOME_EXPRESSION.to_owned())
    }

    pub fn vars_prefix(&self) -> String {
        self.vars_prefix
            .clone()
            .unwrap_or_else(|| Self::default_vars_prefix().to_owned())
    }
}

/// Behavior of the TID list editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Editor {
    #[serde(default)]
    trim_entries: Option<bool>,
}

impl Editor {
    fn default_trim_entries() -> bool {
        true
    }

    pub fn trim_entries(&self) -> bool {
        self.trim_entries
            .unwrap_or_else(Self::default_trim_entries)
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output_file: Option<String>,
    os: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output_file: env::var("ARTGEN_OUTPUT_FILE").ok(),
            os: env::var("ARTGEN_OS").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output_file: &str, os: &str) -> Self {
        Self {
            output_file: Some(output_file.to_owned()),
            os: Some(os.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    /// Load the built-in defaults plus an explicit file, skipping discovery.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_layers(None, Some(path.to_path_buf()), EnvOverrides::from_env())
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            playbook: merge_playbook(self.playbook, other.playbook),
            editor: merge_editor(self.editor, other.editor),
        }
    }
}

fn merge_defaults(mut base: Defaults, overlay: Defaults) -> Defaults {
    if let Some(value) = overlay.output_file {
        base.output_file = Some(value);
    }
    if let Some(value) = overlay.os {
        base.os = Some(value);
    }
    if let Some(value) = overlay.hosts {
        base.hosts = Some(value);
    }
    base
}

fn merge_playbook(mut base: Playbook, overlay: Playbook) -> Playbook {
    if let Some(value) = overlay.role_name {
        base.role_name = Some(value);
    }
    if let Some(value) = overlay.become_expression {
        base.become_expression = Some(value);
    }
    if let Some(value) = overlay.vars_prefix {
        base.vars_prefix = Some(value);
    }
    base
}

fn merge_editor(mut base: Editor, overlay: Editor) -> Editor {
    if let Some(value) = overlay.trim_entries {
        base.trim_entries = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("artgen/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(output_file) = env.output_file {
        config.defaults.output_file = Some(output_file);
    }
    if let Some(os) = env.os {
        match os.parse() {
            Ok(os) => config.defaults.os = Some(os),
            Err(err) => warn!(%err, "ignoring ARTGEN_OS override"),
        }
    }
    config
}
