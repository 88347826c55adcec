//! Playbook document shape and its construction from form state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::app::form::FormState;
use crate::infra::config::Config;

/// Settings that are fixed for every generated playbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookOptions {
    pub role_name: String,
    pub become_expression: String,
    pub vars_prefix: String,
}

impl PlaybookOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            role_name: config.playbook.role_name(),
            become_expression: config.playbook.become_expression(),
            vars_prefix: config.playbook.vars_prefix(),
        }
    }
}

impl Default for PlaybookOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playbook {
    pub hosts: String,
    pub gather_facts: bool,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub include_role: IncludeRole,
    pub vars: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeRole {
    pub name: String,
    pub apply: Apply,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Apply {
    #[serde(rename = "become", default, skip_serializing_if = "Option::is_none")]
    pub become_expr: Option<String>,
}

impl Playbook {
    /// Map the current form state onto the single-task playbook.
    pub fn from_form(state: &FormState, options: &PlaybookOptions) -> Self {
        let become_expr = Some(options.become_expression.clone()).filter(|expr| !expr.is_empty());

        let mut vars = BTreeMap::new();
        vars.insert(
            vars_key(&options.vars_prefix, state.os.as_str()),
            state.identifiers.entries().to_vec(),
        );

        Self {
            hosts: state.hosts.as_str().to_owned(),
            gather_facts: true,
            tasks: vec![Task {
                include_role: IncludeRole {
                    name: options.role_name.clone(),
                    apply: Apply { become_expr },
                },
                vars,
            }],
        }
    }
}

fn vars_key(prefix: &str, os: &str) -> String {
    format!("{prefix}{os}")
}
