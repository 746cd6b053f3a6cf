use std::collections::BTreeMap;
use std::process::Command;

use crate::execution::Variable;

const MASK: &str = "********";

/// Parse an environment-style boolean: exactly "true" in any case is
/// true, anything else (including surrounding whitespace) is false.
pub fn is_truthy(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Holds the variables of one execution and applies them to the
/// child process. Secret values are masked out of captured output.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: Vec<Variable>,
}

impl EnvManager {
    pub fn new(vars: Vec<Variable>) -> Self {
        EnvManager { vars }
    }

    /// Merge plain key/value envs from the request. These are never
    /// treated as secrets.
    pub fn merge_envs(&mut self, envs: &BTreeMap<String, String>) {
        for (name, value) in envs {
            self.vars.push(Variable {
                name: name.clone(),
                value: value.clone(),
                secret: false,
            });
        }
    }

    pub fn apply(&self, cmd: &mut Command) {
        for var in &self.vars {
            cmd.env(&var.name, &var.value);
        }
    }

    /// Replace every secret value in `output` with a mask. Empty secret
    /// values are left alone since replacing the empty string would
    /// mangle the output.
    pub fn obfuscate(&self, output: &str) -> String {
        let mut masked = output.to_string();
        for var in self.vars.iter().filter(|v| v.secret) {
            if var.value.is_empty() {
                continue;
            }
            masked = masked.replace(&var.value, MASK);
        }
        masked
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }
}
