//! Per-run mutable macro state.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::core::invocation::Kwargs;
use crate::core::value::ArgValue;

/// Mutable state shared for the lifetime of one macro run.
///
/// Created by the engine when a macro starts and dropped when it terminates;
/// never shared across runs. Host collaborators are not stored here — the
/// engine passes `&mut dyn Host` into every resume instead, so the helper
/// surface stays explicit and testable.
#[derive(Debug, Default, Serialize)]
pub struct MacroContext {
    /// Parameter values seeded from the invocation's keyword arguments.
    pub vars: HashMap<String, ArgValue>,
    /// Scratch space for stashing intermediate results between actions.
    pub registers: HashMap<String, Value>,
    /// Loop bookkeeping.
    pub counters: HashMap<String, i64>,
    /// Informational only; set by the macro body, never enforced by the engine.
    pub exit_code: i32,
}

impl MacroContext {
    pub fn seeded(kwargs: &Kwargs) -> Self {
        Self {
            vars: kwargs.clone(),
            ..Default::default()
        }
    }

    pub fn set_register(&mut self, key: &str, value: impl Into<Value>) {
        self.registers.insert(key.to_string(), value.into());
    }

    /// Register contents as a string slice, when the register holds one.
    pub fn register_str(&self, key: &str) -> Option<&str> {
        self.registers.get(key).and_then(Value::as_str)
    }

    /// Increment a counter, creating it at zero first. Returns the new value.
    pub fn bump(&mut self, key: &str) -> i64 {
        let counter = self.counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Flatten vars and registers into template variables for script
    /// rendering. Registers shadow vars on key collisions.
    pub(crate) fn template_vars(&self) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = HashMap::new();
        for (key, value) in &self.vars {
            map.insert(key.clone(), value.to_string());
        }
        for (key, value) in &self.registers {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            map.insert(key.clone(), rendered);
        }
        map
    }
}
