//! Line-oriented `.macro` script files.
//!
//! Scripts let users author macros without writing Rust. Each non-empty,
//! non-comment line is one action, yielded in file order:
//!
//! ```text
//! // rebuild and summarize
//! # starting {{target}} build
//! out <- ! cargo build --{{target}}
//! # build said: {{out}}
//! ```
//!
//! `//` starts a comment line. `name <- action` stores the action's dispatch
//! result into the named register. `{{key}}` placeholders are rendered from
//! context vars and registers at yield time, so later lines can see earlier
//! results.

use crate::core::action::is_register_name;
use crate::core::body::{MacroBody, Step};
use crate::core::context::MacroContext;
use crate::core::error::{Error, Result};
use crate::core::host::Host;
use crate::utils::template;

struct ScriptStep {
    text: String,
    capture: Option<String>,
}

/// A parsed script macro: a fixed sequence of action steps.
pub struct ScriptMacro {
    name: String,
    steps: Vec<ScriptStep>,
    index: usize,
}

impl ScriptMacro {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Parse script source into a runnable macro. Parse failures are import
/// failures: the macro never starts.
pub fn parse_script(name: &str, source: &str) -> Result<ScriptMacro> {
    let mut steps = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if let Some((lhs, rhs)) = trimmed.split_once("<-") {
            let register = lhs.trim();
            if is_register_name(register) {
                let action = rhs.trim();
                if action.is_empty() {
                    return Err(Error::ImportFailure(format!(
                        "{}:{}: capture without an action",
                        name,
                        idx + 1
                    )));
                }
                if action.starts_with("# ") {
                    return Err(Error::ImportFailure(format!(
                        "{}:{}: cannot capture a console log",
                        name,
                        idx + 1
                    )));
                }
                steps.push(ScriptStep {
                    text: action.to_string(),
                    capture: Some(register.to_string()),
                });
                continue;
            }
        }

        steps.push(ScriptStep {
            text: trimmed.to_string(),
            capture: None,
        });
    }

    Ok(ScriptMacro {
        name: name.to_string(),
        steps,
        index: 0,
    })
}

impl MacroBody for ScriptMacro {
    fn resume(
        &mut self,
        ctx: &mut MacroContext,
        _host: &mut dyn Host,
        _input: Option<String>,
    ) -> Result<Step> {
        // Captured results are stored by the engine via the ` => reg`
        // directive, so the input value needs no handling here.
        let Some(step) = self.steps.get(self.index) else {
            return Ok(Step::Done);
        };
        self.index += 1;

        let vars = ctx.template_vars();
        let mut action = template::render_map(&step.text, &vars);
        if let Some(register) = &step.capture {
            action.push_str(" => ");
            action.push_str(register);
        }
        Ok(Step::Yield(action))
    }
}
