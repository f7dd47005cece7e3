//! The suspend/resume loop between a macro body and the action dispatcher.

use serde::Serialize;
use serde_json::Value;

use crate::core::action::split_capture;
use crate::core::body::Step;
use crate::core::context::MacroContext;
use crate::core::dispatch::dispatch;
use crate::core::error::Error;
use crate::core::host::Host;
use crate::core::invocation::{parse_invocation, Invocation};
use crate::core::module::ModuleLoader;

/// Summary of one macro run, for hosts and tests. The engine itself never
/// panics and never lets a macro failure escape to the host process.
#[derive(Debug, Serialize)]
pub struct MacroOutcome {
    /// Actions successfully routed to a host collaborator.
    pub dispatched: usize,
    /// Stable error code when the run failed; `None` on clean completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Drives one macro at a time through load → run → terminate.
///
/// Strictly single-threaded and cooperative: exactly one action is in
/// flight, actions are dispatched in yield order, and the result of action
/// *n* is delivered to the body before action *n+1* can exist.
pub struct MacroEngine {
    loader: ModuleLoader,
}

impl MacroEngine {
    pub fn new(loader: ModuleLoader) -> Self {
        Self { loader }
    }

    /// Decode and run one invocation line. All four failure kinds
    /// (malformed invocation, import failure, missing entry point, macro
    /// runtime error) surface as a single console error line.
    pub fn run(&self, line: &str, host: &mut dyn Host) -> MacroOutcome {
        match parse_invocation(line) {
            Ok(invocation) => self.run_invocation(&invocation, host),
            Err(e) => fail(host, e, 0),
        }
    }

    /// Run an already-decoded invocation.
    pub fn run_invocation(&self, invocation: &Invocation, host: &mut dyn Host) -> MacroOutcome {
        // Loading: materialize the entry point before any context exists.
        let mut body = match self.loader.load(&invocation.module_ref, &invocation.kwargs) {
            Ok(body) => body,
            Err(e) => return fail(host, e, 0),
        };

        // Running: lock-step resume/dispatch until done or failed.
        let mut ctx = MacroContext::seeded(&invocation.kwargs);
        let mut input: Option<String> = None;
        let mut dispatched = 0usize;

        loop {
            let step = match body.resume(&mut ctx, host, input.take()) {
                Ok(step) => step,
                Err(e) => return fail(host, as_runtime(e), dispatched),
            };

            let raw = match step {
                Step::Done => break,
                Step::Yield(raw) => raw,
            };

            let (action, capture) = split_capture(&raw);
            let result = match dispatch(action, host) {
                Ok(result) => result,
                Err(e) => return fail(host, e, dispatched),
            };
            dispatched += 1;

            if let Some(register) = capture {
                let stored = match &result {
                    Some(s) => Value::String(s.clone()),
                    None => Value::Null,
                };
                ctx.registers.insert(register.to_string(), stored);
            }

            input = result;
        }

        MacroOutcome {
            dispatched,
            error: None,
        }
    }
}

fn fail(host: &mut dyn Host, err: Error, dispatched: usize) -> MacroOutcome {
    host.tool_error(&err.to_string());
    MacroOutcome {
        dispatched,
        error: Some(err.code().to_string()),
    }
}

/// Failures raised inside a resume are macro runtime errors regardless of
/// which error value the body produced.
fn as_runtime(err: Error) -> Error {
    match err {
        e @ Error::MacroRuntime(_) => e,
        other => Error::MacroRuntime(other.to_string()),
    }
}
