//! Routing of one action string to exactly one host collaborator.

use crate::core::action::Action;
use crate::core::error::Result;
use crate::core::host::Host;

/// Dispatch one action and return its result.
///
/// Stateless: the routing decision is the only work done here; every side
/// effect belongs to the host. Console logs always produce `None` — that
/// path is guaranteed never to reach the language model.
pub fn dispatch(action: &str, host: &mut dyn Host) -> Result<Option<String>> {
    match Action::classify(action) {
        Action::HostCommand(line) | Action::Passthrough(line) => host.run_command(line),
        Action::ConsoleLog(text) => {
            host.tool_output(text);
            Ok(None)
        }
        Action::ModelPrompt(prompt) => host.send_prompt(prompt),
    }
}
