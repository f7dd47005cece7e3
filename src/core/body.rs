//! The resumable macro body contract.

use crate::core::context::MacroContext;
use crate::core::error::Result;
use crate::core::host::Host;

/// What a macro body does at one suspension point.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Suspend with one action string; the dispatch result arrives as the
    /// `input` of the next resume.
    Yield(String),
    /// Normal completion. The engine stops resuming.
    Done,
}

/// A resumable macro entry point.
///
/// The engine starts the body by calling `resume` with `input: None` and
/// thereafter feeds each dispatch result back in as the next `input`. The
/// contract is strictly lock-step: the body is never resumed before the
/// previous action's result is known, and exactly one action is in flight
/// at a time.
///
/// Returning `Err` from any resume is the macro-runtime-error path: the
/// engine reports it once and stops; already-dispatched actions stand.
pub trait MacroBody {
    fn resume(
        &mut self,
        ctx: &mut MacroContext,
        host: &mut dyn Host,
        input: Option<String>,
    ) -> Result<Step>;
}
