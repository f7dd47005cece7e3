// Public modules
pub mod action;
pub mod body;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod host;
pub mod invocation;
pub mod module;
pub mod value;

// Re-export common types for convenience
pub use action::{split_capture, Action};
pub use body::{MacroBody, Step};
pub use context::MacroContext;
pub use engine::{MacroEngine, MacroOutcome};
pub use error::{Error, Result};
pub use host::{Host, ShellHost};
pub use invocation::{parse_invocation, parse_invocation_tokens, Invocation, Kwargs};
pub use module::{
    FileSource, MacroRegistry, MacroSource, ModuleLoader, RegistrySource, ScriptMacro,
    ENTRY_POINT, SCRIPT_EXTENSION,
};
pub use value::ArgValue;
