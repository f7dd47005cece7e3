//! Action constructors for macro authors.
//!
//! These four functions are the sanctioned way to build well-formed action
//! strings; macro bodies yield the returned value instead of hand-writing
//! prefix characters. All four are pure — suspension happens when the body
//! yields, not here.

/// Build a console log action. The text goes straight to the console and is
/// guaranteed never to reach the language model.
pub fn log(text: &str) -> String {
    format!("# {}", text)
}

/// Build a shell command action. With `capture`, the dispatch result is
/// stored into the named register by the engine.
pub fn run(cmd: &str, capture: Option<&str>) -> String {
    match capture {
        Some(register) => format!("! {} => {}", cmd, register),
        None => format!("! {}", cmd),
    }
}

/// Build a `/code` action asking the assistant to edit `file`. Literal
/// closing braces in the prompt are escaped to keep the grammar unambiguous.
pub fn code(file: &str, prompt: &str) -> String {
    let escaped = prompt.replace('}', "\\}");
    format!("/code {} {{{}}}", file, escaped)
}

/// Build an `/include` action. Inclusion side effects are handled entirely
/// by the host command runner.
pub fn include(register: &str) -> String {
    format!("/include {}", register)
}
