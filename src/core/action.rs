//! The action grammar yielded by running macros.
//!
//! An action is a single string handed from a suspended macro body to the
//! engine. A small fixed prefix grammar decides where it goes:
//!
//! - `/` or `!` — a host command line, forwarded verbatim
//! - `# `       — a console log line, never seen by the model
//! - `>`        — a prompt for the active coding session
//! - anything else — forwarded to the host command runner unchanged

/// One classified action. Borrowed views into the yielded string.
#[derive(Debug, PartialEq, Eq)]
pub enum Action<'a> {
    /// The whole string, prefix included.
    HostCommand(&'a str),
    /// The text after the `"# "` prefix.
    ConsoleLog(&'a str),
    /// The text after the `>` prefix, left-trimmed.
    ModelPrompt(&'a str),
    /// Fallback: the whole string, forwarded unchanged.
    Passthrough(&'a str),
}

impl<'a> Action<'a> {
    /// Classify a yielded string. Precedence order is fixed: host command,
    /// console log, model prompt, passthrough.
    pub fn classify(raw: &'a str) -> Action<'a> {
        if raw.starts_with('/') || raw.starts_with('!') {
            Action::HostCommand(raw)
        } else if let Some(rest) = raw.strip_prefix("# ") {
            Action::ConsoleLog(rest)
        } else if let Some(rest) = raw.strip_prefix('>') {
            Action::ModelPrompt(rest.trim_start())
        } else {
            Action::Passthrough(raw)
        }
    }
}

/// Split a trailing ` => <register>` capture directive off an action.
///
/// Only command and prompt actions can carry captures; console logs and
/// passthrough text are returned untouched so free text is never mangled.
pub fn split_capture(raw: &str) -> (&str, Option<&str>) {
    if !(raw.starts_with('/') || raw.starts_with('!') || raw.starts_with('>')) {
        return (raw, None);
    }
    if let Some(pos) = raw.rfind(" => ") {
        let register = &raw[pos + 4..];
        if is_register_name(register) {
            return (raw[..pos].trim_end(), Some(register));
        }
    }
    (raw, None)
}

/// Register names are bare identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_register_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
