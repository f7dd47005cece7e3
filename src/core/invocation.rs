//! Invocation-line parsing for `/macro <module-reference> [k=v ...]`.
//!
//! The invocation line is split with shell-style word rules (quotes and
//! escapes respected), so values containing spaces can be passed as
//! `msg='hello world'`.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::error::{Error, Result};
use crate::core::value::ArgValue;

/// Keyword arguments decoded from an invocation line.
pub type Kwargs = HashMap<String, ArgValue>;

/// A decoded macro invocation: the module to load and its keyword arguments.
#[derive(Debug, Clone, Serialize)]
pub struct Invocation {
    pub module_ref: String,
    pub kwargs: Kwargs,
}

/// Parse the raw text typed after the macro-invocation command.
pub fn parse_invocation(line: &str) -> Result<Invocation> {
    let tokens = shell_words::split(line)
        .map_err(|e| Error::MalformedInvocation(format!("unbalanced quoting: {}", e)))?;
    parse_invocation_tokens(&tokens)
}

/// Parse an invocation from pre-split argv-style tokens.
pub fn parse_invocation_tokens(tokens: &[String]) -> Result<Invocation> {
    let (module_ref, rest) = tokens
        .split_first()
        .ok_or_else(|| Error::MalformedInvocation("missing module path".to_string()))?;

    if module_ref.is_empty() {
        return Err(Error::MalformedInvocation("missing module path".to_string()));
    }

    let mut kwargs = Kwargs::new();
    for token in rest {
        let (key, value) = token.split_once('=').ok_or_else(|| {
            Error::MalformedInvocation(format!("bad arg '{}', expected k=v", token))
        })?;
        kwargs.insert(key.to_string(), ArgValue::coerce(value));
    }

    Ok(Invocation {
        module_ref: module_ref.clone(),
        kwargs,
    })
}
