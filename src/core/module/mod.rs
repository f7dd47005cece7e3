//! Macro module resolution: filesystem scripts and registered native macros.
//!
//! A module reference is either a path to a `.macro` script file or a dotted
//! name registered in a [`MacroRegistry`]. Both strategies sit behind the
//! [`MacroSource`] trait so further sources can be added without touching
//! the engine.

mod script;

pub use script::{parse_script, ScriptMacro};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::body::MacroBody;
use crate::core::error::{Error, Result};
use crate::core::invocation::Kwargs;

/// Recognized script extension for file-based macros.
pub const SCRIPT_EXTENSION: &str = ".macro";

/// The entry point every loadable module must expose.
pub const ENTRY_POINT: &str = "main";

/// Instantiates a macro body from the invocation's keyword arguments.
pub type EntryFactory = Box<dyn Fn(&Kwargs) -> Box<dyn MacroBody>>;

#[derive(Default)]
struct MacroModule {
    entries: HashMap<String, EntryFactory>,
}

/// Natively registered macros, keyed by dotted module name.
#[derive(Default)]
pub struct MacroRegistry {
    modules: HashMap<String, MacroModule>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry point under `module`/`entry`. The factory runs once
    /// per invocation, after the keyword arguments have been decoded.
    pub fn register<F>(&mut self, module: &str, entry: &str, factory: F)
    where
        F: Fn(&Kwargs) -> Box<dyn MacroBody> + 'static,
    {
        self.modules
            .entry(module.to_string())
            .or_default()
            .entries
            .insert(entry.to_string(), Box::new(factory));
    }

    pub fn module_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.modules.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// One strategy for turning a module reference into a runnable macro body.
pub trait MacroSource {
    /// Cheap heuristic: does this source claim the reference?
    fn can_load(&self, reference: &str) -> bool;

    /// Materialize the module's `main` entry point.
    fn load(&self, reference: &str, kwargs: &Kwargs) -> Result<Box<dyn MacroBody>>;
}

/// Loads `.macro` script files from disk. The script's top-level text is
/// parsed exactly once, at load time; the synthetic module name is the file
/// stem.
pub struct FileSource;

impl MacroSource for FileSource {
    fn can_load(&self, reference: &str) -> bool {
        reference.ends_with(SCRIPT_EXTENSION) || Path::new(reference).is_file()
    }

    fn load(&self, reference: &str, _kwargs: &Kwargs) -> Result<Box<dyn MacroBody>> {
        let path = Path::new(reference);
        let source = fs::read_to_string(path)
            .map_err(|e| Error::ImportFailure(format!("cannot read '{}': {}", reference, e)))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| reference.to_string());
        let script = parse_script(&name, &source)?;
        Ok(Box::new(script))
    }
}

/// Resolves dotted module names against a [`MacroRegistry`].
pub struct RegistrySource {
    registry: MacroRegistry,
}

impl RegistrySource {
    pub fn new(registry: MacroRegistry) -> Self {
        Self { registry }
    }
}

impl MacroSource for RegistrySource {
    fn can_load(&self, _reference: &str) -> bool {
        // Fallback strategy: any non-path reference is a candidate.
        true
    }

    fn load(&self, reference: &str, kwargs: &Kwargs) -> Result<Box<dyn MacroBody>> {
        let module = self
            .registry
            .modules
            .get(reference)
            .ok_or_else(|| Error::ImportFailure(format!("no module registered as '{}'", reference)))?;
        let factory = module
            .entries
            .get(ENTRY_POINT)
            .ok_or_else(|| Error::MissingEntryPoint(reference.to_string()))?;
        Ok(factory(kwargs))
    }
}

/// Resolves module references by asking each source in order; the first one
/// that claims the reference wins.
pub struct ModuleLoader {
    sources: Vec<Box<dyn MacroSource>>,
}

impl ModuleLoader {
    pub fn new(registry: MacroRegistry) -> Self {
        Self {
            sources: vec![
                Box::new(FileSource),
                Box::new(RegistrySource::new(registry)),
            ],
        }
    }

    /// Install an extra source ahead of the built-in strategies.
    pub fn with_source(mut self, source: Box<dyn MacroSource>) -> Self {
        self.sources.insert(0, source);
        self
    }

    pub fn load(&self, reference: &str, kwargs: &Kwargs) -> Result<Box<dyn MacroBody>> {
        for source in &self.sources {
            if source.can_load(reference) {
                return source.load(reference, kwargs);
            }
        }
        Err(Error::ImportFailure(format!(
            "no loader accepts '{}'",
            reference
        )))
    }
}
