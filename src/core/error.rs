use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed invocation: {0}")]
    MalformedInvocation(String),

    #[error("import failure: {0}")]
    ImportFailure(String),

    #[error("macro '{0}' has no resumable entry point 'main'")]
    MissingEntryPoint(String),

    #[error("macro runtime error: {0}")]
    MacroRuntime(String),

    #[error("host command failed: {0}")]
    Host(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable code for each failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedInvocation(_) => "invocation.malformed",
            Error::ImportFailure(_) => "module.import_failed",
            Error::MissingEntryPoint(_) => "module.missing_entry_point",
            Error::MacroRuntime(_) => "macro.runtime_error",
            Error::Host(_) => "host.command_failed",
            Error::Io(_) => "internal.io_error",
        }
    }
}
