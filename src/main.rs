use clap::Parser;

use macrorun::{
    log_status, parse_invocation_tokens, MacroEngine, MacroRegistry, ModuleLoader, ShellHost,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Standalone runner for `.macro` script files against the local shell.
///
/// When embedded in a coding-assistant CLI the engine is driven by the host's
/// `/macro` command instead; this binary exists so macros can be authored and
/// exercised outside a session.
#[derive(Parser)]
#[command(name = "macrorun")]
#[command(version = VERSION)]
#[command(about = "Run a macro script against the local shell")]
struct Cli {
    /// Module reference: a .macro file path or a registered module name
    module_ref: String,

    /// Keyword arguments, key=value
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mut tokens = vec![cli.module_ref];
    tokens.extend(cli.args);

    let invocation = match parse_invocation_tokens(&tokens) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            return std::process::ExitCode::from(2);
        }
    };

    log_status!("macro", "Running {}", invocation.module_ref);

    let engine = MacroEngine::new(ModuleLoader::new(MacroRegistry::new()));
    let mut host = ShellHost::new();
    let outcome = engine.run_invocation(&invocation, &mut host);

    if outcome.error.is_some() {
        std::process::ExitCode::from(1)
    } else {
        std::process::ExitCode::SUCCESS
    }
}
