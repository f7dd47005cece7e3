use std::collections::HashMap;

use macrorun::{
    helpers, Error, Host, Kwargs, MacroBody, MacroContext, MacroEngine, MacroRegistry,
    ModuleLoader, Result, Step, ENTRY_POINT,
};

/// Records every collaborator call and answers command lines from a fixed
/// reply table.
#[derive(Default)]
struct StubHost {
    replies: HashMap<String, String>,
    commands: Vec<String>,
    prompts: Vec<String>,
    outputs: Vec<String>,
    errors: Vec<String>,
}

impl StubHost {
    fn with_reply(line: &str, reply: &str) -> Self {
        let mut host = Self::default();
        host.replies.insert(line.to_string(), reply.to_string());
        host
    }
}

impl Host for StubHost {
    fn run_command(&mut self, line: &str) -> Result<Option<String>> {
        self.commands.push(line.to_string());
        Ok(self.replies.get(line).cloned())
    }

    fn send_prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.replies.get(prompt).cloned())
    }

    fn tool_output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn tool_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

fn engine_with(registry: MacroRegistry) -> MacroEngine {
    MacroEngine::new(ModuleLoader::new(registry))
}

/// The three-action scenario: log, run a command, log its output.
struct EchoScenario {
    stage: usize,
}

impl MacroBody for EchoScenario {
    fn resume(
        &mut self,
        _ctx: &mut MacroContext,
        _host: &mut dyn Host,
        input: Option<String>,
    ) -> Result<Step> {
        self.stage += 1;
        match self.stage {
            1 => Ok(Step::Yield(helpers::log("start"))),
            2 => Ok(Step::Yield("!echo hi".to_string())),
            3 => Ok(Step::Yield(format!("# done: {}", input.unwrap_or_default()))),
            _ => Ok(Step::Done),
        }
    }
}

#[test]
fn end_to_end_three_dispatches_in_order() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.echo", ENTRY_POINT, |_| {
        Box::new(EchoScenario { stage: 0 })
    });
    let engine = engine_with(registry);
    let mut host = StubHost::with_reply("!echo hi", "hi\n");

    let outcome = engine.run("ops.echo", &mut host);

    assert_eq!(outcome.dispatched, 3);
    assert_eq!(outcome.error, None);
    assert_eq!(host.commands, vec!["!echo hi"]);
    assert_eq!(host.outputs, vec!["start", "done: hi\n"]);
    assert!(host.errors.is_empty());
}

/// Yields one raw string, then echoes the value it was resumed with as a
/// console log so the test can read it off the host.
struct RoundTrip {
    action: String,
    stage: usize,
}

impl MacroBody for RoundTrip {
    fn resume(
        &mut self,
        _ctx: &mut MacroContext,
        _host: &mut dyn Host,
        input: Option<String>,
    ) -> Result<Step> {
        self.stage += 1;
        match self.stage {
            1 => Ok(Step::Yield(self.action.clone())),
            2 => {
                let report = match input {
                    Some(value) => format!("resumed with {}", value),
                    None => "resumed with nothing".to_string(),
                };
                Ok(Step::Yield(helpers::log(&report)))
            }
            _ => Ok(Step::Done),
        }
    }
}

#[test]
fn resume_value_is_exactly_the_dispatch_result() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.roundtrip", ENTRY_POINT, |_| {
        Box::new(RoundTrip {
            action: "X".to_string(),
            stage: 0,
        })
    });
    let engine = engine_with(registry);
    let mut host = StubHost::with_reply("X", "R");

    let outcome = engine.run("ops.roundtrip", &mut host);

    assert_eq!(outcome.error, None);
    // "X" has no grammar prefix, so it fell through to the command runner
    assert_eq!(host.commands, vec!["X"]);
    // the body saw the runner's reply verbatim
    assert_eq!(host.outputs, vec!["resumed with R"]);
    assert_eq!(outcome.dispatched, 2);
}

#[test]
fn console_log_resumes_with_none() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.lognone", ENTRY_POINT, |_| {
        Box::new(RoundTrip {
            action: "# just a log".to_string(),
            stage: 0,
        })
    });
    let engine = engine_with(registry);
    let mut host = StubHost::default();

    let outcome = engine.run("ops.lognone", &mut host);

    assert_eq!(outcome.error, None);
    // a log dispatch produces no result, so the body resumed with None
    assert_eq!(host.outputs, vec!["just a log", "resumed with nothing"]);
    assert!(host.commands.is_empty());
}

struct ReturnsImmediately;

impl MacroBody for ReturnsImmediately {
    fn resume(
        &mut self,
        _ctx: &mut MacroContext,
        _host: &mut dyn Host,
        _input: Option<String>,
    ) -> Result<Step> {
        Ok(Step::Done)
    }
}

#[test]
fn body_that_never_yields_terminates_cleanly() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.instant", ENTRY_POINT, |_| Box::new(ReturnsImmediately));
    let engine = engine_with(registry);
    let mut host = StubHost::default();

    let outcome = engine.run("ops.instant", &mut host);

    assert_eq!(outcome.dispatched, 0);
    assert_eq!(outcome.error, None);
    assert!(host.errors.is_empty());
}

/// Dispatches one command, then fails on its second resume.
struct FailsSecondResume {
    stage: usize,
}

impl MacroBody for FailsSecondResume {
    fn resume(
        &mut self,
        _ctx: &mut MacroContext,
        _host: &mut dyn Host,
        _input: Option<String>,
    ) -> Result<Step> {
        self.stage += 1;
        match self.stage {
            1 => Ok(Step::Yield("!touch a".to_string())),
            _ => Err(Error::MacroRuntime("boom".to_string())),
        }
    }
}

#[test]
fn failure_mid_run_keeps_prior_side_effects() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.flaky", ENTRY_POINT, |_| {
        Box::new(FailsSecondResume { stage: 0 })
    });
    let engine = engine_with(registry);
    let mut host = StubHost::default();

    let outcome = engine.run("ops.flaky", &mut host);

    // the first action was dispatched and its side effect stands
    assert_eq!(host.commands, vec!["!touch a"]);
    assert_eq!(outcome.dispatched, 1);
    // exactly one runtime-error report, nothing propagated
    assert_eq!(host.errors, vec!["macro runtime error: boom"]);
    assert_eq!(outcome.error.as_deref(), Some("macro.runtime_error"));
}

#[test]
fn malformed_invocation_never_starts_a_macro() {
    let engine = engine_with(MacroRegistry::new());
    let mut host = StubHost::default();

    let outcome = engine.run("", &mut host);

    assert_eq!(outcome.dispatched, 0);
    assert_eq!(outcome.error.as_deref(), Some("invocation.malformed"));
    assert_eq!(host.errors, vec!["malformed invocation: missing module path"]);

    let outcome = engine.run("ops.echo foo", &mut host);
    assert_eq!(outcome.error.as_deref(), Some("invocation.malformed"));
    assert!(host.errors[1].contains("bad arg 'foo', expected k=v"));
}

#[test]
fn unknown_module_reports_import_failure() {
    let engine = engine_with(MacroRegistry::new());
    let mut host = StubHost::default();

    let outcome = engine.run("no.such.module", &mut host);

    assert_eq!(outcome.dispatched, 0);
    assert_eq!(outcome.error.as_deref(), Some("module.import_failed"));
    assert_eq!(host.errors.len(), 1);
}

#[test]
fn module_without_main_reports_missing_entry_point() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.partial", "helper", |_| Box::new(ReturnsImmediately));
    let engine = engine_with(registry);
    let mut host = StubHost::default();

    let outcome = engine.run("ops.partial", &mut host);

    assert_eq!(outcome.error.as_deref(), Some("module.missing_entry_point"));
    assert_eq!(host.errors.len(), 1);
    assert!(host.errors[0].contains("main"));
}

/// Counts its loop iterations off a kwarg and captures command output.
struct CountedRuns;

impl MacroBody for CountedRuns {
    fn resume(
        &mut self,
        ctx: &mut MacroContext,
        _host: &mut dyn Host,
        _input: Option<String>,
    ) -> Result<Step> {
        let limit = ctx.vars.get("n").and_then(|v| v.as_int()).unwrap_or(0);
        if ctx.bump("runs") > limit {
            return Ok(Step::Done);
        }
        Ok(Step::Yield(helpers::run("date", Some("last_run"))))
    }
}

#[test]
fn kwargs_drive_the_body_and_captures_land_in_registers() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.counted", ENTRY_POINT, |_| Box::new(CountedRuns));
    let engine = engine_with(registry);
    let mut host = StubHost::with_reply("! date", "Mon");

    let outcome = engine.run("ops.counted n=3", &mut host);

    assert_eq!(outcome.dispatched, 3);
    assert_eq!(host.commands, vec!["! date", "! date", "! date"]);
    assert_eq!(outcome.error, None);
}

struct PromptScenario {
    stage: usize,
}

impl MacroBody for PromptScenario {
    fn resume(
        &mut self,
        ctx: &mut MacroContext,
        _host: &mut dyn Host,
        input: Option<String>,
    ) -> Result<Step> {
        self.stage += 1;
        match self.stage {
            1 => Ok(Step::Yield("> explain this".to_string())),
            2 => {
                ctx.set_register("reply", input.unwrap_or_default());
                Ok(Step::Yield(helpers::log(
                    ctx.register_str("reply").unwrap_or(""),
                )))
            }
            _ => Ok(Step::Done),
        }
    }
}

#[test]
fn prompts_route_to_the_coder_and_replies_flow_back() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.ask", ENTRY_POINT, |_| {
        Box::new(PromptScenario { stage: 0 })
    });
    let engine = engine_with(registry);
    let mut host = StubHost::with_reply("explain this", "it adds numbers");

    let outcome = engine.run("ops.ask", &mut host);

    assert_eq!(outcome.error, None);
    assert_eq!(host.prompts, vec!["explain this"]);
    assert_eq!(host.outputs, vec!["it adds numbers"]);
    assert!(host.commands.is_empty());
}

/// A factory can specialize the body from kwargs before the run starts.
#[test]
fn factories_see_the_decoded_kwargs() {
    let mut registry = MacroRegistry::new();
    registry.register("ops.greet", ENTRY_POINT, |kwargs: &Kwargs| {
        let who = kwargs
            .get("who")
            .and_then(|v| v.as_str())
            .unwrap_or("world")
            .to_string();
        Box::new(RoundTrip {
            action: helpers::log(&format!("hello {}", who)),
            stage: 0,
        })
    });
    let engine = engine_with(registry);
    let mut host = StubHost::default();

    let outcome = engine.run("ops.greet who=crew", &mut host);

    assert_eq!(outcome.error, None);
    assert_eq!(host.outputs, vec!["hello crew", "resumed with nothing"]);
}
