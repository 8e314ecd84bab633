use log::info;
use medi_vent::{Report, SessionState, Submission, VentilationMode};

use crate::config::OutputMode;
use crate::input::{describe_fields, parse_submission};

/// Interactive settings form: one page per ventilation mode, submissions
/// typed as `key=value` pairs, changes shown against the previous submission.
pub struct ReplSession {
    state: SessionState,
    output: OutputMode,
    strict: bool,
}

impl ReplSession {
    pub fn new(mode: VentilationMode, output: OutputMode, strict: bool) -> Self {
        Self {
            state: SessionState::with_mode(mode),
            output,
            strict,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn prompt(&self) -> &'static str {
        match self.state.mode() {
            VentilationMode::Vcv => "vcv> ",
            VentilationMode::Pcv => "pcv> ",
        }
    }

    /// Handle one input line. Returns output lines and whether to exit.
    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }
        match parse_submission(self.state.mode(), trimmed, self.strict) {
            Ok(params) => {
                let submission = self.state.submit(params);
                (render_submission(&submission, self.output), false)
            }
            Err(e) => (vec![format!("error: {e}")], false),
        }
    }

    fn handle_command(&mut self, cmd: &str) -> (Vec<String>, bool) {
        match cmd {
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            ":help" => {
                let mut out = vec![
                    "commands: :help, :quit, :vcv, :pcv, :last".to_string(),
                    format!("submit {} settings as key=value pairs:", self.state.mode()),
                ];
                out.extend(describe_fields(self.state.mode()));
                (out, false)
            }
            ":vcv" | ":pcv" => {
                let mode = if cmd == ":vcv" {
                    VentilationMode::Vcv
                } else {
                    VentilationMode::Pcv
                };
                if self.state.select_mode(mode) {
                    info!("page switched to {mode}");
                    (vec![format!("switched to {mode}")], false)
                } else {
                    (vec![format!("already on {mode}")], false)
                }
            }
            ":last" => {
                let last = self.state.last();
                if self.state.submissions() == 0 {
                    return (vec!["no submissions yet".to_string()], false);
                }
                (
                    vec![format!(
                        "vt={} ppeak={} peep={} rr={} f={} del_p_din={} mp={}",
                        last.vt, last.ppeak, last.peep, last.rr, last.f, last.del_p_din, last.mp
                    )],
                    false,
                )
            }
            other => (
                vec![format!("error: unknown command '{other}' (try :help)")],
                false,
            ),
        }
    }
}

pub fn render_submission(submission: &Submission, output: OutputMode) -> Vec<String> {
    let report = Report::from_submission(submission);
    match output {
        OutputMode::Text => report.to_lines(),
        OutputMode::Json => match report.to_json() {
            Ok(s) => s.lines().map(str::to_string).collect(),
            Err(e) => vec![format!("error: failed to serialize report: {e}")],
        },
    }
}

pub fn run_repl(mode: VentilationMode, output: OutputMode, strict: bool) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize session: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new(mode, output, strict);
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: session failed: {e}");
                return 2;
            }
        }
    }
}
