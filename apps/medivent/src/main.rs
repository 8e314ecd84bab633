mod config;
mod input;
mod repl;

use clap::{Args, Parser, Subcommand};
use log::debug;
use medi_vent::limits::validate;
use medi_vent::{Field, SessionState, VentilationMode, VentilationParameters};

use crate::config::{init_logging, Config, OutputMode};
use crate::repl::{render_submission, run_repl};

#[derive(Debug, Parser)]
#[command(
    name = "medivent",
    version,
    about = "Mechanical power and ventilator-induced lung injury risk",
    long_about = "medivent computes the mechanical power delivered by a ventilator and grades\n\
        the risk of ventilator-induced lung injury (low, moderate, high, extreme).\n\n\
        EXAMPLES:\n\
        \n  medivent vcv --vt 500 --ppeak 20 --peep 5 --rr 15 --f 30\n\
        \n  medivent pcv --vt 400 --peep 8 --rr 18 --del-p-din 15\n\
        \n  medivent session --mode pcv\n\n\
        ENVIRONMENT:\n\
        \n  MEDIVENT_MODE    page a session opens on (vcv, pcv)\n\
        \n  MEDIVENT_OUTPUT  text or json"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Accept settings outside the form's slider ranges
    #[arg(long = "no-limits", global = true)]
    no_limits: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Volume controlled ventilation
    #[command(about = "Compute mechanical power for volume controlled ventilation")]
    Vcv(VcvArgs),

    /// Pressure controlled ventilation
    #[command(about = "Compute mechanical power for pressure controlled ventilation")]
    Pcv(PcvArgs),

    /// Interactive form session
    #[command(
        about = "Start an interactive session",
        long_about = "Start an interactive settings form. Each submission is compared with the\n\
            previous one.\n\n\
            Commands:\n\
            \n  :vcv, :pcv  Switch page\n\
            \n  :last       Show the previous submission\n\
            \n  :help       Show settings and ranges\n\
            \n  :quit       Exit (also :q, :exit)"
    )]
    Session(SessionArgs),
}

#[derive(Debug, Args, Clone)]
struct VcvArgs {
    /// Tidal volume, mL
    #[arg(long, default_value_t = Field::Vt.bounds().default_value())]
    vt: f64,
    /// Peak pressure, cmH2O
    #[arg(long, default_value_t = 0.0)]
    ppeak: f64,
    /// PEEP, cmH2O
    #[arg(long, default_value_t = 0.0)]
    peep: f64,
    /// Respiratory rate, /min
    #[arg(long, default_value_t = 0.0)]
    rr: f64,
    /// Inspiratory flow, L/min
    #[arg(long, default_value_t = 0.0)]
    f: f64,
}

#[derive(Debug, Args, Clone)]
struct PcvArgs {
    /// Tidal volume, mL
    #[arg(long, default_value_t = Field::Vt.bounds().default_value())]
    vt: f64,
    /// PEEP, cmH2O
    #[arg(long, default_value_t = 0.0)]
    peep: f64,
    /// Respiratory rate, /min
    #[arg(long, default_value_t = 0.0)]
    rr: f64,
    /// Dynamic driving pressure, cmH2O
    #[arg(long = "del-p-din", default_value_t = 0.0)]
    del_p_din: f64,
}

#[derive(Debug, Args, Clone)]
struct SessionArgs {
    /// Page to open on (vcv, pcv)
    #[arg(long, value_name = "MODE")]
    mode: Option<VentilationMode>,
}

fn run_once(params: VentilationParameters, output: OutputMode, strict: bool) -> i32 {
    if strict {
        if let Err(e) = validate(&params) {
            eprintln!("error: {e}");
            return 1;
        }
    }
    let submission = SessionState::with_mode(params.mode()).submit(params);
    for line in render_submission(&submission, output) {
        println!("{line}");
    }
    0
}

fn run_cli(cli: Cli, env: Config) -> i32 {
    let output = if cli.json { OutputMode::Json } else { env.output };
    let strict = !cli.no_limits;
    debug!("output {output:?}, limits {}", if strict { "on" } else { "off" });

    match cli.command {
        Command::Vcv(a) => run_once(
            VentilationParameters::volume_control(a.vt, a.ppeak, a.peep, a.rr, a.f),
            output,
            strict,
        ),
        Command::Pcv(a) => run_once(
            VentilationParameters::pressure_control(a.vt, a.peep, a.rr, a.del_p_din),
            output,
            strict,
        ),
        Command::Session(a) => run_repl(a.mode.unwrap_or(env.mode), output, strict),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let env = Config::from_env();
    std::process::exit(run_cli(cli, env));
}
