//! SPIM MIPS32 simulator CLI.
//!
//! This binary runs one ELF program to completion. It performs:
//! 1. **Setup:** Loads an optional JSON configuration and the program image.
//! 2. **Execution:** Steps the program in chunks, stopping at breakpoints.
//! 3. **Inspection:** At each breakpoint prints the requested views with
//!    changed entries marked, then resumes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use spim_core::Config;
use spim_core::inspect::{DiffEntry, render_html, render_plain};
use spim_core::sim::{ElfLoader, Simulator, StderrReporter, StepStatus, fatal_error};
use spim_core::soc::devices::Console;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "spim",
    author,
    version,
    about = "MIPS32 simulator",
    long_about = "Run a MIPS32 ELF executable, stopping at breakpoints to show diff-marked state.\n\nExamples:\n  spim hello.elf\n  spim --break 0x00400020 --show regs fib.elf\n  spim --config cfg.json --steps 1000 --show all --plain loop.elf"
)]
struct Cli {
    /// JSON configuration file; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Instructions per step; 0 uses the configured default budget.
    #[arg(long, default_value_t = 0)]
    steps: u32,

    /// Breakpoint address (hex with 0x prefix, or decimal). Repeatable.
    #[arg(long = "break", value_parser = parse_address)]
    breakpoints: Vec<u32>,

    /// State to print at each breakpoint.
    #[arg(long, value_enum, default_value_t = View::Regs)]
    show: View,

    /// Print plain text instead of HTML markup.
    #[arg(long)]
    plain: bool,

    /// Program to run.
    program: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum View {
    Regs,
    Data,
    Stack,
    All,
}

fn parse_address(text: &str) -> Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{text}': {e}"))
}

/// Reads `RUST_LOG`; tracing is silent unless asked for.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| fatal_error(format_args!("{e}"))),
        None => Config::default(),
    };
    config.general.program.clone_from(&cli.program);
    let reporter = StderrReporter::new(config.general.quiet);

    let mut sim = Simulator::initialize(config, &ElfLoader, Console::stdio(), Box::new(reporter))
        .unwrap_or_else(|e| fatal_error(format_args!("{e}")));
    for &addr in &cli.breakpoints {
        sim.add_breakpoint(addr);
    }

    // Establish the shadows so the first stop marks changes since load.
    let _ = views(&mut sim, View::All, false);

    let mut resume = false;
    loop {
        match sim.step(cli.steps, resume) {
            StepStatus::Completed => break,
            StepStatus::Breakpoint => {
                print!("{}", format_views(&mut sim, cli.show, cli.plain));
                resume = true;
            }
            StepStatus::Running => resume = false,
        }
    }

    let code = sim.exit_code().unwrap_or(0);
    info!(code, retired = sim.cpu().instructions_retired, "exit");
    process::exit(code);
}

fn views(sim: &mut Simulator, show: View, compute_diff: bool) -> Vec<(&'static str, Vec<DiffEntry>)> {
    let mut out = Vec::new();
    if matches!(show, View::Regs | View::All) {
        out.push(("Special registers", sim.snapshot_special_registers(compute_diff)));
        out.push(("General registers", sim.snapshot_general_registers(compute_diff)));
    }
    if matches!(show, View::Data | View::All) {
        out.push(("User data", sim.snapshot_data(compute_diff)));
    }
    if matches!(show, View::Stack | View::All) {
        out.push(("User stack", sim.snapshot_stack(compute_diff)));
    }
    out
}

fn format_views(sim: &mut Simulator, show: View, plain: bool) -> String {
    views(sim, show, true)
        .into_iter()
        .map(|(title, entries)| {
            if plain {
                format!("== {title} ==\n{}", render_plain(&entries))
            } else {
                format!("<h3>{title}</h3>\n{}\n", render_html(&entries))
            }
        })
        .collect()
}
