//! tubby-cli: library behind the `tubby` binary
//!
//! Keeps the testable part of the CLI out of `main.rs`: loading program bytes
//! (file or stdin), decoding, running against a sink, timing, and the status
//! lines printed on stderr. Argument parsing stays in `main.rs`.

#![deny(unused_must_use)]
#![forbid(unsafe_code)]

use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};

#[cfg(feature = "color")]
use owo_colors::{OwoColorize, Stream, Style};

use tubby_core::Program;
use tubby_vm::Machine;

// ───────────────────────────── Public types ─────────────────────────────

/// High-level command, already parsed.
#[derive(Clone, Debug)]
pub enum Command {
    /// Decode and execute a program.
    Run(RunTask),
}

#[derive(Clone, Debug, Default)]
pub struct RunTask {
    pub program: Input,
    pub time: bool, // report elapsed time and step count on stderr
}

/// Where program bytes come from.
#[derive(Clone, Debug, Default)]
pub enum Input {
    Path(PathBuf),
    #[default]
    Stdin,
}

impl Input {
    /// `None` and `-` both mean stdin.
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            Some(p) if p.as_os_str() != "-" => Self::Path(p),
            _ => Self::Stdin,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.to_string_lossy().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Summary of a completed run.
#[derive(Clone, Copy, Debug)]
pub struct RunReport {
    /// Instructions executed before the counter left the program.
    pub steps: u64,
    /// Wall time spent executing (decoding excluded).
    pub elapsed: Duration,
}

// ───────────────────────────── Initialisation ─────────────────────────────

/// Installs `env_logger` (feature `trace`); honours `RUST_LOG`.
pub fn init_logger() {
    #[cfg(feature = "trace")]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .format_timestamp_millis()
            .try_init();
    }
}

// ───────────────────────────── Execution ─────────────────────────────

/// Runs a command against the real stdin and stdout.
pub fn execute(cmd: Command) -> Result<()> {
    match cmd {
        Command::Run(task) => run_entry(&task),
    }
}

fn run_entry(task: &RunTask) -> Result<()> {
    let report = run_program_with(&task.program, io::stdin().lock(), io::stdout().lock())?;
    if task.time {
        status_info("TIME", &time_summary(&report));
    }
    Ok(())
}

/// Loads, decodes and runs the program from `input`, writing its output to `out`.
///
/// Nothing is executed if decoding fails.
pub fn run_program<W: Write>(input: &Input, out: W) -> Result<RunReport> {
    run_program_with(input, io::stdin().lock(), out)
}

/// Like [`run_program`], with `stdin` standing in for the process stdin.
pub fn run_program_with<R: Read, W: Write>(input: &Input, stdin: R, out: W) -> Result<RunReport> {
    let name = input.describe();
    let bytes = read_program(input, stdin).with_context(|| format!("reading program {name}"))?;
    let program = Program::from_bytes(&bytes).with_context(|| format!("decoding {name}"))?;

    #[cfg(feature = "trace")]
    log::info!("{name}: {} bytes, {} instructions", bytes.len(), program.len());

    let mut machine = Machine::new(program, out);
    let start = Instant::now();
    let steps = machine.run().with_context(|| format!("executing {name}"))?;
    let elapsed = start.elapsed();

    machine.into_output().flush().context("flushing program output")?;
    Ok(RunReport { steps, elapsed })
}

fn read_program<R: Read>(input: &Input, mut stdin: R) -> io::Result<Vec<u8>> {
    match input {
        Input::Path(p) => fs::read(p),
        Input::Stdin => {
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf)?;
            Ok(buf)
        },
    }
}

/// Body of the `TIME` status line printed by `run --time`.
pub fn time_summary(report: &RunReport) -> String {
    format!("{} instructions in {} ms", report.steps, report.elapsed.as_millis())
}

// ───────────────────────────── Status lines ─────────────────────────────

/// `error: <msg>` on stderr.
pub fn status_error(msg: &str) {
    #[cfg(feature = "color")]
    {
        eprintln!(
            "{} {msg}",
            "error:".if_supports_color(Stream::Stderr, |t| t.style(Style::new().red().bold()))
        );
    }
    #[cfg(not(feature = "color"))]
    {
        eprintln!("error: {msg}");
    }
}

fn status_info(tag: &str, msg: &str) {
    #[cfg(feature = "color")]
    {
        eprintln!(
            "{} {msg}",
            tag.if_supports_color(Stream::Stderr, |t| t.style(Style::new().blue().bold()))
        );
    }
    #[cfg(not(feature = "color"))]
    {
        eprintln!("{tag} {msg}");
    }
}

// ───────────────────────────── Tests ─────────────────────────────
