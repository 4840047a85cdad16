//! `tubby`: run Tubby bytecode from the command line
//!
//! This binary only parses arguments, sets up logging and colour, and hands
//! over to `tubby_cli` (lib).

#![forbid(unsafe_code)]

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use tubby_cli as cli;

// ──────────────────────────── CLI (clap) ────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "tubby", version, about = "Tubby VM: decode and execute Tubby bytecode", long_about = None)]
struct Opt {
    /// More log output (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Errors only
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    /// Colour for status lines on stderr
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute a bytecode file until the program counter leaves the program
    Run {
        /// Bytecode file (or - for stdin)
        program: Option<PathBuf>,
        /// Report execution time and instruction count on stderr
        #[arg(long)]
        time: bool,
    },
}

// ──────────────────────────── Logger / colour ────────────────────────────

fn init_telemetry(verbose: u8, quiet: bool) {
    #[cfg(feature = "trace")]
    {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        // an explicit RUST_LOG wins over -v/-q
        if std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var("RUST_LOG", level);
        }
        cli::init_logger();
    }
    #[cfg(not(feature = "trace"))]
    {
        let _ = (verbose, quiet);
    }
}

fn init_color(choice: ColorChoice) {
    #[cfg(feature = "color")]
    {
        match choice {
            ColorChoice::Auto => owo_colors::unset_override(),
            ColorChoice::Always => owo_colors::set_override(true),
            ColorChoice::Never => owo_colors::set_override(false),
        }
    }
    #[cfg(not(feature = "color"))]
    {
        let _ = choice;
    }
}

// ──────────────────────────── main ────────────────────────────

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::status_error(&format!("{e:#}"));
            ExitCode::from(1)
        },
    }
}

fn real_main() -> Result<()> {
    let opt = Opt::parse();

    init_color(opt.color);
    init_telemetry(opt.verbose, opt.quiet);

    let command = match opt.cmd {
        Command::Run { program, time } => {
            cli::Command::Run(cli::RunTask { program: cli::Input::from_arg(program), time })
        },
    };

    cli::execute(command)
}
