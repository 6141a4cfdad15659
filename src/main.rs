use std::{fs, process::ExitCode};

use clap::Parser;
use monkey::{interpreter::value::core::Object, run};
use tracing_subscriber::{EnvFilter, fmt};

/// monkey runs programs written in the Monkey programming language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells monkey to treat the contents as a file path instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the program's last statement, unless it
    /// is null.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // MONKEY_LOG controls the log level; warnings only by default.
    let filter = EnvFilter::try_from_env("MONKEY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(false)
         .init();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    match run(&script) {
        Ok(value) => {
            if args.pipe_mode && !matches!(value, Object::Null) {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
