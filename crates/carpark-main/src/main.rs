// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use carpark_main::{Backend, OutputFormat, SessionConfig};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
    process::ExitCode,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "carpark")]
#[command(
    about = "Allocate parking slots from a file of commands or from stdin",
    long_about = None
)]
struct Args {
    /// Command file (stdin if not specified)
    input: Option<PathBuf>,

    /// Output format for `status`
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Free slot index implementation
    #[arg(long, value_enum, default_value_t = Backend::SortedVec)]
    backend: Backend,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> io::Result<()> {
    let config = SessionConfig::new(args.format, args.backend);
    let out = BufWriter::new(io::stdout().lock());
    match &args.input {
        Some(path) => {
            let file = File::open(path)?;
            carpark_main::run(&config, BufReader::new(file), out)
        }
        None => carpark_main::run(&config, io::stdin().lock(), out),
    }
}

fn main() -> ExitCode {
    enable_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Session aborted");
            eprintln!("carpark: {e}");
            ExitCode::FAILURE
        }
    }
}
