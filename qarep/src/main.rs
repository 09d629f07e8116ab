mod cli;
mod exit_codes;
mod load_test;
mod logging;
mod output;
mod run_error;
mod test_reports;

use clap::Parser;
use mimalloc::MiMalloc;

use crate::exit_codes::ExitCode;
use crate::run_error::RunError;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(v) => v,
        Err(err) => {
            use clap::error::ErrorKind;
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success.as_i32(),
                _ => ExitCode::InvalidInput.as_i32(),
            };
            std::process::exit(code);
        }
    };

    logging::init();

    let result = match cli.command {
        cli::Command::LoadTest(args) => load_test::run(args),
        cli::Command::Backend(args) => test_reports::backend(args).map(|()| ExitCode::Success),
        cli::Command::Frontend(args) => test_reports::frontend(args).map(|()| ExitCode::Success),
        cli::Command::Consolidated(args) => {
            test_reports::consolidated(args).map(|()| ExitCode::Success)
        }
    };

    let code = match result {
        Ok(code) => code.as_i32(),
        Err(err) => report_failure(&err),
    };

    std::process::exit(code);
}

fn report_failure(err: &RunError) -> i32 {
    eprintln!("{err}");
    err.exit_code().as_i32()
}
