use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use guac::run_source;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Interpreter for the guac toy language")]
struct Cli {
    /// Path to the source file to run.
    file: PathBuf,
}

fn main() -> ExitCode {
    simple_logger::init_with_level(log::Level::Warn).unwrap();

    let args = Cli::parse();

    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Could not read file '{}': {err}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    match run_source(&source) {
        Ok(value) => {
            println!("Result : {value}");
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            log::error!("program terminated with an error");
            eprintln!("{}", diagnostic.render(&source));
            ExitCode::FAILURE
        }
    }
}
