use clap::Parser;
use sortdir::cli::{Cli, init_logging, run_cli};
use sortdir::output::OutputFormatter;

fn main() {
    // Usage and parse errors are printed, never turned into an exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    init_logging();

    if let Err(e) = run_cli(&cli.directory) {
        OutputFormatter::error(&format!("Error: {}", e));
    }
}
