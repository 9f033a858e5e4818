use simonsays::cli::{Cli, build_command, run_cli};
use simonsays::output::OutputFormatter;
use simonsays::registry::CommandRegistry;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let registry = CommandRegistry::with_builtin_commands();
    let matches = build_command(&registry).get_matches();

    let cli = match Cli::from_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    cli.setup_logging();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_cli(&registry, &matches, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
