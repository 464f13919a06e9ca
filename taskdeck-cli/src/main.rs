use clap::Parser;
use std::io::Write;
use std::process;
use taskdeck_cli::cli::Cli;
use taskdeck_cli::exit_codes::EXIT_ERROR;
use taskdeck_cli::logging::configure_logging;

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let mut sink = std::io::sink();
    let out: &mut dyn Write = if cli.quiet { &mut sink } else { &mut stdout };

    let code = match taskdeck_cli::run(&cli, out) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            EXIT_ERROR
        }
    };
    if let Err(error) = out.flush() {
        eprintln!("Error: {error}");
        process::exit(EXIT_ERROR);
    }
    process::exit(code);
}
