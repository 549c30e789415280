use clap::Parser;
use todos::cli::commands::Cli;
use todos::cli::handlers;
use todos::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref());
            logging::init_file(&data_dir);
            if let Err(e) = todos::tui::run(&data_dir, &cli.route) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_stderr();
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
