mod cli;
mod conversion;
mod error;
mod notice;
mod tui;
mod utils;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
