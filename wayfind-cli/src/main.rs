//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = wayfind_cli::run() {
        eprintln!("wayfind: {err}");
        std::process::exit(1);
    }
}
