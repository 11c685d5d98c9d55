//! Binary entry point for the `ink` CLI.

fn main() {
    if let Err(err) = inkpress::cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
