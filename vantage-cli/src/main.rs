//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    sensible_env_logger::init!();
    if let Err(err) = vantage_cli::run() {
        eprintln!("vantage: {err}");
        std::process::exit(1);
    }
}
