//! student-records entry point
//!
//! Parses CLI arguments, dispatches, prints errors to stderr and exits with
//! non-zero on failure. All logic lives in the `cli` module.

use student_records::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
