//! fxql-check - Validate FXQL statements.
//!
//! Parses an FXQL request file and reports every statement that fails.

fn main() -> std::process::ExitCode {
    fxql::cmd::check::main()
}
