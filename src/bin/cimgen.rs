use cimgen::frontend;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    frontend::cli_main()
}
