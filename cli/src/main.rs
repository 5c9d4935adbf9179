//! devstack - provision a local Java application-server development stack

use std::process::ExitCode;

use clap::Parser;

use devstack_cli::cli::Cli;
use devstack_cli::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let as_json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json::format_error(&message, "error") {
                Ok(obj) if as_json => println!("{obj}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
