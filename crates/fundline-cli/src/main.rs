use std::process::ExitCode;

use clap::Parser;
use fundline_cli::{CliArgs, FundlineCli};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = match FundlineCli::from_args("fundline", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fundline: {e}");
            ExitCode::FAILURE
        }
    }
}
