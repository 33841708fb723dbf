use clap::Parser;
use std::process::ExitCode;

mod action;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Logging directive, using the tracing-subscriber EnvFilter syntax.
    #[clap(
        long,
        env = "LOG",
        default_value = "sparkpost_publisher=info,sparkpost_publisher_engine=info"
    )]
    log: String,
    /// Disables colors in the logs.
    #[clap(long)]
    no_color: bool,
    #[command(subcommand)]
    action: action::Action,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = sparkpost_publisher::init_logs(&args.log, !args.no_color) {
        eprintln!("unable to initialize logs: {err}");
    }

    match args.action.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
