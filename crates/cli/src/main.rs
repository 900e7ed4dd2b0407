// bootdev-sync CLI entry point.

use clap::Parser;

mod commands;
mod exit_code;
mod output;

use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "bootdev-sync", about = "Record Boot.dev activity as git commits")]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Option<commands::Command>,
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            let code = if error.use_stderr() { ExitCode::Usage } else { ExitCode::Success };
            return code.into();
        }
    };

    let command = cli.command.unwrap_or_default();
    let format = command.format();
    match commands::run(&cli.global, command) {
        Ok(code) => code.into(),
        Err(error) => {
            output::print_error(format, "SYNC_FAILED", &format!("{error:#}"));
            ExitCode::Failure.into()
        }
    }
}
