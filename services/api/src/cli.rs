use crate::assess::{run_assess, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fraud_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fraud Scoring Service",
    about = "Score transactions for fraud risk over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single transaction and print the assessment
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assess_command_with_blacklist_list() {
        let cli = Cli::try_parse_from([
            "fraud-scoring-api",
            "assess",
            "--amount",
            "10001",
            "--location",
            "SP",
            "--blacklist",
            "RJ,MG",
            "--json",
        ])
        .expect("cli parses");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.amount, 10001.0);
                assert_eq!(args.location, "SP");
                assert_eq!(args.blacklist, vec!["RJ".to_string(), "MG".to_string()]);
                assert!(args.json);
                assert!(args.timestamp.is_none());
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["fraud-scoring-api"]).expect("cli parses");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["fraud-scoring-api", "serve", "--port", "8080"])
            .expect("cli parses");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
