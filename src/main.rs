use clap::Parser;
use swarm_bench::cli::{diagnostic, execute, output, Cli};
use tokio::signal;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = cli.config.clone();

    tokio::select! {
        result = execute(cli) => {
            if let Err(e) = result {
                diagnostic::report(&config_path, &e);
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            output::warning("interrupted; machines created so far are left in place");
            std::process::exit(130);
        }
    }
}
