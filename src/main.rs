use colored::Colorize;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = argfeed::cli::run().await {
        eprintln!("{} {:#}", "Error:".red(), e);
        process::exit(1);
    }
}
