//! # Stellar Burgers CLI Entry Point
//!
//! Setup lives in lib.rs for testability.

#[tokio::main]
async fn main() -> std::process::ExitCode {
    burger_cli::run().await
}
