//! ipprov - DNS provenance analysis for captured traffic
//!
//! Finds addresses reached without a DNS lookup and attributes addresses to
//! their owners.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    ipprov_cli::run().await
}
