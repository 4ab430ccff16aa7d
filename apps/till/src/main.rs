//! # Skil Till Entry Point
//!
//! Deposit-return counter for cans and bottles, one command per line.
//!
//! ```text
//! > cans 3
//! > bottles 2
//! ── Till ── [ISK]
//!   Cans          3   60 ISK
//!   Bottles       2   50 ISK
//!   Total         5   110 ISK
//!   Payout        0   0 ISK
//! > pay
//! ```
//!
//! The actual setup is in lib.rs.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = skil_till::run().await {
        if e.is_config_error() {
            eprintln!("Check till.toml or the SKIL_* environment variables.");
        }
        return Err(e.into());
    }
    Ok(())
}
