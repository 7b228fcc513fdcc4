//! Example: parse a mailbox-list value and print each normalized address.
//!
//! ## Running
//!
//! ```bash
//! cargo run --package mailfold-imf --example parse_addresses -- \
//!     "A Group:Chris <c@x.test>, joe@y.example;"
//! ```

use mailfold_imf::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), mailfold_imf::Error> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailfold_imf=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "A Group:Chris <c@x.test>, joe@y.example;".to_string());

    let mut parser = Parser::new(&input);
    let addresses = parser.parse_mailbox_or_group()?;

    println!("{} address(es):", addresses.len());
    for address in addresses.addresses() {
        println!("  {}", address.name.as_deref().unwrap_or("(no recipients)"));
    }

    Ok(())
}
