//! Example: building a verification script
//!
//! Demonstrates the script builder and its YAML form.
//!
//! Run with: `cargo run --example script_builder`

use verificar::prelude::*;

fn main() -> VerifyResult<()> {
    println!("=== Script Builder Example ===\n");

    let script = VerifyScript::new("wallet-modal")
        .describe("wallet prompt appears when no extension is installed")
        .goto("http://localhost:3000")
        .pause_ms(2000)
        .click(Selector::button("Connect Wallet"))
        .pause_ms(1000)
        .expect_text("MetaMask Not Found")
        .screenshot("wallet_modal_check_final.png");

    println!("Script '{}' with {} steps:", script.name, script.step_count());
    for step in &script.steps {
        println!("  - {}", step.describe());
    }

    println!("\nYAML form:\n{}", script.to_yaml()?);

    let parsed = VerifyScript::from_yaml(&script.to_yaml()?)?;
    println!("Round-trips cleanly: {}", parsed == script);

    Ok(())
}
