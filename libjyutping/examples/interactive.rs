//! Interactive REPL over the cloud-backed engine, default settings only.
//!
//! Run with: cargo run --example interactive

use std::io::{self, BufRead};

use libjyutping::{Engine, JyutpingConfig};

fn main() {
    let mut engine = Engine::new(JyutpingConfig::default());

    println!("libjyutping interactive demo — each line replaces the buffer.");
    println!("Trailing 1-6 selects that candidate, 0 = next page, 9 = previous page.");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(raw) = line else { break };
        let text = raw.trim_end_matches(['\r', '\n']);

        engine.update_text_now(text);

        let committed = engine.context_mut().take_commit();
        if !committed.is_empty() {
            println!("✓ committed '{committed}'");
        }

        let context = engine.context();
        if let Some(error) = &context.error_text {
            println!("⚠ {error}");
        }
        println!("buffer: '{}'", context.preedit_text);
        for candidate in &context.candidates {
            println!("  {}. {}", candidate.position, candidate.text);
        }
        if !context.auxiliary_text.is_empty() {
            println!("  [{}]", context.auxiliary_text);
        }
    }
}
