//! Example demonstrating a one-shot cloud query.
//!
//! Run with: cargo run --example cloud_demo nei

use libjyutping::{CloudInput, CloudProvider};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <jyutping> [retained]", args[0]);
        eprintln!("Example: {} nei", args[0]);
        eprintln!("Example: {} hou 你", args[0]);
        std::process::exit(1);
    }

    let query = &args[1];
    let retained = args.get(2).map(String::as_str).unwrap_or("");

    println!("🌐 Cloud Transliteration Demo");
    println!("=============================\n");
    if retained.is_empty() {
        println!("Querying for: {query}\n");
    } else {
        println!("Querying for: {query} (after {retained})\n");
    }

    let mut cloud = CloudInput::new(CloudProvider::Hosted);
    cloud.set_timeout(3000);

    println!("⏳ Sending request...");

    match cloud.query(query, retained) {
        Ok(candidates) if candidates.is_empty() => {
            println!("\n❌ No candidates returned");
        }
        Ok(candidates) => {
            println!("\n✅ Got {} candidates:\n", candidates.len());
            for (i, text) in candidates.iter().enumerate() {
                println!("  {}. {}", i + 1, text);
            }
        }
        Err(e) => {
            println!("\n❌ Query failed: {e}");
            std::process::exit(1);
        }
    }
}
