use std::io::{self, BufRead};

use clap::Parser;

use libjyutping::{Engine, ImeContext, JyutpingConfig};

#[derive(Parser, Debug)]
#[command(name = "libjyutping", about = "Cloud-backed jyutping input demo")]
struct Args {
    /// Input-tool code sent to the provider
    #[arg(long)]
    itc: Option<String>,

    /// Convert committed text to simplified characters
    #[arg(long)]
    simplified: bool,

    /// Self-hosted endpoint speaking the same wire contract
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Mark committed text as copied to the host clipboard
    #[arg(long)]
    copy: bool,

    /// Load configuration from a TOML file (flags below still win)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn build_config(args: &Args) -> JyutpingConfig {
    let mut config = match &args.config {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    println!("✓ Loaded configuration from '{}'", path.display());
                    config
                }
                Err(e) => {
                    eprintln!("⚠ Failed to parse '{}': {e}; using defaults", path.display());
                    JyutpingConfig::default()
                }
            },
            Err(e) => {
                eprintln!("⚠ Failed to read '{}': {e}; using defaults", path.display());
                JyutpingConfig::default()
            }
        },
        None => JyutpingConfig::default(),
    };

    if let Some(itc) = &args.itc {
        config.input_tool = itc.clone();
    }
    if args.simplified {
        config.base.simplified = true;
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if args.copy {
        config.copy_on_commit = true;
    }
    config
}

fn render(context: &ImeContext) {
    if let Some(error) = &context.error_text {
        println!("⚠ {error}");
    }
    println!("buffer: '{}'", context.preedit_text);
    if !context.candidates.is_empty() {
        for candidate in &context.candidates {
            println!("  {}. {}", candidate.position, candidate.text);
        }
        let mut hints = Vec::new();
        if context.has_previous_page {
            hints.push("9=上一頁");
        }
        if context.has_next_page {
            hints.push("0=下一頁");
        }
        if !context.auxiliary_text.is_empty() {
            hints.push(context.auxiliary_text.as_str());
        }
        if !hints.is_empty() {
            println!("  [{}]", hints.join(" | "));
        }
    }
}

fn main() {
    let args = Args::parse();
    let config = build_config(&args);
    let copy_on_commit = config.copy_on_commit;
    let mut engine = Engine::new(config);

    println!("libjyutping demo CLI — type jyutping (e.g. 'nei' or 'neihou') and press Enter.");
    println!("Each line replaces the whole buffer; a trailing 1-6 selects, 0/9 turn pages.");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(raw) = line else { break };
        let text = raw.trim_end_matches(['\r', '\n']);

        engine.update_text_now(text);

        let committed = engine.context_mut().take_commit();
        if !committed.is_empty() {
            if copy_on_commit {
                println!("✓ committed '{committed}' (copied)");
            } else {
                println!("✓ committed '{committed}'");
            }
        }
        render(engine.context());
    }
}
