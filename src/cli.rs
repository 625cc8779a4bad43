use std::path::PathBuf;

use clap::Parser;

use demark::api;
use demark::types::ScrubResult;

#[derive(Parser)]
#[command(name = "demark")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detect and strip invisible Unicode watermarks from text", long_about = None)]
pub struct Cli {
    /// File to read; stdin when omitted
    pub input: Option<PathBuf>,

    /// Emit the full analysis envelope as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Print the cleaned text only, no report
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn print_summary(result: &ScrubResult) {
    let stats = &result.stats;

    println!("Original length:   {}", stats.original_length);
    println!("Cleaned length:    {}", stats.cleaned_length);
    println!("Removed:           {}", stats.characters_removed);
    println!("Compression:       {:.2}%", stats.compression_ratio);
    println!("Confidence:        {}", result.analysis.confidence);

    if !result.detected_watermarks.is_empty() {
        println!();
        println!(
            "{:<10} {:<12} {:>6}  {:<20} NAME",
            "CHAR", "CODE POINT", "COUNT", "CATEGORY"
        );
        for wm in &result.detected_watermarks {
            println!(
                "{:<10} {:<12} {:>6}  {:<20} {}",
                wm.character, wm.unicode_point, wm.count, wm.category, wm.name
            );
        }
    }

    if !result.analysis.suspicious_patterns.is_empty() {
        println!();
        for pattern in &result.analysis.suspicious_patterns {
            println!("[!] {pattern}");
        }
    }

    println!();
    for note in api::recommendations(result) {
        println!("  - {note}");
    }
}
