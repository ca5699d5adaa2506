//! # kakaopack CLI
//!
//! Command-line interface for the kakaopack library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kakaopack::cli::Args;
use kakaopack::core::TranscriptStats;
use kakaopack::format::OutputFormat;
use kakaopack::{KakaopackError, convert_with_config};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        if let Some(diagnostics) = e.diagnostics() {
            eprintln!();
            eprintln!("   Encoding:      {}", diagnostics.encoding);
            eprintln!("   Lines:         {}", diagnostics.non_blank_lines);
            eprintln!("   Date dividers: {}", diagnostics.divider_lines);
            eprintln!("   Headers:       {}", diagnostics.header_lines);
            if !diagnostics.preview.is_empty() {
                eprintln!("   First lines:");
                for line in &diagnostics.preview {
                    eprintln!("     | {}", line);
                }
            }
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "kakaopack=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), KakaopackError> {
    let total_start = Instant::now();
    let display_name = args.display_name();

    println!("📦 kakaopack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", args.output_dir.display());
    if let Some(only) = args.only {
        println!("📄 Format:  {}", only);
    }
    println!();

    println!("⏳ Reading export...");
    let bytes = fs::read(&args.input)?;

    println!("🔄 Converting {} bytes...", bytes.len());
    let convert_start = Instant::now();
    let conversion = convert_with_config(&bytes, &display_name, &args.convert_config())?;
    let convert_time = convert_start.elapsed();
    println!(
        "   Parsed {} messages ({}, {:.2}s)",
        conversion.transcript.len(),
        conversion.transcript.encoding(),
        convert_time.as_secs_f64()
    );

    for artifact in conversion.artifacts() {
        if !args.wants(artifact.format) {
            continue;
        }
        let path = artifact.write_to_dir(&args.output_dir)?;
        println!("💾 Wrote {} ({} bytes)", path.display(), artifact.len());
        for warning in &artifact.warnings {
            println!("⚠️  {}", warning);
        }
    }

    let stats = TranscriptStats::from_transcript(&conversion.transcript);
    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done!");
    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", stats.message_count);
    println!("   Senders:   {}", stats.sender_count());
    if let (Some(first), Some(last)) = (stats.first_timestamp, stats.last_timestamp) {
        println!(
            "   Period:    {} ~ {}",
            first.format(kakaopack::message::TIMESTAMP_FORMAT),
            last.format(kakaopack::message::TIMESTAMP_FORMAT)
        );
    }
    if let Some((sender, count)) = stats.most_active_sender() {
        println!("   Most active: {} ({} messages)", sender, count);
    }
    if args.only.is_none() {
        println!(
            "   Artifacts: {}, {}",
            conversion.artifact(OutputFormat::Pdf).file_name,
            conversion.artifact(OutputFormat::Xlsx).file_name
        );
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
