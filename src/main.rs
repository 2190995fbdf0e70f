// main.rs - CLI entry point

use asdist::cli::{from_env, Config};
use asdist::logging::RunLogger;
use asdist::prelude::*;
use log::LevelFilter;
use std::time::Instant;

fn main() {
    match run_main() {
        Ok(()) => {}
        Err(e) if e.is_usage() => {
            eprintln!("⚠️  {}", e);
            eprintln!("💡 Run with --help to list the available options");
        }
        Err(e) => {
            eprintln!("❌ ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_main() -> Result<()> {
    let Some(mut args) = from_env::<Args>()? else {
        return Ok(());
    };
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let settings = validate_args(&args)?;
    let paths = settings.output_paths();
    let progress = RunLogger::init(Some(&paths.log), LevelFilter::Info)?;

    println!("🚀 {}", asdist::get_info());
    println!(
        "📂 Input: {} ({})",
        settings.input.display(),
        settings.layout.description()
    );
    println!(
        "🧬 Decoder: {} ({} alleles + missing)",
        settings.decoder.name(),
        settings.decoder.alphabet().len()
    );
    println!(
        "🪟 Window {} of size {} over {} SNPs, {} individuals",
        settings.window.window_index,
        settings.window.window_size,
        settings.window.total_snps,
        settings.total_individuals
    );
    if let Some(shuffled) = &settings.shuffled_file {
        println!("🔀 Locus order: {}", shuffled.display());
    }
    log::info!("{}", command_line);

    let total_start = Instant::now();
    match run_window(&settings, &progress)? {
        RunOutcome::AlreadyDone => {
            println!("📌 Window already computed: {}", paths.distances.display());
        }
        RunOutcome::NoWindow => {
            println!("📌 Window index is past the last SNP, no output written");
        }
        RunOutcome::Completed {
            loci,
            incomplete_pairs,
            frequencies_reused,
        } => {
            if frequencies_reused {
                println!("♻️  Reused frequencies: {}", paths.frequencies.display());
            }
            if incomplete_pairs > 0 {
                println!(
                    "⚠️  {} pairs had missing data, see {}",
                    incomplete_pairs,
                    paths.counts.display()
                );
            }
            println!(
                "✅ Distance matrix over {} loci saved to: {}",
                loci,
                paths.distances.display()
            );
            println!(
                "⏱️  Total time: {:.2}s",
                total_start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}
