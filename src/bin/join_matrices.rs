// join_matrices.rs - Combine randomly sampled window matrices

use asdist::cli::{from_env, JoinArgs};
use asdist::core::join_random_windows;
use asdist::logging::RunLogger;
use asdist::output::write_distances;
use asdist::{AsdistError, Result};
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
    let Some(args) = from_env::<JoinArgs>()? else {
        return Ok(());
    };
    let settings = args.validate()?;
    let _progress = RunLogger::init(None, LevelFilter::Info)?;

    println!("🚀 join_matrices ({})", asdist::get_info());
    println!(
        "🎲 Sampling {} of windows {}..{} (size {})",
        settings.windows, settings.first_window, settings.last_window, settings.window_size
    );
    if let Some(seed) = settings.seed {
        println!("🌱 Seed: {}", seed);
    }

    let start = Instant::now();
    let joined = join_random_windows(
        &settings.distances_folder,
        settings.window_size,
        settings.windows,
        settings.first_window,
        settings.last_window,
        settings.total_individuals,
        settings.seed,
    )?;
    let matrix = joined.normalized().ok_or_else(|| {
        AsdistError::persisted(&settings.distances_folder, "the sampled windows hold no loci")
    })?;
    write_distances(&settings.output, &matrix)?;

    println!(
        "✅ Joined {} windows ({} loci) into: {}",
        joined.windows.len(),
        joined.total_loci,
        settings.output.display()
    );
    println!("⏱️  Total time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
