use anyhow::Context;
use mlptopo::config::ConfigManager;
use mlptopo::engines::generation::ConsoleProgressCallback;
use mlptopo::report::best_solution_line;
use mlptopo::runner::run_search;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    manager
        .load_layered(Some(&ConfigManager::default_config_path()))
        .context("Failed to load configuration")?;
    let config = manager.get();

    let run = run_search(&config, &mut ConsoleProgressCallback).context("Topology search failed")?;

    let (chromosome, accuracy) = run
        .outcome
        .best_overall()
        .context("Search produced no evaluated individual")?;

    println!("{}", best_solution_line(&chromosome, accuracy));

    for entry in &run.report.hall_of_fame {
        println!(
            "  #{} hidden_layer_sizes={} accuracy = {:.4} ({:.2}% of hall of fame)",
            entry.rank, entry.topology, entry.accuracy, entry.share_pct
        );
    }

    Ok(())
}
