// drift.rs — Score an activity summary against the configured goals.

use proctor_config::ConfigStore;
use proctor_drift::assess_summary;
use proctor_gateway::ProctorPaths;

pub fn execute(paths: &ProctorPaths, summary: &str) -> anyhow::Result<()> {
    let config = ConfigStore::load(&paths.policy_file, &paths.goals_file);
    let assessment = assess_summary(summary, &config.goals().goal_categories);

    println!(
        "Drift: {} (score {:.2})",
        assessment.level, assessment.score
    );
    println!("{}", assessment.explanation);
    if !assessment.aligned_categories.is_empty() {
        println!(
            "Aligned categories: {}",
            assessment.aligned_categories.join(", ")
        );
    }
    if !assessment.unaligned_terms.is_empty() {
        println!(
            "Unaligned terms:    {}",
            assessment.unaligned_terms.join(", ")
        );
    }
    Ok(())
}
