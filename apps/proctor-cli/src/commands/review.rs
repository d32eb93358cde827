// review.rs — Score a session and print its scorecard.

use proctor_config::ConfigStore;
use proctor_gateway::ProctorPaths;
use proctor_review::{score_session, InsightsLog, ReviewStore};
use proctor_store::ActionLog;

pub fn execute(paths: &ProctorPaths, session: Option<&str>) -> anyhow::Result<()> {
    if !paths.actions_log.exists() {
        println!("No action log found at {}", paths.actions_log.display());
        return Ok(());
    }

    let log = ActionLog::open(&paths.actions_log)?;
    let session_id = match session {
        Some(id) => id.to_string(),
        None => match log.latest_session_id()? {
            Some(id) => id,
            None => {
                println!("No actions logged yet.");
                return Ok(());
            }
        },
    };

    let config = ConfigStore::load(&paths.policy_file, &paths.goals_file);
    let history = log.session_history(&session_id)?;
    let review = score_session(&session_id, &history, config.goals());

    let saved = ReviewStore::new(&paths.reviews_dir).save(&review)?;
    InsightsLog::new(&paths.insights_file).append_review(&review);

    println!("Session: {}", review.session_id);
    println!(
        "Grade:   {} ({}/100)",
        review.overall_grade, review.overall_score
    );
    println!();
    println!("  Goal alignment:       {:>3}", review.scores.goal_alignment);
    println!(
        "  Security compliance:  {:>3}",
        review.scores.security_compliance
    );
    println!(
        "  Constraint adherence: {:>3}",
        review.scores.constraint_adherence
    );
    println!();
    println!(
        "  {} action(s): {} passed, {} warned, {} blocked, {} without a valid token",
        review.action_summary.total,
        review.action_summary.passed,
        review.action_summary.warned,
        review.action_summary.blocked,
        review.action_summary.credential_failures,
    );

    if !review.insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &review.insights {
            println!("  - {}", insight);
        }
    }

    println!();
    println!("Saved to {}", saved.display());

    Ok(())
}
