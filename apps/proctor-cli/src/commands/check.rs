// check.rs — Dry-run one action against the active policy.
//
// Uses a fresh evaluator, so the daily total reflects this process only.
// Nothing is logged and no token is consumed; `proctor check` answers
// "would this pass?" without leaving a trace in the session history.

use proctor_config::ConfigStore;
use proctor_gateway::ProctorPaths;
use proctor_policy::{ActionRequest, PolicyEvaluator};
use proctor_store::ActionType;

pub fn execute(
    paths: &ProctorPaths,
    action_type: &str,
    target: &str,
    amount: f64,
    description: &str,
) -> anyhow::Result<()> {
    let action_type: ActionType = action_type.parse()?;
    let config = ConfigStore::load(&paths.policy_file, &paths.goals_file);
    let evaluator = PolicyEvaluator::new(config.policy().clone());

    let request = ActionRequest::new(action_type, target)
        .with_amount(amount)
        .with_description(description);
    let check = evaluator.check_action(&request);

    let verdict = if !check.allowed {
        "BLOCK"
    } else if check.requires_confirmation {
        "WARN"
    } else {
        "PASS"
    };
    println!("{}: {}", verdict, check.reason);
    println!("  Rules checked:   {}", check.rules_checked.join(", "));
    println!("  Daily remaining: {:.2}", check.daily_spend_remaining);

    if !check.allowed {
        std::process::exit(1);
    }
    Ok(())
}
