// history.rs — Show recent logged actions.

use proctor_gateway::ProctorPaths;
use proctor_store::ActionLog;

pub fn execute(paths: &ProctorPaths, session: Option<&str>, limit: usize) -> anyhow::Result<()> {
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

    let records = log.session_history(&session_id)?;
    let start = records.len().saturating_sub(limit);
    let recent = &records[start..];

    if recent.is_empty() {
        println!("No actions for session {}.", session_id);
        return Ok(());
    }

    println!("Session {}", session_id);
    println!(
        "{:<20} {:<16} {:<8} {:<8} TARGET",
        "TIMESTAMP", "ACTION", "VERDICT", "TOKEN"
    );
    println!("{}", "-".repeat(80));

    for record in recent {
        println!(
            "{:<20} {:<16} {:<8} {:<8} {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.action_type.to_string(),
            record.verdict.to_string(),
            if record.credential_was_valid {
                "valid"
            } else {
                "invalid"
            },
            truncate(&record.target, 30),
        );
    }
    println!("\n{} action(s) shown.", recent.len());

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Find the last char boundary at or before max - 3 to leave room for "...".
    let end = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max.saturating_sub(3))
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..end])
}
