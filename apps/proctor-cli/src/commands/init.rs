// init.rs — Create the .proctor/ state directory.

use proctor_config::write_default_files;
use proctor_credential::load_or_create;
use proctor_gateway::ProctorPaths;
use proctor_store::ActionLog;

pub fn execute(paths: &ProctorPaths) -> anyhow::Result<()> {
    paths.ensure_dirs()?;

    let created = write_default_files(&paths.policy_file, &paths.goals_file)?;
    load_or_create(&paths.secret_file)?;
    ActionLog::create(&paths.actions_log)?;

    println!("Initialized Proctor state at {}", paths.state_dir.display());
    for path in &created {
        println!("  wrote {}", path.display());
    }
    if created.is_empty() {
        println!("  config files already present, left unchanged");
    }
    println!();
    println!("Edit {} to set limits and rules,", paths.policy_file.display());
    println!("and {} to describe the goals.", paths.goals_file.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_the_full_state_layout() {
        let dir = TempDir::new().unwrap();
        let paths = ProctorPaths::for_root(dir.path());
        execute(&paths).unwrap();

        assert!(paths.policy_file.is_file());
        assert!(paths.goals_file.is_file());
        assert!(paths.secret_file.is_file());
        assert!(paths.actions_log.is_file());
        assert!(paths.reviews_dir.is_dir());
    }

    #[test]
    fn init_twice_leaves_existing_configs_alone() {
        let dir = TempDir::new().unwrap();
        let paths = ProctorPaths::for_root(dir.path());
        execute(&paths).unwrap();
        std::fs::write(&paths.policy_file, "spending:\n  per_action: 5\n").unwrap();

        execute(&paths).unwrap();
        let contents = std::fs::read_to_string(&paths.policy_file).unwrap();
        assert!(contents.contains("per_action: 5"));
    }
}
