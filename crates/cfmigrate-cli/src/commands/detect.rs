use super::utils::read_input;
use anyhow::Result;
use cfmigrate_core::Version;
use cfmigrate_infrastructure::build_migration_manager;
use std::path::Path;

pub fn run(input: &Path) -> Result<()> {
    let versions = detect(input)?;
    if versions.is_empty() {
        anyhow::bail!("No known version accepts {}", input.display());
    }
    for version in versions {
        println!("{}", version);
    }
    Ok(())
}

pub fn detect(input: &Path) -> Result<Vec<Version>> {
    let text = read_input(input)?;
    let manager = build_migration_manager()?;
    Ok(manager.compatible_versions(&text))
}
