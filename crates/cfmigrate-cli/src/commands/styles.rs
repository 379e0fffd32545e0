use anyhow::Result;
use cfmigrate_core::{SchemaCatalog, Version};
use cfmigrate_infrastructure::build_migration_manager;

pub fn run(from: Option<Version>, to: Option<Version>) -> Result<()> {
    for line in list(from, to)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per preset, or one line per version when no version is given.
pub fn list(from: Option<Version>, to: Option<Version>) -> Result<Vec<String>> {
    let manager = build_migration_manager()?;

    let lines: Vec<String> = match (from, to) {
        (Some(from), Some(to)) => manager
            .style_names_range(from, to)?
            .into_iter()
            .map(str::to_string)
            .collect(),
        (Some(version), None) | (None, Some(version)) => manager.style_names(version)?.to_vec(),
        (None, None) => manager
            .versions()
            .iter()
            .map(|version| {
                let names = manager.catalog().accepted_preset_names(*version);
                format!("{}: {}", version, names.join(", "))
            })
            .collect(),
    };
    Ok(lines)
}
