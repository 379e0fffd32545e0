use anyhow::Result;
use cfmigrate_core::SchemaCatalog;
use cfmigrate_infrastructure::builtin_catalog;

pub fn run() -> Result<()> {
    for line in list()? {
        println!("{}", line);
    }
    Ok(())
}

pub fn list() -> Result<Vec<String>> {
    let catalog = builtin_catalog()?;
    let lines = catalog
        .versions()
        .iter()
        .map(|version| {
            let release = catalog
                .release(*version)
                .map(|r| r.to_string())
                .unwrap_or_default();
            let textual = catalog
                .schema(*version)
                .is_some_and(|schema| schema.is_serializable());
            if textual {
                format!("{} ({}, {})", version, version.label(), release)
            } else {
                format!(
                    "{} ({}, {}, predefined styles only)",
                    version,
                    version.label(),
                    release
                )
            }
        })
        .collect();
    Ok(lines)
}
