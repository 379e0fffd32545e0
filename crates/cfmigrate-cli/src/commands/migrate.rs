use super::utils::read_input;
use anyhow::{Context, Result};
use cfmigrate_core::{DiagnosticLog, MigrationError, Severity, Version};
use cfmigrate_infrastructure::{MigrationOutcome, build_migration_manager};
use std::fs;
use std::path::PathBuf;

pub struct MigrateRequest {
    pub from: Version,
    pub to: Version,
    /// Preset used when the input does not name one
    pub style: String,
    pub skip_defaults: bool,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

pub fn run(request: &MigrateRequest) -> Result<()> {
    let outcome = execute(request)?;

    match &request.output {
        Some(path) => {
            fs::write(path, &outcome.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} ({} -> {}, based on {})",
                path.display(),
                request.from,
                request.to,
                outcome.style
            );
        }
        None => print!("{}", outcome.text),
    }

    Ok(())
}

/// Migrates the request's input and reports every diagnostic on stderr.
pub fn execute(request: &MigrateRequest) -> Result<MigrationOutcome> {
    let text = read_input(&request.input)?;
    tracing::debug!("Read {} bytes from {}", text.len(), request.input.display());
    let manager = build_migration_manager()?;

    let result = manager.migrate_to(
        request.from,
        request.to,
        &text,
        &request.style,
        request.skip_defaults,
    );

    match result {
        Ok(outcome) => {
            report(&outcome.diagnostics);
            Ok(outcome)
        }
        Err(e) => {
            if let MigrationError::RemovedEnumValueInUse { diagnostics, .. } = &e {
                report(diagnostics);
            }
            Err(e).with_context(|| format!("Failed to migrate {}", request.input.display()))
        }
    }
}

fn report(diagnostics: &DiagnosticLog) {
    for entry in diagnostics.entries() {
        eprintln!("{}", entry);
    }
    let warnings = diagnostics.count(Severity::Warning);
    if warnings > 0 {
        eprintln!("{} warning(s): some settings could not be carried over exactly", warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(dir: &TempDir, text: &str, from: &str, to: &str) -> MigrateRequest {
        let input = dir.path().join(".clang-format");
        fs::write(&input, text).unwrap();
        MigrateRequest {
            from: Version::parse(from).unwrap(),
            to: Version::parse(to).unwrap(),
            style: "llvm".to_string(),
            skip_defaults: true,
            input,
            output: Some(dir.path().join("out.clang-format")),
        }
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir, "BasedOnStyle: Chromium\nColumnLimit: 120\n", "3.6", "3.8");

        run(&request).unwrap();

        let written = fs::read_to_string(dir.path().join("out.clang-format")).unwrap();
        assert!(written.starts_with("---\nLanguage: Cpp\nBasedOnStyle: chromium\n"));
        assert!(written.contains("ColumnLimit: 120\n"));
        assert!(written.ends_with("...\n"));
    }

    #[test]
    fn test_execute_reports_downgrade_losses() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir, "PointerAlignment: Middle\n", "3.5", "3.4");

        let outcome = execute(&request).unwrap();
        assert!(outcome.diagnostics.count(Severity::Warning) >= 1);
        assert!(!outcome.text.contains("PointerAlignment"));
    }

    #[test]
    fn test_execute_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir, "ColumnLimit: [1, 2]\n", "3.5", "3.8");

        let err = execute(&request).unwrap_err();
        let cause = err.downcast_ref::<MigrationError>().unwrap();
        assert!(cause.is_decode_failure());
        assert!(err.to_string().contains(".clang-format"));
    }

    #[test]
    fn test_execute_missing_input() {
        let dir = TempDir::new().unwrap();
        let mut request = request(&dir, "", "3.5", "3.8");
        request.input = dir.path().join("missing");
        assert!(execute(&request).is_err());
    }
}
