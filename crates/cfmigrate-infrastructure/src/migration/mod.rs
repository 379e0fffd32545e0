//! Style configuration migration engine.
//!
//! This module carries a style record between any two catalog versions by
//! walking a linear chain of table-driven steps. The engine ensures that:
//!
//! - Every hop goes through all intermediate versions (no skipping)
//! - Every step accounts for every field of its two versions
//! - Each hop is seeded from a preset the target version accepts
//! - Lossy or inferred changes are explained in the diagnostic log
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MigrationManager                          │
//! │  (decode → migrate → encode, compatibility detection)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  - SchemaCatalog   (fields and presets per version)          │
//! │  - StyleCodec      (text ⇄ record)                           │
//! │  - MigrationChain  (3.3 ⇄ 3.4 ⇄ ... ⇄ 14.0)                  │
//! └─────────────────────────────────────────────────────────────┘
//!          │                         │
//!          V                         V
//!    StyleResolver             StepMigrator
//!    (preset per hop)          (one per boundary)
//!                                    │
//!                                    V
//!                              FieldTransform
//!                              (CopySame, Rename, EnumRemap, ...)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use cfmigrate_infrastructure::migration;
//!
//! let manager = migration::build_migration_manager()?;
//! let outcome = manager.migrate_to(
//!     Version::parse("3.4")?,
//!     Version::parse("3.8")?,
//!     &text,
//!     "llvm",
//!     false,
//! )?;
//! for entry in outcome.diagnostics.entries() {
//!     eprintln!("{}", entry);
//! }
//! ```
//!
//! # Adding a Version
//!
//! 1. **Add the catalog document** (`catalog/data/vX_Y.toml`) and list it in
//!    the built-in documents.
//! 2. **Write the step table** (`steps/vX_Y.rs`): CopySame for unchanged
//!    fields, then renames, remaps, composite rules and new fields.
//! 3. **Register it** in `steps::builtin_steps()`.
//!
//! `test_every_builtin_step_validates` reports any field the new table
//! misses.

mod chain;
mod compat;
mod manager;
mod resolver;
mod step;
mod steps;
mod traits;
mod transform;

// Public API
pub use chain::{MigrationChain, canonicalize};
pub use compat::CompatibilityDetector;
pub use manager::{MigrationManager, MigrationManagerBuilder, MigrationOutcome};
pub use resolver::StyleResolver;
pub use step::StepMigrator;
pub use steps::builtin_steps;
pub use traits::{Migration, StepMigration};
pub use transform::{CompositeFn, CompositeRule, FieldTransform, RemovedValue, StepContext, TagMapping};

use crate::catalog::builtin_catalog;
use crate::codec::ClangFormatYamlCodec;
use cfmigrate_core::Result;
use std::sync::Arc;

/// Builds a `MigrationManager` over the built-in catalog and steps.
///
/// This is the primary entry point. The catalog is parsed on first use and
/// shared by every manager built afterwards.
///
/// # Errors
///
/// Returns an error if:
/// - The built-in catalog data is malformed
/// - A built-in step does not cover its two versions
pub fn build_migration_manager() -> Result<MigrationManager> {
    let catalog = builtin_catalog()?;

    let mut chain = MigrationChain::new();
    for step in builtin_steps() {
        chain.register(Arc::new(step));
    }

    MigrationManager::builder()
        .with_codec(Arc::new(ClangFormatYamlCodec::new(catalog.clone())))
        .with_catalog(catalog)
        .with_chain(chain)
        .build()
}
