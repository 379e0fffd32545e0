pub mod catalog;
pub mod codec;
pub mod migration;

pub use crate::catalog::{TomlCatalog, builtin_catalog};
pub use crate::codec::ClangFormatYamlCodec;
pub use crate::migration::{MigrationManager, MigrationOutcome, build_migration_manager};
