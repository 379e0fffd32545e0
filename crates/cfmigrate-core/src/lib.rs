pub mod catalog;
pub mod codec;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod record;
pub mod schema;
pub mod version;

// Re-export common types
pub use catalog::SchemaCatalog;
pub use codec::StyleCodec;
pub use diagnostic::{Diagnostic, DiagnosticClass, DiagnosticLog, Direction, Severity, Transition};
pub use error::{MigrationError, Result};
pub use record::{FieldValue, Item, Record};
pub use schema::{AttrSpec, EnumSpec, FieldKind, Schema};
pub use version::Version;
