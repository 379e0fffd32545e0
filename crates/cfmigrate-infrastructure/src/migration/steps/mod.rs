//! Step tables for the built-in catalog, one module per version boundary.
//!
//! Each module is named after the version it produces. Field lists are
//! written out explicitly; [`StepMigrator::validate`] is what keeps them
//! honest against the catalog data.
//!
//! [`StepMigrator::validate`]: super::traits::StepMigration::validate

mod v3_4;
mod v3_5;
mod v3_6;
mod v3_7;
mod v3_8;
mod v3_9;
mod v4_0;
mod v5_0;
mod v6_0;
mod v7_0;
mod v8_0;
mod v9_0;
mod v10_0;
mod v11_0;
mod v12_0;
mod v13_0;
mod v14_0;

use super::step::StepMigrator;

/// All built-in steps, oldest first.
pub fn builtin_steps() -> Vec<StepMigrator> {
    vec![
        v3_4::step(),
        v3_5::step(),
        v3_6::step(),
        v3_7::step(),
        v3_8::step(),
        v3_9::step(),
        v4_0::step(),
        v5_0::step(),
        v6_0::step(),
        v7_0::step(),
        v8_0::step(),
        v9_0::step(),
        v10_0::step(),
        v11_0::step(),
        v12_0::step(),
        v13_0::step(),
        v14_0::step(),
    ]
}
