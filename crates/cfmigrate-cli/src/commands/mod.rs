pub mod detect;
pub mod migrate;
pub mod styles;
pub mod utils;
pub mod versions;
