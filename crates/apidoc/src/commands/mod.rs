//! CLI command implementations.

pub(crate) mod clean;
pub(crate) mod generate;

pub(crate) use clean::CleanArgs;
pub(crate) use generate::GenerateArgs;
