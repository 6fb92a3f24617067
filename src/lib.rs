//! Link-in-bio profile site generator.
//!
//! Reads a single YAML profile description, fills the placeholder tokens of
//! a fixed site template with values derived from it, builds the template's
//! stylesheet and script, and publishes the result as one output directory.
//!
//! Data flows strictly forward through the stages:
//!
//! - **[`config`]**: parse and validate `config.yml`
//! - **[`effects`]** / **[`resources`]**: resolve effect tags, confirm resource files
//! - **[`render`]**: derive markup and style values
//! - **[`template`]**: substitute tokens into the template documents
//! - **[`site`]**: fetch the template, build assets, publish the output
//! - **[`commands`]**: the pipeline driving all of the above
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod effects;
pub mod error;
pub mod exec;
pub mod logging;
pub mod render;
pub mod resources;
pub mod site;
pub mod template;
