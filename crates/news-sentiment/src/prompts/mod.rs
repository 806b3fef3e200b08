//! Prompt templates for the classifier and the analyzer
//!
//! Templates are organized into:
//! - `system`: system instructions for each LLM stage
//! - `user`: user message templates rendered from pipeline data

pub mod system;
mod user;

pub use user::{importance_prompt, score_prompt};

use crate::error::Result;
use minijinja::Environment;
use serde::Serialize;

/// Render a MiniJinja template string against `vars`
///
/// Strict undefined handling turns a misspelled variable into an error
/// instead of an empty string.
pub(crate) fn render(name: &str, template: &str, vars: impl Serialize) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
    env.add_template(name, template)?;
    Ok(env.get_template(name)?.render(vars)?)
}
