use std::collections::HashMap;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use tracing::debug;

use crate::error::Error;

/// The data a declared configuration template can reference: the resource
/// name and the caller-supplied parameters map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateContext {
    pub name: String,
    pub parameters: HashMap<String, String>,
}

/// Renders the given configuration template against the context. When the
/// context carries no parameters the literal text is passed through
/// untouched, unbound template variables included.
///
/// An unresolvable reference or a parse error is a hard error; callers must
/// never write a half-rendered document to the remote.
pub fn render_template(data: &str, ctx: &TemplateContext) -> Result<String, Error> {
    if ctx.parameters.is_empty() {
        debug!("skipping template render, no parameters declared");
        return Ok(data.to_owned());
    }

    debug!(template = %data, "binding configuration template");
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    let xml = env.render_str(data, ctx)?;
    debug!(rendered = %xml, "bound configuration template");
    Ok(xml)
}
