//! Decides whether a remote configuration document meaningfully differs from
//! the declared one.
//!
//! Jenkins round-trips configuration through its own serializer, which
//! reformats whitespace and may re-encode entities; naive comparison would
//! report permanent drift. Normalization here is deliberately textual and
//! order-sensitive: two documents with identical content but reordered
//! elements count as different, so declared templates must preserve element
//! order.

use regex::Regex;
use tracing::debug;

use crate::error::Error;
use crate::template::{render_template, TemplateContext};

/// Returns true when the remote document already matches the declared
/// template (rendered against `ctx`) and the update write can be skipped.
pub fn in_sync(remote: &str, declared: &str, ctx: &TemplateContext) -> Result<bool, Error> {
    let declared = render_template(declared, ctx)?;

    let old = normalize(remote);
    let new = normalize(&declared);
    debug!(old = %old, new = %new, "comparing normalized configuration");
    Ok(old == new)
}

/// Strips the XML declaration prologue and all literal whitespace, then
/// decodes entity escapes so `&apos;` and `'` compare equal.
fn normalize(doc: &str) -> String {
    let re = Regex::new(r"<\?xml.+\?>").unwrap();
    let doc = re.replace_all(doc, "");
    let doc: String = doc.chars().filter(|c| !c.is_whitespace()).collect();
    match quick_xml::escape::unescape(&doc) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => doc,
    }
}
