/// Page-side dark mode effect
///
/// The effect is a `<style>` element carrying a CSS filter. Its target state
/// always comes from the stored preference: whether the element is already
/// present only decides whether anything needs doing.
use crate::error::{ExtensionError, Result};
use crate::storage::PreferenceStore;
use web_sys::{Document, Element};

pub const STYLE_ID: &str = "dynamic-soft-dark-mode-by-filter";

const DARK_MODE_CSS: &str = "
html {
  -webkit-filter: invert(92%) hue-rotate(180deg) brightness(95%) contrast(90%);
  filter: invert(92%) hue-rotate(180deg) brightness(95%) contrast(90%);
  background: #fff;
}
img, video, iframe, picture {
  -webkit-filter: invert(100%) hue-rotate(180deg);
  filter: invert(100%) hue-rotate(180deg);
}
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectChange {
    Inserted,
    Removed,
    Unchanged,
}

/// What to do given the stored preference and whether the style is present
pub fn plan_effect(enabled: bool, present: bool) -> EffectChange {
    match (enabled, present) {
        (true, false) => EffectChange::Inserted,
        (false, true) => EffectChange::Removed,
        _ => EffectChange::Unchanged,
    }
}

/// Bring the document in line with `enabled`; safe to run any number of times
pub fn apply_effect(document: &Document, enabled: bool) -> Result<EffectChange> {
    let existing = document.get_element_by_id(STYLE_ID);
    let change = plan_effect(enabled, existing.is_some());

    match change {
        EffectChange::Inserted => {
            let style = document
                .create_element("style")
                .map_err(|e| ExtensionError::Bridge(format!("{:?}", e)))?;
            style.set_id(STYLE_ID);
            style.set_text_content(Some(DARK_MODE_CSS));

            // At document_start there may be no <head> yet
            let parent: Element = match document.head() {
                Some(head) => head.into(),
                None => document
                    .document_element()
                    .ok_or_else(|| ExtensionError::Bridge("document has no root element".to_string()))?,
            };
            parent
                .append_child(&style)
                .map_err(|e| ExtensionError::Bridge(format!("{:?}", e)))?;
        }
        EffectChange::Removed => {
            if let Some(style) = existing {
                style.remove();
            }
        }
        EffectChange::Unchanged => {}
    }

    Ok(change)
}

/// Apply the stored preference for `hostname` to the document
///
/// Pages without a hostname (about:blank, file://) are left alone.
pub async fn apply_for_hostname<S: PreferenceStore>(
    store: &S,
    document: &Document,
    hostname: &str,
) -> Result<EffectChange> {
    if hostname.is_empty() {
        return Ok(EffectChange::Unchanged);
    }

    let enabled = store.get(hostname).await?;
    let change = apply_effect(document, enabled)?;
    log::debug!("Dark mode on {}: {:?}", hostname, change);
    Ok(change)
}
