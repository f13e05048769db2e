//! Header and footer overrides for the rendered document.
//!
//! Both strings may contain `{username}`, replaced with the user whose stars
//! are listed. Unset fields fall back to the renderer's defaults.

use serde::Deserialize;

/// User-supplied document template.
///
/// # Examples
///
/// ```
/// use starred_config::TemplateConfig;
///
/// let template: TemplateConfig =
///     serde_json::from_str(r##"{"header": "# Stars of {username}"}"##).unwrap();
/// assert_eq!(template.header.as_deref(), Some("# Stars of {username}"));
/// assert!(template.footer.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TemplateConfig {
    /// Text placed before the list.
    #[serde(default)]
    pub header: Option<String>,

    /// Text placed after the list.
    #[serde(default)]
    pub footer: Option<String>,
}
