//! Admin settings page: sections, fields and their HTML renderers

use std::fmt;
use std::sync::Arc;

use super::registry::SettingsRegistry;
use super::store::SettingsStore;
use super::{MEDIA_PAGE, MIN_HEIGHT_KEY, MIN_WIDTH_KEY};
use crate::error::SettingsError;
use crate::messages::MessageCatalog;

/// Produces the input control for one field.
pub type FieldRenderer = Arc<dyn Fn(&SettingsRegistry, &dyn SettingsStore) -> String + Send + Sync>;

pub const RESTRICTIONS_SECTION: &str = "image_upload_restrictions";

#[derive(Clone)]
pub struct SettingsField {
    pub id: String,
    pub label: String,
    render: FieldRenderer,
}

impl fmt::Debug for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsField")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct SettingsSection {
    pub id: String,
    pub title: String,
    pub fields: Vec<SettingsField>,
}

/// One admin settings page holding ordered sections.
#[derive(Debug, Clone)]
pub struct SettingsPage {
    pub slug: String,
    sections: Vec<SettingsSection>,
}

impl SettingsPage {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            sections: Vec::new(),
        }
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    pub fn add_section(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.sections.push(SettingsSection {
            id: id.into(),
            title: title.into(),
            fields: Vec::new(),
        });
    }

    pub fn add_field(
        &mut self,
        section_id: &str,
        id: impl Into<String>,
        label: impl Into<String>,
        render: FieldRenderer,
    ) -> Result<(), SettingsError> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| SettingsError::UnknownSection(section_id.to_string()))?;

        section.fields.push(SettingsField {
            id: id.into(),
            label: label.into(),
            render,
        });
        Ok(())
    }

    /// Render every section with its fields pre-filled from the store.
    pub fn render(&self, registry: &SettingsRegistry, store: &dyn SettingsStore) -> String {
        let mut html = String::new();
        for section in &self.sections {
            html.push_str(&format!("<h2>{}</h2>\n", escape_attr(&section.title)));
            html.push_str("<table class=\"form-table\" role=\"presentation\">\n");
            for field in &section.fields {
                html.push_str(&format!(
                    "<tr><th scope=\"row\"><label for=\"{}\">{}</label></th><td>{}</td></tr>\n",
                    escape_attr(&field.id),
                    escape_attr(&field.label),
                    (field.render)(registry, store)
                ));
            }
            html.push_str("</table>\n");
        }
        html
    }
}

/// Numeric input pre-filled with `value`.
pub fn render_number_input(name: &str, value: u32) -> String {
    let name = escape_attr(name);
    format!(
        "<input type=\"number\" name=\"{name}\" id=\"{name}\" value=\"{}\" min=\"1\" />",
        value
    )
}

/// Escape text for use inside an HTML attribute or element body.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn threshold_field(key: &'static str) -> FieldRenderer {
    Arc::new(move |registry: &SettingsRegistry, store: &dyn SettingsStore| {
        render_number_input(key, registry.value_or(store, key, 0))
    })
}

/// Build the media page with the "Image Upload Restrictions" section and its
/// two fields.
///
/// Expects the threshold settings to be registered so the inputs show the
/// configured defaults when nothing has been saved yet.
pub fn register_media_settings(catalog: &MessageCatalog) -> Result<SettingsPage, SettingsError> {
    let mut page = SettingsPage::new(MEDIA_PAGE);
    page.add_section(RESTRICTIONS_SECTION, catalog.section_title());
    page.add_field(
        RESTRICTIONS_SECTION,
        MIN_WIDTH_KEY,
        catalog.min_width_label(),
        threshold_field(MIN_WIDTH_KEY),
    )?;
    page.add_field(
        RESTRICTIONS_SECTION,
        MIN_HEIGHT_KEY,
        catalog.min_height_label(),
        threshold_field(MIN_HEIGHT_KEY),
    )?;
    Ok(page)
}
