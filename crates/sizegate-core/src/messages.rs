//! User-facing strings
//!
//! Rejection messages are built from per-locale templates with
//! `{min_width}`, `{min_height}` and `{settings_link}` placeholders, so the
//! configured thresholds always appear literally in the text.

use std::str::FromStr;

use crate::error::LocaleError;
use crate::models::Thresholds;
use crate::settings::escape_attr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region-qualified tags like "fr_FR" or "en-GB"
        let language = s
            .trim()
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match language.as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

struct Strings {
    too_small: &'static str,
    settings_link_text: &'static str,
    settings_dashboard_hint: &'static str,
    probe_failed: &'static str,
    section_title: &'static str,
    min_width_label: &'static str,
    min_height_label: &'static str,
}

const EN: Strings = Strings {
    too_small: "Image dimensions are too small. Minimum size is {min_width} x {min_height} pixels. Please adjust the criteria in {settings_link}.",
    settings_link_text: "Media Settings",
    settings_dashboard_hint: "Settings > Media in the dashboard",
    probe_failed: "The uploaded image could not be read, so its dimensions could not be verified.",
    section_title: "Image Upload Restrictions",
    min_width_label: "Minimum Image Width (px)",
    min_height_label: "Minimum Image Height (px)",
};

const FR: Strings = Strings {
    too_small: "Les dimensions de l'image sont trop petites. La taille minimale est de {min_width} x {min_height} pixels. Vous pouvez ajuster ces critères dans {settings_link}.",
    settings_link_text: "Réglages des médias",
    settings_dashboard_hint: "Réglages > Médias dans le tableau de bord",
    probe_failed: "L'image envoyée n'a pas pu être lue, ses dimensions n'ont donc pas pu être vérifiées.",
    section_title: "Restrictions d'envoi d'images",
    min_width_label: "Largeur minimale de l'image (px)",
    min_height_label: "Hauteur minimale de l'image (px)",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn strings(&self) -> &'static Strings {
        match self.locale {
            Locale::En => &EN,
            Locale::Fr => &FR,
        }
    }

    /// Rejection message for an image below `thresholds`.
    ///
    /// With a settings URL the message links to the settings page, otherwise
    /// it names the dashboard location.
    pub fn dimensions_too_small(&self, thresholds: &Thresholds, settings_url: Option<&str>) -> String {
        let strings = self.strings();
        let settings_link = match settings_url {
            Some(url) => format!(
                "<a href=\"{}\">{}</a>",
                escape_attr(url),
                strings.settings_link_text
            ),
            None => strings.settings_dashboard_hint.to_string(),
        };

        strings
            .too_small
            .replace("{min_width}", &thresholds.min_width.to_string())
            .replace("{min_height}", &thresholds.min_height.to_string())
            .replace("{settings_link}", &settings_link)
    }

    pub fn probe_failed(&self) -> &'static str {
        self.strings().probe_failed
    }

    pub fn section_title(&self) -> &'static str {
        self.strings().section_title
    }

    pub fn min_width_label(&self) -> &'static str {
        self.strings().min_width_label
    }

    pub fn min_height_label(&self) -> &'static str {
        self.strings().min_height_label
    }
}
