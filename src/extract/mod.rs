pub mod gallery;
pub mod powers;

use crate::config::ExtractorConfig;
use crate::error::ConfigError;
use crate::parsers::{self, Outline};
use crate::results::{CharacterRecord, GalleryRecord};
use crate::utils::name_from_url;
use gallery::FieldMatcher;
use regex::Regex;

/// Turns the rendered text of a character page into a [`CharacterRecord`]
///
/// The text is first segmented into heading sections, then the power list
/// and the info-box fields are read from their sections. Missing sections
/// produce empty values; extraction itself never fails.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    power_re: Regex,
    fields: Vec<FieldMatcher>,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ConfigError> {
        let power_re = Regex::new(&config.power_pattern).map_err(|source| ConfigError::Pattern {
            pattern: config.power_pattern.clone(),
            source,
        })?;

        let fields = config
            .gallery_fields
            .iter()
            .map(|name| {
                FieldMatcher::new(name, &config.field_label_prefix).map_err(|source| {
                    ConfigError::Pattern {
                        pattern: name.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            power_re,
            fields,
        })
    }

    /// Gallery field names in column order
    pub fn field_names(&self) -> &[String] {
        &self.config.gallery_fields
    }

    /// Extract the full record for the page at `url`
    pub fn extract(&self, url: &str, text: &str) -> CharacterRecord {
        let outline = parsers::segment(text);

        CharacterRecord {
            url: url.to_string(),
            name: name_from_url(url),
            powers: self.powers_in(&outline),
            gallery: self.gallery_in(&outline),
        }
    }

    /// Power list of a rendered page
    pub fn powers(&self, text: &str) -> Vec<String> {
        self.powers_in(&parsers::segment(text))
    }

    /// Info-box fields of a rendered page
    pub fn gallery(&self, text: &str) -> GalleryRecord {
        self.gallery_in(&parsers::segment(text))
    }

    fn powers_in(&self, outline: &Outline) -> Vec<String> {
        powers::extract_powers(outline, &self.config, &self.power_re)
    }

    fn gallery_in(&self, outline: &Outline) -> GalleryRecord {
        let region = gallery::gallery_region(
            outline,
            &self.config.gallery_start,
            &self.config.gallery_end_heading,
        );

        GalleryRecord::new(
            self.fields
                .iter()
                .map(|field| {
                    let value = field.value(region, &self.config.field_terminator);
                    (field.name.clone(), value)
                })
                .collect(),
        )
    }
}
