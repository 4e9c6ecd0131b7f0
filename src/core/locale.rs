//! Locale resolution for localizable fields
//!
//! Titles and abstracts may carry a second-language variant. The primary
//! value is always written with the journal locale; the variant is written
//! only when it has text and the record names its locale.

use crate::domain::Localized;

/// Outcome of resolving one localizable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolution {
    /// Elements to emit, primary first
    pub values: Vec<Localized>,
    /// Secondary text was present but no secondary locale was given
    pub inconsistent: bool,
}

/// Resolves primary/secondary variants against the journal locale
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    primary: String,
}

impl LocaleResolver {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Wraps a value in the primary locale
    pub fn localize(&self, text: &str) -> Localized {
        Localized::new(self.primary.as_str(), text.trim())
    }

    /// Resolves one field: the primary element, plus the secondary one when
    /// `secondary_text` is non-blank and `secondary_locale` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::core::locale::LocaleResolver;
    ///
    /// let resolver = LocaleResolver::new("en");
    /// let resolved = resolver.resolve("Title", "Titre", "fr_CA");
    /// assert_eq!(resolved.values.len(), 2);
    ///
    /// let resolved = resolver.resolve("Title", "   ", "fr_CA");
    /// assert_eq!(resolved.values.len(), 1);
    /// ```
    pub fn resolve(
        &self,
        primary_text: &str,
        secondary_text: &str,
        secondary_locale: &str,
    ) -> LocaleResolution {
        let mut values = vec![self.localize(primary_text)];
        let secondary_text = secondary_text.trim();
        let secondary_locale = secondary_locale.trim();

        if secondary_text.is_empty() {
            return LocaleResolution {
                values,
                inconsistent: false,
            };
        }

        if secondary_locale.is_empty() {
            return LocaleResolution {
                values,
                inconsistent: true,
            };
        }

        values.push(Localized::new(secondary_locale, secondary_text));
        LocaleResolution {
            values,
            inconsistent: false,
        }
    }
}
