//! PromptCatalog port - localized stage titles and questions.

use crate::domain::{foundation::Locale, journey::Stage};

/// Lookup of the user-facing text attached to each stage.
///
/// Lookups are synchronous and total: a stage without authored text still
/// yields a usable fallback.
pub trait PromptCatalog: Send + Sync {
    /// Short human-readable stage name.
    fn title(&self, stage: Stage, locale: Locale) -> String;

    /// Question asked (or announcement made) when the stage is entered.
    fn question(&self, stage: Stage, locale: Locale) -> String;

    /// Optional explanatory paragraph shown before an interactive question.
    fn guidance(&self, _stage: Stage, _locale: Locale) -> Option<String> {
        None
    }
}
