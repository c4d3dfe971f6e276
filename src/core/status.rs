//! Status translation
//!
//! Credit tables label statuses in the language of the exporting system.
//! The translator maps those labels onto [`CreditStatus`].

use crate::types::CreditStatus;
use serde::Deserialize;
use std::collections::HashMap;

/// Built-in labels (Russian export, Uzbek translation, English)
const BUILTIN_LABELS: &[(&str, CreditStatus)] = &[
    ("выдано", CreditStatus::Issued),
    ("выдан", CreditStatus::Issued),
    ("berilgan", CreditStatus::Issued),
    ("issued", CreditStatus::Issued),
    ("закрыта", CreditStatus::Closed),
    ("закрыто", CreditStatus::Closed),
    ("yopilgan", CreditStatus::Closed),
    ("closed", CreditStatus::Closed),
    ("отменена", CreditStatus::Cancelled),
    ("отменено", CreditStatus::Cancelled),
    ("bekor qilingan", CreditStatus::Cancelled),
    ("cancelled", CreditStatus::Cancelled),
    ("canceled", CreditStatus::Cancelled),
];

/// What to do with records whose status label is not recognized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownStatusPolicy {
    /// Exclude them from every aggregate
    #[default]
    Drop,

    /// Count them in the `unknown` status tally, and nowhere else
    Count,
}

/// Maps raw status labels to canonical statuses
#[derive(Debug, Clone)]
pub struct StatusTranslator {
    labels: HashMap<String, CreditStatus>,
}

impl Default for StatusTranslator {
    fn default() -> Self {
        StatusTranslator {
            labels: BUILTIN_LABELS
                .iter()
                .map(|(label, status)| (label.to_string(), *status))
                .collect(),
        }
    }
}

impl StatusTranslator {
    /// Translator with the built-in labels plus `aliases`
    ///
    /// Aliases are matched case-insensitively and override built-in labels.
    pub fn with_aliases<'a, I>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a CreditStatus)>,
    {
        let mut translator = Self::default();
        for (label, status) in aliases {
            translator.labels.insert(normalize(label), *status);
        }
        translator
    }

    /// Translate a raw label
    ///
    /// Matching ignores case, surrounding whitespace, and repeated inner
    /// whitespace. Unrecognized labels yield `CreditStatus::Unknown`.
    pub fn translate(&self, raw: &str) -> CreditStatus {
        self.labels
            .get(&normalize(raw))
            .copied()
            .unwrap_or(CreditStatus::Unknown)
    }
}

fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
