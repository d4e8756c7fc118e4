//! Reduction of a batch of import failures into one user-facing report
//!
//! A batch that fails on many files produces a single title/message pair
//! listing them, rather than one alert per file.

use crate::{ImportError, ImportKind, Location};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Title and message for the alert shown after a failed batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedReport {
    pub title: String,
    pub message: String,
}

impl fmt::Display for AggregatedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.title, self.message)
    }
}

fn batch_title(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Games => "Error Importing Games",
        ImportKind::ControllerSkins => "Error Importing Controller Skins",
    }
}

fn file_list_preface(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Games => "Could not import the following game files:",
        ImportKind::ControllerSkins => "Could not import the following controller skin files:",
    }
}

fn try_again_message(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Games => "Delta could not import games. Please try again later.",
        ImportKind::ControllerSkins => {
            "Delta could not import controller skins. Please try again later."
        }
    }
}

/// Build the report for a batch of failures
///
/// `errors` must not be empty. The output depends only on the contents of
/// the set: each distinct location is listed once, by display name, in
/// ascending order.
pub fn summarize(kind: ImportKind, errors: &HashSet<ImportError>) -> AggregatedReport {
    debug_assert!(!errors.is_empty(), "summarize called without any errors");

    let locations: HashSet<&Location> = errors.iter().flat_map(ImportError::locations).collect();

    if let (1, 1) = (errors.len(), locations.len()) {
        if let (Some(error), Some(location)) = (errors.iter().next(), locations.iter().next()) {
            return AggregatedReport {
                title: format!("Could not import \"{}\".", location.display_name()),
                message: error.to_string(),
            };
        }
    }

    let message = if locations.is_empty() {
        // Nothing to point at, e.g. the library failed to save after all inputs passed
        try_again_message(kind).to_string()
    } else {
        // One line per location, even when two share a display name
        let mut names: Vec<&str> = locations.iter().map(|l| l.display_name()).collect();
        names.sort_unstable();

        let mut message = String::from(file_list_preface(kind));
        message.push('\n');
        for name in names {
            message.push('\n');
            message.push_str(name);
        }
        message
    };

    AggregatedReport {
        title: batch_title(kind).to_string(),
        message,
    }
}
