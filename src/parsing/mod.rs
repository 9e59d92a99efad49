//! parser for the volcano deformation record format

use std::path::Path;
use tracing::debug;

use crate::parsing::parser::ParsingError;
use crate::record::{LoadingError, Volcano};

pub mod parser;

/// Read a file and return an owned String. We pass that ownership back to
/// the caller so that the Volcano object created by parse() below can have
/// the same lifetime.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a Volcano object, or return the first error encountered.
/// There is no recovery; a malformed line aborts the whole parse so callers
/// never see a half-populated record.
pub fn parse(content: &str) -> Result<Volcano<'_>, ParsingError<'_>> {
    let result = parser::parse_volcano(content);

    match result {
        Ok(volcano) => {
            debug!(
                "Found {} stud{}",
                volcano
                    .studies
                    .len(),
                if volcano
                    .studies
                    .len()
                    == 1
                {
                    "y"
                } else {
                    "ies"
                }
            );
            debug!(
                "Found {} event{}",
                volcano
                    .events
                    .len(),
                if volcano
                    .events
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                }
            );
            Ok(volcano)
        }
        Err(error) => {
            debug!(?error);
            Err(error)
        }
    }
}
