use owo_colors::OwoColorize;
use std::path::Path;

use crate::parsing::parser::ParsingError;
use crate::record::LoadingError;

/// Format a parsing error with full details, including the offending line
/// recovered from the source by the error's byte offset.
pub fn full_parsing_error(error: &ParsingError, filename: &Path, source: &str) -> String {
    let problem = error.message();
    let offset = error.offset();

    let i = calculate_line_number(source, offset);

    let code = source
        .lines()
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
    )
    .trim_ascii()
    .to_string()
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error(error: &ParsingError, filename: &Path, source: &str) -> String {
    let problem = error.message();
    let offset = error.offset();
    let line = calculate_line_number(source, offset) + 1;

    format!(
        "{}: {}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        problem.bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}:{}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

// Helper function for line calculation
fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}
