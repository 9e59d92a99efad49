//! Field-by-field textual rendering of a parsed volcano record
//!
//! Pure formatting: every decision about what the record contains was made
//! by the parser. The output deliberately mirrors the input format so a
//! dump can be eyeballed against the file it came from.

use crate::record::{Event, Study, Volcano};

const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn render(volcano: &Volcano) -> String {
    let mut output = String::new();

    output.push_str(&format!("ID: {}\n", volcano.id.unwrap_or("")));
    output.push_str(&format!("Name: {}\n", volcano.name.unwrap_or("")));
    output.push_str(&format!("Latitude: {}\n", volcano.latitude));
    output.push_str(&format!("Longitude: {}\n", volcano.longitude));
    output.push_str(&format!("Rocktype: {}\n", volcano.rocktype.unwrap_or("")));
    output.push_str(&format!("Volcano Type: {}\n", volcano.typev.unwrap_or("")));
    output.push_str(&format!("Region: {}\n", volcano.region.unwrap_or("")));
    output.push_str(&format!("Country: {}\n", volcano.country.unwrap_or("")));
    output.push_str(&format!("Elevation: {}\n", volcano.elevation.unwrap_or("")));
    output.push_str(&format!("DOI: {}\n", volcano.doi.unwrap_or("")));
    output.push('\n');

    if !volcano
        .description
        .is_empty()
    {
        output.push_str(&format!("Description: {}\n", volcano.description));
    }

    for event in &volcano.events {
        render_event(&mut output, event);
    }

    for study in &volcano.studies {
        render_study(&mut output, study);
    }

    for reference in &volcano.references {
        output.push_str(&format!("Reference: {}\n", reference));
    }

    output
}

fn render_event(output: &mut String, event: &Event) {
    output.push_str("[Start Event]\n");
    output.push_str(&format!("Type: {}\n", event.kind.unwrap_or("")));
    if !event
        .description
        .is_empty()
    {
        output.push_str(&format!("Description: {}\n", event.description));
    }
    if let Some(date) = event.startdate {
        output.push_str(&format!("Startdate: {}\n", date.format(DATE_FORMAT)));
    }
    if let Some(date) = event.enddate {
        output.push_str(&format!("Enddate: {}\n", date.format(DATE_FORMAT)));
    }
    for reference in &event.references {
        output.push_str(&format!("Reference: {}\n", reference));
    }
    output.push_str("[End Event]\n");
}

fn render_study(output: &mut String, study: &Study) {
    output.push_str("[Start Study]\n");
    output.push_str(&format!("Type: {}\n", study.kind.unwrap_or("")));
    if !study
        .description
        .is_empty()
    {
        output.push_str(&format!("Description: {}\n", study.description));
    }
    if let Some(date) = study.startdate {
        output.push_str(&format!("Startdate: {}\n", date.format(DATE_FORMAT)));
    }
    if let Some(date) = study.enddate {
        output.push_str(&format!("Enddate: {}\n", date.format(DATE_FORMAT)));
    }
    for reference in &study.references {
        output.push_str(&format!("Reference: {}\n", reference));
    }
    output.push_str("[End Study]\n");
}
