//! Volcano page template - record fields substituted into a static HTML page

use chrono::NaiveDate;
use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::record::{Event, Study, Volcano};

// Styling lives in the site-wide stylesheet; the template stays free of
// literal braces so the whole page can be plain template text.
static TEMPLATE: &'static str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name} - Volcano Deformation Database</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="volcano.css" type="text/css">
</head>
<body>
<h1>{name} <span class="volcano-id">{id}</span></h1>

<table class="summary">
<tr><th>Region:</th><td>{region}</td></tr>
<tr><th>Country:</th><td>{country}</td></tr>
<tr><th>Elevation:</th><td>{elevation}</td></tr>
<tr><th>Latitude:</th><td>{latitude}</td></tr>
<tr><th>Longitude:</th><td>{longitude}</td></tr>
<tr><th>Main Rock Type:</th><td>{rocktype}</td></tr>
<tr><th>Volcano Type:</th><td>{typev}</td></tr>
<tr><th>DOI:</th><td>{doi}</td></tr>
</table>

<p class="description">{description}</p>

<h2>Deformation Studies</h2>
<table class="studies">
<tr><th>Type</th><th>Start Date</th><th>End Date</th><th>Description</th><th>References</th></tr>
{{ for study in studies }}<tr>
<td>{study.kind}</td>
<td>{study.startdate}</td>
<td>{study.enddate}</td>
<td>{study.description}</td>
<td><ul>{{ for reference in study.references }}<li>{reference}</li>{{ endfor }}</ul></td>
</tr>
{{ endfor }}</table>

<h2>Events</h2>
<table class="events">
<tr><th>Type</th><th>Start Date</th><th>End Date</th><th>Description</th><th>References</th></tr>
{{ for event in events }}<tr>
<td>{event.kind}</td>
<td>{event.startdate}</td>
<td>{event.enddate}</td>
<td>{event.description}</td>
<td><ul>{{ for reference in event.references }}<li>{reference}</li>{{ endfor }}</ul></td>
</tr>
{{ endfor }}</table>

<h2>References</h2>
<ul>
{{ for reference in references }}<li>{reference}</li>
{{ endfor }}</ul>
</body>
</html>
"#;

#[derive(Serialize)]
struct PageContext {
    id: String,
    name: String,
    latitude: String,
    longitude: String,
    rocktype: String,
    typev: String,
    region: String,
    country: String,
    elevation: String,
    doi: String,
    description: String,
    references: Vec<String>,
    studies: Vec<DetailContext>,
    events: Vec<DetailContext>,
}

#[derive(Serialize)]
struct DetailContext {
    kind: String,
    description: String,
    startdate: String,
    enddate: String,
    references: Vec<String>,
}

// Everything is pre-formatted to strings here so the template itself never
// has to reason about unset fields; tinytemplate's default formatter then
// HTML-escapes the values on the way out.

fn coordinate(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn date(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date
            .format("%d/%m/%Y")
            .to_string(),
        None => String::new(),
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.to_string())
        .collect()
}

impl From<&Study<'_>> for DetailContext {
    fn from(study: &Study) -> Self {
        DetailContext {
            kind: study
                .kind
                .unwrap_or("")
                .to_string(),
            description: study
                .description
                .clone(),
            startdate: date(study.startdate),
            enddate: date(study.enddate),
            references: owned(&study.references),
        }
    }
}

impl From<&Event<'_>> for DetailContext {
    fn from(event: &Event) -> Self {
        DetailContext {
            kind: event
                .kind
                .unwrap_or("")
                .to_string(),
            description: event
                .description
                .clone(),
            startdate: date(event.startdate),
            enddate: date(event.enddate),
            references: owned(&event.references),
        }
    }
}

impl From<&Volcano<'_>> for PageContext {
    fn from(volcano: &Volcano) -> Self {
        PageContext {
            id: volcano
                .id
                .unwrap_or("")
                .to_string(),
            name: volcano
                .name
                .unwrap_or("")
                .to_string(),
            latitude: coordinate(volcano.latitude),
            longitude: coordinate(volcano.longitude),
            rocktype: volcano
                .rocktype
                .unwrap_or("")
                .to_string(),
            typev: volcano
                .typev
                .unwrap_or("")
                .to_string(),
            region: volcano
                .region
                .unwrap_or("")
                .to_string(),
            country: volcano
                .country
                .unwrap_or("")
                .to_string(),
            elevation: volcano
                .elevation
                .unwrap_or("")
                .to_string(),
            doi: volcano
                .doi
                .unwrap_or("")
                .to_string(),
            description: volcano
                .description
                .clone(),
            references: owned(&volcano.references),
            studies: volcano
                .studies
                .iter()
                .map(DetailContext::from)
                .collect(),
            events: volcano
                .events
                .iter()
                .map(DetailContext::from)
                .collect(),
        }
    }
}

/// Render a volcano record as a complete HTML page.
pub fn page(volcano: &Volcano) -> String {
    let mut tt = TinyTemplate::new();
    tt.add_template("volcano", TEMPLATE)
        .expect("add the static page template");

    let context = PageContext::from(volcano);

    tt.render("volcano", &context)
        .expect("render the volcano page")
}
