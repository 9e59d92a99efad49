//! Types representing a single volcano and its observation history

use chrono::NaiveDate;

/// The root record: one volcano, its identity and location fields, and its
/// ordered lists of studies, events, and references. Scalar fields borrow
/// from the input text the record was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Volcano<'i> {
    pub id: Option<&'i str>,
    pub name: Option<&'i str>,
    pub latitude: f64,
    pub longitude: f64,
    pub rocktype: Option<&'i str>,
    pub typev: Option<&'i str>,
    pub region: Option<&'i str>,
    pub country: Option<&'i str>,
    pub elevation: Option<&'i str>,
    pub doi: Option<&'i str>,
    pub description: String,
    pub references: Vec<&'i str>,
    pub studies: Vec<Study<'i>>,
    pub events: Vec<Event<'i>>,
}

impl Default for Volcano<'_> {
    fn default() -> Self {
        Volcano {
            id: None,
            name: None,
            // NaN is the "not yet set" sentinel for coordinates
            latitude: f64::NAN,
            longitude: f64::NAN,
            rocktype: None,
            typev: None,
            region: None,
            country: None,
            elevation: None,
            doi: None,
            description: String::new(),
            references: Vec::new(),
            studies: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// An observation of volcanic deformation: a campaign of some kind, over a
/// date range, with free-form description and references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Study<'i> {
    pub kind: Option<&'i str>,
    pub description: String,
    pub startdate: Option<NaiveDate>,
    pub enddate: Option<NaiveDate>,
    pub references: Vec<&'i str>,
}

/// Something that happened to a volcano. Same shape as a Study, but kept as
/// its own type because the two populate separate lists on the Volcano and
/// are presented separately.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event<'i> {
    pub kind: Option<&'i str>,
    pub description: String,
    pub startdate: Option<NaiveDate>,
    pub enddate: Option<NaiveDate>,
    pub references: Vec<&'i str>,
}
