#[cfg(test)]
mod verify {
    use chrono::NaiveDate;

    use volcdef::parsing;
    use volcdef::record::*;

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    fn date(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn scalar_fields_round_trip() {
        let volcano = parsing::parse(trim(
            r#"
ID: 263250
NAME: Merapi
LATITUDE: -7.542
LONGITUDE: 110.442
ROCKTYPE: Basaltic Andesite
TYPEV: Stratovolcano
REGION: Java
COUNTRY: Indonesia
ELEVATION: 2910 m
DOI: 10.1000/demo.263250
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.id, Some("263250"));
        assert_eq!(volcano.name, Some("Merapi"));
        assert_eq!(volcano.latitude, -7.542);
        assert_eq!(volcano.longitude, 110.442);
        assert_eq!(volcano.rocktype, Some("Basaltic Andesite"));
        assert_eq!(volcano.typev, Some("Stratovolcano"));
        assert_eq!(volcano.region, Some("Java"));
        assert_eq!(volcano.country, Some("Indonesia"));
        assert_eq!(volcano.elevation, Some("2910 m"));
        assert_eq!(volcano.doi, Some("10.1000/demo.263250"));
        assert_eq!(volcano.description, "");
        assert_eq!(volcano.references, Vec::<&str>::new());
        assert_eq!(volcano.studies, vec![]);
        assert_eq!(volcano.events, vec![]);
    }

    #[test]
    fn coordinates_default_to_nan() {
        let volcano = parsing::parse("ID: V001\n").unwrap();

        assert!(volcano
            .latitude
            .is_nan());
        assert!(volcano
            .longitude
            .is_nan());
    }

    #[test]
    fn references_append_in_input_order() {
        let volcano = parsing::parse(trim(
            r#"
REFERENCE: Smith 1990
REFERENCE: Jones 1995
REFERENCE: Wright 2003
            "#,
        ))
        .unwrap();

        assert_eq!(
            volcano.references,
            vec!["Smith 1990", "Jones 1995", "Wright 2003"]
        );
    }

    #[test]
    fn description_lines_append_not_replace() {
        let volcano = parsing::parse(trim(
            r#"
DESCRIPTION: A large stratovolcano.
DESCRIPTION:  Frequently active.
            "#,
        ))
        .unwrap();

        // single-line DESCRIPTION appends the trimmed value with no separator
        assert_eq!(
            volcano.description,
            "A large stratovolcano.Frequently active."
        );
    }

    #[test]
    fn multiline_description_accumulates() {
        let volcano = parsing::parse(trim(
            r#"
DESCRIPTION: >>
alpha
beta
DESCRIPTION: <<
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.description, "alpha beta ");
    }

    #[test]
    fn multiline_description_is_entity_local() {
        let volcano = parsing::parse(trim(
            r#"
DESCRIPTION: >>
about the volcano
DESCRIPTION: <<
[Start STUDY]
DESCRIPTION: >>
about the study
DESCRIPTION: <<
[End STUDY]
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.description, "about the volcano ");
        assert_eq!(volcano.studies[0].description, "about the study ");
    }

    #[test]
    fn keyword_lines_inside_multiline_are_dispatched() {
        // a keyword line whose value is not a marker is processed normally
        // even while a multiline block is open
        let volcano = parsing::parse(trim(
            r#"
DESCRIPTION: >>
alpha
REFERENCE: Smith 1990
beta
DESCRIPTION: <<
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.description, "alpha beta ");
        assert_eq!(volcano.references, vec!["Smith 1990"]);
    }

    #[test]
    fn study_section_complete() {
        let volcano = parsing::parse(trim(
            r#"
ID: V001
NAME: Test Peak
LATITUDE: 12.5
[Start STUDY]
TYPE: InSAR
STARTDATE: 01/06/2015
ENDDATE: 01/06/2016
[End STUDY]
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.id, Some("V001"));
        assert_eq!(volcano.name, Some("Test Peak"));
        assert_eq!(volcano.latitude, 12.5);
        assert_eq!(
            volcano.studies,
            vec![Study {
                kind: Some("InSAR"),
                description: String::new(),
                startdate: date(1, 6, 2015),
                enddate: date(1, 6, 2016),
                references: vec![],
            }]
        );
        assert_eq!(volcano.events, vec![]);
    }

    #[test]
    fn event_section_complete() {
        let volcano = parsing::parse(trim(
            r#"
[Start EVENT]
TYPE: Eruption
DESCRIPTION: VEI 4 explosive eruption.
STARTDATE: 26/10/2010
ENDDATE: 12/11/2010
REFERENCE: Surono et al. 2012
[End EVENT]
            "#,
        ))
        .unwrap();

        assert_eq!(
            volcano.events,
            vec![Event {
                kind: Some("Eruption"),
                description: "VEI 4 explosive eruption.".to_string(),
                startdate: date(26, 10, 2010),
                enddate: date(12, 11, 2010),
                references: vec!["Surono et al. 2012"],
            }]
        );
        assert_eq!(volcano.studies, vec![]);
    }

    #[test]
    fn sections_in_order() {
        let volcano = parsing::parse(trim(
            r#"
[Start STUDY]
TYPE: InSAR
[End STUDY]
[Start EVENT]
TYPE: Eruption
[End EVENT]
[Start STUDY]
TYPE: GPS
[End STUDY]
            "#,
        ))
        .unwrap();

        assert_eq!(
            volcano
                .studies
                .iter()
                .map(|study| study.kind)
                .collect::<Vec<_>>(),
            vec![Some("InSAR"), Some("GPS")]
        );
        assert_eq!(volcano.events[0].kind, Some("Eruption"));
    }

    #[test]
    fn section_markers_are_case_insensitive() {
        let volcano = parsing::parse(trim(
            r#"
[start Study]
type: InSAR
[END STUDY]
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.studies[0].kind, Some("InSAR"));
    }

    #[test]
    fn empty_section_still_creates_child() {
        // the child is appended the moment its section opens
        let volcano = parsing::parse(trim(
            r#"
[Start STUDY]
[End STUDY]
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.studies, vec![Study::default()]);
    }

    #[test]
    fn unknown_keywords_are_ignored() {
        let volcano = parsing::parse(trim(
            r#"
ID: V001
FLAVOUR: vanilla
[Start STUDY]
TYPE: GPS
NETWORK: continuous
[End STUDY]
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.id, Some("V001"));
        assert_eq!(volcano.studies[0].kind, Some("GPS"));
    }

    #[test]
    fn unknown_sections_are_inert() {
        let volcano = parsing::parse(trim(
            r#"
ID: V001
[Start MONITORING]
ID: should-not-land-anywhere
REFERENCE: dropped
[End MONITORING]
NAME: Test Peak
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.id, Some("V001"));
        assert_eq!(volcano.name, Some("Test Peak"));
        assert_eq!(volcano.references, Vec::<&str>::new());
    }

    #[test]
    fn stray_text_outside_multiline_is_tolerated() {
        let volcano = parsing::parse(trim(
            r#"
ID: V001
this line matches nothing

NAME: Test Peak
            "#,
        ))
        .unwrap();

        assert_eq!(volcano.id, Some("V001"));
        assert_eq!(volcano.name, Some("Test Peak"));
        assert_eq!(volcano.description, "");
    }

    #[test]
    fn reparse_is_idempotent() {
        let content = trim(
            r#"
ID: V001
NAME: Test Peak
LATITUDE: 12.5
LONGITUDE: -3.8
DESCRIPTION: >>
alpha
beta
DESCRIPTION: <<
[Start STUDY]
TYPE: InSAR
STARTDATE: 01/06/2015
[End STUDY]
[Start EVENT]
TYPE: Eruption
[End EVENT]
REFERENCE: Smith 1990
            "#,
        );

        let first = parsing::parse(content).unwrap();
        let second = parsing::parse(content).unwrap();

        assert_eq!(first, second);
    }
}
