use chrono::NaiveDate;
use tracing::debug;

use crate::record::*;

macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

/// What to do with free text encountered while no multiline block is open.
/// The record format has always tolerated such lines, so this ships false;
/// flip it to make stray text fatal.
const REJECT_STRAY_TEXT: bool = false;

pub fn parse_volcano(content: &str) -> Result<Volcano<'_>, ParsingError<'_>> {
    let mut input = Parser::new();
    input.initialize(content);

    input.parse_from_start()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError<'i> {
    NestedSection(usize, &'i str),
    SectionMismatch(usize, &'i str),
    NestedMultiline(usize, &'i str),
    NotInMultiline(usize, &'i str),
    MultilineKeywordMismatch(usize, &'i str),
    DuplicateField(usize, &'i str),
    MalformedDate(usize, &'i str),
    MalformedNumber(usize, &'i str),
    StrayText(usize, &'i str),
}

impl<'i> ParsingError<'i> {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::NestedSection(offset, _) => *offset,
            ParsingError::SectionMismatch(offset, _) => *offset,
            ParsingError::NestedMultiline(offset, _) => *offset,
            ParsingError::NotInMultiline(offset, _) => *offset,
            ParsingError::MultilineKeywordMismatch(offset, _) => *offset,
            ParsingError::DuplicateField(offset, _) => *offset,
            ParsingError::MalformedDate(offset, _) => *offset,
            ParsingError::MalformedNumber(offset, _) => *offset,
            ParsingError::StrayText(offset, _) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::NestedSection(_, name) => {
                format!("sections cannot be nested, but '{}' starts inside one", name)
            }
            ParsingError::SectionMismatch(_, name) => {
                format!("end of section '{}' does not match the open section", name)
            }
            ParsingError::NestedMultiline(_, keyword) => {
                format!("cannot nest multiline blocks; '{}' opens inside one", keyword)
            }
            ParsingError::NotInMultiline(_, keyword) => {
                format!("'{}' closes a multiline block, but none is open", keyword)
            }
            ParsingError::MultilineKeywordMismatch(_, keyword) => {
                format!("'{}' does not match the keyword that opened the block", keyword)
            }
            ParsingError::DuplicateField(_, keyword) => {
                format!("'{}' can only be set once per section", keyword)
            }
            ParsingError::MalformedDate(_, value) => {
                format!("'{}' is not a valid DD/MM/YYYY date", value)
            }
            ParsingError::MalformedNumber(_, value) => {
                format!("'{}' is not a valid number", value)
            }
            ParsingError::StrayText(_, _) => "text outside any multiline block".to_string(),
        }
    }
}

/// The four shapes a raw input line can take. Classification is purely
/// lexical; deciding what a line means in context is the state machine's
/// job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'i> {
    SectionStart(&'i str),
    SectionEnd(&'i str),
    KeywordValue(&'i str, &'i str),
    Plain(&'i str),
}

/// Tag one line of input. The patterns are tried in order; a section marker
/// wins over a keyword line, which wins over plain text. The marker and
/// keyword patterns only anchor at the start of the line, so trailing junk
/// after a section marker is tolerated.
pub fn classify_line(content: &str) -> Line<'_> {
    let re = regex!(r"^\s*\[\s*(?i:Start)\s+(\w+)\s*\]");
    if let Some(cap) = re.captures(content) {
        if let Some(name) = cap.get(1) {
            return Line::SectionStart(name.as_str());
        }
    }

    let re = regex!(r"^\s*\[\s*(?i:End)\s+(\w+)\s*\]");
    if let Some(cap) = re.captures(content) {
        if let Some(name) = cap.get(1) {
            return Line::SectionEnd(name.as_str());
        }
    }

    // A keyword line needs at least one character after the colon; a bare
    // "KEYWORD:" is plain text.
    let re = regex!(r"^\s*(\w+)\s*:(.+)$");
    if let Some(cap) = re.captures(content) {
        if let (Some(keyword), Some(value)) = (cap.get(1), cap.get(2)) {
            return Line::KeywordValue(keyword.as_str(), value.as_str().trim());
        }
    }

    Line::Plain(content.trim_end())
}

fn validate_date(content: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = content
        .split('/')
        .collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0]
        .trim()
        .parse()
        .ok()?;
    let month: u32 = parts[1]
        .trim()
        .parse()
        .ok()?;
    let year: i32 = parts[2]
        .trim()
        .parse()
        .ok()?;

    // from_ymd_opt also rejects impossible calendar dates, 31/04 and so on
    NaiveDate::from_ymd_opt(year, month, day)
}

fn validate_number(content: &str) -> Option<f64> {
    content
        .parse()
        .ok()
}

/// Which entity keyword lines are currently routed to. Study and Event
/// carry the index of the child created when the section opened; Other is
/// an open context the parser accepts but does not route fields into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section<'i> {
    Study(&'i str, usize),
    Event(&'i str, usize),
    Other(&'i str),
}

impl<'i> Section<'i> {
    fn name(&self) -> &'i str {
        match self {
            Section::Study(name, _) => name,
            Section::Event(name, _) => name,
            Section::Other(name) => name,
        }
    }
}

#[derive(Debug)]
pub struct Parser<'i> {
    source: &'i str,
    offset: usize,
    section: Option<Section<'i>>,
    multiline: Option<&'i str>,
    volcano: Volcano<'i>,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            source: "",
            offset: 0,
            section: None,
            multiline: None,
            volcano: Volcano::default(),
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.source = content;
        self.offset = 0;
        self.section = None;
        self.multiline = None;
        self.volcano = Volcano::default();
    }

    fn advance(&mut self, width: usize) {
        // advance the parser position
        self.source = &self.source[width..];
        self.offset += width;
    }

    fn is_finished(&self) -> bool {
        self.source
            .is_empty()
    }

    fn current_line(&self) -> &'i str {
        match self
            .source
            .find('\n')
        {
            Some(i) => &self.source[..i],
            None => self.source,
        }
    }

    fn advance_line(&mut self) {
        match self
            .source
            .find('\n')
        {
            Some(i) => self.advance(i + 1),
            None => self.advance(
                self.source
                    .len(),
            ),
        }
    }

    pub fn parse_from_start(&mut self) -> Result<Volcano<'i>, ParsingError<'i>> {
        while !self.is_finished() {
            let line = self.current_line();
            self.process_line(line)?;
            self.advance_line();
        }

        // The original format falls off the end without complaint even if a
        // section or multiline block is still open. TODO decide whether an
        // unterminated section should become fatal in a future format rev.
        if let Some(keyword) = self.multiline {
            debug!("input ended inside an open '{}' multiline block", keyword);
        }
        if let Some(section) = &self.section {
            debug!("input ended inside an open '{}' section", section.name());
        }

        Ok(std::mem::take(&mut self.volcano))
    }

    fn process_line(&mut self, line: &'i str) -> Result<(), ParsingError<'i>> {
        match classify_line(line) {
            Line::SectionStart(name) => self.open_section(name),
            Line::SectionEnd(name) => self.close_section(name),
            Line::KeywordValue(keyword, value) => self.process_keyword(keyword, value),
            Line::Plain(text) => self.process_plain(text),
        }
    }

    fn open_section(&mut self, name: &'i str) -> Result<(), ParsingError<'i>> {
        if self
            .section
            .is_some()
        {
            return Err(ParsingError::NestedSection(self.offset, name));
        }

        // The child entity is created, and appended, the moment its section
        // opens; keyword lines then mutate it in place through the index.
        if name.eq_ignore_ascii_case("STUDY") {
            self.volcano
                .studies
                .push(Study::default());
            let index = self
                .volcano
                .studies
                .len()
                - 1;
            self.section = Some(Section::Study(name, index));
        } else if name.eq_ignore_ascii_case("EVENT") {
            self.volcano
                .events
                .push(Event::default());
            let index = self
                .volcano
                .events
                .len()
                - 1;
            self.section = Some(Section::Event(name, index));
        } else {
            // An unknown section is accepted as an open context so that its
            // End marker balances, but nothing is routed into it.
            debug!("accepting unrecognized section '{}'", name);
            self.section = Some(Section::Other(name));
        }
        Ok(())
    }

    fn close_section(&mut self, name: &'i str) -> Result<(), ParsingError<'i>> {
        match &self.section {
            Some(open)
                if open
                    .name()
                    .eq_ignore_ascii_case(name) =>
            {
                self.section = None;
                Ok(())
            }
            _ => Err(ParsingError::SectionMismatch(self.offset, name)),
        }
    }

    fn process_keyword(&mut self, keyword: &'i str, value: &'i str) -> Result<(), ParsingError<'i>> {
        if value == ">>" {
            if self
                .multiline
                .is_some()
            {
                return Err(ParsingError::NestedMultiline(self.offset, keyword));
            }
            self.multiline = Some(keyword);
            return Ok(());
        }

        if value == "<<" {
            return match self.multiline {
                None => Err(ParsingError::NotInMultiline(self.offset, keyword)),
                Some(open) if !open.eq_ignore_ascii_case(keyword) => {
                    Err(ParsingError::MultilineKeywordMismatch(self.offset, keyword))
                }
                Some(_) => {
                    self.multiline = None;
                    Ok(())
                }
            };
        }

        match self.section {
            None => self.assign_root(keyword, value),
            Some(Section::Study(_, index)) => assign_study(
                &mut self
                    .volcano
                    .studies[index],
                keyword,
                value,
                self.offset,
            ),
            Some(Section::Event(_, index)) => assign_event(
                &mut self
                    .volcano
                    .events[index],
                keyword,
                value,
                self.offset,
            ),
            Some(Section::Other(name)) => {
                debug!(
                    "dropping keyword '{}' inside unrecognized section '{}'",
                    keyword, name
                );
                Ok(())
            }
        }
    }

    fn assign_root(&mut self, keyword: &'i str, value: &'i str) -> Result<(), ParsingError<'i>> {
        match keyword
            .to_ascii_uppercase()
            .as_str()
        {
            "ID" => self.volcano.id = Some(value),
            "NAME" => self.volcano.name = Some(value),
            "LATITUDE" => {
                self.volcano.latitude = validate_number(value)
                    .ok_or(ParsingError::MalformedNumber(self.offset, value))?
            }
            "LONGITUDE" => {
                self.volcano.longitude = validate_number(value)
                    .ok_or(ParsingError::MalformedNumber(self.offset, value))?
            }
            "ROCKTYPE" => self.volcano.rocktype = Some(value),
            "TYPEV" => self.volcano.typev = Some(value),
            "REGION" => self.volcano.region = Some(value),
            "COUNTRY" => self.volcano.country = Some(value),
            "ELEVATION" => self.volcano.elevation = Some(value),
            "DOI" => self.volcano.doi = Some(value),
            "DESCRIPTION" => self
                .volcano
                .description
                .push_str(value),
            "REFERENCE" => self
                .volcano
                .references
                .push(value),
            _ => {
                // Don't recognize this keyword - skip, so that files written
                // against a newer revision of the format still load.
                debug!("ignoring unrecognized keyword '{}'", keyword);
            }
        }
        Ok(())
    }

    fn process_plain(&mut self, text: &'i str) -> Result<(), ParsingError<'i>> {
        let keyword = match self.multiline {
            Some(keyword) => keyword,
            None => {
                if text
                    .trim()
                    .is_empty()
                {
                    return Ok(());
                }
                if REJECT_STRAY_TEXT {
                    return Err(ParsingError::StrayText(self.offset, text));
                }
                debug!("ignoring text outside any multiline block");
                return Ok(());
            }
        };

        // Description is the only field that accumulates; a multiline block
        // opened on any other keyword is tracked for balance but its content
        // has nowhere to go.
        if !keyword.eq_ignore_ascii_case("DESCRIPTION") {
            return Ok(());
        }

        let target = match self.section {
            None => &mut self.volcano.description,
            Some(Section::Study(_, index)) => {
                &mut self
                    .volcano
                    .studies[index]
                    .description
            }
            Some(Section::Event(_, index)) => {
                &mut self
                    .volcano
                    .events[index]
                    .description
            }
            Some(Section::Other(_)) => return Ok(()),
        };

        // each line contributes itself and a single trailing space
        target.push_str(text.trim_start());
        target.push(' ');
        Ok(())
    }
}

fn assign_study<'i>(
    study: &mut Study<'i>,
    keyword: &'i str,
    value: &'i str,
    offset: usize,
) -> Result<(), ParsingError<'i>> {
    match keyword
        .to_ascii_uppercase()
        .as_str()
    {
        "TYPE" => {
            if study
                .kind
                .is_some()
            {
                return Err(ParsingError::DuplicateField(offset, keyword));
            }
            study.kind = Some(value);
        }
        "DESCRIPTION" => study
            .description
            .push_str(value),
        "STARTDATE" => {
            study.startdate =
                Some(validate_date(value).ok_or(ParsingError::MalformedDate(offset, value))?)
        }
        "ENDDATE" => {
            study.enddate =
                Some(validate_date(value).ok_or(ParsingError::MalformedDate(offset, value))?)
        }
        "REFERENCE" => study
            .references
            .push(value),
        _ => debug!("ignoring unrecognized keyword '{}' in study", keyword),
    }
    Ok(())
}

fn assign_event<'i>(
    event: &mut Event<'i>,
    keyword: &'i str,
    value: &'i str,
    offset: usize,
) -> Result<(), ParsingError<'i>> {
    match keyword
        .to_ascii_uppercase()
        .as_str()
    {
        "TYPE" => {
            if event
                .kind
                .is_some()
            {
                return Err(ParsingError::DuplicateField(offset, keyword));
            }
            event.kind = Some(value);
        }
        "DESCRIPTION" => event
            .description
            .push_str(value),
        "STARTDATE" => {
            event.startdate =
                Some(validate_date(value).ok_or(ParsingError::MalformedDate(offset, value))?)
        }
        "ENDDATE" => {
            event.enddate =
                Some(validate_date(value).ok_or(ParsingError::MalformedDate(offset, value))?)
        }
        "REFERENCE" => event
            .references
            .push(value),
        _ => debug!("ignoring unrecognized keyword '{}' in event", keyword),
    }
    Ok(())
}
