//! Minimal vCard reader for contact cards carried in byte segments
//!
//! Only the basic property set is understood; anything else is rejected rather
//! than silently dropped.
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::VCardError;

const BEGIN: &str = "BEGIN:VCARD";
const END: &str = "END:VCARD";

/// Value of one vCard property: plain text, or `;`-separated parts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// A value with no `;`
    Text(String),
    /// A structured value split on `;`
    Parts(Vec<String>),
}

impl PropertyValue {
    fn parse(raw: &str) -> Self {
        if raw.contains(';') {
            PropertyValue::Parts(raw.split(';').map(str::to_string).collect())
        } else {
            PropertyValue::Text(raw.to_string())
        }
    }

    /// The text of an unstructured value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Parts(_) => None,
        }
    }

    /// The parts of the value; plain text is a single part
    pub fn parts(&self) -> Vec<&str> {
        match self {
            PropertyValue::Text(text) => vec![text.as_str()],
            PropertyValue::Parts(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(text) => f.write_str(text),
            PropertyValue::Parts(parts) => f.write_str(&parts.join(";")),
        }
    }
}

/// A parsed contact card. List fields collect every occurrence of their
/// property; scalar fields keep the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    /// ADR
    pub addresses: Vec<PropertyValue>,
    /// AGENT
    pub agent: Option<PropertyValue>,
    /// ANNIVERSARY
    pub anniversary: Option<DateTime<FixedOffset>>,
    /// BDAY
    pub bday: Option<DateTime<FixedOffset>>,
    /// CATEGORIES, split on `,`
    pub categories: Vec<String>,
    /// EMAIL
    pub emails: Vec<PropertyValue>,
    /// FN
    pub formatted_name: Option<PropertyValue>,
    /// GENDER
    pub gender: Option<PropertyValue>,
    /// GEO
    pub geo: Option<PropertyValue>,
    /// IMPP
    pub impp: Vec<PropertyValue>,
    /// KEY
    pub key: Option<PropertyValue>,
    /// LABEL
    pub address_labels: Vec<PropertyValue>,
    /// LANG
    pub lang: Option<PropertyValue>,
    /// LOGO
    pub logo: Option<PropertyValue>,
    /// N
    pub name: Option<PropertyValue>,
    /// NICKNAME
    pub nickname: Option<PropertyValue>,
    /// NOTE
    pub note: Option<PropertyValue>,
    /// ORG
    pub org: Option<PropertyValue>,
    /// PHOTO
    pub photo: Option<PropertyValue>,
    /// REV
    pub rev: Option<DateTime<FixedOffset>>,
    /// ROLE
    pub role: Option<PropertyValue>,
    /// TEL
    pub phones: Vec<PropertyValue>,
    /// TZ
    pub tz: Option<PropertyValue>,
}

impl VCard {
    /// Parse a card framed by `BEGIN:VCARD` and `END:VCARD` lines.
    ///
    /// A parameter on a property (`TEL;TYPE=CELL:123`) is kept as the first part
    /// of its value, without the parameter name: `CELL;123`.
    pub fn from_text(text: &str) -> Result<Self, VCardError> {
        let lines: Vec<&str> = text.lines().collect();
        let body = match lines.as_slice() {
            [first, body @ .., last] if *first == BEGIN && *last == END => body,
            _ => return Err(VCardError::InvalidEnvelope),
        };

        let mut card = VCard::default();
        for line in body {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| VCardError::MalformedLine(line.to_string()))?;
            if key == "VERSION" {
                continue;
            }
            let (name, parameter) = match key.split_once(';') {
                Some((name, rest)) => (name, Some(parameter_value(name, rest, line)?)),
                None => (key, None),
            };
            card.apply(name, parameter, value)?;
        }
        Ok(card)
    }

    fn apply(&mut self, name: &str, parameter: Option<&str>, value: &str) -> Result<(), VCardError> {
        let raw = match parameter {
            Some(parameter) => format!("{parameter};{value}"),
            None => value.to_string(),
        };
        let parsed = PropertyValue::parse(&raw);

        match name {
            "ADR" => self.addresses.push(parsed),
            "AGENT" => self.agent = Some(parsed),
            "ANNIVERSARY" => self.anniversary = Some(parse_date(value)?),
            "BDAY" => self.bday = Some(parse_date(value)?),
            "CATEGORIES" => self.categories.extend(raw.split(',').map(str::to_string)),
            "EMAIL" => self.emails.push(parsed),
            "FN" => self.formatted_name = Some(parsed),
            "GENDER" => self.gender = Some(parsed),
            "GEO" => self.geo = Some(parsed),
            "IMPP" => self.impp.push(parsed),
            "KEY" => self.key = Some(parsed),
            "LABEL" => self.address_labels.push(parsed),
            "LANG" => self.lang = Some(parsed),
            "LOGO" => self.logo = Some(parsed),
            "N" => self.name = Some(parsed),
            "NICKNAME" => self.nickname = Some(parsed),
            "NOTE" => self.note = Some(parsed),
            "ORG" => self.org = Some(parsed),
            "PHOTO" => self.photo = Some(parsed),
            "REV" => self.rev = Some(parse_date(value)?),
            "TEL" => self.phones.push(parsed),
            "ROLE" => self.role = Some(parsed),
            "TZ" => self.tz = Some(parsed),
            other => return Err(VCardError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

/// The text of a property parameter with its `NAME=` prefix dropped
fn parameter_value<'a>(name: &str, rest: &'a str, line: &str) -> Result<&'a str, VCardError> {
    let is_word = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !is_word(name) || rest.is_empty() {
        return Err(VCardError::MalformedLine(line.to_string()));
    }
    match rest.split_once('=') {
        Some((prefix, value)) if is_word(prefix) && !value.is_empty() => Ok(value),
        _ => Ok(rest),
    }
}

/// Dates and date-times in basic or extended ISO 8601 form. Values without an
/// offset are taken as UTC.
fn parse_date(value: &str) -> Result<DateTime<FixedOffset>, VCardError> {
    let value = value.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time);
    }
    for format in ["%Y%m%dT%H%M%S%z", "%Y-%m-%dT%H:%M:%S%z"] {
        if let Ok(date_time) = DateTime::parse_from_str(value, format) {
            return Ok(date_time);
        }
    }
    for format in ["%Y%m%dT%H%M%SZ", "%Y%m%dT%H%M%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    for format in ["%Y%m%d", "%Y-%m-%d"] {
        if let Some(naive) = NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(VCardError::InvalidDate(value.to_string()))
}

impl fmt::Display for VCard {
    /// Writes the card back as vCard text, one property per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line(f: &mut fmt::Formatter<'_>, key: &str, value: &dyn fmt::Display) -> fmt::Result {
            writeln!(f, "{key}:{value}")
        }
        fn date(d: &DateTime<FixedOffset>) -> String {
            d.format("%Y%m%dT%H%M%S%z").to_string()
        }

        writeln!(f, "{BEGIN}")?;
        let scalars = [
            ("FN", &self.formatted_name),
            ("N", &self.name),
            ("NICKNAME", &self.nickname),
            ("ORG", &self.org),
            ("ROLE", &self.role),
            ("AGENT", &self.agent),
            ("GENDER", &self.gender),
            ("GEO", &self.geo),
            ("KEY", &self.key),
            ("LANG", &self.lang),
            ("LOGO", &self.logo),
            ("NOTE", &self.note),
            ("PHOTO", &self.photo),
            ("TZ", &self.tz),
        ];
        for (key, value) in scalars {
            if let Some(value) = value {
                line(f, key, value)?;
            }
        }
        let lists = [
            ("TEL", &self.phones),
            ("EMAIL", &self.emails),
            ("ADR", &self.addresses),
            ("LABEL", &self.address_labels),
            ("IMPP", &self.impp),
        ];
        for (key, values) in lists {
            for value in values {
                line(f, key, value)?;
            }
        }
        if !self.categories.is_empty() {
            line(f, "CATEGORIES", &self.categories.join(","))?;
        }
        let dates = [
            ("BDAY", &self.bday),
            ("ANNIVERSARY", &self.anniversary),
            ("REV", &self.rev),
        ];
        for (key, value) in dates {
            if let Some(value) = value {
                line(f, key, &date(value))?;
            }
        }
        write!(f, "{END}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(values: &[&str]) -> PropertyValue {
        PropertyValue::Parts(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_envelope() {
        assert_eq!(VCard::from_text("BEGIN:VCARD\nEND:VCARD").unwrap(), VCard::default());
        assert_eq!(VCard::from_text("BEGIN:VCARD\n\nEND:VCARD").unwrap(), VCard::default());
        assert_eq!(
            VCard::from_text("BEGIN:VCARD\nEND:ICAL"),
            Err(VCardError::InvalidEnvelope)
        );
        assert_eq!(
            VCard::from_text("Welcome to Jamaica, Have a good day"),
            Err(VCardError::InvalidEnvelope)
        );
        assert_eq!(VCard::from_text(""), Err(VCardError::InvalidEnvelope));
        assert_eq!(VCard::from_text("BEGIN:VCARD"), Err(VCardError::InvalidEnvelope));
    }

    #[test]
    fn test_unknown_field() {
        let err = VCard::from_text("BEGIN:VCARD\nEWINO:BLA\nEND:VCARD").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown vCard field: EWINO. This implementation only supports basic properties"
        );
        assert!(VCard::from_text("BEGIN:VCARD\nVERSION:4\nEND:VCARD").is_ok());
    }

    #[test]
    fn test_line_without_separator() {
        assert_eq!(
            VCard::from_text("BEGIN:VCARD\nFN Bob\nEND:VCARD"),
            Err(VCardError::MalformedLine("FN Bob".into()))
        );
    }

    #[test]
    fn test_date_fields() {
        let card = VCard::from_text("BEGIN:VCARD\nANNIVERSARY:20150828T000000Z\nEND:VCARD").unwrap();
        assert_eq!(
            card.anniversary.unwrap().to_rfc3339(),
            "2015-08-28T00:00:00+00:00"
        );

        let card = VCard::from_text(
            "BEGIN:VCARD\nBDAY;VALUE=date:1970-03-10\nREV:2016-01-30T12:30:00+02:00\nEND:VCARD",
        )
        .unwrap();
        assert_eq!(card.bday.unwrap().to_rfc3339(), "1970-03-10T00:00:00+00:00");
        assert_eq!(card.rev.unwrap().to_rfc3339(), "2016-01-30T12:30:00+02:00");

        assert_eq!(
            VCard::from_text("BEGIN:VCARD\nBDAY:someday\nEND:VCARD"),
            Err(VCardError::InvalidDate("someday".into()))
        );
    }

    #[test]
    fn test_complex_fields() {
        let card = VCard::from_text(
            "BEGIN:VCARD\n\
             TEL;TYPE=WORK,VOICE:(111) 555-1212\n\
             ADR;TYPE=WORK:;;100 Waters Edge;Baytown;LA;30314;United States of America\n\
             CATEGORIES:swimmer,biker\n\
             END:VCARD",
        )
        .unwrap();
        assert_eq!(card.phones, vec![parts(&["WORK,VOICE", "(111) 555-1212"])]);
        assert_eq!(
            card.addresses,
            vec![parts(&[
                "WORK",
                "",
                "",
                "100 Waters Edge",
                "Baytown",
                "LA",
                "30314",
                "United States of America"
            ])]
        );
        assert_eq!(card.categories, vec!["swimmer", "biker"]);
    }

    #[test]
    fn test_lists_append_scalars_overwrite() {
        let card = VCard::from_text(
            "BEGIN:VCARD\r\n\
             EMAIL:a@example.com\r\n\
             EMAIL:b@example.com\r\n\
             NOTE:first\r\n\
             NOTE:second\r\n\
             END:VCARD",
        )
        .unwrap();
        assert_eq!(card.emails.len(), 2);
        assert_eq!(card.note.unwrap().as_text(), Some("second"));
    }

    #[test]
    fn test_name_parts() {
        let card =
            VCard::from_text("BEGIN:VCARD\nVERSION:3.0\nN:Blabla;Bla Bla\nTEL;TYPE=CELL:123456789\nEND:VCARD")
                .unwrap();
        assert_eq!(card.name.unwrap().parts(), vec!["Blabla", "Bla Bla"]);
        assert_eq!(card.phones[0].parts(), vec!["CELL", "123456789"]);
    }

    #[test]
    fn test_display_writes_vcard_text() {
        let card = VCard::from_text("BEGIN:VCARD\nFN:Bob\nTEL:555\nEND:VCARD").unwrap();
        assert_eq!(card.to_string(), "BEGIN:VCARD\nFN:Bob\nTEL:555\nEND:VCARD");
        assert_eq!(VCard::from_text(&card.to_string()).unwrap(), card);
    }
}
