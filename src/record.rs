//! Song credit records
//!
//! A [`SongRecord`] is one row handed over by the record source: a year plus
//! the composer, lyricist and singer credits. Names are normalized once here
//! so the rest of the pipeline compares plain strings.

use serde::{Deserialize, Serialize};

/// Delimiter joining several performers in one singer field
pub const SINGER_DELIMITER: &str = " & ";

/// Cell values that stand for "no value" in exported spreadsheets
const NULL_MARKERS: [&str; 4] = ["nan", "none", "null", "n/a"];

/// One song and its credits
///
/// Deserialized records go through the same normalization as
/// [`SongRecord::from_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSongRecord")]
pub struct SongRecord {
    pub year: Option<i32>,
    pub composer: Option<String>,
    pub lyricist: Option<String>,
    /// Whole singer field, possibly several names joined by [`SINGER_DELIMITER`]
    pub singer: Option<String>,
}

impl SongRecord {
    /// Create a record with a known year. Names are normalized.
    pub fn new(
        year: i32,
        composer: Option<&str>,
        lyricist: Option<&str>,
        singer: Option<&str>,
    ) -> Self {
        Self {
            year: Some(year),
            composer: composer.and_then(normalize_name),
            lyricist: lyricist.and_then(normalize_name),
            singer: singer.and_then(normalize_singer_field),
        }
    }

    /// Create a record from raw text cells.
    ///
    /// The year is coerced the way a spreadsheet numeric column would be:
    /// `"1965"`, `" 1965 "` and `"1965.0"` all parse, anything else leaves the
    /// year empty and makes the record malformed.
    pub fn from_fields(
        year: &str,
        composer: Option<&str>,
        lyricist: Option<&str>,
        singer: Option<&str>,
    ) -> Self {
        Self {
            year: parse_year(year),
            composer: composer.and_then(normalize_name),
            lyricist: lyricist.and_then(normalize_name),
            singer: singer.and_then(normalize_singer_field),
        }
    }

    /// A record without a year, or without any credited person, cannot take part in a graph
    pub fn is_malformed(&self) -> bool {
        self.year.is_none()
            || (self.composer.is_none() && self.lyricist.is_none() && self.singer.is_none())
    }

    /// Members of the singer field, split on [`SINGER_DELIMITER`].
    ///
    /// Dangling delimiters and null markers inside the field are dropped.
    pub fn singers(&self) -> Vec<String> {
        self.singer.as_deref().map(split_singers).unwrap_or_default()
    }
}

/// Wire form of a record: text cells, year as number or text
#[derive(Deserialize)]
struct RawSongRecord {
    #[serde(default)]
    year: Option<RawYear>,
    #[serde(default)]
    composer: Option<String>,
    #[serde(default)]
    lyricist: Option<String>,
    #[serde(default)]
    singer: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawSongRecord> for SongRecord {
    fn from(raw: RawSongRecord) -> Self {
        let year = match raw.year {
            Some(RawYear::Int(y)) => y.to_string(),
            Some(RawYear::Float(y)) => y.to_string(),
            Some(RawYear::Text(y)) => y,
            None => String::new(),
        };
        SongRecord::from_fields(
            &year,
            raw.composer.as_deref(),
            raw.lyricist.as_deref(),
            raw.singer.as_deref(),
        )
    }
}

fn split_singers(field: &str) -> Vec<String> {
    let collapsed = field.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .split(SINGER_DELIMITER)
        .map(|part| part.trim_matches(|c: char| c == '&' || c.is_whitespace()))
        .filter_map(normalize_name)
        .collect()
}

/// Normalize a whole singer field: each member normalized, dangling
/// delimiters and null members dropped, rejoined with [`SINGER_DELIMITER`].
fn normalize_singer_field(raw: &str) -> Option<String> {
    let members = split_singers(raw);
    if members.is_empty() {
        None
    } else {
        Some(members.join(SINGER_DELIMITER))
    }
}

/// Trim a display name and collapse internal whitespace.
///
/// Blank cells, bare delimiters and textual null markers (`nan`, `None`,
/// `null`, `n/a`) yield `None`.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.chars().all(|c| c == '&' || c.is_whitespace())
        || NULL_MARKERS.iter().any(|m| name.eq_ignore_ascii_case(m))
    {
        return None;
    }
    Some(name)
}

fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

/// Inclusive year range used by callers to pick the records of one view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Create a range; bounds given in reverse order are swapped
    pub fn new(a: i32, b: i32) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Smallest range covering every dated record, `None` if no record has a year
    pub fn spanning(records: &[SongRecord]) -> Option<Self> {
        let mut years = records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(Self { min, max })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Records whose year lies in the range; undated records never match
    pub fn select<'a>(&self, records: &'a [SongRecord]) -> impl Iterator<Item = &'a SongRecord> + 'a {
        let range = *self;
        records
            .iter()
            .filter(move |r| r.year.is_some_and(|y| range.contains(y)))
    }
}
