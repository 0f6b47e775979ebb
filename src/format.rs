//! Format-specifier language: the specifier opcodes and the compiler that
//! turns a format string into an executable program of literal fragments
//! interleaved with specifiers.

use core::fmt;
use core::mem;

use bitflags::bitflags;

use crate::assert::{assert_ascii_names, assert_sorted_elem_0};

/// List of weekday names, indexed by day of the week from Sunday.
pub(crate) const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// List of month names, indexed by month minus one.
pub(crate) const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Check day and month tables
const _: () = {
    assert_ascii_names(&DAYS);
    assert_ascii_names(&MONTHS);
};

bitflags! {
    /// Per-specifier properties from which the compiled programs derive
    /// their metadata.
    pub(crate) struct Properties: u8 {
        /// The parser consumes a run of ASCII digits for this specifier.
        const NUMERIC    = 1 << 0;
        /// The formatter consults the calendar date (weekday, day of
        /// year) rather than only the seven field values.
        const NEEDS_DATE = 1 << 1;
    }
}

/// A calendar or clock field kind recognized by the format language.
///
/// The composite specifiers `%c`, `%x` and `%X` are expanded during
/// compilation and have no variant here.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Specifier {
    /// %a
    AbbreviatedWeekdayName,
    /// %A
    FullWeekdayName,
    /// %w
    WeekdayDecimal,
    /// %d
    DayOfMonthPadded,
    /// %-d
    DayOfMonth,
    /// %b, %h
    AbbreviatedMonthName,
    /// %B
    FullMonthName,
    /// %m
    MonthPadded,
    /// %-m
    Month,
    /// %y
    YearWithoutCenturyPadded,
    /// %-y
    YearWithoutCentury,
    /// %Y
    Year,
    /// %H
    Hour24Padded,
    /// %-H
    Hour24,
    /// %I
    Hour12Padded,
    /// %-I
    Hour12,
    /// %p
    Meridian,
    /// %M
    MinutePadded,
    /// %-M
    Minute,
    /// %S
    SecondPadded,
    /// %-S
    Second,
    /// %f
    Microsecond,
    /// %z
    UtcOffset,
    /// %Z
    TimeZoneName,
    /// %j
    DayOfYearPadded,
    /// %-j
    DayOfYear,
    /// %U
    WeekNumberSunday,
    /// %W
    WeekNumberMonday,
}

impl Specifier {
    pub(crate) fn properties(self) -> Properties {
        match self {
            Specifier::AbbreviatedWeekdayName | Specifier::FullWeekdayName => {
                Properties::NEEDS_DATE
            }
            Specifier::WeekdayDecimal
            | Specifier::DayOfYearPadded
            | Specifier::DayOfYear
            | Specifier::WeekNumberSunday
            | Specifier::WeekNumberMonday => Properties::NEEDS_DATE | Properties::NUMERIC,
            Specifier::AbbreviatedMonthName
            | Specifier::FullMonthName
            | Specifier::Meridian
            | Specifier::UtcOffset
            | Specifier::TimeZoneName => Properties::empty(),
            _ => Properties::NUMERIC,
        }
    }

    pub(crate) fn is_numeric(self) -> bool {
        self.properties().contains(Properties::NUMERIC)
    }

    pub(crate) fn needs_date(self) -> bool {
        self.properties().contains(Properties::NEEDS_DATE)
    }

    /// Output width of a constant-size specifier, `None` for the
    /// variable-length ones.
    pub(crate) fn fixed_width(self) -> Option<usize> {
        match self {
            Specifier::AbbreviatedWeekdayName
            | Specifier::AbbreviatedMonthName
            | Specifier::DayOfYearPadded => Some(3),
            Specifier::WeekdayDecimal => Some(1),
            Specifier::DayOfMonthPadded
            | Specifier::MonthPadded
            | Specifier::YearWithoutCenturyPadded
            | Specifier::Hour24Padded
            | Specifier::Hour12Padded
            | Specifier::Meridian
            | Specifier::MinutePadded
            | Specifier::SecondPadded
            | Specifier::WeekNumberSunday
            | Specifier::WeekNumberMonday => Some(2),
            Specifier::Microsecond => Some(6),
            _ => None,
        }
    }

    /// The canonical external syntax of this specifier.
    pub(crate) fn pattern(self) -> &'static str {
        match self {
            Specifier::AbbreviatedWeekdayName => "%a",
            Specifier::FullWeekdayName => "%A",
            Specifier::WeekdayDecimal => "%w",
            Specifier::DayOfMonthPadded => "%d",
            Specifier::DayOfMonth => "%-d",
            Specifier::AbbreviatedMonthName => "%b",
            Specifier::FullMonthName => "%B",
            Specifier::MonthPadded => "%m",
            Specifier::Month => "%-m",
            Specifier::YearWithoutCenturyPadded => "%y",
            Specifier::YearWithoutCentury => "%-y",
            Specifier::Year => "%Y",
            Specifier::Hour24Padded => "%H",
            Specifier::Hour24 => "%-H",
            Specifier::Hour12Padded => "%I",
            Specifier::Hour12 => "%-I",
            Specifier::Meridian => "%p",
            Specifier::MinutePadded => "%M",
            Specifier::Minute => "%-M",
            Specifier::SecondPadded => "%S",
            Specifier::Second => "%-S",
            Specifier::Microsecond => "%f",
            Specifier::UtcOffset => "%z",
            Specifier::TimeZoneName => "%Z",
            Specifier::DayOfYearPadded => "%j",
            Specifier::DayOfYear => "%-j",
            Specifier::WeekNumberSunday => "%U",
            Specifier::WeekNumberMonday => "%W",
        }
    }
}

/// Error type returned when compiling a format string fails.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CompileError {
    /// The character following a `%` or `%-` is not a recognized
    /// specifier.
    UnrecognizedSpecifier {
        /// The offending character.
        specifier: char,
        /// Whether the character followed the `%-` unpadded prefix.
        unpadded: bool,
    },
    /// The format string ends with a lone `%`.
    TrailingFormatCharacter,
    /// The specifier has no inverse and cannot appear in a parse program.
    NotImplemented(Specifier),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnrecognizedSpecifier {
                specifier,
                unpadded,
            } => {
                let prefix = if *unpadded { "%-" } else { "%" };
                write!(
                    f,
                    "Unrecognized format for strftime/strptime: {}{}",
                    prefix, specifier
                )
            }
            CompileError::TrailingFormatCharacter => write!(f, "Trailing format character %"),
            CompileError::NotImplemented(spec) => write!(
                f,
                "{} specifier is not implemented for parsing",
                spec.pattern()
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// The shared half of a compiled program: literal fragments interleaved
/// with specifiers, with `literals.len() == specifiers.len() + 1`.
#[derive(Debug, Default)]
pub(crate) struct Program {
    pub(crate) literals: Vec<String>,
    pub(crate) specifiers: Vec<Specifier>,
}

impl Program {
    fn add(&mut self, literal: String, specifier: Specifier) {
        self.literals.push(literal);
        self.specifiers.push(specifier);
    }
}

/// Sorted single-character specifier table.
const POSSIBLE_SPECS: &[(u8, Specifier)] = assert_sorted_elem_0(&[
    (b'A', Specifier::FullWeekdayName),
    (b'B', Specifier::FullMonthName),
    (b'H', Specifier::Hour24Padded),
    (b'I', Specifier::Hour12Padded),
    (b'M', Specifier::MinutePadded),
    (b'S', Specifier::SecondPadded),
    (b'U', Specifier::WeekNumberSunday),
    (b'W', Specifier::WeekNumberMonday),
    (b'Y', Specifier::Year),
    (b'Z', Specifier::TimeZoneName),
    (b'a', Specifier::AbbreviatedWeekdayName),
    (b'b', Specifier::AbbreviatedMonthName),
    (b'd', Specifier::DayOfMonthPadded),
    (b'f', Specifier::Microsecond),
    (b'h', Specifier::AbbreviatedMonthName),
    (b'j', Specifier::DayOfYearPadded),
    (b'm', Specifier::MonthPadded),
    (b'p', Specifier::Meridian),
    (b'w', Specifier::WeekdayDecimal),
    (b'y', Specifier::YearWithoutCenturyPadded),
    (b'z', Specifier::UtcOffset),
]);

/// Sorted specifier table for the `%-` unpadded prefix.
const UNPADDED_SPECS: &[(u8, Specifier)] = assert_sorted_elem_0(&[
    (b'H', Specifier::Hour24),
    (b'I', Specifier::Hour12),
    (b'M', Specifier::Minute),
    (b'S', Specifier::Second),
    (b'd', Specifier::DayOfMonth),
    (b'j', Specifier::DayOfYear),
    (b'm', Specifier::Month),
    (b'y', Specifier::YearWithoutCentury),
]);

fn lookup(table: &[(u8, Specifier)], c: char) -> Option<Specifier> {
    if !c.is_ascii() {
        return None;
    }
    match table.binary_search_by_key(&(c as u8), |&(b, _)| b) {
        Ok(index) => Some(table[index].1),
        Err(_) => None,
    }
}

/// Compile `format` into `program`.
///
/// The compiler recognizes the whole specifier language; specifiers the
/// parser cannot invert are rejected later, when a parse program is
/// built.
pub(crate) fn parse_format_string(
    format: &str,
    program: &mut Program,
) -> Result<(), CompileError> {
    let bytes = format.as_bytes();
    // Pending literal, accumulating plain text and `%%` escapes until the
    // next specifier is emitted.
    let mut current = String::new();
    let mut pos = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        current.push_str(&format[pos..i]);
        i += 1;

        let c = match format[i..].chars().next() {
            Some(c) => c,
            None => return Err(CompileError::TrailingFormatCharacter),
        };
        match c {
            '%' => {
                current.push('%');
                i += 1;
            }
            'c' | 'x' | 'X' => {
                let pattern = match c {
                    'c' => "%Y-%m-%d %H:%M:%S",
                    'x' => "%Y-%m-%d",
                    _ => "%H:%M:%S",
                };
                splice_composite(pattern, &mut current, program)?;
                i += 1;
            }
            '-' => {
                let next = format[i + 1..].chars().next();
                let spec = next.and_then(|c| lookup(UNPADDED_SPECS, c));
                match (spec, next) {
                    (Some(spec), _) => {
                        program.add(mem::take(&mut current), spec);
                        i += 2;
                    }
                    (None, Some(next)) => {
                        return Err(CompileError::UnrecognizedSpecifier {
                            specifier: next,
                            unpadded: true,
                        });
                    }
                    // A bare `%-` at the end of the pattern renders as an
                    // unrecognized `-` specifier.
                    (None, None) => {
                        return Err(CompileError::UnrecognizedSpecifier {
                            specifier: '-',
                            unpadded: false,
                        });
                    }
                }
            }
            c => match lookup(POSSIBLE_SPECS, c) {
                Some(spec) => {
                    program.add(mem::take(&mut current), spec);
                    i += 1;
                }
                None => {
                    return Err(CompileError::UnrecognizedSpecifier {
                        specifier: c,
                        unpadded: false,
                    });
                }
            },
        }
        pos = i;
    }

    current.push_str(&format[pos..]);
    program.literals.push(current);
    Ok(())
}

/// Compile a composite sub-pattern and splice its pieces into the parent
/// program. The pending literal is prefixed onto the sub-program's first
/// literal, and the sub-program's trailing literal becomes the new
/// pending literal.
fn splice_composite(
    pattern: &str,
    current: &mut String,
    program: &mut Program,
) -> Result<(), CompileError> {
    let mut sub = Program::default();
    parse_format_string(pattern, &mut sub)?;

    let mut literals = sub.literals.into_iter();
    current.push_str(&literals.next().unwrap_or_default());
    for specifier in sub.specifiers {
        program.add(mem::take(current), specifier);
        *current = literals.next().unwrap_or_default();
    }
    Ok(())
}
