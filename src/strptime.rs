//! Parsing side of the engine: a compiled program that consumes an input
//! string left to right, extracting and validating calendar fields.

use core::fmt;

use crate::format::{parse_format_string, CompileError, Program, Specifier, DAYS, MONTHS};

/// A meridiem indicator consumed by the `%p` specifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Meridiem {
    /// A time before noon.
    Am,
    /// A time at or after noon.
    Pm,
}

/// The calendar fields extracted by a parse.
///
/// Fields not mentioned by the format string keep their defaults of
/// midnight, January 1st, 1900. The hour is always on the 24-hour clock:
/// a 12-hour input is resolved against the meridiem before the parse
/// returns.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Parsed {
    /// Year including the century.
    pub year: i32,
    /// Month of the year in `1..=12`.
    pub month: u8,
    /// Day of the month in `1..=31`.
    pub day: u8,
    /// Hour of the day on the 24-hour clock.
    pub hour: u8,
    /// Minute of the hour in `0..=59`.
    pub minute: u8,
    /// Second of the minute in `0..=59`.
    pub second: u8,
    /// Microseconds in `0..=999_999`.
    pub microsecond: u32,
    /// The meridiem consumed by `%p`, if any.
    pub meridiem: Option<Meridiem>,
}

impl Default for Parsed {
    fn default() -> Self {
        Self {
            year: 1900,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            meridiem: None,
        }
    }
}

/// A numeric field validated by the parser, with its permitted range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Field {
    /// Day of the month (`%d`, `%-d`).
    Day,
    /// Month of the year (`%m`, `%-m`).
    Month,
    /// Two-digit year (`%y`, `%-y`).
    Year,
    /// Hour on the 24-hour clock (`%H`, `%-H`).
    Hour24,
    /// Hour on the 12-hour clock (`%I`, `%-I`).
    Hour12,
    /// Minute of the hour (`%M`, `%-M`).
    Minute,
    /// Second of the minute (`%S`, `%-S`).
    Second,
    /// Microseconds (`%f`).
    Microseconds,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Day => "Day",
            Field::Month => "Month",
            Field::Year => "Year",
            Field::Hour24 => "Hour24",
            Field::Hour12 => "Hour12",
            Field::Minute => "Minute",
            Field::Second => "Second",
            Field::Microseconds => "Microseconds",
        }
    }

    fn range(self) -> (u64, u64) {
        match self {
            Field::Day => (1, 31),
            Field::Month => (1, 12),
            Field::Year => (0, 99),
            Field::Hour24 => (0, 23),
            Field::Hour12 => (1, 12),
            Field::Minute | Field::Second => (0, 59),
            Field::Microseconds => (0, 999_999),
        }
    }
}

/// The reason a parse failed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// A literal fragment of the format string did not appear in the
    /// input.
    LiteralMismatch {
        /// The literal the input was expected to contain.
        expected: String,
    },
    /// A numeric specifier found no digit to consume.
    ExpectedNumber,
    /// A digit run overflowed the largest value any specifier accepts.
    NumberOutOfRange,
    /// A numeric field fell outside its domain.
    OutOfRange {
        /// The violated field.
        field: Field,
    },
    /// The `%p` specifier found no `AM`/`PM` indicator.
    ExpectedMeridiem,
    /// A weekday-name specifier matched no English weekday name.
    ExpectedWeekdayName {
        /// Whether the abbreviated names were expected.
        abbreviated: bool,
    },
    /// A month-name specifier matched no English month name.
    ExpectedMonthName {
        /// Whether the abbreviated names were expected.
        abbreviated: bool,
    },
    /// Non-whitespace input remained after the whole program matched.
    TrailingCharacters,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::LiteralMismatch { expected } => {
                write!(f, "Literal does not match, expected {}", expected)
            }
            ParseErrorKind::ExpectedNumber => write!(f, "Expected a number"),
            ParseErrorKind::NumberOutOfRange => {
                write!(f, "Number is out of range of format specifier")
            }
            ParseErrorKind::OutOfRange { field } => {
                let (lo, hi) = field.range();
                write!(
                    f,
                    "{} out of range, expected a value between {} and {}",
                    field.name(),
                    lo,
                    hi
                )
            }
            ParseErrorKind::ExpectedMeridiem => write!(f, "Expected AM/PM"),
            ParseErrorKind::ExpectedWeekdayName { abbreviated: true } => {
                write!(f, "Expected an abbreviated weekday name")
            }
            ParseErrorKind::ExpectedWeekdayName { abbreviated: false } => {
                write!(f, "Expected a full weekday name")
            }
            ParseErrorKind::ExpectedMonthName { abbreviated: true } => {
                write!(f, "Expected an abbreviated month name")
            }
            ParseErrorKind::ExpectedMonthName { abbreviated: false } => {
                write!(f, "Expected a full month name")
            }
            ParseErrorKind::TrailingCharacters => {
                write!(f, "Full specifier did not match: trailing characters")
            }
        }
    }
}

/// Error type returned when parsing an input string fails.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    /// The reason the parse failed.
    pub kind: ParseErrorKind,
    /// Byte position in the input at which the failure occurred.
    pub position: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ParseError {}

/// A compiled `strptime` program.
///
/// Shares the compiler with [`StrfTimeFormat`](crate::StrfTimeFormat)
/// but refuses the specifiers that have no inverse (`%j`, `%-j`, `%w`,
/// `%U`, `%W`) at compile time.
///
/// # Examples
///
/// ```
/// use strftime_sql::StrpTimeFormat;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let format = StrpTimeFormat::compile("%-d %b %Y")?;
/// let parsed = format.parse("5 Dec 1992")?;
/// assert_eq!((parsed.year, parsed.month, parsed.day), (1992, 12, 5));
/// assert_eq!((parsed.hour, parsed.minute, parsed.second), (0, 0, 0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StrpTimeFormat {
    literals: Vec<String>,
    specifiers: Vec<Specifier>,
    /// Which specifiers consume a run of ASCII digits. Parallel to
    /// `specifiers`.
    is_numeric: Vec<bool>,
}

impl StrpTimeFormat {
    /// Compile a format string into a `strptime` program.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the format string contains an
    /// unrecognized specifier, ends with a lone `%`, or uses a specifier
    /// the parser cannot invert.
    pub fn compile(format: &str) -> Result<Self, CompileError> {
        let mut program = Program::default();
        parse_format_string(format, &mut program)?;
        let Program {
            literals,
            specifiers,
        } = program;

        let mut is_numeric = Vec::with_capacity(specifiers.len());
        for &specifier in &specifiers {
            match specifier {
                Specifier::WeekdayDecimal
                | Specifier::DayOfYearPadded
                | Specifier::DayOfYear
                | Specifier::WeekNumberSunday
                | Specifier::WeekNumberMonday => {
                    return Err(CompileError::NotImplemented(specifier));
                }
                _ => is_numeric.push(specifier.is_numeric()),
            }
        }

        Ok(Self {
            literals,
            specifiers,
            is_numeric,
        })
    }

    /// The literal fragments of the program. There is always exactly one
    /// more literal than there are specifiers; the parser consumes them
    /// alternately, starting and ending with a literal.
    #[must_use]
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// The specifiers of the program, in input order.
    #[must_use]
    pub fn specifiers(&self) -> &[Specifier] {
        &self.specifiers
    }

    /// Parse an input string against this program.
    ///
    /// Leading and trailing ASCII whitespace is ignored; everything else
    /// must match the program exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the reason and the input
    /// position at which matching failed.
    #[allow(clippy::too_many_lines)]
    pub fn parse(&self, input: &str) -> Result<Parsed, ParseError> {
        let data = input.as_bytes();
        let mut pos = 0;

        while pos < data.len() && data[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let mut result = Parsed::default();
        let mut meridiem = None;

        for i in 0..=self.specifiers.len() {
            let literal = &self.literals[i];
            if !data[pos..].starts_with(literal.as_bytes()) {
                return Err(ParseError::new(
                    ParseErrorKind::LiteralMismatch {
                        expected: literal.clone(),
                    },
                    pos,
                ));
            }
            pos += literal.len();

            if i == self.specifiers.len() {
                break;
            }
            let specifier = self.specifiers[i];

            if self.is_numeric[i] {
                let start = pos;
                let mut number: u64 = 0;
                while pos < data.len() && data[pos].is_ascii_digit() {
                    number = number * 10 + u64::from(data[pos] - b'0');
                    if number > 1_000_000 {
                        return Err(ParseError::new(ParseErrorKind::NumberOutOfRange, start));
                    }
                    pos += 1;
                }
                if pos == start {
                    return Err(ParseError::new(ParseErrorKind::ExpectedNumber, pos));
                }
                store_number(specifier, number, &mut result)
                    .map_err(|field| ParseError::new(ParseErrorKind::OutOfRange { field }, start))?;
            } else {
                match specifier {
                    Specifier::Meridian => {
                        if data.len() < pos + 2 || data[pos + 1].to_ascii_lowercase() != b'm' {
                            return Err(ParseError::new(ParseErrorKind::ExpectedMeridiem, pos));
                        }
                        meridiem = match data[pos].to_ascii_lowercase() {
                            b'a' => Some(Meridiem::Am),
                            b'p' => Some(Meridiem::Pm),
                            _ => {
                                return Err(ParseError::new(ParseErrorKind::ExpectedMeridiem, pos));
                            }
                        };
                        pos += 2;
                    }
                    Specifier::AbbreviatedWeekdayName | Specifier::FullWeekdayName => {
                        let abbreviated = specifier == Specifier::AbbreviatedWeekdayName;
                        // The weekday constrains nothing; match it and
                        // move on.
                        match match_name(data, pos, &DAYS, abbreviated) {
                            Some((_, len)) => pos += len,
                            None => {
                                return Err(ParseError::new(
                                    ParseErrorKind::ExpectedWeekdayName { abbreviated },
                                    pos,
                                ));
                            }
                        }
                    }
                    Specifier::AbbreviatedMonthName | Specifier::FullMonthName => {
                        let abbreviated = specifier == Specifier::AbbreviatedMonthName;
                        match match_name(data, pos, &MONTHS, abbreviated) {
                            Some((index, len)) => {
                                result.month = index as u8 + 1;
                                pos += len;
                            }
                            None => {
                                return Err(ParseError::new(
                                    ParseErrorKind::ExpectedMonthName { abbreviated },
                                    pos,
                                ));
                            }
                        }
                    }
                    // Reserved for future time zone support; consumes no
                    // input.
                    Specifier::UtcOffset | Specifier::TimeZoneName => {}
                    _ => unreachable!("numeric specifiers are handled above"),
                }
            }
        }

        while pos < data.len() && data[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < data.len() {
            return Err(ParseError::new(ParseErrorKind::TrailingCharacters, pos));
        }

        match meridiem {
            Some(Meridiem::Am) => {
                if result.hour == 12 {
                    result.hour = 0;
                }
            }
            Some(Meridiem::Pm) => {
                if result.hour != 12 {
                    result.hour += 12;
                }
            }
            None => {}
        }
        result.meridiem = meridiem;

        Ok(result)
    }
}

/// Validate a number against its specifier's domain and store it into the
/// field it targets. A violated domain reports the offending [`Field`].
fn store_number(specifier: Specifier, number: u64, result: &mut Parsed) -> Result<(), Field> {
    match specifier {
        Specifier::DayOfMonthPadded | Specifier::DayOfMonth => {
            if !(1..=31).contains(&number) {
                return Err(Field::Day);
            }
            result.day = number as u8;
        }
        Specifier::MonthPadded | Specifier::Month => {
            if !(1..=12).contains(&number) {
                return Err(Field::Month);
            }
            result.month = number as u8;
        }
        Specifier::YearWithoutCenturyPadded | Specifier::YearWithoutCentury => {
            if number > 99 {
                return Err(Field::Year);
            }
            // Two-digit years pivot at 69, like Python's strptime.
            result.year = if number >= 69 {
                1900 + number as i32
            } else {
                2000 + number as i32
            };
        }
        Specifier::Year => {
            result.year = number as i32;
        }
        Specifier::Hour24Padded | Specifier::Hour24 => {
            if number > 23 {
                return Err(Field::Hour24);
            }
            result.hour = number as u8;
        }
        Specifier::Hour12Padded | Specifier::Hour12 => {
            if !(1..=12).contains(&number) {
                return Err(Field::Hour12);
            }
            // Resolved onto the 24-hour clock once the meridiem is known.
            result.hour = number as u8;
        }
        Specifier::MinutePadded | Specifier::Minute => {
            if number > 59 {
                return Err(Field::Minute);
            }
            result.minute = number as u8;
        }
        Specifier::SecondPadded | Specifier::Second => {
            if number > 59 {
                return Err(Field::Second);
            }
            result.second = number as u8;
        }
        Specifier::Microsecond => {
            if number > 999_999 {
                return Err(Field::Microseconds);
            }
            result.microsecond = number as u32;
        }
        _ => unreachable!("non-numeric specifiers are handled by the caller"),
    }
    Ok(())
}

/// Case-insensitively match one of the English names at `pos`, returning
/// the table index and the number of bytes consumed.
fn match_name(
    data: &[u8],
    pos: usize,
    names: &[&str],
    abbreviated: bool,
) -> Option<(usize, usize)> {
    for (index, name) in names.iter().enumerate() {
        let name = if abbreviated {
            &name.as_bytes()[..3]
        } else {
            name.as_bytes()
        };
        if data.len() - pos >= name.len() && data[pos..pos + name.len()].eq_ignore_ascii_case(name)
        {
            return Some((index, name.len()));
        }
    }
    None
}
