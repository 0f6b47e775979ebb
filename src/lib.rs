#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(unknown_lints)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]

/*!
This crate provides the `strftime` and `strptime` scalar functions of a SQL
execution engine: a bidirectional engine that formats dates and timestamps
into strings according to a printf-style format specifier, and parses such
strings back into calendar fields using the same specifier language.

A format string is compiled once, at plan time, into an executable program
of literal fragments interleaved with typed specifiers. The compiled
program is immutable and can be shared across rows and threads. The
formatting side predicts the exact output length before writing a single
byte; the parsing side consumes its input left to right and reports errors
with the exact input position at which they occurred.

The directives begin with a percent `%` character. Any text not listed as a
directive is passed through to the output string on format, and must match
the input exactly on parse.

## Specifiers

| Specifier  | Example      | Description                                                            |
|------------|--------------|------------------------------------------------------------------------|
|    `%a`    | `Sun`        | Abbreviated weekday name, using the first 3 letters.                   |
|    `%A`    | `Sunday`     | Full weekday name.                                                     |
|    `%w`    | `0`          | Day of the week from Sunday in `0..=6`.                                |
|    `%d`    | `01`         | Day of the month in `01..=31`, zero-padded to 2 digits.                |
|    `%-d`   | `1`          | Day of the month in `1..=31`, no padding.                              |
| `%b`, `%h` | `Jan`        | Abbreviated month name, using the first 3 letters.                     |
|    `%B`    | `January`    | Full month name.                                                       |
|    `%m`    | `01`         | Month of the year in `01..=12`, zero-padded to 2 digits.               |
|    `%-m`   | `1`          | Month of the year in `1..=12`, no padding.                             |
|    `%y`    | `92`         | `Year % 100` in `00..=99`, zero-padded to 2 digits.                    |
|    `%-y`   | `92`         | `Year % 100` in `0..=99`, no padding.                                  |
|    `%Y`    | `1992`       | Year with century, zero-padded to 4 digits for years in `0..=9999`.    |
|    `%H`    | `00`         | Hour of the day (24-hour clock) in `00..=23`, zero-padded to 2 digits. |
|    `%-H`   | `0`          | Hour of the day (24-hour clock) in `0..=23`, no padding.               |
|    `%I`    | `01`         | Hour of the day (12-hour clock) in `01..=12`, zero-padded to 2 digits. |
|    `%-I`   | `1`          | Hour of the day (12-hour clock) in `1..=12`, no padding.               |
|    `%p`    | `AM`         | Meridiem indicator (`"AM"` or `"PM"`).                                 |
|    `%M`    | `00`         | Minute of the hour in `00..=59`, zero-padded to 2 digits.              |
|    `%-M`   | `0`          | Minute of the hour in `0..=59`, no padding.                            |
|    `%S`    | `00`         | Second of the minute in `00..=59`, zero-padded to 2 digits.            |
|    `%-S`   | `0`          | Second of the minute in `0..=59`, no padding.                          |
|    `%f`    | `123456`     | Microseconds in `000000..=999999`, zero-padded to 6 digits.            |
|    `%z`    |              | UTC offset; formats as an empty string, consumes no input.             |
|    `%Z`    |              | Time zone name; formats as an empty string, consumes no input.         |
|    `%j`    | `001`        | Day of the year in `001..=366`, zero-padded to 3 digits.               |
|    `%-j`   | `1`          | Day of the year in `1..=366`, no padding.                              |
|    `%U`    | `00`         | Week number in `00..=53`, week 1 starts with the first Sunday.         |
|    `%W`    | `00`         | Week number in `00..=53`, week 1 starts with the first Monday.         |
|    `%%`    | `%`          | Literal `'%'` character.                                               |
|    `%c`    | `1992-03-02 07:08:09` | Date and time, equivalent to `"%Y-%m-%d %H:%M:%S"`.           |
|    `%x`    | `1992-03-02` | Date, equivalent to `"%Y-%m-%d"`.                                      |
|    `%X`    | `07:08:09`   | Time, equivalent to `"%H:%M:%S"`.                                      |

The composite specifiers `%c`, `%x` and `%X` are expanded at compile time
into their equivalent patterns; a compiled program never contains them.

Week-number and day-of-year specifiers (`%j`, `%-j`, `%w`, `%U`, `%W`)
have no inverse and are rejected when compiling a parse program.

## Examples

```
use strftime_sql::{StrfTimeFormat, StrpTimeFormat, Time};
# include!("mock.rs.in");
# fn main() -> Result<(), Box<dyn std::error::Error>> {
// 1992-03-02 was a Monday, the 62nd day of a leap year.
let time = MockTime::new(1992, 3, 2, 7, 8, 9, 0, 1, 62);

let format = StrfTimeFormat::compile("%Y-%m-%d %H:%M:%S")?;
assert_eq!(format.length(&time), 19);
assert_eq!(format.format(&time), "1992-03-02 07:08:09");

let format = StrpTimeFormat::compile("%Y-%m-%d %H:%M:%S")?;
let parsed = format.parse("1992-03-02 07:08:09")?;
assert_eq!((parsed.year, parsed.month, parsed.day), (1992, 3, 2));
assert_eq!((parsed.hour, parsed.minute, parsed.second), (7, 8, 9));
# Ok(())
# }
```
*/

mod assert;
mod format;
pub mod scalar;
mod strftime;
mod strptime;
mod utils;
mod week;
mod write;

#[cfg(test)]
mod tests;

use core::fmt;

pub use crate::format::{CompileError, Specifier};
pub use crate::strftime::StrfTimeFormat;
pub use crate::strptime::{Field, Meridiem, ParseError, ParseErrorKind, Parsed, StrpTimeFormat};

/// Error type returned by the buffer-oriented formatting entry points.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// The provided output buffer is too small for the formatted string.
    ///
    /// Callers sizing their buffer with [`StrfTimeFormat::length`] never
    /// see this error.
    WriteZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WriteZero => write!(f, "failed to write the whole buffer"),
        }
    }
}

impl std::error::Error for Error {}

/// Calendar and clock fields the engine reads from a host date or
/// timestamp value.
///
/// This is the narrow contract to the surrounding date/time library: the
/// engine never constructs host values and never performs calendar
/// arithmetic beyond week numbers, which it derives from
/// [`day_of_week`](Time::day_of_week) and
/// [`day_of_year`](Time::day_of_year).
///
/// Implementations must uphold the documented ranges; the formatter
/// assumes them. A host `DATE` value implements the clock methods as zero.
pub trait Time {
    /// Returns the year (including the century, negative for BC years).
    fn year(&self) -> i32;
    /// Returns the month of the year in `1..=12`.
    fn month(&self) -> u8;
    /// Returns the day of the month in `1..=31`.
    fn day(&self) -> u8;
    /// Returns the hour of the day in `0..=23`.
    fn hour(&self) -> u8;
    /// Returns the minute of the hour in `0..=59`.
    fn minute(&self) -> u8;
    /// Returns the second of the minute in `0..=59`.
    fn second(&self) -> u8;
    /// Returns the number of microseconds in `0..=999_999`.
    fn microsecond(&self) -> u32;
    /// Returns the day of the week in `0..=6`, with `Sunday == 0` (the
    /// ISO day of the week modulo 7).
    fn day_of_week(&self) -> u8;
    /// Returns the day of the year in `1..=366`.
    fn day_of_year(&self) -> u16;
}

// Check that the Time trait is object-safe
const _: Option<&dyn Time> = None;
