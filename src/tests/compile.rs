use crate::format::Specifier;
use crate::{CompileError, StrfTimeFormat, StrpTimeFormat};

fn compile(format: &str) -> StrfTimeFormat {
    StrfTimeFormat::compile(format).unwrap()
}

fn check_error(format: &str, expected: &CompileError) {
    assert_eq!(StrfTimeFormat::compile(format).unwrap_err(), *expected);
    assert_eq!(StrpTimeFormat::compile(format).unwrap_err(), *expected);
}

#[test]
fn test_compile_plain_text() {
    let program = compile("hello world");
    assert_eq!(program.literals(), ["hello world"]);
    assert!(program.specifiers().is_empty());

    let program = compile("");
    assert_eq!(program.literals(), [""]);
    assert!(program.specifiers().is_empty());
}

#[test]
fn test_compile_interleaves_literals_and_specifiers() {
    let program = compile("%Y-%m-%d");
    assert_eq!(program.literals(), ["", "-", "-", ""]);
    assert_eq!(
        program.specifiers(),
        [
            Specifier::Year,
            Specifier::MonthPadded,
            Specifier::DayOfMonthPadded
        ]
    );
}

#[test]
fn test_compile_literal_framing_invariant() {
    for format in [
        "",
        "plain",
        "%Y",
        "%Y-%m-%d %H:%M:%S",
        "x%cy%Xz",
        "100%% %-d",
        "%a, %-d %B %Y",
    ] {
        let program = compile(format);
        assert_eq!(program.literals().len(), program.specifiers().len() + 1);

        let parser = StrpTimeFormat::compile("%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parser.literals().len(), parser.specifiers().len() + 1);
    }
}

#[test]
fn test_compile_percent_escape_folds_into_literal() {
    let program = compile("100%%");
    assert_eq!(program.literals(), ["100%"]);
    assert!(program.specifiers().is_empty());

    let program = compile("%%%d%%");
    assert_eq!(program.literals(), ["%", "%"]);
    assert_eq!(program.specifiers(), [Specifier::DayOfMonthPadded]);
}

#[test]
fn test_compile_unpadded_specifiers() {
    let program = compile("%-d %-m %-y %-H %-I %-M %-S %-j");
    assert_eq!(
        program.specifiers(),
        [
            Specifier::DayOfMonth,
            Specifier::Month,
            Specifier::YearWithoutCentury,
            Specifier::Hour24,
            Specifier::Hour12,
            Specifier::Minute,
            Specifier::Second,
            Specifier::DayOfYear
        ]
    );
}

#[test]
fn test_compile_month_name_abbr_aliases() {
    assert_eq!(
        compile("%b").specifiers(),
        compile("%h").specifiers()
    );
}

#[test]
fn test_compile_composite_expansion() {
    let composite = compile("X%cY");
    let expanded = compile("X%Y-%m-%d %H:%M:%SY");
    assert_eq!(composite.specifiers(), expanded.specifiers());
    assert_eq!(composite.literals(), expanded.literals());

    let composite = compile("X%xY");
    let expanded = compile("X%Y-%m-%dY");
    assert_eq!(composite.specifiers(), expanded.specifiers());
    assert_eq!(composite.literals(), expanded.literals());

    let composite = compile("X%XY");
    let expanded = compile("X%H:%M:%SY");
    assert_eq!(composite.specifiers(), expanded.specifiers());
    assert_eq!(composite.literals(), expanded.literals());
}

#[test]
fn test_compile_nested_composites() {
    let program = compile("%x %X");
    assert_eq!(program.literals(), ["", "-", "-", " ", ":", ":", ""]);
    assert_eq!(
        program.specifiers(),
        [
            Specifier::Year,
            Specifier::MonthPadded,
            Specifier::DayOfMonthPadded,
            Specifier::Hour24Padded,
            Specifier::MinutePadded,
            Specifier::SecondPadded
        ]
    );
}

#[test]
fn test_compile_unrecognized_specifier() {
    check_error(
        "%q",
        &CompileError::UnrecognizedSpecifier {
            specifier: 'q',
            unpadded: false,
        },
    );
    check_error(
        "day: %e",
        &CompileError::UnrecognizedSpecifier {
            specifier: 'e',
            unpadded: false,
        },
    );
    check_error(
        "%-q",
        &CompileError::UnrecognizedSpecifier {
            specifier: 'q',
            unpadded: true,
        },
    );
    // `%-Y` is not a recognized unpadded specifier.
    check_error(
        "%-Y",
        &CompileError::UnrecognizedSpecifier {
            specifier: 'Y',
            unpadded: true,
        },
    );
    // Unknown specifiers keep their original spelling, even multi-byte.
    check_error(
        "%\u{e9}",
        &CompileError::UnrecognizedSpecifier {
            specifier: '\u{e9}',
            unpadded: false,
        },
    );
}

#[test]
fn test_compile_trailing_percent() {
    check_error("abc%", &CompileError::TrailingFormatCharacter);
    check_error("%", &CompileError::TrailingFormatCharacter);

    // A dangling `%-` is reported as the unrecognized `-` specifier.
    check_error(
        "%-",
        &CompileError::UnrecognizedSpecifier {
            specifier: '-',
            unpadded: false,
        },
    );
}

#[test]
fn test_strptime_rejects_non_invertible_specifiers() {
    for (format, specifier) in [
        ("%j", Specifier::DayOfYearPadded),
        ("%-j", Specifier::DayOfYear),
        ("%w", Specifier::WeekdayDecimal),
        ("%U", Specifier::WeekNumberSunday),
        ("%W", Specifier::WeekNumberMonday),
    ] {
        assert!(StrfTimeFormat::compile(format).is_ok());
        assert_eq!(
            StrpTimeFormat::compile(format).unwrap_err(),
            CompileError::NotImplemented(specifier)
        );
    }
}

#[test]
fn test_compile_requires_date() {
    for format in ["%a", "%A", "%w", "%j", "%-j", "%U", "%W", "%a %H:%M"] {
        assert!(compile(format).requires_date(), "{}", format);
    }
    // The composites expand to pure field specifiers.
    for format in ["", "plain", "%Y-%m-%d", "%H:%M:%S", "%f %p %z %Z", "x%cy"] {
        assert!(!compile(format).requires_date(), "{}", format);
    }
}
