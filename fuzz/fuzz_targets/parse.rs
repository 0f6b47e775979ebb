#![no_main]

use libfuzzer_sys::fuzz_target;
use strftime_sql::StrpTimeFormat;

fuzz_target!(|data: (&str, &str)| {
    let (format, input) = data;
    if let Ok(program) = StrpTimeFormat::compile(format) {
        let _ = program.parse(input);
    }
});
