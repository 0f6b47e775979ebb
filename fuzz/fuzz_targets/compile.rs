#![no_main]

use libfuzzer_sys::fuzz_target;
use strftime_sql::{StrfTimeFormat, StrpTimeFormat};

fuzz_target!(|format: &str| {
    let _ = StrfTimeFormat::compile(format);
    let _ = StrpTimeFormat::compile(format);
});
