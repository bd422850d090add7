#![no_main]
use cascadelog::Level;
use cascadelog::cleanup::{multi_file_date, single_file_date};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Cleanup runs these on every file in the log directory
    let _ = single_file_date(data);
    let _ = multi_file_date(data);
    let _ = Level::parse(data);
});
