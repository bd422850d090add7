#![no_main]
use cascadelog::Value;
use cascadelog::fmt::sprintf;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Must not panic on any format string, whatever the argument kinds
    let args: Vec<Value> = vec![
        (-42).into(),
        7_u64.into(),
        1.5e300.into(),
        f64::NAN.into(),
        "text".into(),
        true.into(),
        vec![1, 2, 3].into(),
    ];
    let _ = sprintf(data, &args);
    let _ = sprintf(data, &[]);
});
