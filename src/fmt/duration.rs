//! Short-form duration text: `0s`, `750ns`, `1.5µs`, `250ms`, `1.5s`, `2m0s`, `1h30m0s`.

use std::time::Duration;

const MICRO: u128 = 1_000;
const MILLI: u128 = 1_000_000;
const SECOND: u128 = 1_000_000_000;

/// Renders `d` in the largest unit that keeps the integer part non-zero,
/// switching to `h`/`m`/`s` groups from one second upwards.
#[must_use]
pub fn format(d: Duration) -> String {
    let nanos = d.as_nanos();
    match nanos {
        0 => "0s".to_string(),
        n if n < MICRO => format!("{n}ns"),
        n if n < MILLI => format!("{}µs", fraction(n, MICRO)),
        n if n < SECOND => format!("{}ms", fraction(n, MILLI)),
        _ => {
            let total = d.as_secs();
            let hours = total / 3600;
            let minutes = (total % 3600) / 60;
            let seconds = fraction(
                u128::from(total % 60) * SECOND + u128::from(d.subsec_nanos()),
                SECOND,
            );
            if hours > 0 {
                format!("{hours}h{minutes}m{seconds}s")
            } else if minutes > 0 {
                format!("{minutes}m{seconds}s")
            } else {
                format!("{seconds}s")
            }
        }
    }
}

/// `value / unit` as decimal text without trailing zeros in the fraction.
fn fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{rem:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
