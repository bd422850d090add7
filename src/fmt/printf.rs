//! printf-style substitution over [`Value`] arguments.
//!
//! Supports the verbs `%v %s %q %d %x %X %o %b %c %t %f %F %e %E %g %G` and
//! `%%`, the flags `- + space 0 #`, a width and a `.precision`. Problems never
//! fail the call; they are rendered inline instead:
//! `%!d(string=abc)` for a verb/kind mismatch, `%!s(MISSING)` when arguments
//! run out and `%!(EXTRA int=1)` for leftovers. A width or precision above
//! one million is reported as `%!(BADWIDTH)` or `%!(BADPREC)` and ignored.

use crate::value::{Sequence, Value};
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

/// Largest width or precision a directive may carry.
const MAX_WIDTH: usize = 1_000_000;

/// Largest precision `std::fmt` accepts; digits past it are all zeros for an `f64`.
const MAX_FMT_PRECISION: usize = u16::MAX as usize;

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

/// Substitutes `args` into `format`.
#[must_use]
pub fn sprintf(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len() + 8 * args.len());
    let mut used = 0;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let directive = parse_directive(&mut chars);
        if directive.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if directive.bad_precision {
            out.push_str("%!(BADPREC)");
        }
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        let Some(arg) = args.get(used) else {
            let _ = write!(out, "%!{verb}(MISSING)");
            continue;
        };
        used += 1;

        match render(verb, directive, arg) {
            Some((body, numeric)) => pad(&mut out, &body, directive, numeric),
            None => {
                let _ = write!(out, "%!{verb}({}={arg})", arg.kind_name());
            }
        }
    }

    if used < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[used..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={arg}", arg.kind_name());
        }
        out.push(')');
    }
    out
}

/// Every argument in its `%v` form, space separated, newline terminated.
#[must_use]
pub fn sprintln(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{arg}");
    }
    out.push('\n');
    out
}

/// Shortest text that round-trips, switching to exponent form for very
/// large or very small magnitudes (`1e+21`, `1e-05`).
#[must_use]
pub fn shortest(f: f64) -> String {
    if let Some(s) = non_finite(f) {
        return s.to_string();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e21).contains(&abs) {
        exponent_form(&format!("{f:e}"))
    } else {
        format!("{f}")
    }
}

/// Fixed-point text with `precision` digits after the decimal point.
#[must_use]
pub fn fixed(f: f64, precision: usize) -> String {
    if let Some(s) = non_finite(f) {
        return s.to_string();
    }
    let shown = precision.min(MAX_FMT_PRECISION);
    let mut s = format!("{f:.shown$}");
    s.extend(std::iter::repeat_n('0', precision - shown));
    s
}

fn non_finite(f: f64) -> Option<&'static str> {
    if f.is_nan() {
        Some("NaN")
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            Some("+Inf")
        } else {
            Some("-Inf")
        }
    } else {
        None
    }
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Directive {
    let mut d = Directive::default();
    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => d.minus = true,
            '+' => d.plus = true,
            ' ' => d.space = true,
            '0' => d.zero = true,
            '#' => d.sharp = true,
            _ => break,
        }
        chars.next();
    }
    match digits(chars) {
        Some(width) if width > MAX_WIDTH => d.bad_width = true,
        width => d.width = width,
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        match digits(chars).unwrap_or(0) {
            precision if precision > MAX_WIDTH => d.bad_precision = true,
            precision => d.precision = Some(precision),
        }
    }
    d
}

/// Reads a run of decimal digits. Values past [`MAX_WIDTH`] stop growing but
/// the remaining digits are still consumed.
fn digits(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        let current = value.unwrap_or(0);
        value = Some(if current > MAX_WIDTH {
            current
        } else {
            current * 10 + d as usize
        });
        chars.next();
    }
    value
}

/// Returns the rendered body and whether zero padding applies to it.
fn render(verb: char, d: Directive, arg: &Value) -> Option<(String, bool)> {
    let rendered = match (verb, arg) {
        ('v' | 'd', Value::Int(n)) => (signed(n.to_string(), d), true),
        ('v' | 'd', Value::Uint(n)) => (signed(n.to_string(), d), true),
        ('v', Value::Float(f)) => (signed(shortest(*f), d), true),
        ('v' | 's', Value::Str(s)) => (truncate(s, d.precision), false),
        ('v', _) | ('s', Value::Time(_) | Value::Duration(_) | Value::Other(_) | Value::Seq(_)) => {
            (arg.to_string(), false)
        }
        ('d', Value::Seq(Sequence::Int(_) | Sequence::Uint(_))) => (arg.to_string(), false),
        ('q', Value::Str(s)) => (format!("{s:?}"), false),
        ('t', Value::Bool(b)) => (b.to_string(), false),
        ('x' | 'X' | 'o' | 'b', Value::Int(n)) => {
            (radix(verb, n.is_negative(), n.unsigned_abs(), d), true)
        }
        ('x' | 'X' | 'o' | 'b', Value::Uint(n)) => (radix(verb, false, *n, d), true),
        ('x', Value::Str(s)) => (s.bytes().map(|b| format!("{b:02x}")).collect(), false),
        ('X', Value::Str(s)) => (s.bytes().map(|b| format!("{b:02X}")).collect(), false),
        ('c', Value::Int(n)) => (to_char(u32::try_from(*n).ok()), false),
        ('c', Value::Uint(n)) => (to_char(u32::try_from(*n).ok()), false),
        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Value::Float(f)) => {
            (signed(float_verb(verb, *f, d.precision), d), true)
        }
        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Value::Complex(c)) => {
            let re = float_verb(verb, c.re, d.precision);
            let im = float_verb(verb, c.im, d.precision);
            let im = if im.starts_with(['-', '+']) {
                im
            } else {
                format!("+{im}")
            };
            (format!("({re}{im}i)"), false)
        }
        _ => return None,
    };
    Some(rendered)
}

fn signed(s: String, d: Directive) -> String {
    if s.starts_with(['-', '+']) {
        s
    } else if d.plus {
        format!("+{s}")
    } else if d.space {
        format!(" {s}")
    } else {
        s
    }
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    precision.map_or_else(|| s.to_string(), |p| s.chars().take(p).collect())
}

fn to_char(code: Option<u32>) -> String {
    code.and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

fn radix(verb: char, negative: bool, magnitude: u64, d: Directive) -> String {
    let (digits, prefix) = match verb {
        'x' => (format!("{magnitude:x}"), "0x"),
        'X' => (format!("{magnitude:X}"), "0X"),
        'o' => (format!("{magnitude:o}"), "0"),
        _ => (format!("{magnitude:b}"), "0b"),
    };
    let prefix = if d.sharp { prefix } else { "" };
    let sign = if negative {
        "-"
    } else if d.plus {
        "+"
    } else {
        ""
    };
    format!("{sign}{prefix}{digits}")
}

fn float_verb(verb: char, f: f64, precision: Option<usize>) -> String {
    if let Some(s) = non_finite(f) {
        return s.to_string();
    }
    match verb {
        'f' | 'F' => fixed(f, precision.unwrap_or(6)),
        'e' => scientific(f, precision.unwrap_or(6)),
        'E' => scientific(f, precision.unwrap_or(6)).to_uppercase(),
        'G' => general(f, precision).to_uppercase(),
        _ => general(f, precision),
    }
}

fn scientific(f: f64, precision: usize) -> String {
    let shown = precision.min(MAX_FMT_PRECISION);
    let s = exponent_form(&format!("{f:.shown$e}"));
    match s.split_once('e') {
        Some((mantissa, exponent)) if precision > shown => {
            let zeros = "0".repeat(precision - shown);
            format!("{mantissa}{zeros}e{exponent}")
        }
        _ => s,
    }
}

/// `%g`: shortest form without a precision, otherwise `precision` significant
/// digits in whichever of fixed or exponent form is more compact.
fn general(f: f64, precision: Option<usize>) -> String {
    let Some(p) = precision else {
        return shortest(f);
    };
    let p = p.max(1);
    if f == 0.0 {
        return "0".to_string();
    }
    #[allow(clippy::cast_possible_truncation)]
    let exp = f.abs().log10().floor() as i32;
    let p_signed = i32::try_from(p).unwrap_or(i32::MAX);
    if exp < -4 || exp >= p_signed {
        let s = scientific(f, p - 1);
        match s.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_zeros(mantissa)),
            None => s,
        }
    } else {
        let decimals = usize::try_from(p_signed - 1 - exp)
            .unwrap_or(0)
            .min(MAX_FMT_PRECISION);
        trim_zeros(&format!("{f:.decimals$}"))
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Rewrites Rust's `1.5e3` exponent into the signed two-digit `1.5e+03` form.
fn exponent_form(s: &str) -> String {
    let Some((mantissa, exponent)) = s.split_once('e') else {
        return s.to_string();
    };
    let (sign, digits) = exponent
        .strip_prefix('-')
        .map_or(("+", exponent), |rest| ("-", rest));
    format!("{mantissa}e{sign}{digits:0>2}")
}

fn pad(out: &mut String, body: &str, d: Directive, numeric: bool) {
    let len = body.chars().count();
    let Some(fill) = d.width.and_then(|w| w.checked_sub(len)).filter(|f| *f > 0) else {
        out.push_str(body);
        return;
    };

    if d.minus {
        out.push_str(body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if d.zero && numeric {
        let split = usize::from(body.starts_with(['-', '+', ' ']));
        out.push_str(&body[..split]);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(&body[split..]);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(body);
    }
}
