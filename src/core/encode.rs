//! Scalar value encoders shared by the event builder

use std::io::Write as _;
use std::time::Duration;

/// Append a float as minimal round-trip decimal text, never in exponent form.
///
/// JSON has no spelling for non-finite values, so they are written as the
/// strings `"NaN"`, `"+Inf"` and `"-Inf"`.
#[inline]
pub fn append_f64(buf: &mut Vec<u8>, f: f64) {
    if f.is_finite() {
        let _ = write!(buf, "{}", f);
    } else if f.is_nan() {
        buf.extend_from_slice(b"\"NaN\"");
    } else if f > 0.0 {
        buf.extend_from_slice(b"\"+Inf\"");
    } else {
        buf.extend_from_slice(b"\"-Inf\"");
    }
}

#[inline]
pub fn append_i64(buf: &mut Vec<u8>, i: i64) {
    let _ = write!(buf, "{}", i);
}

#[inline]
pub fn append_u64(buf: &mut Vec<u8>, u: u64) {
    let _ = write!(buf, "{}", u);
}

/// Signed integers that widen to `i64` for encoding.
pub trait SignedInt: Copy {
    fn to_i64(self) -> i64;
}

/// Unsigned integers that widen to `u64` for encoding.
pub trait UnsignedInt: Copy {
    fn to_u64(self) -> u64;
}

macro_rules! widen {
    ($trait:ident, $method:ident, $wide:ty: $($t:ty),+) => {
        $(
            impl $trait for $t {
                #[inline]
                fn $method(self) -> $wide {
                    self as $wide
                }
            }
        )+
    };
}

widen!(SignedInt, to_i64, i64: i8, i16, i32, i64, isize);
widen!(UnsignedInt, to_u64, u64: u8, u16, u32, u64, usize);

#[inline]
pub fn append_bool(buf: &mut Vec<u8>, b: bool) {
    buf.extend_from_slice(if b { b"true" } else { b"false" });
}

/// Append a duration as a quoted, unit-suffixed string such as `"1h2m3.5s"`.
///
/// Durations under a second use the largest fitting sub-second unit
/// (`"1.5ms"`, `"250µs"`, `"42ns"`), zero is `"0s"`. Fractions never carry
/// trailing zeros.
pub fn append_duration(buf: &mut Vec<u8>, d: Duration) {
    buf.push(b'"');
    let nanos = d.as_nanos();

    if nanos == 0 {
        buf.extend_from_slice(b"0s");
    } else if nanos < 1_000_000_000 {
        let (prec, unit): (u32, &[u8]) = if nanos < 1_000 {
            (0, &b"ns"[..])
        } else if nanos < 1_000_000 {
            (3, "µs".as_bytes())
        } else {
            (6, &b"ms"[..])
        };
        let scale = 10u128.pow(prec);
        let _ = write!(buf, "{}", nanos / scale);
        append_fraction(buf, nanos % scale, prec);
        buf.extend_from_slice(unit);
    } else {
        let secs = nanos / 1_000_000_000;
        let hours = secs / 3600;
        let minutes = secs / 60;
        if hours > 0 {
            let _ = write!(buf, "{}h{}m", hours, minutes % 60);
        } else if minutes > 0 {
            let _ = write!(buf, "{}m", minutes);
        }
        let _ = write!(buf, "{}", secs % 60);
        append_fraction(buf, nanos % 1_000_000_000, 9);
        buf.push(b's');
    }

    buf.push(b'"');
}

/// Append `.ddd` for `frac` out of `10^prec`, trailing zeros trimmed.
fn append_fraction(buf: &mut Vec<u8>, mut frac: u128, mut prec: u32) {
    if frac == 0 {
        return;
    }
    while frac % 10 == 0 {
        frac /= 10;
        prec -= 1;
    }
    let _ = write!(buf, ".{:0width$}", frac, width = prec as usize);
}
