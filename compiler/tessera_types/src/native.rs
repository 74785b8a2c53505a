//! Host scalar representations of the native-embedded kinds.
//!
//! Every native value travels through [`TypedValue`](crate::TypedValue) as
//! 64 raw bits. [`NativeScalar`] converts between a host scalar and those
//! bits, and knows its own literal syntax. The refinements below it describe
//! what the numeric and signed kinds can additionally do:
//!
//! - [`NumericScalar`]: converts through [`Wide`] for casts and mixed comparisons
//! - [`ArithmeticScalar`]: the four operations plus remainder
//! - [`SignedScalar`]: unary minus
//!
//! Integer arithmetic wraps; division and remainder report a zero divisor
//! as `None` instead of panicking.

use std::cmp::Ordering;
use std::fmt::{self, Write};

/// Reinterpret a signed 64-bit value as raw bits.
#[inline]
pub(crate) const fn bits_of_i64(value: i64) -> u64 {
    u64::from_ne_bytes(value.to_ne_bytes())
}

/// Reinterpret raw bits as a signed 64-bit value.
#[inline]
pub(crate) const fn i64_of_bits(bits: u64) -> i64 {
    i64::from_ne_bytes(bits.to_ne_bytes())
}

/// A host scalar that can live in the inline bits of a value.
pub trait NativeScalar: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Host type name, recorded in the trait table.
    const HOST_NAME: &'static str;

    fn to_bits(self) -> u64;

    fn from_bits(bits: u64) -> Self;

    /// Parse the literal syntax of this scalar. Returns `None` on any
    /// malformed input.
    fn parse_literal(text: &str) -> Option<Self>;

    /// Append the literal syntax of this scalar to `out`.
    fn write_literal(self, out: &mut String);
}

/// Common widened form used by numeric casts and mixed comparisons.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Wide {
    Int(i64),
    Float(f64),
}

impl Wide {
    /// The value as a double.
    #[allow(
        clippy::cast_precision_loss,
        reason = "mixed int/float comparisons are defined in double precision"
    )]
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Wide::Int(i) => i as f64,
            Wide::Float(f) => f,
        }
    }

    /// Compare two widened values. Integers compare exactly; anything
    /// involving a float compares in double precision (NaN is unordered).
    #[inline]
    pub fn compare(self, other: Wide) -> Option<Ordering> {
        match (self, other) {
            (Wide::Int(a), Wide::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Scalars of the numeric super category.
pub trait NumericScalar: NativeScalar {
    fn widen(self) -> Wide;

    /// Convert from the widened form, saturating at the bounds of `Self`.
    fn narrow(wide: Wide) -> Self;
}

/// Scalars that support arithmetic.
pub trait ArithmeticScalar: NumericScalar {
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    /// `None` for an integer zero divisor.
    fn div(self, rhs: Self) -> Option<Self>;
    /// `None` for an integer zero divisor.
    fn rem(self, rhs: Self) -> Option<Self>;
}

/// Scalars with a unary minus.
pub trait SignedScalar: NativeScalar {
    fn negate(self) -> Self;
}

// === Bool ===

impl NativeScalar for bool {
    const HOST_NAME: &'static str = "bool";

    #[inline]
    fn to_bits(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits != 0
    }

    fn parse_literal(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        }
    }

    fn write_literal(self, out: &mut String) {
        out.push_str(if self { "true" } else { "false" });
    }
}

impl NumericScalar for bool {
    #[inline]
    fn widen(self) -> Wide {
        Wide::Int(i64::from(self))
    }

    #[inline]
    fn narrow(wide: Wide) -> Self {
        match wide {
            Wide::Int(i) => i != 0,
            Wide::Float(f) => f != 0.0,
        }
    }
}

// === Integers ===

impl NativeScalar for i32 {
    const HOST_NAME: &'static str = "i32";

    #[inline]
    fn to_bits(self) -> u64 {
        bits_of_i64(i64::from(self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "inline bits of an Int value were produced from an i32"
    )]
    #[inline]
    fn from_bits(bits: u64) -> Self {
        i64_of_bits(bits) as i32
    }

    fn parse_literal(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn write_literal(self, out: &mut String) {
        let _ = write!(out, "{self}");
    }
}

impl NumericScalar for i32 {
    #[inline]
    fn widen(self) -> Wide {
        Wide::Int(i64::from(self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to the i32 range first; float casts saturate"
    )]
    #[inline]
    fn narrow(wide: Wide) -> Self {
        match wide {
            Wide::Int(i) => i.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            Wide::Float(f) => f as i32,
        }
    }
}

impl ArithmeticScalar for i32 {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        (rhs != 0).then(|| self.wrapping_div(rhs))
    }

    #[inline]
    fn rem(self, rhs: Self) -> Option<Self> {
        (rhs != 0).then(|| self.wrapping_rem(rhs))
    }
}

impl SignedScalar for i32 {
    #[inline]
    fn negate(self) -> Self {
        self.wrapping_neg()
    }
}

impl NativeScalar for i64 {
    const HOST_NAME: &'static str = "i64";

    #[inline]
    fn to_bits(self) -> u64 {
        bits_of_i64(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        i64_of_bits(bits)
    }

    fn parse_literal(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn write_literal(self, out: &mut String) {
        let _ = write!(out, "{self}");
    }
}

impl NumericScalar for i64 {
    #[inline]
    fn widen(self) -> Wide {
        Wide::Int(self)
    }

    #[allow(clippy::cast_possible_truncation, reason = "float to int casts saturate")]
    #[inline]
    fn narrow(wide: Wide) -> Self {
        match wide {
            Wide::Int(i) => i,
            Wide::Float(f) => f as i64,
        }
    }
}

impl ArithmeticScalar for i64 {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        (rhs != 0).then(|| self.wrapping_div(rhs))
    }

    #[inline]
    fn rem(self, rhs: Self) -> Option<Self> {
        (rhs != 0).then(|| self.wrapping_rem(rhs))
    }
}

impl SignedScalar for i64 {
    #[inline]
    fn negate(self) -> Self {
        self.wrapping_neg()
    }
}

// === Floating point ===

/// Longest printed Float value.
pub(crate) const FLOAT_PRINT_WIDTH: usize = 16;

/// Longest printed Double value.
pub(crate) const DOUBLE_PRINT_WIDTH: usize = 24;

/// Shortest round-tripping decimal form, switching to exponent form when the
/// plain digits would not fit in `width`. Exponent form always fits: 9
/// significant digits for `f32`, 17 for `f64`.
fn write_float<F: fmt::Display + fmt::LowerExp>(value: F, width: usize, out: &mut String) {
    let start = out.len();
    let _ = write!(out, "{value}");
    if out.len() - start > width {
        out.truncate(start);
        let _ = write!(out, "{value:e}");
    }
}

impl NativeScalar for f32 {
    const HOST_NAME: &'static str = "f32";

    #[inline]
    fn to_bits(self) -> u64 {
        u64::from(f32::to_bits(self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "inline bits of a Float value hold an f32 bit pattern in the low word"
    )]
    #[inline]
    fn from_bits(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }

    fn parse_literal(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn write_literal(self, out: &mut String) {
        write_float(self, FLOAT_PRINT_WIDTH, out);
    }
}

impl NumericScalar for f32 {
    #[inline]
    fn widen(self) -> Wide {
        Wide::Float(f64::from(self))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "narrowing to single precision is the point of the conversion"
    )]
    #[inline]
    fn narrow(wide: Wide) -> Self {
        match wide {
            Wide::Int(i) => i as f32,
            Wide::Float(f) => f as f32,
        }
    }
}

impl ArithmeticScalar for f32 {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }

    #[inline]
    fn rem(self, rhs: Self) -> Option<Self> {
        Some(self % rhs)
    }
}

impl SignedScalar for f32 {
    #[inline]
    fn negate(self) -> Self {
        -self
    }
}

impl NativeScalar for f64 {
    const HOST_NAME: &'static str = "f64";

    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    fn parse_literal(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn write_literal(self, out: &mut String) {
        write_float(self, DOUBLE_PRINT_WIDTH, out);
    }
}

impl NumericScalar for f64 {
    #[inline]
    fn widen(self) -> Wide {
        Wide::Float(self)
    }

    #[inline]
    fn narrow(wide: Wide) -> Self {
        wide.as_f64()
    }
}

impl ArithmeticScalar for f64 {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }

    #[inline]
    fn rem(self, rhs: Self) -> Option<Self> {
        Some(self % rhs)
    }
}

impl SignedScalar for f64 {
    #[inline]
    fn negate(self) -> Self {
        -self
    }
}

// === Calendar arithmetic ===

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic Gregorian (year, month, day) for days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Parse `YYYY-MM-DD` into days since the epoch. Years are exactly four
/// digits, which keeps every printed date within the Date print width.
fn parse_date_days(text: &str) -> Option<i64> {
    let mut parts = text.splitn(3, '-');
    let year_str = parts.next()?;
    let month_str = parts.next()?;
    let day_str = parts.next()?;
    if year_str.len() != 4 || month_str.len() != 2 || day_str.len() != 2 {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(year_str) || !all_digits(month_str) || !all_digits(day_str) {
        return None;
    }
    let year: i64 = year_str.parse().ok()?;
    let month: i64 = month_str.parse().ok()?;
    let day: i64 = day_str.parse().ok()?;
    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(days_from_civil(year, month, day))
}

fn write_date(days: i64, out: &mut String) {
    let (year, month, day) = civil_from_days(days);
    let _ = write!(out, "{year:04}-{month:02}-{day:02}");
}

/// Parse `HH:MM:SS[.ffffff]` into microseconds.
fn parse_clock(text: &str) -> Option<i64> {
    let mut parts = text.splitn(3, ':');
    let hours: i64 = parse_digits(parts.next()?)?;
    let minutes: i64 = parse_digits(parts.next()?)?;
    let seconds_part = parts.next()?;
    let (seconds_str, fraction_str) = match seconds_part.split_once('.') {
        Some((s, f)) => (s, Some(f)),
        None => (seconds_part, None),
    };
    let seconds: i64 = parse_digits(seconds_str)?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let micros = match fraction_str {
        Some(f) => parse_fraction_micros(f)?,
        None => 0,
    };
    hours
        .checked_mul(MICROS_PER_HOUR)?
        .checked_add(minutes * MICROS_PER_MINUTE + seconds * MICROS_PER_SECOND + micros)
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse up to six fractional-second digits into microseconds.
fn parse_fraction_micros(text: &str) -> Option<i64> {
    if text.is_empty() || text.len() > 6 {
        return None;
    }
    let digits = parse_digits(text)?;
    let scale = 10_i64.pow(6 - u32::try_from(text.len()).ok()?);
    Some(digits * scale)
}

fn write_clock(micros: i64, out: &mut String) {
    let hours = micros / MICROS_PER_HOUR;
    let minutes = (micros % MICROS_PER_HOUR) / MICROS_PER_MINUTE;
    let seconds = (micros % MICROS_PER_MINUTE) / MICROS_PER_SECOND;
    let fraction = micros % MICROS_PER_SECOND;
    let _ = write!(out, "{hours:02}:{minutes:02}:{seconds:02}");
    if fraction != 0 {
        let _ = write!(out, ".{fraction:06}");
    }
}

/// Calendar date, stored as days since 1970-01-01.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DateLit {
    pub days: i32,
}

impl NativeScalar for DateLit {
    const HOST_NAME: &'static str = "DateLit";

    #[inline]
    fn to_bits(self) -> u64 {
        self.days.to_bits()
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        DateLit {
            days: i32::from_bits(bits),
        }
    }

    fn parse_literal(text: &str) -> Option<Self> {
        let days = parse_date_days(text.trim())?;
        Some(DateLit {
            days: i32::try_from(days).ok()?,
        })
    }

    fn write_literal(self, out: &mut String) {
        write_date(i64::from(self.days), out);
    }
}

/// Date and time, stored as microseconds since 1970-01-01T00:00:00.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DatetimeLit {
    pub micros: i64,
}

impl NativeScalar for DatetimeLit {
    const HOST_NAME: &'static str = "DatetimeLit";

    #[inline]
    fn to_bits(self) -> u64 {
        bits_of_i64(self.micros)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        DatetimeLit {
            micros: i64_of_bits(bits),
        }
    }

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.ffffff]`, or the same
    /// with a `T` separator.
    fn parse_literal(text: &str) -> Option<Self> {
        let text = text.trim();
        let (date_str, clock_str) = match text.find([' ', 'T']) {
            Some(pos) => (&text[..pos], Some(text[pos + 1..].trim_start())),
            None => (text, None),
        };
        let days = parse_date_days(date_str)?;
        let clock = match clock_str {
            Some(c) => parse_clock(c)?,
            None => 0,
        };
        if clock >= MICROS_PER_DAY {
            return None;
        }
        let micros = days.checked_mul(MICROS_PER_DAY)?.checked_add(clock)?;
        Some(DatetimeLit { micros })
    }

    fn write_literal(self, out: &mut String) {
        let days = self.micros.div_euclid(MICROS_PER_DAY);
        let clock = self.micros.rem_euclid(MICROS_PER_DAY);
        write_date(days, out);
        out.push('T');
        write_clock(clock, out);
    }
}

/// Day-time interval in microseconds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DatetimeIntervalLit {
    pub micros: i64,
}

impl NativeScalar for DatetimeIntervalLit {
    const HOST_NAME: &'static str = "DatetimeIntervalLit";

    #[inline]
    fn to_bits(self) -> u64 {
        bits_of_i64(self.micros)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        DatetimeIntervalLit {
            micros: i64_of_bits(bits),
        }
    }

    /// Accepts a sequence of `<count> <unit>` pairs, optionally followed by
    /// an `HH:MM:SS[.ffffff]` clock, e.g. `3 days 04:05:06`.
    fn parse_literal(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace().peekable();
        tokens.peek()?;
        let mut total: i64 = 0;
        while let Some(token) = tokens.next() {
            if token.contains(':') {
                let (negative, clock) = match token.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, token),
                };
                let micros = parse_clock(clock)?;
                total = total.checked_add(if negative { -micros } else { micros })?;
                continue;
            }
            let count: i64 = token.parse().ok()?;
            let unit = tokens.next()?.to_ascii_lowercase();
            let scale = match unit.trim_end_matches('s') {
                "microsecond" | "u" | "micro" => 1,
                "millisecond" | "m" | "milli" => 1_000,
                "second" | "sec" | "" => MICROS_PER_SECOND,
                "minute" | "min" => MICROS_PER_MINUTE,
                "hour" | "h" => MICROS_PER_HOUR,
                "day" | "d" => MICROS_PER_DAY,
                "week" | "w" => 7 * MICROS_PER_DAY,
                _ => return None,
            };
            total = total.checked_add(count.checked_mul(scale)?)?;
        }
        Some(DatetimeIntervalLit { micros: total })
    }

    /// Day count and clock each carry the sign, so `-1 day -02:00:00` reads
    /// back as the same value.
    fn write_literal(self, out: &mut String) {
        let days = self.micros / MICROS_PER_DAY;
        let clock = self.micros % MICROS_PER_DAY;
        if days != 0 {
            let plural = if days.unsigned_abs() == 1 { "" } else { "s" };
            let _ = write!(out, "{days} day{plural} ");
        }
        if self.micros < 0 {
            out.push('-');
        }
        write_clock(clock.abs(), out);
    }
}

impl SignedScalar for DatetimeIntervalLit {
    #[inline]
    fn negate(self) -> Self {
        DatetimeIntervalLit {
            micros: self.micros.wrapping_neg(),
        }
    }
}

/// Year-month interval in months.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct YearMonthIntervalLit {
    pub months: i64,
}

impl NativeScalar for YearMonthIntervalLit {
    const HOST_NAME: &'static str = "YearMonthIntervalLit";

    #[inline]
    fn to_bits(self) -> u64 {
        bits_of_i64(self.months)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        YearMonthIntervalLit {
            months: i64_of_bits(bits),
        }
    }

    /// Accepts a sequence of `<count> year(s)|month(s)|mon(s)` pairs.
    fn parse_literal(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let mut total: i64 = 0;
        let mut seen = false;
        while let Some(token) = tokens.next() {
            let count: i64 = token.parse().ok()?;
            let unit = tokens.next()?.to_ascii_lowercase();
            let scale = match unit.trim_end_matches('s') {
                "year" | "y" => 12,
                "month" | "mon" => 1,
                _ => return None,
            };
            total = total.checked_add(count.checked_mul(scale)?)?;
            seen = true;
        }
        seen.then_some(YearMonthIntervalLit { months: total })
    }

    fn write_literal(self, out: &mut String) {
        let years = self.months / 12;
        let months = self.months % 12;
        let _ = write!(out, "{years} years {months} mons");
    }
}

impl SignedScalar for YearMonthIntervalLit {
    #[inline]
    fn negate(self) -> Self {
        YearMonthIntervalLit {
            months: self.months.wrapping_neg(),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
