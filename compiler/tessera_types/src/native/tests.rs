use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn print<N: NativeScalar>(value: N) -> String {
    let mut out = String::new();
    value.write_literal(&mut out);
    out
}

#[test]
fn civil_day_conversions() {
    assert_eq!(days_from_civil(1970, 1, 1), 0);
    assert_eq!(days_from_civil(2000, 1, 1), 10_957);
    assert_eq!(days_from_civil(1969, 12, 31), -1);
    assert_eq!(civil_from_days(10_957), (2000, 1, 1));
    assert_eq!(civil_from_days(-1), (1969, 12, 31));
    assert_eq!(civil_from_days(days_from_civil(2024, 2, 29)), (2024, 2, 29));
}

#[test]
fn bool_literals() {
    assert_eq!(bool::parse_literal("TRUE"), Some(true));
    assert_eq!(bool::parse_literal(" yes "), Some(true));
    assert_eq!(bool::parse_literal("0"), Some(false));
    assert_eq!(bool::parse_literal("maybe"), None);
    assert_eq!(print(true), "true");
}

#[test]
fn integer_bits_preserve_sign() {
    assert_eq!(i32::from_bits(NativeScalar::to_bits(-7_i32)), -7);
    assert_eq!(i64::from_bits(NativeScalar::to_bits(i64::MIN)), i64::MIN);
    assert_eq!(<f32 as NativeScalar>::from_bits(NativeScalar::to_bits(1.5_f32)), 1.5);
    assert_eq!(<f64 as NativeScalar>::from_bits(NativeScalar::to_bits(-0.25_f64)), -0.25);
}

#[test]
fn integer_literals() {
    assert_eq!(i32::parse_literal(" 42 "), Some(42));
    assert_eq!(i32::parse_literal("2147483648"), None);
    assert_eq!(i64::parse_literal("2147483648"), Some(2_147_483_648));
    assert_eq!(i64::parse_literal("1.5"), None);
    assert_eq!(print(-12_i32), "-12");
}

#[test]
fn float_literals() {
    assert_eq!(f64::parse_literal("2.5"), Some(2.5));
    assert_eq!(f32::parse_literal("1e3"), Some(1000.0));
    assert_eq!(f64::parse_literal("x"), None);
    assert_eq!(print(0.5_f64), "0.5");
}

#[test]
fn floats_too_wide_for_plain_digits_use_exponent_form() {
    assert_eq!(print(1e300_f64), "1e300");
    assert_eq!(print(1.5e-30_f64), "1.5e-30");
    assert_eq!(print(-f64::MIN_POSITIVE), "-2.2250738585072014e-308");
    assert_eq!(print(1e20_f32), "1e20");
    assert_eq!(print(1e15_f64), "1000000000000000");
    assert_eq!(print(f64::NEG_INFINITY), "-inf");
    assert_eq!(f64::parse_literal("1.5e-30"), Some(1.5e-30));
}

#[test]
fn narrowing_saturates() {
    assert_eq!(i32::narrow(Wide::Int(i64::MAX)), i32::MAX);
    assert_eq!(i32::narrow(Wide::Int(i64::MIN)), i32::MIN);
    assert_eq!(i32::narrow(Wide::Float(3.9)), 3);
    assert_eq!(i32::narrow(Wide::Float(f64::NAN)), 0);
    assert_eq!(i64::narrow(Wide::Float(1e300)), i64::MAX);
    assert!(bool::narrow(Wide::Float(0.1)));
    assert!(!bool::narrow(Wide::Int(0)));
}

#[test]
fn wide_comparison() {
    use std::cmp::Ordering;
    assert_eq!(Wide::Int(1).compare(Wide::Float(1.5)), Some(Ordering::Less));
    assert_eq!(Wide::Int(i64::MAX).compare(Wide::Int(i64::MAX - 1)), Some(Ordering::Greater));
    assert_eq!(Wide::Float(2.0).compare(Wide::Int(2)), Some(Ordering::Equal));
    assert_eq!(Wide::Float(f64::NAN).compare(Wide::Int(0)), None);
}

#[test]
fn integer_arithmetic_wraps() {
    assert_eq!(ArithmeticScalar::add(i32::MAX, 1), i32::MIN);
    assert_eq!(ArithmeticScalar::mul(i64::MAX, 2), -2);
    assert_eq!(ArithmeticScalar::div(i32::MIN, -1), Some(i32::MIN));
    assert_eq!(ArithmeticScalar::div(7_i32, 0), None);
    assert_eq!(ArithmeticScalar::rem(7_i64, 0), None);
    assert_eq!(ArithmeticScalar::rem(7_i64, 3), Some(1));
    assert_eq!(SignedScalar::negate(i32::MIN), i32::MIN);
}

#[test]
fn float_division_by_zero_is_infinite() {
    assert_eq!(ArithmeticScalar::div(1.0_f64, 0.0), Some(f64::INFINITY));
    assert!(ArithmeticScalar::rem(1.0_f32, 0.0).is_some_and(f32::is_nan));
}

#[test]
fn date_literals() {
    let date = DateLit::parse_literal("2000-01-01");
    assert_eq!(date, Some(DateLit { days: 10_957 }));
    assert_eq!(print(DateLit { days: 10_957 }), "2000-01-01");
    assert_eq!(DateLit::parse_literal("2023-02-29"), None);
    assert_eq!(DateLit::parse_literal("2023-13-01"), None);
    assert_eq!(DateLit::parse_literal("2023-1-01"), None);
    assert!(DateLit::parse_literal("2024-02-29").is_some());
}

#[test]
fn date_years_are_four_digits() {
    assert_eq!(DateLit::parse_literal("999999-12-31"), None);
    assert_eq!(DateLit::parse_literal("-0001-01-01"), None);
    assert_eq!(DateLit::parse_literal("824-01-01"), None);
    assert_eq!(print(DateLit::parse_literal("0001-01-01").unwrap()), "0001-01-01");
    assert_eq!(print(DateLit::parse_literal("9999-12-31").unwrap()), "9999-12-31");
    assert_eq!(DatetimeLit::parse_literal("10000-01-01 00:00:00"), None);
}

#[test]
fn datetime_literals() {
    let parsed = DatetimeLit::parse_literal("2024-02-29 12:34:56.5");
    let expected = days_from_civil(2024, 2, 29) * MICROS_PER_DAY
        + 12 * MICROS_PER_HOUR
        + 34 * MICROS_PER_MINUTE
        + 56 * MICROS_PER_SECOND
        + 500_000;
    assert_eq!(parsed, Some(DatetimeLit { micros: expected }));
    assert_eq!(
        print(DatetimeLit { micros: expected }),
        "2024-02-29T12:34:56.500000"
    );
    assert_eq!(
        DatetimeLit::parse_literal("1970-01-01T00:00:01"),
        Some(DatetimeLit { micros: 1_000_000 })
    );
    assert_eq!(DatetimeLit::parse_literal("1970-01-01"), Some(DatetimeLit { micros: 0 }));
    assert_eq!(DatetimeLit::parse_literal("1970-01-01 24:00:00"), None);
    assert_eq!(DatetimeLit::parse_literal("1970-01-01 10:61:00"), None);
}

#[test]
fn datetime_before_epoch_prints_forward_clock() {
    assert_eq!(print(DatetimeLit { micros: -1_000_000 }), "1969-12-31T23:59:59");
}

#[test]
fn datetime_interval_literals() {
    let parsed = DatetimeIntervalLit::parse_literal("3 days 04:05:06");
    let micros = 3 * MICROS_PER_DAY + 4 * MICROS_PER_HOUR + 5 * MICROS_PER_MINUTE + 6 * MICROS_PER_SECOND;
    assert_eq!(parsed, Some(DatetimeIntervalLit { micros }));
    assert_eq!(print(DatetimeIntervalLit { micros }), "3 days 04:05:06");
    assert_eq!(
        DatetimeIntervalLit::parse_literal("-90 minutes"),
        Some(DatetimeIntervalLit { micros: -90 * MICROS_PER_MINUTE })
    );
    assert_eq!(print(DatetimeIntervalLit { micros: -90 * MICROS_PER_MINUTE }), "-01:30:00");
    assert_eq!(print(DatetimeIntervalLit { micros: MICROS_PER_DAY }), "1 day 00:00:00");
    assert_eq!(
        print(DatetimeIntervalLit { micros: -(MICROS_PER_DAY + 2 * MICROS_PER_HOUR) }),
        "-1 day -02:00:00"
    );
    assert_eq!(
        print(DatetimeIntervalLit { micros: -3 * MICROS_PER_DAY }),
        "-3 days -00:00:00"
    );
    assert_eq!(DatetimeIntervalLit::parse_literal(""), None);
    assert_eq!(DatetimeIntervalLit::parse_literal("3 fortnights"), None);
    assert_eq!(DatetimeIntervalLit::parse_literal("3"), None);
}

#[test]
fn year_month_interval_literals() {
    assert_eq!(
        YearMonthIntervalLit::parse_literal("1 year 2 months"),
        Some(YearMonthIntervalLit { months: 14 })
    );
    assert_eq!(
        YearMonthIntervalLit::parse_literal("-3 mons"),
        Some(YearMonthIntervalLit { months: -3 })
    );
    assert_eq!(print(YearMonthIntervalLit { months: 14 }), "1 years 2 mons");
    assert_eq!(YearMonthIntervalLit::parse_literal(""), None);
    assert_eq!(YearMonthIntervalLit::parse_literal("2 days"), None);
}

#[test]
fn intervals_negate() {
    assert_eq!(
        DatetimeIntervalLit { micros: 5 }.negate(),
        DatetimeIntervalLit { micros: -5 }
    );
    assert_eq!(
        YearMonthIntervalLit { months: -2 }.negate(),
        YearMonthIntervalLit { months: 2 }
    );
}

fn print_parse_trip<N: NativeScalar>(value: N) -> Option<N> {
    N::parse_literal(&print(value))
}

proptest! {
    #[test]
    fn datetime_intervals_survive_print_and_parse(micros in any::<i64>()) {
        let value = DatetimeIntervalLit { micros };
        prop_assert!(print(value).len() <= 32);
        prop_assert_eq!(print_parse_trip(value), Some(value));
    }

    #[test]
    fn doubles_print_within_width_and_parse_back(
        value in prop::num::f64::POSITIVE
            | prop::num::f64::NEGATIVE
            | prop::num::f64::NORMAL
            | prop::num::f64::SUBNORMAL
            | prop::num::f64::ZERO
            | prop::num::f64::INFINITE
    ) {
        prop_assert!(print(value).len() <= DOUBLE_PRINT_WIDTH);
        prop_assert_eq!(print_parse_trip(value).map(f64::to_bits), Some(value.to_bits()));
    }

    #[test]
    fn floats_print_within_width_and_parse_back(
        value in prop::num::f32::POSITIVE
            | prop::num::f32::NEGATIVE
            | prop::num::f32::NORMAL
            | prop::num::f32::SUBNORMAL
            | prop::num::f32::ZERO
            | prop::num::f32::INFINITE
    ) {
        prop_assert!(print(value).len() <= FLOAT_PRINT_WIDTH);
        prop_assert_eq!(print_parse_trip(value).map(f32::to_bits), Some(value.to_bits()));
    }

    #[test]
    fn dates_print_within_width(days in any::<i32>()) {
        let value = DateLit { days };
        if let Some(back) = print_parse_trip(value) {
            prop_assert_eq!(back, value);
            prop_assert!(print(value).len() <= 10);
        }
    }
}
