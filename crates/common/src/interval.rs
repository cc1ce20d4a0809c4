//! Integer brought into a half-open range, either clamped or wrapped.

/// Bring `value` into `[min, max)`.
///
/// Without `looped` the value is clamped to `[min, max - 1]`. With `looped`
/// it is wrapped modulo `max - min`, negative inputs included.
///
/// # Panics
/// If `min >= max`.
pub fn clamp_or_wrap(value: i32, min: i32, max: i32, looped: bool) -> i32 {
    assert!(min < max, "empty interval [{min}, {max})");
    if looped {
        if (min..max).contains(&value) {
            return value;
        }
        let range = i64::from(max) - i64::from(min);
        let shifted = i64::from(value) - i64::from(min);
        // result < range <= i32 span, so the cast back is lossless
        (shifted.rem_euclid(range) + i64::from(min)) as i32
    } else {
        value.clamp(min, max - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_mode() {
        assert_eq!(clamp_or_wrap(-3, 0, 4, false), 0);
        assert_eq!(clamp_or_wrap(2, 0, 4, false), 2);
        assert_eq!(clamp_or_wrap(4, 0, 4, false), 3);
        assert_eq!(clamp_or_wrap(100, -2, 2, false), 1);
    }

    #[test]
    fn wrap_mode_negative() {
        assert_eq!(clamp_or_wrap(-1, 0, 4, true), 3);
        assert_eq!(clamp_or_wrap(-4, 0, 4, true), 0);
        assert_eq!(clamp_or_wrap(-5, 0, 4, true), 3);
        assert_eq!(clamp_or_wrap(4, 0, 4, true), 0);
        assert_eq!(clamp_or_wrap(9, 0, 4, true), 1);
    }

    #[test]
    fn wrap_mode_offset_range() {
        // range [3, 7): 2 ≡ 6, 7 ≡ 3
        assert_eq!(clamp_or_wrap(2, 3, 7, true), 6);
        assert_eq!(clamp_or_wrap(7, 3, 7, true), 3);
        assert_eq!(clamp_or_wrap(-10, -2, 3, true), 0);
    }

    #[test]
    fn exhaustive_small_grid() {
        for min in -5..5 {
            for max in (min + 1)..8 {
                let range = max - min;
                for v in -30..30 {
                    let c = clamp_or_wrap(v, min, max, false);
                    assert!(c >= min && c < max);
                    assert_eq!(c, v.clamp(min, max - 1));

                    let w = clamp_or_wrap(v, min, max, true);
                    assert!(w >= min && w < max);
                    assert_eq!((w - v).rem_euclid(range), 0);
                }
            }
        }
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(clamp_or_wrap(i32::MIN, 0, i32::MAX, false), 0);
        let w = clamp_or_wrap(i32::MIN, 0, i32::MAX, true);
        assert!((0..i32::MAX).contains(&w));
    }

    #[test]
    #[should_panic]
    fn empty_interval_panics() {
        let _ = clamp_or_wrap(0, 2, 2, false);
    }
}
