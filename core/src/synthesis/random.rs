use chrono::NaiveDate;
use rand::Rng;
use std::ops::RangeInclusive;

/// Single seam through which every synthetic draw flows.
///
/// Any `rand::Rng` is a `RandomSource`, so production code hands in
/// `StdRng::from_entropy()` and tests hand in `StdRng::seed_from_u64(..)`.
pub trait RandomSource {
    /// Uniform draw in `[low, high]`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in `[low, high]`. Returns `low` when the range is empty.
    fn int_inclusive(&mut self, low: i64, high: i64) -> i64;

    /// Uniform index in `0..len`; zero when `len <= 1`.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn int_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Picks one element uniformly; `None` only for an empty slice.
pub fn pick<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}

/// Calendar date with a year in `years`, any month, day 1..=28.
pub fn random_date<R: RandomSource + ?Sized>(rng: &mut R, years: RangeInclusive<i32>) -> NaiveDate {
    let year = rng.int_inclusive(i64::from(*years.start()), i64::from(*years.end())) as i32;
    let month = rng.int_inclusive(1, 12) as u32;
    let day = rng.int_inclusive(1, 28) as u32;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
