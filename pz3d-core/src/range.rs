//! Closed intervals and axis-aligned boxes built from them
//!
//! `split` and `overlap` place their boundaries one unit step away from the
//! cut (`value - 1`, `target.to + 1`). That is exact on integer domains; on
//! floating point ranges the open unit interval next to the cut is dropped.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::vector::Vector2D;

/// A scalar with a unit step
pub trait Discrete: Copy + PartialOrd + Debug {
    /// `self - 1`
    fn pred(self) -> Self;
    /// `self + 1`
    fn succ(self) -> Self;
    /// `self + 1`, or `None` past the type's maximum
    fn checked_succ(self) -> Option<Self>;
    fn to_f64(self) -> f64;
}

macro_rules! impl_discrete {
    (@checked $value:ident, 1) => {
        $value.checked_add(1)
    };
    (@checked $value:ident, 1.0) => {
        Some($value + 1.0)
    };
    ($one:tt => $($T:ty),*) => {
        $(
            impl Discrete for $T {
                #[inline]
                fn pred(self) -> Self {
                    self - $one
                }

                #[inline]
                fn succ(self) -> Self {
                    self + $one
                }

                #[inline]
                fn checked_succ(self) -> Option<Self> {
                    impl_discrete!(@checked self, $one)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_discrete!(1 => i32, i64, isize, u32, u64, usize);
impl_discrete!(1.0 => f32, f64);

#[inline]
fn min<T: Discrete>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[inline]
fn max<T: Discrete>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Closed interval `[from, to]`.
///
/// `from <= to` is not enforced; an inverted range contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<T> {
    pub from: T,
    pub to: T,
}

/// The parts of a range before, inside and after another range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap<T> {
    pub before: Option<Range<T>>,
    pub inside: Option<Range<T>>,
    pub after: Option<Range<T>>,
}

impl<T: Discrete> Overlap<T> {
    /// Present parts in ascending order
    pub fn parts(&self) -> impl Iterator<Item = Range<T>> {
        [self.before, self.inside, self.after].into_iter().flatten()
    }
}

impl<T: Discrete> Range<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.from <= value && value <= self.to
    }

    fn contains_real(&self, value: f64) -> bool {
        self.from.to_f64() <= value && value <= self.to.to_f64()
    }

    /// Split into `(left, right)` where `right` starts at `value`.
    pub fn split(&self, value: T) -> (Option<Self>, Option<Self>) {
        if value <= self.from {
            (None, Some(*self))
        } else if value > self.to {
            (Some(*self), None)
        } else {
            (
                Some(Self::new(self.from, value.pred())),
                Some(Self::new(value, self.to)),
            )
        }
    }

    /// Decompose `self` relative to `target`.
    pub fn overlap(&self, target: &Self) -> Overlap<T> {
        let before = (self.from < target.from)
            .then(|| Self::new(self.from, min(self.to, target.from.pred())))
            .filter(|r| !r.is_empty());
        let after = (self.to > target.to)
            .then(|| Self::new(max(self.from, target.to.succ()), self.to))
            .filter(|r| !r.is_empty());

        Overlap {
            before,
            inside: self.intersection(target),
            after,
        }
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let clipped = Self::new(max(self.from, other.from), min(self.to, other.to));
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Merge overlapping ranges into a sorted set of disjoint ranges.
    ///
    /// Ranges that merely touch (`[1, 2]` and `[3, 4]`) stay separate; use
    /// [`Range::combine_contiguous`] to join them.
    pub fn combine<I>(ranges: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = Self>,
    {
        Self::sweep(ranges, |last, next| next.from <= last.to)
    }

    /// Like [`Range::combine`] but also merges ranges one step apart.
    pub fn combine_contiguous<I>(ranges: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = Self>,
    {
        Self::sweep(ranges, |last, next| match last.to.checked_succ() {
            Some(step) => next.from <= step,
            // `last` already reaches the maximum
            None => true,
        })
    }

    fn sweep<I, F>(ranges: I, merges: F) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = Self>,
        F: Fn(&Self, &Self) -> bool,
    {
        let mut sorted: Vec<Self> = ranges.into_iter().collect();
        if sorted.is_empty() {
            return Err(Error::EmptyInput);
        }
        sorted.sort_by(|a, b| a.from.partial_cmp(&b.from).unwrap_or(Ordering::Equal));

        let mut combined: Vec<Self> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match combined.last_mut() {
                Some(last) if merges(last, &next) => last.to = max(last.to, next.to),
                _ => combined.push(next),
            }
        }
        Ok(combined)
    }
}

macro_rules! impl_range_len {
    ($($T:ty),*) => {
        $(
            impl Range<$T> {
                /// Number of integers in the range
                pub fn len(&self) -> u128 {
                    if self.is_empty() {
                        0
                    } else {
                        (self.to as i128 - self.from as i128) as u128 + 1
                    }
                }
            }
        )*
    };
}

impl_range_len!(i32, i64, isize, u32, u64, usize);

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range2D<T> {
    pub x: Range<T>,
    pub y: Range<T>,
}

impl<T: Discrete> Range2D<T> {
    pub fn new(x: Range<T>, y: Range<T>) -> Self {
        Self { x, y }
    }

    pub fn contains(&self, point: &Vector2D) -> bool {
        self.x.contains_real(point.x) && self.y.contains_real(point.y)
    }
}
