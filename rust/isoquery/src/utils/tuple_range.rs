use thiserror::Error;

/// Finds the index range of elements in a sorted slice whose keys fall within `key_range`.
///
/// The slice must be sorted by the result of `key_fn`. Unlike a plain
/// `binary_search_by_key`, the key only needs to be `PartialOrd`, which lets
/// it work directly on m/z and retention time arrays.
///
/// # Examples
///
/// ```
/// use isoquery::utils::{binary_search_range_by_key, TupleRange};
///
/// let mzs = [100.0, 100.5, 101.0, 101.003, 101.5, 102.0];
/// let range = TupleRange::try_new(100.99, 101.01).unwrap();
/// let idx = binary_search_range_by_key(&mzs, range, |x| *x);
/// assert_eq!(&mzs[idx], &[101.0, 101.003]);
///
/// // Empty range when no matches
/// let empty = TupleRange::try_new(200.0, 300.0).unwrap();
/// assert!(mzs[binary_search_range_by_key(&mzs, empty, |x| *x)].is_empty());
/// ```
pub fn binary_search_range_by_key<T, K, F>(
    slice: &[T],
    key_range: TupleRange<K>,
    key_fn: F,
) -> std::ops::Range<usize>
where
    F: Fn(&T) -> K,
    K: Copy + PartialOrd + std::fmt::Debug,
{
    let start_idx = slice.partition_point(|x| key_fn(x) < key_range.start());
    let end_idx =
        start_idx + slice[start_idx..].partition_point(|x| key_fn(x) <= key_range.end());

    start_idx..end_idx
}

/// TupleRange represents a closed-closed range [a, b] over two elements.
///
/// It guarantees that the first element is less than or equal to the second,
/// so an inverted m/z or rt window is caught at construction time instead of
/// silently matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TupleRange<T: Copy + PartialOrd>(T, T);

#[derive(Error, Debug)]
pub enum TupleRangeError<T: Copy + PartialOrd + std::fmt::Debug> {
    #[error(
        "Expected the first element to be less than or equal to the second, got ({0:?}, {1:?})"
    )]
    ExpectedOrderedRange(T, T),
}

impl<T: Copy + PartialOrd + std::fmt::Debug> TupleRange<T> {
    pub fn try_new(left: T, right: T) -> Result<Self, TupleRangeError<T>> {
        // NaN bounds also end up here, since they never compare as ordered
        if left <= right {
            Ok(Self(left, right))
        } else {
            Err(TupleRangeError::ExpectedOrderedRange(left, right))
        }
    }

    pub fn as_tuple(&self) -> (T, T) {
        (self.0, self.1)
    }

    pub fn contains(&self, x: T) -> bool {
        self.0 <= x && x <= self.1
    }

    pub fn start(&self) -> T {
        self.0
    }

    pub fn end(&self) -> T {
        self.1
    }
}

impl TupleRange<f32> {
    /// Widens the range by `by` on both sides.
    ///
    /// A negative `by` that would invert the range collapses it onto its midpoint.
    pub fn expand(&self, by: f32) -> Self {
        let left = self.0 - by;
        let right = self.1 + by;
        if left <= right {
            Self(left, right)
        } else {
            let mid = (self.0 + self.1) / 2.0;
            Self(mid, mid)
        }
    }
}

impl<T> TryInto<TupleRange<T>> for (T, T)
where
    T: Copy + PartialOrd + std::fmt::Debug,
{
    type Error = TupleRangeError<T>;

    fn try_into(self) -> Result<TupleRange<T>, Self::Error> {
        TupleRange::try_new(self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_search_repeats() {
        let input = vec![
            1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.0, 7.0, 8.0, 9.0, 10.0,
        ];
        let range = TupleRange::try_new(3.0, 7.0).unwrap();
        let result = binary_search_range_by_key(&input, range, |&x| x);
        assert_eq!(result, 2..12);
        assert_eq!(
            &input[result],
            &[3.0, 3.0, 3.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.0, 7.0]
        );
    }

    #[test]
    fn test_slice_search_by_struct_key() {
        let rts = [(0_usize, 9.8_f32), (1, 9.9), (2, 10.0), (3, 10.1), (4, 10.2)];
        let range = TupleRange::try_new(9.85_f32, 10.15).unwrap();
        let result = binary_search_range_by_key(&rts, range, |x| x.1);
        assert_eq!(result, 1..4);
    }

    #[test]
    fn test_inverted_range_is_error() {
        assert!(TupleRange::try_new(2.0, 1.0).is_err());
        assert!(TupleRange::try_new(f32::NAN, 1.0).is_err());
        let ok: Result<TupleRange<f64>, _> = (1.0, 1.0).try_into();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_expand() {
        let range = TupleRange::try_new(9.5_f32, 10.5).unwrap();
        let wide = range.expand(2.0);
        assert_eq!(wide.as_tuple(), (7.5, 12.5));
        let collapsed = range.expand(-5.0);
        assert_eq!(collapsed.as_tuple(), (10.0, 10.0));
    }
}
