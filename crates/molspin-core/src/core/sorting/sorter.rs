use super::Depth;
use std::cmp::Ordering;

/// Depths closer than this compare as equal.
pub const DEPTH_TOLERANCE: f64 = 1e-6;

/// Compares two depths with a tolerance band.
///
/// `Less` if `a < b`, `Equal` if `|a - b| < DEPTH_TOLERANCE`, otherwise `Greater`.
/// This is not a strict weak ordering: near-tied values compare asymmetrically
/// (`compare_depth(a, b)` may be `Less` while `compare_depth(b, a)` is `Equal`),
/// so the relative order of near-tied elements is unspecified.
///
/// [`sort_view_by_depth`] only ever asks whether the right-hand element is
/// `Less` than the left-hand one, which is true exactly when its depth is
/// strictly smaller. The tolerance band therefore never changes the sorted
/// output: views come out as a stable sort by strict `<` on depth.
pub fn compare_depth(a: f64, b: f64) -> Ordering {
    if a < b {
        Ordering::Less
    } else if (a - b).abs() < DEPTH_TOLERANCE {
        Ordering::Equal
    } else {
        Ordering::Greater
    }
}

/// Reorders `view` (indices into `items`) into ascending depth order.
///
/// Equivalent to a stable sort by strict `<` on depth; near-ties inside
/// [`DEPTH_TOLERANCE`] are still ordered by their exact depths.
pub fn sort_view_by_depth<T: Depth>(view: &mut [usize], items: &[T]) {
    merge_sort_by(view, |a, b| compare_depth(items[a].depth(), items[b].depth()));
}

/// Stable bottom-up merge sort.
///
/// The comparator need not be a total order; every merge step consults it
/// once per output slot, so the sort always terminates and never panics on an
/// inconsistent comparator.
pub fn merge_sort_by<F>(view: &mut [usize], mut compare: F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let len = view.len();
    if len < 2 {
        return;
    }

    let mut scratch = view.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(
                &view[start..mid],
                &view[mid..end],
                &mut scratch[start..end],
                &mut compare,
            );
            start = end;
        }
        view.copy_from_slice(&scratch);
        width *= 2;
    }
}

fn merge<F>(left: &[usize], right: &[usize], out: &mut [usize], compare: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Ties keep the left element first.
        let take_right =
            j < right.len() && (i >= left.len() || compare(right[j], left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}
