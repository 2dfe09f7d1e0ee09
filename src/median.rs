use crate::point::Point;

/// Position of the median within a slice of `len` elements.
///
/// For even lengths this is the lower of the two middle positions, which leaves the larger half
/// on the right-hand side of the split.
#[inline]
pub fn median_position(len: usize) -> usize {
    len.saturating_sub(1) / 2
}

/// Partitions `order` (indices into `points`) around the median value on `axis`.
///
/// After the call the element at [`median_position`] holds the median, everything before it has
/// a coordinate `<=` the median and everything after it `>=`. Runs in expected linear time.
/// Returns the index into `points` of the median point, or `None` for an empty slice.
pub fn select_median(order: &mut [u32], points: &[Point], axis: usize) -> Option<u32> {
    if order.is_empty() {
        return None;
    }

    let mid = median_position(order.len());
    let (_, median, _) = order.select_nth_unstable_by(mid, |&a, &b| {
        let va = points[a as usize].coords[axis];
        let vb = points[b as usize].coords[axis];
        va.total_cmp(&vb)
    });
    Some(*median)
}
