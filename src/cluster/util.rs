use std::collections::HashMap;

use crate::point::Point;

/// Fold identical coordinates onto their first occurrence.
///
/// Returns the distinct points in first-seen order, and for every input index
/// the index of its representative in that list.
pub(crate) fn collapse_duplicates(points: &[Point]) -> (Vec<Point>, Vec<usize>) {
    let mut seen: HashMap<Point, usize> = HashMap::with_capacity(points.len());
    let mut unique = Vec::with_capacity(points.len());
    let mut representative = Vec::with_capacity(points.len());

    for &p in points {
        let idx = *seen.entry(p).or_insert_with(|| {
            unique.push(p);
            unique.len() - 1
        });
        representative.push(idx);
    }

    (unique, representative)
}

/// Number of clusters referenced by a dense label vector.
pub(crate) fn count_clusters(labels: &[Option<usize>]) -> usize {
    labels.iter().flatten().max().map_or(0, |&max| max + 1)
}
