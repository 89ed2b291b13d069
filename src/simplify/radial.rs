//! Vertex reduction: merge runs of points closer than the tolerance to the last kept point.
use crate::geom::dist2;
use crate::Precision;
use nalgebra::Point;

/// Return the indices of the points which survive vertex reduction.
///
/// A point is dropped when its squared distance to the last kept point is
/// strictly less than `tolerance²`.
/// The first point is always kept; so is the last,
/// even when it falls inside the final cluster.
pub fn vertex_reduce_keep<const D: usize>(
    line: &[Point<Precision, D>],
    tolerance: Precision,
) -> Vec<usize> {
    let Some(first) = line.first() else {
        return vec![];
    };
    let tol2 = tolerance * tolerance;
    let mut out = Vec::with_capacity(line.len());
    out.push(0);

    let mut prev = first;
    let mut prev_idx = 0;
    for (idx, point) in line.iter().enumerate().skip(1) {
        if dist2(point, prev) < tol2 {
            continue;
        }
        out.push(idx);
        prev = point;
        prev_idx = idx;
    }

    let last_idx = line.len() - 1;
    if prev_idx < last_idx {
        out.push(last_idx);
    }
    out
}

/// Drop points which lie within `tolerance` of the previously kept point.
pub fn vertex_reduce<const D: usize>(
    line: &[Point<Precision, D>],
    tolerance: Precision,
) -> Vec<Point<Precision, D>> {
    vertex_reduce_keep(line, tolerance)
        .into_iter()
        .map(|idx| line[idx])
        .collect()
}
