//! Simplify a polyline using the [Douglas-Peucker](https://en.wikipedia.org/wiki/Ramer%E2%80%93Douglas%E2%80%93Peucker_algorithm) algorithm.
//!
//! These functions do not validate their input;
//! use [Simplifier](super::Simplifier) for checked, two-stage simplification.
use log::trace;
use nalgebra::Point;

use crate::error::{Error, Result};
use crate::geom::segment_dist2;
use crate::Precision;

/// Counts chord evaluations against an optional limit.
#[derive(Debug)]
struct Budget {
    limit: Option<usize>,
    spent: usize,
}

impl Budget {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, spent: 0 }
    }

    fn spend(&mut self) -> Result<()> {
        if let Some(budget) = self.limit {
            if self.spent >= budget {
                return Err(Error::BudgetExceeded { budget });
            }
        }
        self.spent += 1;
        Ok(())
    }
}

/// Interior vertex of `line[start..=end]` farthest from the chord, with its squared distance.
///
/// Starts from `(start, 0.0)` and only replaces on a strictly greater distance,
/// so the first of several equally distant vertices wins
/// and a range lying exactly on its chord reports zero.
fn farthest<const D: usize>(
    line: &[Point<Precision, D>],
    start: usize,
    end: usize,
) -> (usize, Precision) {
    let first = &line[start];
    let last = &line[end];

    let mut greatest_dist2 = (start, 0.0);
    for (idx, point) in line.iter().enumerate().take(end).skip(start + 1) {
        let d2 = segment_dist2(first, last, point);
        if d2 > greatest_dist2.1 {
            greatest_dist2 = (idx, d2);
        }
    }
    greatest_dist2
}

fn keep_inner<const D: usize>(
    line: &[Point<Precision, D>],
    start: usize,
    end: usize,
    epsilon_sq: Precision,
    budget: &mut Budget,
) -> Result<Vec<usize>> {
    if end <= start + 1 {
        return Ok(vec![]);
    }
    budget.spend()?;

    let (split, d2) = farthest(line, start, end);
    if d2 <= epsilon_sq {
        return Ok(vec![]);
    }
    trace!("splitting {}..{} at {} (d2 = {})", start, end, split, d2);

    let mut to_keep = keep_inner(line, start, split, epsilon_sq, budget)?;
    to_keep.push(split);
    to_keep.append(&mut keep_inner(line, split, end, epsilon_sq, budget)?);
    Ok(to_keep)
}

fn endpoints(len: usize) -> Option<Vec<usize>> {
    match len {
        0 => Some(vec![]),
        1 => Some(vec![0]),
        _ => None,
    }
}

/// Return the indices of the points in the line which would be kept by Douglas-Peucker,
/// splitting ranges recursively.
///
/// Each call returns the vertices kept within its own range and the caller concatenates them,
/// so no marker array is shared between calls.
/// Call depth grows with the number of splits; prefer [dp_keep] for untrusted input.
pub fn dp_keep_recursive<const D: usize>(
    line: &[Point<Precision, D>],
    epsilon: Precision,
    budget: Option<usize>,
) -> Result<Vec<usize>> {
    if let Some(trivial) = endpoints(line.len()) {
        return Ok(trivial);
    }
    let last = line.len() - 1;
    let mut budget = Budget::new(budget);

    let mut out = Vec::with_capacity(line.len());
    out.push(0);
    out.append(&mut keep_inner(line, 0, last, epsilon * epsilon, &mut budget)?);
    out.push(last);
    Ok(out)
}

/// Return the indices of the points in the line which would be kept by Douglas-Peucker,
/// using an explicit work-list of ranges instead of recursion.
///
/// `budget` caps the number of chord evaluations;
/// exceeding it fails the whole call.
pub fn dp_keep<const D: usize>(
    line: &[Point<Precision, D>],
    epsilon: Precision,
    budget: Option<usize>,
) -> Result<Vec<usize>> {
    if let Some(trivial) = endpoints(line.len()) {
        return Ok(trivial);
    }
    let epsilon_sq = epsilon * epsilon;
    let last = line.len() - 1;
    let mut budget = Budget::new(budget);

    let mut marked = vec![false; line.len()];
    marked[0] = true;
    marked[last] = true;

    let mut ranges = vec![(0, last)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }
        budget.spend()?;

        let (split, d2) = farthest(line, start, end);
        if d2 > epsilon_sq {
            trace!("splitting {}..{} at {} (d2 = {})", start, end, split, d2);
            marked[split] = true;
            ranges.push((split, end));
            ranges.push((start, split));
        }
    }

    Ok(marked
        .into_iter()
        .enumerate()
        .filter_map(|(idx, keep)| keep.then_some(idx))
        .collect())
}

/// Decimate the linestring using Douglas-Peucker.
pub fn dp_reduce<const D: usize>(
    line: &[Point<Precision, D>],
    epsilon: Precision,
    budget: Option<usize>,
) -> Result<Vec<Point<Precision, D>>> {
    let kept = dp_keep(line, epsilon, budget)?;
    Ok(kept.into_iter().map(|idx| line[idx]).collect())
}
