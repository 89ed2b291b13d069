//! Simplify polylines.
//!
//! Simplification is done in two stages:
//! [vertex reduction](radial) collapses clusters of nearby points,
//! then [Douglas-Peucker](dp) drops vertices lying close to the chords between the survivors.
//! Both stages share one tolerance.
//!
//! ```
//! use polysimp::{simplify, Point2};
//!
//! let line = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(3.0, 0.0),
//! ];
//! let simplified = simplify(&line, 0.5).unwrap();
//! assert_eq!(simplified, vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)]);
//! ```
pub mod dp;
pub mod radial;

use log::debug;
use nalgebra::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::is_finite;
use crate::Precision;

/// How the Douglas-Peucker stage walks its ranges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Split ranges by recursion; call depth grows with the number of kept vertices.
    Recursive,
    /// Split ranges from an explicit work-list; stack use is constant.
    #[default]
    Stack,
}

/// Two-stage polyline simplifier.
///
/// ```
/// use polysimp::{Point2, Simplifier, Strategy};
///
/// let simplifier = Simplifier::new(1.0).strategy(Strategy::Recursive).budget(10_000);
/// let kept = simplifier
///     .simplify_keep(&[Point2::new(0.0, 0.0), Point2::new(5.0, 0.2), Point2::new(10.0, 0.0)])
///     .unwrap();
/// assert_eq!(kept, vec![0, 2]);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Simplifier {
    tolerance: Precision,
    strategy: Strategy,
    budget: Option<usize>,
}

impl Simplifier {
    /// `tolerance` is the largest distance a dropped point may lie from the simplified line.
    /// It is validated when simplifying.
    pub fn new(tolerance: Precision) -> Self {
        Self {
            tolerance,
            strategy: Strategy::default(),
            budget: None,
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cap the number of chord evaluations in the Douglas-Peucker stage.
    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn tolerance(&self) -> Precision {
        self.tolerance
    }

    fn validate<const D: usize>(&self, line: &[Point<Precision, D>]) -> Result<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(Error::InvalidTolerance(self.tolerance));
        }
        if let Some(index) = line.iter().position(|p| !is_finite(p)) {
            return Err(Error::MalformedPoint { index });
        }
        Ok(())
    }

    /// Return the indices of the input points which survive simplification, ascending.
    pub fn simplify_keep<const D: usize>(&self, line: &[Point<Precision, D>]) -> Result<Vec<usize>> {
        self.validate(line)?;

        let reduced_idxs = radial::vertex_reduce_keep(line, self.tolerance);
        let reduced: Vec<_> = reduced_idxs.iter().map(|&idx| line[idx]).collect();
        debug!(
            "vertex reduction kept {} of {} points",
            reduced.len(),
            line.len()
        );

        let kept = match self.strategy {
            Strategy::Recursive => dp::dp_keep_recursive(&reduced, self.tolerance, self.budget)?,
            Strategy::Stack => dp::dp_keep(&reduced, self.tolerance, self.budget)?,
        };
        debug!("douglas-peucker kept {} of {} points", kept.len(), reduced.len());

        Ok(kept.into_iter().map(|idx| reduced_idxs[idx]).collect())
    }

    /// Simplify the polyline, returning a subsequence of its points.
    pub fn simplify<const D: usize>(
        &self,
        line: &[Point<Precision, D>],
    ) -> Result<Vec<Point<Precision, D>>> {
        let kept = self.simplify_keep(line)?;
        Ok(kept.into_iter().map(|idx| line[idx]).collect())
    }
}

/// Simplify the polyline with default options.
///
/// Fails if `tolerance` is negative or NaN, or if any coordinate is not finite.
pub fn simplify<const D: usize>(
    line: &[Point<Precision, D>],
    tolerance: Precision,
) -> Result<Vec<Point<Precision, D>>> {
    Simplifier::new(tolerance).simplify(line)
}

/// Return the indices of the points which [simplify] would keep.
pub fn simplify_keep<const D: usize>(
    line: &[Point<Precision, D>],
    tolerance: Precision,
) -> Result<Vec<usize>> {
    Simplifier::new(tolerance).simplify_keep(line)
}
