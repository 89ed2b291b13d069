//! Simplify polylines and map coordinates through a zoomable image view.
//!
//! The simplifier works on [nalgebra] points of any dimension;
//! the view transform is 2-D only.
pub use nalgebra;

pub mod error;
pub mod geom;
pub mod simplify;
pub mod view;

pub use error::{Error, Result};
pub use simplify::{simplify, simplify_keep, Simplifier, Strategy};
pub use view::{ZoomSettings, ZoomView};

pub type Precision = f64;

/// 2-D point, the common case for drawn outlines.
pub type Point2 = nalgebra::Point2<Precision>;
