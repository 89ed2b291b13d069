//! Zoom and pan state for an image drawn onto a canvas.
//!
//! The image is drawn with the transform
//! `canvas = translate + scale * (image + nav)`,
//! where `translate` keeps the zoomed image centred on the canvas
//! and `nav` is the pan offset in image space.
//! Panning is limited to the part of the image pushed off-canvas by zooming.
//!
//! ```
//! use polysimp::{Point2, ZoomView};
//!
//! let mut view = ZoomView::new(640.0, 480.0).unwrap();
//! view.zoom_in();
//! let canvas = view.image_to_canvas(&Point2::new(320.0, 240.0));
//! let back = view.canvas_to_image(&canvas);
//! assert!((back - Point2::new(320.0, 240.0)).norm() < 1e-9);
//! ```
use log::{debug, trace};
use nalgebra::{Similarity2, Vector2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{Point2, Precision};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoomSettings {
    /// Scale at which the image exactly fits the canvas.
    /// Zooming out past it resets the view.
    pub start_scale: Precision,
    /// Multiplier applied per zoom step.
    pub scale_factor: Precision,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            start_scale: 1.0,
            scale_factor: 1.1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoomView {
    size: Vector2<Precision>,
    settings: ZoomSettings,
    scale: Precision,
    nav: Vector2<Precision>,
    drag_origin: Option<Point2>,
}

fn clamp_axis(value: Precision, bound: Precision) -> Precision {
    if value.abs() >= bound {
        bound.copysign(value)
    } else {
        value
    }
}

impl ZoomView {
    /// View of a `width` by `height` image with the default zoom settings.
    pub fn new(width: Precision, height: Precision) -> Result<Self> {
        Self::with_settings(width, height, ZoomSettings::default())
    }

    pub fn with_settings(width: Precision, height: Precision, settings: ZoomSettings) -> Result<Self> {
        let valid = |v: Precision| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(Error::InvalidViewport { width, height });
        }
        if !valid(settings.start_scale) {
            return Err(Error::InvalidStartScale(settings.start_scale));
        }
        if !settings.scale_factor.is_finite() || settings.scale_factor <= 1.0 {
            return Err(Error::InvalidScaleFactor(settings.scale_factor));
        }
        Ok(Self {
            size: Vector2::new(width, height),
            settings,
            scale: settings.start_scale,
            nav: Vector2::zeros(),
            drag_origin: None,
        })
    }

    pub fn scale(&self) -> Precision {
        self.scale
    }

    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    /// Pan offset in image space.
    pub fn nav(&self) -> Vector2<Precision> {
        self.nav
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > self.settings.start_scale
    }

    /// Canvas translation which keeps the scaled image centred.
    pub fn translate(&self) -> Vector2<Precision> {
        -(self.size * self.scale - self.size) / 2.0
    }

    /// Largest pan offset on each axis, in image space.
    fn slack(&self) -> Vector2<Precision> {
        (self.translate() / self.scale).abs()
    }

    pub fn reset(&mut self) {
        debug!("resetting zoom");
        self.scale = self.settings.start_scale;
        self.nav = Vector2::zeros();
        self.drag_origin = None;
    }

    fn set_scale(&mut self, scale: Precision) {
        if scale < self.settings.start_scale {
            self.reset();
            return;
        }
        trace!("zoom scale {} -> {}", self.scale, scale);
        self.scale = scale;
        self.navigate(self.nav.x, self.nav.y);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * self.settings.scale_factor);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / self.settings.scale_factor);
    }

    /// Mouse wheel: a positive delta zooms out, anything else zooms in.
    pub fn scroll(&mut self, delta: Precision) {
        if delta > 0.0 {
            self.zoom_out();
        } else {
            self.zoom_in();
        }
    }

    /// Pan to `(x, y)` in image space.
    ///
    /// An axis at or beyond the available slack snaps to the slack,
    /// in the requested direction.
    pub fn navigate(&mut self, x: Precision, y: Precision) {
        let slack = self.slack();
        self.nav = Vector2::new(clamp_axis(x, slack.x), clamp_axis(y, slack.y));
    }

    /// Start a drag at client coordinates `client`.
    pub fn press(&mut self, client: Point2) {
        self.drag_origin = Some(client);
    }

    pub fn release(&mut self) {
        self.drag_origin = None;
    }

    /// Continue a drag to client coordinates `client`.
    ///
    /// The pan moves by the client movement divided by the scale.
    /// Without a preceding [press](Self::press) this does nothing;
    /// while not zoomed in the view is recentred instead.
    pub fn drag_to(&mut self, client: Point2) {
        let Some(origin) = self.drag_origin else {
            return;
        };
        self.drag_origin = Some(client);
        if !self.is_zoomed() {
            self.navigate(0.0, 0.0);
            return;
        }
        let target = self.nav + (client - origin) / self.scale;
        self.navigate(target.x, target.y);
    }

    /// Transform from image space to canvas space.
    pub fn transform(&self) -> Similarity2<Precision> {
        Similarity2::new(self.translate() + self.nav * self.scale, 0.0, self.scale)
    }

    pub fn image_to_canvas(&self, p: &Point2) -> Point2 {
        self.transform().transform_point(p)
    }

    pub fn canvas_to_image(&self, p: &Point2) -> Point2 {
        self.transform().inverse_transform_point(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::test_utils::init_logging;

    fn zoomed(times: usize) -> ZoomView {
        let mut view = ZoomView::new(100.0, 50.0).unwrap();
        for _ in 0..times {
            view.zoom_in();
        }
        view
    }

    #[test]
    fn starts_unzoomed() {
        let view = ZoomView::new(100.0, 50.0).unwrap();
        assert_eq!(view.scale(), 1.0);
        assert!(!view.is_zoomed());
        assert_eq!(view.translate(), Vector2::zeros());
        let p = Point2::new(12.0, 34.0);
        assert_relative_eq!(view.image_to_canvas(&p), p);
    }

    #[test]
    fn rejects_bad_construction() {
        assert_eq!(
            ZoomView::new(0.0, 10.0),
            Err(Error::InvalidViewport {
                width: 0.0,
                height: 10.0
            })
        );
        assert!(ZoomView::new(10.0, Precision::NAN).is_err());
        let settings = ZoomSettings {
            scale_factor: 1.0,
            ..Default::default()
        };
        assert_eq!(
            ZoomView::with_settings(10.0, 10.0, settings),
            Err(Error::InvalidScaleFactor(1.0))
        );
        let settings = ZoomSettings {
            start_scale: -2.0,
            ..Default::default()
        };
        assert_eq!(
            ZoomView::with_settings(10.0, 10.0, settings),
            Err(Error::InvalidStartScale(-2.0))
        );
    }

    #[test]
    fn zoom_centres_image() {
        let view = zoomed(1);
        assert_relative_eq!(view.scale(), 1.1);
        assert_relative_eq!(view.translate(), Vector2::new(-5.0, -2.5), epsilon = 1e-9);
        // canvas centre stays on image centre
        assert_relative_eq!(
            view.image_to_canvas(&Point2::new(50.0, 25.0)),
            Point2::new(50.0, 25.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn navigation_clamped_to_slack() {
        let mut view = zoomed(1);
        view.navigate(10.0, -1.0);
        assert_relative_eq!(view.nav().x, 5.0 / 1.1, epsilon = 1e-9);
        assert_relative_eq!(view.nav().y, -1.0);
        view.navigate(-10.0, -10.0);
        assert_relative_eq!(view.nav().x, -5.0 / 1.1, epsilon = 1e-9);
        assert_relative_eq!(view.nav().y, -2.5 / 1.1, epsilon = 1e-9);
    }

    #[test]
    fn unzoomed_navigation_is_pinned() {
        let mut view = ZoomView::new(100.0, 50.0).unwrap();
        view.navigate(3.0, -4.0);
        assert_eq!(view.nav(), Vector2::zeros());
    }

    #[test]
    fn mapping_round_trips() {
        let mut view = zoomed(4);
        view.navigate(3.0, -2.0);
        for p in [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 50.0),
            Point2::new(17.5, 42.25),
        ] {
            let canvas = view.image_to_canvas(&p);
            assert_relative_eq!(view.canvas_to_image(&canvas), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn mapping_includes_nav() {
        let mut view = zoomed(1);
        view.navigate(2.0, -1.0);
        assert_relative_eq!(
            view.image_to_canvas(&Point2::new(0.0, 0.0)),
            Point2::new(-5.0 + 2.2, -2.5 - 1.1),
            epsilon = 1e-9
        );
    }

    #[test]
    fn zoom_out_below_start_resets() {
        init_logging();
        let mut view = zoomed(2);
        view.navigate(1.0, 1.0);
        view.press(Point2::new(1.0, 1.0));
        for _ in 0..3 {
            view.zoom_out();
        }
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.nav(), Vector2::zeros());
        // drag origin went with the reset
        view.zoom_in();
        view.drag_to(Point2::new(50.0, 50.0));
        assert_eq!(view.nav(), Vector2::zeros());
    }

    #[test]
    fn zoom_out_reclamps_nav() {
        let mut view = zoomed(3);
        view.navigate(100.0, 0.0);
        view.zoom_out();
        let slack = view.translate().x.abs() / view.scale();
        assert_relative_eq!(view.nav().x, slack, epsilon = 1e-9);
    }

    #[test]
    fn scroll_direction() {
        let mut view = ZoomView::new(100.0, 50.0).unwrap();
        view.scroll(-3.0);
        assert_relative_eq!(view.scale(), 1.1);
        view.scroll(-1.0);
        view.scroll(1.0);
        assert_relative_eq!(view.scale(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn drag_pans_by_scaled_movement() {
        let mut view = zoomed(3);
        let scale = view.scale();
        view.press(Point2::new(0.0, 0.0));
        view.drag_to(Point2::new(scale, 0.0));
        assert_relative_eq!(view.nav(), Vector2::new(1.0, 0.0), epsilon = 1e-9);
        view.drag_to(Point2::new(2.0 * scale, -scale));
        assert_relative_eq!(view.nav(), Vector2::new(2.0, -1.0), epsilon = 1e-9);
        view.release();
        view.drag_to(Point2::new(40.0, 40.0));
        assert_relative_eq!(view.nav(), Vector2::new(2.0, -1.0), epsilon = 1e-9);
    }

    #[test]
    fn drag_without_zoom_recentres() {
        let mut view = ZoomView::new(100.0, 50.0).unwrap();
        view.press(Point2::new(10.0, 10.0));
        view.drag_to(Point2::new(30.0, 30.0));
        assert_eq!(view.nav(), Vector2::zeros());
    }

    #[test]
    fn custom_settings() {
        let settings = ZoomSettings {
            start_scale: 2.0,
            scale_factor: 2.0,
        };
        let mut view = ZoomView::with_settings(10.0, 10.0, settings).unwrap();
        assert_eq!(view.scale(), 2.0);
        view.zoom_in();
        assert_eq!(view.scale(), 4.0);
        view.zoom_out();
        view.zoom_out();
        assert_eq!(view.scale(), 2.0);
        assert_eq!(view.settings(), &settings);
    }
}
