//! Connector path construction.
//!
//! Every connector in a railroad diagram is a single `<path>` whose `d`
//! attribute is built up from relative drawing commands. [`PathBuilder`]
//! records those commands starting at an absolute point and produces the
//! final [`Element`] through [`PathBuilder::finish`].
//!
//! # Example
//!
//! ```
//! # use trestle_core::draw::{PathBuilder, Sweep};
//! # use trestle_core::geometry::Point;
//! let path = PathBuilder::new(Point::new(10.0, 20.0), 10.0)
//!     .arc(Sweep::Ne)
//!     .down(12.0)
//!     .arc(Sweep::Ws)
//!     .finish();
//! assert_eq!(
//!     path.attr("d"),
//!     Some("M10 20a10 10 0 0 1 10 10v12a10 10 0 0 0 10 10h.5")
//! );
//! ```

use super::element::{Element, fmt_num};
use crate::geometry::Point;

/// A quarter-circle turn, named by the compass direction the line travels
/// before and after the turn.
///
/// For example [`Sweep::Ne`] starts heading north (up) and ends heading east.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Ne,
    Es,
    Sw,
    Wn,
    Nw,
    Ws,
    Se,
    En,
}

impl Sweep {
    fn code(self) -> [u8; 2] {
        match self {
            Self::Ne => *b"ne",
            Self::Es => *b"es",
            Self::Sw => *b"sw",
            Self::Wn => *b"wn",
            Self::Nw => *b"nw",
            Self::Ws => *b"ws",
            Self::Se => *b"se",
            Self::En => *b"en",
        }
    }

    fn clockwise(self) -> bool {
        matches!(self, Self::Ne | Self::Es | Self::Sw | Self::Wn)
    }
}

/// Compass point on a circle where an eighth arc begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

/// Direction of travel around an eighth arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Builder for the `d` attribute of one connector path.
///
/// Commands are appended in call order; numbers are written in their
/// shortest round-trip form.
#[derive(Debug, Clone, PartialEq)]
pub struct PathBuilder {
    data: String,
    arc_radius: f64,
}

impl PathBuilder {
    /// Starts a new path at an absolute position.
    ///
    /// # Arguments
    ///
    /// * `start` - Absolute start point, written as `M{x} {y}`
    /// * `arc_radius` - Radius used by [`arc`](Self::arc) and [`arc_8`](Self::arc_8)
    pub fn new(start: Point, arc_radius: f64) -> Self {
        Self {
            data: format!("M{} {}", fmt_num(start.x()), fmt_num(start.y())),
            arc_radius,
        }
    }

    /// Relative move without drawing.
    pub fn move_by(mut self, dx: f64, dy: f64) -> Self {
        self.data.push_str(&format!("m{} {}", fmt_num(dx), fmt_num(dy)));
        self
    }

    /// Relative horizontal line.
    pub fn h(mut self, dx: f64) -> Self {
        self.data.push_str(&format!("h{}", fmt_num(dx)));
        self
    }

    /// Horizontal line to the right, clamped at zero.
    pub fn right(self, dx: f64) -> Self {
        self.h(dx.max(0.0))
    }

    /// Horizontal line to the left, clamped at zero.
    pub fn left(self, dx: f64) -> Self {
        self.h(-dx.max(0.0))
    }

    /// Relative vertical line.
    pub fn v(mut self, dy: f64) -> Self {
        self.data.push_str(&format!("v{}", fmt_num(dy)));
        self
    }

    /// Vertical line downwards, clamped at zero.
    pub fn down(self, dy: f64) -> Self {
        self.v(dy.max(0.0))
    }

    /// Vertical line upwards, clamped at zero.
    pub fn up(self, dy: f64) -> Self {
        self.v(-dy.max(0.0))
    }

    /// Relative straight line in any direction.
    pub fn line(mut self, dx: f64, dy: f64) -> Self {
        self.data.push_str(&format!("l{} {}", fmt_num(dx), fmt_num(dy)));
        self
    }

    /// Quarter-circle arc.
    ///
    /// The x offset is negative when the sweep starts heading east or ends
    /// heading west; the y offset is negative when it starts heading south or
    /// ends heading north.
    pub fn arc(mut self, sweep: Sweep) -> Self {
        let [from, to] = sweep.code();
        let r = self.arc_radius;
        let x = if from == b'e' || to == b'w' { -r } else { r };
        let y = if from == b's' || to == b'n' { -r } else { r };
        self.data.push_str(&format!(
            "a{r} {r} 0 0 {cw} {x} {y}",
            r = fmt_num(r),
            cw = u8::from(sweep.clockwise()),
            x = fmt_num(x),
            y = fmt_num(y),
        ));
        self
    }

    /// Eighth-circle arc starting at compass point `start`.
    pub fn arc_8(mut self, start: Compass, rotation: Rotation) -> Self {
        let r = self.arc_radius;
        let s2 = 1.0 / 2f64.sqrt() * r;
        let s2inv = r - s2;
        let (dx, dy) = match (rotation, start) {
            (Rotation::Clockwise, Compass::N) => (s2, s2inv),
            (Rotation::Clockwise, Compass::Ne) => (s2inv, s2),
            (Rotation::Clockwise, Compass::E) => (-s2inv, s2),
            (Rotation::Clockwise, Compass::Se) => (-s2, s2inv),
            (Rotation::Clockwise, Compass::S) => (-s2, -s2inv),
            (Rotation::Clockwise, Compass::Sw) => (-s2inv, -s2),
            (Rotation::Clockwise, Compass::W) => (s2inv, -s2),
            (Rotation::Clockwise, Compass::Nw) => (s2, -s2inv),
            (Rotation::CounterClockwise, Compass::N) => (-s2, s2inv),
            (Rotation::CounterClockwise, Compass::Nw) => (-s2inv, s2),
            (Rotation::CounterClockwise, Compass::W) => (s2inv, s2),
            (Rotation::CounterClockwise, Compass::Sw) => (s2, s2inv),
            (Rotation::CounterClockwise, Compass::S) => (s2, -s2inv),
            (Rotation::CounterClockwise, Compass::Se) => (s2inv, -s2),
            (Rotation::CounterClockwise, Compass::E) => (-s2inv, -s2),
            (Rotation::CounterClockwise, Compass::Ne) => (-s2, -s2inv),
        };
        let cw = u8::from(rotation == Rotation::Clockwise);
        self.data.push_str(&format!(
            "a {r} {r} 0 0 {cw} {dx} {dy}",
            r = fmt_num(r),
            dx = fmt_num(dx),
            dy = fmt_num(dy),
        ));
        self
    }

    /// Returns the path data accumulated so far.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Appends the trailing half-unit overlap and produces the `<path>` element.
    pub fn finish(mut self) -> Element {
        self.data.push_str("h.5");
        Element::new("path").with_attr("d", self.data)
    }
}
