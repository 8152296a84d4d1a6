//! Two items taken in alternation, any number of times.

use super::{Layout, Metrics, Node, SPACING, path, push_gap_runs};
use crate::{
    ConstructionError,
    draw::{Compass, Element, Rotation, Sweep},
    geometry::Point,
    style::StyleConfig,
};

/// Geometry of the crossing connectors between the two lanes.
struct Crossing {
    arc_x: f64,
    arc_y: f64,
    cross_y: f64,
    cross_x: f64,
}

impl Crossing {
    fn new(style: &StyleConfig) -> Self {
        let arc = style.arc_radius();
        let arc_x = 1.0 / 2f64.sqrt() * arc * 2.0;
        let arc_y = (1.0 - 1.0 / 2f64.sqrt()) * arc * 2.0;
        let cross_y = f64::max(arc, style.min_vertical_separation());
        let cross_x = (cross_y - arc_y) + arc_x;
        Self {
            arc_x,
            arc_y,
            cross_y,
            cross_x,
        }
    }
}

/// The first item on an upper lane, the second on a lower lane, with
/// crossing connectors so either may follow the other.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternatingSequence {
    items: Vec<Node>,
    metrics: Metrics,
}

impl AlternatingSequence {
    /// Requires exactly two items; one item is a plain sequence and is
    /// handled by the caller.
    pub(crate) fn new(items: Vec<Node>, style: &StyleConfig) -> Result<Self, ConstructionError> {
        let [first, second] = items.as_slice() else {
            return Err(ConstructionError::ArityMismatch {
                container: "AlternatingSequence",
                expected: "one or two",
                found: items.len(),
            });
        };
        let arc = style.arc_radius();
        let vs = style.min_vertical_separation();
        let crossing = Crossing::new(style);
        let (first, second) = (first.metrics(), second.metrics());

        let first_out = f64::max(
            2.0 * arc,
            f64::max(
                crossing.cross_y / 2.0 + 2.0 * arc,
                crossing.cross_y / 2.0 + vs + first.down(),
            ),
        );
        let up = first_out + first.height() + first.up();

        let second_in = f64::max(
            2.0 * arc,
            f64::max(crossing.cross_y / 2.0 + 2.0 * arc, crossing.cross_y / 2.0 + vs + second.up()),
        );
        let down = second_in + second.height() + second.down();

        let inner = f64::max(
            first.spaced_width(SPACING),
            f64::max(crossing.cross_x, second.spaced_width(SPACING)),
        );
        let width = 2.0 * arc + inner + 2.0 * arc;

        Ok(Self {
            metrics: Metrics::new(width, up, down, 0.0, false),
            items,
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Layout for AlternatingSequence {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let arc = style.arc_radius();
        let mut group = Element::new("g");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let own = &self.metrics;
        let (first, second) = (&self.items[0], &self.items[1]);
        let (fm, sm) = (first.metrics(), second.metrics());

        // top
        let first_in = own.up() - fm.up();
        let first_out = own.up() - fm.up() - fm.height();
        group.push(
            path(x, y, style)
                .arc(Sweep::Se)
                .up(first_in - 2.0 * arc)
                .arc(Sweep::Wn)
                .finish(),
        );
        group.push(first.format(
            Point::new(x + 2.0 * arc, y - first_in),
            own.width() - 4.0 * arc,
            style,
        ));
        group.push(
            path(x + own.width() - 2.0 * arc, y - first_out, style)
                .arc(Sweep::Ne)
                .down(first_out - 2.0 * arc)
                .arc(Sweep::Ws)
                .finish(),
        );

        // bottom
        let second_in = own.down() - sm.down() - sm.height();
        let second_out = own.down() - sm.down();
        group.push(
            path(x, y, style)
                .arc(Sweep::Ne)
                .down(second_in - 2.0 * arc)
                .arc(Sweep::Ws)
                .finish(),
        );
        group.push(second.format(
            Point::new(x + 2.0 * arc, y + second_in),
            own.width() - 4.0 * arc,
            style,
        ));
        group.push(
            path(x + own.width() - 2.0 * arc, y + second_out, style)
                .arc(Sweep::Se)
                .up(second_out - 2.0 * arc)
                .arc(Sweep::Wn)
                .finish(),
        );

        // crossover
        let c = Crossing::new(style);
        let cross_bar = (own.width() - 4.0 * arc - c.cross_x) / 2.0;
        group.push(
            path(x + arc, y - c.cross_y / 2.0 - arc, style)
                .arc(Sweep::Ws)
                .right(cross_bar)
                .arc_8(Compass::N, Rotation::Clockwise)
                .line(c.cross_x - c.arc_x, c.cross_y - c.arc_y)
                .arc_8(Compass::Sw, Rotation::CounterClockwise)
                .right(cross_bar)
                .arc(Sweep::Ne)
                .finish(),
        );
        group.push(
            path(x + arc, y + c.cross_y / 2.0 + arc, style)
                .arc(Sweep::Wn)
                .right(cross_bar)
                .arc_8(Compass::S, Rotation::CounterClockwise)
                .line(c.cross_x - c.arc_x, -(c.cross_y - c.arc_y))
                .arc_8(Compass::Nw, Rotation::Clockwise)
                .right(cross_bar)
                .arc(Sweep::Se)
                .finish(),
        );
        group
    }
}
