//! A sequence in which every item may be skipped, as long as at least one
//! is taken.

use super::{Layout, Metrics, Node, SPACING, path, push_gap_runs};
use crate::{
    ConstructionError,
    draw::{Element, Sweep},
    geometry::Point,
    style::StyleConfig,
};

/// Items on the main line with an upper bypass over the leading run and a
/// lower bypass under every later item.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalSequence {
    items: Vec<Node>,
    metrics: Metrics,
}

impl OptionalSequence {
    /// Requires at least two items; the single-item case is a plain
    /// sequence and is handled by the caller.
    pub(crate) fn new(items: Vec<Node>, style: &StyleConfig) -> Result<Self, ConstructionError> {
        if items.len() < 2 {
            return Err(ConstructionError::ArityMismatch {
                container: "OptionalSequence",
                expected: "at least two",
                found: items.len(),
            });
        }
        let arc = style.arc_radius();
        let vs = style.min_vertical_separation();

        let height: f64 = items.iter().map(|item| item.metrics().height()).sum();
        let mut width = 0.0;
        let mut up: f64 = 0.0;
        let mut down = items[0].metrics().down();
        let mut height_so_far = 0.0;

        for (i, item) in items.iter().enumerate() {
            let m = item.metrics();
            up = up.max(f64::max(2.0 * arc, m.up() + vs) - height_so_far);
            height_so_far += m.height();
            if i > 0 {
                down = f64::max(
                    height + down,
                    height_so_far + f64::max(2.0 * arc, m.down() + vs),
                ) - height;
            }
            let item_width = m.spaced_width(SPACING / 2.0);
            if i == 0 {
                width += arc + f64::max(item_width, arc);
            } else {
                width += 2.0 * arc + f64::max(item_width, arc) + arc;
            }
        }

        Ok(Self {
            metrics: Metrics::new(width, up, down, height, false),
            items,
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Layout for OptionalSequence {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let arc = style.arc_radius();
        let vs = style.min_vertical_separation();
        let mut group = Element::new("g");
        let mut x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let mut y = origin.y();
        let upper_line_y = y - self.metrics.up();
        let last = self.items.len() - 1;

        for (i, item) in self.items.iter().enumerate() {
            let m = item.metrics();
            let item_space = if m.needs_space() { SPACING } else { 0.0 };
            let item_width = m.width() + item_space;

            if i == 0 {
                // upper skip
                group.push(
                    path(x, y, style)
                        .arc(Sweep::Se)
                        .up(y - upper_line_y - 2.0 * arc)
                        .arc(Sweep::Wn)
                        .right(item_width - arc)
                        .arc(Sweep::Ne)
                        .down(y + m.height() - upper_line_y - 2.0 * arc)
                        .arc(Sweep::Ws)
                        .finish(),
                );
                group.push(path(x, y, style).right(item_space + arc).finish());
                group.push(item.format(Point::new(x + item_space + arc, y), m.width(), style));
                x += item_width + arc;
                y += m.height();
                continue;
            }

            if i < last {
                group.push(
                    path(x, upper_line_y, style)
                        .right(2.0 * arc + f64::max(item_width, arc) + arc)
                        .arc(Sweep::Ne)
                        .down(y - upper_line_y + m.height() - 2.0 * arc)
                        .arc(Sweep::Ws)
                        .finish(),
                );
            }

            group.push(path(x, y, style).right(2.0 * arc).finish());
            group.push(item.format(Point::new(x + 2.0 * arc, y), m.width(), style));
            group.push(
                path(x + 2.0 * arc + m.width(), y + m.height(), style)
                    .right(item_space + arc)
                    .finish(),
            );
            // lower skip
            group.push(
                path(x, y, style)
                    .arc(Sweep::Ne)
                    .down(m.height() + f64::max(m.down() + vs, 2.0 * arc) - 2.0 * arc)
                    .arc(Sweep::Ws)
                    .right(item_width - arc)
                    .arc(Sweep::Se)
                    .up(m.down() + vs - 2.0 * arc)
                    .arc(Sweep::Wn)
                    .finish(),
            );

            if i < last {
                x += 2.0 * arc + f64::max(item_width, arc) + arc;
                y += m.height();
            }
        }
        group
    }
}
