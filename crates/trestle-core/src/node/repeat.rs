//! Repetition: an item with a loop back underneath it.

use super::{Layout, Metrics, Node, path, push_gap_runs};
use crate::{
    draw::{Element, Sweep},
    geometry::Point,
    style::StyleConfig,
};

/// An item taken one or more times, optionally with a separator on the
/// loop-back track.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOrMore {
    item: Box<Node>,
    repeat: Box<Node>,
    metrics: Metrics,
}

impl OneOrMore {
    pub(crate) fn new(item: Node, repeat: Node, style: &StyleConfig) -> Self {
        let r = style.arc_radius();
        let (im, rm) = (item.metrics(), repeat.metrics());
        let width = f64::max(im.width(), rm.width()) + 2.0 * r;
        let down = f64::max(
            2.0 * r,
            im.down() + style.min_vertical_separation() + rm.up() + rm.height() + rm.down(),
        );
        let metrics = Metrics::new(width, im.up(), down, im.height(), true);
        Self {
            item: Box::new(item),
            repeat: Box::new(repeat),
            metrics,
        }
    }

    pub fn item(&self) -> &Node {
        &self.item
    }

    /// The separator drawn on the loop-back track.
    pub fn repeat(&self) -> &Node {
        &self.repeat
    }
}

impl Layout for OneOrMore {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let r = style.arc_radius();
        let mut group = Element::new("g");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let own_width = self.metrics.width();
        let (im, rm) = (self.item.metrics(), self.repeat.metrics());

        // item
        group.push(path(x, y, style).right(r).finish());
        group.push(self.item.format(Point::new(x + r, y), own_width - 2.0 * r, style));
        group.push(
            path(x + own_width - r, y + self.metrics.height(), style)
                .right(r)
                .finish(),
        );

        // loop back
        let distance = f64::max(
            2.0 * r,
            im.height() + im.down() + style.min_vertical_separation() + rm.up(),
        );
        group.push(
            path(x + r, y, style)
                .arc(Sweep::Nw)
                .down(distance - 2.0 * r)
                .arc(Sweep::Ws)
                .finish(),
        );
        group.push(self.repeat.format(
            Point::new(x + r, y + distance),
            own_width - 2.0 * r,
            style,
        ));
        group.push(
            path(x + own_width - r, y + distance + rm.height(), style)
                .arc(Sweep::Se)
                .up(distance - 2.0 * r + rm.height() - im.height())
                .arc(Sweep::En)
                .finish(),
        );
        group
    }
}
