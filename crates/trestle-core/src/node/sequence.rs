//! Straight-line composition: [`Sequence`] and its wrapping variant [`Stack`].

use super::{Layout, Metrics, Node, SPACING, max_of, path, push_gap_runs};
use crate::{ConstructionError, draw::Element, geometry::Point, style::StyleConfig};

/// Sums the sequence metrics of `items` without the end adjustments.
///
/// Shared with the diagram root, which keeps the outer connector runs.
pub(crate) fn chain_metrics(items: &[Node]) -> (f64, f64, f64, f64) {
    let (mut width, mut up, mut down, mut height) = (0.0, 0.0, 0.0, 0.0);
    for item in items {
        let m = item.metrics();
        width += m.spaced_width(SPACING);
        up = f64::max(up, m.up() - height);
        height += m.height();
        down = f64::max(down - m.height(), m.down());
    }
    (width, up, down, height)
}

/// Items drawn one after another on the main line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    items: Vec<Node>,
    metrics: Metrics,
}

impl Sequence {
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyChildren`] when `items` is empty.
    pub(crate) fn new(items: Vec<Node>) -> Result<Self, ConstructionError> {
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return Err(ConstructionError::EmptyChildren {
                container: "Sequence",
            });
        };
        let (mut width, up, down, height) = chain_metrics(&items);
        if first.metrics().needs_space() {
            width -= SPACING;
        }
        if last.metrics().needs_space() {
            width -= SPACING;
        }
        Ok(Self {
            metrics: Metrics::new(width, up, down, height, true),
            items,
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Layout for Sequence {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let mut group = Element::new("g");
        let mut x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let mut y = origin.y();
        let last = self.items.len() - 1;

        for (i, item) in self.items.iter().enumerate() {
            let m = item.metrics();
            if m.needs_space() && i > 0 {
                group.push(path(x, y, style).h(SPACING).finish());
                x += SPACING;
            }
            group.push(item.format(Point::new(x, y), m.width(), style));
            x += m.width();
            y += m.height();
            if m.needs_space() && i < last {
                group.push(path(x, y, style).h(SPACING).finish());
                x += SPACING;
            }
        }
        group
    }
}

/// A sequence that wraps onto successive rows, joined by return loops.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    items: Vec<Node>,
    metrics: Metrics,
}

impl Stack {
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyChildren`] when `items` is empty.
    pub(crate) fn new(items: Vec<Node>, style: &StyleConfig) -> Result<Self, ConstructionError> {
        let (Some(first), Some(last_item)) = (items.first(), items.last()) else {
            return Err(ConstructionError::EmptyChildren { container: "Stack" });
        };
        let r = style.arc_radius();
        let vs = style.min_vertical_separation();

        let mut width = max_of(&items, |m| m.spaced_width(SPACING));
        if items.len() > 1 {
            width += 2.0 * r;
        }
        let up = first.metrics().up();
        let down = last_item.metrics().down();

        let last = items.len() - 1;
        let mut height = 0.0;
        for (i, item) in items.iter().enumerate() {
            let m = item.metrics();
            height += m.height();
            if i > 0 {
                height += f64::max(2.0 * r, m.up() + vs);
            }
            if i < last {
                height += f64::max(2.0 * r, m.down() + vs);
            }
        }

        Ok(Self {
            metrics: Metrics::new(width, up, down, height, true),
            items,
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Layout for Stack {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        use crate::draw::Sweep;

        let r = style.arc_radius();
        let vs = style.min_vertical_separation();
        let mut group = Element::new("g");

        let (before, after) = style.gaps(width, self.metrics.width());
        let (mut x, mut y) = (origin.x(), origin.y());
        group.push(path(x, y, style).h(before).finish());
        x += before;
        let x_initial = x;

        let multi = self.items.len() > 1;
        if multi {
            group.push(path(x, y, style).h(r).finish());
            x += r;
        }

        let inner_width = self.metrics.width() - if multi { 2.0 * r } else { 0.0 };
        let last = self.items.len() - 1;
        for (i, item) in self.items.iter().enumerate() {
            let m = item.metrics();
            group.push(item.format(Point::new(x, y), inner_width, style));
            x += inner_width;
            y += m.height();

            if i != last {
                let next_up = self.items[i + 1].metrics().up();
                group.push(
                    path(x, y, style)
                        .arc(Sweep::Ne)
                        .down(f64::max(0.0, m.down() + vs - 2.0 * r))
                        .arc(Sweep::Es)
                        .left(inner_width)
                        .arc(Sweep::Nw)
                        .down(f64::max(0.0, next_up + vs - 2.0 * r))
                        .arc(Sweep::Ws)
                        .finish(),
                );
                y += f64::max(m.down() + vs, 2.0 * r) + f64::max(next_up + vs, 2.0 * r);
                x = x_initial + r;
            }
        }

        if multi {
            group.push(path(x, y, style).h(r).finish());
            x += r;
        }
        group.push(path(x, y, style).h(after).finish());
        group
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::Railroad;

    #[test]
    fn test_sequence_rejects_empty() {
        let err = Sequence::new(Vec::new()).unwrap_err();
        assert_eq!(err, ConstructionError::EmptyChildren { container: "Sequence" });
    }

    #[test]
    fn test_sequence_metrics_subtract_end_spacing() {
        let rr = Railroad::default();
        let node = rr.sequence(["a", "bb"]).unwrap();
        let m = node.metrics();
        // 28.5 + 20 + 37 + 20 - 10 - 10
        assert_approx_eq!(f64, m.width(), 85.5);
        assert_eq!(m.up(), 11.0);
        assert_eq!(m.down(), 11.0);
        assert_eq!(m.height(), 0.0);
        assert!(m.needs_space());
    }

    #[test]
    fn test_sequence_accumulates_height() {
        let rr = Railroad::default();
        let node = rr
            .sequence([rr.block_with(30.0, 5.0, 10.0, 5.0), rr.block_with(30.0, 40.0, 20.0, 2.0)])
            .unwrap();
        let m = node.metrics();
        assert_eq!(m.height(), 30.0);
        // second item rises 40 above its own entry, which sits 10 below ours
        assert_eq!(m.up(), 30.0);
        assert_eq!(m.down(), 2.0);
    }

    #[test]
    fn test_sequence_format_inserts_inner_spacing_only() {
        let style = StyleConfig::default();
        let rr = Railroad::new(style.clone());
        let node = rr.sequence(["a", "b"]).unwrap();
        let element = node.format(Point::new(0.0, 0.0), node.metrics().width(), &style);
        let children = element.children();
        // two gap runs, a, spacer, spacer, b
        assert_eq!(children.len(), 6);
        assert_eq!(children[3].attr("d"), Some("M28.5 0h10h.5"));
        assert_eq!(children[4].attr("d"), Some("M38.5 0h10h.5"));
        assert_eq!(children[5].attr("class"), Some("terminal"));
    }

    #[test]
    fn test_stack_metrics() {
        let rr = Railroad::default();
        let node = rr.stack(["a", "b"]).unwrap();
        let m = node.metrics();
        assert_approx_eq!(f64, m.width(), 48.5 + 20.0);
        assert_eq!(m.up(), 11.0);
        assert_eq!(m.down(), 11.0);
        // max(20, 11 + 8) twice
        assert_eq!(m.height(), 40.0);
    }

    #[test]
    fn test_single_item_stack_has_no_side_arcs() {
        let rr = Railroad::default();
        let node = rr.stack(["a"]).unwrap();
        assert_approx_eq!(f64, node.metrics().width(), 48.5);
        assert_eq!(node.metrics().height(), 0.0);
    }

    #[test]
    fn test_stack_format_return_loop() {
        let style = StyleConfig::default();
        let rr = Railroad::new(style.clone());
        let node = rr.stack(["a", "b"]).unwrap();
        let element = node.format(Point::new(0.0, 0.0), node.metrics().width(), &style);
        let children = element.children();
        assert_eq!(children[0].attr("d"), Some("M0 0h0h.5"));
        assert_eq!(children[1].attr("d"), Some("M0 0h10h.5"));
        assert_eq!(
            children[3].attr("d"),
            Some("M58.5 0a10 10 0 0 1 10 10v0a10 10 0 0 1 -10 10h-48.5a10 10 0 0 0 -10 10v0a10 10 0 0 0 10 10h.5")
        );
        assert_eq!(children.last().and_then(|c| c.attr("d")), Some("M68.5 40h0h.5"));
    }

    #[test]
    fn test_stack_rejects_empty() {
        let rr = Railroad::default();
        let err = rr.stack(Vec::<Node>::new()).unwrap_err();
        assert_eq!(err.container(), "Stack");
    }
}
