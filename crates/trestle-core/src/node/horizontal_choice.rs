//! Alternatives laid out left to right instead of stacked.

use super::{Layout, Metrics, Node, SPACING, max_of, path, push_gap_runs};
use crate::{
    ConstructionError,
    draw::{Element, Sweep},
    geometry::Point,
    style::StyleConfig,
};

/// A choice whose branches sit side by side, fed by an upper track and
/// drained by a lower track.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalChoice {
    items: Vec<Node>,
    upper_track: f64,
    lower_track: f64,
    metrics: Metrics,
}

impl HorizontalChoice {
    /// Requires at least two items; the single-item case is a plain
    /// sequence and is handled by the caller.
    pub(crate) fn new(items: Vec<Node>, style: &StyleConfig) -> Result<Self, ConstructionError> {
        if items.len() < 2 {
            return Err(ConstructionError::ArityMismatch {
                container: "HorizontalChoice",
                expected: "at least two",
                found: items.len(),
            });
        }
        let arc = style.arc_radius();
        let vs = style.min_vertical_separation();
        let n = items.len();
        let first = items[0].metrics();
        let last = items[n - 1].metrics();
        let all_but_last = &items[..n - 1];
        let middles = &items[1..n - 1];

        let mut width = arc;
        width += 2.0 * arc * (n - 1) as f64;
        width += items
            .iter()
            .map(|item| item.metrics().spaced_width(SPACING))
            .sum::<f64>();
        if last.height() > 0.0 {
            width += arc;
        }
        width += arc;

        let upper_track = f64::max(
            f64::max(2.0 * arc, vs),
            max_of(all_but_last, |m| m.up()) + vs,
        );
        let up = f64::max(upper_track, last.up());

        let middle_depth = if middles.is_empty() {
            f64::NEG_INFINITY
        } else {
            max_of(middles, |m| m.height() + f64::max(m.down() + vs, 2.0 * arc))
        };
        let mut lower_track = f64::max(
            f64::max(vs, middle_depth),
            last.height() + last.down() + vs,
        );
        if first.height() < lower_track {
            lower_track = f64::max(lower_track, first.height() + 2.0 * arc);
        }
        let down = f64::max(lower_track, first.height() + first.down());

        Ok(Self {
            metrics: Metrics::new(width, up, down, 0.0, false),
            items,
            upper_track,
            lower_track,
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Layout for HorizontalChoice {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let arc = style.arc_radius();
        let mut group = Element::new("g");
        let mut x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let n = self.items.len();
        let first = self.items[0].metrics();
        let last = self.items[n - 1].metrics();
        let inner_hops = (n as f64 - 2.0) * 2.0 * arc;

        let upper_span = self.items[..n - 1]
            .iter()
            .map(|item| item.metrics().spaced_width(SPACING))
            .sum::<f64>()
            + inner_hops
            - arc;
        group.push(
            path(x, y, style)
                .arc(Sweep::Se)
                .v(-(self.upper_track - 2.0 * arc))
                .arc(Sweep::Wn)
                .h(upper_span)
                .finish(),
        );

        let lower_span = self.items[1..]
            .iter()
            .map(|item| item.metrics().spaced_width(SPACING))
            .sum::<f64>()
            + inner_hops
            + if last.height() > 0.0 { arc } else { 0.0 }
            - arc;
        let lower_start = x + arc + first.spaced_width(SPACING) + 2.0 * arc;
        group.push(
            path(lower_start, y + self.lower_track, style)
                .h(lower_span)
                .arc(Sweep::Se)
                .v(-(self.lower_track - 2.0 * arc))
                .arc(Sweep::Wn)
                .finish(),
        );

        for (i, item) in self.items.iter().enumerate() {
            let m = item.metrics();
            // input track
            if i == 0 {
                group.push(path(x, y, style).h(arc).finish());
                x += arc;
            } else {
                group.push(
                    path(x, y - self.upper_track, style)
                        .arc(Sweep::Ne)
                        .v(self.upper_track - 2.0 * arc)
                        .arc(Sweep::Ws)
                        .finish(),
                );
                x += 2.0 * arc;
            }

            let item_width = m.spaced_width(SPACING);
            group.push(item.format(Point::new(x, y), item_width, style));
            x += item_width;

            // output track
            if i == n - 1 {
                if m.height() == 0.0 {
                    group.push(path(x, y, style).h(arc).finish());
                } else {
                    group.push(path(x, y + m.height(), style).arc(Sweep::Se).finish());
                }
            } else if i == 0 && m.height() > self.lower_track {
                if m.height() - self.lower_track >= 2.0 * arc {
                    group.push(
                        path(x, y + m.height(), style)
                            .arc(Sweep::Se)
                            .v(self.lower_track - m.height() + 2.0 * arc)
                            .arc(Sweep::Wn)
                            .finish(),
                    );
                } else {
                    // not enough room for two arcs
                    group.push(
                        path(x, y + m.height(), style)
                            .line(2.0 * arc, self.lower_track - m.height())
                            .finish(),
                    );
                }
            } else {
                group.push(
                    path(x, y + m.height(), style)
                        .arc(Sweep::Ne)
                        .v(self.lower_track - m.height() - 2.0 * arc)
                        .arc(Sweep::Ws)
                        .finish(),
                );
            }
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::Railroad;
    use crate::node::Child;

    #[test]
    fn test_collapse_and_empty() {
        let rr = Railroad::default();
        assert!(matches!(
            rr.horizontal_choice(["a"]).unwrap(),
            Node::Sequence(_)
        ));
        let err = rr.horizontal_choice(Vec::<Node>::new()).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::EmptyChildren {
                container: "HorizontalChoice"
            }
        );
    }

    #[test]
    fn test_metrics_two_terminals() {
        let rr = Railroad::default();
        let node = rr.horizontal_choice(["a", "b"]).unwrap();
        let m = node.metrics();
        // 10 + 20 + 48.5 * 2 + 10
        assert_approx_eq!(f64, m.width(), 137.0);
        assert_eq!(m.height(), 0.0);
        // max(20, 8, 11 + 8)
        assert_eq!(m.up(), 20.0);
        // lower track max(8, 0 + 11 + 8) raised to first exit + 20
        assert_eq!(m.down(), 20.0);
        assert!(!m.needs_space());
    }

    #[test]
    fn test_tall_last_item_adds_curve_room() {
        let rr = Railroad::default();
        let node = rr
            .horizontal_choice([Child::from("a"), Child::from(rr.block_with(30.0, 5.0, 10.0, 5.0))])
            .unwrap();
        // 10 + 20 + 48.5 + 50 + 10 + 10
        assert_approx_eq!(f64, node.metrics().width(), 148.5);
    }

    #[test]
    fn test_shallow_first_exit_draws_straight_diagonal() {
        let style = StyleConfig::default();
        let rr = Railroad::new(style.clone());
        // first exits 25 below the line; lower track sits at 19
        let node = rr
            .horizontal_choice([rr.block_with(30.0, 5.0, 25.0, 5.0), rr.terminal("b")])
            .unwrap();
        let element = node.format(Point::new(0.0, 0.0), node.metrics().width(), &style);
        let first_exit = &element.children()[6];
        assert_eq!(first_exit.attr("d"), Some("M60 25l20 -6h.5"));
    }

    #[test]
    fn test_deep_first_exit_curves_up() {
        let style = StyleConfig::default();
        let rr = Railroad::new(style.clone());
        let node = rr
            .horizontal_choice([rr.block_with(30.0, 5.0, 60.0, 5.0), rr.terminal("b")])
            .unwrap();
        let element = node.format(Point::new(0.0, 0.0), node.metrics().width(), &style);
        let first_exit = &element.children()[6];
        assert_eq!(
            first_exit.attr("d"),
            Some("M60 60a10 10 0 0 0 10 -10v-21a10 10 0 0 1 10 -10h.5")
        );
    }
}
