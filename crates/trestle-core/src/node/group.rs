//! A dashed, optionally labelled box around one item.

use super::{Layout, Metrics, Node, SPACING, push_gap_runs};
use crate::{draw::Element, geometry::Point, style::StyleConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    item: Box<Node>,
    label: Option<Box<Node>>,
    box_up: f64,
    metrics: Metrics,
}

impl Group {
    pub(crate) fn new(item: Node, label: Option<Node>, style: &StyleConfig) -> Self {
        let r = style.arc_radius();
        let vs = style.min_vertical_separation();
        let im = item.metrics();
        let label_width = label.as_ref().map_or(0.0, |l| l.metrics().width());

        let width = f64::max(f64::max(im.spaced_width(SPACING), label_width), 2.0 * r);
        let box_up = f64::max(im.up() + vs, r);
        let up = box_up + label.as_ref().map_or(0.0, |l| l.metrics().extent());
        let down = f64::max(im.down() + vs, r);
        let metrics = Metrics::new(width, up, down, im.height(), true);

        Self {
            item: Box::new(item),
            label: label.map(Box::new),
            box_up,
            metrics,
        }
    }

    pub fn item(&self) -> &Node {
        &self.item
    }

    pub fn label(&self) -> Option<&Node> {
        self.label.as_deref()
    }
}

impl Layout for Group {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let r = style.arc_radius();
        let mut group = Element::new("g");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let m = &self.metrics;

        group.push(
            Element::new("rect")
                .with_attr("x", x)
                .with_attr("y", y - self.box_up)
                .with_attr("width", m.width())
                .with_attr("height", self.box_up + m.height() + m.down())
                .with_attr("rx", r)
                .with_attr("ry", r)
                .with_attr("class", "group-box"),
        );
        group.push(self.item.format(Point::new(x, y), m.width(), style));
        if let Some(label) = &self.label {
            let lm = label.metrics();
            group.push(label.format(
                Point::new(x, y - (self.box_up + lm.down() + lm.height())),
                lm.width(),
                style,
            ));
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::Railroad;

    #[test]
    fn test_metrics_without_label() {
        let rr = Railroad::default();
        let node = rr.group("a", None);
        let m = node.metrics();
        assert_approx_eq!(f64, m.width(), 48.5);
        assert_eq!(m.up(), 19.0);
        assert_eq!(m.down(), 19.0);
        assert_eq!(m.height(), 0.0);
        assert!(m.needs_space());
    }

    #[test]
    fn test_label_raises_up_and_widens() {
        let rr = Railroad::default();
        let node = rr.group("a", Some("a long group label"));
        let m = node.metrics();
        // 18 * 7 + 10
        assert_approx_eq!(f64, m.width(), 136.0);
        assert_eq!(m.up(), 19.0 + 16.0);
    }

    #[test]
    fn test_format_box_and_label() {
        let style = StyleConfig::default();
        let rr = Railroad::new(style.clone());
        let node = rr.group("a", Some("grp"));
        let element = node.format(Point::new(0.0, 50.0), node.metrics().width(), &style);
        let children = element.children();
        let rect = &children[2];
        assert_eq!(rect.attr("class"), Some("group-box"));
        assert_eq!(rect.attr("y"), Some("31"));
        assert_eq!(rect.attr("height"), Some("38"));
        assert_eq!(rect.attr("rx"), Some("10"));

        let label = &children[4];
        assert_eq!(label.attr("class"), Some("comment"));
        // label entry sits at 50 - (19 + 8)
        assert_eq!(label.children()[2].attr("y"), Some("28"));
    }
}
