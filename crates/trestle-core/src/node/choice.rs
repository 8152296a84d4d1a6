//! Branching containers: [`Choice`] and [`MultipleChoice`].
//!
//! Both stack their items vertically around a `normal` item that sits on
//! the main line. Items before `normal` curve above it, items after curve
//! below.

use std::{fmt, str::FromStr};

use super::{Layout, Metrics, Node, max_of, path, push_gap_runs};
use crate::{
    ConstructionError,
    draw::{Element, Sweep},
    geometry::Point,
    style::StyleConfig,
};

fn check_normal(
    container: &'static str,
    normal: usize,
    items: &[Node],
) -> Result<(), ConstructionError> {
    if normal < items.len() {
        Ok(())
    } else {
        Err(ConstructionError::InvalidIndex {
            container,
            index: i64::try_from(normal).unwrap_or(i64::MAX),
            len: items.len(),
        })
    }
}

/// Exactly one of several alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    normal: usize,
    items: Vec<Node>,
    metrics: Metrics,
}

impl Choice {
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidIndex`] when `normal` does not
    /// index `items`.
    pub(crate) fn new(
        normal: usize,
        items: Vec<Node>,
        style: &StyleConfig,
    ) -> Result<Self, ConstructionError> {
        check_normal("Choice", normal, &items)?;
        let r = style.arc_radius();
        let vs = style.min_vertical_separation();
        let last = items.len() - 1;

        let width = max_of(&items, |m| m.width()) + 4.0 * r;
        let height = items[normal].metrics().height();

        let mut up = items[0].metrics().up();
        for i in 0..normal {
            let arcs = if i == normal - 1 { 2.0 * r } else { r };
            let (cur, next) = (items[i].metrics(), items[i + 1].metrics());
            up += f64::max(arcs, cur.height() + cur.down() + vs + next.up());
        }

        // last lane's bottom, measured from its entry
        let tail = items[last].metrics();
        let mut down = tail.height() + tail.down();
        for i in normal + 1..=last {
            let arcs = if i == normal + 1 { 2.0 * r } else { r };
            let (prev, cur) = (items[i - 1].metrics(), items[i].metrics());
            down += f64::max(arcs, prev.height() + prev.down() + vs + cur.up());
        }
        // already counted in height
        down -= height;

        Ok(Self {
            normal,
            metrics: Metrics::new(width, up, down, height, false),
            items,
        })
    }

    pub fn normal(&self) -> usize {
        self.normal
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Layout for Choice {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let r = style.arc_radius();
        let vs = style.min_vertical_separation();
        let mut group = Element::new("g");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let last = self.items.len() - 1;
        let inner_width = self.metrics.width() - 4.0 * r;
        let height = self.metrics.height();
        let normal = self.items[self.normal].metrics();

        // branches above the main line, nearest first
        let mut distance = 0.0;
        for i in (0..self.normal).rev() {
            let item = &self.items[i];
            let m = item.metrics();
            if i == self.normal - 1 {
                distance = f64::max(2.0 * r, normal.up() + vs + m.down() + m.height());
            }
            group.push(
                path(x, y, style)
                    .arc(Sweep::Se)
                    .up(distance - 2.0 * r)
                    .arc(Sweep::Wn)
                    .finish(),
            );
            group.push(item.format(Point::new(x + 2.0 * r, y - distance), inner_width, style));
            group.push(
                path(x + 2.0 * r + inner_width, y - distance + m.height(), style)
                    .arc(Sweep::Ne)
                    .down(distance - m.height() + height - 2.0 * r)
                    .arc(Sweep::Ws)
                    .finish(),
            );
            let above = if i == 0 {
                0.0
            } else {
                let prev = self.items[i - 1].metrics();
                prev.down() + prev.height()
            };
            distance += f64::max(r, m.up() + vs + above);
        }

        // main line
        group.push(path(x, y, style).right(2.0 * r).finish());
        group.push(self.items[self.normal].format(Point::new(x + 2.0 * r, y), inner_width, style));
        group.push(
            path(x + 2.0 * r + inner_width, y + height, style)
                .right(2.0 * r)
                .finish(),
        );

        // branches below the main line, nearest first
        for i in self.normal + 1..=last {
            let item = &self.items[i];
            let m = item.metrics();
            if i == self.normal + 1 {
                distance = f64::max(2.0 * r, height + normal.down() + vs + m.up());
            }
            group.push(
                path(x, y, style)
                    .arc(Sweep::Ne)
                    .down(distance - 2.0 * r)
                    .arc(Sweep::Ws)
                    .finish(),
            );
            group.push(item.format(Point::new(x + 2.0 * r, y + distance), inner_width, style));
            group.push(
                path(x + 2.0 * r + inner_width, y + distance + m.height(), style)
                    .arc(Sweep::Se)
                    .up(distance - 2.0 * r + m.height() - height)
                    .arc(Sweep::Wn)
                    .finish(),
            );
            let below = if i == last {
                0.0
            } else {
                self.items[i + 1].metrics().up()
            };
            distance += f64::max(r, m.height() + m.down() + vs + below);
        }
        group
    }
}

/// Whether a [`MultipleChoice`] takes some or all of its branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChoiceKind {
    /// One or more branches, once each, in any order
    #[default]
    Any,
    /// All branches, once each, in any order
    All,
}

impl ChoiceKind {
    fn badge(self) -> &'static str {
        match self {
            Self::Any => "1+",
            Self::All => "all",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Any => "take one or more branches, once each, in any order",
            Self::All => "take all branches, once each, in any order",
        }
    }
}

impl FromStr for ChoiceKind {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(ConstructionError::InvalidEnum {
                container: "MultipleChoice",
                argument: "kind",
                value: s.to_string(),
                expected: "any, all",
            }),
        }
    }
}

impl fmt::Display for ChoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Several alternatives that may each be taken once, in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoice {
    normal: usize,
    kind: ChoiceKind,
    items: Vec<Node>,
    inner_width: f64,
    metrics: Metrics,
}

impl MultipleChoice {
    /// Left margin reserved for the badge.
    const BADGE_WIDTH: f64 = 30.0;
    /// Right margin reserved for the loop icon.
    const ICON_WIDTH: f64 = 20.0;
    /// Extra separation between the normal item and its neighbours.
    const NEIGHBOUR_GAP: f64 = 10.0;

    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidIndex`] when `normal` does not
    /// index `items`.
    pub(crate) fn new(
        normal: usize,
        kind: ChoiceKind,
        items: Vec<Node>,
        style: &StyleConfig,
    ) -> Result<Self, ConstructionError> {
        check_normal("MultipleChoice", normal, &items)?;
        let r = style.arc_radius();
        let vs = style.min_vertical_separation();
        let last = items.len() - 1;

        let inner_width = max_of(&items, |m| m.width());
        let width = Self::BADGE_WIDTH + r + inner_width + r + Self::ICON_WIDTH;
        let height = items[normal].metrics().height();
        let mut up = items[0].metrics().up();
        let tail = items[last].metrics();
        let mut down = tail.height() + tail.down();

        for (i, item) in items.iter().enumerate() {
            let m = item.metrics();
            let minimum = if i + 1 == normal || i == normal + 1 {
                Self::NEIGHBOUR_GAP + r
            } else {
                r
            };
            if i < normal {
                let next = items[i + 1].metrics();
                up += f64::max(minimum, m.height() + m.down() + vs + next.up());
            } else if i > normal {
                let prev = items[i - 1].metrics();
                down += f64::max(minimum, m.up() + vs + prev.down() + prev.height());
            }
        }
        // already counted in height
        down -= height;

        Ok(Self {
            normal,
            kind,
            inner_width,
            metrics: Metrics::new(width, up, down, height, true),
            items,
        })
    }

    pub fn normal(&self) -> usize {
        self.normal
    }

    pub fn kind(&self) -> ChoiceKind {
        self.kind
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    fn badge(&self, x: f64, y: f64) -> Element {
        use crate::draw::fmt_num;
        let width = self.metrics.width();
        Element::new("g")
            .with_attr("class", "diagram-text")
            .with_child(Element::text("title", self.kind.description()))
            .with_child(
                Element::new("path")
                    .with_attr(
                        "d",
                        format!(
                            "M {} {} h -26 a 4 4 0 0 0 -4 4 v 12 a 4 4 0 0 0 4 4 h 26 z",
                            fmt_num(x + 30.0),
                            fmt_num(y - 10.0)
                        ),
                    )
                    .with_attr("class", "diagram-text"),
            )
            .with_child(
                Element::text("text", self.kind.badge())
                    .with_attr("x", x + 15.0)
                    .with_attr("y", y + 4.0)
                    .with_attr("class", "diagram-text"),
            )
            .with_child(
                Element::new("path")
                    .with_attr(
                        "d",
                        format!(
                            "M {} {} h 16 a 4 4 0 0 1 4 4 v 12 a 4 4 0 0 1 -4 4 h -16 z",
                            fmt_num(x + width - 20.0),
                            fmt_num(y - 10.0)
                        ),
                    )
                    .with_attr("class", "diagram-text"),
            )
            .with_child(
                Element::new("path")
                    .with_attr(
                        "d",
                        format!(
                            "M {} {} a 4 4 0 1 0 6 -1 m 2.75 -1 h -4 v 4 m 0 -3 h 2",
                            fmt_num(x + width - 13.0),
                            fmt_num(y - 2.0)
                        ),
                    )
                    .with_attr("style", "stroke-width: 1.75"),
            )
    }
}

impl Layout for MultipleChoice {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn format(&self, origin: Point, width: f64, style: &StyleConfig) -> Element {
        let r = style.arc_radius();
        let vs = style.min_vertical_separation();
        let mut group = Element::new("g");
        let x = push_gap_runs(&mut group, origin, width, &self.metrics, style);
        let y = origin.y();
        let inner = self.inner_width;
        let normal = self.items[self.normal].metrics();
        let min_gap = Self::NEIGHBOUR_GAP + r;
        let left = x + Self::BADGE_WIDTH;

        let mut distance = 0.0;
        for i in (0..self.normal).rev() {
            let item = &self.items[i];
            let m = item.metrics();
            if i == self.normal - 1 {
                distance = f64::max(min_gap, normal.up() + vs + m.down() + m.height());
            }
            group.push(
                path(left, y, style)
                    .up(distance - r)
                    .arc(Sweep::Wn)
                    .finish(),
            );
            group.push(item.format(Point::new(left + r, y - distance), inner, style));
            group.push(
                path(left + r + inner, y - distance + m.height(), style)
                    .arc(Sweep::Ne)
                    .down(distance - m.height() + normal.height() - r - 10.0)
                    .finish(),
            );
            if i != 0 {
                let prev = self.items[i - 1].metrics();
                distance += f64::max(r, m.up() + vs + prev.down() + prev.height());
            }
        }

        group.push(path(left, y, style).right(r).finish());
        group.push(self.items[self.normal].format(Point::new(left + r, y), inner, style));
        group.push(
            path(left + r + inner, y + normal.height(), style)
                .right(r)
                .finish(),
        );

        let last = self.items.len() - 1;
        for i in self.normal + 1..=last {
            let item = &self.items[i];
            let m = item.metrics();
            if i == self.normal + 1 {
                distance = f64::max(min_gap, normal.height() + normal.down() + vs + m.up());
            }
            group.push(
                path(left, y, style)
                    .down(distance - r)
                    .arc(Sweep::Ws)
                    .finish(),
            );
            group.push(item.format(Point::new(left + r, y + distance), inner, style));
            group.push(
                path(left + r + inner, y + distance + m.height(), style)
                    .arc(Sweep::Se)
                    .up(distance - r + m.height() - normal.height())
                    .finish(),
            );
            if i != last {
                let next = self.items[i + 1].metrics();
                distance += f64::max(r, m.height() + m.down() + vs + next.up());
            }
        }

        group.push(self.badge(x, y));
        group
    }
}
