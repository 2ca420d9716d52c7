// Wordlink – a word-chain graph puzzle
// Copyright (C) 2026  Wordlink authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::HashMap;
use super::geometry::Point;
use super::letter_graph::Edge;

pub const NODE_RADIUS: f64 = 22.0;
pub const LEGEND_NODE_RADIUS: f64 = 16.0;

// Vertical distance between curves sharing a lane group
pub const LANE_SPACING: f64 = 22.0;
// Lane offsets stop growing past this index
pub const MAX_LANE_BOOST: u32 = 6;

const LEFT_MARGIN: f64 = 40.0;
// Keeps the right-hand side clear for the legend panel
const RIGHT_MARGIN: f64 = 310.0;
const MIN_USABLE_WIDTH: f64 = 220.0;

// Two-row layouts sit at centre ± 70, three-row at centre ± 90
const TWO_ROW_OFFSETS: [f64; 2] = [-70.0, 70.0];
const THREE_ROW_OFFSETS: [f64; 3] = [-90.0, 0.0, 90.0];
const THREE_ROW_THRESHOLD: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
}

/// Pixel positions and grid slots for every letter node, recomputed
/// each frame from the viewport size.
#[derive(Clone, Debug)]
pub struct NodeLayout {
    order: Vec<char>,
    positions: HashMap<char, Point>,
    slots: HashMap<char, Slot>,
}

/// How a single edge gets drawn. Edges whose letters aren't in the
/// node set are marked `Skip` and silently left out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeRoute {
    Skip,
    Loop { above: bool },
    Straight,
    Curve { offset_y: f64 },
}

pub fn center_y(height: f64) -> f64 {
    (height / 2.0 + 20.0).floor()
}

impl NodeLayout {
    pub fn compute(nodes: &[char], width: f64, height: f64) -> NodeLayout {
        let mut layout = NodeLayout {
            order: nodes.to_vec(),
            positions: HashMap::new(),
            slots: HashMap::new(),
        };

        if nodes.is_empty() {
            return layout;
        }

        let rows = if nodes.len() <= THREE_ROW_THRESHOLD { 2 } else { 3 };
        let cols = (nodes.len() + rows - 1) / rows;

        let usable =
            (width - LEFT_MARGIN - RIGHT_MARGIN).max(MIN_USABLE_WIDTH);
        let step = if cols > 1 {
            usable / (cols - 1) as f64
        } else {
            0.0
        };

        let center = center_y(height);
        let row_ys: &[f64] = if rows == 2 {
            &TWO_ROW_OFFSETS
        } else {
            &THREE_ROW_OFFSETS
        };

        for (index, &ch) in nodes.iter().enumerate() {
            let slot = Slot {
                row: index % rows,
                col: index / rows,
            };

            layout.positions.insert(ch, Point::new(
                LEFT_MARGIN + slot.col as f64 * step,
                center + row_ys[slot.row],
            ));
            layout.slots.insert(ch, slot);
        }

        layout
    }

    pub fn position(&self, letter: char) -> Option<Point> {
        self.positions.get(&letter).copied()
    }

    pub fn slot(&self, letter: char) -> Option<Slot> {
        self.slots.get(&letter).copied()
    }

    pub fn letters(&self) -> &[char] {
        &self.order
    }

    /// The letter whose node circle contains `point`, if any.
    pub fn hit_node(&self, point: Point) -> Option<char> {
        self.order
            .iter()
            .copied()
            .find(|&ch| {
                self.positions[&ch].distance(point) <= NODE_RADIUS
            })
    }
}

#[derive(PartialEq, Eq, Hash)]
struct LaneKey {
    cols: (usize, usize),
    rows: (usize, usize),
    outward: i8,
}

/// Computes one routing entry per edge, in edge order. Curved edges
/// that share a lane key get successively larger offsets so they fan
/// out instead of drawing on top of each other.
pub fn route_edges(
    edges: &[Edge],
    layout: &NodeLayout,
    center_y: f64,
) -> Vec<EdgeRoute> {
    let mut routes = Vec::with_capacity(edges.len());
    let mut lanes: HashMap<LaneKey, u32> = HashMap::new();

    for edge in edges {
        let (Some(pa), Some(pb)) =
            (layout.position(edge.from), layout.position(edge.to))
        else {
            routes.push(EdgeRoute::Skip);
            continue;
        };

        if edge.from == edge.to {
            routes.push(EdgeRoute::Loop { above: pa.y <= center_y });
            continue;
        }

        // Slots exist whenever positions do
        let sa = layout.slot(edge.from).unwrap();
        let sb = layout.slot(edge.to).unwrap();

        if sa.row == sb.row && sa.col.abs_diff(sb.col) == 1 {
            routes.push(EdgeRoute::Straight);
            continue;
        }

        let mid_y = (pa.y + pb.y) / 2.0;
        let outward: i8 = if mid_y <= center_y { -1 } else { 1 };

        let col_dist = sa.col.abs_diff(sb.col).min(6);
        let mut base = 50.0 + 18.0 * col_dist as f64;
        if sa.row != sb.row {
            base += 25.0;
        }

        let key = LaneKey {
            cols: (sa.col.min(sb.col), sa.col.max(sb.col)),
            rows: (sa.row.min(sb.row), sa.row.max(sb.row)),
            outward,
        };
        let lane = lanes.entry(key).or_insert(0);
        let boost = (*lane).min(MAX_LANE_BOOST);
        *lane += 1;

        routes.push(EdgeRoute::Curve {
            offset_y: f64::from(outward)
                * (base + f64::from(boost) * LANE_SPACING),
        });
    }

    routes
}

const LEGEND_RIGHT_OFFSET: f64 = 250.0;
const LEGEND_TOP: f64 = 110.0;
const LEGEND_ROW_HEIGHT: f64 = 32.0;
const LEGEND_PADDING: f64 = 12.0;
const LEGEND_COLUMN_WIDTH: f64 = 90.0;
const LEGEND_COLUMN_GAP: f64 = 20.0;
const LEGEND_ROWS_PER_COLUMN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendItem {
    pub letter: char,
    pub center: Point,
    pub remaining: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lays out the legend panel: one token per letter that still has
/// hidden occurrences, alphabetical, spilling into a second column
/// past eight entries.
pub fn build_legend(
    hidden: &HashMap<char, usize>,
    width: f64,
) -> (Vec<LegendItem>, LegendBox) {
    let legend_x = width - LEGEND_RIGHT_OFFSET;

    let mut remaining = hidden
        .iter()
        .filter(|&(_, &n)| n > 0)
        .map(|(&letter, &n)| (letter, n))
        .collect::<Vec<_>>();
    remaining.sort_unstable_by_key(|&(letter, _)| letter);

    let two_cols = remaining.len() > LEGEND_ROWS_PER_COLUMN;
    let rows = if two_cols {
        LEGEND_ROWS_PER_COLUMN
    } else {
        remaining.len()
    };

    let panel = LegendBox {
        x: legend_x,
        y: LEGEND_TOP,
        width: if two_cols {
            LEGEND_COLUMN_WIDTH * 2.0 + LEGEND_COLUMN_GAP
                + LEGEND_PADDING * 2.0
        } else {
            LEGEND_COLUMN_WIDTH + LEGEND_PADDING * 2.0 + 50.0
        },
        height: LEGEND_PADDING * 2.0 + LEGEND_ROW_HEIGHT * rows as f64,
    };

    let mut items = Vec::new();

    for (index, &(letter, remaining)) in remaining.iter().enumerate() {
        let (col, row) = if two_cols {
            (
                index / LEGEND_ROWS_PER_COLUMN,
                index % LEGEND_ROWS_PER_COLUMN,
            )
        } else {
            (0, index)
        };

        // With two full columns there's no room for more entries
        if col > 1 {
            break;
        }

        let x0 = legend_x + LEGEND_PADDING
            + col as f64 * (LEGEND_COLUMN_WIDTH + LEGEND_COLUMN_GAP);
        let y0 = LEGEND_TOP + LEGEND_PADDING
            + row as f64 * LEGEND_ROW_HEIGHT;

        items.push(LegendItem {
            letter,
            center: Point::new(
                x0 + LEGEND_NODE_RADIUS,
                y0 + LEGEND_NODE_RADIUS,
            ),
            remaining,
        });
    }

    (items, panel)
}

/// The legend token under `point`, if any.
pub fn hit_legend(items: &[LegendItem], point: Point) -> Option<char> {
    items
        .iter()
        .find(|item| item.center.distance(point) <= LEGEND_NODE_RADIUS)
        .map(|item| item.letter)
}

#[cfg(test)]
mod test {
    use super::*;

    fn layout_of(nodes: &[char]) -> NodeLayout {
        NodeLayout::compute(nodes, 1000.0, 600.0)
    }

    #[test]
    fn two_row_grid() {
        let layout = layout_of(&['a', 'r', 't', 'i', 'n', 'u']);

        // 6 nodes, 2 rows, 3 columns, slots filled column-major
        assert_eq!(layout.slot('a'), Some(Slot { row: 0, col: 0 }));
        assert_eq!(layout.slot('r'), Some(Slot { row: 1, col: 0 }));
        assert_eq!(layout.slot('t'), Some(Slot { row: 0, col: 1 }));
        assert_eq!(layout.slot('u'), Some(Slot { row: 1, col: 2 }));

        // centre y = 320; usable width = 1000 - 40 - 310 = 650
        let a = layout.position('a').unwrap();
        assert_eq!(a, Point::new(40.0, 250.0));

        let u = layout.position('u').unwrap();
        assert_eq!(u, Point::new(690.0, 390.0));

        assert_eq!(layout.position('z'), None);
    }

    #[test]
    fn three_rows_above_threshold() {
        let nodes = ('a'..='s').collect::<Vec<_>>();
        assert_eq!(nodes.len(), 19);

        let layout = layout_of(&nodes);

        assert_eq!(layout.slot('a'), Some(Slot { row: 0, col: 0 }));
        assert_eq!(layout.slot('b'), Some(Slot { row: 1, col: 0 }));
        assert_eq!(layout.slot('c'), Some(Slot { row: 2, col: 0 }));
        assert_eq!(layout.slot('d'), Some(Slot { row: 0, col: 1 }));

        // Middle row sits on the centre line
        let b = layout.position('b').unwrap();
        assert_eq!(b.y, center_y(600.0));
    }

    #[test]
    fn single_column_has_zero_step() {
        let layout = layout_of(&['a', 'b']);

        assert_eq!(layout.position('a').unwrap().x, 40.0);
        assert_eq!(layout.position('b').unwrap().x, 40.0);
    }

    #[test]
    fn narrow_viewport_keeps_minimum_width() {
        let layout = NodeLayout::compute(&['a', 'b', 'c', 'd'], 300.0, 600.0);

        // 2 columns: step = 220 despite the viewport being too narrow
        assert_eq!(layout.position('c').unwrap().x, 260.0);
    }

    #[test]
    fn hit_node() {
        let layout = layout_of(&['a', 'r', 't', 'i', 'n', 'u']);
        let a = layout.position('a').unwrap();

        assert_eq!(layout.hit_node(a), Some('a'));
        assert_eq!(
            layout.hit_node(Point::new(a.x + NODE_RADIUS, a.y)),
            Some('a'),
        );
        assert_eq!(
            layout.hit_node(Point::new(a.x + NODE_RADIUS * 2.0, a.y)),
            None,
        );
    }

    fn edge(from: char, to: char) -> Edge {
        Edge { from, to, word_index: 0 }
    }

    #[test]
    fn straight_for_adjacent_siblings() {
        let layout = layout_of(&['a', 'r', 't', 'i', 'n', 'u']);
        let center = center_y(600.0);

        // a (row 0, col 0) → t (row 0, col 1)
        let routes = route_edges(&[edge('a', 't')], &layout, center);
        assert_eq!(routes, vec![EdgeRoute::Straight]);

        // r (row 1, col 0) → i (row 1, col 1)
        let routes = route_edges(&[edge('r', 'i')], &layout, center);
        assert_eq!(routes, vec![EdgeRoute::Straight]);
    }

    #[test]
    fn loops_face_away_from_centre() {
        let layout = layout_of(&['a', 'r']);
        let center = center_y(600.0);

        let routes = route_edges(
            &[edge('a', 'a'), edge('r', 'r')],
            &layout,
            center,
        );

        assert_eq!(
            routes,
            vec![
                EdgeRoute::Loop { above: true },
                EdgeRoute::Loop { above: false },
            ],
        );
    }

    #[test]
    fn curve_offsets() {
        let layout = layout_of(&['a', 'r', 't', 'i', 'n', 'u']);
        let center = center_y(600.0);

        // a (row 0, col 0) → i (row 1, col 1): rows differ, col dist 1
        let routes = route_edges(&[edge('a', 'i')], &layout, center);
        let EdgeRoute::Curve { offset_y } = routes[0]
        else {
            panic!("expected curve, got {:?}", routes[0]);
        };

        // base = 50 + 18 + 25, outward -1 (midpoint on the centre line)
        assert_eq!(offset_y, -93.0);
    }

    #[test]
    fn lane_offsets_strictly_increase_up_to_cap() {
        let layout = layout_of(&['a', 'r', 't', 'i', 'n', 'u']);
        let center = center_y(600.0);

        // Nine copies of the same top-row col 0 → col 2 hop
        let edges = vec![edge('a', 'n'); 9];
        let routes = route_edges(&edges, &layout, center);

        let offsets = routes
            .iter()
            .map(|route| match route {
                EdgeRoute::Curve { offset_y } => offset_y.abs(),
                other => panic!("expected curve, got {:?}", other),
            })
            .collect::<Vec<_>>();

        for pair in offsets.windows(2).take(MAX_LANE_BOOST as usize) {
            assert!(
                pair[1] - pair[0] == LANE_SPACING,
                "{} then {}",
                pair[0],
                pair[1],
            );
        }

        // Lanes past the cap stop fanning out
        assert_eq!(offsets[7], offsets[8]);
        assert_eq!(offsets[6], offsets[7]);
    }

    #[test]
    fn unknown_letters_are_skipped() {
        let layout = layout_of(&['a', 'r']);
        let center = center_y(600.0);

        let routes = route_edges(
            &[edge('a', 'z'), edge('z', 'r'), edge('a', 'r')],
            &layout,
            center,
        );

        assert_eq!(routes[0], EdgeRoute::Skip);
        assert_eq!(routes[1], EdgeRoute::Skip);
        assert_ne!(routes[2], EdgeRoute::Skip);
    }

    #[test]
    fn legend_single_column() {
        let hidden = HashMap::from([('c', 2), ('a', 1), ('b', 0)]);

        let (items, panel) = build_legend(&hidden, 1000.0);

        // 'b' has nothing left to find, so only two entries, sorted
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].letter, 'a');
        assert_eq!(items[0].remaining, 1);
        assert_eq!(items[1].letter, 'c');
        assert_eq!(items[1].remaining, 2);

        assert_eq!(panel.x, 750.0);
        assert_eq!(items[1].center.y - items[0].center.y, LEGEND_ROW_HEIGHT);
    }

    #[test]
    fn legend_two_columns() {
        let hidden = ('a'..='j')
            .map(|letter| (letter, 1))
            .collect::<HashMap<_, _>>();

        let (items, panel) = build_legend(&hidden, 1000.0);

        assert_eq!(items.len(), 10);

        // Ninth entry starts the second column
        assert_eq!(items[8].letter, 'i');
        assert_eq!(items[8].center.y, items[0].center.y);
        assert!(items[8].center.x > items[7].center.x);

        assert_eq!(
            panel.height,
            LEGEND_PADDING * 2.0 + LEGEND_ROW_HEIGHT * 8.0,
        );
    }

    #[test]
    fn hit_legend_tokens() {
        let hidden = HashMap::from([('a', 1)]);
        let (items, _) = build_legend(&hidden, 1000.0);

        assert_eq!(hit_legend(&items, items[0].center), Some('a'));
        assert_eq!(hit_legend(&items, Point::new(0.0, 0.0)), None);
    }
}
