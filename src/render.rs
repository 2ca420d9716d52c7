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

use super::geometry::{
    self, Point, arrowhead, clip_to_circle, quad_point, quad_tangent,
};
use super::layout::{
    self, EdgeRoute, LegendBox, LegendItem, NodeLayout,
    LEGEND_NODE_RADIUS, NODE_RADIUS,
};
use super::letter_graph::LetterGraph;
use super::session::{Controller, DragState, GameSession};

pub const WHITE: &str = "#ffffff";
pub const BLACK: &str = "#000000";
pub const NODE_COLOR: &str = "rgb(50,100,200)";
pub const START_COLOR: &str = "rgb(50,180,50)";
pub const END_COLOR: &str = "rgb(200,60,60)";
pub const LEGEND_BG: &str = "rgb(248,248,252)";
pub const LEGEND_BORDER: &str = "rgb(150,150,165)";
pub const TOOLTIP_BORDER: &str = "rgba(120,120,140,1)";
pub const BUTTON_BG: &str = "rgb(230,230,230)";
pub const BUTTON_HOVER: &str = "rgb(210,210,210)";
pub const BUTTON_BORDER: &str = "rgb(100,100,100)";
pub const BANNER_BG: &str = "rgb(245,255,245)";
pub const BANNER_FG: &str = "rgb(60,150,60)";
pub const HOVER_RING: &str = "rgba(30,30,30,1)";

// One color per chain word, reused modulo the palette length
pub static WORD_EDGE_COLORS: [(u8, u8, u8); 5] = [
    (0, 120, 215),
    (200, 120, 0),
    (140, 0, 200),
    (0, 150, 120),
    (170, 60, 60),
];

const EDGE_WIDTH: f64 = 3.0;
const CURVE_SEGMENTS: u32 = 34;
const LOOP_SEGMENTS: u32 = 24;
const ARROW_HEAD_LEN: f64 = 18.0;
const ARROW_HEAD_W: f64 = 10.0;
const STRAIGHT_HEAD_LEN: f64 = 16.0;
const LOOP_HEAD_LEN: f64 = 12.0;
const LOOP_HEAD_W: f64 = 8.0;

pub fn word_color(word_index: usize) -> String {
    let (r, g, b) = WORD_EDGE_COLORS[word_index % WORD_EDGE_COLORS.len()];
    format!("rgb({},{},{})", r, g, b)
}

fn word_color_alpha(word_index: usize, alpha: f64) -> String {
    let (r, g, b) = WORD_EDGE_COLORS[word_index % WORD_EDGE_COLORS.len()];
    format!("rgba({},{},{},{})", r, g, b, alpha)
}

pub fn format_elapsed(ms: f64) -> String {
    let seconds = (ms / 1000.0).floor().max(0.0) as u64;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.x + self.w
            && point.y >= self.y && point.y <= self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Hint,
    Reveal,
    HowTo,
    Next,
    Quit,
}

#[derive(Clone, Copy, Debug)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    pub rect: Rect,
}

const BUTTON_W: f64 = 130.0;
const BUTTON_H: f64 = 40.0;
const BUTTON_SPACING: f64 = 14.0;

pub fn layout_buttons(width: f64, height: f64) -> Vec<Button> {
    let labels = [
        ("Hint", Action::Hint),
        ("Reveal", Action::Reveal),
        ("How To Play", Action::HowTo),
        ("Next", Action::Next),
        ("Quit", Action::Quit),
    ];

    let total = labels.len() as f64 * BUTTON_W
        + (labels.len() - 1) as f64 * BUTTON_SPACING;
    let start_x = (width - total) / 2.0;
    let y = height - 70.0;

    labels
        .iter()
        .enumerate()
        .map(|(i, &(label, action))| Button {
            label,
            action,
            rect: Rect {
                x: start_x + i as f64 * (BUTTON_W + BUTTON_SPACING),
                y,
                w: BUTTON_W,
                h: BUTTON_H,
            },
        })
        .collect()
}

pub fn hit_button(buttons: &[Button], point: Point) -> Option<Action> {
    buttons
        .iter()
        .find(|b| b.rect.contains(point))
        .map(|b| b.action)
}

/// The drawing surface the renderer talks to. The wasm build
/// implements this over a 2D canvas context; tests use a recording
/// stub. Fonts are surface state the way they are on a canvas:
/// `set_font` applies to the `text_width` and `fill_text` calls that
/// follow it.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64, color: &str);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: &str,
        line_width: f64,
    );
    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64);
    fn fill_polygon(&mut self, points: &[Point], color: &str);
    fn rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        fill: Option<&str>,
        stroke: Option<(&str, f64)>,
    );
    fn set_font(&mut self, px: f64, bold: bool);
    fn text_width(&mut self, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str);
}

/// Per-frame geometry, recomputed from the viewport every frame and
/// kept around so pointer events can hit-test against what was last
/// drawn.
#[derive(Clone, Debug)]
pub struct FrameLayout {
    pub width: f64,
    pub height: f64,
    pub center_y: f64,
    pub nodes: NodeLayout,
    pub routes: Vec<EdgeRoute>,
    pub legend_items: Vec<LegendItem>,
    pub legend_box: LegendBox,
    pub buttons: Vec<Button>,
}

impl FrameLayout {
    pub fn compute(
        session: &GameSession,
        graph: &LetterGraph,
        width: f64,
        height: f64,
    ) -> FrameLayout {
        let nodes = NodeLayout::compute(graph.nodes(), width, height);
        let center_y = layout::center_y(height);
        let routes = layout::route_edges(graph.edges(), &nodes, center_y);

        let hidden = session.tracker().hidden_counts(session.chain());
        let (legend_items, legend_box) = layout::build_legend(&hidden, width);

        FrameLayout {
            width,
            height,
            center_y,
            nodes,
            routes,
            legend_items,
            legend_box,
            buttons: layout_buttons(width, height),
        }
    }
}

struct WordHeaderLayout {
    x: f64,
    width: f64,
    // Left edge and width of each drawn character
    char_boxes: Vec<(f64, f64)>,
}

const HEADER_BASELINE: f64 = 30.0;
const SWATCH_W: f64 = 26.0;
const SWATCH_H: f64 = 10.0;

fn masked_word(session: &GameSession, word_index: usize) -> String {
    let word = &session.chain().words()[word_index];

    word.chars()
        .enumerate()
        .map(|(i, ch)| {
            if session.words_shown()
                || session.tracker().is_revealed(word_index, i)
            {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn draw_header<S: Surface>(
    surface: &mut S,
    session: &GameSession,
    width: f64,
) -> (f64, Vec<WordHeaderLayout>) {
    let words = (0..session.chain().len())
        .map(|wi| masked_word(session, wi))
        .collect::<Vec<_>>();

    surface.set_font(28.0, true);

    let arrow = " → ";
    let arrow_w = surface.text_width(arrow);
    let widths = words
        .iter()
        .map(|w| surface.text_width(w))
        .collect::<Vec<_>>();

    let total = widths.iter().sum::<f64>()
        + arrow_w * (words.len() - 1) as f64;
    let mut x = width / 2.0 - total / 2.0;

    let mut layouts = Vec::new();

    for (wi, word) in words.iter().enumerate() {
        surface.fill_text(word, x, HEADER_BASELINE, BLACK);

        let char_boxes = (0..word.chars().count())
            .map(|i| {
                let prefix = word.chars().take(i).collect::<String>();
                let ch = word.chars().nth(i).unwrap().to_string();
                (
                    x + surface.text_width(&prefix),
                    surface.text_width(&ch).max(1.0),
                )
            })
            .collect();

        layouts.push(WordHeaderLayout {
            x,
            width: widths[wi],
            char_boxes,
        });

        x += widths[wi];

        if wi + 1 < words.len() {
            surface.fill_text(arrow, x, HEADER_BASELINE, BLACK);
            x += arrow_w;
        }
    }

    // A color swatch under each word matches it to its edges
    let swatch_y = HEADER_BASELINE + 14.0;

    for (wi, layout) in layouts.iter().enumerate() {
        surface.rounded_rect(
            Rect {
                x: layout.x + layout.width / 2.0 - SWATCH_W / 2.0,
                y: swatch_y,
                w: SWATCH_W,
                h: SWATCH_H,
            },
            3.0,
            Some(&word_color(wi)),
            Some((BLACK, 1.0)),
        );
    }

    (swatch_y + SWATCH_H, layouts)
}

fn draw_hover_slots<S: Surface>(
    surface: &mut S,
    session: &GameSession,
    layouts: &[WordHeaderLayout],
    hover: char,
) {
    let box_h = 34.0;
    let y_top = HEADER_BASELINE - 26.0;

    for (wi, layout) in layouts.iter().enumerate() {
        let word = &session.chain().words()[wi];
        let color = word_color(wi);

        for (i, ch) in word.chars().enumerate() {
            if ch != hover {
                continue;
            }

            let Some(&(x, w)) = layout.char_boxes.get(i)
            else {
                continue;
            };

            surface.rounded_rect(
                Rect {
                    x: x - 3.0,
                    y: y_top,
                    w: w + 6.0,
                    h: box_h,
                },
                6.0,
                None,
                Some((color.as_str(), 3.0)),
            );
        }
    }
}

fn sample_quad(p0: Point, p1: Point, p2: Point, t_max: f64, steps: u32)
    -> Vec<Point>
{
    (0..=steps)
        .map(|i| quad_point(p0, p1, p2, t_max * f64::from(i) / f64::from(steps)))
        .collect()
}

fn draw_straight_arrow<S: Surface>(
    surface: &mut S,
    pa: Point,
    pb: Point,
    color: &str,
) {
    let Some((start, tip)) = geometry::trim_segment(pa, pb, NODE_RADIUS)
    else {
        return;
    };

    let dist = pa.distance(pb);
    let ux = (pb.x - pa.x) / dist;
    let uy = (pb.y - pa.y) / dist;

    let shaft_end = Point::new(
        tip.x - ux * STRAIGHT_HEAD_LEN,
        tip.y - uy * STRAIGHT_HEAD_LEN,
    );

    surface.stroke_polyline(&[start, shaft_end], color, EDGE_WIDTH);
    surface.fill_polygon(
        &arrowhead(
            tip,
            (pb.y - pa.y).atan2(pb.x - pa.x),
            STRAIGHT_HEAD_LEN,
            ARROW_HEAD_W,
        ),
        color,
    );
}

fn draw_curved_arrow<S: Surface>(
    surface: &mut S,
    pa: Point,
    pb: Point,
    offset_y: f64,
    color: &str,
) {
    let dist = pa.distance(pb);

    if dist < 1e-3 {
        return;
    }

    let ux = (pb.x - pa.x) / dist;
    let uy = (pb.y - pa.y) / dist;

    let p0 = Point::new(pa.x + ux * NODE_RADIUS, pa.y + uy * NODE_RADIUS);
    let mid = p0.midpoint(pb);
    let p1 = Point::new(mid.x, mid.y + offset_y);

    // Edges heading upward nudge down a touch so opposing arrowheads
    // at the same node don't collide
    let nudge_y = if pa.y > pb.y { ARROW_HEAD_W / 4.0 } else { 0.0 };

    let Some(t_tip) = clip_to_circle(p0, p1, pb, pb, NODE_RADIUS)
    else {
        return;
    };

    let mut points = sample_quad(p0, p1, pb, t_tip, CURVE_SEGMENTS);
    for point in points.iter_mut() {
        point.y += nudge_y;
    }
    surface.stroke_polyline(&points, color, EDGE_WIDTH);

    let tip0 = quad_point(p0, p1, pb, t_tip);
    let tip = Point::new(tip0.x, tip0.y + nudge_y);
    let tangent = quad_tangent(p0, p1, pb, t_tip);

    surface.fill_polygon(
        &arrowhead(
            tip,
            tangent.y.atan2(tangent.x),
            ARROW_HEAD_LEN,
            ARROW_HEAD_W,
        ),
        color,
    );
}

fn draw_loop<S: Surface>(
    surface: &mut S,
    center: Point,
    above: bool,
    color: &str,
) {
    let side_y = if above {
        center.y - NODE_RADIUS * 0.9
    } else {
        center.y + NODE_RADIUS * 0.9
    };
    let start = Point::new(center.x - NODE_RADIUS * 0.6, side_y);
    let end = Point::new(center.x + NODE_RADIUS * 0.6, side_y);

    let tip_offset = if above {
        -NODE_RADIUS * 2.2
    } else {
        NODE_RADIUS * 2.2
    };
    let ctrl = Point::new(center.x, center.y + tip_offset);

    surface.stroke_polyline(
        &sample_quad(start, ctrl, end, 1.0, LOOP_SEGMENTS),
        color,
        EDGE_WIDTH,
    );

    let approach = end.midpoint(ctrl);
    surface.fill_polygon(
        &arrowhead(
            end,
            (end.y - approach.y).atan2(end.x - approach.x),
            LOOP_HEAD_LEN,
            LOOP_HEAD_W,
        ),
        color,
    );
}

fn draw_edges<S: Surface>(
    surface: &mut S,
    graph: &LetterGraph,
    frame: &FrameLayout,
    hover: Option<char>,
) {
    for (edge, route) in graph.edges().iter().zip(frame.routes.iter()) {
        let (Some(pa), Some(pb)) = (
            frame.nodes.position(edge.from),
            frame.nodes.position(edge.to),
        )
        else {
            continue;
        };

        // Hovering a node pulls its edges forward and fades the rest
        let alpha = match hover {
            None => 0.42,
            Some(h) if edge.from == h || edge.to == h => 0.9,
            Some(_) => 0.25,
        };
        let color = word_color_alpha(edge.word_index, alpha);

        match *route {
            EdgeRoute::Skip => (),
            EdgeRoute::Loop { above } => {
                draw_loop(surface, pa, above, &color)
            },
            EdgeRoute::Straight => {
                draw_straight_arrow(surface, pa, pb, &color)
            },
            EdgeRoute::Curve { offset_y } => {
                draw_curved_arrow(surface, pa, pb, offset_y, &color)
            },
        }
    }
}

fn draw_nodes<S: Surface>(
    surface: &mut S,
    session: &GameSession,
    frame: &FrameLayout,
    hover: Option<char>,
) {
    let seq = session.chain().letter_sequence();
    let first = seq.first().copied();
    let last = seq.last().copied();

    let revealed = session.tracker().revealed_letters(session.chain());

    for &ch in frame.nodes.letters() {
        let Some(position) = frame.nodes.position(ch)
        else {
            continue;
        };

        let fill = if first == Some(ch) {
            START_COLOR
        } else if last == Some(ch) {
            END_COLOR
        } else {
            NODE_COLOR
        };

        if hover == Some(ch) {
            surface.stroke_circle(
                position,
                NODE_RADIUS + 6.0,
                HOVER_RING,
                2.0,
            );
        }

        surface.fill_circle(position, NODE_RADIUS, fill);
        surface.stroke_circle(position, NODE_RADIUS, BLACK, 2.0);

        if session.words_shown() || revealed.contains(&ch) {
            surface.set_font(26.0, true);
            let label = ch.to_uppercase().to_string();
            let w = surface.text_width(&label);
            surface.fill_text(
                &label,
                position.x - w / 2.0,
                position.y + 9.0,
                WHITE,
            );
        }
    }
}

fn draw_tooltip<S: Surface>(
    surface: &mut S,
    frame: &FrameLayout,
    node: Point,
    count: usize,
) {
    // Deliberately shows only the count, not the letter
    let text = format!("used: {}", count);

    surface.set_font(16.0, false);
    let w = surface.text_width(&text) + 20.0;
    let h = 30.0;

    let x = (node.x - w / 2.0).clamp(10.0, frame.width - w - 10.0);
    let y = (node.y - NODE_RADIUS - h - 10.0)
        .clamp(10.0, frame.height - h - 10.0);

    surface.rounded_rect(
        Rect { x, y, w, h },
        8.0,
        Some(WHITE),
        Some((TOOLTIP_BORDER, 2.0)),
    );
    surface.fill_text(&text, x + 10.0, y + 20.0, BLACK);
}

fn draw_legend<S: Surface>(surface: &mut S, frame: &FrameLayout) {
    let panel = frame.legend_box;

    surface.rounded_rect(
        Rect { x: panel.x, y: panel.y, w: panel.width, h: panel.height },
        10.0,
        Some(LEGEND_BG),
        Some((LEGEND_BORDER, 2.0)),
    );

    for item in frame.legend_items.iter() {
        surface.fill_circle(item.center, LEGEND_NODE_RADIUS, NODE_COLOR);
        surface.stroke_circle(item.center, LEGEND_NODE_RADIUS, BLACK, 2.0);

        surface.set_font(18.0, true);
        let label = item.letter.to_uppercase().to_string();
        let w = surface.text_width(&label);
        surface.fill_text(
            &label,
            item.center.x - w / 2.0,
            item.center.y + 6.0,
            WHITE,
        );

        surface.set_font(16.0, false);
        surface.fill_text(
            &format!("({})", item.remaining),
            item.center.x + LEGEND_NODE_RADIUS + 8.0,
            item.center.y + 6.0,
            BLACK,
        );
    }
}

fn draw_drag_token<S: Surface>(
    surface: &mut S,
    letter: char,
    pointer: Point,
) {
    surface.fill_circle(pointer, LEGEND_NODE_RADIUS, NODE_COLOR);
    surface.stroke_circle(pointer, LEGEND_NODE_RADIUS, BLACK, 2.0);

    surface.set_font(18.0, true);
    let label = letter.to_uppercase().to_string();
    let w = surface.text_width(&label);
    surface.fill_text(
        &label,
        pointer.x - w / 2.0,
        pointer.y + 6.0,
        WHITE,
    );
}

fn draw_solved_banner<S: Surface>(
    surface: &mut S,
    session: &GameSession,
    frame: &FrameLayout,
    header_bottom: f64,
    now_ms: f64,
) {
    let message = format!(
        "You solved it!  Errors: {}  Time: {}",
        session.error_count(),
        format_elapsed(session.elapsed_ms(now_ms)),
    );

    surface.set_font(34.0, true);
    let w = surface.text_width(&message) + 36.0;
    let h = 62.0;
    let x = frame.width / 2.0 - w / 2.0;
    let y = (header_bottom + 35.0).max(105.0) - h / 2.0;

    surface.rounded_rect(
        Rect { x, y, w, h },
        10.0,
        Some(BANNER_BG),
        Some((BANNER_FG, 3.0)),
    );
    surface.fill_text(&message, x + 18.0, y + 44.0, BANNER_FG);
}

fn draw_buttons<S: Surface>(
    surface: &mut S,
    frame: &FrameLayout,
    pointer: Point,
) {
    surface.set_font(16.0, true);

    for button in frame.buttons.iter() {
        let bg = if button.rect.contains(pointer) {
            BUTTON_HOVER
        } else {
            BUTTON_BG
        };

        surface.rounded_rect(
            button.rect,
            8.0,
            Some(bg),
            Some((BUTTON_BORDER, 2.0)),
        );

        let w = surface.text_width(button.label);
        surface.fill_text(
            button.label,
            button.rect.x + (button.rect.w - w) / 2.0,
            button.rect.y + 26.0,
            BLACK,
        );
    }
}

/// Repaints the whole scene from the current session state. Nothing
/// here mutates the game; the render loop just calls this once per
/// frame with fresh `FrameLayout` geometry.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    session: &GameSession,
    graph: &LetterGraph,
    frame: &FrameLayout,
    controller: &Controller,
    now_ms: f64,
) {
    surface.clear(frame.width, frame.height, WHITE);

    surface.set_font(18.0, true);
    surface.fill_text(
        &format!("Time: {}", format_elapsed(session.elapsed_ms(now_ms))),
        14.0,
        26.0,
        BLACK,
    );

    let (header_bottom, word_layouts) =
        draw_header(surface, session, frame.width);

    let hover = frame.nodes.hit_node(controller.pointer);

    if let Some(hover) = hover {
        draw_hover_slots(surface, session, &word_layouts, hover);
    }

    draw_edges(surface, graph, frame, hover);
    draw_nodes(surface, session, frame, hover);

    if let Some(hover) = hover {
        if let Some(position) = frame.nodes.position(hover) {
            let counts = LetterGraph::occurrence_counts(session.chain());
            draw_tooltip(
                surface,
                frame,
                position,
                counts.get(&hover).copied().unwrap_or(0),
            );
        }
    }

    draw_legend(surface, frame);

    if let DragState::Dragging(letter) = controller.drag {
        draw_drag_token(surface, letter, controller.pointer);
    }

    if session.is_solved() {
        draw_solved_banner(surface, session, frame, header_bottom, now_ms);
    }

    draw_buttons(surface, frame, controller.pointer);
}
