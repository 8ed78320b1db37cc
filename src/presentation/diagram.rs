// Released under MIT License.

//! Rendering of a single Markov-chain diagram using `plotters`.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{format_percent, layout};
use crate::analysis::graph::{EdgeKind, ThresholdGraph};
use crate::analysis::kinetics::ModeKinetics;
use crate::analysis::occupancy::{TemporalClass, TOP_STATES};
use crate::analysis::sequence::{StateId, StatePair};
use crate::input::Analysis;

/// Resolution of the rendered diagrams in dots per inch.
const DPI: u32 = 300;

/// Width and height of the figure in inches.
const FIGURE_INCHES: u32 = 30;

/// Width and height of the rendered diagrams in pixels.
const FIGURE_SIZE_PX: u32 = FIGURE_INCHES * DPI;

/// Margin between the figure border and the layout area, in pixels.
const LAYOUT_MARGIN_PX: f64 = 900.0;

/// Font size of the figure title in points.
const TITLE_FONT_PT: f64 = 35.0;

/// Font size of the edge labels in points.
const EDGE_FONT_PT: f64 = 13.0;

/// Curvature of the transition edges: perpendicular offset of the control
/// point as a fraction of the edge length. Keeps the two directions of a
/// bidirectional transition from overlapping.
const EDGE_CURVATURE: f64 = 0.1;

/// Upper bound on the node radius in pixels.
const MAX_NODE_RADIUS_PX: f64 = 1200.0;

/// Node color for binding modes outside the top 10 by occurrence.
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Node color for early-dominant binding modes.
const GREEN: RGBColor = RGBColor(0, 128, 0);

/// Node color for middle-dominant binding modes.
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Node color for uniform binding modes.
const YELLOW: RGBColor = RGBColor(255, 255, 0);

/// Legend describing the node colors.
const LEGEND: [(RGBColor, &str); 5] = [
    (SKY_BLUE, "Binding mode not in top 10 occurrence"),
    (GREEN, "Binding mode occurrence mostly in first third of frames"),
    (ORANGE, "Binding mode occurrence mostly in second third of frames"),
    (RED, "Binding mode occurrence mostly in final third of frames"),
    (YELLOW, "Binding mode occurs throughout the trajectory equally"),
];

/// Map the temporal dominance classification to its node color.
fn class_color(class: TemporalClass) -> RGBColor {
    match class {
        TemporalClass::Early => GREEN,
        TemporalClass::Middle => ORANGE,
        TemporalClass::Late => RED,
        TemporalClass::Uniform => YELLOW,
    }
}

/// Convert a font size in points to pixels at the figure resolution.
fn pt_to_px(pt: f64) -> f64 {
    pt * DPI as f64 / 72.0
}

/// Radius of a node in pixels. The node area grows linearly with the number
/// of frames assigned to the binding mode, as in a scatter plot with sizes
/// `node_size * occurrences`.
fn node_radius_px(node_size: usize, occurrences: usize) -> f64 {
    let area_pt2 = node_size as f64 * occurrences as f64;
    let radius_pt = (area_pt2 / std::f64::consts::PI).sqrt();
    pt_to_px(radius_pt).min(MAX_NODE_RADIUS_PX)
}

/// Render the Markov-chain diagram for one threshold graph into a PNG file.
pub(super) fn render(
    graph: &ThresholdGraph,
    kinetics: &ModeKinetics,
    analysis: &Analysis,
    path: &Path,
) -> Result<(), crate::errors::RenderError> {
    let canvas = Canvas::new(path)?;

    canvas.title(graph.threshold())?;
    canvas.legend()?;

    let positions = scale_positions(&layout::spring_layout(graph));
    let top_states = kinetics.occupancy().top_states(TOP_STATES);

    canvas.edges(graph, kinetics, analysis, &positions)?;
    canvas.nodes(graph, kinetics, analysis, &positions, &top_states)?;
    canvas.node_labels(graph, kinetics, analysis, &positions, &top_states)?;

    canvas.present()
}

/// Map unit-square layout positions to pixel coordinates inside the margins.
fn scale_positions(positions: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let span = FIGURE_SIZE_PX as f64 - 2.0 * LAYOUT_MARGIN_PX;
    positions
        .iter()
        .map(|(x, y)| (LAYOUT_MARGIN_PX + x * span, LAYOUT_MARGIN_PX + y * span))
        .collect()
}

/// Drawing surface for one diagram. Wraps the `plotters` bitmap drawing area
/// together with the path used for error reporting.
struct Canvas<'a> {
    root: DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>,
    path: &'a Path,
}

impl<'a> Canvas<'a> {
    fn new(path: &'a Path) -> Result<Self, crate::errors::RenderError> {
        let root = BitMapBackend::new(path, (FIGURE_SIZE_PX, FIGURE_SIZE_PX)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| {
            crate::errors::RenderError::CouldNotCreateDiagram(Box::from(path), e.to_string())
        })?;

        Ok(Canvas { root, path })
    }

    fn draw_error(&self, error: impl ToString) -> crate::errors::RenderError {
        crate::errors::RenderError::CouldNotDrawDiagram(Box::from(self.path), error.to_string())
    }

    /// Draw the figure title.
    fn title(&self, threshold: f64) -> Result<(), crate::errors::RenderError> {
        let style = ("sans-serif", pt_to_px(TITLE_FONT_PT))
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        self.root
            .draw(&Text::new(
                format!("Markov Chain Plot {}% Frames Transition", threshold),
                (FIGURE_SIZE_PX as i32 / 2, 120),
                style,
            ))
            .map_err(|e| self.draw_error(e))
    }

    /// Draw the color legend in the upper-right corner.
    fn legend(&self) -> Result<(), crate::errors::RenderError> {
        let font_px = pt_to_px(EDGE_FONT_PT);
        let patch = (font_px * 1.2) as i32;
        let x = FIGURE_SIZE_PX as i32 - 2900;
        let mut y = 320;

        let style = ("sans-serif", font_px)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));

        for (color, label) in LEGEND {
            self.root
                .draw(&Rectangle::new(
                    [(x, y), (x + patch, y + patch)],
                    color.filled(),
                ))
                .map_err(|e| self.draw_error(e))?;

            self.root
                .draw(&Text::new(
                    label,
                    (x + patch + 30, y + patch / 2),
                    style.clone(),
                ))
                .map_err(|e| self.draw_error(e))?;

            y += patch + 40;
        }

        Ok(())
    }

    /// Draw all edges of the graph: self-loops as small curled arcs, retained
    /// transitions as thick black curves, sub-threshold reverse transitions as
    /// thin grey curves. Transition edges carry a two-line label giving the
    /// global frequency and the conditional probability of both directions.
    fn edges(
        &self,
        graph: &ThresholdGraph,
        kinetics: &ModeKinetics,
        analysis: &Analysis,
        positions: &[(f64, f64)],
    ) -> Result<(), crate::errors::RenderError> {
        use petgraph::visit::EdgeRef;

        let threshold = graph.threshold();
        let probabilities = kinetics.probabilities();

        for edge in graph.graph().edge_references() {
            let source = edge.source().index();
            let target = edge.target().index();
            let weight = edge.weight().weight();

            if edge.weight().kind() == EdgeKind::SelfLoop {
                self.self_loop(positions[source], kinetics, analysis, graph, edge.source())?;
                continue;
            }

            let (from, to) = (positions[source], positions[target]);
            let style = if weight >= threshold {
                BLACK.mix(0.7).stroke_width(17)
            } else {
                RGBColor(128, 128, 128).mix(0.7).stroke_width(3)
            };

            let curve = bezier_curve(from, to);
            self.root
                .draw(&PathElement::new(
                    curve.iter().map(|&(x, y)| (x as i32, y as i32)).collect::<Vec<_>>(),
                    style,
                ))
                .map_err(|e| self.draw_error(e))?;

            let to_state = *graph
                .graph()
                .node_weight(edge.target())
                .expect(crate::PANIC_MESSAGE);
            let to_radius =
                node_radius_px(analysis.node_size(), kinetics.occupancy().count(to_state));
            self.arrowhead(&curve, to_radius, weight >= threshold)?;

            let pair = StatePair::new(
                *graph
                    .graph()
                    .node_weight(edge.source())
                    .expect(crate::PANIC_MESSAGE),
                to_state,
            );
            self.edge_label(&curve, &pair, probabilities)?;
        }

        Ok(())
    }

    /// Draw a self-loop as a small, tightly curved circle attached to the node.
    fn self_loop(
        &self,
        position: (f64, f64),
        kinetics: &ModeKinetics,
        analysis: &Analysis,
        graph: &ThresholdGraph,
        node: petgraph::graph::NodeIndex,
    ) -> Result<(), crate::errors::RenderError> {
        let state = *graph
            .graph()
            .node_weight(node)
            .expect(crate::PANIC_MESSAGE);
        let node_radius = node_radius_px(analysis.node_size(), kinetics.occupancy().count(state));
        let loop_radius = (node_radius * 0.6).max(40.0);
        let center = (position.0, position.1 - node_radius - loop_radius * 0.5);

        let circle: Vec<(i32, i32)> = (0..=48)
            .map(|i| {
                let angle = i as f64 / 48.0 * std::f64::consts::TAU;
                (
                    (center.0 + loop_radius * angle.cos()) as i32,
                    (center.1 + loop_radius * angle.sin()) as i32,
                )
            })
            .collect();

        self.root
            .draw(&PathElement::new(
                circle,
                GREEN.mix(0.2).stroke_width(2),
            ))
            .map_err(|e| self.draw_error(e))
    }

    /// Draw an arrowhead at the end of a curve, pulled back by the target
    /// node radius so the tip touches the node boundary.
    fn arrowhead(
        &self,
        curve: &[(f64, f64)],
        target_radius: f64,
        significant: bool,
    ) -> Result<(), crate::errors::RenderError> {
        let (tip, direction) = match curve_endpoint(curve, target_radius) {
            Some(x) => x,
            None => return Ok(()),
        };

        let length = if significant { 90.0 } else { 50.0 };
        let half_width = length * 0.4;
        let (dx, dy) = direction;
        let (px, py) = (-dy, dx);

        let base = (tip.0 - dx * length, tip.1 - dy * length);
        let left = (base.0 + px * half_width, base.1 + py * half_width);
        let right = (base.0 - px * half_width, base.1 - py * half_width);

        let color = if significant {
            BLACK.mix(0.7)
        } else {
            RGBColor(128, 128, 128).mix(0.7)
        };

        self.root
            .draw(&Polygon::new(
                vec![
                    (tip.0 as i32, tip.1 as i32),
                    (left.0 as i32, left.1 as i32),
                    (right.0 as i32, right.1 as i32),
                ],
                color.filled(),
            ))
            .map_err(|e| self.draw_error(e))
    }

    /// Draw the two-line label of a transition edge at the midpoint of its curve.
    fn edge_label(
        &self,
        curve: &[(f64, f64)],
        pair: &StatePair,
        probabilities: &crate::analysis::probability::TransitionProbabilities,
    ) -> Result<(), crate::errors::RenderError> {
        let midpoint = curve[curve.len() / 2];
        let font_px = pt_to_px(EDGE_FONT_PT);

        let forward = format!(
            "{}% of Frames \u{2192}, {}% probability",
            format_percent(probabilities.global_or_zero(pair)),
            format_percent(probabilities.forward_or_zero(pair)),
        );
        let backward = format!(
            "{}% of Frames \u{2190}, {}% probability",
            format_percent(probabilities.global_or_zero(&pair.reversed())),
            format_percent(probabilities.backward_or_zero(pair)),
        );

        let style = ("sans-serif", font_px)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (i, line) in [forward, backward].into_iter().enumerate() {
            self.root
                .draw(&Text::new(
                    line,
                    (
                        midpoint.0 as i32,
                        midpoint.1 as i32 + (i as i32 * (font_px as i32 + 10)),
                    ),
                    style.clone(),
                ))
                .map_err(|e| self.draw_error(e))?;
        }

        Ok(())
    }

    /// Draw the nodes: size proportional to occurrence count, color by the
    /// temporal dominance classification for the top-10 binding modes and
    /// sky-blue for all others.
    fn nodes(
        &self,
        graph: &ThresholdGraph,
        kinetics: &ModeKinetics,
        analysis: &Analysis,
        positions: &[(f64, f64)],
        top_states: &[StateId],
    ) -> Result<(), crate::errors::RenderError> {
        for node in graph.graph().node_indices() {
            let state = *graph
                .graph()
                .node_weight(node)
                .expect(crate::PANIC_MESSAGE);
            let (x, y) = positions[node.index()];

            let radius =
                node_radius_px(analysis.node_size(), kinetics.occupancy().count(state));
            let color = if top_states.contains(&state) {
                class_color(kinetics.occupancy().classify(state))
            } else {
                SKY_BLUE
            };

            self.root
                .draw(&Circle::new(
                    (x as i32, y as i32),
                    radius as i32,
                    color.mix(0.8).filled(),
                ))
                .map_err(|e| self.draw_error(e))?;
        }

        Ok(())
    }

    /// Draw the node labels. Statistics are only shown for nodes with at least
    /// one incident edge meeting the threshold, and only the top-10 binding
    /// modes show their occurrence and self-loop statistics.
    fn node_labels(
        &self,
        graph: &ThresholdGraph,
        kinetics: &ModeKinetics,
        analysis: &Analysis,
        positions: &[(f64, f64)],
        top_states: &[StateId],
    ) -> Result<(), crate::errors::RenderError> {
        let font_px = pt_to_px(analysis.font_size() as f64);
        let style = ("sans-serif", font_px)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for node in graph.graph().node_indices() {
            if !graph.has_significant_edge(node) {
                continue;
            }

            let state = *graph
                .graph()
                .node_weight(node)
                .expect(crate::PANIC_MESSAGE);
            let (x, y) = positions[node.index()];
            let name = kinetics.labels().state_name(state);

            let lines: Vec<String> = if top_states.contains(&state) {
                let probabilities = kinetics.probabilities();
                vec![
                    name.to_owned(),
                    format!(
                        "Occurrence: {}%",
                        format_percent(kinetics.occupancy().occurrence_percent(state))
                    ),
                    format!(
                        "Self-Loop Probability: {}%",
                        format_percent(
                            probabilities.self_loop_probability_or_zero(state) * 100.0
                        )
                    ),
                    format!(
                        "Self-Loop Occurrence: {}%",
                        format_percent(probabilities.self_loop_occurrence_or_zero(state))
                    ),
                ]
            } else {
                vec![name.to_owned()]
            };

            let line_height = font_px as i32 + 8;
            let y_start = y as i32 - (lines.len() as i32 - 1) * line_height / 2;

            for (i, line) in lines.iter().enumerate() {
                self.root
                    .draw(&Text::new(
                        line.clone(),
                        (x as i32, y_start + i as i32 * line_height),
                        style.clone(),
                    ))
                    .map_err(|e| self.draw_error(e))?;
            }
        }

        Ok(())
    }

    /// Finalize the diagram and write it to disk.
    fn present(self) -> Result<(), crate::errors::RenderError> {
        self.root.present().map_err(|e| {
            crate::errors::RenderError::CouldNotCreateDiagram(
                Box::from(self.path),
                e.to_string(),
            )
        })
    }
}

/// Sample a quadratic Bezier curve between two points, with the control point
/// displaced perpendicularly so bidirectional edges do not overlap.
fn bezier_curve(from: (f64, f64), to: (f64, f64)) -> Vec<(f64, f64)> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let midpoint = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    let control = (
        midpoint.0 - dy * EDGE_CURVATURE,
        midpoint.1 + dx * EDGE_CURVATURE,
    );

    (0..=32)
        .map(|i| {
            let t = i as f64 / 32.0;
            let u = 1.0 - t;
            (
                u * u * from.0 + 2.0 * u * t * control.0 + t * t * to.0,
                u * u * from.1 + 2.0 * u * t * control.1 + t * t * to.1,
            )
        })
        .collect()
}

/// Find the point where a curve meets the boundary circle of its target node,
/// together with the direction of the curve at that point. Returns `None` for
/// degenerate curves fully inside the node.
fn curve_endpoint(curve: &[(f64, f64)], target_radius: f64) -> Option<((f64, f64), (f64, f64))> {
    let end = *curve.last()?;

    for window in curve.windows(2).rev() {
        let (x, y) = window[0];
        let dist = ((x - end.0).powi(2) + (y - end.1).powi(2)).sqrt();

        if dist >= target_radius {
            let (nx, ny) = (window[1].0 - x, window[1].1 - y);
            let length = (nx * nx + ny * ny).sqrt().max(1e-9);

            // walk from this sample towards the node boundary
            let overshoot = dist - target_radius;
            let tip = (
                x + (end.0 - x) / dist * overshoot,
                y + (end.1 - y) / dist * overshoot,
            );

            return Some((tip, (nx / length, ny / length)));
        }
    }

    None
}
