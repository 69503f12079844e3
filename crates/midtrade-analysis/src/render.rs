use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use midtrade_models::{ConflictReport, NodeRole, RenderConfig, SideReport};
use petgraph::dot::{Config, Dot};
use petgraph::visit::EdgeRef;
use plotters::prelude::*;
use tracing::info;

use crate::error::AnalysisError;
use crate::network::TradeNetwork;

fn render_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Render(e.to_string())
}

fn role_color(role: NodeRole) -> RGBColor {
    match role {
        NodeRole::Instigator => RGBColor(200, 30, 30),
        NodeRole::Combatant => RGBColor(240, 150, 30),
        NodeRole::Partner => RGBColor(60, 110, 200),
    }
}

fn role_color_name(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Instigator => "red",
        NodeRole::Combatant => "orange",
        NodeRole::Partner => "lightblue",
    }
}

/// Place nodes evenly on a circle, in graph order.
fn circular_layout(count: usize, width: u32, height: u32) -> Vec<(i32, i32)> {
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    if count == 1 {
        return vec![(cx as i32, cy as i32)];
    }
    let radius = cx.min(cy) * 0.8;
    (0..count)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / count as f64 - PI / 2.0;
            (
                (cx + radius * angle.cos()) as i32,
                (cy + radius * angle.sin()) as i32,
            )
        })
        .collect()
}

/// Draw the network as an SVG: edges as plain lines, nodes coloured by role.
pub fn render_svg(
    network: &TradeNetwork,
    title: &str,
    path: &Path,
    config: &RenderConfig,
) -> Result<(), AnalysisError> {
    let graph = network.graph();
    let positions = circular_layout(graph.node_count(), config.width, config.height);

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    for edge in graph.edge_references() {
        let from = positions[edge.source().index()];
        let to = positions[edge.target().index()];
        root.draw(&PathElement::new(vec![from, to], BLACK.mix(0.3).stroke_width(1)))
            .map_err(render_err)?;
    }

    for (index, node) in graph.node_indices().zip(positions.iter()) {
        let weight = &graph[index];
        root.draw(&Circle::new(*node, 9, role_color(weight.role).filled()))
            .map_err(render_err)?;
        root.draw(&Text::new(
            weight.country.clone(),
            (node.0 + 11, node.1 - 11),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(render_err)?;
    }

    root.draw(&Text::new(
        title.to_string(),
        (12, 12),
        ("sans-serif", 18).into_font(),
    ))
    .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Write the network in Graphviz DOT form.
pub fn write_dot(network: &TradeNetwork, path: &Path) -> Result<(), AnalysisError> {
    let graph = network.graph();
    let dot = Dot::with_attr_getters(
        graph,
        &[Config::EdgeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| format!("style=filled fillcolor={}", role_color_name(node.role)),
    );
    std::fs::write(path, format!("{dot}"))?;
    Ok(())
}

/// Render both networks of one side. Returns the files written; a side with
/// no trade matrix writes nothing.
pub fn render_side(
    conflict_id: i64,
    side: &SideReport,
    config: &RenderConfig,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let Some(networks) = &side.networks else {
        return Ok(Vec::new());
    };

    let dir = Path::new(&config.output_dir);
    std::fs::create_dir_all(dir)?;

    let views = [
        ("trade", "trade network", &networks.trade),
        ("combatants", "combatants", &networks.combatants),
    ];

    let mut written = Vec::new();
    for (suffix, caption, view) in views {
        let network = TradeNetwork::from_view(view);
        let stem = format!("conflict_{conflict_id}_side_{}_{suffix}", side.side.label());
        let title = format!("Conflict {conflict_id}, side {}: {caption}", side.side);

        let svg_path = dir.join(format!("{stem}.svg"));
        render_svg(&network, &title, &svg_path, config)?;
        written.push(svg_path);

        if config.export_dot {
            let dot_path = dir.join(format!("{stem}.dot"));
            write_dot(&network, &dot_path)?;
            written.push(dot_path);
        }
    }

    info!(
        conflict_id,
        side = %side.side,
        files = written.len(),
        "Rendered side networks"
    );

    Ok(written)
}

/// Render every side of the report and record the written files on it.
pub fn render_report(
    report: &mut ConflictReport,
    config: &RenderConfig,
) -> Result<(), AnalysisError> {
    let conflict_id = report.conflict_id;
    for side in &mut report.sides {
        side.rendered = render_side(conflict_id, side, config)?;
    }
    Ok(())
}
