//! Layered layout of the DAG and hit-testing for clicks on the canvas.

use std::collections::HashMap;

use egui::{pos2, vec2, Color32, Pos2, Vec2};
use shared::domain::{Dag, SymbolType};

pub const NODE_RADIUS: f32 = 14.0;
const COLUMN_SPACING: f32 = 110.0;
const ROW_SPACING: f32 = 60.0;
const MARGIN: f32 = 40.0;

pub const DEFAULT_NODE_COLOR: Color32 = Color32::from_rgb(144, 238, 144);
pub const DEFAULT_LINK_COLOR: Color32 = Color32::from_rgb(211, 211, 211);

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub center: Pos2,
    pub symbol: SymbolType,
    pub color: Color32,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLink {
    pub from: Pos2,
    pub to: Pos2,
    pub color: Color32,
}

/// Node positions relative to the canvas origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLayout {
    pub nodes: Vec<PlacedNode>,
    pub links: Vec<PlacedLink>,
    pub size: Vec2,
}

impl GraphLayout {
    /// Nodes are placed in columns by their longest distance from a source,
    /// in the order the backend listed them. Links are drawn as received;
    /// a cycle only caps the depth.
    pub fn compute(dag: &Dag) -> Self {
        let index: HashMap<&str, usize> = dag
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let edges: Vec<(usize, usize)> = dag
            .links
            .iter()
            .filter_map(|link| {
                Some((
                    *index.get(link.source.as_str())?,
                    *index.get(link.target.as_str())?,
                ))
            })
            .collect();

        let max_depth = dag.nodes.len().saturating_sub(1);
        let mut depth = vec![0usize; dag.nodes.len()];
        for _ in 0..dag.nodes.len() {
            let mut changed = false;
            for &(source, target) in &edges {
                let candidate = (depth[source] + 1).min(max_depth);
                if depth[target] < candidate {
                    depth[target] = candidate;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let mut rows_used: HashMap<usize, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(dag.nodes.len());
        let mut max = vec2(0.0, 0.0);
        for (node, column) in dag.nodes.iter().zip(&depth) {
            let row = rows_used.entry(*column).or_insert(0);
            let center = pos2(
                MARGIN + *column as f32 * COLUMN_SPACING,
                MARGIN + *row as f32 * ROW_SPACING,
            );
            *row += 1;
            max = max.max(center.to_vec2());
            nodes.push(PlacedNode {
                id: node.id.clone(),
                center,
                symbol: node.symbol_type,
                color: node
                    .color
                    .as_deref()
                    .and_then(parse_color)
                    .unwrap_or(DEFAULT_NODE_COLOR),
                label: node.label.clone(),
            });
        }

        let links = dag
            .links
            .iter()
            .filter_map(|link| {
                let from = nodes[*index.get(link.source.as_str())?].center;
                let to = nodes[*index.get(link.target.as_str())?].center;
                Some(PlacedLink {
                    from,
                    to,
                    color: link
                        .color
                        .as_deref()
                        .and_then(parse_color)
                        .unwrap_or(DEFAULT_LINK_COLOR),
                })
            })
            .collect();

        Self {
            nodes,
            links,
            size: max + vec2(MARGIN, MARGIN),
        }
    }

    /// The node under `point`, preferring the one drawn last.
    pub fn hit_test(&self, point: Pos2) -> Option<&str> {
        self.nodes
            .iter()
            .rev()
            .find(|node| {
                let d = point - node.center;
                match node.symbol {
                    SymbolType::Circle => d.length() <= NODE_RADIUS,
                    SymbolType::Square => d.x.abs() <= NODE_RADIUS && d.y.abs() <= NODE_RADIUS,
                }
            })
            .map(|node| node.id.as_str())
    }
}

/// `#rrggbb`, `rrggbb` or one of the few CSS names the backend uses.
pub fn parse_color(raw: &str) -> Option<Color32> {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "black" => return Some(Color32::BLACK),
        "red" => return Some(Color32::from_rgb(255, 0, 0)),
        "green" => return Some(Color32::from_rgb(0, 128, 0)),
        "lightgreen" => return Some(DEFAULT_NODE_COLOR),
        "blue" => return Some(Color32::from_rgb(0, 0, 255)),
        _ => {}
    }
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
#[path = "../tests/graph_tests.rs"]
mod tests;
