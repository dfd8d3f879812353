use super::*;

use shared::domain::{Link, Node, NodeMeta};

fn node(id: &str, symbol: SymbolType, color: Option<&str>) -> Node {
    Node {
        id: id.to_string(),
        symbol_type: symbol,
        label: Some(id.to_string()),
        color: color.map(str::to_string),
        meta: NodeMeta::default(),
    }
}

fn link(source: &str, target: &str) -> Link {
    Link {
        source: source.to_string(),
        target: target.to_string(),
        color: None,
    }
}

fn center_of(layout: &GraphLayout, id: &str) -> Pos2 {
    layout
        .nodes
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.center)
        .expect("node placed")
}

#[test]
fn nodes_are_layered_by_longest_path() {
    let dag = Dag {
        nodes: vec![
            node("t1", SymbolType::Square, None),
            node("a1", SymbolType::Circle, None),
            node("t2", SymbolType::Square, None),
            node("a2", SymbolType::Circle, None),
        ],
        links: vec![link("t1", "a1"), link("a1", "t2"), link("t1", "t2"), link("t2", "a2")],
    };

    let layout = GraphLayout::compute(&dag);

    let x = |id| center_of(&layout, id).x;
    assert!(x("t1") < x("a1"));
    assert!(x("a1") < x("t2"));
    assert!(x("t2") < x("a2"));
    assert_eq!(layout.links.len(), 4);
    assert!(layout.size.x > x("a2"));
}

#[test]
fn siblings_share_a_column_and_stack() {
    let dag = Dag {
        nodes: vec![
            node("root", SymbolType::Square, None),
            node("left", SymbolType::Circle, None),
            node("right", SymbolType::Circle, None),
        ],
        links: vec![link("root", "left"), link("root", "right")],
    };

    let layout = GraphLayout::compute(&dag);

    let left = center_of(&layout, "left");
    let right = center_of(&layout, "right");
    assert_eq!(left.x, right.x);
    assert!(left.y < right.y);
}

#[test]
fn cycles_and_dangling_links_do_not_break_layout() {
    let dag = Dag {
        nodes: vec![
            node("a", SymbolType::Circle, None),
            node("b", SymbolType::Circle, None),
        ],
        links: vec![link("a", "b"), link("b", "a"), link("a", "ghost")],
    };

    let layout = GraphLayout::compute(&dag);

    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(layout.links.len(), 2);
}

#[test]
fn hit_test_respects_symbol_shape() {
    let dag = Dag {
        nodes: vec![
            node("sq", SymbolType::Square, None),
            node("ci", SymbolType::Circle, None),
        ],
        links: vec![link("sq", "ci")],
    };
    let layout = GraphLayout::compute(&dag);
    let square = center_of(&layout, "sq");
    let circle = center_of(&layout, "ci");
    let corner = vec2(NODE_RADIUS - 1.0, NODE_RADIUS - 1.0);

    assert_eq!(layout.hit_test(square + corner), Some("sq"));
    assert_eq!(layout.hit_test(circle + corner), None);
    assert_eq!(layout.hit_test(circle + vec2(2.0, 2.0)), Some("ci"));
    assert_eq!(layout.hit_test(pos2(-100.0, -100.0)), None);
}

#[test]
fn node_colors_come_from_the_node_with_a_default() {
    let dag = Dag {
        nodes: vec![
            node("x", SymbolType::Square, Some("#39B814")),
            node("y", SymbolType::Square, Some("not-a-color")),
        ],
        links: Vec::new(),
    };
    let layout = GraphLayout::compute(&dag);

    assert_eq!(layout.nodes[0].color, Color32::from_rgb(0x39, 0xB8, 0x14));
    assert_eq!(layout.nodes[1].color, DEFAULT_NODE_COLOR);
}

#[test]
fn parses_hex_and_named_colors() {
    assert_eq!(parse_color("#000000"), Some(Color32::BLACK));
    assert_eq!(parse_color("6435C9"), Some(Color32::from_rgb(0x64, 0x35, 0xC9)));
    assert_eq!(parse_color("lightgreen"), Some(DEFAULT_NODE_COLOR));
    assert_eq!(parse_color("#12345"), None);
}
