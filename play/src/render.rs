//! Tree dumps for inspecting engine decisions.
//!
//! Two files are written after an engine move:
//! - `tree.txt`: every node in breadth-first order, one line each
//! - `tree.dot`: Graphviz view of the top of the tree, one box per node with its board
//!
//! Render the DOT file with `dot -Tpdf tree.dot -o tree.pdf`.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use mcts::{MctsNode, MctsTree};
use tracing::debug;

/// Deepest level drawn in the Graphviz view (root = 0), keeping the image readable.
pub const DOT_MAX_DEPTH: u32 = 2;

fn mean_label<S, A>(node: &MctsNode<S, A>) -> String {
    if node.visit_count > 0 {
        format!("{:.2}", node.mean_reward())
    } else {
        "NA".to_string()
    }
}

fn player_label<S, A>(node: &MctsNode<S, A>) -> String {
    node.to_move
        .map(|p| p.index().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Write one line per node, breadth first, over the whole tree.
pub fn write_text_dump<S, A, W>(tree: &MctsTree<S, A>, out: &mut W) -> std::io::Result<()>
where
    A: Clone + Display,
    W: Write,
{
    for (id, node, _) in tree.iterate_levels(u32::MAX) {
        let children = node
            .children
            .iter()
            .map(|(action, child)| format!("{}(action={})", child.0, action))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "NodeID: {}, PlayerToMove: {}, AccumValue: {:.2}, V: {}, Visits: {}, Children: [{}]",
            id.0,
            player_label(node),
            node.total_reward,
            mean_label(node),
            node.visit_count,
            children
        )?;
    }
    Ok(())
}

/// Escape a multi-line label for a quoted DOT string.
fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Write a Graphviz digraph of the tree down to `max_depth`.
pub fn write_dot<S, A, W>(tree: &MctsTree<S, A>, max_depth: u32, out: &mut W) -> std::io::Result<()>
where
    S: Display,
    A: Clone + Display,
    W: Write,
{
    writeln!(out, "digraph mcts {{")?;
    writeln!(out, "    node [shape=box, fontname=\"monospace\"];")?;

    for (id, node, _) in tree.iterate_levels(max_depth) {
        let label = format!(
            "ID={}\nPlayer={}\nV={}\nVisits={}\n{}",
            id.0,
            player_label(node),
            mean_label(node),
            node.visit_count,
            node.state
        );
        let style = if id == tree.root() {
            ", style=filled, fillcolor=lightblue"
        } else {
            ""
        };
        writeln!(
            out,
            "    n{} [label=\"{}\"{}];",
            id.0,
            dot_escape(&label),
            style
        )?;
    }

    // Edges after all nodes, leaving out those into the clamped level
    for (id, node, depth) in tree.iterate_levels(max_depth) {
        if depth == max_depth {
            continue;
        }
        for (action, child) in &node.children {
            writeln!(
                out,
                "    n{} -> n{} [label=\"action={}\"];",
                id.0, child.0, action
            )?;
        }
    }

    writeln!(out, "}}")
}

/// Write `tree.txt` and `tree.dot` into `dir`.
pub fn dump_tree<S, A>(tree: &MctsTree<S, A>, dir: &Path) -> Result<()>
where
    S: Display,
    A: Clone + Display,
{
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create dump directory {}", dir.display()))?;

    let text_path = dir.join("tree.txt");
    let mut text = BufWriter::new(
        File::create(&text_path)
            .with_context(|| format!("Failed to create {}", text_path.display()))?,
    );
    write_text_dump(tree, &mut text)?;
    text.flush()?;

    let dot_path = dir.join("tree.dot");
    let mut dot = BufWriter::new(
        File::create(&dot_path)
            .with_context(|| format!("Failed to create {}", dot_path.display()))?,
    );
    write_dot(tree, DOT_MAX_DEPTH, &mut dot)?;
    dot.flush()?;

    debug!(
        nodes = tree.len(),
        text = %text_path.display(),
        dot = %dot_path.display(),
        "Search tree dumped"
    );
    Ok(())
}
