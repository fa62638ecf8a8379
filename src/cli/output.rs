//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::collections::BTreeMap;

use colored::Colorize;
use termtree::Tree;

use crate::domain::tree::ROOT_CLADE;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data such as tree strings)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

#[derive(Default)]
struct LineageNode {
    children: BTreeMap<String, LineageNode>,
}

impl LineageNode {
    fn into_tree(self, label: String) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .into_iter()
            .map(|(label, child)| child.into_tree(label))
            .collect();
        Tree::new(label).with_leaves(leaves)
    }
}

/// Draw named lineages, `(ident, [(rank, name), ...])` most general first,
/// as one terminal tree rooted at "life".
pub fn lineage_tree(paths: &[(String, Vec<(String, String)>)]) -> Tree<String> {
    let mut root = LineageNode::default();
    for (ident, path) in paths {
        let mut node = &mut root;
        for (rank, name) in path {
            if name == ident {
                continue;
            }
            node = node
                .children
                .entry(format!("{} ({})", name, rank.dimmed()))
                .or_default();
        }
        node.children.entry(ident.bold().to_string()).or_default();
    }
    root.into_tree(ROOT_CLADE.to_string())
}
