use alloc::{collections::VecDeque, string::String};
use core::fmt;

use crate::{node::Node, AvlTree};

impl<T> AvlTree<T>
where
    T: fmt::Display,
{
    /// Renders the tree as a Graphviz digraph named `name`.
    ///
    /// Each level of the tree is placed on its own rank. Nodes are labelled `value:height` and
    /// missing children are drawn as points.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let root = match self.root.as_deref() {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        // Values may repeat, so nodes are identified by visiting order rather than by value.
        enum Item<'a, T> {
            Node(&'a Node<T>, u32),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root, 0));
        let mut next_id = 1_u32;

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;

            write!(w, "{{rank=same; ")?;

            for _ in 0..queue.len() {
                let (node, id) = match queue.pop_front() {
                    Some(Item::Node(node, id)) => (node, id),
                    Some(Item::Missing(id)) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                    None => break,
                };

                write!(
                    w,
                    "\"graph{name}-{id}\" [label=\"{}:{}\"]; ",
                    node.value, node.height
                )?;

                for child in [node.left.as_deref(), node.right.as_deref()] {
                    if let Some(child) = child {
                        queue.push_back(Item::Node(child, next_id));
                        writeln!(links, "\"graph{name}-{id}\" -> \"graph{name}-{next_id}\";")?;
                        next_id += 1;
                    } else {
                        queue.push_back(Item::Missing(missing));
                        writeln!(
                            links,
                            "\"graph{name}-{id}\" -> \"graph{name}-missing{missing}\";"
                        )?;
                        missing += 1;
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}
