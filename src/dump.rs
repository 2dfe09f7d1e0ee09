//! Text dumps of a tree for debugging.

use crate::kdtree::KdTree;
use std::fmt;

impl KdTree {
    /// Writes one line per node in pre-order: the point id followed by its coordinates.
    pub fn write_preorder<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for (id, _) in self.pre_order() {
            let p = self.point(id);
            writeln!(out, "{} {:.6} {:.6} {:.6}", p.id, p.x(), p.y(), p.z())?;
        }
        Ok(())
    }

    /// Writes the tree structure as a Graphviz digraph, nodes named by point id.
    ///
    /// Point ids are not required to be unique, so trees with duplicate ids render with merged
    /// vertices.
    pub fn write_dot<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "digraph kdtree {{")?;
        for (id, _) in self.pre_order() {
            let node = self.node(id);
            let p = self.point(id);
            for child in [node.left(), node.right()].into_iter().flatten() {
                writeln!(out, "{} -> {};", p.id, self.point(child).id)?;
            }
            writeln!(
                out,
                "{} [label=\"{}\\n {:.6} {:.6} {:.6}\"];",
                p.id,
                p.id,
                p.x(),
                p.y(),
                p.z()
            )?;
        }
        writeln!(out, "}}")
    }

    pub fn to_dot(&self) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dot(&mut s);
        s
    }
}

impl fmt::Display for KdTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_preorder(f)
    }
}
