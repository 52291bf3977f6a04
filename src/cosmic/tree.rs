/*
    Flyby, fast n-body trajectory propagation
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::Body;

/// A node in a [`BodyTree`]: the body plus parent/children as arena indices.
#[derive(Clone, Debug)]
pub struct BodyNode {
    pub body: Body,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Parent/child grouping of bodies for presets and plotting.
///
/// This is an index arena, not an owning pointer structure, and it is entirely
/// decoupled from the flat perturber list the propagator consumes: the physics
/// never reads this tree.
#[derive(Clone, Debug)]
pub struct BodyTree {
    nodes: Vec<BodyNode>,
}

impl BodyTree {
    pub fn new(root: Body) -> Self {
        Self {
            nodes: vec![BodyNode {
                body: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Attaches `body` under the node at `parent` and returns the new index.
    pub fn add_child(&mut self, parent: usize, body: Body) -> usize {
        let index = self.nodes.len();
        self.nodes.push(BodyNode {
            body,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        index
    }

    pub fn root(&self) -> &BodyNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> Option<&BodyNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first traversal starting at the root.
    pub fn depth_first(&self) -> impl Iterator<Item = &BodyNode> + '_ {
        let mut stack = vec![0_usize];
        std::iter::from_fn(move || {
            let index = stack.pop()?;
            let node = &self.nodes[index];
            stack.extend(node.children.iter().rev().copied());
            Some(node)
        })
    }

    /// The Sun with the eight planets as direct children.
    pub fn solar_system() -> Self {
        let mut tree = Self::new(Body::sun());
        for planet in [
            Body::mercury(),
            Body::venus(),
            Body::earth(),
            Body::mars(),
            Body::jupiter(),
            Body::saturn(),
            Body::uranus(),
            Body::neptune(),
        ] {
            tree.add_child(0, planet);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_system_preset() {
        let tree = BodyTree::solar_system();
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.root().body, Body::sun());
        assert_eq!(tree.root().children.len(), 8);
        for &child in &tree.root().children {
            assert_eq!(tree.node(child).unwrap().parent, Some(0));
        }
    }

    #[test]
    fn depth_first_visits_children_in_order() {
        let mut tree = BodyTree::new(Body::sun());
        let earth = tree.add_child(0, Body::earth());
        tree.add_child(earth, Body::moon());
        tree.add_child(0, Body::mars());
        let names: Vec<_> = tree.depth_first().map(|n| n.body.name.clone()).collect();
        assert_eq!(names, ["Sun", "Earth", "Moon", "Mars"]);
    }
}
