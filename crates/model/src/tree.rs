//! Hierarchy reconstruction for display.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{CatalogObject, ObjectId};

/// Узел дерева результатов
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: Option<ObjectId>,
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// Дерево результатов поиска
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultTree {
    pub roots: Vec<TreeNode>,
}

impl ResultTree {
    /// Build the tree from a fetched result set.
    ///
    /// An object is a root when none of its parents is part of the set. Child
    /// ids missing from the set are skipped. An id already on the current
    /// path is not expanded again. Objects the walk never reaches (a parent
    /// that does not list them, a detached cycle) become extra roots, in
    /// result order, so every returned object is shown.
    pub fn build(objects: &[CatalogObject]) -> Self {
        let mut by_id: HashMap<&str, &CatalogObject> = HashMap::new();
        for obj in objects {
            if let Some(id) = obj.id.as_deref() {
                by_id.entry(id).or_insert(obj);
            }
        }

        let is_root = |obj: &CatalogObject| {
            !obj.parents
                .iter()
                .any(|p| by_id.contains_key(p.as_str()) && Some(p.as_str()) != obj.id.as_deref())
        };

        let mut walk = Walk {
            by_id: &by_id,
            path: Vec::new(),
            reached: HashSet::new(),
        };
        let mut roots: Vec<TreeNode> = objects
            .iter()
            .filter(|&obj| is_root(obj))
            .map(|obj| walk.node(obj))
            .collect();
        for obj in objects {
            let unreached = match obj.id.as_deref() {
                Some(id) => !walk.reached.contains(id),
                None => !is_root(obj),
            };
            if unreached {
                roots.push(walk.node(obj));
            }
        }
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        fn walk<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
            nodes.iter().find_map(|n| {
                if n.id.as_deref() == Some(id) {
                    Some(n)
                } else {
                    walk(&n.children, id)
                }
            })
        }
        walk(&self.roots, id)
    }
}

struct Walk<'a, 'm> {
    by_id: &'m HashMap<&'a str, &'a CatalogObject>,
    path: Vec<&'a str>,
    reached: HashSet<&'a str>,
}

impl<'a> Walk<'a, '_> {
    fn node(&mut self, obj: &'a CatalogObject) -> TreeNode {
        let own = obj.id.as_deref();
        if let Some(id) = own {
            self.path.push(id);
            self.reached.insert(id);
        }

        let resolved: Vec<&'a CatalogObject> = obj
            .children
            .iter()
            .filter(|cid| !self.path.contains(&cid.as_str()))
            .filter_map(|cid| self.by_id.get(cid.as_str()).copied())
            .collect();
        let children = resolved.into_iter().map(|child| self.node(child)).collect();

        if own.is_some() {
            self.path.pop();
        }

        TreeNode {
            id: obj.id.clone(),
            name: obj.name.clone(),
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_response;
    use serde_json::json;

    fn obj(id: &str, parents: &[&str], children: &[&str]) -> CatalogObject {
        CatalogObject {
            id: Some(id.to_string()),
            name: format!("part-{id}"),
            parents: parents.iter().map(|s| s.to_string()).collect(),
            children: children.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bracket_search_builds_single_root() {
        let response = json!({"basic_objects": [
            {"id": "1", "name": "bracket-small", "parents": [], "children": ["2"]},
            {"id": "2", "name": "bracket-small-hole", "parents": ["1"], "children": []}
        ]});
        let tree = ResultTree::build(&parse_response(&response));

        assert_eq!(tree.roots.len(), 1);
        let root = &tree.roots[0];
        assert_eq!(root.id.as_deref(), Some("1"));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].id.as_deref(), Some("2"));
        assert_eq!(root.children[0].name, "bracket-small-hole");
    }

    #[test]
    fn test_unresolved_children_are_skipped() {
        let tree = ResultTree::build(&[obj("1", &[], &["2", "missing"]), obj("2", &["1"], &[])]);
        assert_eq!(tree.len(), 2);
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_parent_outside_set_makes_root() {
        let tree = ResultTree::build(&[obj("5", &["elsewhere"], &[])]);
        assert_eq!(tree.roots.len(), 1);
    }

    #[test]
    fn test_cycle_does_not_recurse_forever() {
        let tree = ResultTree::build(&[obj("a", &["b"], &["b"]), obj("b", &["a"], &["a"])]);
        // no acyclic root: the first object opens the cycle, the second hangs below it
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.len(), 2);
        assert!(tree.find("b").is_some());
    }

    #[test]
    fn test_child_not_listed_by_parent_becomes_root() {
        let tree = ResultTree::build(&[obj("a", &["b"], &[]), obj("b", &[], &[])]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.roots[0].id.as_deref(), Some("b"));
        assert_eq!(tree.roots[1].id.as_deref(), Some("a"));
    }

    #[test]
    fn test_cycle_next_to_real_root_is_kept() {
        let tree = ResultTree::build(&[
            obj("r", &[], &[]),
            obj("x", &["y"], &["y"]),
            obj("y", &["x"], &["x"]),
        ]);
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.roots[1].id.as_deref(), Some("x"));
        assert_eq!(tree.len(), 3);
        assert!(tree.find("y").is_some());
    }

    #[test]
    fn test_shared_child_appears_under_each_parent() {
        let tree = ResultTree::build(&[
            obj("a", &[], &["c"]),
            obj("b", &[], &["c"]),
            obj("c", &["a", "b"], &[]),
        ]);
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.len(), 4);
        assert!(tree.find("c").is_some());
    }
}
