//! The simulation state: namespace tree plus identity registry.

use aclfs_acl::{AclEntry, Permissions};
use aclfs_core::{PathLimits, Registry, Result};
use serde::Serialize;

use crate::tree::Namespace;

/// Initial directories and their single ACL entry.
const BOOTSTRAP: &[(&str, Permissions)] = &[
    ("/tmp", Permissions::READ_WRITE),
    ("/home", Permissions::READ),
];

/// Owning context for one simulation run.
#[derive(Debug, Clone)]
pub struct World {
    /// The namespace tree
    pub namespace: Namespace,
    /// Users and groups
    pub registry: Registry,
}

/// One node of a [`World::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    /// Absolute path
    pub path: String,
    /// ACL entries in order, rendered as `user.group perms`
    pub acl: Vec<String>,
}

impl World {
    /// Creates the initial world: `/` (`*.* r`), `/tmp` (`*.* rw`) and
    /// `/home` (`*.* r`), with no users or groups.
    pub fn new(limits: PathLimits) -> Result<Self> {
        let mut namespace = Namespace::new(limits);
        let root = namespace.root();
        if let Some(node) = namespace.node_mut(root) {
            node.acl.add_entry(AclEntry::everyone(Permissions::READ));
        }
        for (path, permissions) in BOOTSTRAP {
            let id = namespace.create_path(path)?;
            if let Some(node) = namespace.node_mut(id) {
                node.acl.add_entry(AclEntry::everyone(*permissions));
            }
        }
        tracing::debug!(nodes = namespace.len(), "Bootstrapped namespace");

        Ok(Self {
            namespace,
            registry: Registry::new(),
        })
    }

    /// Appends `*.* r` to the file of every user that was given one.
    ///
    /// Runs once, when the definition section ends. Files deleted in the
    /// meantime are skipped.
    pub fn publish_homes(&mut self) -> usize {
        let homes: Vec<_> = self.registry.users().filter_map(|(_, u)| u.home()).collect();
        let mut published = 0;
        for home in homes {
            if let Some(node) = self.namespace.node_mut(home)
                && node.acl.add_entry(AclEntry::everyone(Permissions::READ))
            {
                published += 1;
            }
        }
        tracing::debug!(published, "Granted world read on user files");
        published
    }

    /// Lists every node depth-first with its rendered ACL.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.namespace
            .walk()
            .into_iter()
            .filter_map(|id| {
                let node = self.namespace.node(id)?;
                Some(NodeSnapshot {
                    path: self.namespace.path_of(id),
                    acl: node
                        .acl
                        .entries()
                        .iter()
                        .map(|e| e.display(&self.registry).to_string())
                        .collect(),
                })
            })
            .collect()
    }

    /// Renders the namespace as `<path>\t<acl>` lines.
    pub fn render_tree(&self) -> String {
        self.snapshot()
            .iter()
            .map(|n| format!("{}\t{}\n", n.path, n.acl.join(", ")))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use aclfs_acl::Principal;

    #[test]
    fn test_initial_layout() {
        let world = World::new(PathLimits::default()).unwrap();
        assert_eq!(
            world.render_tree(),
            "/\t*.* r\n/tmp\t*.* rw\n/home\t*.* r\n"
        );
        assert_eq!(world.registry.user_count(), 0);
    }

    #[test]
    fn test_publish_homes_appends_world_read() {
        let mut world = World::new(PathLimits::default()).unwrap();
        let ana = world.registry.find_or_create_user("ana").unwrap();
        let home = world.namespace.create_path("/home/ana").unwrap();
        world
            .namespace
            .node_mut(home)
            .unwrap()
            .acl
            .add_entry(AclEntry::new(
                Principal::Specific(ana),
                Principal::Wildcard,
                Permissions::READ_WRITE,
            ));
        world.registry.set_home(ana, home).unwrap();
        world.registry.find_or_create_user("bob").unwrap();

        assert_eq!(world.publish_homes(), 1);
        let snapshot = world.snapshot();
        let ana_home = snapshot.iter().find(|n| n.path == "/home/ana").unwrap();
        assert_eq!(ana_home.acl, vec!["ana.* rw", "*.* r"]);
    }

    #[test]
    fn test_publish_skips_deleted_homes() {
        let mut world = World::new(PathLimits::default()).unwrap();
        let ana = world.registry.find_or_create_user("ana").unwrap();
        let home = world.namespace.create_path("/tmp/ana").unwrap();
        world.registry.set_home(ana, home).unwrap();
        let tmp = world.namespace.resolve("/tmp").unwrap().unwrap();
        world.namespace.remove_child(tmp, "ana");

        assert_eq!(world.publish_homes(), 0);
    }

    #[test]
    fn test_publish_homes_counts_only_new_entries() {
        let mut world = World::new(PathLimits::default()).unwrap();
        let ana = world.registry.find_or_create_user("ana").unwrap();
        let home = world.namespace.create_path("/tmp/ana").unwrap();
        world.registry.set_home(ana, home).unwrap();

        assert_eq!(world.publish_homes(), 1);
        assert_eq!(world.publish_homes(), 0);
        let acl = &world.namespace.node(home).unwrap().acl;
        assert_eq!(acl.render(&world.registry), "*.* r");
    }
}
