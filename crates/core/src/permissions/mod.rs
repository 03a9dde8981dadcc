use crate::commands::Player;
use rustc_hash::FxHashMap;

/// Decides whether a player holds a permission. Consulted both before a
/// command runs and while filtering completions.
pub trait PermissionAuthority: Send + Sync {
    fn has_permission(&self, player: &dyn Player, permission: &str) -> bool;
}

impl<F> PermissionAuthority for F
where
    F: Fn(&dyn Player, &str) -> bool + Send + Sync,
{
    fn has_permission(&self, player: &dyn Player, permission: &str) -> bool {
        self(player, permission)
    }
}

#[derive(Debug)]
enum PathSegment {
    WildCard,
    Named(String),
}

#[derive(Debug)]
struct PermissionNode {
    path: Vec<PathSegment>,
    value: bool,
}

impl PermissionNode {
    fn matches(&self, str: &str) -> bool {
        let mut segments = str.split('.');
        for node_segment in &self.path {
            match (node_segment, segments.next()) {
                (PathSegment::WildCard, _) => return true,
                (PathSegment::Named(name), Some(segment)) if name == segment => {}
                _ => return false,
            }
        }
        segments.next().is_none()
    }
}

/// Permission nodes granted to (or taken from) one player. The first node
/// matching a permission decides it.
#[derive(Debug, Default)]
pub struct PlayerPermissions {
    nodes: Vec<PermissionNode>,
}

impl PlayerPermissions {
    pub fn get_node_val(&self, name: &str) -> Option<bool> {
        self.nodes
            .iter()
            .find(|node| node.matches(name))
            .map(|node| node.value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get_node_val(name).unwrap_or(false)
    }

    pub fn insert(&mut self, name: &str, value: bool) {
        let path = name
            .split('.')
            .map(|s| match s {
                "*" => PathSegment::WildCard,
                s => PathSegment::Named(s.to_owned()),
            })
            .collect();
        self.nodes.push(PermissionNode { path, value });
    }

    /// Adds a node written the way server admins do: `a.b` grants, `-a.b`
    /// revokes.
    pub fn insert_node(&mut self, node: &str) {
        match node.strip_prefix('-') {
            Some(negated) => self.insert(negated, false),
            None => self.insert(node, true),
        }
    }
}

impl<'a> FromIterator<&'a str> for PlayerPermissions {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut permissions = PlayerPermissions::default();
        for node in iter {
            permissions.insert_node(node);
        }
        permissions
    }
}

/// Static per-player permissions keyed by lower-cased player name.
#[derive(Debug, Default)]
pub struct PermissionTable {
    players: FxHashMap<String, PlayerPermissions>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_player(&mut self, name: &str, permissions: PlayerPermissions) {
        self.players.insert(name.to_lowercase(), permissions);
    }

    pub fn player(&self, name: &str) -> Option<&PlayerPermissions> {
        self.players.get(&name.to_lowercase())
    }
}

impl PermissionAuthority for PermissionTable {
    fn has_permission(&self, player: &dyn Player, permission: &str) -> bool {
        self.player(player.name())
            .is_some_and(|permissions| permissions.has(permission))
    }
}
