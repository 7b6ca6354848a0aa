use serde::{Deserialize, Serialize};

/// Canvas position. Carries no meaning for any algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub position: Vec2,
}

impl Node {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Edges store node names as keys, never node references; every lookup goes
/// through the graph's name index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub u: String,
    pub v: String,
    pub weight: u32,
}

impl Edge {
    pub fn new(u: impl Into<String>, v: impl Into<String>, weight: u32) -> Self {
        Self {
            u: u.into(),
            v: v.into(),
            weight,
        }
    }

    /// True if `name` is one of the endpoints.
    pub fn touches(&self, name: &str) -> bool {
        self.u == name || self.v == name
    }
}
