//! Shared mesh geometry and submesh ranges
//!
//! Geometry generation is handled outside the engine; what lives here is the
//! bookkeeping for one concatenated vertex/index buffer per geometry, with a
//! submesh range per shape. Every render item references its geometry through
//! a cheap copyable [`MeshKey`], and geometries are read-only once registered.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered [`MeshGeometry`]
    pub struct MeshKey;
}

/// The shapes packed into the game's single concatenated geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned box
    Box,
    /// UV sphere
    Sphere,
    /// Four-sided pyramid
    Pyramid,
    /// Thin cylinder
    Cylinder,
}

/// Vertex and index counts a shape contributes to the concatenated buffers
#[derive(Debug, Clone, Copy)]
pub struct ShapeCounts {
    /// Number of vertices the shape occupies
    pub vertices: u32,
    /// Number of indices the shape occupies
    pub indices: u32,
}

/// Draw parameters for one shape inside a concatenated geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// Number of indices to draw
    pub index_count: u32,
    /// First index within the shared index buffer
    pub start_index: u32,
    /// Vertex offset added to every index
    pub base_vertex: i32,
}

/// One immutable concatenated geometry with per-shape submesh ranges
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    /// Geometry name, unique within a [`MeshLibrary`]
    pub name: String,
    /// Total vertex count across all shapes
    pub total_vertices: u32,
    /// Total index count across all shapes
    pub total_indices: u32,
    submeshes: HashMap<ShapeKind, Submesh>,
}

impl MeshGeometry {
    /// Pack shapes back to back into one vertex/index buffer layout.
    ///
    /// Offsets accumulate in declaration order, the same layout the draw
    /// side expects when it issues indexed draws against the shared buffers.
    pub fn concatenated(name: impl Into<String>, shapes: &[(ShapeKind, ShapeCounts)]) -> Self {
        let mut submeshes = HashMap::with_capacity(shapes.len());
        let mut vertex_offset = 0u32;
        let mut index_offset = 0u32;

        for &(kind, counts) in shapes {
            submeshes.insert(
                kind,
                Submesh {
                    index_count: counts.indices,
                    start_index: index_offset,
                    base_vertex: vertex_offset as i32,
                },
            );
            vertex_offset += counts.vertices;
            index_offset += counts.indices;
        }

        Self {
            name: name.into(),
            total_vertices: vertex_offset,
            total_indices: index_offset,
            submeshes,
        }
    }

    /// Look up the submesh range for a shape
    pub fn submesh(&self, kind: ShapeKind) -> Option<Submesh> {
        self.submeshes.get(&kind).copied()
    }
}

/// Registry of shared geometries
///
/// Geometries are stored behind slotmap keys so items can hold on to them
/// without lifetimes or reference counting.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    geometries: SlotMap<MeshKey, MeshGeometry>,
    by_name: HashMap<String, MeshKey>,
}

impl MeshLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a geometry and return its key.
    ///
    /// Registering a second geometry under an existing name replaces the
    /// name mapping; the old geometry stays valid through its key.
    pub fn register(&mut self, geometry: MeshGeometry) -> MeshKey {
        let name = geometry.name.clone();
        let key = self.geometries.insert(geometry);
        self.by_name.insert(name, key);
        key
    }

    /// Get a geometry by key
    pub fn get(&self, key: MeshKey) -> Option<&MeshGeometry> {
        self.geometries.get(key)
    }

    /// Get a geometry key by name
    pub fn key_of(&self, name: &str) -> Option<MeshKey> {
        self.by_name.get(name).copied()
    }

    /// Number of registered geometries
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}
