//! The ordered render item collection
//!
//! Insertion order is both draw order and collision iteration order, so the
//! store is a plain vector. Removal is mark-then-compact: the update pass
//! flags items and [`SceneWorld::compact`] drops them at the end of the
//! frame, which keeps indices valid for the whole pass.

use log::debug;

use crate::foundation::math::Mat4;
use crate::render::constants::ObjectConstants;
use crate::render::mesh::{MeshKey, Submesh};
use crate::render::upload::UploadBuffer;
use crate::scene::render_item::{EntityId, EntityKind, FrameLifetime, ItemFlags, RenderItem};

/// Ordered, mutable collection of render items plus session state
#[derive(Debug, Default)]
pub struct SceneWorld {
    items: Vec<RenderItem>,
    next_id: EntityId,
    next_cb_index: u32,
    game_over: bool,
}

impl SceneWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item at the end of the collection.
    ///
    /// Allocates the item's identifier and constant buffer index from
    /// monotonically increasing counters; neither is ever reused, so buffer
    /// indices stay strictly increasing across spawns even after removals.
    pub fn insert(
        &mut self,
        kind: EntityKind,
        world: Mat4,
        geometry: MeshKey,
        submesh: Submesh,
        lifetime: Option<FrameLifetime>,
    ) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        let cb_index = self.next_cb_index;
        self.next_cb_index += 1;

        debug!("spawn {:?} id={} cb_index={}", kind, id, cb_index);

        self.items.push(RenderItem {
            id,
            kind,
            world,
            cb_index,
            geometry,
            submesh,
            lifetime,
            flags: ItemFlags::empty(),
            object_cb: UploadBuffer::<ObjectConstants>::new(1, true),
        });
        id
    }

    /// All items in insertion order, removed-marked ones included
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Mutable access to the items
    pub fn items_mut(&mut self) -> &mut [RenderItem] {
        &mut self.items
    }

    /// The opaque draw list: live items in insertion order
    pub fn opaque_items(&self) -> impl Iterator<Item = &RenderItem> {
        self.items.iter().filter(|item| item.is_live())
    }

    /// Number of items, removed-marked ones included
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by identifier
    pub fn find(&self, id: EntityId) -> Option<&RenderItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of the first item of a kind, if any is live
    pub fn first_of_kind(&self, kind: EntityKind) -> Option<&RenderItem> {
        self.opaque_items().find(|item| item.kind == kind)
    }

    /// Whether the session has ended
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Latch the game-over flag; it never resets within a session
    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }

    /// Empty the collection (the game-over path)
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop items marked removed, preserving the order of the rest.
    ///
    /// Returns how many items were dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(RenderItem::is_live);
        let dropped = before - self.items.len();
        if dropped > 0 {
            debug!("compacted {} removed item(s)", dropped);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::{MeshGeometry, MeshLibrary, ShapeCounts, ShapeKind};

    fn test_world_with_items(kinds: &[EntityKind]) -> SceneWorld {
        let mut library = MeshLibrary::new();
        let key = library.register(MeshGeometry::concatenated(
            "shapes",
            &[(ShapeKind::Box, ShapeCounts { vertices: 8, indices: 36 })],
        ));
        let submesh = library
            .get(key)
            .and_then(|g| g.submesh(ShapeKind::Box))
            .unwrap();

        let mut world = SceneWorld::new();
        for &kind in kinds {
            world.insert(kind, Mat4::identity(), key, submesh, None);
        }
        world
    }

    #[test]
    fn test_insert_assigns_increasing_cb_indices() {
        let world = test_world_with_items(&[
            EntityKind::Asteroid,
            EntityKind::Asteroid,
            EntityKind::Asteroid,
        ]);
        let indices: Vec<u32> = world.items().iter().map(|i| i.cb_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_cb_indices_stay_increasing_after_removal() {
        let mut world = test_world_with_items(&[
            EntityKind::Asteroid,
            EntityKind::Asteroid,
            EntityKind::Asteroid,
        ]);
        world.items_mut()[1].mark_removed();
        world.compact();

        world.insert(
            EntityKind::Asteroid,
            Mat4::identity(),
            world.items()[0].geometry,
            world.items()[0].submesh,
            None,
        );

        let indices: Vec<u32> = world.items().iter().map(|i| i.cb_index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_compact_preserves_order() {
        let mut world = test_world_with_items(&[
            EntityKind::Box,
            EntityKind::Player,
            EntityKind::Asteroid,
            EntityKind::Projectile,
        ]);
        world.items_mut()[0].mark_removed();
        world.items_mut()[2].mark_removed();

        assert_eq!(world.compact(), 2);
        let kinds: Vec<EntityKind> = world.items().iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Player, EntityKind::Projectile]);
    }

    #[test]
    fn test_opaque_list_skips_marked_items() {
        let mut world = test_world_with_items(&[EntityKind::Box, EntityKind::Asteroid]);
        world.items_mut()[0].mark_removed();
        assert_eq!(world.opaque_items().count(), 1);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_game_over_latches() {
        let mut world = test_world_with_items(&[EntityKind::Player]);
        assert!(!world.game_over());
        world.set_game_over();
        world.set_game_over();
        assert!(world.game_over());
    }
}
