//! Render items, the ordered world collection, and spawn builders

pub mod render_item;
pub mod spawner;
pub mod world;

pub use render_item::{EntityId, EntityKind, FrameLifetime, ItemFlags, RenderItem};
pub use spawner::{SpawnError, SpawnTuning, Spawner};
pub use world::SceneWorld;
