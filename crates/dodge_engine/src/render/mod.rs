//! Renderer-facing plumbing: geometry registry, constant buffers, the
//! per-frame feed, camera, and the backend seam

pub mod backend;
pub mod camera;
pub mod constants;
pub mod feed;
pub mod mesh;
pub mod upload;

pub use backend::{draw_render_items, DrawCall, HeadlessBackend, RenderBackend, RenderError};
pub use camera::{FreeCamera, Viewport};
pub use constants::{ObjectConstants, PassConstants};
pub use feed::{upload_object_constants, FrameFeed};
pub use mesh::{MeshGeometry, MeshKey, MeshLibrary, ShapeCounts, ShapeKind, Submesh};
pub use upload::UploadBuffer;
