//! GPU resource management utilities.
//!
//! wgpu device/surface initialization, growable instance buffers, image
//! textures and pipeline boilerplate.

/// Growable per-instance vertex buffers.
pub mod dynamic_buffer;
/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Image and depth textures.
pub mod texture;
