//! GPU copies of every image the room uses, keyed by path.

use std::collections::HashMap;

use crate::assets::ImageData;
use crate::gpu::{pipeline_helpers, texture::ImageTexture};

/// Uploaded images plus a white fallback for untextured quads.
pub struct TextureCache {
    layout: wgpu::BindGroupLayout,
    textures: HashMap<String, ImageTexture>,
    white: ImageTexture,
}

impl TextureCache {
    /// Upload `images`. Later duplicates of a path replace earlier ones.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        images: Vec<(String, ImageData)>,
    ) -> Self {
        let layout = pipeline_helpers::image_layout(device, "Image Layout");
        let sampler = pipeline_helpers::linear_sampler(device, "Image Sampler");

        let white = ImageTexture::upload(
            device,
            queue,
            &layout,
            &sampler,
            &ImageData::solid([255; 4]),
            "White Texture",
        );
        let textures = images
            .into_iter()
            .map(|(path, image)| {
                let texture = ImageTexture::upload(device, queue, &layout, &sampler, &image, &path);
                (path, texture)
            })
            .collect::<HashMap<_, _>>();
        log::debug!("uploaded {} textures", textures.len());

        Self {
            layout,
            textures,
            white,
        }
    }

    /// Layout every image bind group was created against.
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Texture for `path`, if it was uploaded.
    pub fn get(&self, path: &str) -> Option<&ImageTexture> {
        self.textures.get(path)
    }

    /// Bind group for `path`, falling back to white.
    pub fn bind_group(&self, path: Option<&str>) -> &wgpu::BindGroup {
        path.and_then(|p| self.textures.get(p))
            .map_or(&self.white.bind_group, |t| &t.bind_group)
    }
}
