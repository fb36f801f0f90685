//! Full-screen passes: the environment backdrop behind the room and the
//! intro fade in front of it.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers;

/// Texture-space scale and offset of the backdrop sample.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, PartialEq)]
pub struct BackdropUniform {
    /// Fraction of the image visible along each axis.
    pub uv_scale: [f32; 2],
    /// Top-left corner of the visible window.
    pub uv_offset: [f32; 2],
}

impl BackdropUniform {
    /// Crop an image of `image_aspect` so it covers a `screen_aspect`
    /// viewport without stretching, centered.
    #[must_use]
    pub fn cover(screen_aspect: f32, image_aspect: f32) -> Self {
        if !(screen_aspect > 0.0 && image_aspect > 0.0) {
            return Self {
                uv_scale: [1.0, 1.0],
                uv_offset: [0.0, 0.0],
            };
        }
        let uv_scale = if screen_aspect > image_aspect {
            [1.0, image_aspect / screen_aspect]
        } else {
            [screen_aspect / image_aspect, 1.0]
        };
        Self {
            uv_scale,
            uv_offset: [(1.0 - uv_scale[0]) * 0.5, (1.0 - uv_scale[1]) * 0.5],
        }
    }
}

/// Draws the backdrop image.
pub struct BackdropPass {
    pipeline: wgpu::RenderPipeline,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    image_aspect: f32,
}

impl BackdropPass {
    /// Build the pass for an image of `image_aspect` (width / height).
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        image_layout: &wgpu::BindGroupLayout,
        image_aspect: f32,
    ) -> Self {
        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/backdrop.wgsl"));
        let (uniform, layout, bind_group) = uniform_binding(
            device,
            "Backdrop",
            &BackdropUniform::cover(1.0, image_aspect),
        );
        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            device,
            "Backdrop",
            &shader,
            format,
            None,
            &[image_layout, &layout],
        );
        Self {
            pipeline,
            uniform,
            bind_group,
            image_aspect,
        }
    }

    /// Recompute the crop for a new surface size.
    pub fn resize(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let screen_aspect = width as f32 / height.max(1) as f32;
        let crop = BackdropUniform::cover(screen_aspect, self.image_aspect);
        queue.write_buffer(&self.uniform, 0, bytemuck::bytes_of(&crop));
    }

    /// Record the full-screen triangle.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, image: &wgpu::BindGroup) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, image, &[]);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

/// Color the intro overlay fades from.
const FADE_COLOR: [f32; 3] = [0.02, 0.01, 0.04];

/// Solid color over the whole surface, alpha driven by the intro.
pub struct FadePass {
    pipeline: wgpu::RenderPipeline,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    opacity: f32,
}

impl FadePass {
    /// Build the pass, fully opaque.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("../../assets/shaders/fade.wgsl"));
        let (uniform, layout, bind_group) =
            uniform_binding(device, "Fade", &fade_color(1.0));
        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            device,
            "Fade",
            &shader,
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            &[&layout],
        );
        Self {
            pipeline,
            uniform,
            bind_group,
            opacity: 1.0,
        }
    }

    /// Update the opacity. Skips the upload when unchanged.
    pub fn set_opacity(&mut self, queue: &wgpu::Queue, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity == self.opacity {
            return;
        }
        self.opacity = opacity;
        queue.write_buffer(&self.uniform, 0, bytemuck::cast_slice(&fade_color(opacity)));
    }

    /// Record the draw unless the overlay is fully transparent.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.opacity <= 0.0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

fn fade_color(opacity: f32) -> [f32; 4] {
    let [r, g, b] = FADE_COLOR;
    [r, g, b, opacity]
}

/// Buffer, layout, and bind group for a single uniform at binding 0.
pub(crate) fn uniform_binding<T: Pod>(
    device: &wgpu::Device,
    label: &str,
    contents: &T,
) -> (wgpu::Buffer, wgpu::BindGroupLayout, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Uniform")),
        contents: bytemuck::bytes_of(contents),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Layout")),
        entries: &[pipeline_helpers::uniform_buffer(0)],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, layout, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_aspect_shows_whole_image() {
        let crop = BackdropUniform::cover(1.5, 1.5);
        assert_eq!(crop.uv_scale, [1.0, 1.0]);
        assert_eq!(crop.uv_offset, [0.0, 0.0]);
    }

    #[test]
    fn wide_screen_crops_top_and_bottom() {
        let crop = BackdropUniform::cover(2.0, 1.0);
        assert_eq!(crop.uv_scale, [1.0, 0.5]);
        assert_eq!(crop.uv_offset, [0.0, 0.25]);
    }

    #[test]
    fn tall_screen_crops_sides() {
        let crop = BackdropUniform::cover(0.5, 2.0);
        assert_eq!(crop.uv_scale, [0.25, 1.0]);
        assert_eq!(crop.uv_offset, [0.375, 0.0]);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let crop = BackdropUniform::cover(0.0, 1.0);
        assert_eq!(crop.uv_scale, [1.0, 1.0]);
    }

    #[test]
    fn fade_keeps_color_and_sets_alpha() {
        assert_eq!(fade_color(0.25)[3], 0.25);
        assert_eq!(fade_color(0.25)[..3], FADE_COLOR);
    }
}
