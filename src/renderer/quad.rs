//! Instanced textured quads.
//!
//! Quads are grouped by texture so each image is bound once per frame.
//! Untextured quads sample a 1x1 white texture and show their tint.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use super::textures::TextureCache;
use crate::gpu::{dynamic_buffer::InstanceBuffer, pipeline_helpers};
use crate::scene::QuadDraw;

/// Per-instance vertex data: column-major model matrix plus tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, PartialEq)]
pub struct QuadInstance {
    /// Columns of the model matrix.
    pub model: [[f32; 4]; 4],
    /// Multiplied with the sampled color.
    pub tint: [f32; 4],
}

impl QuadInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x4,
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A run of instances sharing one texture.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Batch {
    pub(crate) texture: Option<String>,
    pub(crate) instances: Range<u32>,
}

/// Sort quads into per-texture runs, keeping draw order within a run.
pub(crate) fn batch_quads(quads: &[QuadDraw<'_>]) -> (Vec<QuadInstance>, Vec<Batch>) {
    let mut order: Vec<usize> = (0..quads.len()).collect();
    order.sort_by_key(|&i| quads[i].texture);

    let mut instances = Vec::with_capacity(quads.len());
    let mut batches: Vec<Batch> = Vec::new();
    for i in order {
        let quad = &quads[i];
        let index = instances.len() as u32;
        instances.push(QuadInstance {
            model: quad.model.to_cols_array_2d(),
            tint: quad.tint,
        });
        match batches.last_mut() {
            Some(batch) if batch.texture.as_deref() == quad.texture => {
                batch.instances.end = index + 1;
            }
            _ => batches.push(Batch {
                texture: quad.texture.map(str::to_owned),
                instances: index..index + 1,
            }),
        }
    }
    (instances, batches)
}

/// Depth-tested pass drawing every room quad.
pub struct QuadPass {
    pipeline: wgpu::RenderPipeline,
    instances: InstanceBuffer<QuadInstance>,
    batches: Vec<Batch>,
}

impl QuadPass {
    /// Build the pipeline against the camera and image layouts.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        image_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("../../assets/shaders/quad.wgsl"));
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[camera_layout, image_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[QuadInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            // Cards and frames are seen from both sides while orbiting.
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_helpers::depth_state(true)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            instances: InstanceBuffer::with_capacity(device, "Quad Instances", 64),
            batches: Vec::new(),
        }
    }

    /// Upload this frame's quads.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, quads: &[QuadDraw<'_>]) {
        let (instances, batches) = batch_quads(quads);
        let _ = self.instances.write(device, queue, &instances);
        self.batches = batches;
    }

    /// Record one draw per texture run.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &wgpu::BindGroup,
        textures: &TextureCache,
    ) {
        if self.instances.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera, &[]);
        pass.set_vertex_buffer(0, self.instances.slice());
        for batch in &self.batches {
            pass.set_bind_group(1, textures.bind_group(batch.texture.as_deref()), &[]);
            pass.draw(0..6, batch.instances.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;

    fn quad(texture: Option<&str>, x: f32) -> QuadDraw<'_> {
        QuadDraw {
            texture,
            model: Mat4::from_translation(glam::Vec3::X * x),
            tint: [1.0; 4],
        }
    }

    #[test]
    fn quads_group_by_texture() {
        let quads = [
            quad(Some("b.png"), 0.0),
            quad(None, 1.0),
            quad(Some("a.png"), 2.0),
            quad(Some("b.png"), 3.0),
            quad(None, 4.0),
        ];
        let (instances, batches) = batch_quads(&quads);
        assert_eq!(instances.len(), 5);
        assert_eq!(
            batches,
            vec![
                Batch { texture: None, instances: 0..2 },
                Batch { texture: Some("a.png".into()), instances: 2..3 },
                Batch { texture: Some("b.png".into()), instances: 3..5 },
            ]
        );
        // Stable within a run: first untextured quad stays first.
        assert_eq!(instances[0].model[3][0], 1.0);
        assert_eq!(instances[1].model[3][0], 4.0);
    }

    #[test]
    fn empty_input_has_no_batches() {
        let (instances, batches) = batch_quads(&[]);
        assert!(instances.is_empty());
        assert!(batches.is_empty());
    }

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 80);
    }
}
