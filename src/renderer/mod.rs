//! GPU rendering of the room.
//!
//! One render pass per frame, drawn in order:
//! backdrop, room quads, firework sparks, intro fade.
//!
//! Only the fade depends on the front end: the native viewer draws it,
//! while the browser fades a DOM overlay instead and passes `None`.

pub mod overlay;
pub mod particles;
pub mod quad;
pub mod textures;

use crate::assets::ImageData;
use crate::camera::CameraUniform;
use crate::engine::GreetingEngine;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;

use self::overlay::{BackdropPass, FadePass};
use self::particles::ParticlePass;
use self::quad::QuadPass;
use self::textures::TextureCache;

/// Clear color behind the backdrop, visible only if it fails to cover.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.01,
    b: 0.04,
    a: 1.0,
};

/// Owns every GPU resource and records the frame.
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth: DepthTexture,
    textures: TextureCache,
    backdrop: BackdropPass,
    quads: QuadPass,
    particles: ParticlePass,
    fade: FadePass,
    background: String,
}

impl SceneRenderer {
    /// Upload `images` and build every pipeline.
    ///
    /// `images` should contain each path from
    /// [`Scene::texture_paths`](crate::scene::Scene::texture_paths);
    /// missing ones render white.
    pub fn new(
        context: &RenderContext,
        engine: &GreetingEngine,
        images: Vec<(String, ImageData)>,
    ) -> Self {
        let device = &context.device;
        let format = context.format();
        let (width, height) = context.size();

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(engine.camera());
        let (camera_buffer, camera_layout, camera_bind_group) =
            overlay::uniform_binding(device, "Camera", &camera_uniform);

        let textures = TextureCache::new(device, &context.queue, images);
        let background = engine.scene().background().to_owned();
        let backdrop_aspect = textures.get(&background).map_or(1.0, |t| t.aspect);
        let backdrop = BackdropPass::new(device, format, textures.layout(), backdrop_aspect);
        backdrop.resize(&context.queue, width, height);

        let quads = QuadPass::new(device, format, &camera_layout, textures.layout());
        let particles = ParticlePass::new(device, format, &camera_layout);
        let fade = FadePass::new(device, format);

        log::info!(
            "scene renderer ready: {width}x{height}, {} cards",
            engine.scene().cards().len()
        );

        Self {
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            depth: DepthTexture::new(device, width, height),
            textures,
            backdrop,
            quads,
            particles,
            fade,
            background,
        }
    }

    /// Recreate size-dependent resources. Call after
    /// [`RenderContext::resize`].
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        self.depth = DepthTexture::new(&context.device, width, height);
        self.backdrop.resize(&context.queue, width, height);
    }

    /// Draw the engine's current state.
    ///
    /// `fade` is the intro overlay opacity to paint over the room, or
    /// `None` when the overlay is drawn elsewhere.
    ///
    /// # Errors
    ///
    /// Returns the surface error if no frame could be acquired. Callers
    /// should reconfigure on `Lost`/`Outdated` and skip the frame.
    pub fn render(
        &mut self,
        context: &RenderContext,
        engine: &GreetingEngine,
        fade: Option<f32>,
    ) -> Result<(), wgpu::SurfaceError> {
        let device = &context.device;
        let queue = &context.queue;

        self.camera_uniform.update_view_proj(engine.camera());
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
        self.quads.prepare(device, queue, &engine.scene().quads());
        self.particles
            .prepare(device, queue, &engine.fireworks().instances());
        self.fade.set_opacity(queue, fade.unwrap_or(0.0));

        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.backdrop
                .draw(&mut pass, self.textures.bind_group(Some(&self.background)));
            self.quads
                .draw(&mut pass, &self.camera_bind_group, &self.textures);
            self.particles.draw(&mut pass, &self.camera_bind_group);
            self.fade.draw(&mut pass);
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }
}
