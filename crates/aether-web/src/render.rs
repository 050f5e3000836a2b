use crate::pack::{pack_fluid, pack_orb, pack_scene, OrbInstance, ScenePacked};
use aether_core::{Atmosphere, Camera, EnvironmentMap, FrameSink, SceneView};
use web_sys as web;
use wgpu;

mod fluid;
mod helpers;
mod orbs;
mod particles;
mod targets;

use fluid::FluidResources;
use orbs::OrbResources;
use particles::ParticleResources;
use targets::RenderTargets;

// ===================== WebGPU state =====================

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    scene_uniform_buffer: wgpu::Buffer,
    fluid: FluidResources,
    orbs: OrbResources,
    particles: ParticleResources,
    // Keeps the bound environment texture alive
    #[allow(dead_code)]
    env_tex: wgpu::Texture,
    env_present: bool,
    orb_staging: Vec<OrbInstance>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    camera: Camera,
    atmosphere: Atmosphere,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<ScenePacked>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (env_tex, env_view) = helpers::placeholder_environment(&device, &queue);
        let fluid = fluid::create_fluid_resources(&device, format);
        let orbs = orbs::create_orb_resources(&device, format, &scene_uniform_buffer, &env_view);
        let particles =
            particles::create_particle_resources(&device, format, &scene_uniform_buffer);

        let atmosphere = Atmosphere::default();
        let [r, g, b] = atmosphere.clear_color;
        log::info!("[render] WebGPU ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene_uniform_buffer,
            fluid,
            orbs,
            particles,
            env_tex,
            env_present: false,
            orb_staging: Vec::with_capacity(aether_core::ORB_COUNT),
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            camera: Camera::scene(width as f32 / height as f32),
            atmosphere,
        })
    }

    /// Swap in the decoded environment map for orb reflections.
    pub fn set_environment(&mut self, env: &EnvironmentMap) {
        let (tex, view) = helpers::upload_environment(&self.device, &self.queue, env);
        self.orbs.bind_group = orbs::create_orb_bind_group(
            &self.device,
            &self.orbs.bgl,
            &self.scene_uniform_buffer,
            &view,
            &self.orbs.sampler,
        );
        self.env_tex = tex;
        self.env_present = true;
        log::info!("[render] environment uploaded {}x{}", env.width, env.height);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.camera.set_viewport(width, height);
        }
    }

    fn upload_instances(&mut self, view: &SceneView<'_>) -> (u32, u32) {
        self.orb_staging.clear();
        self.orb_staging.extend(view.orbs.iter().map(pack_orb));
        if self.orb_staging.len() > self.orbs.instance_capacity {
            self.orbs.instance_capacity = self.orb_staging.len();
            self.orbs.instance_buffer =
                orbs::create_instance_buffer(&self.device, self.orbs.instance_capacity);
        }
        if !self.orb_staging.is_empty() {
            self.queue.write_buffer(
                &self.orbs.instance_buffer,
                0,
                bytemuck::cast_slice(&self.orb_staging),
            );
        }

        match view.particles {
            Some(field) => field.write_instances(&mut self.particles.staging),
            None => self.particles.staging.clear(),
        }
        let staged = self.particles.staging.len();
        if staged > self.particles.instance_capacity {
            self.particles.instance_capacity = staged;
            self.particles.instance_buffer =
                particles::create_instance_buffer(&self.device, staged);
        }
        if staged > 0 {
            self.queue.write_buffer(
                &self.particles.instance_buffer,
                0,
                bytemuck::cast_slice(&self.particles.staging),
            );
        }
        (self.orb_staging.len() as u32, staged as u32)
    }

    pub fn draw(&mut self, view: &SceneView<'_>) -> anyhow::Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let fluid = pack_fluid(view.fluid, &self.camera);
        self.queue
            .write_buffer(&self.fluid.uniform_buffer, 0, bytemuck::bytes_of(&fluid));
        let scene = pack_scene(&self.camera, &self.atmosphere, self.env_present);
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&scene));
        let (orb_count, particle_count) = self.upload_instances(view);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.fluid.pipeline);
            rpass.set_bind_group(0, &self.fluid.bind_group, &[]);
            rpass.draw(0..6, 0..1);

            if particle_count > 0 {
                rpass.set_pipeline(&self.particles.pipeline);
                rpass.set_bind_group(0, &self.particles.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.particles.corner_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.particles.instance_buffer.slice(..));
                rpass.draw(0..6, 0..particle_count);
            }

            if orb_count > 0 {
                rpass.set_pipeline(&self.orbs.pipeline);
                rpass.set_bind_group(0, &self.orbs.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.orbs.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.orbs.instance_buffer.slice(..));
                rpass.set_index_buffer(self.orbs.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..self.orbs.index_count, 0, 0..orb_count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl FrameSink for GpuState {
    fn render(&mut self, view: &SceneView<'_>) -> anyhow::Result<()> {
        self.draw(view)
    }
}
