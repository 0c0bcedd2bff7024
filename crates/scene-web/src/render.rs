use crate::constants::CLEAR_COLOR;
use scene_core::{
    Geometry, Mesh, PerspectiveCamera, Renderer, SceneGraph, Topology, BASIC_WGSL,
};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

// Uploaded geometry; `None` for geometries with nothing to draw.
struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    topology: Topology,
}

struct GpuMesh {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_bgl: wgpu::BindGroupLayout,

    #[allow(dead_code)]
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    geometries: Vec<Option<GpuGeometry>>,
    meshes: Vec<GpuMesh>,
    synced_revision: Option<u64>,

    width: u32,
    height: u32,
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
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
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

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("basic_wgsl"),
            source: wgpu::ShaderSource::Wgsl(BASIC_WGSL.into()),
        });

        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
            entries: &[helpers::uniform_layout_entry(wgpu::ShaderStages::VERTEX)],
        });
        let mesh_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bgl"),
            entries: &[helpers::uniform_layout_entry(
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&camera_bgl, &mesh_bgl],
            push_constant_ranges: &[],
        });
        let triangle_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            Vertex::layout(),
            format,
            wgpu::PrimitiveTopology::TriangleList,
            "triangle_pipeline",
        );
        let line_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            Vertex::layout(),
            format,
            wgpu::PrimitiveTopology::LineList,
            "line_pipeline",
        );

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_ubo"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            triangle_pipeline,
            line_pipeline,
            camera_buffer,
            camera_bind_group,
            mesh_bgl,
            depth_tex,
            depth_view,
            geometries: Vec::new(),
            meshes: Vec::new(),
            synced_revision: None,
            width,
            height,
        })
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
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    fn upload_geometry(&self, geometry: &Geometry) -> Option<GpuGeometry> {
        let data = geometry.mesh_data();
        if data.is_empty() || data.indices.is_empty() {
            return None;
        }
        let vertices: Vec<Vertex> = data
            .positions
            .iter()
            .zip(data.colors.iter())
            .map(|(p, c)| Vertex {
                position: *p,
                color: *c,
            })
            .collect();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vbo"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_ibo"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Some(GpuGeometry {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            topology: data.topology,
        })
    }

    fn create_mesh_slot(&self) -> GpuMesh {
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_ubo"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_bg"),
            layout: &self.mesh_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        GpuMesh {
            uniform_buffer,
            bind_group,
        }
    }

    // Scene entries are append-only, so new ids only ever extend the tail.
    fn sync_scene(&mut self, scene: &SceneGraph) {
        while self.geometries.len() < scene.geometries().len() {
            let g = self.upload_geometry(&scene.geometries()[self.geometries.len()]);
            self.geometries.push(g);
        }
        let added_meshes = self.meshes.len() < scene.mesh_count();
        while self.meshes.len() < scene.mesh_count() {
            let slot = self.create_mesh_slot();
            self.meshes.push(slot);
        }
        if !added_meshes && self.synced_revision == Some(scene.revision()) {
            return;
        }
        for (slot, mesh) in self.meshes.iter().zip(scene.meshes()) {
            let uniforms = mesh_uniforms(scene, mesh);
            self.queue
                .write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
        self.synced_revision = Some(scene.revision());
    }
}

fn mesh_uniforms(scene: &SceneGraph, mesh: &Mesh) -> MeshUniforms {
    let [r, g, b] = scene
        .material(mesh.material)
        .map(|m| m.color.to_linear_f32())
        .unwrap_or([1.0; 3]);
    MeshUniforms {
        model: mesh.transform.matrix().to_cols_array_2d(),
        color: [r, g, b, 1.0],
    }
}

impl Renderer for GpuState {
    type Error = wgpu::SurfaceError;

    fn draw(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Result<(), Self::Error> {
        self.sync_scene(scene);
        let cam = CameraUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            for (slot, mesh) in self.meshes.iter().zip(scene.meshes()) {
                let Some(Some(geom)) = self.geometries.get(mesh.geometry.index()) else {
                    continue;
                };
                let pipeline = match geom.topology {
                    Topology::Triangles => &self.triangle_pipeline,
                    Topology::Lines => &self.line_pipeline,
                };
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, geom.vertex_buffer.slice(..));
                rpass.set_index_buffer(geom.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..geom.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
