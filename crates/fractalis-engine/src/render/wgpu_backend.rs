use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::error::SetupError;

use super::backend::RenderBackend;
use super::geometry::QuadVertex;
use super::inputs::FractalInputs;
use super::program::{self, ProgramSource, FRAGMENT_ENTRY, VERTEX_ENTRY};

/// Cleared behind the quad; only visible if the quad ever fails to cover the surface.
const CLEAR: wgpu::Color = wgpu::Color::BLACK;

/// wgpu implementation of [`RenderBackend`] drawing into a [`Gpu`] surface.
#[derive(Debug, Default)]
pub struct WgpuBackend;

/// Render pipeline plus the uniform buffer and bind group holding its inputs.
pub struct WgpuProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    inputs_ubo: wgpu::Buffer,
}

pub struct WgpuGeometry {
    vbo: wgpu::Buffer,
}

impl RenderBackend for WgpuBackend {
    type Context<'c> = Gpu<'c>;
    type Program = WgpuProgram;
    type Geometry = WgpuGeometry;

    fn compile_program(
        &mut self,
        gpu: &Gpu<'_>,
        source: &ProgramSource<'_>,
    ) -> Result<WgpuProgram, SetupError> {
        program::check(source)?;

        let device = gpu.device();

        // Pipeline creation errors would otherwise reach the uncaptured-error handler.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractalis vertex stage"),
            source: wgpu::ShaderSource::Wgsl(source.vertex.into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractalis fragment stage"),
            source: wgpu::ShaderSource::Wgsl(source.fragment.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fractalis inputs bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(FractalInputs::SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fractalis pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fractalis pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let inputs_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractalis inputs ubo"),
            size: FractalInputs::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fractalis inputs bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: inputs_ubo.as_entire_binding(),
            }],
        });

        validation_result(pollster::block_on(scope.pop()))?;

        Ok(WgpuProgram {
            pipeline,
            bind_group,
            inputs_ubo,
        })
    }

    fn create_geometry(&mut self, gpu: &Gpu<'_>, vertices: &[QuadVertex]) -> WgpuGeometry {
        let vbo = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fractalis quad vbo"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        WgpuGeometry { vbo }
    }

    fn write_inputs(&mut self, gpu: &Gpu<'_>, program: &WgpuProgram, inputs: &FractalInputs) {
        gpu.queue()
            .write_buffer(&program.inputs_ubo, 0, bytemuck::bytes_of(inputs));
    }

    fn draw(
        &mut self,
        gpu: &mut Gpu<'_>,
        program: &WgpuProgram,
        geometry: &WgpuGeometry,
        vertices: Range<u32>,
    ) -> Result<(), SurfaceErrorAction> {
        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => return Err(gpu.handle_surface_error(err)),
        };

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fractalis pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&program.pipeline);
            rpass.set_bind_group(0, &program.bind_group, &[]);
            rpass.set_vertex_buffer(0, geometry.vbo.slice(..));
            rpass.draw(vertices, 0..1);
        }

        gpu.submit(frame);
        Ok(())
    }
}

/// Turns an error captured while building the program into a link failure.
fn validation_result(captured: Option<wgpu::Error>) -> Result<(), SetupError> {
    match captured {
        Some(err) => Err(SetupError::link(err.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_scope_is_ok() {
        assert!(validation_result(None).is_ok());
    }

    #[test]
    fn captured_validation_error_is_link_error() {
        let captured = wgpu::Error::Validation {
            source: Box::new(std::io::Error::other("binding too small")),
            description: "buffer binding size 16 is less than minimum 64".to_string(),
        };

        match validation_result(Some(captured)) {
            Err(SetupError::Link { diagnostic }) => {
                assert_eq!(diagnostic, "buffer binding size 16 is less than minimum 64");
            }
            other => panic!("expected link error, got {other:?}"),
        }
    }
}
