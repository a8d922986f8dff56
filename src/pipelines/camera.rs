use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3, Vector4};
use wgpu::util::DeviceExt;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A perspective camera looking at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: impl Into<Point3<f32>>, target: impl Into<Point3<f32>>, aspect: f32) -> Self {
        Self {
            eye: eye.into(),
            target: target.into(),
            up: Vector3::unit_y(),
            aspect,
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Camera data shared by the material and skybox shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Inverse of the projection times the view without translation; maps
    /// clip space back to a world direction for the background.
    pub sky_inv_view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        let view = camera.view();
        let projection = camera.projection();
        let mut rotation = view;
        rotation.w = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let sky = (projection * rotation).invert().unwrap_or_else(Matrix4::identity);
        Self {
            view_proj: (projection * view).into(),
            view: view.into(),
            sky_inv_view_proj: sky.into(),
            position: camera.eye.to_homogeneous().into(),
        }
    }
}

pub fn camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    })
}

/// Uniform buffer and bind group holding a [`CameraUniform`].
#[derive(Debug)]
pub struct CameraBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, camera: &Camera) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(camera)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });
        Self { buffer, bind_group }
    }

    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[CameraUniform::new(camera)]));
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Vector4};

    use super::*;

    #[test]
    fn sky_matrix_ignores_camera_position() {
        let near = CameraUniform::new(&Camera::new((0.0, 0.0, 1.0), (0.0, 0.0, 0.0), 1.0));
        let far = CameraUniform::new(&Camera::new((0.0, 0.0, 50.0), (0.0, 0.0, 49.0), 1.0));
        for (a, b) in near.sky_inv_view_proj.iter().flatten().zip(far.sky_inv_view_proj.iter().flatten()) {
            assert!((a - b).abs() < 1e-4);
        }
        assert_eq!(far.position, [0.0, 0.0, 50.0, 1.0]);
    }

    #[test]
    fn screen_centre_looks_at_target() {
        let uniform = CameraUniform::new(&Camera::new((0.0, 0.0, 5.0), (0.0, 0.0, 0.0), 1.5));
        let world = Matrix4::from(uniform.sky_inv_view_proj) * Vector4::new(0.0, 0.0, 1.0, 1.0);
        let direction = (world.truncate() / world.w).normalize();
        assert!((direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-4, "{direction:?}");
    }
}
