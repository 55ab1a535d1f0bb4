//! The four-target G-buffer written by the geometry pass and read by the
//! lighting pass.
//!
//! Binding order is part of the wire format and must match on both
//! sides:
//!   0: world position, Rgba32Float (w = 1 marks a covered pixel)
//!   1: normal,         Rgba32Float
//!   2: albedo,         Rgba32Float
//!   3: roughness/metalness, Rg32Float
//! plus a Depth24Plus attachment that serializes same-pixel writes.
//!
//! All targets are cleared to zero before each geometry pass; a world
//! position with w == 0 is the "no surface" sentinel the lighting pass
//! short-circuits on. A pixel must never be shaded off stale data.

/// Clear value for every color target: the sentinel.
pub const SENTINEL: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

/// Texture formats of the four color targets, in binding order.
pub const COLOR_FORMATS: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Rgba32Float,
    wgpu::TextureFormat::Rgba32Float,
    wgpu::TextureFormat::Rgba32Float,
    wgpu::TextureFormat::Rg32Float,
];

/// Depth attachment format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Owns the G-buffer textures and their views. Recreated on resize; all
/// four color targets always share one resolution.
pub struct GBuffer {
    pub position: wgpu::TextureView,
    pub normal: wgpu::TextureView,
    pub albedo: wgpu::TextureView,
    pub rough_metal: wgpu::TextureView,
    pub depth: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl GBuffer {
    /// Create all targets at the given resolution.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let color = |label, format| Self::create_target(device, label, format, width, height);
        Self {
            position: color("gbuffer-position", COLOR_FORMATS[0]),
            normal: color("gbuffer-normal", COLOR_FORMATS[1]),
            albedo: color("gbuffer-albedo", COLOR_FORMATS[2]),
            rough_metal: color("gbuffer-rough-metal", COLOR_FORMATS[3]),
            depth: Self::create_target(device, "gbuffer-depth", DEPTH_FORMAT, width, height),
            width,
            height,
        }
    }

    /// Recreate every target at a new resolution. The caller must rebuild
    /// any bind group that references the old views.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn create_target(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}
