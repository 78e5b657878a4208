/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Back to 0xRRGGBB (channels clamped to [0, 1]).
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Primitive geometry the host knows how to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// UV sphere.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Dashed circle in the local XZ plane.
    DashedCircle { radius: f32, segments: u32, dash: f32, gap: f32 },
}

/// Component for engine-described meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub color: Color,
    /// Phong specular exponent (default: 30.0).
    pub shininess: f32,
    /// Self-illumination color; `None` means the material is not emissive.
    pub emissive: Option<Color>,
    /// 1.0 = opaque. Anything lower is drawn in the transparent pass.
    pub opacity: f32,
    /// Render back faces too (flat geometry seen from below).
    pub double_sided: bool,
}

impl MeshComponent {
    pub const DEFAULT_SEGMENTS: u32 = 32;
    pub const RING_SEGMENTS: u32 = 64;

    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            shininess: 30.0,
            emissive: None,
            opacity: 1.0,
            double_sided: false,
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(
            Shape::Sphere { radius, segments: Self::DEFAULT_SEGMENTS },
            color,
        )
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self::new(
            Shape::Ring { inner, outer, segments: Self::RING_SEGMENTS },
            color,
        )
    }

    pub fn dashed_circle(radius: f32, dash: f32, gap: f32, color: Color) -> Self {
        Self::new(
            Shape::DashedCircle { radius, segments: Self::RING_SEGMENTS, dash, gap },
            color,
        )
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = Some(emissive);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        for hex in [0xCD5C5C, 0xFDB813, 0x000000, 0xFFFFFF, 0x888888] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn from_hex_channels() {
        let c = Color::from_hex(0xFF8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn sphere_defaults_are_opaque_and_not_emissive() {
        let m = MeshComponent::sphere(4.0, Color::WHITE);
        assert_eq!(m.shape, Shape::Sphere { radius: 4.0, segments: 32 });
        assert!(m.emissive.is_none());
        assert!(!m.is_transparent());
    }

    #[test]
    fn opacity_marks_transparent_and_clamps() {
        let m = MeshComponent::ring(1.0, 2.0, Color::WHITE).with_opacity(0.5);
        assert!(m.is_transparent());
        assert_eq!(MeshComponent::ring(1.0, 2.0, Color::WHITE).with_opacity(3.0).opacity, 1.0);
    }
}
