use bytemuck::{Pod, Zeroable};

/// Instance kinds, written into [`RenderInstance::kind`].
pub const KIND_SPHERE: f32 = 0.0;
pub const KIND_RING: f32 = 1.0;
pub const KIND_DASHED_CIRCLE: f32 = 2.0;
pub const KIND_MODEL: f32 = 3.0;

/// Written into [`RenderInstance::emissive`] when the material does not glow.
pub const NO_EMISSIVE: f32 = -1.0;

/// Bit in [`RenderInstance::flags`]: draw back faces too.
pub const FLAG_DOUBLE_SIDED: u32 = 1;

/// Per-instance render data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
///
/// Shape parameters depend on `kind`:
/// - sphere: `a` = radius, `b` = segments
/// - ring: `a` = inner, `b` = outer, `c` = segments
/// - dashed circle: `a` = radius, `b` = dash, `c` = gap
/// - model: `a` = asset handle, `b` = bounding radius
///
/// Colors are packed `0xRRGGBB` integers, exact in an f32.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation in radians.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    /// Uniform scale.
    pub scale: f32,
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub color: f32,
    pub emissive: f32,
    pub opacity: f32,
    pub shininess: f32,
    pub flags: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer: opaque instances first, then transparent ones after
/// `transparent_split`.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub transparent_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            transparent_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 64);
        assert_eq!(RenderInstance::FLOATS, 16);
    }

    #[test]
    fn render_buffer_push_and_clear() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        buf.set_transparent_split(1);
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.transparent_split, 0);
    }
}
