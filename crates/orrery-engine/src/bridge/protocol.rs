/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 20 floats]
/// [Instances: max_instances × 16 floats]
/// [Lights: max_lights × 8 floats]
/// [Points: max_points × 3 floats]
/// [Events: max_events × 4 floats]
/// [Camera: 24 floats]
/// ```
///
/// Capacities are written into the header every frame alongside the counts.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 20;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_INSTANCES: usize = 3;
pub const HEADER_INSTANCE_COUNT: usize = 4;
pub const HEADER_TRANSPARENT_SPLIT: usize = 5;
pub const HEADER_MAX_LIGHTS: usize = 6;
pub const HEADER_LIGHT_COUNT: usize = 7;
pub const HEADER_MAX_POINTS: usize = 8;
pub const HEADER_POINT_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_AMBIENT_R: usize = 12;
pub const HEADER_AMBIENT_G: usize = 13;
pub const HEADER_AMBIENT_B: usize = 14;
pub const HEADER_POINT_R: usize = 15;
pub const HEADER_POINT_G: usize = 16;
pub const HEADER_POINT_B: usize = 17;
pub const HEADER_POINT_SIZE: usize = 18;
/// Changes whenever the overlay JSON should be re-read.
pub const HEADER_OVERLAY_REVISION: usize = 19;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = 16;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per backdrop point: x, y, z.
pub const POINT_FLOATS: usize = 3;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Floats in the camera block: view-projection matrix, position, target.
pub const CAMERA_FLOATS: usize = 24;

/// Per-frame values written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameCounts {
    pub frame: u32,
    pub instances: usize,
    pub transparent_split: usize,
    pub lights: usize,
    pub points: usize,
    pub events: usize,
    pub ambient: [f32; 3],
    pub point_color: [f32; 3],
    pub point_size: f32,
    pub overlay_revision: u32,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_points: usize,
    pub max_events: usize,

    /// Section sizes in floats.
    pub instance_data_floats: usize,
    pub light_data_floats: usize,
    pub point_data_floats: usize,
    pub event_data_floats: usize,

    /// Section offsets in floats.
    pub instance_data_offset: usize,
    pub light_data_offset: usize,
    pub point_data_offset: usize,
    pub event_data_offset: usize,
    pub camera_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_lights: usize, max_points: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let point_data_floats = max_points * POINT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let light_data_offset = instance_data_offset + instance_data_floats;
        let point_data_offset = light_data_offset + light_data_floats;
        let event_data_offset = point_data_offset + point_data_floats;
        let camera_data_offset = event_data_offset + event_data_floats;
        let buffer_total_floats = camera_data_offset + CAMERA_FLOATS;

        Self {
            max_instances,
            max_lights,
            max_points,
            max_events,
            instance_data_floats,
            light_data_floats,
            point_data_floats,
            event_data_floats,
            instance_data_offset,
            light_data_offset,
            point_data_offset,
            event_data_offset,
            camera_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_lights,
            config.max_points,
            config.max_events,
        )
    }

    /// Fill in the header for one frame. Counts above capacity are clamped:
    /// the host never reads past a section.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], counts: &FrameCounts) {
        let instances = counts.instances.min(self.max_instances);
        header[HEADER_LOCK] = 0.0;
        header[HEADER_FRAME_COUNTER] = counts.frame as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances as f32;
        header[HEADER_TRANSPARENT_SPLIT] = counts.transparent_split.min(instances) as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = counts.lights.min(self.max_lights) as f32;
        header[HEADER_MAX_POINTS] = self.max_points as f32;
        header[HEADER_POINT_COUNT] = counts.points.min(self.max_points) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = counts.events.min(self.max_events) as f32;
        header[HEADER_AMBIENT_R..=HEADER_AMBIENT_B].copy_from_slice(&counts.ambient);
        header[HEADER_POINT_R..=HEADER_POINT_B].copy_from_slice(&counts.point_color);
        header[HEADER_POINT_SIZE] = counts.point_size;
        header[HEADER_OVERLAY_REVISION] = counts.overlay_revision as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_instances, 256);
        assert_eq!(layout.max_lights, 8);
        assert_eq!(layout.max_points, 4096);
        assert_eq!(layout.max_events, 32);

        assert_eq!(layout.instance_data_floats, 256 * 16);
        assert_eq!(layout.light_data_floats, 8 * 8);
        assert_eq!(layout.point_data_floats, 4096 * 3);
        assert_eq!(layout.event_data_floats, 32 * 4);

        let expected_total = HEADER_FLOATS + 256 * 16 + 8 * 8 + 4096 * 3 + 32 * 4 + CAMERA_FLOATS;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 4, 10, 20);

        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.light_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.point_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.event_data_offset, layout.point_data_offset + layout.point_data_floats);
        assert_eq!(layout.camera_data_offset, layout.event_data_offset + layout.event_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.camera_data_offset + CAMERA_FLOATS);
    }

    #[test]
    fn header_carries_counts_and_capacities() {
        let layout = ProtocolLayout::new(16, 2, 100, 8);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(
            &mut header,
            &FrameCounts {
                frame: 7,
                instances: 10,
                transparent_split: 9,
                lights: 1,
                points: 100,
                events: 3,
                ambient: [0.1, 0.2, 0.3],
                point_color: [1.0, 1.0, 1.0],
                point_size: 1.0,
                overlay_revision: 4,
            },
        );
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_INSTANCES], 16.0);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 10.0);
        assert_eq!(header[HEADER_TRANSPARENT_SPLIT], 9.0);
        assert_eq!(header[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 3.0);
        assert_eq!(header[HEADER_AMBIENT_G], 0.2);
        assert_eq!(header[HEADER_POINT_SIZE], 1.0);
        assert_eq!(header[HEADER_OVERLAY_REVISION], 4.0);
    }

    #[test]
    fn header_counts_are_clamped_to_capacity() {
        let layout = ProtocolLayout::new(4, 1, 10, 2);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(
            &mut header,
            &FrameCounts {
                instances: 9,
                transparent_split: 6,
                lights: 3,
                points: 50,
                events: 5,
                ..Default::default()
            },
        );
        assert_eq!(header[HEADER_INSTANCE_COUNT], 4.0);
        assert_eq!(header[HEADER_TRANSPARENT_SPLIT], 4.0);
        assert_eq!(header[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(header[HEADER_POINT_COUNT], 10.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 2.0);
    }
}
