/// Frame buffer layout shared with the TypeScript renderer.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values f32):
/// ```text
/// [Header: 8 floats]
/// [Shapes: max_shapes × 12 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame, so TypeScript can
/// compute offsets without a separate handshake.
use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::{ShapeBuffer, ShapeInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SHAPES: usize = 2;
pub const HEADER_SHAPE_COUNT: usize = 3;
pub const HEADER_LINE_SPLIT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_WORLD_SIZE: usize = 7;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Section sizes and offsets computed from configured capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_shapes: usize,
    pub max_events: usize,

    pub shape_data_floats: usize,
    pub event_data_floats: usize,

    pub shape_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_shapes: usize, max_events: usize) -> Self {
        let shape_data_floats = max_shapes * ShapeInstance::FLOATS;
        let event_data_floats = max_events * GameEvent::FLOATS;
        let shape_data_offset = HEADER_FLOATS;
        let event_data_offset = shape_data_offset + shape_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_shapes,
            max_events,
            shape_data_floats,
            event_data_floats,
            shape_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_shapes, config.max_events)
    }

    /// Write one frame into `out`, resized to the full layout. Shapes and
    /// events beyond capacity are dropped with a warning.
    pub fn pack_frame(
        &self,
        frame: u32,
        world_size: f32,
        shapes: &ShapeBuffer,
        events: &[GameEvent],
        out: &mut Vec<f32>,
    ) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let shape_count = shapes.instances.len().min(self.max_shapes);
        let event_count = events.len().min(self.max_events);
        if shape_count < shapes.instances.len() || event_count < events.len() {
            log::warn!(
                "frame {} truncated: {}/{} shapes, {}/{} events",
                frame,
                shape_count,
                shapes.instances.len(),
                event_count,
                events.len()
            );
        }

        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = frame as f32;
        out[HEADER_MAX_SHAPES] = self.max_shapes as f32;
        out[HEADER_SHAPE_COUNT] = shape_count as f32;
        out[HEADER_LINE_SPLIT] = (shapes.line_split as usize).min(shape_count) as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = event_count as f32;
        out[HEADER_WORLD_SIZE] = world_size;

        let shape_floats: &[f32] = bytemuck::cast_slice(&shapes.instances[..shape_count]);
        out[self.shape_data_offset..self.shape_data_offset + shape_floats.len()]
            .copy_from_slice(shape_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);
    }
}
