//! Screen-space text overlay (tooltip) described as JSON for the host.

use serde::Serialize;

/// What the host should show on top of the canvas. The host owns the DOM
/// element; the engine only says where and what.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub visible: bool,
    /// Left edge in CSS pixels.
    pub x: f32,
    /// Top edge in CSS pixels.
    pub y: f32,
    pub title: String,
    pub lines: Vec<String>,
    /// Bumped on every change so the host can skip redundant DOM writes.
    pub revision: u32,
}

impl Overlay {
    pub fn show(&mut self, x: f32, y: f32, title: impl Into<String>, lines: Vec<String>) {
        self.visible = true;
        self.x = x;
        self.y = y;
        self.title = title.into();
        self.lines = lines;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Hide, keeping the last content. Repeated hides do not bump the revision.
    pub fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.revision = self.revision.wrapping_add(1);
        }
    }

    pub fn to_json(&self) -> String {
        // Plain strings, numbers and bools: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
