use orrery_engine::renderer::instance::RenderInstance;
use orrery_engine::systems::render::build_render_buffer;
use orrery_engine::{
    AssetSource, CameraUniform, DrawTiming, EngineContext, FrameCounts, FrameData, Game,
    GameConfig, InputEvent, InputQueue, ProtocolLayout, RenderBuffer, RenderSurface,
    HEADER_FLOATS,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera: CameraUniform,
    header: [f32; HEADER_FLOATS],
    config: GameConfig,
    layout: ProtocolLayout,
    frame: u32,
    initialized: bool,
    overflow_warned: bool,
    /// Size from the last resize, not yet forwarded to a surface.
    pending_surface_size: Option<(u32, u32)>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::from_config(&config);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            camera,
            header: [0.0; HEADER_FLOATS],
            layout,
            config,
            frame: 0,
            initialized: false,
            overflow_warned: false,
            pending_surface_size: None,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Viewport changed (CSS pixels).
    /// The camera aspect follows immediately; a native surface is resized on
    /// the next `present`.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.resize(width, height);
        if width >= 1.0 && height >= 1.0 {
            self.pending_surface_size = Some((width as u32, height as u32));
        }
    }

    /// Run one frame tick: update game, apply orbit controls, build buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.frame_dt = dt;

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.ctx.controls.update(&mut self.ctx.camera);
        self.publish();
    }

    /// Rebuild render buffer, camera block and header from the current state.
    fn publish(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        if self.render_buffer.instances.len() > self.layout.max_instances && !self.overflow_warned {
            log::warn!(
                "{} instances exceed capacity {}; extra instances are not drawn",
                self.render_buffer.instances.len(),
                self.layout.max_instances
            );
            self.overflow_warned = true;
        }
        self.camera = self.ctx.camera.uniform();
        self.frame = self.frame.wrapping_add(1);

        let counts = FrameCounts {
            frame: self.frame,
            instances: self.render_buffer.instances.len(),
            transparent_split: self.render_buffer.transparent_split as usize,
            lights: self.ctx.lights.count(),
            points: self.ctx.backdrop.len(),
            events: self.ctx.events.len(),
            ambient: self.ctx.lights.ambient(),
            point_color: self.ctx.backdrop.color.to_array(),
            point_size: self.ctx.backdrop.size,
            overlay_revision: self.ctx.overlay.revision,
        };
        self.layout.write_header(&mut self.header, &counts);
    }

    /// Hand the current frame to a native surface.
    pub fn present(&mut self, surface: &mut impl RenderSurface) -> DrawTiming {
        if let Some((width, height)) = self.pending_surface_size.take() {
            surface.resize(width, height);
        }
        let instance_count = self.render_buffer.instances.len().min(self.layout.max_instances);
        let frame = FrameData {
            instances: &self.render_buffer.instances[..instance_count],
            transparent_split: (self.render_buffer.transparent_split as usize).min(instance_count) as u32,
            lights: self.ctx.lights.as_slice(),
            ambient: self.ctx.lights.ambient(),
            points: self.ctx.backdrop.points(),
            point_color: self.ctx.backdrop.color.to_array(),
            point_size: self.ctx.backdrop.size,
            camera: self.camera,
        };
        surface.draw(&frame)
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.render_buffer.instances
    }

    // ---- Asset loading (host-driven) ----

    /// Next path the host should fetch, if any.
    pub fn next_asset_request(&mut self) -> Option<String> {
        self.ctx.assets.next_request()
    }

    pub fn asset_progress(&self, path: &str, loaded: f64, total: f64) {
        self.ctx.assets.progress(path, loaded, total);
    }

    /// Host fetched `path`. Returns false if the path was never requested.
    pub fn asset_loaded(&mut self, path: &str, body: &str) -> bool {
        self.ctx.assets.complete(path, Ok(body)).is_ok()
    }

    /// Host failed to fetch `path`. Returns false if the path was never requested.
    pub fn asset_failed(&mut self, path: &str, reason: &str) -> bool {
        self.ctx.assets.complete(path, Err(reason)).is_ok()
    }

    /// Serve all outstanding requests synchronously (native hosts).
    pub fn serve_assets(&mut self, source: &mut impl AssetSource) -> usize {
        self.ctx.assets.serve(source)
    }

    pub fn asset_path(&self, handle: u32) -> Option<String> {
        self.ctx
            .assets
            .models()
            .path(orrery_engine::AssetHandle(handle))
            .map(str::to_owned)
    }

    pub fn overlay_json(&self) -> String {
        self.ctx.overlay.to_json()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count().min(self.layout.max_instances as u32)
    }

    pub fn transparent_split(&self) -> u32 {
        self.render_buffer.transparent_split.min(self.instance_count())
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.ctx.backdrop.points().as_ptr() as *const f32
    }

    pub fn point_count(&self) -> u32 {
        self.ctx.backdrop.len().min(self.layout.max_points) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.config.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.config.viewport_height
    }
}
