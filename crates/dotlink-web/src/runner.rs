use dotlink_engine::systems::render::build_shape_buffer;
use dotlink_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    ShapeBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// The crate root keeps one `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    shapes: ShapeBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    /// Packed header + shapes + events, read by TypeScript.
    frame_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let shapes = ShapeBuffer::with_capacity(config.max_shapes);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            shapes,
            timestep,
            frame_buffer: vec![0.0; layout.buffer_total_floats],
            layout,
            config,
            initialized: false,
            frame: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: step the game, build the shape buffer, pack the frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Queued input belongs to the first step only.
            self.input.drain();
        }

        build_shape_buffer(self.ctx.scene.iter(), &mut self.shapes);

        self.frame = self.frame.wrapping_add(1);
        self.layout.pack_frame(
            self.frame,
            self.config.world_width.max(self.config.world_height),
            &self.shapes,
            &self.ctx.events,
            &mut self.frame_buffer,
        );
    }

    /// Run `f` against the game outside the tick loop, e.g. to load levels.
    pub fn with_game<R>(&mut self, f: impl FnOnce(&mut G, &mut EngineContext) -> R) -> R {
        f(&mut self.game, &mut self.ctx)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn shapes_ptr(&self) -> *const f32 {
        self.shapes.instances_ptr()
    }

    pub fn shape_count(&self) -> u32 {
        self.shapes.instance_count()
    }

    pub fn line_split(&self) -> u32 {
        self.shapes.line_split
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_shapes(&self) -> u32 {
        self.layout.max_shapes as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
