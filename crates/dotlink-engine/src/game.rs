use std::collections::HashMap;

use glam::Vec2;

use crate::api::game::{BoardConfig, EngineContext, Game, GameConfig};
use crate::api::types::{DotId, EntityId, GameEvent};
use crate::board::chain::{ChainBuilder, Segment};
use crate::board::grid::{DotColor, DotRegistry};
use crate::board::layout::BoardLayout;
use crate::board::resolver::{resolve, Resolution};
use crate::board::rng::Rng;
use crate::components::entity::Entity;
use crate::error::{GameError, Result};
use crate::extensions::easing::Easing;
use crate::extensions::tween::Tween;
use crate::input::queue::{InputEvent, InputQueue, UiAction};
use crate::level::config::LevelTable;
use crate::level::controller::{LevelController, Outcome, Phase, TimerEvent};
use crate::present::{Modal, Presenter};
use crate::session::{LevelStore, Progress, Session};

/// The dot-linking game: wires pointer input through the chain builder and
/// resolver, runs the level controller, and mirrors the board into shapes.
pub struct DotLink<P: Presenter, S: LevelStore> {
    board: BoardConfig,
    levels: LevelTable,
    layout: BoardLayout,
    rng: Rng,
    dots: DotRegistry,
    builder: ChainBuilder,
    controller: LevelController,
    session: Session,
    presenter: P,
    store: S,
    fixed_dt: f32,
    dot_shapes: HashMap<DotId, EntityId>,
    line_shapes: HashMap<Segment, EntityId>,
    free_line: Option<EntityId>,
    hovered: Option<DotId>,
}

impl<P: Presenter, S: LevelStore> DotLink<P, S> {
    /// Build a game from validated configuration. The session resumes from
    /// whatever level `store` holds.
    pub fn new(
        board: BoardConfig,
        levels: LevelTable,
        presenter: P,
        store: S,
        seed: u64,
    ) -> Result<Self> {
        board.validate()?;
        Ok(Self::build(board, levels, presenter, store, seed))
    }

    /// Six-by-six board and the three stock levels.
    pub fn with_defaults(presenter: P, store: S, seed: u64) -> Self {
        Self::build(BoardConfig::default(), LevelTable::default(), presenter, store, seed)
    }

    fn build(board: BoardConfig, levels: LevelTable, presenter: P, store: S, seed: u64) -> Self {
        let layout = BoardLayout::new(board.grid_size, board.dot_radius, board.hit_slop);
        let controller = LevelController::new(board.low_time_threshold);
        let session = Session::load(&store);
        Self {
            board,
            levels,
            layout,
            rng: Rng::new(seed),
            dots: DotRegistry::empty(),
            builder: ChainBuilder::new(),
            controller,
            session,
            presenter,
            store,
            fixed_dt: GameConfig::default().fixed_dt,
            dot_shapes: HashMap::new(),
            line_shapes: HashMap::new(),
            free_line: None,
            hovered: None,
        }
    }

    pub fn with_fixed_dt(mut self, fixed_dt: f32) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    // -- Orchestration entry points --

    /// Start `level` from a fresh board. On failure the attempt is left
    /// ended, so no gameplay input is accepted until a level starts.
    pub fn initialize_level(&mut self, ctx: &mut EngineContext, level: u32) -> Result<()> {
        self.try_initialize_level(ctx, level).map_err(|err| {
            self.controller.stop();
            self.session.attempt.ended = true;
            err
        })
    }

    fn try_initialize_level(&mut self, ctx: &mut EngineContext, level: u32) -> Result<()> {
        if self.session.is_complete() {
            return Err(GameError::SessionComplete);
        }
        let config = *self.levels.get(level)?;
        self.presenter.bind()?;

        self.controller.stop();
        self.presenter.hide_modal();
        self.clear_board(ctx);

        self.session.progress = Progress::Playing(level);
        self.dots = DotRegistry::create_grid(
            self.board.rows,
            self.board.cols,
            &self.board.palette,
            &mut self.rng,
        );
        let ids: Vec<DotId> = self.dots.iter().map(|d| d.id).collect();
        for id in ids {
            self.spawn_dot(ctx, id, false);
        }

        self.controller.start(config, &mut self.session.attempt);
        self.presenter.show_level(&config);
        self.presenter.show_remaining_time(config.initial_time);
        self.presenter.show_dots_remaining(config.target);
        self.presenter.set_low_time(false);
        ctx.emit_event(GameEvent::new(
            GameEvent::LEVEL_STARTED,
            level as f32,
            config.target as f32,
            config.initial_time as f32,
        ));
        Ok(())
    }

    /// Replay the current level.
    pub fn retry_level(&mut self, ctx: &mut EngineContext) -> Result<()> {
        self.session.reset_for_retry();
        let level = self
            .session
            .current_level()
            .ok_or(GameError::SessionComplete)?;
        self.initialize_level(ctx, level)
    }

    /// Move on after a win. Past the last level the session completes and
    /// the final dialog is shown instead.
    pub fn advance_to_next_level(&mut self, ctx: &mut EngineContext) -> Result<()> {
        match self
            .session
            .advance_level(self.levels.level_count(), &mut self.store)
        {
            Progress::Playing(level) => self.initialize_level(ctx, level),
            Progress::Complete => {
                self.controller.stop();
                self.session.attempt.ended = true;
                log::info!("all {} levels complete", self.levels.level_count());
                self.presenter.show_modal(&Modal::all_complete());
                Ok(())
            }
        }
    }

    /// Forget progress and start again at level 1.
    pub fn restart_from_beginning(&mut self, ctx: &mut EngineContext) -> Result<()> {
        self.session.restart_from_beginning(&mut self.store);
        self.initialize_level(ctx, 1)
    }

    /// Swap in a level table from JSON and restart the current level under it.
    pub fn load_levels(&mut self, ctx: &mut EngineContext, json: &str) -> Result<()> {
        self.levels = LevelTable::from_json(json)?;
        log::info!("loaded {} levels", self.levels.level_count());
        self.resume(ctx)
    }

    /// Start whatever level the session points at, falling back to level 1
    /// when the stored level is past the end of the table.
    fn resume(&mut self, ctx: &mut EngineContext) -> Result<()> {
        match self.session.current_level() {
            Some(level) if level > self.levels.level_count() => {
                log::warn!("stored level {} is not configured, restarting", level);
                self.restart_from_beginning(ctx)
            }
            Some(level) => self.initialize_level(ctx, level),
            None => Err(GameError::SessionComplete),
        }
    }

    // -- Input --

    fn accepts_input(&self) -> bool {
        self.controller.phase() == Phase::Running && !self.session.attempt.ended
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        match event {
            InputEvent::Action(action) => self.handle_action(ctx, action),
            _ if !self.accepts_input() => {}
            InputEvent::PointerDown { x, y } => self.pointer_down(ctx, Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(ctx, Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(ctx),
            InputEvent::PointerCancel => self.pointer_cancel(ctx),
        }
    }

    fn handle_action(&mut self, ctx: &mut EngineContext, action: UiAction) {
        let applicable = match action {
            UiAction::NextLevel => {
                self.controller.phase() == Phase::Won && !self.session.is_complete()
            }
            UiAction::Retry => self.controller.phase() == Phase::Lost,
            UiAction::PlayAgain => self.session.is_complete(),
        };
        if !applicable {
            log::debug!("ignoring {:?} in phase {:?}", action, self.controller.phase());
            return;
        }
        let result = match action {
            UiAction::NextLevel => self.advance_to_next_level(ctx),
            UiAction::Retry => self.retry_level(ctx),
            UiAction::PlayAgain => self.restart_from_beginning(ctx),
        };
        if let Err(err) = result {
            log::error!("{:?} failed: {}", action, err);
        }
    }

    fn pointer_down(&mut self, ctx: &mut EngineContext, point: Vec2) {
        let Some(id) = self.layout.dot_at(&self.dots, point) else {
            return;
        };
        match self.builder.begin_chain(&mut self.dots, id) {
            Ok(began) => {
                if began.pending > 0 {
                    log::debug!("press on {:?} resumes a chain of {}", id, began.pending);
                }
                self.spawn_free_line(ctx, id, began.color);
                self.set_hover(ctx, Some(id));
            }
            Err(rejected) => log::debug!("press on {:?} rejected: {:?}", id, rejected),
        }
    }

    fn pointer_move(&mut self, ctx: &mut EngineContext, point: Vec2) {
        let hit = self.layout.dot_at(&self.dots, point);
        if hit != self.hovered {
            self.set_hover(ctx, hit);
            if let Some(target) = hit.filter(|_| self.builder.is_dragging()) {
                self.extend_to(ctx, target);
                if !self.accepts_input() {
                    return;
                }
            }
        }
        if self.builder.is_dragging() {
            self.builder.drag_to(point);
            if let Some(line) = self.free_line.and_then(|id| ctx.scene.get_mut(id)) {
                line.set_line_end(point);
            }
        }
    }

    fn pointer_up(&mut self, ctx: &mut EngineContext) {
        let Some(gesture) = self.builder.end_chain(&mut self.dots) else {
            return;
        };
        self.drop_free_line(ctx);
        let resolution = resolve(gesture, &mut self.dots);
        self.apply_resolution(ctx, resolution);
    }

    fn pointer_cancel(&mut self, ctx: &mut EngineContext) {
        if self.builder.abort(&mut self.dots) {
            self.drop_free_line(ctx);
        }
        self.set_hover(ctx, None);
    }

    fn extend_to(&mut self, ctx: &mut EngineContext, target: DotId) {
        let ext = match self.builder.try_extend(&mut self.dots, target) {
            Ok(ext) => ext,
            Err(rejection) => {
                log::debug!("extension to {:?} rejected: {:?}", target, rejection);
                return;
            }
        };

        // The free line becomes the committed segment.
        let end = self.dots.get(target).map(|d| self.layout.center(d.pos));
        if let (Some(line), Some(end)) = (self.free_line.take(), end) {
            if let Some(entity) = ctx.scene.get_mut(line) {
                entity.set_line_end(end);
            }
            self.line_shapes.insert(ext.segment, line);
        }
        self.spawn_free_line(ctx, target, ext.color);

        if ext.color == self.board.win_color {
            self.count_win_connection(ctx);
        }
    }

    fn count_win_connection(&mut self, ctx: &mut EngineContext) {
        let outcome = self
            .controller
            .record_win_connection(&mut self.session.attempt);
        let attempt = &self.session.attempt;
        self.presenter
            .show_dots_remaining(self.controller.dots_remaining(attempt));
        ctx.emit_event(GameEvent::new(
            GameEvent::WIN_CONNECTION,
            attempt.win_connections as f32,
            self.controller.config().map_or(0.0, |c| c.target as f32),
            0.0,
        ));
        if let Some(outcome) = outcome {
            self.end_attempt(ctx, outcome);
        }
    }

    // -- Timer and outcome --

    fn advance_timer(&mut self, ctx: &mut EngineContext) {
        let events = self
            .controller
            .advance(self.fixed_dt, &mut self.session.attempt);
        for event in events {
            match event {
                TimerEvent::Tick(remaining) => self.presenter.show_remaining_time(remaining),
                TimerEvent::LowTime(remaining) => {
                    self.presenter.set_low_time(true);
                    ctx.emit_event(GameEvent::new(
                        GameEvent::LOW_TIME,
                        remaining as f32,
                        0.0,
                        0.0,
                    ));
                }
                TimerEvent::Expired(outcome) => self.end_attempt(ctx, outcome),
            }
        }
    }

    fn end_attempt(&mut self, ctx: &mut EngineContext, outcome: Outcome) {
        self.presenter.set_low_time(false);
        let event = match outcome.score {
            Some(score) if outcome.won => GameEvent::new(
                GameEvent::LEVEL_WON,
                outcome.level as f32,
                score.points() as f32,
                outcome.elapsed as f32,
            ),
            _ => {
                self.presenter.show_remaining_time(0);
                GameEvent::new(GameEvent::LEVEL_LOST, outcome.level as f32, 0.0, 0.0)
            }
        };
        ctx.emit_event(event);
        self.set_hover(ctx, None);
        self.presenter.show_modal(&Modal::for_outcome(&outcome));
    }

    // -- Shapes --

    fn clear_board(&mut self, ctx: &mut EngineContext) {
        ctx.clear_scene();
        self.builder.reset();
        self.dot_shapes.clear();
        self.line_shapes.clear();
        self.free_line = None;
        self.hovered = None;
    }

    fn spawn_dot(&mut self, ctx: &mut EngineContext, id: DotId, drop_in: bool) {
        let Some((pos, color)) = self.dots.get(id).map(|d| (d.pos, d.color)) else {
            return;
        };
        let center = self.layout.center(pos);
        let entity_id = ctx.next_id();
        let mut entity = Entity::circle(entity_id, center, self.board.dot_radius, color.rgb());
        if drop_in {
            let start = center.y - self.board.drop_height;
            entity = entity.with_pos(Vec2::new(center.x, start)).with_alpha(0.0);
            let secs = self.board.drop_in_secs;
            ctx.tweens
                .add(entity_id, Tween::position_y(start, center.y, secs, Easing::ElasticOut));
            ctx.tweens.add(entity_id, Tween::fade_in(secs, Easing::Linear));
        }
        ctx.scene.spawn(entity);
        self.dot_shapes.insert(id, entity_id);
    }

    fn spawn_free_line(&mut self, ctx: &mut EngineContext, anchor: DotId, color: DotColor) {
        let Some(start) = self.dots.get(anchor).map(|d| self.layout.center(d.pos)) else {
            return;
        };
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::line(
            id,
            start,
            start,
            self.board.line_width,
            color.rgb(),
        ));
        self.free_line = Some(id);
    }

    fn drop_free_line(&mut self, ctx: &mut EngineContext) {
        if let Some(line) = self.free_line.take() {
            ctx.scene.despawn(line);
        }
    }

    fn remove_line(&mut self, ctx: &mut EngineContext, segment: Segment) {
        if let Some(line) = self.line_shapes.remove(&segment) {
            self.fade_out(ctx, line);
        }
    }

    /// Fade a shape to transparent, then despawn it.
    fn fade_out(&self, ctx: &mut EngineContext, entity: EntityId) {
        let from = ctx.scene.get(entity).map_or(1.0, |e| e.alpha);
        ctx.tweens.remove_entity(entity);
        ctx.tweens.add(
            entity,
            Tween::alpha(from, 0.0, self.board.fade_out_secs, Easing::SineIn).despawn_on_complete(),
        );
    }

    fn apply_resolution(&mut self, ctx: &mut EngineContext, resolution: Resolution) {
        if resolution.is_empty() {
            return;
        }
        for segment in &resolution.cleared_segments {
            self.remove_line(ctx, *segment);
        }
        for vacancy in &resolution.vacancies {
            if self.hovered == Some(vacancy.id) {
                self.hovered = None;
            }
            if let Some(old) = self.dot_shapes.remove(&vacancy.id) {
                self.fade_out(ctx, old);
            }
            let replaced = self
                .dots
                .replace_dot(vacancy.id, vacancy.pos, &self.board.palette, &mut self.rng)
                .map(|_| ());
            match replaced {
                Ok(()) => self.spawn_dot(ctx, vacancy.id, true),
                Err(err) => log::warn!("no replacement for {:?}: {}", vacancy.id, err),
            }
        }
        ctx.emit_event(GameEvent::new(
            GameEvent::CHAIN_CLEARED,
            resolution.vacancies.len() as f32,
            0.0,
            0.0,
        ));
    }

    fn set_hover(&mut self, ctx: &mut EngineContext, dot: Option<DotId>) {
        if self.hovered == dot {
            return;
        }
        for (id, on) in [(self.hovered, false), (dot, true)] {
            let entity = id.and_then(|id| self.dot_shapes.get(&id));
            if let Some(entity) = entity.and_then(|e| ctx.scene.get_mut(*e)) {
                entity.set_outline(on);
            }
        }
        self.hovered = dot;
    }

    // -- Accessors --

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dots(&self) -> &DotRegistry {
        &self.dots
    }

    pub fn builder(&self) -> &ChainBuilder {
        &self.builder
    }

    pub fn controller(&self) -> &LevelController {
        &self.controller
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shape currently drawn for a dot cell.
    pub fn dot_entity(&self, id: DotId) -> Option<EntityId> {
        self.dot_shapes.get(&id).copied()
    }

    /// Shape drawn for a committed segment.
    pub fn line_entity(&self, segment: Segment) -> Option<EntityId> {
        self.line_shapes.get(&segment).copied()
    }

    pub fn free_line(&self) -> Option<EntityId> {
        self.free_line
    }
}

impl<P: Presenter, S: LevelStore> Game for DotLink<P, S> {
    fn config(&self) -> GameConfig {
        let (world_width, world_height) = self.board.world_size();
        let cells = (self.board.rows * self.board.cols) as usize;
        let defaults = GameConfig::default();
        GameConfig {
            fixed_dt: self.fixed_dt,
            world_width,
            world_height,
            // Live dots, fading dots, committed lines and the free line.
            max_shapes: (3 * cells + 1).max(defaults.max_shapes),
            ..defaults
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = self.resume(ctx) {
            log::error!("level start failed: {}", err);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle_input(ctx, *event);
        }
        self.advance_timer(ctx);
        ctx.tweens.tick(self.fixed_dt, &mut ctx.scene);
    }
}
