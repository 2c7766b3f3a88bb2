//! End-to-end level scenarios driven through `Game::update`, the same way the
//! web runner drives the game.

use dotlink_engine::{
    build_shape_buffer, BoardConfig, DotColor, DotId, DotLink, EngineContext, Game, GameError,
    GameEvent, GridPos, HeadlessPresenter, InputEvent, InputQueue, LevelConfig, LevelStore,
    LevelTable, MemoryStore, Palette, Phase, ShapeBuffer, UiAction,
};

type TestGame = DotLink<HeadlessPresenter, MemoryStore>;

struct Harness {
    game: TestGame,
    ctx: EngineContext,
}

impl Harness {
    /// All-blue board so every drag counts toward the target. Each step is
    /// half a second.
    fn new(levels: LevelTable, store: MemoryStore) -> Self {
        let board = BoardConfig {
            palette: Palette::new(vec![DotColor::Blue]).unwrap(),
            ..BoardConfig::default()
        };
        let mut game = DotLink::new(board, levels, HeadlessPresenter::new(), store, 42)
            .unwrap()
            .with_fixed_dt(0.5);
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        Self { game, ctx }
    }

    fn with_levels(levels: &[(u32, u32)]) -> Self {
        let table = levels
            .iter()
            .enumerate()
            .map(|(i, &(target, time))| LevelConfig::new(i as u32 + 1, target, time))
            .collect();
        Self::new(LevelTable::new(table).unwrap(), MemoryStore::new())
    }

    fn step(&mut self, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        self.game.update(&mut self.ctx, &input);
    }

    fn seconds(&mut self, n: u32) {
        for _ in 0..n * 2 {
            self.step(&[]);
        }
    }

    fn point(&self, (col, row): (u32, u32)) -> (f32, f32) {
        let p = self.game.layout().center(GridPos::new(col, row));
        (p.x, p.y)
    }

    /// Press on the first cell and move through the rest, without releasing.
    fn drag(&mut self, cells: &[(u32, u32)]) {
        let (x, y) = self.point(cells[0]);
        let mut events = vec![InputEvent::PointerDown { x, y }];
        for &cell in &cells[1..] {
            let (x, y) = self.point(cell);
            events.push(InputEvent::PointerMove { x, y });
        }
        self.step(&events);
    }

    fn hover(&mut self, cell: (u32, u32)) {
        let (x, y) = self.point(cell);
        self.step(&[InputEvent::PointerMove { x, y }]);
    }

    fn cancel(&mut self) {
        self.step(&[InputEvent::PointerCancel]);
    }

    fn connections(&self) -> u32 {
        self.game.session().attempt.win_connections
    }

    fn release(&mut self, cell: (u32, u32)) {
        let (x, y) = self.point(cell);
        self.step(&[InputEvent::PointerUp { x, y }]);
    }

    fn action(&mut self, action: UiAction) {
        self.step(&[InputEvent::Action(action)]);
    }

    fn presenter(&self) -> &HeadlessPresenter {
        self.game.presenter()
    }

    fn saw_event(&self, kind: f32) -> bool {
        self.ctx.events.iter().any(|e| e.kind == kind)
    }
}

#[test]
fn three_connections_then_timeout_loses() {
    let mut h = Harness::new(LevelTable::default(), MemoryStore::new());
    assert_eq!(h.game.dots().len(), 36);
    assert_eq!(h.presenter().dots_remaining, Some(10));

    h.drag(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(h.game.session().attempt.win_connections, 3);
    assert_eq!(h.presenter().dots_remaining, Some(7));
    h.release((3, 0));
    assert_eq!(h.game.dots().len(), 36);

    // One second already spent by the two input steps.
    h.seconds(54);
    assert_eq!(h.presenter().remaining_time, Some(5));
    assert!(h.presenter().low_time);
    assert!(h.saw_event(GameEvent::LOW_TIME));

    h.seconds(5);
    assert_eq!(h.game.controller().phase(), Phase::Lost);
    assert!(h.game.session().attempt.ended);
    assert_eq!(h.presenter().remaining_time, Some(0));
    assert!(!h.presenter().low_time);
    assert!(h.saw_event(GameEvent::LEVEL_LOST));
    let modal = h.presenter().modal.clone().unwrap();
    assert_eq!(modal.title, "Level Failed");
    assert_eq!(modal.button.action, UiAction::Retry);

    // The board is frozen.
    h.drag(&[(0, 5), (1, 5)]);
    assert!(!h.game.builder().is_dragging());
    assert_eq!(h.game.session().attempt.win_connections, 3);
    h.seconds(3);
    assert_eq!(h.presenter().remaining_time, Some(0));
}

#[test]
fn one_short_of_target_keeps_playing() {
    let mut h = Harness::with_levels(&[(3, 60), (5, 60)]);
    h.drag(&[(0, 0), (0, 1), (0, 2)]);
    assert_eq!(h.game.controller().phase(), Phase::Running);
    assert_eq!(h.presenter().dots_remaining, Some(1));
    assert!(h.presenter().modal.is_none());
}

#[test]
fn reaching_target_wins_and_freezes_input() {
    let mut h = Harness::with_levels(&[(3, 60), (5, 60)]);
    h.drag(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);

    assert_eq!(h.game.controller().phase(), Phase::Won);
    assert_eq!(h.game.session().attempt.win_connections, 3);
    assert_eq!(h.presenter().dots_remaining, Some(0));
    let modal = h.presenter().modal.clone().unwrap();
    assert_eq!(modal.title, "Level Completed!");
    assert_eq!(
        modal.message,
        "Congratulations! You won with a perfect score of 100!"
    );
    assert_eq!(modal.button.label, "Next Level");
    let won = h
        .ctx
        .events
        .iter()
        .find(|e| e.kind == GameEvent::LEVEL_WON)
        .copied()
        .unwrap();
    assert_eq!((won.a, won.b), (1.0, 100.0));

    // Countdown stopped with the win.
    let before = h.presenter().remaining_time;
    h.seconds(5);
    assert_eq!(h.presenter().remaining_time, before);
    assert!(!h.game.controller().countdown_armed());
}

#[test]
fn rejected_hovers_leave_the_count_alone() {
    let mut h = Harness::with_levels(&[(10, 60)]);
    h.drag(&[(0, 0)]);
    // Each hover and the connection count expected after it.
    let hovers = [
        ((1, 0), 1),
        ((0, 0), 1), // back onto the head
        ((1, 0), 1), // the tail itself
        ((2, 1), 1), // diagonal
        ((3, 0), 1), // skips a column
        ((2, 0), 2),
        ((1, 0), 2), // already connected
        ((2, 2), 2), // skips a row
        ((2, 1), 3),
    ];
    for (cell, expected) in hovers {
        h.hover(cell);
        assert_eq!(h.connections(), expected, "after hovering {:?}", cell);
        assert_eq!(h.presenter().dots_remaining, Some(10 - expected));
    }
    assert_eq!(h.game.builder().chain().len(), 4);
    assert_eq!(h.game.builder().segments().len(), 3);
    assert_eq!(h.game.controller().phase(), Phase::Running);
}

#[test]
fn cancelled_chain_is_not_counted_twice() {
    let mut h = Harness::with_levels(&[(10, 60)]);
    let row = [(0, 0), (1, 0), (2, 0), (3, 0)];
    h.drag(&row);
    h.cancel();
    assert_eq!(h.connections(), 3);

    // Tracing the pending dots again is refused.
    for _ in 0..3 {
        h.drag(&row);
        assert!(!h.game.builder().is_dragging());
        h.cancel();
    }
    assert_eq!(h.connections(), 3);
    assert_eq!(h.presenter().dots_remaining, Some(7));
    assert_eq!(h.game.controller().phase(), Phase::Running);

    // A new run counts on from there and cannot step into the pending row.
    h.drag(&[(0, 1), (1, 1), (1, 0)]);
    assert_eq!(h.connections(), 4);

    let old = h.game.dot_entity(DotId(0)).unwrap();
    h.release((1, 1));
    assert!(h
        .ctx
        .events
        .iter()
        .any(|e| e.kind == GameEvent::CHAIN_CLEARED && e.a == 6.0));
    assert_ne!(h.game.dot_entity(DotId(0)), Some(old));
    assert_eq!(h.game.dots().len(), 36);
    assert!(h.game.dots().iter().all(|d| !d.has_incoming && !d.has_outgoing));
    assert_eq!(h.connections(), 4);
}

#[test]
fn next_level_persists_and_starts_fresh() {
    let mut h = Harness::with_levels(&[(1, 60), (2, 30)]);
    h.drag(&[(0, 0), (1, 0)]);
    assert_eq!(h.game.controller().phase(), Phase::Won);

    h.action(UiAction::NextLevel);
    assert_eq!(h.game.session().current_level(), Some(2));
    assert_eq!(h.game.store().get(), Some(2));
    assert_eq!(h.game.controller().phase(), Phase::Running);
    assert!(h.presenter().modal.is_none());
    assert_eq!(h.presenter().level.unwrap().target, 2);
    assert_eq!(h.presenter().dots_remaining, Some(2));
    assert_eq!(h.game.session().attempt.win_connections, 0);
    assert!(!h.game.builder().is_dragging());
}

#[test]
fn finishing_the_last_level_completes_the_session() {
    let mut h = Harness::with_levels(&[(1, 60)]);
    h.drag(&[(0, 0), (1, 0)]);
    h.action(UiAction::NextLevel);

    assert!(h.game.session().is_complete());
    assert_eq!(h.game.store().get(), None);
    let modal = h.presenter().modal.clone().unwrap();
    assert_eq!(modal.title, "Congratulations!");
    assert_eq!(modal.message, "You've completed all levels!");
    assert_eq!(modal.button.action, UiAction::PlayAgain);

    let err = h.game.initialize_level(&mut h.ctx, 1).unwrap_err();
    assert!(matches!(err, GameError::SessionComplete));

    // A second NextLevel does nothing.
    h.action(UiAction::NextLevel);
    assert!(h.game.session().is_complete());

    h.action(UiAction::PlayAgain);
    assert_eq!(h.game.session().current_level(), Some(1));
    assert_eq!(h.game.controller().phase(), Phase::Running);
    assert!(h.presenter().modal.is_none());
}

#[test]
fn retry_replays_the_same_level() {
    let mut h = Harness::with_levels(&[(10, 2), (10, 60)]);
    h.seconds(2);
    assert_eq!(h.game.controller().phase(), Phase::Lost);

    h.action(UiAction::Retry);
    assert_eq!(h.game.session().current_level(), Some(1));
    assert_eq!(h.game.controller().phase(), Phase::Running);
    assert_eq!(h.presenter().remaining_time, Some(2));
    assert_eq!(h.game.store().get(), None);
}

#[test]
fn retry_while_running_is_ignored() {
    let mut h = Harness::with_levels(&[(10, 60)]);
    h.drag(&[(0, 0), (1, 0)]);
    h.action(UiAction::Retry);
    assert_eq!(h.game.session().attempt.win_connections, 1);
}

#[test]
fn resumes_from_the_stored_level() {
    let h = Harness::new(LevelTable::default(), MemoryStore::with_level(2));
    assert_eq!(h.game.session().current_level(), Some(2));
    assert_eq!(h.presenter().level.unwrap().target, 15);
}

#[test]
fn unknown_level_is_reported() {
    let mut h = Harness::with_levels(&[(3, 60)]);
    let err = h.game.initialize_level(&mut h.ctx, 4).unwrap_err();
    assert!(matches!(err, GameError::UnknownLevel(4)));
    assert!(h.game.session().attempt.ended);
}

#[test]
fn missing_display_aborts_level_start() {
    let mut game: TestGame = DotLink::with_defaults(
        HeadlessPresenter::missing("level-modal"),
        MemoryStore::new(),
        9,
    );
    let mut ctx = EngineContext::new();
    let err = game.initialize_level(&mut ctx, 1).unwrap_err();
    assert!(matches!(err, GameError::MissingDisplay("level-modal")));
    assert!(ctx.scene.is_empty());
    assert!(!game.controller().countdown_armed());
}

#[test]
fn loaded_levels_replace_the_table() {
    let mut h = Harness::with_levels(&[(3, 60)]);
    let json = r#"{"levels": [
        {"level": 1, "targetBlueDots": 4, "initialTime": 20},
        {"level": 2, "target": 6, "initial_time": 30}
    ]}"#;
    h.game.load_levels(&mut h.ctx, json).unwrap();
    assert_eq!(h.game.levels().level_count(), 2);
    assert_eq!(h.presenter().remaining_time, Some(20));
    assert_eq!(h.presenter().dots_remaining, Some(4));

    assert!(h.game.load_levels(&mut h.ctx, r#"{"levels": []}"#).is_err());
    assert_eq!(h.game.levels().level_count(), 2);
}

#[test]
fn shape_buffer_tracks_cleared_dots() {
    let mut h = Harness::with_levels(&[(10, 60)]);
    h.drag(&[(0, 0), (1, 0), (2, 0)]);

    let mut shapes = ShapeBuffer::new();
    build_shape_buffer(h.ctx.scene.iter(), &mut shapes);
    assert_eq!(shapes.line_split, 36);
    // Two committed lines plus the free one.
    assert_eq!(shapes.instance_count(), 39);

    h.release((2, 0));
    h.seconds(2);
    build_shape_buffer(h.ctx.scene.iter(), &mut shapes);
    assert_eq!(shapes.instance_count(), 36);
    assert_eq!(shapes.line_split, 36);
}
