//! Property tests: whatever the pointer does, committed chains stay legal.

use std::collections::HashSet;

use dotlink_engine::{resolve, ChainBuilder, DotColor, DotId, DotRegistry, Palette, Rng};
use proptest::prelude::*;

const ROWS: u32 = 4;
const COLS: u32 = 4;

#[derive(Debug, Clone)]
enum Gesture {
    Press(u32),
    Hover(u32),
    Release,
    Cancel,
}

fn color_strategy() -> impl Strategy<Value = DotColor> {
    prop_oneof![Just(DotColor::Blue), Just(DotColor::Red)]
}

fn board_strategy() -> impl Strategy<Value = Vec<DotColor>> {
    proptest::collection::vec(color_strategy(), (ROWS * COLS) as usize)
}

fn gesture_strategy() -> impl Strategy<Value = Gesture> {
    let cell = 0..ROWS * COLS;
    prop_oneof![
        1 => cell.clone().prop_map(Gesture::Press),
        6 => cell.prop_map(Gesture::Hover),
        1 => Just(Gesture::Release),
        1 => Just(Gesture::Cancel),
    ]
}

fn check_chain(builder: &ChainBuilder, dots: &DotRegistry) -> Result<(), TestCaseError> {
    let members = builder.chain().members();
    let unique: HashSet<DotId> = members.iter().copied().collect();
    prop_assert_eq!(unique.len(), members.len(), "duplicate member in {:?}", members);

    for segment in builder.segments() {
        let from = dots.get(segment.from).ok_or_else(|| TestCaseError::fail("vacant from"))?;
        let to = dots.get(segment.to).ok_or_else(|| TestCaseError::fail("vacant to"))?;
        let (dx, dy) = from.pos.delta(to.pos);
        prop_assert_eq!(dx.abs() + dy.abs(), 1, "segment {:?} is not one step", segment);
        prop_assert_eq!(from.color, to.color);
        prop_assert_eq!(Some(to.color), builder.locked_color());
        prop_assert!(to.has_incoming);
        let chain = builder.chain();
        prop_assert!(chain.contains(segment.from) && chain.contains(segment.to));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn committed_segments_are_orthogonal_single_steps(
        colors in board_strategy(),
        gestures in proptest::collection::vec(gesture_strategy(), 1..60),
    ) {
        let mut dots = DotRegistry::from_colors(ROWS, COLS, &colors).unwrap();
        let mut builder = ChainBuilder::new();
        let mut rng = Rng::new(1);

        for gesture in gestures {
            match gesture {
                Gesture::Press(cell) => {
                    let _ = builder.begin_chain(&mut dots, DotId(cell));
                }
                Gesture::Hover(cell) => {
                    let _ = builder.try_extend(&mut dots, DotId(cell));
                }
                Gesture::Release => {
                    if let Some(done) = builder.end_chain(&mut dots) {
                        // Runs of a resumed chain are not joined by a segment.
                        prop_assert!(done.segments.len() < done.chain.len());
                        // Put the board back so later gestures still have dots to hit.
                        let resolution = resolve(done, &mut dots);
                        for vacancy in resolution.vacancies {
                            let palette = Palette::new(vec![colors[vacancy.id.index()]]).unwrap();
                            dots.replace_dot(vacancy.id, vacancy.pos, &palette, &mut rng).unwrap();
                        }
                    }
                }
                Gesture::Cancel => {
                    builder.abort(&mut dots);
                }
            }
            check_chain(&builder, &dots)?;
        }
    }

    #[test]
    fn incoming_flag_is_set_at_most_once_per_chain(
        colors in board_strategy(),
        path in proptest::collection::vec(0..ROWS * COLS, 1..30),
    ) {
        let mut dots = DotRegistry::from_colors(ROWS, COLS, &colors).unwrap();
        let mut builder = ChainBuilder::new();
        prop_assume!(builder.begin_chain(&mut dots, DotId(path[0])).is_ok());

        let mut accepted = 0usize;
        for &cell in &path[1..] {
            if builder.try_extend(&mut dots, DotId(cell)).is_ok() {
                accepted += 1;
            }
        }
        prop_assert_eq!(builder.segments().len(), accepted);
        prop_assert_eq!(builder.chain().len(), accepted + 1);
        let flagged = dots.iter().filter(|d| d.has_incoming).count();
        prop_assert_eq!(flagged, accepted);
    }
}
