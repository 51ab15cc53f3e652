//! Property tests for state validation, state equality and the cell
//! state machine.

use std::sync::Arc;

use ca_cell::{Cell, CellError, Color, State, TickPhase, ValidationError};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = Color> {
    (0..Color::ALL.len()).prop_map(|i| Color::ALL[i])
}

fn printable() -> impl Strategy<Value = char> {
    any::<char>().prop_filter("printable", |c| !c.is_control())
}

proptest! {
    #[test]
    fn test_valid_states_construct(value in 0..=i64::MAX, glyph in printable(), color in color()) {
        let state = State::new(value, &glyph.to_string(), color).unwrap();
        prop_assert_eq!(state.value(), value as u64);
        prop_assert_eq!(state.glyph(), glyph);
        prop_assert_eq!(
            state.render(),
            format!("{}{}{}", color.escape(), glyph, Color::Default.escape())
        );
    }

    #[test]
    fn test_negative_values_rejected(value in i64::MIN..0, glyph in printable()) {
        prop_assert_eq!(
            State::new(value, &glyph.to_string(), Color::White).unwrap_err(),
            ValidationError::NegativeValue(value)
        );
    }

    #[test]
    fn test_wrong_glyph_length_rejected(glyph in prop_oneof![Just(String::new()), "\\PC{2,6}"]) {
        let len = glyph.chars().count();
        prop_assert_eq!(
            State::new(1, &glyph, Color::White).unwrap_err(),
            ValidationError::GlyphLength { len }
        );
    }

    #[test]
    fn test_equality_is_by_value(
        a in 0..64i64,
        b in 0..64i64,
        ga in printable(),
        gb in printable(),
        ca in color(),
        cb in color(),
    ) {
        let x = State::new(a, &ga.to_string(), ca).unwrap();
        let y = State::new(b, &gb.to_string(), cb).unwrap();
        prop_assert_eq!(&x, &x);
        prop_assert_eq!(x == y, y == x);
        prop_assert_eq!(x == y, a == b);
    }
}

#[derive(Clone, Debug)]
enum Op {
    Update(usize),
    Close,
    Reset,
}

fn op(targets: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..targets).prop_map(Op::Update),
        Just(Op::Close),
        Just(Op::Reset),
    ]
}

proptest! {
    /// A cell behaves like a two-state machine under any call sequence.
    /// Targets 0..3 are registered; 3 is an equal-valued unregistered twin.
    #[test]
    fn test_cell_matches_model(ops in prop::collection::vec(op(4), 0..40)) {
        let registered: Vec<Arc<State>> = (1..=3)
            .map(|v| Arc::new(State::with_glyph(v, "x").unwrap()))
            .collect();
        let twin = Arc::new(State::with_glyph(1, "x").unwrap());
        let mut targets = registered.clone();
        targets.push(Arc::clone(&twin));

        let mut cell = Cell::with_states(registered.iter().cloned()).unwrap();
        let mut updated = false;
        let mut current: Arc<State> = State::dead();

        for op in ops {
            match op {
                Op::Update(i) => {
                    let result = cell.update(&targets[i]);
                    if updated {
                        prop_assert_eq!(result, Err(CellError::AlreadyUpdated { current: current.value() }));
                    } else if i == 3 {
                        prop_assert_eq!(result, Err(CellError::UnregisteredState { value: 1 }));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        updated = true;
                        current = Arc::clone(&targets[i]);
                    }
                }
                Op::Close => {
                    let result = cell.close_tick();
                    if updated {
                        prop_assert_eq!(result, Ok(()));
                        updated = false;
                    } else {
                        prop_assert_eq!(result, Err(CellError::NotUpdated));
                    }
                }
                Op::Reset => {
                    cell.reset();
                    updated = false;
                    current = State::dead();
                }
            }

            prop_assert!(Arc::ptr_eq(cell.current(), &current));
            let phase = if updated { TickPhase::Updated } else { TickPhase::Clear };
            prop_assert_eq!(cell.phase(), phase);
        }
    }
}
