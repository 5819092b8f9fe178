#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use petgraph::algo::connected_components;
    use petgraph::graphmap::UnGraphMap;
    use proptest::prelude::*;

    use crate::builder::{BuilderInvalidReason, GameBuilder};
    use crate::cell::Cell;
    use crate::error::{BuildError, MoveError};
    use crate::location::Location;
    use crate::player::PlayerId;
    use crate::render::WidthPolicy;
    use crate::Board;

    fn counters(board: &Board) -> Vec<(u64, u32, bool)> {
        (1..=board.players())
            .map(|player| (board.owned_cell_count(player), board.area_count(player), board.has_used_golden(player)))
            .collect()
    }

    /// Check every bookkeeping invariant of `board` against a recount from the ownership grid.
    fn assert_consistent(board: &mut Board) {
        let total = (board.width() * board.height()) as u64;
        let owned: u64 = (1..=board.players()).map(|player| board.owned_cell_count(player)).sum();
        assert_eq!(board.empty_cell_count() + owned, total);

        let owned_cells = board.cells.indexed_iter()
            .filter_map(|(index, cell)| cell.owner().map(|player| (Location::from(index), player)))
            .collect::<Vec<_>>();
        assert_eq!(owned_cells.len() as u64, owned);

        let mut roots: HashMap<PlayerId, HashSet<Location>> = HashMap::new();
        let mut members: HashMap<Location, u64> = HashMap::new();
        for (location, player) in &owned_cells {
            let root = board.forest.find(*location);
            assert_eq!(board.cells[root.as_index()], Cell::Owned { player: *player }, "root of {location:?} has another owner");
            roots.entry(*player).or_default().insert(root);
            *members.entry(root).or_default() += 1;
            if !board.forest.is_root(*location) {
                assert_eq!(board.forest.size_of(*location), 0, "non-root {location:?} carries a size");
            }
        }
        for (root, count) in &members {
            assert_eq!(board.forest.size_of(*root), *count, "size of area {root:?}");
        }

        let mut graph = UnGraphMap::<Location, ()>::new();
        for (location, player) in &owned_cells {
            graph.add_node(*location);
            for neighbor in [Location(location.0 + 1, location.1), Location(location.0, location.1 + 1)] {
                if board.cells.get(neighbor.as_index()).is_some_and(|cell| cell.is_owned_by(*player)) {
                    graph.add_edge(*location, neighbor, ());
                }
            }
        }

        let mut area_total = 0;
        for player in 1..=board.players() {
            let areas = board.area_count(player);
            assert_eq!(areas as usize, roots.get(&player).map_or(0, HashSet::len), "areas of player {player}");
            assert!(areas <= board.max_areas(), "player {player} holds too many areas");
            area_total += areas as usize;
        }
        assert_eq!(connected_components(&graph), area_total);
        assert!(board.flood.is_clear());
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(4, 3, 2, 2).unwrap();

        assert_eq!(board.empty_cell_count(), 12);
        assert_eq!(board.max_areas(), 2);
        assert_eq!(board.players(), 2);
        assert_eq!(format!("{}", board), "....
....
....
");
    }

    #[test]
    fn builder_collects_every_problem() {
        let err = Board::new(0, 0, 0, 0).err().unwrap();
        match err {
            BuildError::Invalid(reasons) => assert_eq!(reasons, vec![
                BuilderInvalidReason::ZeroWidth,
                BuilderInvalidReason::ZeroHeight,
                BuilderInvalidReason::NoPlayers,
                BuilderInvalidReason::NoAreas,
            ]),
            other => panic!("unexpected error {other}"),
        }

        let mut builder = GameBuilder::with_dims((3, 3));
        assert!(builder.players(0).is_valid().is_some());
        assert!(builder.players(4).is_valid().is_none());
        let board = builder.max_areas(3).build().unwrap();
        assert_eq!(board.players(), 4);
        assert_eq!(board.max_areas(), 3);
    }

    #[test]
    fn oversized_board_is_rejected() {
        let err = Board::new(usize::MAX, 2, 2, 2).err().unwrap();
        assert!(matches!(err, BuildError::Invalid(reasons) if reasons == vec![BuilderInvalidReason::BoardTooLarge]));
    }

    #[test]
    fn area_limit_blocks_new_area() {
        let mut board = Board::new(4, 4, 2, 2).unwrap();

        board.place(1, 0, 0).unwrap();
        board.place(1, 1, 0).unwrap();
        assert_eq!(board.area_count(1), 1);
        assert_eq!(board.owned_cell_count(1), 2);

        board.place(1, 3, 3).unwrap();
        assert_eq!(board.area_count(1), 2);
        assert_eq!(board.owned_cell_count(1), 3);

        assert_eq!(board.place(1, 3, 0), Err(MoveError::AreaLimit(1)));
        assert_eq!(board.owned_cell_count(1), 3);
        // still fine when it extends an area
        board.place(1, 2, 0).unwrap();
        assert_eq!(board.area_count(1), 2);

        assert_eq!(format!("{}", board), "...1
....
....
111.
");
        assert_consistent(&mut board);
    }

    #[test]
    fn rejected_placements() {
        let mut board = Board::new(3, 2, 2, 1).unwrap();
        board.place(1, 0, 0).unwrap();

        assert_eq!(board.place(0, 1, 1), Err(MoveError::PlayerOutOfRange(0)));
        assert_eq!(board.place(3, 1, 1), Err(MoveError::PlayerOutOfRange(3)));
        assert_eq!(board.place(2, 3, 0), Err(MoveError::OutOfBounds(3, 0)));
        assert_eq!(board.place(2, 0, 2), Err(MoveError::OutOfBounds(0, 2)));
        assert_eq!(board.place(2, 0, 0), Err(MoveError::Occupied));
        assert_eq!(board.place(1, 0, 0), Err(MoveError::Occupied));
        assert!(!board.move_possible(1, 2, 1));
        assert!(board.move_possible(1, 0, 1));
        assert_eq!(board.empty_cell_count(), 5);
        assert_consistent(&mut board);
    }

    #[test]
    fn first_placement_always_fits() {
        let mut board = Board::new(3, 3, 2, 1).unwrap();
        assert!(board.move_possible(2, 2, 2));
        board.place(2, 2, 2).unwrap();
        assert_eq!(board.area_count(2), 1);
        assert_eq!(board.owned_cell_count(2), 1);
    }

    #[test]
    fn placement_merges_areas() {
        let mut board = Board::new(3, 3, 1, 4).unwrap();
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            board.place(1, x, y).unwrap();
        }
        assert_eq!(board.area_count(1), 4);

        board.place(1, 1, 1).unwrap();
        assert_eq!(board.area_count(1), 1);
        assert_eq!(board.owned_cell_count(1), 5);
        let root = board.forest.find(Location(1, 1));
        assert_eq!(board.forest.size_of(root), 5);
        assert_consistent(&mut board);
    }

    #[test]
    fn free_fields_at_the_limit_touch_the_area() {
        let mut board = Board::new(5, 5, 2, 1).unwrap();
        for x in 1..=3 {
            board.place(1, x, 1).unwrap();
        }

        assert_eq!(board.empty_cell_count(), 22);
        assert_eq!(board.free_field_count(1), 8);
        assert_eq!(board.free_field_count(2), 22);
        assert_eq!(board.free_field_count(7), 0);

        board.place(2, 0, 1).unwrap();
        assert_eq!(board.free_field_count(1), 7);
    }

    #[test]
    fn golden_move_splits_a_line() {
        let mut board = Board::new(6, 3, 2, 2).unwrap();
        for x in 0..6 {
            board.place(1, x, 1).unwrap();
        }
        assert_eq!(board.area_count(1), 1);

        board.golden_move(2, 2, 1).unwrap();

        assert_eq!(board.area_count(1), 2);
        assert_eq!(board.owned_cell_count(1), 5);
        assert_eq!(board.owned_cell_count(2), 1);
        assert!(board.has_used_golden(2));
        assert_eq!(format!("{}", board), "......
112111
......
");
        assert_consistent(&mut board);

        assert_eq!(board.golden_move(2, 0, 1), Err(MoveError::GoldenMoveUsed(2)));
    }

    #[test]
    fn golden_move_on_a_cycle_keeps_one_area() {
        let mut board = Board::new(3, 3, 2, 1).unwrap();
        for (x, y) in [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)] {
            board.place(1, x, y).unwrap();
        }
        board.place(2, 1, 1).unwrap();

        board.golden_move(2, 1, 0).unwrap();
        assert_eq!(board.area_count(1), 1);
        assert_eq!(board.area_count(2), 1);
        assert_eq!(format!("{}", board), "111
121
121
");
        assert_consistent(&mut board);
    }

    #[test]
    fn golden_move_rejections_leave_board_untouched() {
        let mut board = Board::new(3, 3, 2, 1).unwrap();
        board.place(1, 1, 1).unwrap();
        for y in 0..3 {
            board.place(2, 2, y).unwrap();
        }

        let before = board.to_string();
        let counts = counters(&board);

        assert_eq!(board.golden_move(1, 0, 0), Err(MoveError::Unowned));
        assert_eq!(board.golden_move(1, 1, 1), Err(MoveError::OwnCell));
        assert_eq!(board.golden_move(1, 2, 1), Err(MoveError::OpponentAreaLimit(2)));
        assert_eq!(board.golden_move(1, 2, 0), Err(MoveError::AreaLimit(1)));
        assert_eq!(board.golden_move(1, 5, 0), Err(MoveError::OutOfBounds(5, 0)));
        assert_eq!(board.golden_move(3, 2, 0), Err(MoveError::PlayerOutOfRange(3)));

        assert_eq!(board.to_string(), before);
        assert_eq!(counters(&board), counts);
        assert_consistent(&mut board);
    }

    #[test]
    fn golden_move_rolls_back_mover_at_limit() {
        let mut board = Board::new(4, 1, 2, 1).unwrap();
        board.place(1, 0, 0).unwrap();
        board.place(2, 2, 0).unwrap();
        board.place(2, 3, 0).unwrap();

        // player 2 stays whole, but player 1 would start a second area
        assert_eq!(board.golden_move(1, 3, 0), Err(MoveError::AreaLimit(1)));
        assert_eq!(board.to_string(), "1.22\n");
        assert_consistent(&mut board);
    }

    #[test]
    fn golden_possible_without_opponents() {
        let mut board = Board::new(3, 3, 3, 1).unwrap();
        assert!(!board.can_play_golden(1));

        board.place(1, 0, 0).unwrap();
        assert!(!board.can_play_golden(1));
        assert!(board.can_play_golden(2));
        assert!(!board.can_play_golden(4));
    }

    #[test]
    fn golden_possible_below_the_limit_skips_the_scan() {
        let mut board = Board::new(3, 3, 2, 2).unwrap();
        board.place(1, 0, 0).unwrap();
        board.place(2, 2, 2).unwrap();

        assert!(board.can_play_golden(1));
        board.golden_move(1, 2, 2).unwrap();
        assert!(!board.can_play_golden(1));
    }

    #[test]
    fn golden_possible_probe_is_invisible() {
        let mut board = Board::new(3, 3, 2, 1).unwrap();
        board.place(1, 0, 0).unwrap();
        board.place(2, 1, 0).unwrap();
        board.place(2, 1, 1).unwrap();

        let before = board.to_string();
        let counts = counters(&board);
        assert!(board.can_play_golden(1));
        assert!(board.can_play_golden(1));
        assert_eq!(board.to_string(), before);
        assert_eq!(counters(&board), counts);
        assert!(!board.has_used_golden(1));
        assert_consistent(&mut board);
    }

    #[test]
    fn golden_impossible_probe_is_invisible() {
        let mut board = Board::new(3, 3, 2, 1).unwrap();
        board.place(1, 1, 1).unwrap();
        for y in 0..3 {
            board.place(2, 2, y).unwrap();
        }

        let before = board.to_string();
        assert!(!board.can_play_golden(1));
        assert!(!board.can_play_golden(1));
        assert_eq!(board.to_string(), before);
        assert_eq!(board.area_count(2), 1);
        assert_consistent(&mut board);
    }

    #[test]
    fn render_widths() {
        let mut board = Board::new(3, 2, 12, 1).unwrap();
        board.place(2, 2, 0).unwrap();

        assert_eq!(board.field_width(WidthPolicy::Compact), 1);
        assert_eq!(board.field_width(WidthPolicy::Fixed), 3);
        assert_eq!(board.to_string(), "...
..2
");
        assert_eq!(board.render(WidthPolicy::Fixed), ".  .  .  \n.  .  2  \n");

        board.place(10, 0, 1).unwrap();
        assert_eq!(board.to_string(), "10 .  .  \n.  .  2  \n");
        assert_eq!(board.cell_text(0, 1).as_deref(), Some("10 "));
        assert_eq!(board.cell_text(1, 1).as_deref(), Some(".  "));
        assert_eq!(board.cell_text(3, 0), None);
        assert_eq!(board.owner_at(0, 1), Some(10));
        assert_eq!(board.owner_at(1, 1), None);
    }

    #[test]
    fn fixed_width_single_digit_players() {
        let mut board = Board::new(2, 1, 9, 1).unwrap();
        board.place(9, 1, 0).unwrap();
        assert_eq!(board.render(WidthPolicy::Fixed), ".9\n");
        assert_eq!(board.cell_text(1, 0).as_deref(), Some("9"));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Place(PlayerId, usize, usize),
        Golden(PlayerId, usize, usize),
        Probe(PlayerId),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (1..=3u32, 0..5usize, 0..5usize).prop_map(|(p, x, y)| Op::Place(p, x, y)),
            2 => (1..=3u32, 0..5usize, 0..5usize).prop_map(|(p, x, y)| Op::Golden(p, x, y)),
            1 => (1..=3u32).prop_map(Op::Probe),
        ]
    }

    proptest! {
        #[test]
        fn random_games_stay_consistent(ops in prop::collection::vec(op(), 1..120)) {
            let mut board = Board::new(5, 5, 3, 2).unwrap();

            for op in ops {
                let before = board.to_string();
                let counts = counters(&board);

                match op {
                    Op::Place(player, x, y) => {
                        let possible = board.move_possible(player, x, y);
                        let placed = board.place(player, x, y).is_ok();
                        prop_assert_eq!(possible, placed);
                        if !placed {
                            prop_assert_eq!(board.to_string(), before);
                        }
                    }
                    Op::Golden(player, x, y) => {
                        if board.golden_move(player, x, y).is_err() {
                            prop_assert_eq!(board.to_string(), before);
                            prop_assert_eq!(counters(&board), counts);
                        }
                    }
                    Op::Probe(player) => {
                        let first = board.can_play_golden(player);
                        let second = board.can_play_golden(player);
                        prop_assert_eq!(first, second);
                        prop_assert_eq!(board.to_string(), before);
                        prop_assert_eq!(counters(&board), counts);
                    }
                }

                assert_consistent(&mut board);
            }
        }
    }
}
