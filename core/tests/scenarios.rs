use break_core::*;

/// 7x7 board, 10 mines packed into the two right columns with a sealed safe pocket in the
/// bottom right corner. Everything left of column 5 is reachable from the top left zero.
fn right_wall_board() -> Board {
    let mines = [
        (5, 0),
        (6, 0),
        (5, 1),
        (6, 1),
        (5, 2),
        (6, 2),
        (5, 3),
        (5, 5),
        (6, 5),
        (5, 6),
    ];
    Board::from_mine_coords(7, &mines).unwrap()
}

fn views(session: &Session) -> Vec<(Coord2, CellView)> {
    let size = session.grid_size();
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .map(|coords| (coords, session.cell_view(coords).unwrap()))
        .collect()
}

#[test]
fn corner_cascade_reveals_region_and_border_only() {
    let mut session = Session::from_board(right_wall_board());

    assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

    for ((x, y), view) in views(&session) {
        if x <= 4 {
            assert!(view.is_revealed(), "({x}, {y}) should be open");
            assert_eq!(view.has_mine(), Some(false));
        } else {
            assert!(!view.is_revealed(), "({x}, {y}) should stay closed");
        }
    }
    assert_eq!(session.cell_view((3, 3)), Ok(CellView::Revealed(0)));
    assert_eq!(session.cell_view((4, 0)), Ok(CellView::Revealed(2)));
    assert_eq!(session.cell_view((4, 6)), Ok(CellView::Revealed(2)));
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn flagged_cell_survives_reveal_attempt() {
    let mut session = Session::from_board(right_wall_board());
    session.toggle_flag((2, 2)).unwrap();

    assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
    assert_eq!(session.cell_view((2, 2)), Ok(CellView::Flagged));

    // the cascade flows around the flag
    session.reveal((0, 0)).unwrap();
    assert_eq!(session.cell_view((2, 2)), Ok(CellView::Flagged));
    assert_eq!(session.cell_view((3, 3)), Ok(CellView::Revealed(0)));
}

#[test]
fn eleventh_flag_is_refused_until_one_is_removed() {
    let mut session = Session::new_game(Difficulty::Advanced, 5);
    let cells: Vec<Coord2> = (0..7).flat_map(|y| (0..7).map(move |x| (x, y))).collect();

    for &coords in &cells[..10] {
        assert_eq!(session.toggle_flag(coords).unwrap(), MarkOutcome::Flagged);
    }
    assert_eq!(session.toggle_flag(cells[10]).unwrap(), MarkOutcome::NoChange);
    assert_eq!(session.cell_view(cells[10]), Ok(CellView::Hidden));
    assert_eq!(session.status().flags_remaining, 0);

    assert_eq!(session.toggle_flag(cells[3]).unwrap(), MarkOutcome::Unflagged);
    assert_eq!(session.toggle_flag(cells[10]).unwrap(), MarkOutcome::Flagged);
    assert_eq!(session.flags_placed(), 10);
}

#[test]
fn clearing_safe_cells_wins_without_flags() {
    let board = right_wall_board();
    let safe: Vec<Coord2> = board
        .iter_cells()
        .filter(|(_, cell)| !cell.has_mine)
        .map(|(coords, _)| coords)
        .collect();
    let mut session = Session::from_board(board);

    let mut last = RevealOutcome::NoChange;
    for coords in safe {
        let outcome = session.reveal(coords).unwrap();
        if outcome != RevealOutcome::NoChange {
            last = outcome;
        }
    }

    assert_eq!(last, RevealOutcome::Won);
    assert_eq!(session.state(), GameState::Won);
    assert_eq!(session.flags_placed(), 10);
    let flagged = views(&session).iter().filter(|(_, view)| view.is_flagged()).count();
    assert_eq!(flagged, 10);
}

#[test]
fn losing_shows_every_mine_and_keeps_opened_cells() {
    for seed in 0..16 {
        let mut session = Session::new_game(Difficulty::Break, seed);
        let order: Vec<Coord2> = (0..7).flat_map(|x| (0..7).map(move |y| (x, y))).collect();

        let mut before = views(&session);
        for coords in order {
            match session.reveal(coords).unwrap() {
                RevealOutcome::HitMine => break,
                RevealOutcome::Won => break,
                _ => before = views(&session),
            }
        }
        if session.state() != GameState::Lost {
            continue;
        }

        let after = views(&session);
        let mines = after
            .iter()
            .filter(|(_, view)| view.has_mine() == Some(true))
            .count();
        assert_eq!(mines, 15);
        for ((coords, old), (_, new)) in before.iter().zip(&after) {
            if let CellView::Revealed(count) = old {
                assert_eq!(*new, CellView::Revealed(*count), "at {coords:?}");
            }
        }
    }
}

#[test]
fn timer_counts_only_while_playing() {
    let mut session = Session::from_board(right_wall_board());

    // ticks before the first move are ignored
    assert!(!session.tick());
    session.reveal((0, 0)).unwrap();
    for _ in 0..3 {
        assert!(session.tick());
    }
    assert_eq!(session.status().clock(), "00:03");

    session.reveal((5, 0)).unwrap();
    assert_eq!(session.state(), GameState::Lost);
    assert!(!session.tick());
    assert_eq!(session.elapsed_seconds(), 3);

    let session = Session::new_game(Difficulty::Advanced, 1);
    assert_eq!(session.elapsed_seconds(), 0);
    assert_eq!(session.state(), GameState::Idle);
}

#[test]
fn hidden_views_never_serialize_mine_data() {
    let session = Session::from_board(right_wall_board());

    for (_, view) in views(&session) {
        assert_eq!(serde_json::to_string(&view).unwrap(), "\"Hidden\"");
    }

    let status = serde_json::to_value(session.status()).unwrap();
    assert_eq!(status["state"], "Idle");
    assert_eq!(status["flags_remaining"], 10);
}

#[test]
fn serialized_surface_hides_mines_mid_game() {
    let mut session = Session::from_board(right_wall_board());
    session.reveal((0, 0)).unwrap();
    session.toggle_flag((5, 0)).unwrap();

    let views: Vec<CellView> = views(&session).into_iter().map(|(_, view)| view).collect();
    let json = serde_json::to_string(&(views, session.status())).unwrap();

    assert!(!json.contains("Mine"), "{json}");
    assert!(!json.contains("has_mine"), "{json}");
    assert!(json.contains("Flagged"));
}
