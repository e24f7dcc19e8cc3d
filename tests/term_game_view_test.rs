use blockfall::core::{GameSession, GameSnapshot, Sequence};
use blockfall::term::{piece_color, AnchorY, GameView, Viewport};
use blockfall::types::{Cell, Intent, PieceKind, Rules};

fn session(kinds: &[PieceKind]) -> GameSession<Sequence> {
    let mut game = GameSession::new(Sequence::new(kinds), Rules::default());
    game.start();
    game
}

#[test]
fn term_view_renders_border_corners() {
    let view = GameView::default();
    // 10 cells * 2 columns + border => 22x22
    let fb = view.render(&GameSnapshot::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).map(|g| g.ch), Some('┌'));
    assert_eq!(fb.get(21, 0).map(|g| g.ch), Some('┐'));
    assert_eq!(fb.get(0, 21).map(|g| g.ch), Some('└'));
    assert_eq!(fb.get(21, 21).map(|g| g.ch), Some('┘'));
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.started = true;
    snap.board[19][0] = Cell::Filled(PieceKind::I);

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    let (x, y) = view.cell_origin(vp, 0, 19);
    assert_eq!((x, y), (1, 20));
    for dx in 0..2 {
        let glyph = fb.get(x + dx, y).unwrap_or_default();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, piece_color(PieceKind::I));
    }
    assert_eq!(fb.get(x + 2, y).map(|g| g.ch), Some('·'));
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let game = session(&[PieceKind::O, PieceKind::T]);
    let snap = game.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(60, 24);
    let fb = view.render(&snap, vp);

    let ch = |x, y| {
        let (px, py) = view.cell_origin(vp, x, y);
        fb.get(px, py).map(|g| g.ch)
    };
    // Active O at the top, ghost on the floor.
    assert_eq!(ch(4, 0), Some('█'));
    assert_eq!(ch(5, 1), Some('█'));
    assert_eq!(ch(4, 18), Some('░'));
    assert_eq!(ch(5, 19), Some('░'));
    assert_eq!(ch(3, 19), Some('·'));
}

#[test]
fn term_view_side_panel_shows_stats() {
    let mut game = session(&[PieceKind::O, PieceKind::T]);
    game.apply(Intent::HardDrop);
    game.apply(Intent::Hold);

    let view = GameView::default();
    let fb = view.render(&game.snapshot(), Viewport::new(60, 24));
    let text: Vec<String> = (0..24).map(|y| fb.row_text(y)).collect();

    let row_of = |label: &str| text.iter().position(|r| r.contains(label));
    let score_row = row_of("SCORE").unwrap_or(usize::MAX);
    assert!(text[score_row + 1].contains("20"));
    assert!(row_of("LEVEL").is_some());
    assert!(row_of("LINES").is_some());
    assert!(row_of("HOLD").is_some());
    assert!(row_of("NEXT").is_some());
}

#[test]
fn term_view_overlays() {
    let mut game = session(&[PieceKind::T]);
    let view = GameView::default();
    let vp = Viewport::new(60, 24);
    let has = |snap: &GameSnapshot, text: &str| {
        let fb = view.render(snap, vp);
        (0..vp.height).any(|y| fb.row_text(y).contains(text))
    };

    assert!(!has(&game.snapshot(), "PAUSED"));
    game.apply(Intent::TogglePause);
    assert!(has(&game.snapshot(), "PAUSED"));
    game.apply(Intent::TogglePause);

    game.end();
    assert!(has(&game.snapshot(), "GAME OVER"));
}
