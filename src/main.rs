//! Terminal runner (default binary).
//!
//! Polls crossterm for keys, drives the scheduler with a monotonic clock and
//! repaints through the framebuffer renderer every frame.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::{GameSession, GameSnapshot, Scheduler, SessionEvent};
use blockfall::input::{KeyAction, KeyMap};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::{AppConfig, EventLog};

/// Clear markers alternate every this many milliseconds.
const FLASH_MS: u64 = 75;

type FileLog = EventLog<BufWriter<File>>;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let keys = config.key_map()?;
    let mut log = match &config.log_path {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &keys, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = log.as_mut() {
        if let Err(e) = log.flush() {
            eprintln!("[Session] event log flush failed: {}", e);
        }
    }

    match result? {
        Some(score) => eprintln!("[Session] final score: {}", score),
        None => eprintln!("[Session] no game played"),
    }
    eprintln!("[Config] seed {} (replay with BLOCKFALL_SEED={})", config.seed, config.seed);
    Ok(())
}

/// Game loop. Returns the score of the last finished game.
fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    keys: &KeyMap,
    log: &mut Option<FileLog>,
) -> Result<Option<u32>> {
    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_millis() as u64;

    let mut sched = Scheduler::new(GameSession::with_seed(config.seed, config.rules));
    sched.start(now_ms());

    let mut view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut last_score = None;

    loop {
        let now = now_ms();
        sched.frame(now);
        drain_events(&mut sched, log, &mut last_score)?;

        sched.session().snapshot_into(&mut snap);
        view.set_flash((now / FLASH_MS) % 2 == 0);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match keys.lookup(key) {
                Some(KeyAction::Quit) => {
                    sched.end();
                    drain_events(&mut sched, log, &mut last_score)?;
                    return Ok(last_score);
                }
                Some(KeyAction::Game(intent)) => {
                    sched.dispatch(intent, now_ms());
                }
                Some(KeyAction::Session(command)) => {
                    sched.lifecycle(command, now_ms());
                }
                None => {}
            },
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

/// Forward buffered session events to the log, remembering the last final score.
fn drain_events(
    sched: &mut Scheduler,
    log: &mut Option<FileLog>,
    last_score: &mut Option<u32>,
) -> Result<()> {
    let t_ms = sched.session().now_ms();
    for event in sched.session_mut().drain_events() {
        if let SessionEvent::GameOver { score } = event {
            *last_score = Some(score);
        }
        if let Some(log) = log.as_mut() {
            log.record(t_ms, event)?;
        }
    }
    Ok(())
}
