//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, steps the simulation at a fixed rate and draws
//! through the framebuffer renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::cli::{parse_args, RunArgs};
use blockfall::core::{BagSpawner, Simulation, Snapshot};
use blockfall::input::{should_quit, HostCommand, InputEvent, InputHandler};
use blockfall::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use blockfall::types::{Event as SimEvent, TICK_MS, TICK_SECONDS};

// Keep-alive redraw interval while nothing moves.
const STATIC_RENDER_INTERVAL_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    // Config errors are reported before the terminal switches modes.
    let config = args.load_config()?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let sim = Simulation::new(config, BagSpawner::new(seed))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, sim, &args);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut sim: Simulation<BagSpawner>, args: &RunArgs) -> Result<()> {
    log::info!("starting with {:?}, config {:?}", args.seed, sim.config());
    sim.start();

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut throttle = RenderThrottle::new(STATIC_RENDER_INTERVAL_MS);
    let mut snap = Snapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        sim.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render_snapshot(now_ms, &snap) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        match input.handle_key_press(key.code) {
                            Some(InputEvent::Intent(intent)) => {
                                sim.apply(intent);
                            }
                            Some(InputEvent::Command(command)) => {
                                run_command(&mut sim, &mut input, command)
                            }
                            None => {}
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(intent) = input.handle_key_release(key.code) {
                            sim.apply(intent);
                        }
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for intent in input.update(TICK_MS) {
                sim.apply(intent);
            }
            sim.tick(TICK_SECONDS);

            for event in sim.drain_events() {
                if let SimEvent::RowsCompleted(rows) = event {
                    log::debug!("cleared rows {:?}", rows.as_slice());
                }
            }
        }
    }
}

fn run_command(sim: &mut Simulation<BagSpawner>, input: &mut InputHandler, command: HostCommand) {
    match command {
        HostCommand::TogglePause => {
            let paused = !sim.paused();
            if paused {
                // Keys let go while paused may never report a release.
                for intent in input.release_all() {
                    sim.apply(intent);
                }
            }
            sim.set_paused(paused);
        }
        HostCommand::Restart => {
            for intent in input.release_all() {
                sim.apply(intent);
            }
            sim.restart();
        }
    }
}

