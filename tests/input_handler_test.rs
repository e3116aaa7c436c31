//! Key events through the handler into a running simulation.

use crossterm::event::KeyCode;

use blockfall::core::{SequenceSpawner, SimConfig, Simulation};
use blockfall::input::{HostCommand, InputEvent, InputHandler};
use blockfall::types::{Direction, Intent, PieceKind, TICK_MS, TICK_SECONDS};

fn sim() -> Simulation<SequenceSpawner> {
    let config = SimConfig {
        gravity_period: 10.0,
        move_repeat_delay: 0.1,
        ..SimConfig::with_size(10, 8)
    };
    let mut sim = Simulation::new(config, SequenceSpawner::new(vec![PieceKind::O])).unwrap();
    sim.start();
    sim
}

fn feed(sim: &mut Simulation<SequenceSpawner>, event: Option<InputEvent>) {
    if let Some(InputEvent::Intent(intent)) = event {
        sim.apply(intent);
    }
}

#[test]
fn tapping_a_key_moves_once() {
    let mut sim = sim();
    let mut input = InputHandler::new();
    let x = sim.active().unwrap().anchor.0;

    feed(&mut sim, input.handle_key_press(KeyCode::Left));
    if let Some(intent) = input.handle_key_release(KeyCode::Left) {
        sim.apply(intent);
    }

    for _ in 0..20 {
        for intent in input.update(TICK_MS) {
            sim.apply(intent);
        }
        sim.tick(TICK_SECONDS);
    }
    assert_eq!(sim.active().unwrap().anchor.0, x - 1);
}

#[test]
fn missing_release_times_out() {
    let mut sim = sim();
    let mut input = InputHandler::new().with_key_release_timeout_ms(48);

    feed(&mut sim, input.handle_key_press(KeyCode::Right));
    assert_eq!(sim.fall().held_direction(), Some(Direction::Right));

    let mut released = Vec::new();
    for _ in 0..4 {
        for intent in input.update(TICK_MS) {
            released.push(intent);
            sim.apply(intent);
        }
    }
    assert_eq!(
        released,
        vec![Intent::Move {
            direction: Direction::Right,
            enabled: false
        }]
    );
    assert_eq!(sim.fall().held_direction(), None);
}

#[test]
fn rush_key_toggles_rush() {
    let mut sim = sim();
    let mut input = InputHandler::new();

    feed(&mut sim, input.handle_key_press(KeyCode::Down));
    assert!(sim.fall().is_rushing());
    if let Some(intent) = input.handle_key_release(KeyCode::Down) {
        sim.apply(intent);
    }
    assert!(!sim.fall().is_rushing());
}

#[test]
fn host_commands_are_not_intents() {
    let mut input = InputHandler::new();
    assert_eq!(
        input.handle_key_press(KeyCode::Char('P')),
        Some(InputEvent::Command(HostCommand::TogglePause))
    );
    assert_eq!(
        input.handle_key_press(KeyCode::Char('r')),
        Some(InputEvent::Command(HostCommand::Restart))
    );
    assert_eq!(input.handle_key_release(KeyCode::Char('p')), None);
}

#[test]
fn up_turns_clockwise_and_z_counter_clockwise_on_screen() {
    let config = SimConfig {
        gravity_period: 10.0,
        ..SimConfig::with_size(10, 8)
    };
    for (key, nub_dx) in [(KeyCode::Up, 1), (KeyCode::Char('z'), -1)] {
        let mut sim = Simulation::new(config.clone(), SequenceSpawner::new(vec![PieceKind::T])).unwrap();
        sim.start();
        let mut input = InputHandler::new();
        let (x, y) = sim.active().unwrap().anchor;

        feed(&mut sim, input.handle_key_press(key));

        let cells: Vec<_> = sim.active().unwrap().occupied_cells().collect();
        assert!(cells.contains(&(x + nub_dx, y)), "{:?} gave {:?}", key, cells);
        assert!(cells.contains(&(x, y + 1)) && cells.contains(&(x, y - 1)));
    }
}
