/// Integration tests for game logic
///
/// These tests drive whole games through the public API: spawning, firing,
/// collisions, scoring and the game-over / restart cycle.
use starship::{
    Align, ControlState, Entity, EntitySizes, Game, GameConfig, GameState, Hazard, InputAction,
    PlayerCraft, Position, Rect, Renderer, Rgb, SessionController, Size, SpriteKind,
};

const SIZES: EntitySizes = EntitySizes {
    craft: Size::new(80.0, 80.0),
    hazard: Size::new(60.0, 60.0),
};

const IDLE: ControlState = ControlState {
    left: false,
    right: false,
};

/// Meteorites as wide as the screen: they cannot be dodged or missed
fn wall_config() -> GameConfig {
    GameConfig {
        hazard_size: Some([713, 60]),
        ..GameConfig::default()
    }
}

fn wall_sizes(config: &GameConfig) -> EntitySizes {
    EntitySizes {
        craft: SIZES.craft,
        hazard: config.fixed_hazard_size().unwrap(),
    }
}

/// Ticks an idle game until the craft is hit
fn play_until_game_over(game: &mut Game) -> usize {
    for tick in 1..=1000 {
        game.tick(IDLE);
        if game.state() == GameState::GameOver {
            return tick;
        }
    }
    panic!("craft survived 1000 ticks under a wall of meteorites");
}

#[derive(Default)]
struct Recorder {
    sprites: Vec<(SpriteKind, Position)>,
    rects: Vec<Rect>,
    texts: Vec<String>,
}

impl Renderer for Recorder {
    fn draw_sprite(&mut self, sprite: SpriteKind, position: Position) {
        self.sprites.push((sprite, position));
    }

    fn fill_rect(&mut self, rect: Rect, _: Rgb) {
        self.rects.push(rect);
    }

    fn draw_text(&mut self, text: &str, _: Position, _: Align, _: Rgb) {
        self.texts.push(text.to_string());
    }
}

#[test]
fn test_spawn_timer_appends_one_hazard_per_interval() {
    let config = GameConfig {
        spawn_interval: 60,
        ..GameConfig::default()
    };
    let mut game = Game::with_seed(&config, SIZES, 1);

    for _ in 0..59 {
        game.tick(IDLE);
    }
    assert!(game.hazards().is_empty());
    assert_eq!(game.session().spawn_timer(), 59);

    game.tick(IDLE);
    assert_eq!(game.hazards().len(), 1);
    assert_eq!(game.session().spawn_timer(), 0);

    // The new meteorite has already taken its first step
    let hazard = &game.hazards()[0];
    assert_eq!(hazard.position.y, -60.0 + hazard.fall_speed);
}

#[test]
fn test_same_seed_same_meteorites() {
    let config = GameConfig::default();
    let mut first = Game::with_seed(&config, SIZES, 99);
    let mut second = Game::with_seed(&config, SIZES, 99);
    for _ in 0..120 {
        first.tick(IDLE);
        second.tick(IDLE);
    }
    assert_eq!(first.hazards(), second.hazards());
}

#[test]
fn test_fire_respects_cooldown_through_game() {
    let mut game = Game::with_seed(&GameConfig::default(), SIZES, 3);
    let start = game.craft().position;

    game.apply(InputAction::Fire);
    game.apply(InputAction::Fire);
    assert_eq!(game.craft().projectiles().len(), 2);

    for _ in 0..15 {
        game.tick(IDLE);
    }
    game.apply(InputAction::Fire);
    let shots = game.craft().projectiles();
    assert_eq!(shots.len(), 4);
    assert_eq!(shots[2].position, Position::new(start.x + 16.0, start.y));
    assert_eq!(shots[3].position, Position::new(start.x + 64.0, start.y + 20.0));
}

#[test]
fn test_craft_hit_by_meteorite_ends_game() {
    let config = wall_config();
    let mut game = Game::with_seed(&config, wall_sizes(&config), 5);

    play_until_game_over(&mut game);

    assert!(!game.craft().is_alive());
    assert_eq!(game.score(), 0);

    // Nothing moves any more except the background
    let hazards = game.hazards().to_vec();
    game.tick(ControlState {
        left: true,
        right: false,
    });
    assert_eq!(game.hazards(), hazards.as_slice());
    assert_eq!(game.state(), GameState::GameOver);
}

#[test]
fn test_restart_after_game_over() {
    let config = wall_config();
    let mut game = Game::with_seed(&config, wall_sizes(&config), 11);
    play_until_game_over(&mut game);

    game.apply(InputAction::Restart);

    let fresh = PlayerCraft::new(config.field(), SIZES.craft);
    assert_eq!(game.state(), GameState::Running);
    assert!(game.craft().is_alive());
    assert_eq!(game.craft().position, fresh.position);
    assert_eq!(game.craft().cooldown, 0);
    assert!(game.craft().projectiles().is_empty());
    assert!(game.hazards().is_empty());
    assert_eq!(game.session().spawn_timer(), 0);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_firing_steadily_clears_the_wall() {
    let config = wall_config();
    let mut game = Game::with_seed(&config, wall_sizes(&config), 8);

    for _ in 0..600 {
        game.apply(InputAction::Fire);
        game.tick(IDLE);
    }

    assert_eq!(game.state(), GameState::Running);
    assert!(game.score() >= 100);
    assert_eq!(game.score() % 10, 0);
}

#[test]
fn test_score_survives_until_restart() {
    let config = wall_config();
    let mut game = Game::with_seed(&config, wall_sizes(&config), 21);
    for _ in 0..200 {
        game.apply(InputAction::Fire);
        game.tick(IDLE);
    }
    let score = game.score();
    assert!(score > 0);

    play_until_game_over(&mut game);
    assert!(game.score() >= score);

    game.apply(InputAction::Restart);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_shot_and_craft_pass_order() {
    let field = Size::new(713.0, 950.0);
    let mut session = SessionController::new(field.height);
    let mut craft = PlayerCraft::new(field, SIZES.craft);
    craft.fire();

    // The first rock sits on the left shot and the craft; the second only on the craft
    let mut hazards = vec![
        Hazard::new(Position::new(300.0, 820.0), SIZES.hazard, 3.0, field.height),
        Hazard::new(Position::new(370.0, 900.0), SIZES.hazard, 3.0, field.height),
    ];

    assert!(session.check_collisions(&mut craft, &mut hazards));
    assert!(!hazards[0].is_alive());
    assert!(hazards[1].is_alive());
    assert!(!craft.is_alive());
    assert_eq!(session.score(), 10);
}

#[test]
fn test_render_issues_expected_draw_commands() {
    let mut game = Game::with_seed(&GameConfig::default(), SIZES, 2);
    for _ in 0..30 {
        game.tick(IDLE);
    }
    game.apply(InputAction::Fire);

    let mut recorder = Recorder::default();
    game.render(&mut recorder);

    let offset = game.session().background_offset();
    assert_eq!(offset, 90.0);
    assert_eq!(
        &recorder.sprites[..2],
        &[
            (SpriteKind::Background, Position::new(0.0, -90.0)),
            (SpriteKind::Background, Position::new(0.0, 860.0)),
        ]
    );
    assert!(recorder.sprites.contains(&(SpriteKind::Starship, game.craft().position)));
    assert_eq!(
        recorder
            .sprites
            .iter()
            .filter(|(kind, _)| *kind == SpriteKind::Meteorite)
            .count(),
        1
    );
    assert_eq!(recorder.rects.len(), 2);
    assert_eq!(recorder.texts, vec!["Score: 0".to_string()]);
}

#[test]
fn test_game_over_screen_text() {
    let config = wall_config();
    let mut game = Game::with_seed(&config, wall_sizes(&config), 4);
    play_until_game_over(&mut game);

    let mut recorder = Recorder::default();
    game.render(&mut recorder);

    assert!(!recorder.sprites.iter().any(|(kind, _)| *kind == SpriteKind::Starship));
    assert!(recorder.texts.contains(&"GAME OVER!".to_string()));
    assert!(recorder.texts.contains(&"Final score: 0".to_string()));
    assert!(recorder.texts.contains(&"Press R to restart".to_string()));
}
