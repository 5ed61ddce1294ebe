use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::{Stdout, stdout};
use std::path::{Path, PathBuf};

use starship::{App, Game, GameConfig, GameRenderer, InputManager, SpriteSheet};

#[derive(Parser)]
#[command(name = "starship")]
#[command(about = "Steer the starship, shoot the meteorites, don't get hit")]
struct Args {
    /// JSON file overriding the default configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the meteorite stream; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes while the terminal is in use
    #[arg(long, default_value = "starship.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_file)?;

    // Everything that can fail on bad input happens before the terminal is taken over
    let config = GameConfig::load(args.config.as_deref())?;
    let sprites = SpriteSheet::load(&config)?;
    let sizes = sprites.entity_sizes(&config);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "Starting {}x{} at {} Hz, spawn every {} ticks, seed {seed}",
        config.screen_width, config.screen_height, config.tick_rate, config.spawn_interval
    );
    info!("Craft {:?}, meteorite {:?}", sizes.craft, sizes.hazard);

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    if supports_keyboard_enhancement {
        info!("Keyboard enhancement supported, tracking key releases");
    } else {
        warn!(
            "Keyboard enhancement not supported, keys count as held for {} ticks per press",
            config.key_hold_ticks
        );
    }

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    // Focus events let held keys be released when the window loses focus
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableFocusChange,
        SetTitle("Starship")
    )?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let app = App::new(
        Game::with_seed(&config, sizes, seed),
        InputManager::new(supports_keyboard_enhancement, config.key_hold_ticks),
        GameRenderer::new(sprites, config.field()),
        config.tick_interval(),
    );
    let result = app.run(&mut terminal);

    let restored = restore_terminal(&mut terminal, supports_keyboard_enhancement);
    result?;
    restored
}

/// Undoes the terminal setup. Every step runs even if an earlier one fails;
/// the first failure is reported.
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
) -> Result<()> {
    let popped = if keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw_mode = disable_raw_mode();
    let screen = execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    );
    let cursor = terminal.show_cursor();

    popped
        .and(raw_mode)
        .and(screen)
        .and(cursor)
        .wrap_err("failed to restore the terminal")
}

/// Sends log output to `path`; the terminal itself belongs to the game
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("STARSHIP_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}
