mod display;

use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use invader_shop::assets::{self, Assets};
use invader_shop::config::{Rules, Tally};
use invader_shop::error::GameError;
use invader_shop::game::{Game, Outcome};

use display::TerminalBackend;

/// Shoot down descending invaders, grab power-ups and spend the loot in the shop.
///
/// ← → / A D move, SPACE fires, S opens the shop (1/2/3 buy, Q leaves it),
/// click the icons at the top right to mute music or sound, ESC quits.
#[derive(Parser)]
#[command(name = "invader_shop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the sprite and sound files
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Seed for enemy and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// How a collision step counts several simultaneous hits
    #[arg(long, value_enum, default_value = "per-hit")]
    tally: TallyArg,

    /// Only collect power-ups in frames where an enemy bullet also hits
    #[arg(long)]
    coupled_power_ups: bool,

    /// Write log records to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TallyArg {
    /// Every enemy, bullet or power-up consumed counts
    PerHit,
    /// Each collision step counts at most once per frame
    PerFrame,
}

impl From<TallyArg> for Tally {
    fn from(arg: TallyArg) -> Self {
        match arg {
            TallyArg::PerHit => Tally::PerHit,
            TallyArg::PerFrame => Tally::PerFrame,
        }
    }
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("invader_shop: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(Outcome::GameOver) => {
            println!("Game Over");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Quit) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("invader_shop: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome, GameError> {
    let (tx, rx) = mpsc::channel::<Event>();
    let mut backend = TerminalBackend::new(BufWriter::new(stdout()), rx)?;

    // Load before touching the terminal so diagnostics stay readable.
    let assets = Assets::load(&mut backend, &cli.assets)?;
    let music = assets::start_music(&mut backend, &cli.assets);

    let rules = Rules {
        tally: cli.tally.into(),
        coupled_power_ups: cli.coupled_power_ups,
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    spawn_input_thread(tx);

    let result = Game::new(backend, assets, rules, rng).with_music(music).run();

    // Always restore the terminal
    restore_terminal(&mut out, keyboard_enhanced);

    result
}

/// Dedicate a thread exclusively to blocking event reads, sending them
/// through a channel so the game loop never has to block on I/O.
fn spawn_input_thread(tx: mpsc::Sender<Event>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {e}");
                break;
            }
        }
    });
}

fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
