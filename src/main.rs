use crossterm::event::{self, DisableFocusChange, EnableFocusChange};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use urlsnake::core::constants::{FRAME_POLL_MS, LOG_FILE, TITLE_MIN_INTERVAL_MS};
use urlsnake::display::{DisplaySink, FallbackSink, MemorySink, TitleSink};
use urlsnake::high_score::{JsonFileStore, MemoryStore, ScoreBoard, ScoreStore};
use urlsnake::input::map_event;
use urlsnake::ui::{render_snake_scene, SceneView};
use urlsnake::utils::build_info::version_line;
use urlsnake::utils::persistence::save_path;
use urlsnake::{Engine, GameConfig, GameLoop};

#[cfg(feature = "web")]
type WebHandle = std::sync::Arc<urlsnake::web::WebServer>;
#[cfg(not(feature = "web"))]
type WebHandle = std::convert::Infallible;

/// Command-line options.
#[derive(Debug, Default)]
struct CliOptions {
    seed: Option<u64>,
    serve: Option<u16>,
    reset_score: bool,
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = CliOptions::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                options.seed = match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(seed) => Some(seed),
                    None => usage_error("--seed requires a number"),
                };
            }
            "--serve" => options.serve = Some(urlsnake::core::DEFAULT_WEB_PORT),
            arg if arg.starts_with("--serve=") => {
                options.serve = match arg["--serve=".len()..].parse() {
                    Ok(port) => Some(port),
                    Err(_) => usage_error("--serve=PORT requires a port number"),
                };
            }
            "--reset-score" => options.reset_score = true,
            "--version" | "-v" => {
                println!("{}", version_line("urlsnake"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    options
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'urlsnake --help' for usage.");
    std::process::exit(1);
}

fn print_usage() {
    println!(
        "urlsnake - snake in your address bar\n\
         \n\
         Usage: urlsnake [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N          Seed food placement for a reproducible game\n\
         \x20 --serve[=PORT]    Also serve the browser client (needs the `web` feature, default port 3000)\n\
         \x20 --reset-score     Forget the saved high score and exit\n\
         \x20 --version, -v     Show version information\n\
         \x20 --help, -h        Show this help"
    );
}

/// Log to ~/.urlsnake/urlsnake.log; the terminal belongs to the game.
/// Set `RUST_LOG` to change the level.
fn init_tracing() {
    let file = save_path(LOG_FILE)
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path));
    if let Ok(file) = file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
}

/// The on-disk store, or an in-memory one if the home directory is unusable.
fn open_score_store() -> Box<dyn ScoreStore> {
    match JsonFileStore::in_data_dir() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(%err, "high scores will not survive this session");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(feature = "web")]
fn start_web(port: Option<u16>) -> io::Result<Option<WebHandle>> {
    port.map(urlsnake::web::spawn_web_server).transpose()
}

#[cfg(not(feature = "web"))]
fn start_web(port: Option<u16>) -> io::Result<Option<WebHandle>> {
    if port.is_some() {
        usage_error("urlsnake was built without the `web` feature; --serve is unavailable");
    }
    Ok(None)
}

fn main() -> io::Result<()> {
    let options = parse_args();
    init_tracing();

    let config = GameConfig::default();
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine =
        Engine::new(config, rng).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut scores = ScoreBoard::open(open_score_store());

    if options.reset_score {
        scores.reset()?;
        println!("High score cleared.");
        return Ok(());
    }

    let mut game = GameLoop::new(engine, scores);
    let web = start_web(options.serve)?;
    info!(seed = ?options.seed, best = game.scores().best().best_score, "starting urlsnake");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run_game(&mut terminal, &mut game, web);

    // Restore terminal even if the game loop failed
    if let Err(err) = terminal.show_cursor() {
        tracing::error!(%err, "failed to show cursor");
    }
    if let Err(err) = terminal.backend_mut().execute(DisableFocusChange) {
        tracing::error!(%err, "failed to disable focus events");
    }
    if let Err(err) = terminal.backend_mut().execute(LeaveAlternateScreen) {
        tracing::error!(%err, "failed to leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        tracing::error!(%err, "failed to disable raw mode");
    }

    info!(
        runs = game.runs_finished(),
        best = game.scores().best().best_score,
        "urlsnake exiting"
    );
    result
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut GameLoop<StdRng>,
    web: Option<WebHandle>,
) -> io::Result<()> {
    let mut title = FallbackSink::new(
        TitleSink::new(io::stdout(), Duration::from_millis(TITLE_MIN_INTERVAL_MS)),
        MemorySink::new(),
    );
    #[cfg(feature = "web")]
    let mut web_sink = web.clone().map(urlsnake::web::BroadcastSink::new);
    #[cfg(feature = "web")]
    let web_port = web.as_ref().map(|server| server.port());
    #[cfg(not(feature = "web"))]
    let web_port = web.map(|never| match never {});

    let mut address = game.frame().text;

    loop {
        if let Some(result) = game.poll(Instant::now()) {
            if let Err(err) = title.show(&result.frame) {
                debug!(%err, "frame not displayed");
            }
            #[cfg(feature = "web")]
            if let Some(sink) = web_sink.as_mut() {
                if let Err(err) = sink.show(&result.frame) {
                    debug!(%err, "frame not sent to browsers");
                }
            }
            address = result.frame.text;
        }

        terminal.draw(|f| {
            let view = SceneView::from_loop(game, &address, title.fallbacks(), web_port);
            render_snake_scene(f, f.size(), &view);
        })?;

        #[cfg(feature = "web")]
        if let Some(server) = web.as_ref() {
            for action in server.drain_actions() {
                game.apply(action);
            }
        }

        let timeout = game
            .time_until_due(Instant::now())
            .min(Duration::from_millis(FRAME_POLL_MS));
        if event::poll(timeout)? {
            if let Some(action) = map_event(&event::read()?) {
                if !game.apply(action) {
                    return Ok(());
                }
            }
        }
    }
}
