mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use glam::{Vec2, Vec3};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, SystemTime},
};
use webbrowser::Browser;

use plink::burst::Burst;
use plink::config::{Config, ConfigStore, FileConfigStore};
use plink::runtime::{CrosstermEventSource, PlinkEvent, Runner};
use plink::scene::{self, Camera, CROSSHAIR_PLANE_Z};
use plink::session::{Phase, Session};
use plink::spawner::{self, Target};
use plink::stats::{Outcome, Summary};
use plink::tier::Tier;
use plink::TICK_RATE_MS;

/// terminal aim trainer: pop spheres in a braille-drawn 3d scene
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
struct Cli {
    /// difficulty tier to preselect
    #[clap(short = 't', long, value_enum)]
    tier: Option<Tier>,

    /// drill length in seconds
    #[clap(short = 's', long)]
    seconds: Option<u64>,
}

/// Binary-side controller: owns the session, the live target, and the
/// cosmetic state the renderer reads.
#[derive(Debug)]
struct App {
    session: Session,
    target: Target,
    burst: Burst,
    crosshair: Vec3,
    duration_secs: f64,
    /// Digits typed so far in custom-seconds entry; `None` when inactive.
    entry: Option<String>,
    notice: Option<String>,
    /// Scene canvas rectangle from the last draw. Click hit-testing uses
    /// this, so it must come from `ui::scene_viewport`.
    viewport: Rect,
    config: Config,
}

impl App {
    fn new(cli: &Cli, config: Config, now: SystemTime) -> Self {
        let mut session = Session::new(now);
        let mut notice = None;
        if let Some(tier) = cli.tier {
            session.select_tier(tier);
            notice = Some(config.params_for(tier).blurb);
        }

        // A zero-second drill makes no sense; fall back quietly.
        let duration_secs = cli
            .seconds
            .filter(|secs| *secs > 0)
            .unwrap_or(config.default_duration_secs) as f64;

        let spawn_tier = session.tier().unwrap_or(Tier::Standard);
        let target = spawner::spawn_target(&config.params_for(spawn_tier));

        Self {
            session,
            target,
            burst: Burst::new(),
            crosshair: Vec3::new(0.0, 0.0, CROSSHAIR_PLANE_Z),
            duration_secs,
            entry: None,
            notice,
            viewport: Rect::default(),
            config,
        }
    }

    /// Camera whose aspect tracks the braille dot grid of the viewport.
    fn camera_for(viewport: Rect) -> Camera {
        Camera::new(scene::canvas_aspect(viewport.width, viewport.height))
    }

    fn respawn_target(&mut self) {
        let tier = self.session.tier().unwrap_or(Tier::Standard);
        self.target = spawner::spawn_target(&self.config.params_for(tier));
    }

    fn on_tick(&mut self, now: SystemTime) {
        self.session.tick(now);
        self.burst.on_tick();
    }

    /// Handles one key event. Returns true when the app should quit.
    fn on_key(&mut self, key: KeyEvent, now: SystemTime) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.entry.is_some() {
            self.on_entry_key(key.code);
            return false;
        }

        if self.session.is_running() {
            return self.on_running_key(key.code, now);
        }
        if matches!(self.session.phase(), Phase::Ended(_)) {
            return self.on_summary_key(key.code, now);
        }
        self.on_idle_key(key.code, now)
    }

    fn on_idle_key(&mut self, code: KeyCode, now: SystemTime) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('e') => self.select_tier(Tier::Easy),
            KeyCode::Char('m') => self.select_tier(Tier::Medium),
            KeyCode::Char('h') => self.select_tier(Tier::Hard),
            KeyCode::Char('1') => self.set_duration(30.0),
            KeyCode::Char('2') => self.set_duration(60.0),
            KeyCode::Char('3') => self.set_duration(120.0),
            KeyCode::Char('c') => {
                self.entry = Some(String::new());
                self.notice = None;
            }
            KeyCode::Char('s') | KeyCode::Enter => self.start_drill(now),
            KeyCode::Char('r') => self.reset(now),
            _ => {}
        }
        false
    }

    fn on_running_key(&mut self, code: KeyCode, now: SystemTime) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') => self.reset(now),
            _ => {}
        }
        false
    }

    fn on_summary_key(&mut self, code: KeyCode, now: SystemTime) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => self.acknowledge(now),
            KeyCode::Char('a') => self.run_again(now),
            KeyCode::Char('t') => self.share(),
            _ => {}
        }
        false
    }

    fn on_entry_key(&mut self, code: KeyCode) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => entry.push(c),
            KeyCode::Backspace => {
                entry.pop();
            }
            KeyCode::Enter => {
                // Empty, zero, or overlong entries are dropped without comment.
                if let Ok(secs) = entry.parse::<u64>() {
                    if secs > 0 {
                        self.set_duration(secs as f64);
                    }
                }
                self.entry = None;
            }
            KeyCode::Esc => self.entry = None,
            _ => {}
        }
    }

    fn select_tier(&mut self, tier: Tier) {
        if self.session.select_tier(tier) {
            self.notice = Some(self.config.params_for(tier).blurb);
            self.respawn_target();
        }
    }

    fn set_duration(&mut self, secs: f64) {
        self.duration_secs = secs;
        self.notice = Some(format!("drill length set to {}s", secs as u64));
    }

    fn start_drill(&mut self, now: SystemTime) {
        match self.session.start(self.duration_secs, now) {
            Ok(()) => {
                self.notice = None;
                self.respawn_target();
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn reset(&mut self, now: SystemTime) {
        self.session.reset(now);
        self.entry = None;
        self.notice = None;
        self.respawn_target();
    }

    fn acknowledge(&mut self, now: SystemTime) {
        if self.session.acknowledge(now) {
            self.respawn_target();
        }
    }

    /// Same tier and length as the drill whose summary is on screen.
    fn run_again(&mut self, now: SystemTime) {
        let tier = self.session.tier();
        self.session.acknowledge(now);
        if let Some(tier) = tier {
            self.session.select_tier(tier);
        }
        self.start_drill(now);
    }

    fn share(&self) {
        if !Browser::is_available() {
            return;
        }
        if let Phase::Ended(summary) = self.session.phase() {
            webbrowser::open(&share_url(summary)).unwrap_or_default();
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent, now: SystemTime) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.on_mouse_move(mouse.column, mouse.row);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.on_mouse_move(mouse.column, mouse.row);
                self.on_shot(mouse.column, mouse.row, now);
            }
            _ => {}
        }
    }

    fn on_mouse_move(&mut self, column: u16, row: u16) {
        let Some(ndc) = self.cell_ndc(column, row) else {
            return;
        };
        let camera = App::camera_for(self.viewport);
        let (origin, dir) = scene::pointer_ray(&camera, ndc);
        if let Some(point) = scene::ray_plane_z(origin, dir, CROSSHAIR_PLANE_Z) {
            self.crosshair = point;
        }
    }

    fn on_shot(&mut self, column: u16, row: u16, now: SystemTime) {
        // The summary screen has no scene; stray clicks there change nothing.
        if matches!(self.session.phase(), Phase::Ended(_)) {
            return;
        }
        let Some(ndc) = self.cell_ndc(column, row) else {
            return;
        };
        let camera = App::camera_for(self.viewport);
        let (origin, dir) = scene::pointer_ray(&camera, ndc);

        if scene::ray_sphere(origin, dir, self.target.position, self.target.radius()).is_some() {
            self.session.record_shot(Outcome::Hit, now);
            if let Some(center) = scene::world_to_ndc(&camera, self.target.position) {
                let aspect = camera.aspect as f64;
                self.burst.emit(center.x as f64 * aspect, center.y as f64);
            }
            self.respawn_target();
        } else {
            self.session.record_shot(Outcome::Miss, now);
        }
    }

    /// NDC of a cell's center, or `None` for cells outside the canvas.
    fn cell_ndc(&self, column: u16, row: u16) -> Option<Vec2> {
        let vp = self.viewport;
        if vp.width == 0 || vp.height == 0 {
            return None;
        }
        if column < vp.x || column >= vp.x + vp.width || row < vp.y || row >= vp.y + vp.height {
            return None;
        }
        let px = (column - vp.x) as f32 + 0.5;
        let py = (row - vp.y) as f32 + 0.5;
        Some(scene::pointer_ndc(px, py, vp.width as f32, vp.height as f32))
    }
}

fn share_url(summary: &Summary) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}%20hits%20%2F%20{}%25%20acc%20%2F%20{:.0}%20shots%2Fmin",
        summary.final_score,
        summary.accuracy_percent.round(),
        summary.shots_per_minute
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli, config, SystemTime::now());
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(Duration::from_millis(
        TICK_RATE_MS,
    )));

    redraw(terminal, app)?;

    while let Some(event) = runner.step() {
        match event {
            PlinkEvent::Tick => {
                let was_running = app.session.is_running();
                app.on_tick(SystemTime::now());

                // The run-ending tick must still draw, or the summary would
                // wait for the next keypress to appear.
                if was_running || !app.burst.is_empty() {
                    redraw(terminal, app)?;
                }
            }
            PlinkEvent::Resize => {
                redraw(terminal, app)?;
            }
            PlinkEvent::Mouse(mouse) => {
                app.on_mouse(mouse, SystemTime::now());
                redraw(terminal, app)?;
            }
            PlinkEvent::Key(key) => {
                if app.on_key(key, SystemTime::now()) {
                    break;
                }
                redraw(terminal, app)?;
            }
        }
    }

    Ok(())
}

fn redraw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    terminal.draw(|f| {
        app.viewport = ui::scene_viewport(f.area());
        ui::draw(app, f);
    })?;
    Ok(())
}
