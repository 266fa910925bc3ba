/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only translates
/// state into terminal commands. The 960×540 camera window is squeezed into
/// whatever cell grid the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use run_and_gun::boss::health_fraction;
use run_and_gun::constants::{VIEW_HEIGHT, VIEW_WIDTH};
use run_and_gun::enemies::{boss_of, is_alive};
use run_and_gun::entities::{
    EnemyKind, GameState, GameStatus, Hazard, HazardKind, PickupKind, ProjectileKind,
};
use run_and_gun::geometry::Rect;
use run_and_gun::hazards::{is_active, lava_column};
use run_and_gun::highscore::HighScoreTable;
use run_and_gun::store::{listing, StoreItem};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Red;
const C_PLATFORM: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HURT: Color = Color::DarkGrey;
const C_WALKER: Color = Color::Green;
const C_THROWER: Color = Color::Cyan;
const C_BOSS: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_PROJECTILE: Color = Color::Magenta;
const C_GOLD: Color = Color::Yellow;
const C_STAR: Color = Color::White;
const C_HAZARD: Color = Color::DarkRed;
const C_HAZARD_IDLE: Color = Color::DarkGrey;
const C_EFFECT: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "←→/AD move  W jump  S crouch  SPACE/Z/mouse fire  mouse or J/I/L aim  Q quit";

// ── Cell grid ─────────────────────────────────────────────────────────────────

/// Maps the camera window onto the terminal rows between the HUD (row 0)
/// and the hint line (last row).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    fn scale_x(&self) -> f32 {
        VIEW_WIDTH / self.cols.max(1) as f32
    }

    fn scale_y(&self) -> f32 {
        VIEW_HEIGHT / self.play_rows() as f32
    }

    /// World coordinates under a terminal cell, used for mouse aiming.
    pub fn screen_to_world(&self, camera_x: f32, col: u16, row: u16) -> (f32, f32) {
        let x = camera_x + (col as f32 + 0.5) * self.scale_x();
        let y = (row.saturating_sub(1) as f32 + 0.5) * self.scale_y();
        (x, y)
    }
}

struct Canvas {
    vp: Viewport,
    camera_x: f32,
    cells: Vec<(char, Color)>,
}

impl Canvas {
    fn new(vp: Viewport, camera_x: f32) -> Self {
        let len = vp.cols as usize * vp.play_rows() as usize;
        Self {
            vp,
            camera_x,
            cells: vec![(' ', Color::Reset); len],
        }
    }

    fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = ((x - self.camera_x) / self.vp.scale_x()).floor();
        let row = (y / self.vp.scale_y()).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.vp.cols as usize || row >= self.vp.play_rows() as usize {
            return None;
        }
        Some((col, row))
    }

    fn put(&mut self, x: f32, y: f32, ch: char, color: Color) {
        if let Some((col, row)) = self.cell_of(x, y) {
            let idx = row * self.vp.cols as usize + col;
            self.cells[idx] = (ch, color);
        }
    }

    /// Fill every cell a rectangle touches; tiny rectangles still get one cell.
    fn fill(&mut self, rect: &Rect, ch: char, color: Color) {
        let sx = self.vp.scale_x();
        let sy = self.vp.scale_y();
        let mut y = rect.y;
        loop {
            let mut x = rect.x;
            loop {
                self.put(x, y, ch, color);
                x += sx;
                if x >= rect.right() {
                    break;
                }
            }
            y += sy;
            if y >= rect.bottom() {
                break;
            }
        }
    }

    fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let cols = self.vp.cols as usize;
        for (row, line) in self.cells.chunks(cols).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16 + 1))?;
            let mut current = None;
            for &(ch, color) in line {
                if current != Some(color) {
                    out.queue(style::SetForegroundColor(color))?;
                    current = Some(color);
                }
                out.queue(Print(ch))?;
            }
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame, plus the store or end-of-run overlay.
pub fn render<W: Write>(
    out: &mut W,
    vp: Viewport,
    state: &GameState,
    notice: Option<&str>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut canvas = Canvas::new(vp, state.camera_x);
    draw_world(&mut canvas, state);
    canvas.flush(out)?;

    draw_hud(out, vp, state)?;
    draw_hint(out, vp)?;

    match state.status {
        GameStatus::StoreOpen => draw_store(out, vp, state, notice)?,
        GameStatus::Victory | GameStatus::Defeat => draw_game_over(out, vp, state)?,
        GameStatus::Playing => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_world(canvas: &mut Canvas, state: &GameState) {
    for (i, platform) in state.platforms.iter().enumerate() {
        let ch = if i == 0 { '▓' } else { '▀' };
        canvas.fill(platform, ch, C_PLATFORM);
    }

    for hazard in &state.hazards {
        draw_hazard(canvas, hazard);
    }

    for pickup in &state.pickups {
        let (ch, color) = match pickup.kind {
            PickupKind::Gold => ('$', C_GOLD),
            PickupKind::Star => ('★', C_STAR),
        };
        canvas.put(pickup.body.center_x(), pickup.body.center_y(), ch, color);
    }

    for enemy in state.enemies.iter().filter(|e| is_alive(e)) {
        let (ch, color) = match enemy.kind {
            EnemyKind::Walker { .. } => ('w', C_WALKER),
            EnemyKind::Thrower { .. } => ('t', C_THROWER),
            EnemyKind::Boss(_) => ('B', C_BOSS),
        };
        canvas.fill(&enemy.body, ch, color);
    }

    for effect in &state.death_effects {
        for p in effect.particles.iter().filter(|p| p.life > 0.0) {
            canvas.put(effect.x + p.x, effect.y + p.y, '·', C_EFFECT);
        }
    }

    for bullet in &state.bullets {
        canvas.put(bullet.body.center_x(), bullet.body.center_y(), '•', C_BULLET);
    }

    for p in &state.boss_projectiles {
        canvas.put(p.body.center_x(), p.body.center_y(), projectile_glyph(p.kind), C_PROJECTILE);
    }

    let player = &state.player;
    // Blink while invincible.
    let color = if player.invincible > 0 && (player.invincible / 6) % 2 == 0 {
        C_PLAYER_HURT
    } else {
        C_PLAYER
    };
    canvas.fill(&player.body, '@', color);
    let muzzle_x = player.body.center_x() + player.aim_angle.cos() * 30.0;
    let muzzle_y = player.body.center_y() + player.aim_angle.sin() * 30.0;
    canvas.put(muzzle_x, muzzle_y, '+', C_PLAYER);
}

fn draw_hazard(canvas: &mut Canvas, hazard: &Hazard) {
    let active = is_active(hazard);
    let ch = match hazard.kind {
        HazardKind::Sand(_) => '~',
        HazardKind::Vine(_) => '§',
        HazardKind::IceSpike(_) => '^',
        HazardKind::Steam(_) => '░',
        HazardKind::Stalactite { .. } => 'V',
        HazardKind::GearTrap { .. } => '✲',
        HazardKind::Lava(_) => '≈',
    };
    let color = if active { C_HAZARD } else { C_HAZARD_IDLE };
    // Idle steam and vines are invisible apart from their base.
    match hazard.kind {
        HazardKind::Steam(_) | HazardKind::Vine(_) if !active => {
            let base = Rect::new(hazard.body.x, hazard.body.bottom() - 1.0, hazard.body.width, 1.0);
            canvas.fill(&base, '.', color);
        }
        _ => canvas.fill(&hazard.body, ch, color),
    }
    if let Some(column) = lava_column(hazard) {
        canvas.fill(&column, '█', C_HAZARD);
    }
}

fn projectile_glyph(kind: ProjectileKind) -> char {
    match kind {
        ProjectileKind::Knife => '/',
        ProjectileKind::Axe => 'x',
        ProjectileKind::Egg => 'o',
        ProjectileKind::Ghost => 'g',
        ProjectileKind::Ink => '%',
        ProjectileKind::Coin => 'c',
        ProjectileKind::IceShard => '*',
        ProjectileKind::Gear => '¤',
        ProjectileKind::LavaFireball => '●',
        ProjectileKind::Generic => '∙',
    }
}

// ── HUD (row 0) and hint (last row) ───────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score:{:>7}  Gold:{:>5}  Level:{}  Gun:{}{}",
        state.score,
        state.player.gold,
        state.level,
        state.player.gun.name(),
        if state.player.has_armor { " +Armor" } else { "" },
    )))?;

    // HP and boss bar, right-aligned
    let mut right = format!("HP:{:>4}", state.hp.max(0));
    if let Some(boss) = boss_of(&state.enemies).filter(|b| is_alive(b)) {
        let width = 12usize;
        let filled = (health_fraction(boss) * width as f32).round() as usize;
        right = format!("Boss[{}{}]  {}", "█".repeat(filled), "░".repeat(width - filled), right);
    }
    let x = vp.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(right))?;
    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT.chars().take(vp.cols.saturating_sub(2) as usize).collect::<String>()))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centred box of lines.
fn draw_box<W: Write>(out: &mut W, vp: Viewport, lines: &[(String, Color)]) -> std::io::Result<()> {
    let inner = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) + 2;
    let top = format!("╔{}╗", "═".repeat(inner));
    let bottom = format!("╚{}╝", "═".repeat(inner));
    let width = inner as u16 + 2;
    let cx = (vp.cols / 2).saturating_sub(width / 2);
    let start = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2 + 1);

    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(cursor::MoveTo(cx, start))?;
    out.queue(Print(&top))?;
    for (i, (line, color)) in lines.iter().enumerate() {
        let pad = inner - line.chars().count();
        out.queue(cursor::MoveTo(cx, start + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("║ "))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{}{}", line, " ".repeat(pad - 1))))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("║"))?;
    }
    out.queue(cursor::MoveTo(cx, start + 1 + lines.len() as u16))?;
    out.queue(Print(&bottom))?;
    Ok(())
}

fn draw_store<W: Write>(
    out: &mut W,
    vp: Viewport,
    state: &GameState,
    notice: Option<&str>,
) -> std::io::Result<()> {
    let mut lines = vec![
        (format!("LEVEL {} CLEAR!", state.level), Color::Yellow),
        (format!("Time bonus: {}", state.last_time_bonus), Color::Yellow),
        (format!("Gold: {}", state.player.gold), C_GOLD),
        (String::new(), Color::White),
    ];
    for (i, entry) in listing(state).iter().enumerate() {
        let status = match entry.item {
            StoreItem::Armor if entry.owned => "Owned".to_string(),
            StoreItem::Gun(_) if entry.equipped => "Equipped".to_string(),
            StoreItem::Gun(_) if entry.owned => "Equip".to_string(),
            _ => format!("Buy {:>4}g", entry.price),
        };
        let color = if entry.owned || entry.affordable {
            Color::White
        } else {
            Color::DarkGrey
        };
        lines.push((format!("[{}] {:<12} {}", i + 1, entry.name, status), color));
    }
    lines.push((String::new(), Color::White));
    if let Some(notice) = notice {
        lines.push((notice.to_string(), Color::Red));
    }
    let next = if run_and_gun::level::is_final_level(state.level) {
        "ENTER - Complete Adventure"
    } else {
        "ENTER - Continue to Next Level"
    };
    lines.push((next.to_string(), Color::Green));
    draw_box(out, vp, &lines)
}

fn draw_game_over<W: Write>(out: &mut W, vp: Viewport, state: &GameState) -> std::io::Result<()> {
    let (title, color) = if state.status == GameStatus::Victory {
        ("VICTORY!", Color::Yellow)
    } else {
        ("GAME OVER", Color::Red)
    };
    let lines = vec![
        (title.to_string(), color),
        (format!("Final score: {}", state.score), Color::Yellow),
        (String::new(), Color::White),
        ("ENTER - Continue   Q - Quit".to_string(), Color::White),
    ];
    draw_box(out, vp, &lines)
}

/// Title screen with the high score table.
pub fn render_menu<W: Write>(
    out: &mut W,
    vp: Viewport,
    scores: &HighScoreTable,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut lines = vec![
        ("★  RUN & GUN  ★".to_string(), Color::Cyan),
        (String::new(), Color::White),
        ("ENTER - Start   Q - Quit".to_string(), Color::White),
        (String::new(), Color::White),
        ("HIGH SCORES".to_string(), Color::Yellow),
    ];
    if scores.entries().is_empty() {
        lines.push(("(none yet)".to_string(), Color::DarkGrey));
    }
    for (i, entry) in scores.entries().iter().enumerate() {
        lines.push((
            format!("{:>2}. {:<3} {:>8}", i + 1, entry.initials, entry.score),
            Color::White,
        ));
    }
    draw_box(out, vp, &lines)?;
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Arcade initials prompt shown when a finished run makes the table.
pub fn render_initials<W: Write>(
    out: &mut W,
    vp: Viewport,
    score: u32,
    typed: &str,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let shown: String = typed.chars().chain(std::iter::repeat('_')).take(3).collect();
    let lines = vec![
        ("NEW HIGH SCORE!".to_string(), Color::Yellow),
        (format!("Score: {}", score), Color::Yellow),
        (String::new(), Color::White),
        (format!("Initials: {}", shown), Color::White),
        ("Type A-Z, ENTER to save".to_string(), Color::DarkGrey),
    ];
    draw_box(out, vp, &lines)?;
    out.queue(style::ResetColor)?;
    out.flush()
}
