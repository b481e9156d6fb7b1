use bracket_lib::prelude::*;
use common::{Rect, Vec2};
use ui::{ColorPalette, CONSOLE_HEIGHT, CONSOLE_WIDTH};
use world::{FishingScene, LandScene, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::machine::Game;
use crate::mode::{FishingSession, MapVoyage, ModeState};

const PROMPT_Y: i32 = 36;

/// Converts a logical screen position to a console cell.
fn to_cell(pos: Vec2) -> (i32, i32) {
    let x = (pos.x / SCREEN_WIDTH * CONSOLE_WIDTH as f32).floor() as i32;
    let y = (pos.y / SCREEN_HEIGHT * CONSOLE_HEIGHT as f32).floor() as i32;
    (x.clamp(0, CONSOLE_WIDTH - 1), y.clamp(0, CONSOLE_HEIGHT - 1))
}

fn fill_rect(ctx: &mut BTerm, area: Rect, glyph: char, fg: RGB) {
    let (x0, y0) = to_cell(Vec2::new(area.x, area.y));
    let (x1, y1) = to_cell(Vec2::new(area.right(), area.bottom()));
    for y in y0..y1.max(y0 + 1) {
        for x in x0..x1.max(x0 + 1) {
            ctx.set(x, y, fg, RGB::named(BLACK), to_cp437(glyph));
        }
    }
}

/// Draws the whole frame for the active mode.
pub fn draw(ctx: &mut BTerm, game: &Game, palette: &ColorPalette) {
    ctx.cls();
    match game.state() {
        ModeState::MainMenu(menu)
        | ModeState::Shop(menu)
        | ModeState::Market(menu)
        | ModeState::Inventory(menu) => {
            ui::draw_menu(ctx, menu, palette).ok();
        }
        ModeState::LandExplore(scene) => draw_land(ctx, scene, palette),
        ModeState::MapExplore(voyage) => draw_sea_map(ctx, game, voyage, palette),
        ModeState::Fishing(session) => draw_fishing(ctx, session, game.fishing_scene(), palette),
    }
    game.ui().draw_status(ctx, game.ledger()).ok();
    game.ui().draw_logs(ctx).ok();
}

fn draw_land(ctx: &mut BTerm, scene: &LandScene, palette: &ColorPalette) {
    fill_rect(ctx, scene.bounds(), '.', palette.land);
    for (spot, area) in scene.hotspots() {
        let glyph = match spot {
            world::Hotspot::House => '#',
            world::Hotspot::Boat => '=',
        };
        fill_rect(ctx, *area, glyph, palette.highlight);
    }
    let (px, py) = to_cell(scene.player().center());
    ctx.set(px, py, palette.player, RGB::named(BLACK), to_cp437('@'));
    if let Some(spot) = scene.active() {
        ctx.print_color_centered(
            PROMPT_Y,
            palette.highlight,
            RGB::named(BLACK),
            format!("[Enter] {}", spot.prompt()),
        );
    }
}

fn draw_sea_map(ctx: &mut BTerm, game: &Game, voyage: &MapVoyage, palette: &ColorPalette) {
    fill_rect(ctx, game.sea_map().limits(), '~', palette.deep);
    for spot in game.sea_map().spots() {
        let color = if game.ledger().is_unlocked(&spot.location) {
            palette.highlight
        } else {
            palette.locked
        };
        fill_rect(ctx, spot.area, '+', color);
        let (x, y) = to_cell(spot.area.center());
        let label_x = (x - spot.label.len() as i32 / 2).max(0);
        ctx.print_color(label_x, y, color, RGB::named(BLACK), &spot.label);
    }
    let (bx, by) = to_cell(voyage.position);
    ctx.set(bx, by, palette.player, RGB::named(BLACK), to_cp437('@'));
    let prompt = voyage
        .active
        .as_ref()
        .and_then(|id| game.catalog().get(id))
        .map(|location| {
            if game.ledger().is_unlocked(&location.id) {
                format!("[Enter] Fish at {}", location.display_name)
            } else {
                format!(
                    "[Enter] Unlock {} for {} coins",
                    location.display_name, location.unlock_cost
                )
            }
        });
    if let Some(prompt) = prompt {
        ctx.print_color_centered(PROMPT_Y, palette.highlight, RGB::named(BLACK), prompt);
    }
}

/// Console row of the hook for the current depth.
fn hook_row(scene: &FishingScene, depth: f32, max_depth: f32) -> i32 {
    let ratio = if max_depth > 0.0 {
        (depth / max_depth).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (_, top) = to_cell(Vec2::new(0.0, scene.water.y));
    let (_, bottom) = to_cell(Vec2::new(0.0, scene.water.bottom()));
    top + ((bottom - 1 - top) as f32 * ratio).round() as i32
}

fn draw_fishing(ctx: &mut BTerm, session: &FishingSession, scene: &FishingScene, palette: &ColorPalette) {
    fill_rect(ctx, scene.water, '~', palette.shallow);
    fill_rect(ctx, scene.dock, '_', palette.land);
    for fish in session.ambient_fish() {
        let (x, y) = to_cell(fish.position);
        let glyph = if fish.direction < 0.0 { '<' } else { '>' };
        ctx.set(x, y, palette.fish, RGB::named(BLACK), to_cp437(glyph));
    }

    let encounter = session.encounter();
    let (bx, _) = to_cell(Vec2::new(session.boat_x(), 0.0));
    let (_, surface) = to_cell(Vec2::new(0.0, scene.water.y));
    ctx.set(bx, surface - 1, palette.player, RGB::named(BLACK), to_cp437('B'));
    if !encounter.is_idle() {
        let hook = hook_row(scene, encounter.depth(), encounter.max_depth());
        for y in surface..hook {
            ctx.set(bx, y, RGB::named(WHITE), RGB::named(BLACK), to_cp437('|'));
        }
        ctx.set(bx, hook, RGB::named(WHITE), RGB::named(BLACK), to_cp437('J'));
    }

    ctx.print(1, 2, format!("{} - {}", session.location().display_name, encounter.phase_name()));
    ctx.print(
        1,
        3,
        format!(
            "Depth {} {:.0}/{:.0}",
            ui::meter_string(encounter.depth(), encounter.max_depth(), 20),
            encounter.depth(),
            encounter.max_depth()
        ),
    );
    if let (Some(species), Some(left)) = (encounter.hooked_species(), encounter.challenge_remaining()) {
        ctx.print_color_centered(
            PROMPT_Y,
            palette.highlight,
            RGB::named(BLACK),
            format!(
                "{} ({}) on the hook! Hold confirm: {:.1}s",
                species.name,
                species.rarity.label(),
                left
            ),
        );
    }
}
