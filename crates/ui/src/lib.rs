//! Menus, the message log and text-console drawing helpers.
use bracket_lib::prelude::{BTerm, BLACK, CYAN, GRAY, GREEN, NAVY, ORANGE, RED, RGB, WHITE, YELLOW};
use common::GameResult;
use ledger::Ledger;

mod menu;

pub use menu::{
    inventory_menu, inventory_options, main_menu, market_menu, market_options, shop_menu,
    shop_options, Menu, MenuAction, MenuOption,
};

/// Console size in cells.
pub const CONSOLE_WIDTH: i32 = 80;
pub const CONSOLE_HEIGHT: i32 = 45;

const LOG_Y: i32 = 38;
const LOG_WINDOW: i32 = 6;
const MAX_LOGS: usize = 100;
const MENU_TITLE_Y: i32 = 8;
const MENU_OPTIONS_Y: i32 = 13;

/// UI layout type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UILayout {
    /// Full screen menu.
    Menu,
    /// Walking on the island or sailing the sea map.
    Explore,
    /// The fishing scene.
    Fishing,
}

/// Color palette for scene rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub land: RGB,
    pub shallow: RGB,
    pub deep: RGB,
    pub player: RGB,
    pub fish: RGB,
    pub highlight: RGB,
    pub locked: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            land: RGB::named(GRAY),
            shallow: RGB::named(CYAN),
            deep: RGB::named(NAVY),
            player: RGB::named(YELLOW),
            fish: RGB::named(GREEN),
            highlight: RGB::named(YELLOW),
            locked: RGB::named(RED),
        }
    }
}

impl ColorPalette {
    /// Returns a high contrast palette suitable for colorblind players.
    pub fn colorblind() -> Self {
        Self {
            land: RGB::named(WHITE),
            shallow: RGB::named(YELLOW),
            deep: RGB::named(GRAY),
            player: RGB::named(WHITE),
            fish: RGB::named(RED),
            highlight: RGB::named(WHITE),
            locked: RGB::named(ORANGE),
        }
    }
}

/// Player-facing message log plus the current layout.
pub struct UIContext {
    logs: Vec<String>,
    scroll: usize,
    layout: UILayout,
}

impl Default for UIContext {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            scroll: 0,
            layout: UILayout::Menu,
        }
    }
}

impl UIContext {
    pub fn set_layout(&mut self, layout: UILayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> UILayout {
        self.layout
    }

    /// Adds a message to the log window, dropping the oldest past the cap.
    pub fn add_log(&mut self, msg: &str) {
        log::info!("{}", msg);
        self.logs.push(msg.to_string());
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Most recent message, if any.
    pub fn last_log(&self) -> Option<&str> {
        self.logs.last().map(String::as_str)
    }

    /// Scrolls log view one line up.
    pub fn scroll_up(&mut self) {
        if self.scroll + (LOG_WINDOW as usize) < self.logs.len() {
            self.scroll += 1;
        }
    }

    /// Scrolls log view one line down.
    pub fn scroll_down(&mut self) {
        if self.scroll > 0 {
            self.scroll -= 1;
        }
    }

    /// Draws log window to the screen.
    pub fn draw_logs(&self, ctx: &mut BTerm) -> GameResult<()> {
        for (i, line) in self.visible_logs().iter().enumerate() {
            ctx.print(1, LOG_Y + i as i32, line);
        }
        Ok(())
    }

    fn visible_logs(&self) -> &[String] {
        let start = self
            .logs
            .len()
            .saturating_sub(LOG_WINDOW as usize + self.scroll);
        let end = std::cmp::min(start + LOG_WINDOW as usize, self.logs.len());
        &self.logs[start..end]
    }

    /// Draws the coin counter, plus boat stats outside menus.
    pub fn draw_status(&self, ctx: &mut BTerm, ledger: &Ledger) -> GameResult<()> {
        let coins = format!("Coins: {}", ledger.wallet());
        ctx.print_color(
            CONSOLE_WIDTH - coins.len() as i32 - 1,
            0,
            YELLOW,
            BLACK,
            &coins,
        );
        if self.layout != UILayout::Menu {
            ctx.print(1, 0, status_line(ledger));
        }
        Ok(())
    }
}

fn status_line(ledger: &Ledger) -> String {
    let stats = ledger.boat().stats();
    format!(
        "Fish: {}/{}  Speed: {}  Line: {}",
        ledger.inventory().len(),
        stats.capacity,
        stats.speed,
        stats.line_length
    )
}

/// Draws a menu centred on screen, highlighting the cursor line.
pub fn draw_menu(ctx: &mut BTerm, menu: &Menu, palette: &ColorPalette) -> GameResult<()> {
    ctx.print_color_centered(MENU_TITLE_Y, palette.highlight, RGB::named(BLACK), &menu.title);
    let spacing = if menu.options().len() > 8 { 1 } else { 2 };
    for (i, option) in menu.options().iter().enumerate() {
        let y = MENU_OPTIONS_Y + i as i32 * spacing;
        if i == menu.selected_index() {
            ctx.print_color_centered(
                y,
                palette.highlight,
                RGB::named(BLACK),
                format!("> {} <", option.label),
            );
        } else {
            let fg = if option.action.is_some() { WHITE } else { GRAY };
            ctx.print_color_centered(y, fg, BLACK, &option.label);
        }
    }
    Ok(())
}

/// Draws a text bar of `width` cells filled in proportion to `value / max`.
pub fn meter_string(value: f32, max: f32, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_addition() {
        let mut ui = UIContext::default();
        ui.add_log("test");
        assert_eq!(ui.logs().len(), 1);
        assert_eq!(ui.last_log(), Some("test"));
    }

    #[test]
    fn log_is_capped() {
        let mut ui = UIContext::default();
        for i in 0..(MAX_LOGS + 5) {
            ui.add_log(&i.to_string());
        }
        assert_eq!(ui.logs().len(), MAX_LOGS);
        assert_eq!(ui.logs()[0], "5");
    }

    #[test]
    fn meter_format() {
        assert_eq!(meter_string(5.0, 10.0, 10), "[#####-----]");
        assert_eq!(meter_string(0.0, 10.0, 10), "[----------]");
        assert_eq!(meter_string(12.0, 10.0, 10), "[##########]");
        assert_eq!(meter_string(3.0, 0.0, 4), "[----]");
    }

    #[test]
    fn layout_switching() {
        let mut ui = UIContext::default();
        assert_eq!(ui.layout(), UILayout::Menu);
        ui.set_layout(UILayout::Fishing);
        assert_eq!(ui.layout(), UILayout::Fishing);
    }

    #[test]
    fn scrolling_bounds() {
        let mut ui = UIContext::default();
        for i in 0..10 {
            ui.add_log(&format!("{}", i));
        }
        ui.scroll_up();
        assert_eq!(ui.scroll, 1);
        assert_eq!(ui.visible_logs().last().map(String::as_str), Some("8"));
        for _ in 0..20 {
            ui.scroll_down();
        }
        assert_eq!(ui.scroll, 0);
    }

    #[test]
    fn status_line_shows_boat_stats() {
        let line = status_line(&Ledger::default());
        assert_eq!(line, "Fish: 0/10  Speed: 200  Line: 450");
    }

    #[test]
    fn colorblind_palette_differs() {
        let normal = ColorPalette::default();
        let cb = ColorPalette::colorblind();
        assert_ne!(normal.fish, cb.fish);
    }
}
