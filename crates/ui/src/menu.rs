//! Menu model shared by the main menu, shop, market and inventory screens.

use ledger::{Ledger, UpgradeKind};

const INVENTORY_LINES: usize = 8;

/// What selecting a menu option asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NewAdventure,
    Continue,
    OpenShop,
    OpenInventory,
    OpenMarket,
    Quit,
    Upgrade(UpgradeKind),
    SellAll,
    Back,
}

/// A single line of a menu. Lines without an action are informational or disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub action: Option<MenuAction>,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
        }
    }
}

/// Vertical list of options with a wrapping cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    options: Vec<MenuOption>,
    selected: usize,
}

impl Menu {
    pub fn new(title: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            title: title.into(),
            options,
            selected: 0,
        }
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Replaces the options, keeping the cursor where it was when still valid.
    pub fn set_options(&mut self, options: Vec<MenuOption>) {
        self.options = options;
        if self.selected >= self.options.len() {
            self.selected = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + self.options.len() - 1) % self.options.len();
    }

    pub fn move_down(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }

    /// Action under the cursor, `None` for disabled lines.
    pub fn selected_action(&self) -> Option<MenuAction> {
        self.options.get(self.selected).and_then(|o| o.action)
    }
}

pub fn main_menu() -> Menu {
    Menu::new(
        "Fishing Mania",
        vec![
            MenuOption::new("New Adventure", MenuAction::NewAdventure),
            MenuOption::new("Continue", MenuAction::Continue),
            MenuOption::new("Boat Shop", MenuAction::OpenShop),
            MenuOption::new("Fish Collection", MenuAction::OpenInventory),
            MenuOption::new("Sell Fish", MenuAction::OpenMarket),
            MenuOption::new("Quit", MenuAction::Quit),
        ],
    )
}

pub fn shop_options(ledger: &Ledger) -> Vec<MenuOption> {
    let boat = ledger.boat();
    let mut options: Vec<MenuOption> = UpgradeKind::ALL
        .into_iter()
        .map(|kind| match boat.upgrade_cost(kind) {
            Some(cost) => MenuOption::new(
                format!(
                    "Upgrade {} (Lvl {}) - Coins: {}",
                    kind.label(),
                    boat.level(kind) + 1,
                    cost
                ),
                MenuAction::Upgrade(kind),
            ),
            None => MenuOption::disabled(format!(
                "{} (Lvl {}) - MAX",
                kind.label(),
                boat.level(kind)
            )),
        })
        .collect();
    options.push(MenuOption::new("Back", MenuAction::Back));
    options
}

pub fn shop_menu(ledger: &Ledger) -> Menu {
    Menu::new("Boat Shop", shop_options(ledger))
}

pub fn market_options(ledger: &Ledger) -> Vec<MenuOption> {
    let inventory = ledger.inventory();
    let label = format!(
        "Sell all ({} fish) - value {}",
        inventory.len(),
        inventory.total_value()
    );
    let sell = if inventory.is_empty() {
        MenuOption::disabled(label)
    } else {
        MenuOption::new(label, MenuAction::SellAll)
    };
    vec![sell, MenuOption::new("Back", MenuAction::Back)]
}

pub fn market_menu(ledger: &Ledger) -> Menu {
    Menu::new("Fish Market", market_options(ledger))
}

pub fn inventory_options(ledger: &Ledger) -> Vec<MenuOption> {
    let fish = ledger.inventory().fish();
    let mut options = Vec::new();
    if fish.is_empty() {
        options.push(MenuOption::disabled("Empty"));
    } else {
        options.extend(fish.iter().take(INVENTORY_LINES).map(|f| {
            MenuOption::disabled(format!("{} ({}) - {}", f.name, f.rarity.label(), f.value))
        }));
        if fish.len() > INVENTORY_LINES {
            options.push(MenuOption::disabled("...and more"));
        }
    }
    options.push(MenuOption::new("Back", MenuAction::Back));
    options
}

pub fn inventory_menu(ledger: &Ledger) -> Menu {
    Menu::new("My Fish Collection", inventory_options(ledger))
}
