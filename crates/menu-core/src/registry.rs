//! Menu table
//!
//! Each entry binds a trigger key to a label shown by the menu, a fixed
//! argument string and the action to run. The table is built once and never
//! changes afterwards; its order is the order in which the menu lists it.

use crate::error::MenuError;
use crate::handlers::{
    enter_float, enter_integer, enter_string, play_radio, say_hello, set_date_time,
    show_date_time, show_menu, toggle_heartbeat, Session,
};

/// Handler invoked with the entry's bound argument
pub type Action = fn(&mut Session<'_>, &str) -> Result<(), MenuError>;

/// One line of the menu
#[derive(Clone, Copy)]
pub struct MenuEntry {
    /// Byte that selects the entry
    pub key: u8,
    /// Text shown in the menu listing
    pub label: &'static str,
    /// Argument bound at table definition time
    pub arg: &'static str,
    /// Handler run with `arg` when the key is pressed
    pub action: Action,
}

impl MenuEntry {
    pub const fn new(key: u8, label: &'static str, arg: &'static str, action: Action) -> Self {
        Self {
            key,
            label,
            arg,
            action,
        }
    }
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("key", &char::from(self.key))
            .field("label", &self.label)
            .field("arg", &self.arg)
            .finish_non_exhaustive()
    }
}

/// The built-in menu of the demo board
pub static STANDARD_MENU: &[MenuEntry] = &[
    MenuEntry::new(
        b'0',
        "[0] Klassik Radio",
        "http://stream.klassikradio.de/live/mp3-128/stream.klassikradio.de",
        play_radio,
    ),
    MenuEntry::new(
        b'1',
        "[1] SRF1 AG-SO",
        "http://stream.srg-ssr.ch/m/regi_ag_so/mp3_128",
        play_radio,
    ),
    MenuEntry::new(b'2', "[2] SRF2", "http://stream.srg-ssr.ch/m/drs2/mp3_128", play_radio),
    MenuEntry::new(b'3', "[3] SRF3", "http://stream.srg-ssr.ch/m/drs3/mp3_128", play_radio),
    MenuEntry::new(b'h', "[h] Say Hello", "Guten Tag", say_hello),
    MenuEntry::new(
        b'd',
        "[d] Set date and time as: yyyy mm dd hh mm ss",
        "",
        set_date_time,
    ),
    MenuEntry::new(b'D', "[D] Show date and time", "", show_date_time),
    MenuEntry::new(b'i', "[i] Enter an integer", "", enter_integer),
    MenuEntry::new(b'f', "[f] Enter a float", "", enter_float),
    MenuEntry::new(b's', "[s] Enter a string", "", enter_string),
    MenuEntry::new(b't', "[t] Toggle heartbeat", "", toggle_heartbeat),
    MenuEntry::new(b'S', "[S] Show menu", "", show_menu),
];

/// Ordered, read-only set of menu entries
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    entries: Vec<MenuEntry>,
}

impl ActionRegistry {
    /// Build a registry, rejecting tables where a key appears twice
    pub fn new(entries: impl IntoIterator<Item = MenuEntry>) -> Result<Self, MenuError> {
        let entries: Vec<MenuEntry> = entries.into_iter().collect();
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(MenuError::DuplicateKey(entry.key));
            }
        }
        Ok(Self { entries })
    }

    /// Registry holding [`STANDARD_MENU`]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_MENU.to_vec(),
        }
    }

    /// Find the entry bound to `key`
    pub fn lookup(&self, key: u8) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// All entries in display order
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
