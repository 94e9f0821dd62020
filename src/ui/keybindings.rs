pub struct Keybinding {
    pub keys: &'static str,
    pub description: &'static str,
}

pub struct KeybindingCategory {
    pub name: &'static str,
    pub bindings: &'static [Keybinding],
}

pub const KEYBINDING_CATEGORIES: &[KeybindingCategory] = &[
    KeybindingCategory {
        name: "Criteria Form",
        bindings: &[
            Keybinding {
                keys: "j/k",
                description: "Move between fields",
            },
            Keybinding {
                keys: "h/l",
                description: "Cycle the selected option",
            },
            Keybinding {
                keys: "i",
                description: "Type a special request",
            },
            Keybinding {
                keys: "Enter / s",
                description: "Find songs",
            },
            Keybinding {
                keys: "1-3",
                description: "Repeat a recent search",
            },
            Keybinding {
                keys: "S / H",
                description: "Open setlist / history",
            },
        ],
    },
    KeybindingCategory {
        name: "Results",
        bindings: &[
            Keybinding {
                keys: "h/j/k/l",
                description: "Move left/down/up/right",
            },
            Keybinding {
                keys: "Tab / 1-3",
                description: "Switch tab",
            },
            Keybinding {
                keys: "gg / ge",
                description: "Jump to top / end",
            },
            Keybinding {
                keys: "Enter",
                description: "Show details / repeat search",
            },
            Keybinding {
                keys: "f",
                description: "Add to or remove from setlist",
            },
            Keybinding {
                keys: "w (History)",
                description: "Switch searches / recently viewed",
            },
            Keybinding {
                keys: "C (History)",
                description: "Clear history",
            },
            Keybinding {
                keys: "n",
                description: "New search",
            },
        ],
    },
    KeybindingCategory {
        name: "Song Details",
        bindings: &[
            Keybinding {
                keys: "f",
                description: "Add to or remove from setlist",
            },
            Keybinding {
                keys: "Esc / Enter",
                description: "Close",
            },
        ],
    },
    KeybindingCategory {
        name: "System",
        bindings: &[
            Keybinding {
                keys: "Esc",
                description: "Back / dismiss error",
            },
            Keybinding {
                keys: "?",
                description: "Show this help",
            },
            Keybinding {
                keys: "q / Ctrl+c",
                description: "Quit",
            },
        ],
    },
];

/// Calculate total line count for scrolling bounds
pub fn help_content_height() -> usize {
    let mut count = 2; // Title + empty line
    for category in KEYBINDING_CATEGORIES {
        count += 1; // Category name
        count += category.bindings.len();
        count += 1; // Empty line after category
    }
    count
}
