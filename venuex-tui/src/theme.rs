use ratatui::style::Color;

pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,
    pub accent: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

pub const THEMES: [Theme; 5] = [
    Theme {
        name: "Tokyo Night",
        bg: rgb(0x1a1b26),
        fg: rgb(0xc0caf5),
        muted: rgb(0x565f89),
        border: rgb(0x414868),
        highlight: rgb(0x364a82),
        accent: rgb(0x7aa2f7),
        secondary: rgb(0xbb9af7),
        success: rgb(0x9ece6a),
        warning: rgb(0xe0af68),
        error: rgb(0xf7768e),
        info: rgb(0x7dcfff),
    },
    Theme {
        name: "Catppuccin Mocha",
        bg: rgb(0x1e1e2e),
        fg: rgb(0xcdd6f4),
        muted: rgb(0x6c7086),
        border: rgb(0x45475a),
        highlight: rgb(0x585b70),
        accent: rgb(0xcba6f7),
        secondary: rgb(0xf5c2e7),
        success: rgb(0xa6e3a1),
        warning: rgb(0xf9e2af),
        error: rgb(0xf38ba8),
        info: rgb(0x89b4fa),
    },
    Theme {
        name: "Dracula",
        bg: rgb(0x282a36),
        fg: rgb(0xf8f8f2),
        muted: rgb(0x6272a4),
        border: rgb(0x6272a4),
        highlight: rgb(0x44475a),
        accent: rgb(0xbd93f9),
        secondary: rgb(0xff79c6),
        success: rgb(0x50fa7b),
        warning: rgb(0xf1fa8c),
        error: rgb(0xff5555),
        info: rgb(0x8be9fd),
    },
    Theme {
        name: "Nord",
        bg: rgb(0x2e3440),
        fg: rgb(0xeceff4),
        muted: rgb(0x4c566a),
        border: rgb(0x4c566a),
        highlight: rgb(0x434c5e),
        accent: rgb(0x88c0d0),
        secondary: rgb(0x81a1c1),
        success: rgb(0xa3be8c),
        warning: rgb(0xebcb8b),
        error: rgb(0xbf616a),
        info: rgb(0x5e81ac),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: rgb(0x282828),
        fg: rgb(0xebdbb2),
        muted: rgb(0x928374),
        border: rgb(0x504945),
        highlight: rgb(0x504945),
        accent: rgb(0xfe8019),
        secondary: rgb(0xd3869b),
        success: rgb(0xb8bb26),
        warning: rgb(0xfabd2f),
        error: rgb(0xfb4934),
        info: rgb(0x83a598),
    },
];
