use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub header: Color,
    pub time: Color,
    pub title: Color,
    pub location: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub loading: Color,
    pub status_bar: Color,
    pub detail_border: Color,
    pub detail_label: Color,
    pub error: Color,
}

impl Theme {
    /// Conference palette: navy header, orange time column.
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            header: Color::Rgb(0, 38, 73),
            time: Color::Rgb(210, 65, 0),
            title: Color::White,
            location: Color::Gray,
            selected_bg: Color::Rgb(0, 38, 73),
            selected_fg: Color::White,
            loading: Color::Rgb(210, 81, 0),
            status_bar: Color::White,
            detail_border: Color::Rgb(210, 81, 0),
            detail_label: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            header: Color::Rgb(251, 184, 108),
            time: Color::Rgb(254, 128, 25),
            title: Color::Rgb(235, 219, 178),
            location: Color::Rgb(146, 131, 116),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            loading: Color::Rgb(184, 187, 38),
            status_bar: Color::Rgb(235, 219, 178),
            detail_border: Color::Rgb(142, 192, 124),
            detail_label: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            header: Color::Rgb(136, 192, 208),
            time: Color::Rgb(235, 203, 139),
            title: Color::Rgb(236, 239, 244),
            location: Color::Rgb(76, 86, 106),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            loading: Color::Rgb(163, 190, 140),
            status_bar: Color::Rgb(216, 222, 233),
            detail_border: Color::Rgb(129, 161, 193),
            detail_label: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            header: Color::Rgb(139, 233, 253),
            time: Color::Rgb(255, 121, 198),
            title: Color::Rgb(248, 248, 242),
            location: Color::Rgb(98, 114, 164),
            selected_bg: Color::Rgb(68, 71, 90),
            selected_fg: Color::Rgb(248, 248, 242),
            loading: Color::Rgb(80, 250, 123),
            status_bar: Color::Rgb(248, 248, 242),
            detail_border: Color::Rgb(189, 147, 249),
            detail_label: Color::Rgb(241, 250, 140),
            error: Color::Rgb(255, 85, 85),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
