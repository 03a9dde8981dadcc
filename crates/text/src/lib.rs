use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;
use std::fmt::Write;

fn is_valid_hex(ch: char) -> bool {
    ch.is_ascii_digit() || ('a'..='f').contains(&ch) || ('A'..='F').contains(&ch)
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ColorCode {
    const CODES: [(char, ColorCode); 22] = [
        ('0', ColorCode::Black),
        ('1', ColorCode::DarkBlue),
        ('2', ColorCode::DarkGreen),
        ('3', ColorCode::DarkAqua),
        ('4', ColorCode::DarkRed),
        ('5', ColorCode::DarkPurple),
        ('6', ColorCode::Gold),
        ('7', ColorCode::Gray),
        ('8', ColorCode::DarkGray),
        ('9', ColorCode::Blue),
        ('a', ColorCode::Green),
        ('b', ColorCode::Aqua),
        ('c', ColorCode::Red),
        ('d', ColorCode::LightPurple),
        ('e', ColorCode::Yellow),
        ('f', ColorCode::White),
        ('k', ColorCode::Obfuscated),
        ('l', ColorCode::Bold),
        ('m', ColorCode::Strikethrough),
        ('n', ColorCode::Underline),
        ('o', ColorCode::Italic),
        ('r', ColorCode::Reset),
    ];

    /// Looks up the code following a `&` or `§`. Uppercase codes are accepted.
    pub fn parse(code: char) -> Option<ColorCode> {
        let code = code.to_ascii_lowercase();
        Self::CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, color)| *color)
    }

    pub fn code(self) -> char {
        Self::CODES
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(c, _)| *c)
            .unwrap_or('r')
    }

    /// The section-sign form understood by vanilla clients, e.g. `§c`.
    pub fn legacy(self) -> String {
        format!("§{}", self.code())
    }

    fn is_formatting(self) -> bool {
        use ColorCode::*;
        matches!(
            self,
            Obfuscated | Bold | Strikethrough | Underline | Italic | Reset
        )
    }

    fn ansi(self) -> Option<AnsiColors> {
        use ColorCode::*;
        Some(match self {
            Black => AnsiColors::Black,
            DarkBlue => AnsiColors::Blue,
            DarkGreen => AnsiColors::Green,
            DarkAqua => AnsiColors::Cyan,
            DarkRed => AnsiColors::Red,
            DarkPurple => AnsiColors::Magenta,
            Gold => AnsiColors::Yellow,
            Gray => AnsiColors::White,
            DarkGray => AnsiColors::BrightBlack,
            Blue => AnsiColors::BrightBlue,
            Green => AnsiColors::BrightGreen,
            Aqua => AnsiColors::BrightCyan,
            Red => AnsiColors::BrightRed,
            LightPurple => AnsiColors::BrightMagenta,
            Yellow => AnsiColors::BrightYellow,
            White => AnsiColors::BrightWhite,
            _ => return None,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextColor {
    Hex(String),
    ColorCode(ColorCode),
}

/// This is only used for `TextComponent` serialize
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(field: &bool) -> bool {
    !*field
}

pub struct TextComponentBuilder {
    component: TextComponent,
}

impl TextComponentBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        let component = TextComponent {
            text: text.into(),
            ..Default::default()
        };
        Self { component }
    }

    pub fn color(mut self, color: TextColor) -> Self {
        self.component.color = Some(color);
        self
    }

    pub fn color_code(mut self, color: ColorCode) -> Self {
        self.component.color = Some(TextColor::ColorCode(color));
        self
    }

    pub fn bold(mut self, val: bool) -> Self {
        self.component.bold = val;
        self
    }

    pub fn finish(self) -> TextComponent {
        self.component
    }
}

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underlined: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub obfuscated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    /// Splits a message using `&` (or `§`) colour codes and `#rrggbb` hex
    /// colours into components. Empty components are dropped.
    pub fn from_legacy_text(message: &str) -> Vec<TextComponent> {
        let mut components = Vec::new();
        let mut cur: TextComponent = Default::default();

        let mut chars = message.chars();
        'main_loop: while let Some(c) = chars.next() {
            if c == '&' || c == '§' {
                if let Some(code) = chars.next() {
                    if let Some(color) = ColorCode::parse(code) {
                        if color.is_formatting() && !cur.text.is_empty() {
                            components.push(cur.clone());
                            cur.text.clear();
                        }
                        match color {
                            ColorCode::Bold => cur.bold = true,
                            ColorCode::Italic => cur.italic = true,
                            ColorCode::Underline => cur.underlined = true,
                            ColorCode::Strikethrough => cur.strikethrough = true,
                            ColorCode::Obfuscated => cur.obfuscated = true,
                            ColorCode::Reset => {
                                components.push(cur);
                                cur = Default::default();
                            }
                            _ => {
                                components.push(cur);
                                cur = Default::default();
                                cur.color = Some(TextColor::ColorCode(color));
                            }
                        }
                        continue;
                    }
                    cur.text.push(c);
                    cur.text.push(code);
                    continue;
                }
            }
            if c == '#' {
                let mut hex = String::from(c);
                for _ in 0..6 {
                    match chars.next() {
                        Some(c) if is_valid_hex(c) => hex.push(c),
                        Some(c) => {
                            hex.push(c);
                            cur.text += &hex;
                            continue 'main_loop;
                        }
                        None => {
                            cur.text += &hex;
                            continue 'main_loop;
                        }
                    }
                }
                components.push(cur);
                cur = Default::default();
                cur.color = Some(TextColor::Hex(hex));
                continue;
            }
            cur.text.push(c);
        }
        components.push(cur);

        components.retain(|component| !component.text.is_empty());
        components
    }

    pub fn encode_json(&self) -> String {
        // Only plain strings, bools and enums end up in here
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The chat json sent to clients: a single component, or an empty text
    /// component carrying the rest as `extra`.
    pub fn to_json(components: &[TextComponent]) -> String {
        match components {
            [component] => component.encode_json(),
            components => TextComponent {
                extra: components.to_vec(),
                ..Default::default()
            }
            .encode_json(),
        }
    }

    pub fn is_text_only(&self) -> bool {
        !self.bold
            && !self.italic
            && !self.underlined
            && !self.strikethrough
            && !self.obfuscated
            && self.color.is_none()
    }

    /// Concatenated text of the components with every style removed.
    pub fn to_plain_text(components: &[TextComponent]) -> String {
        let mut out = String::new();
        for component in components {
            out += &component.text;
            out += &Self::to_plain_text(&component.extra);
        }
        out
    }

    /// Renders components for a terminal. Hex colours are printed uncoloured.
    pub fn to_ansi(components: &[TextComponent]) -> String {
        let mut out = String::new();
        for component in components {
            let ansi = match &component.color {
                Some(TextColor::ColorCode(code)) => code.ansi(),
                _ => None,
            };
            let _ = match (ansi, component.bold) {
                (Some(color), true) => write!(out, "{}", component.text.color(color).bold()),
                (Some(color), false) => write!(out, "{}", component.text.color(color)),
                (None, true) => write!(out, "{}", component.text.bold()),
                (None, false) => write!(out, "{}", component.text),
            };
            out += &Self::to_ansi(&component.extra);
        }
        out
    }
}

impl<S> From<S> for TextComponent
where
    S: Into<String>,
{
    fn from(value: S) -> Self {
        TextComponent {
            text: value.into(),
            ..Default::default()
        }
    }
}
