use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_TOOL_SIZE: u32 = 1;
pub const MAX_TOOL_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Pencil,
    Marker,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Pen, Tool::Pencil, Tool::Marker, Tool::Eraser];

    const fn index(self) -> usize {
        match self {
            Tool::Pen => 0,
            Tool::Pencil => 1,
            Tool::Marker => 2,
            Tool::Eraser => 3,
        }
    }

    pub const fn default_size(self) -> u32 {
        match self {
            Tool::Pen => 3,
            Tool::Pencil => 2,
            Tool::Marker => 20,
            Tool::Eraser => 30,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Pencil => "Pencil",
            Tool::Marker => "Marker",
            Tool::Eraser => "Eraser",
        }
    }

    /// Whether the tool paints with the selected color.
    pub const fn uses_color(self) -> bool {
        !matches!(self, Tool::Eraser)
    }
}

pub fn clamp_tool_size(size: u32) -> u32 {
    size.clamp(MIN_TOOL_SIZE, MAX_TOOL_SIZE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    size: u32,
}

impl ToolConfig {
    pub fn new(size: u32) -> Self {
        Self {
            size: clamp_tool_size(size),
        }
    }

    pub fn size(self) -> u32 {
        self.size
    }
}

/// One [`ToolConfig`] per [`Tool`] variant, indexed by the tool itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfigs([ToolConfig; 4]);

impl ToolConfigs {
    pub fn from_fn(mut size_for: impl FnMut(Tool) -> u32) -> Self {
        Self(Tool::ALL.map(|tool| ToolConfig::new(size_for(tool))))
    }

    pub fn get(&self, tool: Tool) -> ToolConfig {
        self.0[tool.index()]
    }

    /// Stores `size` for `tool`, clamped into the supported range. Returns the stored value.
    pub fn set_size(&mut self, tool: Tool, size: u32) -> u32 {
        let config = ToolConfig::new(size);
        self.0[tool.index()] = config;
        config.size()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tool, ToolConfig)> + '_ {
        Tool::ALL.iter().map(|tool| (*tool, self.get(*tool)))
    }
}

impl Default for ToolConfigs {
    fn default() -> Self {
        Self::from_fn(Tool::default_size)
    }
}

/// Opaque stroke color, written as `#rrggbb` in settings files and toolbar labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or the short `#rgb` form. The leading `#` is optional.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.is_ascii() {
            bail!("color {value:?} contains non-ASCII characters");
        }

        let channel = |text: &str| -> Result<u8> {
            u8::from_str_radix(text, 16)
                .with_context(|| format!("invalid hex channel {text:?} in color {value:?}"))
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |c: u8| c << 4 | c;
                Ok(Self::new(
                    expand(channel(&digits[0..1])?),
                    expand(channel(&digits[1..2])?),
                    expand(channel(&digits[2..3])?),
                ))
            }
            len => Err(anyhow!(
                "color {value:?} must have 3 or 6 hex digits, found {len}"
            )),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}
