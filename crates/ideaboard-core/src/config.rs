//! Board configuration: default sizes, palette and per-kind styles.

use crate::elements::{ElementKind, ElementStyle, HexColor};
use crate::error::{BoardError, BoardResult};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// A named palette entry: the fill swatch and its matching border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub fill: HexColor,
    pub border: HexColor,
}

impl PaletteColor {
    pub fn new(name: &str, fill: HexColor, border: HexColor) -> Self {
        Self {
            name: name.to_string(),
            fill,
            border,
        }
    }
}

/// The default sticky-note palette.
pub fn default_palette() -> Vec<PaletteColor> {
    vec![
        PaletteColor::new("Yellow", HexColor::rgb(0xfe, 0xf3, 0xc7), HexColor::rgb(0xd9, 0x77, 0x06)),
        PaletteColor::new("Blue", HexColor::rgb(0xbf, 0xdb, 0xfe), HexColor::rgb(0x25, 0x63, 0xeb)),
        PaletteColor::new("Green", HexColor::rgb(0xbb, 0xf7, 0xd0), HexColor::rgb(0x16, 0xa3, 0x4a)),
        PaletteColor::new("Red", HexColor::rgb(0xfe, 0xca, 0xca), HexColor::rgb(0xdc, 0x26, 0x26)),
        PaletteColor::new("Purple", HexColor::rgb(0xe9, 0xd5, 0xff), HexColor::rgb(0x93, 0x33, 0xea)),
        PaletteColor::new("White", HexColor::WHITE, HexColor::rgb(0x47, 0x55, 0x69)),
        PaletteColor::new("Black", HexColor::BLACK, HexColor::BLACK),
    ]
}

/// Board configuration.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Side length of a square sticky note.
    pub note_size: f64,
    /// Size of a new text label.
    pub text_size: Size,
    /// Space between notes laid out in a grid.
    pub grid_gap: f64,
    /// Margin around the elements when computing export bounds.
    pub export_padding: f64,
    /// Export frame used for an empty board.
    pub empty_export_size: Size,
    /// Style for drag-to-draw shapes.
    pub shape_style: ElementStyle,
    /// Style for text labels.
    pub text_style: ElementStyle,
    pub palette: Vec<PaletteColor>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            note_size: 200.0,
            text_size: Size::new(150.0, 50.0),
            grid_gap: 20.0,
            export_padding: 50.0,
            empty_export_size: Size::new(800.0, 600.0),
            shape_style: ElementStyle::default(),
            text_style: ElementStyle::new(HexColor::TRANSPARENT, HexColor::BLACK, 0.0),
            palette: default_palette(),
        }
    }
}

impl BoardConfig {
    /// Load a configuration from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BoardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BoardResult<()> {
        let sizes = [
            ("noteSize", self.note_size),
            ("textSize.width", self.text_size.width),
            ("textSize.height", self.text_size.height),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(BoardError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [("gridGap", self.grid_gap), ("exportPadding", self.export_padding)] {
            if !value.is_finite() || value < 0.0 {
                return Err(BoardError::Config(format!("{name} must be non-negative, got {value}")));
            }
        }
        if self.palette.is_empty() {
            return Err(BoardError::Config("palette must not be empty".to_string()));
        }
        self.shape_style.validate()?;
        self.text_style.validate()?;
        Ok(())
    }

    /// Size a freshly created element of `kind` starts with.
    pub fn default_size(&self, kind: ElementKind) -> Size {
        match kind {
            ElementKind::Note => Size::new(self.note_size, self.note_size),
            ElementKind::Text => self.text_size,
            _ => Size::ZERO,
        }
    }

    /// Style a freshly created element of `kind` starts with.
    pub fn default_style(&self, kind: ElementKind) -> ElementStyle {
        match kind {
            ElementKind::Note => ElementStyle::new(self.palette_fill(0), HexColor::BLACK, 0.0),
            ElementKind::Text => self.text_style.clone(),
            _ => self.shape_style.clone(),
        }
    }

    /// Fill color for the `index`-th generated note, cycling through the palette.
    pub fn palette_fill(&self, index: usize) -> HexColor {
        if self.palette.is_empty() {
            return HexColor::WHITE;
        }
        self.palette[index % self.palette.len()].fill
    }
}
