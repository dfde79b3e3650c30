//! Core types for the rasterizer

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const GRAY: Color = Color { r: 128, g: 128, b: 128, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Expand a 16-bit RGB565 color (5-6-5 bits) to 8 bits per channel
    pub const fn from_rgb565(c: u16) -> Self {
        let r5 = ((c >> 11) & 0x1F) as u32;
        let g6 = ((c >> 5) & 0x3F) as u32;
        let b5 = (c & 0x1F) as u32;
        Self::new(
            ((r5 * 255 + 15) / 31) as u8,
            ((g6 * 255 + 31) / 63) as u8,
            ((b5 * 255 + 15) / 31) as u8,
        )
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// RGB565 shades per palette: dark, medium, bright
const PALETTES_565: [[u16; 3]; 5] = [
    [0x0340, 0x0660, 0x05A0], // green
    [0x4004, 0x9009, 0xA80D], // purple
    [0x0141, 0x0281, 0x158C], // teal
    [0x4000, 0x9000, 0xA000], // red
    [0x4080, 0x8140, 0xD340], // amber
];

/// Three-shade color scheme for a dungeon, picked from the map seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: Color,
    pub medium: Color,
    pub bright: Color,
}

impl Palette {
    pub const COUNT: usize = PALETTES_565.len();

    pub fn by_index(index: usize) -> Self {
        let [dark, medium, bright] = PALETTES_565[index % Self::COUNT];
        Self {
            dark: Color::from_rgb565(dark),
            medium: Color::from_rgb565(medium),
            bright: Color::from_rgb565(bright),
        }
    }

    /// Pick a palette from a seed string. Empty seed gets palette 0.
    pub fn from_seed(seed: &str) -> Self {
        Self::by_index(Self::index_for_seed(seed))
    }

    pub fn index_for_seed(seed: &str) -> usize {
        if seed.is_empty() {
            return 0;
        }
        (seed_hash(seed) % Self::COUNT as u32) as usize
    }

    pub fn floor(&self) -> Color {
        self.dark
    }

    pub fn ceiling(&self) -> Color {
        self.medium
    }

    pub fn wall(&self) -> Color {
        self.bright
    }

    pub fn door_frame(&self) -> Color {
        self.medium
    }

    pub fn pillar(&self) -> Color {
        Color::WHITE
    }

    /// Background behind all geometry, the same for every palette
    pub fn sky(&self) -> Color {
        Color::new(128, 0, 0)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::by_index(0)
    }
}

/// 32-bit string hash (`h * 31 + c`, wrapping)
pub fn seed_hash(s: &str) -> u32 {
    s.chars()
        .fold(0u32, |h, c| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as u32))
}
