//! Flick key grid for gesture-driven kana entry.
//!
//! Each key carries up to five outputs, one per flick direction; a plain
//! tap is the center output. Tapping the same key repeatedly cycles
//! through the outputs in `toggle_cycle` order.

/// Flick gesture direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickDirection {
    Center,
    Left,
    Up,
    Right,
    Down,
}

/// One flick key with its directional outputs. Empty strings mark unused
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlickKey {
    pub center: &'static str,
    pub left: &'static str,
    pub up: &'static str,
    pub right: &'static str,
    pub down: &'static str,
}

impl FlickKey {
    pub const fn new(
        center: &'static str,
        left: &'static str,
        up: &'static str,
        right: &'static str,
        down: &'static str,
    ) -> Self {
        Self {
            center,
            left,
            up,
            right,
            down,
        }
    }

    pub fn kana(&self, direction: FlickDirection) -> &'static str {
        match direction {
            FlickDirection::Center => self.center,
            FlickDirection::Left => self.left,
            FlickDirection::Up => self.up,
            FlickDirection::Right => self.right,
            FlickDirection::Down => self.down,
        }
    }

    /// Outputs in repeated-tap order, unused directions skipped.
    pub fn toggle_cycle(&self) -> Vec<&'static str> {
        [self.center, self.left, self.up, self.right, self.down]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Main 3x3 kana grid, gojuon row per key.
pub const KANA_GRID: [[FlickKey; 3]; 3] = [
    [
        FlickKey::new("あ", "い", "う", "え", "お"),
        FlickKey::new("か", "き", "く", "け", "こ"),
        FlickKey::new("さ", "し", "す", "せ", "そ"),
    ],
    [
        FlickKey::new("た", "ち", "つ", "て", "と"),
        FlickKey::new("な", "に", "ぬ", "ね", "の"),
        FlickKey::new("は", "ひ", "ふ", "へ", "ほ"),
    ],
    [
        FlickKey::new("ま", "み", "む", "め", "も"),
        FlickKey::new("や", "（", "ゆ", "）", "よ"),
        FlickKey::new("ら", "り", "る", "れ", "ろ"),
    ],
];

/// Bottom-row わ key.
pub const KANA_WA: FlickKey = FlickKey::new("わ", "を", "ん", "ー", "〜");

/// Bottom-row punctuation key.
pub const PUNCTUATION: FlickKey = FlickKey::new("、", "。", "？", "！", "");
