//! Dakuten, handakuten and small-kana variant tables.
//!
//! The modifier key on the kana layout cycles the previous character
//! through its variants: base, then small form, then voiced, then
//! half-voiced, each only when it exists, wrapping back to the base.

use phf::phf_map;

static DAKUTEN: phf::Map<char, char> = phf_map! {
    'か' => 'が', 'き' => 'ぎ', 'く' => 'ぐ', 'け' => 'げ', 'こ' => 'ご',
    'さ' => 'ざ', 'し' => 'じ', 'す' => 'ず', 'せ' => 'ぜ', 'そ' => 'ぞ',
    'た' => 'だ', 'ち' => 'ぢ', 'つ' => 'づ', 'て' => 'で', 'と' => 'ど',
    'は' => 'ば', 'ひ' => 'び', 'ふ' => 'ぶ', 'へ' => 'べ', 'ほ' => 'ぼ',
    'う' => 'ゔ',
};

static DAKUTEN_REVERSE: phf::Map<char, char> = phf_map! {
    'が' => 'か', 'ぎ' => 'き', 'ぐ' => 'く', 'げ' => 'け', 'ご' => 'こ',
    'ざ' => 'さ', 'じ' => 'し', 'ず' => 'す', 'ぜ' => 'せ', 'ぞ' => 'そ',
    'だ' => 'た', 'ぢ' => 'ち', 'づ' => 'つ', 'で' => 'て', 'ど' => 'と',
    'ば' => 'は', 'び' => 'ひ', 'ぶ' => 'ふ', 'べ' => 'へ', 'ぼ' => 'ほ',
    'ゔ' => 'う',
};

static HANDAKUTEN: phf::Map<char, char> = phf_map! {
    'は' => 'ぱ', 'ひ' => 'ぴ', 'ふ' => 'ぷ', 'へ' => 'ぺ', 'ほ' => 'ぽ',
};

static HANDAKUTEN_REVERSE: phf::Map<char, char> = phf_map! {
    'ぱ' => 'は', 'ぴ' => 'ひ', 'ぷ' => 'ふ', 'ぺ' => 'へ', 'ぽ' => 'ほ',
};

static SMALL_KANA: phf::Map<char, char> = phf_map! {
    'あ' => 'ぁ', 'い' => 'ぃ', 'う' => 'ぅ', 'え' => 'ぇ', 'お' => 'ぉ',
    'や' => 'ゃ', 'ゆ' => 'ゅ', 'よ' => 'ょ',
    'つ' => 'っ',
};

static SMALL_KANA_REVERSE: phf::Map<char, char> = phf_map! {
    'ぁ' => 'あ', 'ぃ' => 'い', 'ぅ' => 'う', 'ぇ' => 'え', 'ぉ' => 'お',
    'ゃ' => 'や', 'ゅ' => 'ゆ', 'ょ' => 'よ',
    'っ' => 'つ',
};

pub fn dakuten(ch: char) -> Option<char> {
    DAKUTEN.get(&ch).copied()
}

pub fn handakuten(ch: char) -> Option<char> {
    HANDAKUTEN.get(&ch).copied()
}

pub fn small_kana(ch: char) -> Option<char> {
    SMALL_KANA.get(&ch).copied()
}

/// Whether `ch` has any variant the modifier key could produce.
pub fn is_modifiable(ch: char) -> bool {
    DAKUTEN.contains_key(&ch) || HANDAKUTEN.contains_key(&ch) || SMALL_KANA.contains_key(&ch)
}

/// Resolve any variant back to its unmodified base form.
pub fn base_form(ch: char) -> char {
    if let Some(&base) = DAKUTEN_REVERSE.get(&ch) {
        return base;
    }
    if let Some(&base) = HANDAKUTEN_REVERSE.get(&ch) {
        return base;
    }
    if let Some(&base) = SMALL_KANA_REVERSE.get(&ch) {
        return base;
    }
    ch
}

/// All variants of `base` in cycle order. Only existing forms appear.
pub fn modifier_cycle(base: char) -> Vec<char> {
    let mut cycle = vec![base];
    cycle.extend(small_kana(base));
    cycle.extend(dakuten(base));
    cycle.extend(handakuten(base));
    cycle
}

/// The next variant after `ch` in its base's cycle, wrapping. `None` when
/// `ch` has no other form.
pub fn next_variant(ch: char) -> Option<char> {
    let cycle = modifier_cycle(base_form(ch));
    if cycle.len() < 2 {
        return None;
    }
    let pos = cycle.iter().position(|&c| c == ch)?;
    Some(cycle[(pos + 1) % cycle.len()])
}

/// U+3040..=U+309F.
pub fn is_hiragana(ch: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&ch)
}
