//! Dubeolsik key maps and jamo index tables.
//!
//! Keys map to Unicode compatibility jamo (U+3131..U+3163). Syllables are
//! assembled from the standard index tables with
//! `(cho * 21 + jung) * 28 + jong + 0xAC00`.

use phf::phf_map;

/// QWERTY key to jamo, unshifted layer.
static KEY_TO_JAMO: phf::Map<&'static str, char> = phf_map! {
    // Consonants
    "q" => 'ㅂ',
    "w" => 'ㅈ',
    "e" => 'ㄷ',
    "r" => 'ㄱ',
    "t" => 'ㅅ',
    "a" => 'ㅁ',
    "s" => 'ㄴ',
    "d" => 'ㅇ',
    "f" => 'ㄹ',
    "g" => 'ㅎ',
    "z" => 'ㅋ',
    "x" => 'ㅌ',
    "c" => 'ㅊ',
    "v" => 'ㅍ',
    // Vowels
    "y" => 'ㅛ',
    "u" => 'ㅕ',
    "i" => 'ㅑ',
    "o" => 'ㅐ',
    "p" => 'ㅔ',
    "h" => 'ㅗ',
    "j" => 'ㅓ',
    "k" => 'ㅏ',
    "l" => 'ㅣ',
    "b" => 'ㅠ',
    "n" => 'ㅜ',
    "m" => 'ㅡ',
};

/// Shifted layer: doubled consonants and the two y-vowels.
static SHIFT_KEY_TO_JAMO: phf::Map<&'static str, char> = phf_map! {
    "Q" => 'ㅃ',
    "W" => 'ㅉ',
    "E" => 'ㄸ',
    "R" => 'ㄲ',
    "T" => 'ㅆ',
    "O" => 'ㅒ',
    "P" => 'ㅖ',
};

/// Initial consonants, in codepoint index order.
pub const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Medial vowels, in codepoint index order.
pub const JUNGSEONG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Final consonants; index 0 is the empty final.
pub const JONGSEONG: [Option<char>; 28] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// Two medials that combine into one compound medial.
pub const COMPOUND_VOWELS: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

/// Two finals that combine into one compound final.
pub const COMPOUND_JONGSEONG: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

const SYLLABLE_BASE: u32 = 0xAC00;

/// Jamo for a key press. The shifted layer is checked first so that a
/// capital key reaches its doubled consonant.
pub fn jamo_for_key(key: &str) -> Option<char> {
    if let Some(&jamo) = SHIFT_KEY_TO_JAMO.get(key) {
        return Some(jamo);
    }
    KEY_TO_JAMO.get(key.to_lowercase().as_str()).copied()
}

/// Whether `ch` is a consonant that can start a syllable.
pub fn is_consonant(ch: char) -> bool {
    CHOSEONG.contains(&ch)
}

/// Whether `ch` is a medial vowel.
pub fn is_vowel(ch: char) -> bool {
    ('ㅏ'..='ㅣ').contains(&ch)
}

pub fn choseong_index(ch: char) -> Option<usize> {
    CHOSEONG.iter().position(|&c| c == ch)
}

pub fn jungseong_index(ch: char) -> Option<usize> {
    JUNGSEONG.iter().position(|&c| c == ch)
}

pub fn jongseong_index(ch: char) -> Option<usize> {
    JONGSEONG.iter().position(|&c| c == Some(ch))
}

pub fn compound_vowel(first: char, second: char) -> Option<char> {
    COMPOUND_VOWELS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, c)| c)
}

pub fn compound_jongseong(first: char, second: char) -> Option<char> {
    COMPOUND_JONGSEONG
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, c)| c)
}

/// Split a compound final back into its components.
pub fn split_compound_jongseong(compound: char) -> Option<(char, char)> {
    COMPOUND_JONGSEONG
        .iter()
        .find(|&&(_, _, c)| c == compound)
        .map(|&(a, b, _)| (a, b))
}

/// Split a compound medial back into its components.
pub fn split_compound_vowel(compound: char) -> Option<(char, char)> {
    COMPOUND_VOWELS
        .iter()
        .find(|&&(_, _, c)| c == compound)
        .map(|&(a, b, _)| (a, b))
}

/// Assemble a precomposed syllable. `None` when any jamo is out of table.
pub fn compose_syllable(cho: char, jung: char, jong: Option<char>) -> Option<char> {
    let cho_idx = choseong_index(cho)? as u32;
    let jung_idx = jungseong_index(jung)? as u32;
    let jong_idx = match jong {
        Some(j) => jongseong_index(j)? as u32,
        None => 0,
    };
    char::from_u32((cho_idx * 21 + jung_idx) * 28 + jong_idx + SYLLABLE_BASE)
}

/// Inverse of [`compose_syllable`] for characters in the syllable block.
pub fn decompose_syllable(syllable: char) -> Option<(char, char, Option<char>)> {
    let code = syllable as u32;
    if !(SYLLABLE_BASE..SYLLABLE_BASE + 19 * 21 * 28).contains(&code) {
        return None;
    }
    let offset = code - SYLLABLE_BASE;
    let cho = CHOSEONG[(offset / (21 * 28)) as usize];
    let jung = JUNGSEONG[(offset / 28 % 21) as usize];
    let jong = JONGSEONG[(offset % 28) as usize];
    Some((cho, jung, jong))
}
