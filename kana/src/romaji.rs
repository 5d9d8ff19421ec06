//! Greedy romaji to hiragana transliteration.
//!
//! Latin input accumulates in a pending buffer and is reduced greedily
//! after every keystroke. The pending buffer always holds the shortest
//! suffix that could still extend into a longer spelling (`k` waits for a
//! vowel, `ky` for the small-kana vowel, a lone `n` for disambiguation).

use phf::phf_map;

/// Longest-match table. Covers Hepburn and kunrei spellings, digraph
/// (youon) combinations, `x`-prefixed small kana and the punctuation the
/// kana layout emits.
static ROMAJI_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    // Plain vowels
    "a" => "あ", "i" => "い", "u" => "う", "e" => "え", "o" => "お",
    // K-row
    "ka" => "か", "ki" => "き", "ku" => "く", "ke" => "け", "ko" => "こ",
    // S-row
    "sa" => "さ", "si" => "し", "shi" => "し", "su" => "す", "se" => "せ", "so" => "そ",
    // T-row
    "ta" => "た", "ti" => "ち", "chi" => "ち", "tu" => "つ", "tsu" => "つ", "te" => "て", "to" => "と",
    // N-row
    "na" => "な", "ni" => "に", "nu" => "ぬ", "ne" => "ね", "no" => "の",
    // H-row
    "ha" => "は", "hi" => "ひ", "hu" => "ふ", "fu" => "ふ", "he" => "へ", "ho" => "ほ",
    // M-row
    "ma" => "ま", "mi" => "み", "mu" => "む", "me" => "め", "mo" => "も",
    // Y-row
    "ya" => "や", "yu" => "ゆ", "yo" => "よ",
    // R-row
    "ra" => "ら", "ri" => "り", "ru" => "る", "re" => "れ", "ro" => "ろ",
    // W-row
    "wa" => "わ", "wi" => "ゐ", "we" => "ゑ", "wo" => "を",
    // Explicit moraic n
    "n'" => "ん",
    // Voiced rows
    "ga" => "が", "gi" => "ぎ", "gu" => "ぐ", "ge" => "げ", "go" => "ご",
    "za" => "ざ", "zi" => "じ", "ji" => "じ", "zu" => "ず", "ze" => "ぜ", "zo" => "ぞ",
    "da" => "だ", "di" => "ぢ", "du" => "づ", "de" => "で", "do" => "ど",
    "ba" => "ば", "bi" => "び", "bu" => "ぶ", "be" => "べ", "bo" => "ぼ",
    // Half-voiced row
    "pa" => "ぱ", "pi" => "ぴ", "pu" => "ぷ", "pe" => "ぺ", "po" => "ぽ",
    // Youon digraphs
    "kya" => "きゃ", "kyu" => "きゅ", "kyo" => "きょ",
    "sha" => "しゃ", "shu" => "しゅ", "sho" => "しょ",
    "sya" => "しゃ", "syu" => "しゅ", "syo" => "しょ",
    "cha" => "ちゃ", "chu" => "ちゅ", "cho" => "ちょ",
    "tya" => "ちゃ", "tyu" => "ちゅ", "tyo" => "ちょ",
    "nya" => "にゃ", "nyu" => "にゅ", "nyo" => "にょ",
    "hya" => "ひゃ", "hyu" => "ひゅ", "hyo" => "ひょ",
    "mya" => "みゃ", "myu" => "みゅ", "myo" => "みょ",
    "rya" => "りゃ", "ryu" => "りゅ", "ryo" => "りょ",
    "gya" => "ぎゃ", "gyu" => "ぎゅ", "gyo" => "ぎょ",
    "ja" => "じゃ", "ju" => "じゅ", "jo" => "じょ",
    "jya" => "じゃ", "jyu" => "じゅ", "jyo" => "じょ",
    "bya" => "びゃ", "byu" => "びゅ", "byo" => "びょ",
    "pya" => "ぴゃ", "pyu" => "ぴゅ", "pyo" => "ぴょ",
    // Small kana
    "xa" => "ぁ", "xi" => "ぃ", "xu" => "ぅ", "xe" => "ぇ", "xo" => "ぉ",
    "xya" => "ゃ", "xyu" => "ゅ", "xyo" => "ょ",
    "xtu" => "っ", "xtsu" => "っ",
    // Punctuation
    "-" => "ー", "." => "。", "," => "、",
};

const VOWELS: [char; 5] = ['a', 'i', 'u', 'e', 'o'];

/// Incremental transliterator holding resolved hiragana plus the pending
/// Latin suffix.
#[derive(Debug, Default)]
pub struct RomajiConverter {
    pending: String,
    resolved: String,
}

impl RomajiConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved hiragana followed by the raw pending suffix, as shown to
    /// the user.
    pub fn display_text(&self) -> String {
        let mut s = String::with_capacity(self.resolved.len() + self.pending.len());
        s.push_str(&self.resolved);
        s.push_str(&self.pending);
        s
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn resolved(&self) -> &str {
        &self.resolved
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.resolved.is_empty()
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.resolved.clear();
    }

    /// Feed one character. Returns whether any reduction happened.
    pub fn process(&mut self, ch: char) -> bool {
        for lower in ch.to_lowercase() {
            self.pending.push(lower);
        }
        self.reduce()
    }

    /// Remove one character, pending suffix first.
    pub fn backspace(&mut self) {
        if self.pending.pop().is_none() {
            self.resolved.pop();
        }
    }

    fn reduce(&mut self) -> bool {
        let mut reduced = false;

        while !self.pending.is_empty() {
            let chars: Vec<char> = self.pending.chars().collect();

            if chars.len() >= 2 {
                // nn is the moraic n
                if chars[0] == 'n' && chars[1] == 'n' {
                    self.resolved.push('ん');
                    self.drain_front(2);
                    reduced = true;
                    continue;
                }
                // A doubled consonant geminate: emit っ, keep the second
                if chars[0] == chars[1] && !VOWELS.contains(&chars[0]) && chars[0] != 'n' {
                    self.resolved.push('っ');
                    self.drain_front(1);
                    reduced = true;
                    continue;
                }
            }

            let mut matched = false;
            for len in (1..=chars.len().min(4)).rev() {
                let prefix: String = chars[..len].iter().collect();
                if let Some(&kana) = ROMAJI_MAP.get(prefix.as_str()) {
                    self.resolved.push_str(kana);
                    self.drain_front(len);
                    matched = true;
                    reduced = true;
                    break;
                }
            }
            if matched {
                continue;
            }

            // n followed by anything that cannot start na/ni/../nya is ん
            if chars.len() >= 2 && chars[0] == 'n' {
                let second = chars[1];
                if !VOWELS.contains(&second) && second != 'y' && second != 'n' {
                    self.resolved.push('ん');
                    self.drain_front(1);
                    reduced = true;
                    continue;
                }
            }

            // Genuine prefix of a longer spelling; wait for more input
            break;
        }

        reduced
    }

    fn drain_front(&mut self, count: usize) {
        let byte = self
            .pending
            .char_indices()
            .nth(count)
            .map(|(i, _)| i)
            .unwrap_or(self.pending.len());
        self.pending.drain(..byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(conv: &mut RomajiConverter, input: &str) {
        for ch in input.chars() {
            conv.process(ch);
        }
    }

    #[test]
    fn basic_syllables() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "kon'nichiha");
        assert_eq!(conv.display_text(), "こんにちは");
        assert_eq!(conv.pending(), "");
    }

    #[test]
    fn double_n_consumes_both() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "konnichiha");
        assert_eq!(conv.display_text(), "こんいちは");
    }

    #[test]
    fn youon_digraph() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "kya");
        assert_eq!(conv.display_text(), "きゃ");
    }

    #[test]
    fn geminate_consonant() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "katta");
        assert_eq!(conv.display_text(), "かった");
    }

    #[test]
    fn nn_is_moraic_n() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "kinnyuu");
        assert_eq!(conv.display_text(), "きんゆう");
    }

    #[test]
    fn lone_n_waits_for_disambiguation() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "kan");
        assert_eq!(conv.display_text(), "かn");
        assert_eq!(conv.pending(), "n");

        // A consonant resolves it to ん
        conv.process('k');
        assert_eq!(conv.resolved(), "かん");
        assert_eq!(conv.pending(), "k");

        // A vowel would instead have produced the na-row
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "kana");
        assert_eq!(conv.display_text(), "かな");
    }

    #[test]
    fn hepburn_and_kunrei_agree() {
        let mut a = RomajiConverter::new();
        type_str(&mut a, "shi");
        let mut b = RomajiConverter::new();
        type_str(&mut b, "si");
        assert_eq!(a.display_text(), b.display_text());
        assert_eq!(a.display_text(), "し");
    }

    #[test]
    fn uppercase_is_folded() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "KA");
        assert_eq!(conv.display_text(), "か");
    }

    #[test]
    fn small_kana_spellings() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "xtu");
        assert_eq!(conv.display_text(), "っ");
    }

    #[test]
    fn punctuation_maps() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "ka-.");
        assert_eq!(conv.display_text(), "かー。");
    }

    #[test]
    fn backspace_prefers_pending() {
        let mut conv = RomajiConverter::new();
        type_str(&mut conv, "kak");
        assert_eq!(conv.pending(), "k");
        conv.backspace();
        assert_eq!(conv.display_text(), "か");
        conv.backspace();
        assert_eq!(conv.display_text(), "");
        assert!(conv.is_empty());
    }

    #[test]
    fn process_reports_reduction() {
        let mut conv = RomajiConverter::new();
        assert!(!conv.process('k'));
        assert!(conv.process('a'));
    }
}
