//! Kana bigram row prediction.
//!
//! Predicts which gojuon rows are likely to follow the last buffered
//! character, so the host can widen the touch targets of the matching
//! flick keys. Positions are grid coordinates; row -1 is the bottom row
//! holding the わ key.

use crate::modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KanaRow {
    A,
    Ka,
    Sa,
    Ta,
    Na,
    Ha,
    Ma,
    Ya,
    Ra,
    Wa,
}

fn row_of(ch: char) -> Option<KanaRow> {
    match ch {
        'あ' | 'い' | 'う' | 'え' | 'お' => Some(KanaRow::A),
        'か' | 'き' | 'く' | 'け' | 'こ' | 'が' | 'ぎ' | 'ぐ' | 'げ' | 'ご' => Some(KanaRow::Ka),
        'さ' | 'し' | 'す' | 'せ' | 'そ' | 'ざ' | 'じ' | 'ず' | 'ぜ' | 'ぞ' => Some(KanaRow::Sa),
        'た' | 'ち' | 'つ' | 'て' | 'と' | 'だ' | 'ぢ' | 'づ' | 'で' | 'ど' | 'っ' => {
            Some(KanaRow::Ta)
        }
        'な' | 'に' | 'ぬ' | 'ね' | 'の' => Some(KanaRow::Na),
        'は' | 'ひ' | 'ふ' | 'へ' | 'ほ' | 'ば' | 'び' | 'ぶ' | 'べ' | 'ぼ' | 'ぱ' | 'ぴ'
        | 'ぷ' | 'ぺ' | 'ぽ' => Some(KanaRow::Ha),
        'ま' | 'み' | 'む' | 'め' | 'も' => Some(KanaRow::Ma),
        'や' | 'ゆ' | 'よ' => Some(KanaRow::Ya),
        'ら' | 'り' | 'る' | 'れ' | 'ろ' => Some(KanaRow::Ra),
        'わ' | 'を' | 'ん' => Some(KanaRow::Wa),
        _ => None,
    }
}

/// Most likely following rows, best first, from kana bigram frequency.
fn predictions(row: KanaRow) -> [KanaRow; 3] {
    match row {
        KanaRow::A => [KanaRow::Ra, KanaRow::Na, KanaRow::Ta],
        KanaRow::Ka => [KanaRow::Ra, KanaRow::Na, KanaRow::Ta],
        KanaRow::Sa => [KanaRow::Ra, KanaRow::Ta, KanaRow::Ha],
        KanaRow::Ta => [KanaRow::Ka, KanaRow::Na, KanaRow::A],
        KanaRow::Na => [KanaRow::Ka, KanaRow::Ra, KanaRow::A],
        KanaRow::Ha => [KanaRow::Na, KanaRow::Ka, KanaRow::A],
        KanaRow::Ma => [KanaRow::A, KanaRow::Ta, KanaRow::Sa],
        KanaRow::Ya => [KanaRow::Ka, KanaRow::Sa, KanaRow::Ta],
        KanaRow::Ra => [KanaRow::Na, KanaRow::Ka, KanaRow::A],
        KanaRow::Wa => [KanaRow::Ta, KanaRow::Na, KanaRow::Ka],
    }
}

fn grid_position(row: KanaRow) -> (i32, i32) {
    match row {
        KanaRow::A => (0, 0),
        KanaRow::Ka => (0, 1),
        KanaRow::Sa => (0, 2),
        KanaRow::Ta => (1, 0),
        KanaRow::Na => (1, 1),
        KanaRow::Ha => (1, 2),
        KanaRow::Ma => (2, 0),
        KanaRow::Ya => (2, 1),
        KanaRow::Ra => (2, 2),
        KanaRow::Wa => (-1, 0),
    }
}

/// Grid coordinates of the keys most likely to be tapped next, best
/// first. Empty when the last character gives no signal.
pub fn predict_next_keys(last_char: Option<char>) -> Vec<(i32, i32)> {
    let Some(ch) = last_char else {
        return Vec::new();
    };
    let Some(row) = row_of(ch) else {
        return Vec::new();
    };
    predictions(row).iter().map(|&r| grid_position(r)).collect()
}

/// Whether the modifier key applies to the last buffered character.
pub fn is_modifiable(last_char: Option<char>) -> bool {
    last_char.is_some_and(modifiers::is_modifiable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_three_rows_for_known_kana() {
        assert_eq!(predict_next_keys(Some('か')), vec![(2, 2), (1, 1), (1, 0)]);
        // ん lives on the bottom-row key
        assert_eq!(predict_next_keys(Some('ん')), vec![(1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn voiced_forms_share_their_row() {
        assert_eq!(
            predict_next_keys(Some('が')),
            predict_next_keys(Some('か'))
        );
    }

    #[test]
    fn no_signal_for_unknown_input() {
        assert!(predict_next_keys(None).is_empty());
        assert!(predict_next_keys(Some('A')).is_empty());
    }

    #[test]
    fn modifiability_follows_variant_tables() {
        assert!(is_modifiable(Some('つ')));
        assert!(is_modifiable(Some('は')));
        assert!(!is_modifiable(Some('ん')));
        assert!(!is_modifiable(None));
    }
}
