//! Grade 1 symbol table.
//!
//! Maps a lower-cased character to its cell. Digits share the cells of the
//! letters `a` to `j` and only read as digits after the numeric indicator.
//! Portuguese accented vowels and `ç` fold to their base letter.

use super::cell::Cell;

/// Looks up the cell for a lower-cased character.
///
/// Returns `None` for characters outside the table. Callers substitute
/// [`Cell::BLANK`] in that case.
#[must_use]
pub const fn lookup(ch: char) -> Option<Cell> {
    let pattern = match ch {
        // ====================================================================
        // Letters
        // ====================================================================
        'a' => '⠁',
        'b' => '⠃',
        'c' => '⠉',
        'd' => '⠙',
        'e' => '⠑',
        'f' => '⠋',
        'g' => '⠛',
        'h' => '⠓',
        'i' => '⠊',
        'j' => '⠚',
        'k' => '⠅',
        'l' => '⠇',
        'm' => '⠍',
        'n' => '⠝',
        'o' => '⠕',
        'p' => '⠏',
        'q' => '⠟',
        'r' => '⠗',
        's' => '⠎',
        't' => '⠞',
        'u' => '⠥',
        'v' => '⠧',
        'w' => '⠺',
        'x' => '⠭',
        'y' => '⠽',
        'z' => '⠵',

        // ====================================================================
        // Digits
        // ====================================================================
        '1' => '⠁',
        '2' => '⠃',
        '3' => '⠉',
        '4' => '⠙',
        '5' => '⠑',
        '6' => '⠋',
        '7' => '⠛',
        '8' => '⠓',
        '9' => '⠊',
        '0' => '⠚',

        // ====================================================================
        // Punctuation & Space
        // ====================================================================
        ' ' => '⠀',
        '.' => '⠲',
        ',' => '⠂',
        '?' => '⠦',
        '!' => '⠖',

        // ====================================================================
        // Accented Letters
        // ====================================================================
        'á' | 'à' | 'ã' | 'â' => '⠁',
        'é' | 'è' | 'ê' => '⠑',
        'í' | 'ì' | 'î' => '⠊',
        'ó' | 'ò' | 'õ' | 'ô' => '⠕',
        'ú' | 'ù' | 'û' => '⠥',
        'ç' => '⠉',

        _ => return None,
    };
    Cell::new(pattern)
}

/// Looks up a cell, falling back to the blank cell.
#[inline]
#[must_use]
pub const fn lookup_or_blank(ch: char) -> Cell {
    match lookup(ch) {
        Some(cell) => cell,
        None => Cell::BLANK,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_is_mapped() {
        for ch in 'a'..='z' {
            let cell = lookup(ch).unwrap_or_else(|| panic!("missing letter {ch}"));
            assert!(!cell.is_blank(), "letter {ch} mapped to blank");
        }
    }

    #[test]
    fn test_digits_alias_first_ten_letters() {
        let pairs = [
            ('1', 'a'),
            ('2', 'b'),
            ('3', 'c'),
            ('4', 'd'),
            ('5', 'e'),
            ('6', 'f'),
            ('7', 'g'),
            ('8', 'h'),
            ('9', 'i'),
            ('0', 'j'),
        ];
        for (digit, letter) in pairs {
            assert_eq!(lookup(digit), lookup(letter), "digit {digit}");
        }
    }

    #[test]
    fn test_accents_fold_to_base_letter() {
        let folds = [
            ('ã', 'a'),
            ('ê', 'e'),
            ('î', 'i'),
            ('õ', 'o'),
            ('ù', 'u'),
            ('ç', 'c'),
        ];
        for (accented, base) in folds {
            assert_eq!(lookup(accented), lookup(base));
        }
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(lookup('.').map(Cell::raised_dots), Some(vec![2, 5, 6]));
        assert_eq!(lookup(',').map(Cell::raised_dots), Some(vec![2]));
        assert_eq!(lookup('?').map(Cell::as_char), Some('⠦'));
        assert_eq!(lookup('!').map(Cell::as_char), Some('⠖'));
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(lookup(' '), Some(Cell::BLANK));
    }

    #[test]
    fn test_unmapped_falls_back_to_blank() {
        assert_eq!(lookup('@'), None);
        assert_eq!(lookup('A'), None);
        assert_eq!(lookup_or_blank('@'), Cell::BLANK);
        assert_eq!(lookup_or_blank('\n'), Cell::BLANK);
    }
}
