use hashbrown::HashSet;

/// The alphabet used for replacements and insertions.
///
/// Corrections are only ever produced over lowercase latin letters, words
/// in other scripts can only be matched when they are already known.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// All strings exactly one delete, adjacent transpose, replace or
/// insert away from `word`.
///
/// Positions are counted in characters rather than bytes.
pub fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = HashSet::with_capacity(54 * chars.len() + 26);

    for split in 0..=chars.len() {
        let (left, right) = chars.split_at(split);

        if let Some((first, rest)) = right.split_first() {
            // delete
            edits.insert(splice(left, &[], rest));

            // transpose
            if let Some((second, tail)) = rest.split_first() {
                edits.insert(splice(left, &[*second, *first], tail));
            }

            // replace
            for c in LETTERS.chars() {
                edits.insert(splice(left, &[c], rest));
            }
        }

        // insert
        for c in LETTERS.chars() {
            edits.insert(splice(left, &[c], right));
        }
    }

    edits
}

/// All strings two edits away from `word`.
///
/// This is produced lazily as the full set is roughly the square of the
/// `edits1` set and callers only ever test membership.
pub fn edits2(word: &str) -> impl Iterator<Item = String> {
    edits1(word)
        .into_iter()
        .flat_map(|e1| edits1(&e1).into_iter())
}

fn splice(left: &[char], middle: &[char], right: &[char]) -> String {
    let mut out = String::with_capacity(left.len() + middle.len() + right.len());
    out.extend(left);
    out.extend(middle);
    out.extend(right);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits1_contains_each_operation() {
        let edits = edits1("abc");

        for expected in ["bc", "ac", "ab"] {
            assert!(edits.contains(expected), "missing delete {:?}", expected);
        }
        for expected in ["bac", "acb"] {
            assert!(edits.contains(expected), "missing transpose {:?}", expected);
        }
        for expected in ["abd", "zbc", "axc"] {
            assert!(edits.contains(expected), "missing replace {:?}", expected);
        }
        for expected in ["abcd", "xabc", "abxc"] {
            assert!(edits.contains(expected), "missing insert {:?}", expected);
        }

        assert!(!edits.contains("cba"));
        assert!(!edits.contains("a"));
    }

    #[test]
    fn test_edits1_size_is_bounded() {
        // 3 deletes + 2 transposes + 78 replaces + 104 inserts, before
        // duplicates collapse.
        let edits = edits1("abc");
        assert!(edits.len() <= 3 + 2 + 26 * 3 + 26 * 4);

        // replacing a letter with itself yields the word again.
        assert!(edits.contains("abc"));
    }

    #[test]
    fn test_edits1_of_empty_word_is_single_letters() {
        let edits = edits1("");

        assert_eq!(edits.len(), 26);
        assert!(edits.contains("a"));
        assert!(edits.contains("z"));
    }

    #[test]
    fn test_edits1_works_on_characters() {
        let edits = edits1("é");

        assert!(edits.contains(""));
        assert!(edits.contains("a"));
        assert!(edits.contains("éa"));
        assert!(edits.contains("aé"));
    }

    #[test]
    fn test_edits2_reaches_two_edits() {
        let mut edits = edits2("goreg");

        assert!(edits.any(|e| e == "gorengg"));
        assert!(edits2("ab").any(|e| e == "ba"));
        assert!(edits2("abcd").any(|e| e == "cd"));
    }
}
