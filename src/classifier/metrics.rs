//! String metrics shared by the garbage rules. All functions work on code
//! points, never bytes.

/// Vowel and consonant counts over the alphabetic characters of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LetterCounts {
    pub vowels: usize,
    pub consonants: usize,
}

impl LetterCounts {
    /// Vowels per consonant, `None` when either count is zero
    pub fn ratio(&self) -> Option<f64> {
        if self.vowels == 0 || self.consonants == 0 {
            return None;
        }
        Some(self.vowels as f64 / self.consonants as f64)
    }
}

pub fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Letters and digits in any script. Underscore, marks and connector
/// punctuation do not count.
pub fn alnum_len(chars: &[char]) -> usize {
    chars.iter().filter(|ch| ch.is_alphanumeric()).count()
}

/// Share of alphanumeric characters, `None` for the empty string
pub fn alnum_ratio(chars: &[char]) -> Option<f64> {
    if chars.is_empty() {
        return None;
    }
    Some(alnum_len(chars) as f64 / chars.len() as f64)
}

/// Length of the longest run of one repeated character
pub fn longest_run(chars: &[char]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;

    for &ch in chars {
        if previous == Some(ch) {
            current += 1;
        } else {
            current = 1;
            previous = Some(ch);
        }
        longest = longest.max(current);
    }

    longest
}

pub fn letter_counts(chars: &[char]) -> LetterCounts {
    chars
        .iter()
        .filter(|ch| ch.is_alphabetic())
        .fold(LetterCounts::default(), |mut counts, &ch| {
            if is_vowel(ch) {
                counts.vowels += 1;
            } else {
                counts.consonants += 1;
            }
            counts
        })
}

/// Non-alphanumeric characters of `chars[lead..len - trail]`, in order.
/// Empty when the string is too short to have an interior.
pub fn interior_punctuation(chars: &[char], lead: usize, trail: usize) -> Vec<char> {
    let end = chars.len().saturating_sub(trail);
    chars
        .get(lead..end)
        .unwrap_or(&[])
        .iter()
        .copied()
        .filter(|ch| !ch.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_alnum_ratio() {
        assert_eq!(alnum_ratio(&chars("")), None);
        assert_eq!(alnum_ratio(&chars("abcd")), Some(1.0));
        assert_eq!(alnum_ratio(&chars("a_b-")), Some(0.5));
        assert_eq!(alnum_len(&chars("$4.99")), 3);
    }

    #[test]
    fn test_alnum_counts_code_points() {
        // "é" is one character of two bytes
        assert_eq!(alnum_ratio(&chars("café!")), Some(0.8));
    }

    #[test]
    fn test_alnum_matches_interior_punctuation() {
        // superscripts and vulgar fractions are numeric
        assert_eq!(alnum_len(&chars("m²½¼¾⅓")), 6);
        // connector punctuation is not
        assert_eq!(alnum_len(&chars("ab‿⁀‿⁀")), 2);
        assert_eq!(interior_punctuation(&chars("ab‿⁀‿⁀"), 1, 2), vec!['‿', '⁀']);
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run(&chars("")), 0);
        assert_eq!(longest_run(&chars("abc")), 1);
        assert_eq!(longest_run(&chars("abbbcc")), 3);
        assert_eq!(longest_run(&chars("x----y")), 4);
    }

    #[test]
    fn test_letter_counts() {
        let counts = letter_counts(&chars("Salad 42!"));
        assert_eq!(counts, LetterCounts { vowels: 2, consonants: 3 });
        assert_eq!(letter_counts(&chars("1234")).ratio(), None);
    }

    #[test]
    fn test_interior_punctuation() {
        assert_eq!(interior_punctuation(&chars("a,b;cde"), 1, 2), vec![',', ';']);
        assert_eq!(interior_punctuation(&chars("ab"), 1, 2), Vec::<char>::new());
        assert_eq!(interior_punctuation(&chars("(x)."), 1, 2), Vec::<char>::new());
    }
}
