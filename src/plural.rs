// SPDX-License-Identifier: MPL-2.0
//! Numerus form selection.
//!
//! Plural messages store one translation per grammatical number. Which form
//! applies to a count depends on the catalog language; the rules below
//! follow the table Qt Linguist uses when it creates the numerus forms.

/// Plural rule family of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// One form for every count (Japanese, Chinese, Korean, ...).
    Single,
    /// Singular for exactly one, plural otherwise (German, English, ...).
    OneOther,
    /// Singular for zero and one (French, Brazilian Portuguese).
    ZeroOne,
    /// Three forms by last digits (Russian, Ukrainian, Belarusian, ...).
    EastSlavic,
    /// Three forms: one, few (2-4 ending), many.
    Polish,
    /// Three forms: one, 2-4, other (Czech, Slovak).
    Czech,
}

impl PluralRule {
    /// Picks the rule for a catalog language such as `de_DE` or `pt-BR`.
    ///
    /// Unknown languages use [`PluralRule::OneOther`], which is also the
    /// rule of the English source texts.
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().unwrap_or_default().to_ascii_uppercase();

        match language.as_str() {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "lo" | "km" => PluralRule::Single,
            "fr" => PluralRule::ZeroOne,
            "pt" if region == "BR" => PluralRule::ZeroOne,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => PluralRule::EastSlavic,
            "pl" => PluralRule::Polish,
            "cs" | "sk" => PluralRule::Czech,
            _ => PluralRule::OneOther,
        }
    }

    /// Number of numerus forms a translation for this rule carries.
    #[must_use]
    pub fn form_count(self) -> usize {
        match self {
            PluralRule::Single => 1,
            PluralRule::OneOther | PluralRule::ZeroOne => 2,
            PluralRule::EastSlavic | PluralRule::Polish | PluralRule::Czech => 3,
        }
    }

    /// Index of the numerus form to use for `n`.
    #[must_use]
    pub fn form_index(self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let last = n % 10;
        let last_two = n % 100;
        let few = (2..=4).contains(&last) && !(12..=14).contains(&last_two);

        match self {
            PluralRule::Single => 0,
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::ZeroOne => usize::from(n > 1),
            PluralRule::EastSlavic => {
                if last == 1 && last_two != 11 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
        }
    }

    /// Selects a form from `forms`, clamping to the last available one.
    pub fn select<'a, S: AsRef<str>>(self, forms: &'a [S], n: i64) -> Option<&'a str> {
        let index = self.form_index(n).min(forms.len().checked_sub(1)?);
        forms.get(index).map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_uses_one_other() {
        let rule = PluralRule::for_language("de_DE");
        assert_eq!(rule, PluralRule::OneOther);
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(0), 1);
        assert_eq!(rule.form_index(2), 1);
        assert_eq!(rule.form_index(-1), 0);
    }

    #[test]
    fn french_and_brazilian_treat_zero_as_singular() {
        assert_eq!(PluralRule::for_language("fr").form_index(0), 0);
        assert_eq!(PluralRule::for_language("pt_BR").form_index(1), 0);
        assert_eq!(PluralRule::for_language("pt-BR").form_index(2), 1);
        assert_eq!(PluralRule::for_language("pt_PT"), PluralRule::OneOther);
    }

    #[test]
    fn russian_has_three_forms() {
        let rule = PluralRule::for_language("ru_RU");
        assert_eq!(rule.form_count(), 3);
        assert_eq!(rule.form_index(1), 0);
        assert_eq!(rule.form_index(21), 0);
        assert_eq!(rule.form_index(11), 2);
        assert_eq!(rule.form_index(3), 1);
        assert_eq!(rule.form_index(13), 2);
        assert_eq!(rule.form_index(25), 2);
    }

    #[test]
    fn polish_and_czech_forms() {
        let polish = PluralRule::for_language("pl");
        assert_eq!(polish.form_index(1), 0);
        assert_eq!(polish.form_index(22), 1);
        assert_eq!(polish.form_index(21), 2);

        let czech = PluralRule::for_language("cs_CZ");
        assert_eq!(czech.form_index(4), 1);
        assert_eq!(czech.form_index(22), 2);
    }

    #[test]
    fn select_clamps_to_available_forms() {
        let forms = vec!["%n Paket".to_string()];
        assert_eq!(PluralRule::OneOther.select(&forms, 5), Some("%n Paket"));
        let none: Vec<String> = Vec::new();
        assert_eq!(PluralRule::OneOther.select(&none, 5), None);
    }

    #[test]
    fn single_form_languages() {
        let rule = PluralRule::for_language("ja_JP");
        assert_eq!(rule.form_count(), 1);
        assert_eq!(rule.form_index(7), 0);
    }
}
