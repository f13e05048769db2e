//! Display names for programming languages.
//!
//! GitHub reports languages with their canonical spelling, but starred lists
//! built from older data or other sources may carry any casing. Names are
//! normalized before grouping so that `"go"` and `"Go"` share one section.
//!
//! Normalization first consults a fixed table of names whose casing cannot be
//! derived mechanically (acronyms such as `PHP`, brand names such as
//! `JavaScript`). Anything else is title-cased.

/// Bucket name for repositories without a reported language.
pub const OTHERS: &str = "Others";

/// Languages whose display name is not a plain title-case of the name.
///
/// Keys are lower-case and the table is sorted by key for binary search.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("abcl", "ABCL"),
    ("alf", "ALF"),
    ("algol", "ALGOL"),
    ("apl", "APL"),
    ("applescript", "AppleScript"),
    ("basic", "BASIC"),
    ("beanshell", "BeanShell"),
    ("beta", "BETA"),
    ("chuck", "ChucK"),
    ("cleo", "CLEO"),
    ("clist", "CLIST"),
    ("cobol", "COBOL"),
    ("coldfusion", "ColdFusion"),
    ("css", "CSS"),
    ("dasl", "DASL"),
    ("f-script", "F-Script"),
    ("foxpro", "FoxPro"),
    ("html", "HTML"),
    ("hypertalk", "HyperTalk"),
    ("ici", "ICI"),
    ("io", "IO"),
    ("jass", "JASS"),
    ("javascript", "JavaScript"),
    ("jovial", "JOVIAL"),
    ("latex", "LaTeX"),
    ("lua", "LUA"),
    ("matlab", "MATLAB"),
    ("ml", "ML"),
    ("moo", "MOO"),
    ("object-z", "Object-Z"),
    ("objective-c", "Objective-C"),
    ("opal", "OPAL"),
    ("ops5", "OPS5"),
    ("pcastl", "PCASTL"),
    ("php", "PHP"),
    ("pl/c", "PL/C"),
    ("pl/i", "PL/I"),
    ("powershell", "PowerShell"),
    ("rebol", "REBOL"),
    ("rexx", "REXX"),
    ("roop", "ROOP"),
    ("rpg", "RPG"),
    ("s-lang", "S-Lang"),
    ("salsa", "SALSA"),
    ("sass", "SASS"),
    ("scss", "SCSS"),
    ("sgml", "SGML"),
    ("small", "SMALL"),
    ("sr", "SR"),
    ("tex", "TeX"),
    ("typescript", "TypeScript"),
    ("vbscript", "VBScript"),
    ("viml", "VimL"),
    ("visual foxpro", "Visual FoxPro"),
    ("wikitext", "WikiText"),
    ("windows powershell", "Windows PowerShell"),
    ("xhtml", "XHTML"),
    ("xl", "XL"),
    ("xml", "XML"),
    ("xotcl", "XOTcl"),
];

/// Returns the name under which a repository with `language` is grouped.
///
/// An empty language maps to [`OTHERS`]. Otherwise the lower-cased language
/// is looked up in the table of special spellings, falling back to title
/// case (first letter of every word upper-case, the rest lower-case).
///
/// # Examples
///
/// ```
/// use starred_protocol::display_language;
///
/// assert_eq!(display_language(""), "Others");
/// assert_eq!(display_language("javascript"), "JavaScript");
/// assert_eq!(display_language("rust"), "Rust");
/// assert_eq!(display_language("emacs lisp"), "Emacs Lisp");
/// ```
#[must_use]
pub fn display_language(language: &str) -> String {
    if language.is_empty() {
        return OTHERS.to_string();
    }

    let key = language.to_lowercase();
    match LANGUAGE_NAMES.binary_search_by_key(&key.as_str(), |&(k, _)| k) {
        Ok(index) => LANGUAGE_NAMES[index].1.to_string(),
        Err(_) => title_case(language),
    }
}

/// Upper-cases the first alphanumeric character of every word and
/// lower-cases the rest. Any other character separates words.
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut word_start = true;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if word_start {
                output.extend(c.to_uppercase());
            } else {
                output.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            output.push(c);
            word_start = true;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_lowercase() {
        for pair in LANGUAGE_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} must sort before {}", pair[0].0, pair[1].0);
        }
        for (key, _) in LANGUAGE_NAMES {
            assert_eq!(*key, key.to_lowercase());
        }
    }

    #[test]
    fn every_table_entry_resolves_to_itself() {
        for (key, name) in LANGUAGE_NAMES {
            assert_eq!(display_language(key), *name);
            assert_eq!(display_language(name), *name);
        }
    }

    #[test]
    fn empty_language_is_others() {
        assert_eq!(display_language(""), OTHERS);
    }

    #[test]
    fn table_lookup_ignores_case() {
        assert_eq!(display_language("JAVASCRIPT"), "JavaScript");
        assert_eq!(display_language("TypeScript"), "TypeScript");
        assert_eq!(display_language("Visual FoxPro"), "Visual FoxPro");
    }

    #[test]
    fn unknown_language_is_title_cased() {
        assert_eq!(display_language("rust"), "Rust");
        assert_eq!(display_language("go"), "Go");
        assert_eq!(display_language("Go"), "Go");
        assert_eq!(display_language("GO"), "Go");
        assert_eq!(display_language("jupyter notebook"), "Jupyter Notebook");
    }

    #[test]
    fn title_case_keeps_punctuation() {
        assert_eq!(display_language("c++"), "C++");
        assert_eq!(display_language("f#"), "F#");
        assert_eq!(display_language("common-lisp"), "Common-Lisp");
    }
}
