//! Line-length tables
//!
//! One table per language and segment set. Full-width scripts fit fewer
//! characters on a line than Latin text, and German runs longer than
//! English for the same layout.

use super::SegmentSet;
use crate::language::Language;

const ENGLISH_PRIMARY: &[usize] = &[38, 41, 36, 40, 39, 42, 37, 40];
const ENGLISH_SECONDARY: &[usize] = &[44, 46, 43, 45, 44, 47];

const FRENCH_PRIMARY: &[usize] = &[40, 43, 38, 42, 41, 44, 39, 42];
const FRENCH_SECONDARY: &[usize] = &[46, 48, 45, 47, 46, 49];

const GERMAN_PRIMARY: &[usize] = &[42, 45, 40, 44, 43, 46, 41, 44];
const GERMAN_SECONDARY: &[usize] = &[48, 50, 47, 49, 48, 51];

const SPANISH_PRIMARY: &[usize] = &[40, 42, 38, 41, 40, 43, 39, 41];
const SPANISH_SECONDARY: &[usize] = &[45, 47, 44, 46, 45, 48];

const ITALIAN_PRIMARY: &[usize] = &[39, 42, 37, 41, 40, 43, 38, 41];
const ITALIAN_SECONDARY: &[usize] = &[45, 47, 44, 46, 45, 48];

const JAPANESE_PRIMARY: &[usize] = &[18, 20, 17, 19, 18, 21, 17, 19];
const JAPANESE_SECONDARY: &[usize] = &[22, 23, 21, 22, 22, 24];

const KOREAN_PRIMARY: &[usize] = &[20, 22, 19, 21, 20, 23, 19, 21];
const KOREAN_SECONDARY: &[usize] = &[24, 25, 23, 24, 24, 26];

const CHINESE_PRIMARY: &[usize] = &[17, 19, 16, 18, 17, 20, 16, 18];
const CHINESE_SECONDARY: &[usize] = &[21, 22, 20, 21, 21, 23];

/// Line lengths for `language` and `set`, in characters
pub fn line_lengths(language: Language, set: SegmentSet) -> &'static [usize] {
    use SegmentSet::{Primary, Secondary};

    match (language, set) {
        (Language::English, Primary) => ENGLISH_PRIMARY,
        (Language::English, Secondary) => ENGLISH_SECONDARY,
        (Language::French, Primary) => FRENCH_PRIMARY,
        (Language::French, Secondary) => FRENCH_SECONDARY,
        (Language::German, Primary) => GERMAN_PRIMARY,
        (Language::German, Secondary) => GERMAN_SECONDARY,
        (Language::Spanish, Primary) => SPANISH_PRIMARY,
        (Language::Spanish, Secondary) => SPANISH_SECONDARY,
        (Language::Italian, Primary) => ITALIAN_PRIMARY,
        (Language::Italian, Secondary) => ITALIAN_SECONDARY,
        (Language::Japanese, Primary) => JAPANESE_PRIMARY,
        (Language::Japanese, Secondary) => JAPANESE_SECONDARY,
        (Language::Korean, Primary) => KOREAN_PRIMARY,
        (Language::Korean, Secondary) => KOREAN_SECONDARY,
        (Language::ChineseSimplified | Language::ChineseTraditional, Primary) => CHINESE_PRIMARY,
        (Language::ChineseSimplified | Language::ChineseTraditional, Secondary) => CHINESE_SECONDARY,
    }
}
