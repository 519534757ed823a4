// ==========================================
// Tangos - building category table
// ==========================================
// Source: SSB building type standard (bygningstype), grouped by first digit
// ==========================================

use crate::domain::types::BuildingCategory;

/// One row of the category table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub leading_digit: char,
    pub category: BuildingCategory,
    /// Label as shown on the map layers
    pub label: &'static str,
    /// Objects drawn as vulnerable (hotels, schools, health, emergency)
    pub vulnerable: bool,
}

const fn entry(
    leading_digit: char,
    category: BuildingCategory,
    label: &'static str,
    vulnerable: bool,
) -> CategoryEntry {
    CategoryEntry { leading_digit, category, label, vulnerable }
}

pub const CATEGORY_TABLE: [CategoryEntry; 9] = [
    entry('1', BuildingCategory::Residential, "Boliger", false),
    entry('2', BuildingCategory::Industry, "Industri/lager", false),
    entry('3', BuildingCategory::Office, "Kontor/forretning", false),
    entry('4', BuildingCategory::Transport, "Samferdsel", false),
    entry('5', BuildingCategory::Lodging, "Hotell/restaurant", true),
    entry('6', BuildingCategory::CultureEducation, "Skole/bhg/idrett", true),
    entry('7', BuildingCategory::Health, "Helse", true),
    entry('8', BuildingCategory::Emergency, "Brann/politi", true),
    entry('9', BuildingCategory::Other, "Annet", false),
];

/// Table row for a building-use code, by its first non-blank character
pub fn classify(code: &str) -> Option<&'static CategoryEntry> {
    let first = code.trim().chars().next()?;
    CATEGORY_TABLE.iter().find(|e| e.leading_digit == first)
}

pub fn category_of(code: &str) -> Option<BuildingCategory> {
    classify(code).map(|e| e.category)
}

pub fn entry_for(category: BuildingCategory) -> &'static CategoryEntry {
    CATEGORY_TABLE
        .iter()
        .find(|e| e.category == category)
        .unwrap_or(&CATEGORY_TABLE[8])
}
