//! Disc, title and chapter model.
//!
//! A [`Disc`] owns its titles and each [`Title`] owns its chapters. The
//! reverse links are plain keys: a title remembers the name of its disc and a
//! chapter remembers the number of its title. Resolve them through the owner
//! with [`Disc::owns`] and [`Disc::title_of`].

use crate::tree::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Convert an `hh:mm:ss` string into seconds.
///
/// Parts are folded right to left in base 60, so `"1:02:42"` and `"02:42"`
/// both work. A part that is not a number counts as zero. Totals too large
/// for a `u64` saturate at `u64::MAX`.
pub fn duration_seconds(duration: &str) -> u64 {
    duration
        .split(':')
        .rev()
        .fold((1u64, 0u64), |(multiplier, sum), part| {
            let value: u64 = part.trim().parse().unwrap_or(0);
            (
                multiplier.saturating_mul(60),
                sum.saturating_add(value.saturating_mul(multiplier)),
            )
        })
        .1
}

/// Everything a scan found on one source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Disc {
    /// Basename of the scanned path.
    pub name: String,

    /// Titles keyed by title number.
    pub titles: BTreeMap<u32, Title>,

    /// The scan output this disc was parsed from, when available.
    #[serde(skip)]
    pub raw_output: Option<String>,

    /// The indentation tree extracted from [`Disc::raw_output`].
    #[serde(skip)]
    pub raw_tree: Option<Node>,
}

impl Disc {
    /// Create an empty disc.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a title, pointing it (and its chapters) back at this disc.
    ///
    /// A title with the same number is replaced and returned.
    pub fn add_title(&mut self, mut title: Title) -> Option<Title> {
        title.disc = self.name.clone();
        for chapter in title.chapters.values_mut() {
            chapter.title = title.number;
        }
        self.titles.insert(title.number, title)
    }

    /// Title by number.
    pub fn title(&self, number: u32) -> Option<&Title> {
        self.titles.get(&number)
    }

    /// The title HandBrake flagged as the main feature, if any.
    pub fn main_feature(&self) -> Option<&Title> {
        self.titles.values().find(|t| t.main_feature)
    }

    /// Whether `title` belongs to this disc.
    pub fn owns(&self, title: &Title) -> bool {
        title.disc == self.name && self.titles.contains_key(&title.number)
    }

    /// The title containing `chapter`.
    pub fn title_of(&self, chapter: &Chapter) -> Option<&Title> {
        self.titles.get(&chapter.title)
    }
}

/// Equality ignores the raw output and tree.
impl PartialEq for Disc {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.titles == other.titles
    }
}

impl Eq for Disc {}

/// One selectable program on a disc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title number (positive).
    pub number: u32,

    /// Duration formatted as `hh:mm:ss`.
    pub duration: String,

    /// Chapters keyed by chapter number.
    #[serde(default)]
    pub chapters: BTreeMap<u32, Chapter>,

    /// Whether HandBrake considers this the main feature.
    #[serde(default)]
    pub main_feature: bool,

    /// Name of the owning disc.
    #[serde(default)]
    pub disc: String,
}

impl Title {
    /// Create a title with no chapters.
    pub fn new(number: u32, duration: impl Into<String>) -> Self {
        Self {
            number,
            duration: duration.into(),
            chapters: BTreeMap::new(),
            main_feature: false,
            disc: String::new(),
        }
    }

    /// Mark (or unmark) this title as the main feature.
    pub fn with_main_feature(mut self, main_feature: bool) -> Self {
        self.main_feature = main_feature;
        self
    }

    /// Add a chapter, pointing it back at this title.
    pub fn add_chapter(&mut self, mut chapter: Chapter) -> Option<Chapter> {
        chapter.title = self.number;
        self.chapters.insert(chapter.number, chapter)
    }

    /// Chapter by number.
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.get(&number)
    }

    /// Chapters sorted by chapter number.
    pub fn ordered_chapters(&self) -> Vec<&Chapter> {
        self.chapters.values().collect()
    }

    pub fn is_main_feature(&self) -> bool {
        self.main_feature
    }

    /// Duration in whole seconds.
    pub fn seconds(&self) -> u64 {
        duration_seconds(&self.duration)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}

/// A subdivision of a [`Title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter number (positive).
    pub number: u32,

    /// Duration formatted as `hh:mm:ss`.
    pub duration: String,

    /// Number of the owning title.
    #[serde(default)]
    pub title: u32,
}

impl Chapter {
    pub fn new(number: u32, duration: impl Into<String>) -> Self {
        Self {
            number,
            duration: duration.into(),
            title: 0,
        }
    }

    /// Duration in whole seconds.
    pub fn seconds(&self) -> u64 {
        duration_seconds(&self.duration)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}
