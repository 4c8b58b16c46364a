//! Prompt categories, die faces, and per-category storage.
//!
//! The die has exactly six faces: the five categories plus `all_in`.
//! Both sets are closed enums so no code path can invent a sixth category.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the five fixed prompt categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Action,
    Incident,
    Object,
    Nature,
    Ps,
}

impl Category {
    /// All categories in die order.
    pub const ALL: [Category; 5] = [
        Category::Action,
        Category::Incident,
        Category::Object,
        Category::Nature,
        Category::Ps,
    ];

    /// Position of this category in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in seeds, content files and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Incident => "incident",
            Category::Object => "object",
            Category::Nature => "nature",
            Category::Ps => "ps",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A face of the category die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieFace {
    Action,
    Incident,
    Object,
    Nature,
    Ps,
    AllIn,
}

impl DieFace {
    /// All six faces.
    pub const ALL: [DieFace; 6] = [
        DieFace::Action,
        DieFace::Incident,
        DieFace::Object,
        DieFace::Nature,
        DieFace::Ps,
        DieFace::AllIn,
    ];

    /// The category shown on this face, or `None` for `all_in`.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            DieFace::Action => Some(Category::Action),
            DieFace::Incident => Some(Category::Incident),
            DieFace::Object => Some(Category::Object),
            DieFace::Nature => Some(Category::Nature),
            DieFace::Ps => Some(Category::Ps),
            DieFace::AllIn => None,
        }
    }

    #[must_use]
    pub const fn is_all_in(self) -> bool {
        matches!(self, DieFace::AllIn)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.category() {
            Some(category) => category.name(),
            None => "all_in",
        }
    }
}

impl From<Category> for DieFace {
    fn from(category: Category) -> Self {
        match category {
            Category::Action => DieFace::Action,
            Category::Incident => DieFace::Incident,
            Category::Object => DieFace::Object,
            Category::Nature => DieFace::Nature,
            Category::Ps => DieFace::Ps,
        }
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per category with O(1) access.
///
/// ```
/// use voice_charades::cards::{Category, CategoryMap};
///
/// let mut counts: CategoryMap<u32> = CategoryMap::with_default();
/// counts[Category::Nature] += 2;
/// assert_eq!(counts[Category::Nature], 2);
/// assert_eq!(counts[Category::Ps], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    data: [T; 5],
}

impl<T> CategoryMap<T> {
    /// Build with a factory called once per category, in `Category::ALL` order.
    pub fn new(mut factory: impl FnMut(Category) -> T) -> Self {
        Self {
            data: Category::ALL.map(&mut factory),
        }
    }

    /// Build with default values.
    #[must_use]
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over `(Category, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Category> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.data[category.index()]
    }
}

impl<T> IndexMut<Category> for CategoryMap<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.data[category.index()]
    }
}
