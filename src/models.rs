//! Domain types shared by the clients, the history store and the views
//!
//! Field names serialize in camelCase because the same shapes are used for
//! the AI response schema and for the persisted history blob.

use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A generated recipe
///
/// Immutable once generated. `rating` and `review_count` are estimated by
/// the model, not sourced from users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    /// Dish name
    pub title: String,
    /// Short appetising summary
    pub description: String,
    /// Free-text preparation time (e.g. "15 mins")
    pub prep_time: String,
    /// Free-text cooking time
    pub cook_time: String,
    /// Number of servings
    pub servings: u32,
    /// Ingredients in display order
    pub ingredients: Vec<Ingredient>,
    /// Steps in display order
    pub instructions: Vec<InstructionStep>,
    /// Per-serving nutrition summary
    pub nutrition: Nutrition,
    /// Difficulty label ("Easy", "Medium", "Hard")
    pub difficulty: String,
    /// Cuisine label
    pub cuisine: String,
    /// Estimated rating between 1.0 and 5.0
    pub rating: f64,
    /// Estimated number of reviews
    pub review_count: u32,
}

/// One ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One instruction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionStep {
    /// 1-based position
    pub step_number: u32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Nutrition summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

/// Where a video link points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSource {
    #[serde(rename = "YouTube")]
    YouTube,
    #[serde(rename = "Web")]
    Web,
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YouTube => write!(f, "YouTube"),
            Self::Web => write!(f, "Web"),
        }
    }
}

/// A supporting video link. Unique by `uri`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub title: String,
    pub uri: String,
    pub source: VideoSource,
}

/// A user rating between 1 and 5 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserRating(u8);

impl UserRating {
    /// Smallest accepted rating
    pub const MIN: u8 = 1;
    /// Largest accepted rating
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_scout::models::UserRating;
    ///
    /// assert_eq!(UserRating::new(4).unwrap().value(), 4);
    /// assert!(UserRating::new(0).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, PersistenceError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PersistenceError::InvalidRating(value))
        }
    }

    /// The numeric value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UserRating {
    type Error = PersistenceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserRating> for u8 {
    fn from(rating: UserRating) -> Self {
        rating.0
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed search as stored in the history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    /// Unique identifier (ULID)
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// The query text exactly as the user typed it
    pub query: String,
    pub recipe: RecipeRecord,
    pub videos: Vec<VideoResult>,
    /// Absent until the user rates the recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<UserRating>,
}

impl SavedSession {
    /// Creation time as a UTC datetime, if the stored value is in range
    pub fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// How the query text should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The query names a dish
    #[default]
    Dish,
    /// The query lists ingredients on hand
    Ingredients,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dish => write!(f, "dish"),
            Self::Ingredients => write!(f, "ingredients"),
        }
    }
}

/// Optional preferences that shape the recipe prompt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Dietary labels such as "vegetarian" or "gluten-free"
    #[serde(default)]
    pub dietary: Vec<String>,
    /// Preferred cuisine
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Upper bound on prep plus cook time, in minutes
    #[serde(default)]
    pub max_total_minutes: Option<u32>,
    /// Preferred difficulty label
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl SearchFilters {
    /// True when no preference is set
    pub fn is_empty(&self) -> bool {
        self.dietary.is_empty()
            && self.cuisine.is_none()
            && self.max_total_minutes.is_none()
            && self.difficulty.is_none()
    }
}

/// A value that may have been produced by swallowing an error
///
/// Non-critical paths (history reads, video and image lookups) never fail
/// outward. This wrapper keeps the fallback value while recording why it
/// was used, so "empty" and "empty because something broke" stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct Degradable<T> {
    /// The value, or the fallback when degraded
    pub value: T,
    /// Why the fallback was used
    pub degraded: Option<String>,
}

impl<T> Degradable<T> {
    /// A value obtained normally
    pub fn ok(value: T) -> Self {
        Self {
            value,
            degraded: None,
        }
    }

    /// A fallback value standing in for a failure
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            degraded: Some(reason.into()),
        }
    }

    /// Whether the value is a fallback
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Drop the marker and keep the value
    pub fn into_value(self) -> T {
        self.value
    }
}
