//! The closed label sets every problem belongs to: 18 NeetCode categories and
//! three difficulties.
//!
//! This is the only place the lists are defined. Everything else (validation,
//! stats buckets, the `/taxonomy` endpoint) reads them from here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// NeetCode 250 category. Declaration order is the canonical display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
  #[serde(rename = "Arrays & Hashing")] ArraysHashing,
  #[serde(rename = "Two Pointers")] TwoPointers,
  #[serde(rename = "Sliding Window")] SlidingWindow,
  #[serde(rename = "Stack")] Stack,
  #[serde(rename = "Binary Search")] BinarySearch,
  #[serde(rename = "Linked List")] LinkedList,
  #[serde(rename = "Trees")] Trees,
  #[serde(rename = "Tries")] Tries,
  #[serde(rename = "Heap/Priority Queue")] HeapPriorityQueue,
  #[serde(rename = "Backtracking")] Backtracking,
  #[serde(rename = "Graphs")] Graphs,
  #[serde(rename = "Advanced Graphs")] AdvancedGraphs,
  #[serde(rename = "1-D DP")] OneDDp,
  #[serde(rename = "2-D DP")] TwoDDp,
  #[serde(rename = "Greedy")] Greedy,
  #[serde(rename = "Intervals")] Intervals,
  #[serde(rename = "Math & Geometry")] MathGeometry,
  #[serde(rename = "Bit Manipulation")] BitManipulation,
}

impl Category {
  pub const ALL: [Category; 18] = [
    Category::ArraysHashing,
    Category::TwoPointers,
    Category::SlidingWindow,
    Category::Stack,
    Category::BinarySearch,
    Category::LinkedList,
    Category::Trees,
    Category::Tries,
    Category::HeapPriorityQueue,
    Category::Backtracking,
    Category::Graphs,
    Category::AdvancedGraphs,
    Category::OneDDp,
    Category::TwoDDp,
    Category::Greedy,
    Category::Intervals,
    Category::MathGeometry,
    Category::BitManipulation,
  ];

  /// Exact label as stored and sent over the wire.
  pub const fn as_str(self) -> &'static str {
    match self {
      Category::ArraysHashing => "Arrays & Hashing",
      Category::TwoPointers => "Two Pointers",
      Category::SlidingWindow => "Sliding Window",
      Category::Stack => "Stack",
      Category::BinarySearch => "Binary Search",
      Category::LinkedList => "Linked List",
      Category::Trees => "Trees",
      Category::Tries => "Tries",
      Category::HeapPriorityQueue => "Heap/Priority Queue",
      Category::Backtracking => "Backtracking",
      Category::Graphs => "Graphs",
      Category::AdvancedGraphs => "Advanced Graphs",
      Category::OneDDp => "1-D DP",
      Category::TwoDDp => "2-D DP",
      Category::Greedy => "Greedy",
      Category::Intervals => "Intervals",
      Category::MathGeometry => "Math & Geometry",
      Category::BitManipulation => "Bit Manipulation",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Label outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "unknown label '{}'", self.0) }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for Category {
  type Err = UnknownLabel;

  /// Matching is exact: labels are case- and whitespace-sensitive.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Category::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| UnknownLabel(s.to_string()))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  pub const fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Difficulty {
  type Err = UnknownLabel;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Difficulty::ALL
      .into_iter()
      .find(|d| d.as_str() == s)
      .ok_or_else(|| UnknownLabel(s.to_string()))
  }
}

pub fn is_valid_category(s: &str) -> bool { s.parse::<Category>().is_ok() }

pub fn is_valid_difficulty(s: &str) -> bool { s.parse::<Difficulty>().is_ok() }

/// All categories in canonical order.
pub fn all_categories() -> &'static [Category] { &Category::ALL }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn eighteen_distinct_categories() {
    let labels: std::collections::HashSet<_> = all_categories().iter().map(|c| c.as_str()).collect();
    assert_eq!(labels.len(), 18);
    assert_eq!(all_categories()[0], Category::ArraysHashing);
    assert_eq!(all_categories()[17], Category::BitManipulation);
  }

  #[test]
  fn labels_parse_back_exactly() {
    for c in all_categories() {
      assert_eq!(c.as_str().parse::<Category>(), Ok(*c));
      assert!(is_valid_category(c.as_str()));
    }
    assert!(is_valid_category("Heap/Priority Queue"));
    assert!(!is_valid_category("InvalidCat"));
    assert!(!is_valid_category("graphs"));
    assert!(!is_valid_category(" Graphs"));
    assert!(!is_valid_category(""));
  }

  #[test]
  fn difficulty_membership() {
    assert!(is_valid_difficulty("Easy"));
    assert!(is_valid_difficulty("Medium"));
    assert!(is_valid_difficulty("Hard"));
    assert!(!is_valid_difficulty("easy"));
    assert!(!is_valid_difficulty("Expert"));
  }

  #[test]
  fn serde_uses_display_labels() {
    let json = serde_json::to_string(&Category::OneDDp).unwrap();
    assert_eq!(json, "\"1-D DP\"");
    let back: Category = serde_json::from_str("\"Math & Geometry\"").unwrap();
    assert_eq!(back, Category::MathGeometry);
    assert!(serde_json::from_str::<Category>("\"Dynamic Programming\"").is_err());
    assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"Hard\"");
  }
}
