//! Footprint breakdown ingestion and category tree construction.
//!
//! The server renders four numeric seed fields; this module turns them into
//! the flat [`FootprintBreakdown`] and derives the two-level [`CategoryNode`]
//! tree the treemap and category list render. Splits are fixed ratios:
//! personal divides 40/35/25 into commute/home/diet, office divides 50/30/20
//! into electricity/equipment/supplies; travel and transactions stay leaves.

use carbonview_layout::TreemapNode;
use serde::{Deserialize, Serialize};

/// Raw seed values read from the page's hidden form fields.
///
/// Unparseable fields arrive as `None` and are treated as zero, matching the
/// reference UI's `parseFloat(x) || 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSeed {
    /// `personal-footprint` field
    pub personal: Option<f64>,
    /// `travel-footprint` field
    pub travel: Option<f64>,
    /// `office-footprint` field
    pub office: Option<f64>,
    /// `transactions-footprint` field
    pub transactions: Option<f64>,
}

impl BreakdownSeed {
    /// Parse one hidden field's string value; anything non-numeric is `None`.
    #[must_use]
    pub fn parse_field(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Flat category → value mapping for one footprint, in kg CO₂e.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintBreakdown {
    /// Personal category total
    pub personal: f64,
    /// Business travel category total
    pub travel: f64,
    /// Office usage category total
    pub office: f64,
    /// Transactions category total
    pub transactions: f64,
}

/// Fixed split ratios for the personal category: commute, home, diet.
pub const PERSONAL_SPLIT: [(f64, &str, &str); 3] = [
    (0.40, "personal-commute", "Commute"),
    (0.35, "personal-home", "Home"),
    (0.25, "personal-diet", "Diet"),
];

/// Fixed split ratios for the office category: electricity, equipment,
/// supplies.
pub const OFFICE_SPLIT: [(f64, &str, &str); 3] = [
    (0.50, "office-electricity", "Electricity"),
    (0.30, "office-equipment", "Equipment"),
    (0.20, "office-supplies", "Supplies"),
];

impl FootprintBreakdown {
    /// Build a breakdown from seed fields, clamping negatives to zero.
    #[must_use]
    pub fn from_seed(seed: &BreakdownSeed) -> Self {
        let clean = |v: Option<f64>| v.unwrap_or(0.0).max(0.0);
        Self {
            personal: clean(seed.personal),
            travel: clean(seed.travel),
            office: clean(seed.office),
            transactions: clean(seed.transactions),
        }
    }

    /// Transactions participate only when strictly positive.
    #[must_use]
    pub fn has_transactions(&self) -> bool {
        self.transactions > 0.0
    }

    /// Total across top-level categories.
    ///
    /// This is the denominator for every percentage in the views. It is
    /// computed from the flat top-level values, not from a re-derived leaf
    /// sum, so edited split ratios cannot skew percentages.
    #[must_use]
    pub fn total(&self) -> f64 {
        let base = self.personal + self.travel + self.office;
        if self.has_transactions() {
            base + self.transactions
        } else {
            base
        }
    }

    /// Chart labels, in display order; transactions appears only when
    /// present.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = vec!["Personal", "Business Travel", "Office Usage"];
        if self.has_transactions() {
            labels.push("Transactions");
        }
        labels
    }

    /// Chart values aligned to [`labels`](Self::labels).
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![self.personal, self.travel, self.office];
        if self.has_transactions() {
            values.push(self.transactions);
        }
        values
    }

    /// Main category ids aligned to [`labels`](Self::labels).
    #[must_use]
    pub fn category_ids(&self) -> Vec<&'static str> {
        let mut ids = vec!["personal", "travel", "office"];
        if self.has_transactions() {
            ids.push("transactions");
        }
        ids
    }

    /// Derive the two-level category tree.
    ///
    /// Zero-valued parents still synthesize zero-valued children, so the
    /// layout downstream never divides by a missing node and every category
    /// id stays addressable.
    #[must_use]
    pub fn to_tree(&self) -> CategoryNode {
        let mut children = vec![
            CategoryNode::split("personal", "Personal", self.personal, &PERSONAL_SPLIT),
            CategoryNode::leaf("travel", "Business Travel", self.travel),
            CategoryNode::split("office", "Office Usage", self.office, &OFFICE_SPLIT),
        ];
        if self.has_transactions() {
            children.push(CategoryNode::leaf(
                "transactions",
                "Transactions",
                self.transactions,
            ));
        }
        CategoryNode::branch("root", "Carbon Footprint", children)
    }
}

/// A node of the category tree.
///
/// Parent values equal the sum of their children by construction; the tree
/// is immutable after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Display label
    pub name: String,
    /// Numeric weight in kg CO₂e
    pub value: f64,
    /// Stable category id; subcategories are namespaced `<parent>-<child>`
    pub category: String,
    /// Ordered children, empty for leaves
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(category: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            category: category.into(),
            children: Vec::new(),
        }
    }

    /// Create a branch whose value is the sum of its children.
    #[must_use]
    pub fn branch(
        category: impl Into<String>,
        name: impl Into<String>,
        children: Vec<CategoryNode>,
    ) -> Self {
        let value = children.iter().map(|c| c.value).sum();
        Self {
            name: name.into(),
            value,
            category: category.into(),
            children,
        }
    }

    /// Create a branch by splitting `value` across fixed proportions.
    #[must_use]
    pub fn split(
        category: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        ratios: &[(f64, &str, &str)],
    ) -> Self {
        let children = ratios
            .iter()
            .map(|(ratio, id, label)| Self::leaf(*id, *label, value * ratio))
            .collect();
        Self::branch(category, name, children)
    }

    /// Check if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum of leaf values under this node.
    #[must_use]
    pub fn leaf_sum(&self) -> f64 {
        if self.is_leaf() {
            self.value
        } else {
            self.children.iter().map(Self::leaf_sum).sum()
        }
    }

    /// Convert into the layout engine's weighted tree.
    #[must_use]
    pub fn to_treemap(&self) -> TreemapNode {
        if self.is_leaf() {
            TreemapNode::leaf(self.category.clone(), self.name.clone(), self.value)
        } else {
            TreemapNode::branch(
                self.category.clone(),
                self.name.clone(),
                self.children.iter().map(Self::to_treemap).collect(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_seed() -> BreakdownSeed {
        BreakdownSeed {
            personal: Some(100.0),
            travel: Some(50.0),
            office: Some(80.0),
            transactions: Some(0.0),
        }
    }

    // ===== Seed Parsing =====

    #[test]
    fn test_parse_field() {
        assert_eq!(BreakdownSeed::parse_field("123.5"), Some(123.5));
        assert_eq!(BreakdownSeed::parse_field(" 42 "), Some(42.0));
        assert_eq!(BreakdownSeed::parse_field(""), None);
        assert_eq!(BreakdownSeed::parse_field("abc"), None);
        assert_eq!(BreakdownSeed::parse_field("NaN"), None);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let breakdown = FootprintBreakdown::from_seed(&BreakdownSeed::default());
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        let seed = BreakdownSeed {
            personal: Some(-5.0),
            ..sample_seed()
        };
        let breakdown = FootprintBreakdown::from_seed(&seed);
        assert_eq!(breakdown.personal, 0.0);
    }

    // ===== Transactions Inclusion Rule =====

    #[test]
    fn test_zero_transactions_excluded_from_labels() {
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        assert!(!breakdown.has_transactions());
        assert_eq!(
            breakdown.labels(),
            vec!["Personal", "Business Travel", "Office Usage"]
        );
        assert_eq!(breakdown.values(), vec![100.0, 50.0, 80.0]);
    }

    #[test]
    fn test_positive_transactions_included() {
        let seed = BreakdownSeed {
            transactions: Some(12.5),
            ..sample_seed()
        };
        let breakdown = FootprintBreakdown::from_seed(&seed);
        assert!(breakdown.has_transactions());
        assert_eq!(breakdown.labels().len(), 4);
        assert_eq!(breakdown.values()[3], 12.5);
        assert_eq!(breakdown.category_ids()[3], "transactions");
    }

    // ===== Tree Construction =====

    #[test]
    fn test_personal_splits_forty_thirty_five_twenty_five() {
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        let tree = breakdown.to_tree();
        let personal = &tree.children[0];
        assert_eq!(personal.category, "personal");
        assert_eq!(personal.children[0].category, "personal-commute");
        assert_eq!(personal.children[0].value, 40.0);
        assert_eq!(personal.children[1].value, 35.0);
        assert_eq!(personal.children[2].value, 25.0);
    }

    #[test]
    fn test_office_splits_fifty_thirty_twenty() {
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        let tree = breakdown.to_tree();
        let office = &tree.children[2];
        assert_eq!(office.children[0].value, 40.0);
        assert_eq!(office.children[1].value, 24.0);
        assert_eq!(office.children[2].value, 16.0);
    }

    #[test]
    fn test_parent_value_equals_child_sum() {
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        let tree = breakdown.to_tree();
        for child in &tree.children {
            if !child.is_leaf() {
                assert!((child.value - child.leaf_sum()).abs() < 1e-9);
            }
        }
        assert!((tree.value - tree.leaf_sum()).abs() < 1e-9);
    }

    #[test]
    fn test_top_level_values_match_leaf_sums() {
        // Top-level child values sum to the corresponding leaf sums
        // within floating-point tolerance.
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        let tree = breakdown.to_tree();
        let personal = &tree.children[0];
        assert!((personal.leaf_sum() - breakdown.personal).abs() < 1e-9);
        let office = &tree.children[2];
        assert!((office.leaf_sum() - breakdown.office).abs() < 1e-9);
    }

    #[test]
    fn test_zero_parent_synthesizes_zero_children() {
        let seed = BreakdownSeed {
            personal: Some(0.0),
            ..sample_seed()
        };
        let tree = FootprintBreakdown::from_seed(&seed).to_tree();
        let personal = &tree.children[0];
        assert_eq!(personal.children.len(), 3);
        assert!(personal.children.iter().all(|c| c.value == 0.0));
    }

    #[test]
    fn test_transactions_leaf_appears_when_positive() {
        let seed = BreakdownSeed {
            transactions: Some(20.0),
            ..sample_seed()
        };
        let tree = FootprintBreakdown::from_seed(&seed).to_tree();
        assert_eq!(tree.children.len(), 4);
        let transactions = &tree.children[3];
        assert!(transactions.is_leaf());
        assert_eq!(transactions.category, "transactions");
    }

    #[test]
    fn test_total_uses_top_level_values() {
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        assert_eq!(breakdown.total(), 230.0);
    }

    #[test]
    fn test_tree_converts_to_treemap() {
        let breakdown = FootprintBreakdown::from_seed(&sample_seed());
        let treemap = breakdown.to_tree().to_treemap();
        assert_eq!(treemap.weight, 230.0);
        assert_eq!(treemap.children.len(), 3);
        assert_eq!(treemap.children[0].children.len(), 3);
        assert_eq!(treemap.children[0].children[0].id, "personal-commute");
    }
}
