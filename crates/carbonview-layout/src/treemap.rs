//! Squarified treemap layout.
//!
//! Follows Bruls et al.: items are added to the current row while the row's
//! worst aspect ratio improves, then the row is committed as a horizontal or
//! vertical strip of the remaining rectangle. Sibling rectangle area is
//! exactly proportional to weight before padding is applied, so the partition
//! conserves the parent's area and is monotonic in weight.

use carbonview_core::{Rect, Size};
use serde::{Deserialize, Serialize};

/// A weighted tree node to be laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapNode {
    /// Stable category identifier (`personal`, `personal-commute`, ...)
    pub id: String,
    /// Display label
    pub label: String,
    /// Weight; for branches this equals the sum of children by construction
    pub weight: f64,
    /// Ordered children, empty for leaves
    pub children: Vec<TreemapNode>,
}

impl TreemapNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight,
            children: Vec::new(),
        }
    }

    /// Create a branch node; its weight is the sum of its children.
    #[must_use]
    pub fn branch(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TreemapNode>,
    ) -> Self {
        let weight = children.iter().map(|c| c.weight).sum();
        Self {
            id: id.into(),
            label: label.into(),
            weight,
            children,
        }
    }

    /// Check if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Layout configuration.
///
/// The defaults mirror the reference UI: 10 px outer padding, 3 px between
/// sibling cells, a 350 px tall container, name labels from 30 px cells and
/// value/percentage labels from 60×50 px cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapConfig {
    /// Padding applied once around the whole layout (px)
    pub outer_padding: f32,
    /// Padding between sibling rectangles (px)
    pub inner_padding: f32,
    /// Minimum cell side before the name label is shown (px)
    pub label_min_side: f32,
    /// Minimum cell width before value/percentage labels are shown (px)
    pub detail_min_width: f32,
    /// Minimum cell height before value/percentage labels are shown (px)
    pub detail_min_height: f32,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            outer_padding: 10.0,
            inner_padding: 3.0,
            label_min_side: 30.0,
            detail_min_width: 60.0,
            detail_min_height: 50.0,
        }
    }
}

/// A leaf rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl LayoutRect {
    /// Width of the rectangle (never negative).
    #[must_use]
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height of the rectangle (never negative).
    #[must_use]
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Convert to a core [`Rect`].
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.width(), self.height())
    }

    /// Shrink by `amount` on every side, collapsing to a point if too small.
    #[must_use]
    fn inset(&self, amount: f32) -> Self {
        let cx = (self.x0 + self.x1) / 2.0;
        let cy = (self.y0 + self.y1) / 2.0;
        Self {
            x0: (self.x0 + amount).min(cx),
            y0: (self.y0 + amount).min(cy),
            x1: (self.x1 - amount).max(cx),
            y1: (self.y1 - amount).max(cy),
        }
    }
}

/// A laid-out leaf cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapCell {
    /// Category identifier of the leaf
    pub id: String,
    /// Display label
    pub label: String,
    /// Leaf weight
    pub weight: f64,
    /// Share of the total weight, 0.0..=1.0 (0 when the total is 0)
    pub fraction: f64,
    /// Final rectangle with inner padding applied
    pub rect: LayoutRect,
    /// Partition rectangle before inner padding (area-proportional)
    pub partition: LayoutRect,
    /// Nesting depth (1 = direct child of the root)
    pub depth: u16,
    /// Whether the cell is large enough for its name label
    pub show_label: bool,
    /// Whether the cell is large enough for value/percentage labels
    pub show_detail: bool,
}

/// The result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapLayout {
    /// All leaf cells in layout order
    pub cells: Vec<TreemapCell>,
    /// Total weight of the root
    pub total_weight: f64,
    /// The content rectangle after outer padding
    pub content: LayoutRect,
}

impl TreemapLayout {
    /// Find the cell containing a point, if any.
    #[must_use]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<&TreemapCell> {
        self.cells.iter().find(|cell| {
            x >= cell.rect.x0 && x <= cell.rect.x1 && y >= cell.rect.y0 && y <= cell.rect.y1
        })
    }
}

/// Compute a treemap layout for `root` within `size`.
///
/// Zero-weight nodes receive zero-area rectangles; the function never
/// produces NaN coordinates and never fails. A degenerate viewport (hidden
/// container reporting zero width) yields an empty cell list and the caller
/// is expected to re-run the pass once the container is visible.
#[must_use]
pub fn compute_layout(root: &TreemapNode, size: Size, config: &TreemapConfig) -> TreemapLayout {
    let content = LayoutRect {
        x0: config.outer_padding,
        y0: config.outer_padding,
        x1: (size.width - config.outer_padding).max(config.outer_padding),
        y1: (size.height - config.outer_padding).max(config.outer_padding),
    };

    let mut layout = TreemapLayout {
        cells: Vec::new(),
        total_weight: root.weight,
        content,
    };

    if size.is_degenerate() {
        tracing::debug!(width = size.width, height = size.height, "treemap viewport degenerate, deferring layout");
        return layout;
    }

    let total = root.weight;
    layout_children(&root.children, content, 1, total, config, &mut layout.cells);
    layout
}

fn layout_children(
    children: &[TreemapNode],
    rect: LayoutRect,
    depth: u16,
    total: f64,
    config: &TreemapConfig,
    out: &mut Vec<TreemapCell>,
) {
    if children.is_empty() {
        return;
    }

    // Largest first, stable for equal weights.
    let mut order: Vec<usize> = (0..children.len()).collect();
    order.sort_by(|&a, &b| {
        children[b]
            .weight
            .partial_cmp(&children[a].weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let positive: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| children[i].weight > 0.0 && children[i].weight.is_finite())
        .collect();
    let weight_sum: f64 = positive.iter().map(|&i| children[i].weight).sum();

    let parent_area = f64::from(rect.area());
    let partitions = if weight_sum > 0.0 && parent_area > 0.0 {
        let areas: Vec<f64> = positive
            .iter()
            .map(|&i| children[i].weight / weight_sum * parent_area)
            .collect();
        squarify(
            &areas,
            f64::from(rect.x0),
            f64::from(rect.y0),
            f64::from(rect.width()),
            f64::from(rect.height()),
        )
    } else {
        Vec::new()
    };

    for (slot, &idx) in positive.iter().enumerate() {
        let child = &children[idx];
        let partition = partitions.get(slot).map_or(
            zero_rect(rect.x0, rect.y0),
            |p| LayoutRect {
                x0: p.x as f32,
                y0: p.y as f32,
                x1: (p.x + p.w) as f32,
                y1: (p.y + p.h) as f32,
            },
        );
        emit(child, partition, depth, total, config, out);
    }

    // Zero-weight siblings still appear, as zero-area cells anchored at the
    // parent origin, so every category id stays addressable by the
    // highlight synchronizer.
    for idx in order.iter().copied().filter(|i| !positive.contains(i)) {
        let child = &children[idx];
        emit(
            child,
            zero_rect(rect.x0, rect.y0),
            depth,
            total,
            config,
            out,
        );
    }
}

fn emit(
    node: &TreemapNode,
    partition: LayoutRect,
    depth: u16,
    total: f64,
    config: &TreemapConfig,
    out: &mut Vec<TreemapCell>,
) {
    let padded = partition.inset(config.inner_padding / 2.0);

    if node.is_leaf() {
        let fraction = if total > 0.0 { node.weight / total } else { 0.0 };
        out.push(TreemapCell {
            id: node.id.clone(),
            label: node.label.clone(),
            weight: node.weight,
            fraction,
            rect: padded,
            partition,
            depth,
            show_label: padded.width() >= config.label_min_side
                && padded.height() >= config.label_min_side,
            show_detail: padded.width() >= config.detail_min_width
                && padded.height() >= config.detail_min_height,
        });
    } else {
        layout_children(&node.children, padded, depth + 1, total, config, out);
    }
}

fn zero_rect(x: f32, y: f32) -> LayoutRect {
    LayoutRect {
        x0: x,
        y0: y,
        x1: x,
        y1: y,
    }
}

/// Squarified tiling: keep adding items to the current row while the row's
/// worst aspect ratio improves, then commit the row as a strip along the
/// shorter side of the remaining rectangle.
fn squarify(areas: &[f64], mut x: f64, mut y: f64, mut w: f64, mut h: f64) -> Vec<Positioned> {
    let mut result = Vec::with_capacity(areas.len());

    let mut idx = 0usize;
    let mut row_start = 0usize;
    let mut row_sum = 0.0;
    let mut row_min = f64::INFINITY;
    let mut row_max = 0.0;

    while idx < areas.len() {
        if w <= 1e-6 || h <= 1e-6 {
            break;
        }

        let area = areas[idx];
        let side = w.min(h);
        let current = if row_sum > 0.0 {
            worst_aspect(row_min, row_max, row_sum, side)
        } else {
            f64::INFINITY
        };
        let next_sum = row_sum + area;
        let next_min = row_min.min(area);
        let next_max = row_max.max(area);
        let next = worst_aspect(next_min, next_max, next_sum, side);

        if row_sum <= 0.0 || next <= current {
            row_sum = next_sum;
            row_min = next_min;
            row_max = next_max;
            idx += 1;
            continue;
        }

        layout_row(
            &areas[row_start..idx],
            row_sum,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut result,
        );
        row_start = idx;
        row_sum = 0.0;
        row_min = f64::INFINITY;
        row_max = 0.0;
    }

    if row_sum > 0.0 && row_start < idx {
        layout_row(
            &areas[row_start..idx],
            row_sum,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut result,
        );
    }

    result
}

fn layout_row(
    row: &[f64],
    row_sum: f64,
    x: &mut f64,
    y: &mut f64,
    w: &mut f64,
    h: &mut f64,
    out: &mut Vec<Positioned>,
) {
    if row.is_empty() || row_sum <= 0.0 || *w <= 1e-8 || *h <= 1e-8 {
        return;
    }

    // Strip runs along the shorter side of the remaining rectangle.
    let horizontal = *w <= *h;
    let short = if horizontal { *w } else { *h };
    let thickness = row_sum / short;
    if !thickness.is_finite() || thickness <= 0.0 {
        return;
    }

    let mut offset = 0.0;
    for (i, &area) in row.iter().enumerate() {
        let mut length = area / thickness;
        if !length.is_finite() || length < 0.0 {
            continue;
        }
        // Absorb floating point error into the last rect of the strip.
        if i == row.len() - 1 {
            let remaining = if horizontal {
                (*w - offset).max(0.0)
            } else {
                (*h - offset).max(0.0)
            };
            if remaining.is_finite() && remaining > 0.0 {
                length = remaining;
            }
        }

        let pos = if horizontal {
            Positioned {
                x: *x + offset,
                y: *y,
                w: length,
                h: thickness,
            }
        } else {
            Positioned {
                x: *x,
                y: *y + offset,
                w: thickness,
                h: length,
            }
        };
        out.push(pos);
        offset += length;
    }

    if horizontal {
        *y += thickness;
        *h = (*h - thickness).max(0.0);
    } else {
        *x += thickness;
        *w = (*w - thickness).max(0.0);
    }
}

#[derive(Debug, Clone, Copy)]
struct Positioned {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

fn worst_aspect(min_a: f64, max_a: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_a <= 0.0 || max_a <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_a) / sum_sq;
    let b = sum_sq / (side_sq * min_a);
    a.max(b)
}
