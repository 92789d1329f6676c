//! Ordering of matched declaration blocks.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#cascade-sort>

use core::cmp::Ordering;

/// Where a rule came from.
/// Spec: Section 6.2, Cascading Origins
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    UserAgent,
    User,
    #[default]
    Author,
}

/// Selector specificity as `(ids, classes, elements)`.
/// Spec: <https://www.w3.org/TR/selectors-4/#specificity-rules>
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    pub const ZERO: Self = Self(0, 0, 0);
}

/// Priority tuple used to order declaration blocks in the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CascadePriority {
    /// Spec: Section 6.4, Importance
    pub important: bool,
    /// Per-stylesheet boost; a higher offset wins at equal importance.
    pub importance_offset: i32,
    /// Spec: Section 6.2, Origins
    pub origin: Origin,
    /// Spec: Section 6.4.3, Specificity
    pub specificity: Specificity,
    /// Increasing with appearance across all inserted stylesheets.
    /// Spec: Section 6.4.4, Order of appearance
    pub source_order: u32,
}

impl CascadePriority {
    #[inline]
    pub const fn new(
        important: bool,
        importance_offset: i32,
        origin: Origin,
        specificity: Specificity,
        source_order: u32,
    ) -> Self {
        Self {
            important,
            importance_offset,
            origin,
            specificity,
            source_order,
        }
    }
}

/// Compare two priorities. `Ordering::Greater` means `left` wins over `right`.
pub fn compare_priority(left: &CascadePriority, right: &CascadePriority) -> Ordering {
    // Importance first (important wins)
    if left.important != right.important {
        return bool_order_desc(left.important, right.important);
    }

    if left.importance_offset != right.importance_offset {
        return left.importance_offset.cmp(&right.importance_offset);
    }

    // Normal: UA < User < Author. Important reverses the origin order.
    let left_rank = origin_rank(left.origin, left.important);
    let right_rank = origin_rank(right.origin, right.important);
    if left_rank != right_rank {
        return left_rank.cmp(&right_rank);
    }

    // Specificity: higher wins
    if left.specificity != right.specificity {
        return left.specificity.cmp(&right.specificity);
    }

    // Source order: later wins
    left.source_order.cmp(&right.source_order)
}

/// Return ordering where true > false.
const fn bool_order_desc(a_true_wins: bool, b_true_wins: bool) -> Ordering {
    match (a_true_wins, b_true_wins) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Spec: Section 6.4.1, important declarations invert origin precedence.
const fn origin_rank(origin: Origin, important: bool) -> i32 {
    let rank = match origin {
        Origin::UserAgent => 0,
        Origin::User => 1,
        Origin::Author => 2,
    };
    if important { -rank } else { rank }
}
