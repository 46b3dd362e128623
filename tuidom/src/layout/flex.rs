use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Size};

pub type LayoutResult = HashMap<String, Rect>;

/// Compute a rect for every element in the tree, keyed by element id.
pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    let width = resolve_size(element.width, available.width, element, true);
    let height = resolve_size(element.height, available.height, element, false);
    let rect = Rect::new(available.x, available.y, width, height);
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, &mut result);
    result
}

/// The area children are laid out in: rect minus border and padding.
pub(crate) fn content_rect(element: &Element, rect: Rect) -> Rect {
    let border = element.style.border.thickness();
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}

fn flex_weight(size: Size) -> Option<u16> {
    match size {
        Size::Fill => Some(1),
        Size::Flex(weight) => Some(weight.max(1)),
        _ => None,
    }
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let children = element.child_elements();
    if children.is_empty() {
        return;
    }

    let inner = content_rect(element, rect);
    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };

    // First pass: fixed-ish sizes and total flex weight
    let gap_total = element.gap.saturating_mul(children.len().saturating_sub(1) as u16);
    let mut fixed_total = 0u16;
    let mut weight_total = 0u16;
    let mut mains: Vec<Option<u16>> = Vec::with_capacity(children.len());

    for child in children {
        let child_main = if is_row { child.width } else { child.height };
        let main = match child_main {
            Size::Fixed(n) => Some(n),
            Size::Auto => Some(estimate_size(child, is_row)),
            Size::Percent(p) => Some((main_size as f32 * p) as u16),
            Size::Fill | Size::Flex(_) => None,
        };
        match main {
            Some(n) => fixed_total = fixed_total.saturating_add(n),
            None => weight_total += flex_weight(child_main).unwrap_or(1),
        }
        mains.push(main);
    }

    // Share remaining space between flex items by weight; leftover cells go to
    // the earliest items
    let remaining = main_size.saturating_sub(fixed_total.saturating_add(gap_total));
    let mut leftover = remaining;
    let mut flex_sizes: Vec<u16> = Vec::with_capacity(children.len());
    for child in children {
        let child_main = if is_row { child.width } else { child.height };
        let share = match flex_weight(child_main) {
            Some(weight) if weight_total > 0 => {
                (remaining as u32 * weight as u32 / weight_total as u32) as u16
            }
            _ => 0,
        };
        leftover = leftover.saturating_sub(share);
        flex_sizes.push(share);
    }
    for (i, child) in children.iter().enumerate() {
        if leftover == 0 {
            break;
        }
        let child_main = if is_row { child.width } else { child.height };
        if flex_weight(child_main).is_some() {
            flex_sizes[i] += 1;
            leftover -= 1;
        }
    }

    // Second pass: assign rects
    let mut offset = 0u16;
    for (i, child) in children.iter().enumerate() {
        let main = mains[i].unwrap_or(flex_sizes[i]);
        let main = if is_row {
            let main = child.min_width.map_or(main, |m| main.max(m));
            child.max_width.map_or(main, |m| main.min(m))
        } else {
            main
        };

        let child_cross = if is_row { child.height } else { child.width };
        let cross = match child_cross {
            Size::Fixed(n) => n,
            Size::Fill | Size::Flex(_) | Size::Auto => cross_size,
            Size::Percent(p) => (cross_size as f32 * p) as u16,
        };
        let cross = if is_row {
            cross
        } else {
            let cross = child.min_width.map_or(cross, |m| cross.max(m));
            child.max_width.map_or(cross, |m| cross.min(m))
        };

        let clamped_main = main.min(main_size.saturating_sub(offset));
        let clamped_cross = cross.min(cross_size);

        let child_rect = if is_row {
            Rect::new(inner.x + offset, inner.y, clamped_main, clamped_cross)
        } else {
            Rect::new(inner.x, inner.y + offset, clamped_cross, clamped_main)
        };

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);

        offset = offset.saturating_add(main).saturating_add(element.gap);
    }
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    let base = match size {
        Size::Fixed(n) => n,
        Size::Fill | Size::Flex(_) => available,
        Size::Auto => estimate_size(element, is_width),
        Size::Percent(p) => (available as f32 * p) as u16,
    };

    let base = if is_width {
        let base = element.min_width.map_or(base, |m| base.max(m));
        element.max_width.map_or(base, |m| base.min(m))
    } else {
        base
    };

    base.min(available)
}

/// Natural size of an element along one axis.
pub(crate) fn estimate_size(element: &Element, is_width: bool) -> u16 {
    let explicit = if is_width { element.width } else { element.height };
    if let Size::Fixed(n) = explicit {
        return n;
    }

    let border_size = element.style.border.thickness() * 2;
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content_size = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::TextInput {
            value, placeholder, ..
        } => {
            if is_width {
                // One extra cell for the cursor
                let shown = if value.is_empty() {
                    placeholder.as_deref().unwrap_or("")
                } else {
                    value
                };
                display_width(shown) as u16 + 1
            } else {
                1
            }
        }
        Content::Children(children) => {
            if children.is_empty() {
                0
            } else if element.direction == Direction::Row && is_width
                || element.direction == Direction::Column && !is_width
            {
                // Sum along main axis
                let gap_total = element.gap * (children.len().saturating_sub(1)) as u16;
                children
                    .iter()
                    .map(|c| estimate_size(c, is_width))
                    .fold(0u16, u16::saturating_add)
                    .saturating_add(gap_total)
            } else {
                // Max along cross axis
                children
                    .iter()
                    .map(|c| estimate_size(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    content_size + padding + border_size
}
