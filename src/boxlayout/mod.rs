//! Recursive box layout: turns a tree of weighted/fixed-size boxes into a map
//! of window name to cell rectangle.

use std::collections::HashMap;
use std::fmt;

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children are stacked top to bottom.
    #[default]
    Row,
    /// Children sit side by side, left to right.
    Column,
}

/// Half-open cell rectangle: `x0..x1` by `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Dimensions {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x.saturating_add(width),
            y1: y.saturating_add(height),
        }
    }

    pub fn width(&self) -> u16 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0
    }

    /// Zero-area windows are addressable but must not be drawn.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn area(&self) -> u32 {
        u32::from(self.width()) * u32::from(self.height())
    }
}

impl From<Dimensions> for Rect {
    fn from(d: Dimensions) -> Self {
        Rect::new(d.x0, d.y0, d.width(), d.height())
    }
}

pub type ConditionalChildren<'a> = Box<dyn Fn(u16, u16) -> Vec<LayoutBox<'a>> + 'a>;

pub enum Content<'a> {
    Window(String),
    Children(Vec<LayoutBox<'a>>),
    /// Children computed from the width and height this box is given.
    Conditional(ConditionalChildren<'a>),
}

impl fmt::Debug for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Window(name) => f.debug_tuple("Window").field(name).finish(),
            Content::Children(children) => f.debug_tuple("Children").field(children).finish(),
            Content::Conditional(_) => f.write_str("Conditional(..)"),
        }
    }
}

#[derive(Debug)]
pub struct LayoutBox<'a> {
    pub direction: Direction,
    pub weight: u32,
    pub size: Option<u16>,
    pub content: Content<'a>,
}

impl<'a> LayoutBox<'a> {
    pub fn window(name: impl Into<String>) -> Self {
        Self {
            direction: Direction::Row,
            weight: 0,
            size: None,
            content: Content::Window(name.into()),
        }
    }

    pub fn split(direction: Direction, children: Vec<LayoutBox<'a>>) -> Self {
        Self {
            direction,
            weight: 0,
            size: None,
            content: Content::Children(children),
        }
    }

    pub fn conditional<F>(direction: Direction, children: F) -> Self
    where
        F: Fn(u16, u16) -> Vec<LayoutBox<'a>> + 'a,
    {
        Self {
            direction,
            weight: 0,
            size: None,
            content: Content::Conditional(Box::new(children)),
        }
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    pub fn window_name(&self) -> Option<&str> {
        match &self.content {
            Content::Window(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.size.is_some()
    }
}

pub fn arrange_windows(
    root: &LayoutBox<'_>,
    x0: u16,
    y0: u16,
    width: u16,
    height: u16,
) -> HashMap<String, Dimensions> {
    let mut result = HashMap::new();
    arrange_into(root, x0, y0, width, height, &mut result);
    result
}

fn arrange_into(
    node: &LayoutBox<'_>,
    x0: u16,
    y0: u16,
    width: u16,
    height: u16,
    out: &mut HashMap<String, Dimensions>,
) {
    let computed;
    let children: &[LayoutBox<'_>] = match &node.content {
        Content::Window(name) => {
            if !name.is_empty() {
                let previous = out.insert(name.clone(), Dimensions::new(x0, y0, width, height));
                debug_assert!(previous.is_none(), "window '{name}' appears twice in layout");
            }
            return;
        }
        Content::Children(children) => children,
        Content::Conditional(children_for) => {
            computed = children_for(width, height);
            &computed
        }
    };

    let available = match node.direction {
        Direction::Column => width,
        Direction::Row => height,
    };

    let sizes = calc_sizes(children, available);

    let mut offset: u16 = 0;
    for (child, size) in children.iter().zip(sizes) {
        match node.direction {
            Direction::Column => {
                arrange_into(child, x0.saturating_add(offset), y0, size, height, out)
            }
            Direction::Row => arrange_into(child, x0, y0.saturating_add(offset), width, size, out),
        }
        offset = offset.saturating_add(size);
    }
}

/// Splits `available` cells among `boxes`. Static boxes take their size (as
/// far as space remains), dynamic boxes share the rest by weight. The result
/// never sums to more than `available`.
pub fn calc_sizes(boxes: &[LayoutBox<'_>], available: u16) -> Vec<u16> {
    let mut weights = normalize_weights(&boxes.iter().map(|b| b.weight).collect::<Vec<_>>());

    let mut result = vec![0u16; boxes.len()];
    let mut remaining = available;
    for (i, b) in boxes.iter().enumerate() {
        if let Some(size) = b.size {
            result[i] = size.min(remaining);
            remaining -= result[i];
        }
    }

    let dynamic: Vec<usize> = (0..boxes.len()).filter(|&i| !boxes[i].is_static()).collect();
    let total_weight: u32 = dynamic.iter().map(|&i| weights[i]).sum();

    if total_weight == 0 {
        // a lone zero-weight child still fills its parent
        if boxes.len() == 1 && dynamic.len() == 1 {
            result[0] = remaining;
        }
        return result;
    }

    let space = u32::from(remaining);
    let unit = space / total_weight;
    let mut extra = space % total_weight;

    for &i in &dynamic {
        result[i] = (unit * weights[i]) as u16;
    }

    // hand out the remainder one cell at a time, earliest boxes first
    while extra > 0 {
        for &i in &dynamic {
            if weights[i] > 0 {
                result[i] += 1;
                weights[i] -= 1;
                extra -= 1;
                if extra == 0 {
                    break;
                }
            }
        }
    }

    result
}

/// Removes the common factor from weights, e.g. `[2, 4, 4]` becomes `[1, 2, 2]`.
pub fn normalize_weights(weights: &[u32]) -> Vec<u32> {
    let divisor = weights.iter().copied().filter(|&w| w > 0).fold(0, gcd);
    if divisor <= 1 {
        return weights.to_vec();
    }
    weights.iter().map(|w| w / divisor).collect()
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
