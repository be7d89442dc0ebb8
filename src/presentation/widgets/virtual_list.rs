//! Fixed-height virtualized list.
//!
//! Only the items intersecting the viewport are rendered. Item `i` sits at
//! row `i * item_height - offset` of the viewport, where `offset` is the
//! scroll position in rows.

use std::ops::Range;

use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};

/// Indices of the items at least partly inside the viewport.
#[must_use]
pub fn visible_range(len: usize, item_height: u16, offset: usize, viewport: u16) -> Range<usize> {
    let h = usize::from(item_height.max(1));
    let start = offset / h;
    let end = (offset + usize::from(viewport)).div_ceil(h);
    start.min(len)..end.min(len)
}

/// Screen area of item `index`, clipped to `area`. `None` when the item is
/// outside the viewport.
#[must_use]
pub fn item_area(area: Rect, index: usize, item_height: u16, offset: usize) -> Option<Rect> {
    let h = i64::from(item_height.max(1));
    let top = i64::try_from(index).ok()? * h - i64::try_from(offset).ok()?;
    let bottom = top + h;
    let visible_top = top.max(0);
    let visible_bottom = bottom.min(i64::from(area.height));
    if visible_top >= visible_bottom {
        return None;
    }

    let y = area.y + u16::try_from(visible_top).ok()?;
    let height = u16::try_from(visible_bottom - visible_top).ok()?;
    Some(Rect::new(area.x, y, area.width, height))
}

/// Selection and scroll position of a virtual list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualListState {
    selected: Option<usize>,
    offset: usize,
}

impl VirtualListState {
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn select_next(&mut self, len: usize) {
        self.step(len, 1);
    }

    pub fn select_previous(&mut self, len: usize) {
        self.step(len, -1);
    }

    pub const fn select_first(&mut self, len: usize) {
        self.selected = if len == 0 { None } else { Some(0) };
    }

    pub const fn select_last(&mut self, len: usize) {
        self.selected = len.checked_sub(1);
    }

    pub fn page_down(&mut self, len: usize, page: usize) {
        self.step(len, isize::try_from(page.max(1)).unwrap_or(isize::MAX));
    }

    pub fn page_up(&mut self, len: usize, page: usize) {
        self.step(len, -isize::try_from(page.max(1)).unwrap_or(isize::MAX));
    }

    fn step(&mut self, len: usize, delta: isize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        let last = len - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => i.saturating_add_signed(delta).min(last),
        });
    }

    /// Keeps the selection valid after the list length changed.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match self.selected {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    /// Scrolls just enough to bring the selected item fully into view.
    pub fn scroll_to_selected(&mut self, item_height: u16, viewport: u16) {
        let Some(selected) = self.selected else {
            return;
        };
        let h = usize::from(item_height.max(1));
        let top = selected * h;
        let bottom = top + h;
        let viewport = usize::from(viewport);

        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset + viewport {
            self.offset = bottom.saturating_sub(viewport);
        }
    }
}

/// Renders items through a callback receiving `(index, area, buf, selected)`.
pub struct VirtualList<F> {
    len: usize,
    item_height: u16,
    render_item: F,
}

impl<F> VirtualList<F>
where
    F: FnMut(usize, Rect, &mut Buffer, bool),
{
    pub const fn new(len: usize, item_height: u16, render_item: F) -> Self {
        Self {
            len,
            item_height,
            render_item,
        }
    }
}

impl<F> StatefulWidget for VirtualList<F>
where
    F: FnMut(usize, Rect, &mut Buffer, bool),
{
    type State = VirtualListState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }
        state.clamp(self.len);
        state.scroll_to_selected(self.item_height, area.height);

        let max_offset =
            (self.len * usize::from(self.item_height.max(1))).saturating_sub(usize::from(area.height));
        state.offset = state.offset.min(max_offset);

        for index in visible_range(self.len, self.item_height, state.offset, area.height) {
            if let Some(item) = item_area(area, index, self.item_height, state.offset) {
                (self.render_item)(index, item, buf, state.selected == Some(index));
            }
        }
    }
}
