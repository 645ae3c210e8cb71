use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Fallback page size before the first frame has been composed.
const DEFAULT_PAGE_ROWS: usize = 10;

/// Scroll position plus a memoized copy of the content lines for one width.
#[derive(Debug, Default)]
pub struct ViewportState {
    pub scroll_offset: usize,
    /// Content rows visible in the last composed frame.
    page_rows: usize,
    /// Largest valid offset seen by the last composed frame.
    max_offset: Option<usize>,
    cached_width: Option<u16>,
    cached_lines: Option<Vec<Line<'static>>>,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content lines for `width`, rebuilt only when the width changed or the
    /// cache was invalidated.
    pub fn content(
        &mut self,
        width: u16,
        build: impl FnOnce(u16) -> Vec<Line<'static>>,
    ) -> &[Line<'static>] {
        if self.cached_width != Some(width) {
            self.cached_lines = None;
        }
        self.cached_width = Some(width);
        self.cached_lines.get_or_insert_with(|| build(width))
    }

    pub fn is_cached(&self) -> bool {
        self.cached_lines.is_some()
    }

    pub fn invalidate(&mut self) {
        self.cached_lines = None;
    }

    /// New content: back to the top, cache dropped.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.max_offset = None;
        self.invalidate();
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.clamp(self.scroll_offset.saturating_add(rows));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    pub fn scroll_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll_offset = self.max_offset.unwrap_or(usize::MAX);
    }

    /// Record what the last composed frame decided.
    pub fn apply(&mut self, frame: &ComposedFrame) {
        self.scroll_offset = frame.scroll_offset;
        self.page_rows = frame.viewport_rows;
        self.max_offset = Some(frame.max_offset);
    }

    fn page_size(&self) -> usize {
        if self.page_rows == 0 {
            DEFAULT_PAGE_ROWS
        } else {
            self.page_rows
        }
    }

    fn clamp(&self, offset: usize) -> usize {
        match self.max_offset {
            Some(max) => offset.min(max),
            None => offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComposedFrame {
    pub lines: Vec<Line<'static>>,
    pub scroll_offset: usize,
    /// Content rows shown; 0 when nothing scrolls or nothing fits.
    pub viewport_rows: usize,
    pub max_offset: usize,
}

/// Fit `content` above `footer` in `height` rows.
///
/// When the content overflows, one row is given to a scroll indicator and the
/// offset is clamped to `[0, content.len() - viewport_rows]`. The footer is
/// always rendered; if it alone exceeds `height` it is cut to `height`.
pub fn compose_frame(
    content: &[Line<'static>],
    footer: &[Line<'static>],
    height: usize,
    scroll_offset: usize,
    indicator_style: Style,
) -> ComposedFrame {
    let available = height.saturating_sub(footer.len());

    if content.len() <= available {
        let lines = content.iter().chain(footer).take(height).cloned().collect();
        return ComposedFrame {
            lines,
            scroll_offset: 0,
            viewport_rows: content.len(),
            max_offset: 0,
        };
    }

    // No room for the indicator plus at least one content row.
    if available <= 1 {
        return ComposedFrame {
            lines: footer.iter().take(height).cloned().collect(),
            scroll_offset: scroll_offset.min(content.len()),
            viewport_rows: 0,
            max_offset: content.len(),
        };
    }

    let viewport_rows = available - 1;
    let max_offset = content.len().saturating_sub(viewport_rows);
    let offset = scroll_offset.min(max_offset);
    let end = offset + viewport_rows;

    let mut lines = Vec::with_capacity(height);
    lines.push(Line::from(Span::styled(
        scroll_indicator(offset, end, content.len(), max_offset),
        indicator_style,
    )));
    lines.extend(content[offset..end].iter().cloned());
    lines.extend(footer.iter().cloned());

    ComposedFrame {
        lines,
        scroll_offset: offset,
        viewport_rows,
        max_offset,
    }
}

/// Position text for the indicator row. `start..end` is the visible half-open range.
fn scroll_indicator(start: usize, end: usize, total: usize, max_offset: usize) -> String {
    let shown = end - start;
    if start == 0 {
        format!(" \u{2193} first {end} of {total} lines (PgDn for more)")
    } else if start >= max_offset {
        format!(" \u{2191} last {shown} of {total} lines (PgUp for more)")
    } else {
        format!(" \u{2195} lines {}-{end} of {total}", start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(prefix: &str, n: usize) -> Vec<Line<'static>> {
        (0..n).map(|i| Line::from(format!("{prefix}{i}"))).collect()
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_fits_without_scrolling() {
        let frame = compose_frame(&lines("c", 3), &lines("f", 2), 10, 7, Style::default());
        assert_eq!(frame.lines.len(), 5);
        assert_eq!(frame.scroll_offset, 0);
        assert_eq!(text(&frame.lines[0]), "c0");
        assert_eq!(text(&frame.lines[4]), "f1");
    }

    #[test]
    fn test_overflow_reserves_indicator_row() {
        let frame = compose_frame(&lines("c", 20), &lines("f", 4), 10, 0, Style::default());
        assert_eq!(frame.viewport_rows, 5);
        assert_eq!(frame.max_offset, 15);
        assert_eq!(frame.lines.len(), 10);
        assert!(text(&frame.lines[0]).contains("first 5 of 20"));
        assert_eq!(text(&frame.lines[1]), "c0");
        assert_eq!(text(&frame.lines[6]), "f0");
    }

    #[test]
    fn test_indicator_phrasing() {
        let content = lines("c", 20);
        let footer = lines("f", 4);
        let middle = compose_frame(&content, &footer, 10, 5, Style::default());
        assert!(text(&middle.lines[0]).contains("lines 6-10 of 20"));
        let bottom = compose_frame(&content, &footer, 10, 99, Style::default());
        assert_eq!(bottom.scroll_offset, 15);
        assert!(text(&bottom.lines[0]).contains("last 5 of 20"));
        assert_eq!(text(&bottom.lines[5]), "c19");
    }

    #[test]
    fn test_never_exceeds_height() {
        for height in 0..15 {
            for content_len in 0..25 {
                for footer_len in 0..8 {
                    for offset in [0, 3, 100] {
                        let frame = compose_frame(
                            &lines("c", content_len),
                            &lines("f", footer_len),
                            height,
                            offset,
                            Style::default(),
                        );
                        assert!(frame.lines.len() <= height);
                        assert!(frame.scroll_offset <= frame.max_offset);
                    }
                }
            }
        }
    }

    #[test]
    fn test_tiny_terminal_keeps_footer() {
        let frame = compose_frame(&lines("c", 20), &lines("f", 4), 3, 2, Style::default());
        assert_eq!(frame.lines.len(), 3);
        assert_eq!(text(&frame.lines[0]), "f0");
        assert_eq!(frame.viewport_rows, 0);

        let one_row = compose_frame(&lines("c", 20), &lines("f", 4), 5, 2, Style::default());
        assert_eq!(one_row.lines.len(), 4);
        assert_eq!(one_row.viewport_rows, 0);
    }

    #[test]
    fn test_page_down_clamps_to_max_offset() {
        let content = lines("c", 20);
        let footer = lines("f", 4);
        let mut viewport = ViewportState::new();
        let frame = compose_frame(&content, &footer, 10, viewport.scroll_offset, Style::default());
        viewport.apply(&frame);

        viewport.page_down();
        assert_eq!(viewport.scroll_offset, 5);
        viewport.page_down();
        assert_eq!(viewport.scroll_offset, 10);
        viewport.page_down();
        assert_eq!(viewport.scroll_offset, 15);
        viewport.page_down();
        assert_eq!(viewport.scroll_offset, 15);

        viewport.scroll_top();
        viewport.scroll_up(3);
        assert_eq!(viewport.scroll_offset, 0);
        viewport.scroll_bottom();
        assert_eq!(viewport.scroll_offset, 15);
    }

    #[test]
    fn test_content_cache_keyed_by_width() {
        let mut viewport = ViewportState::new();
        let mut builds = 0;
        viewport.content(40, |_| {
            builds += 1;
            lines("c", 2)
        });
        viewport.content(40, |_| {
            builds += 1;
            lines("c", 2)
        });
        assert_eq!(builds, 1);
        viewport.content(41, |_| {
            builds += 1;
            lines("c", 2)
        });
        assert_eq!(builds, 2);
        viewport.invalidate();
        assert!(!viewport.is_cached());
    }
}
