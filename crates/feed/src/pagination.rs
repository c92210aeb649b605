use std::{fmt::Write, ops::RangeInclusive};

use ideas_types::meta::PageMeta;
use tracing::warn;

/// Most page-number buttons shown at once.
pub const MAX_BUTTONS: u32 = 5;

/// The contiguous range of page numbers to show for `current_page` out of
/// `last_page`, at most [`MAX_BUTTONS`] wide. `last_page` must be non-zero.
pub fn window(current_page: u32, last_page: u32) -> RangeInclusive<u32> {
    if last_page <= MAX_BUTTONS {
        return 1..=last_page;
    }
    let half = MAX_BUTTONS / 2;
    if current_page <= half {
        1..=MAX_BUTTONS
    } else if current_page + half >= last_page {
        (last_page - MAX_BUTTONS + 1)..=last_page
    } else {
        (current_page - half)..=(current_page + half)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Previous,
    Page,
    Next,
}

impl ButtonKind {
    fn class(&self) -> &'static str {
        match self {
            Self::Previous => "prev",
            Self::Page => "page",
            Self::Next => "next",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub kind: ButtonKind,
    pub label: String,
    pub target: u32,
    pub disabled: bool,
    pub active: bool,
}

impl PageButton {
    /// The page a click on this button loads, if it is clickable.
    pub fn action(&self) -> Option<u32> {
        (!self.disabled).then_some(self.target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationBar {
    pub buttons: Vec<PageButton>,
}

impl PaginationBar {
    pub fn from_meta(meta: &PageMeta) -> Self {
        if meta.last_page == 0 {
            warn!("Pagination meta is missing or incorrect format: {:?}", meta);
            return Self::default();
        }
        let current = meta.current_page;
        let mut buttons = Vec::with_capacity(MAX_BUTTONS as usize + 2);
        buttons.push(PageButton {
            kind: ButtonKind::Previous,
            label: "«".to_string(),
            target: current.saturating_sub(1),
            disabled: !meta.has_previous(),
            active: false,
        });
        buttons.extend(window(current, meta.last_page).map(|page| PageButton {
            kind: ButtonKind::Page,
            label: page.to_string(),
            target: page,
            disabled: false,
            active: page == current,
        }));
        buttons.push(PageButton {
            kind: ButtonKind::Next,
            label: "»".to_string(),
            target: current + 1,
            disabled: !meta.has_next(),
            active: false,
        });
        Self { buttons }
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn pages(&self) -> Vec<u32> {
        self.buttons
            .iter()
            .filter(|b| b.kind == ButtonKind::Page)
            .map(|b| b.target)
            .collect()
    }

    pub fn active(&self) -> Option<&PageButton> {
        self.buttons.iter().find(|b| b.active)
    }

    pub fn previous(&self) -> Option<&PageButton> {
        self.buttons.first().filter(|b| b.kind == ButtonKind::Previous)
    }

    pub fn next(&self) -> Option<&PageButton> {
        self.buttons.last().filter(|b| b.kind == ButtonKind::Next)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for button in &self.buttons {
            let mut class = button.kind.class().to_string();
            if button.active {
                class.push_str(" active");
            }
            let _ = write!(
                html,
                "<button class=\"{}\"{}>{}</button>",
                class,
                if button.disabled { " disabled" } else { "" },
                button.label
            );
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u32, last_page: u32) -> PageMeta {
        PageMeta {
            current_page,
            last_page,
            total: last_page as u64 * 10,
            from: None,
            to: None,
            per_page: None,
            path: None,
        }
    }

    #[test]
    fn test_window_small() {
        for last in 1..=MAX_BUTTONS {
            for current in 1..=last {
                assert_eq!(window(current, last), 1..=last);
            }
        }
    }

    #[test]
    fn test_window_near_start() {
        for last in 6..20 {
            assert_eq!(window(1, last), 1..=5);
            assert_eq!(window(2, last), 1..=5);
        }
    }

    #[test]
    fn test_window_near_end() {
        for last in 6..20 {
            for current in (last - 2)..=last {
                assert_eq!(window(current, last), (last - 4)..=last);
            }
        }
    }

    #[test]
    fn test_window_middle() {
        for last in 6..20u32 {
            for current in 3..last.saturating_sub(2) {
                let range = window(current, last);
                assert_eq!(range, (current - 2)..=(current + 2));
                assert_eq!(range.count(), 5);
            }
        }
    }

    #[test]
    fn test_bar_first_page() {
        let bar = PaginationBar::from_meta(&meta(1, 3));
        assert_eq!(bar.pages(), vec![1, 2, 3]);
        assert!(bar.previous().unwrap().disabled);
        assert_eq!(bar.previous().unwrap().action(), None);
        assert!(!bar.next().unwrap().disabled);
        assert_eq!(bar.next().unwrap().action(), Some(2));
        assert_eq!(bar.active().unwrap().target, 1);
    }

    #[test]
    fn test_bar_last_page() {
        let bar = PaginationBar::from_meta(&meta(10, 10));
        assert_eq!(bar.pages(), vec![6, 7, 8, 9, 10]);
        assert_eq!(bar.previous().unwrap().action(), Some(9));
        assert!(bar.next().unwrap().disabled);
    }

    #[test]
    fn test_bar_single_page_disables_both() {
        let bar = PaginationBar::from_meta(&meta(1, 1));
        assert!(bar.previous().unwrap().disabled);
        assert!(bar.next().unwrap().disabled);
        assert_eq!(bar.buttons.len(), 3);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_bar_without_pages() {
        let bar = PaginationBar::from_meta(&meta(1, 0));
        assert!(bar.is_empty());
        assert!(logs_contain("Pagination meta is missing"));
    }

    #[test]
    fn test_bar_html() {
        let bar = PaginationBar::from_meta(&meta(2, 2));
        assert_eq!(
            bar.to_html(),
            "<button class=\"prev\">«</button>\
             <button class=\"page\">1</button>\
             <button class=\"page active\">2</button>\
             <button class=\"next\" disabled>»</button>"
        );
    }
}
