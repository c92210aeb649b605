use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Sort key passed through to the `sort` query parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sort {
    #[default]
    Newest,
    Oldest,
    Other(String),
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Newest => write!(f, "-published_at"),
            Self::Oldest => write!(f, "published_at"),
            Self::Other(key) => write!(f, "{}", key),
        }
    }
}

impl FromStr for Sort {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-published_at" => Self::Newest,
            "published_at" => Self::Oldest,
            other => Self::Other(other.to_string()),
        })
    }
}

/// The page / page size / sort triple that drives the next fetch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub page: u32,
    pub page_size: u32,
    pub sort: Sort,
}

impl Query {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn new(page: u32, page_size: u32, sort: Sort) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            sort,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self::new(page, self.page_size, self.sort.clone())
    }

    /// Changing the page size always starts over from the first page.
    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self::new(1, page_size, self.sort.clone())
    }

    pub fn with_sort(&self, sort: Sort) -> Self {
        Self::new(self.page, self.page_size, sort)
    }

    /// 1-based index of the first item on this page.
    pub fn first_item(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64 + 1
    }

    /// 1-based index of the last item on this page, capped at `total`.
    pub fn last_item(&self, total: u64) -> u64 {
        (self.page as u64 * self.page_size as u64).min(total)
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE, Sort::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_round_trip_strings() {
        assert_eq!(Sort::default().to_string(), "-published_at");
        assert_eq!("published_at".parse::<Sort>().unwrap(), Sort::Oldest);
        assert_eq!(
            "-title".parse::<Sort>().unwrap(),
            Sort::Other("-title".to_string())
        );
    }

    #[test]
    fn test_page_size_resets_page() {
        let query = Query::default().with_page(4).with_page_size(20);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn test_sort_keeps_page() {
        let query = Query::default().with_page(3).with_sort(Sort::Oldest);
        assert_eq!(query.page, 3);
        assert_eq!(query.sort, Sort::Oldest);
    }

    #[test]
    fn test_item_range() {
        let query = Query::new(2, 10, Sort::Newest);
        assert_eq!((query.first_item(), query.last_item(25)), (11, 20));
        let query = Query::new(3, 10, Sort::Newest);
        assert_eq!((query.first_item(), query.last_item(25)), (21, 25));
        let query = Query::new(0, 0, Sort::Newest);
        assert_eq!((query.page, query.page_size), (1, 1));
    }
}
