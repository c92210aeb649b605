use std::fmt::{Display, Formatter};

use ideas_types::query::Query;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Ideas(Query),
}

impl Endpoint {
    const IDEAS_PATH: &'static str = "api/ideas";
    const APPENDS: [&'static str; 2] = ["small_image", "medium_image"];

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ideas(query) => {
                write!(
                    f,
                    "{}?page[number]={}&page[size]={}",
                    Self::IDEAS_PATH,
                    query.page,
                    query.page_size
                )?;
                for append in Self::APPENDS {
                    write!(f, "&append[]={}", append)?;
                }
                write!(f, "&sort={}", query.sort)
            }
        }
    }
}
