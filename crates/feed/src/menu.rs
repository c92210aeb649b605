#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            active: false,
        }
    }
}

/// Final `/`-separated segment of a path; empty for a trailing slash.
pub fn current_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Marks the links whose href equals the final segment of `path` as active
/// and clears the rest.
pub fn highlight(links: &mut [NavLink], path: &str) {
    let segment = current_segment(path);
    for link in links.iter_mut() {
        link.active = link.href == segment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<NavLink> {
        ["index.html", "ideas.html", "about.html"]
            .into_iter()
            .map(NavLink::new)
            .collect()
    }

    #[test]
    fn test_highlight_matching_link() {
        let mut links = links();
        links[0].active = true;
        highlight(&mut links, "/site/ideas.html");
        let active: Vec<_> = links.iter().map(|l| l.active).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn test_trailing_slash_matches_nothing() {
        let mut links = links();
        highlight(&mut links, "/site/");
        assert!(links.iter().all(|l| !l.active));
        assert_eq!(current_segment("/site/"), "");
        assert_eq!(current_segment("about.html"), "about.html");
    }
}
