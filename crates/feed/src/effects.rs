use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderVisibility {
    #[default]
    Shown,
    Hidden,
}

/// What the host should apply after a scroll event.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub header: HeaderVisibility,
    /// CSS transform for the banner image, when there is one.
    pub banner_transform: Option<String>,
}

/// Header hide-on-scroll-down / show-on-scroll-up plus banner parallax.
#[derive(Debug, Clone, Default)]
pub struct ScrollEffects {
    last_offset: f64,
    header: HeaderVisibility,
    has_banner: bool,
}

impl ScrollEffects {
    pub const PARALLAX_FACTOR: f64 = 0.5;

    pub fn new(has_banner: bool) -> Self {
        if !has_banner {
            warn!("Banner element not found");
        }
        Self {
            has_banner,
            ..Default::default()
        }
    }

    pub fn header(&self) -> HeaderVisibility {
        self.header
    }

    pub fn on_scroll(&mut self, offset: f64) -> ScrollFrame {
        self.header = if offset > self.last_offset {
            HeaderVisibility::Hidden
        } else {
            HeaderVisibility::Shown
        };
        self.last_offset = offset;
        ScrollFrame {
            header: self.header,
            banner_transform: self.has_banner.then(|| banner_transform(offset)),
        }
    }
}

pub fn banner_transform(offset: f64) -> String {
    format!("translateY({}px)", offset * ScrollEffects::PARALLAX_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_follows_scroll_direction() {
        let mut effects = ScrollEffects::new(true);
        assert_eq!(effects.on_scroll(120.0).header, HeaderVisibility::Hidden);
        assert_eq!(effects.on_scroll(300.0).header, HeaderVisibility::Hidden);
        assert_eq!(effects.on_scroll(250.0).header, HeaderVisibility::Shown);
        assert_eq!(effects.on_scroll(250.0).header, HeaderVisibility::Shown);
        assert_eq!(effects.header(), HeaderVisibility::Shown);
    }

    #[test]
    fn test_parallax_offset() {
        let mut effects = ScrollEffects::new(true);
        assert_eq!(
            effects.on_scroll(101.0).banner_transform.as_deref(),
            Some("translateY(50.5px)")
        );
        assert_eq!(banner_transform(0.0), "translateY(0px)");
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_missing_banner() {
        let mut effects = ScrollEffects::new(false);
        let frame = effects.on_scroll(40.0);
        assert_eq!(frame.header, HeaderVisibility::Hidden);
        assert_eq!(frame.banner_transform, None);
        assert!(logs_contain("Banner element not found"));
    }
}
