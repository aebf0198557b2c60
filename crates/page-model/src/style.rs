/// Resolved rendering state for one element. The host page owns style
/// computation; this is the slice of it the subsystem reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    pub display_none: bool,
    pub visibility_hidden: bool,
    pub opacity: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display_none: false,
            visibility_hidden: false,
            opacity: 1.0,
        }
    }
}

impl ComputedStyle {
    pub fn hidden() -> Self {
        Self {
            display_none: true,
            ..Self::default()
        }
    }

    /// True when the element paints at all: not display:none, not
    /// visibility:hidden, opacity above zero.
    pub fn is_rendered(&self) -> bool {
        !self.display_none && !self.visibility_hidden && self.opacity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_renders() {
        assert!(ComputedStyle::default().is_rendered());
    }

    #[test]
    fn zero_opacity_does_not_render() {
        let style = ComputedStyle {
            opacity: 0.0,
            ..ComputedStyle::default()
        };
        assert!(!style.is_rendered());
        assert!(!ComputedStyle::hidden().is_rendered());
    }
}
