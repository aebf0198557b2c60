use std::str::FromStr;

use refscope_core_types::{ElementRef, Viewport};
use serde::Serialize;

use crate::errors::SnapshotError;

/// Which nodes a snapshot pass exposes.
///
/// `Standard` is the policy used when the driver passes no filter:
/// interactive, semantic, named, and container-heuristic nodes inside
/// the viewport. `Interactive` narrows to interactive nodes only.
/// `All` keeps the standard classification but lifts viewport gating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapshotFilter {
    #[default]
    Standard,
    Interactive,
    All,
}

impl SnapshotFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotFilter::Standard => "default",
            SnapshotFilter::Interactive => "interactive",
            SnapshotFilter::All => "all",
        }
    }
}

impl FromStr for SnapshotFilter {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(SnapshotFilter::Standard),
            "interactive" => Ok(SnapshotFilter::Interactive),
            "all" => Ok(SnapshotFilter::All),
            other => Err(SnapshotError::UnknownFilter {
                name: other.to_string(),
            }),
        }
    }
}

/// One snapshot pass result: the serialized tree plus the viewport
/// dimensions it was captured against. Derived output only; nothing
/// here keeps the underlying nodes alive.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub content: String,
    pub viewport: Viewport,
}

/// One included node before serialization. Kept structured so the
/// bare-generic post-filter can run on fields instead of re-parsing
/// rendered lines.
pub(crate) struct LineRecord {
    pub depth: usize,
    pub role: String,
    pub name: String,
    pub reference: ElementRef,
    pub attrs: Vec<(&'static str, String)>,
    pub is_root: bool,
}

/// Rendered names never exceed this, whatever source they came from.
const NAME_RENDER_CAP: usize = 100;

impl LineRecord {
    /// Bare, nameless, attribute-less generics are pure layout noise.
    /// The root is exempt so output is never empty.
    pub fn is_layout_noise(&self) -> bool {
        !self.is_root && self.role == "generic" && self.name.is_empty() && self.attrs.is_empty()
    }

    pub fn render(&self) -> String {
        let mut line = String::new();
        for _ in 0..self.depth {
            line.push_str("  ");
        }
        line.push_str("- ");
        line.push_str(&self.role);
        if !self.name.is_empty() {
            let capped: String = self.name.chars().take(NAME_RENDER_CAP).collect();
            line.push_str(" \"");
            line.push_str(&escape_name(&capped));
            line.push('"');
        }
        line.push_str(&format!(" [ref={}]", self.reference));
        for (key, value) in &self.attrs {
            line.push_str(&format!(" {key}=\"{value}\""));
        }
        line
    }
}

fn escape_name(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parsing() {
        assert_eq!("all".parse::<SnapshotFilter>().unwrap(), SnapshotFilter::All);
        assert_eq!(
            "interactive".parse::<SnapshotFilter>().unwrap(),
            SnapshotFilter::Interactive
        );
        assert_eq!("".parse::<SnapshotFilter>().unwrap(), SnapshotFilter::Standard);
        assert!("everything".parse::<SnapshotFilter>().is_err());
    }

    #[test]
    fn line_render_shape() {
        let record = LineRecord {
            depth: 2,
            role: "button".into(),
            name: "Say \"hi\"".into(),
            reference: ElementRef::from_index(4),
            attrs: vec![("id", "greet".into()), ("type", "submit".into())],
            is_root: false,
        };
        assert_eq!(
            record.render(),
            "    - button \"Say \\\"hi\\\"\" [ref=ref_4] id=\"greet\" type=\"submit\""
        );
    }

    #[test]
    fn rendered_name_is_capped() {
        let record = LineRecord {
            depth: 0,
            role: "textbox".into(),
            name: "x".repeat(300),
            reference: ElementRef::from_index(1),
            attrs: vec![],
            is_root: false,
        };
        let line = record.render();
        let quoted = line.split('"').nth(1).unwrap();
        assert_eq!(quoted.chars().count(), 100);
    }

    #[test]
    fn layout_noise_detection() {
        let bare = LineRecord {
            depth: 1,
            role: "generic".into(),
            name: String::new(),
            reference: ElementRef::from_index(1),
            attrs: vec![],
            is_root: false,
        };
        assert!(bare.is_layout_noise());

        let named = LineRecord {
            depth: 1,
            role: "generic".into(),
            name: "sidebar".into(),
            reference: ElementRef::from_index(2),
            attrs: vec![],
            is_root: false,
        };
        assert!(!named.is_layout_noise());
    }
}
