//! Node fills and edge strokes

use crate::gates::GateStatus;

const GREEN: &str = "#2ea043";
const RED: &str = "#cf222e";
const GREY: &str = "#848d97";
const YELLOW: &str = "#d29922";

/// Whether a node lies on the path implied by the current verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// On the path, satisfied
    Pass,
    /// On the path, blocking
    Fail,
    /// On the path, waiting
    Pending,
    /// Advisory
    Warn,
    /// Off the current path
    Unreached,
}

impl Reach {
    /// Fill color for the node
    pub const fn fill(self) -> &'static str {
        match self {
            Self::Pass => GREEN,
            Self::Fail => RED,
            Self::Pending | Self::Unreached => GREY,
            Self::Warn => YELLOW,
        }
    }

    /// Text color readable on top of [`Reach::fill`]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Warn => "#000",
            _ => "#fff",
        }
    }

    /// `Fail` when the condition holds, `Unreached` otherwise
    pub const fn fail_if(cond: bool) -> Self {
        if cond { Self::Fail } else { Self::Unreached }
    }

    /// `Pass` when the condition holds, `Unreached` otherwise
    pub const fn pass_if(cond: bool) -> Self {
        if cond { Self::Pass } else { Self::Unreached }
    }
}

impl From<GateStatus> for Reach {
    fn from(status: GateStatus) -> Self {
        match status {
            GateStatus::Pass => Self::Pass,
            GateStatus::Fail => Self::Fail,
            GateStatus::Pending => Self::Pending,
            GateStatus::Warn => Self::Warn,
        }
    }
}

/// Color class recorded on an edge when it is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeColor {
    /// Taken pass path
    Green,
    /// Taken fail path
    Red,
    /// Pending (bold when active) or not taken (thin)
    Grey,
    /// Advisory
    Yellow,
    /// Structural edge, renderer default
    None,
}

impl EdgeColor {
    /// Stroke color, `None` for the renderer default
    pub const fn stroke(self) -> Option<&'static str> {
        match self {
            Self::Green => Some(GREEN),
            Self::Red => Some(RED),
            Self::Grey => Some(GREY),
            Self::Yellow => Some(YELLOW),
            Self::None => None,
        }
    }

    /// Color of the active edge leaving a decision node with this outcome
    pub const fn for_outcome(status: GateStatus) -> Self {
        match status {
            GateStatus::Pass => Self::Green,
            GateStatus::Fail => Self::Red,
            GateStatus::Pending => Self::Grey,
            GateStatus::Warn => Self::Yellow,
        }
    }
}

/// Stroke width: heavy for the taken path, medium for advisories, thin otherwise
pub const fn stroke_width(color: EdgeColor, active: bool) -> &'static str {
    match (color, active) {
        (_, true) => "3px",
        (EdgeColor::Yellow, false) => "2px",
        (_, false) => "1px",
    }
}
