//! Readiness flowchart synthesis
//!
//! Turns a [`ReadinessSnapshot`] into a Mermaid flowchart whose colors and
//! emphasized arrows trace the path the PR is actually on. Synthesis is pure
//! and deterministic: the same snapshot always renders to the same bytes.
//!
//! Edges are recorded in a fixed order together with their color, and the
//! `linkStyle` directives are rendered from those same records in a second
//! pass. Link styles are addressed by position, so edges must never be
//! reordered once appended.

mod label;
mod style;

pub use label::{LINE_BREAK, Label};
pub use style::{EdgeColor, Reach};

use crate::evaluate::ReadinessSnapshot;
use crate::gates::GateStatus;
use crate::types::PrSummary;
use std::collections::HashSet;
use std::fmt;
use style::stroke_width;

const WARNING_SIGN: &str = "\u{26a0}\u{fe0f}";

/// Stable node identifiers, in order of first appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Entry point
    Start,
    /// Advisory: PR should be a draft
    DraftWarn,
    /// CI-wait hub
    WaitForCi,
    /// Branch currency decision
    BranchCheck,
    /// Composite checks/threads decision
    ChecksGate,
    /// Remediation for a stale branch
    UpdateBranch,
    /// Remediation for failing checks or open threads
    FixChecks,
    /// Junction reached when all gates pass
    CiPassed,
    /// PR still a draft although gates passed
    DraftCheck,
    /// Terminal success
    ReadyForReview,
    /// Advisory: too many reviewers
    ReviewerWarn,
}

impl NodeId {
    /// Identifier as written in the diagram
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::DraftWarn => "DraftWarn",
            Self::WaitForCi => "WaitForCI",
            Self::BranchCheck => "BranchCheck",
            Self::ChecksGate => "ChecksGate",
            Self::UpdateBranch => "UpdateBranch",
            Self::FixChecks => "FixChecks",
            Self::CiPassed => "CIPassed",
            Self::DraftCheck => "DraftCheck",
            Self::ReadyForReview => "ReadyForReview",
            Self::ReviewerWarn => "ReviewerWarn",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `([text])`
    Stadium,
    /// `[text]`
    Rect,
    /// `{text}`
    Decision,
    /// `(text)`
    Rounded,
    /// `[/"text"\]`
    Advisory,
}

impl Shape {
    fn wrap(self, label: &Label) -> String {
        match self {
            Self::Stadium => format!("([{label}])"),
            Self::Rect => format!("[{label}]"),
            Self::Decision => format!("{{{label}}}"),
            Self::Rounded => format!("({label})"),
            Self::Advisory => format!("[/\"{label}\"\\]"),
        }
    }
}

/// A node and its reachability classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    /// Stable identifier
    pub id: NodeId,
    /// Outline
    pub shape: Shape,
    /// Display text
    pub label: Label,
    /// Determines the fill color
    pub reach: Reach,
}

/// Arrowhead at the target end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// Regular arrow
    Point,
    /// Cross, used for advisories hanging off the flow
    Cross,
}

/// A directed edge, carrying its own style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    /// Source node
    pub from: NodeId,
    /// Target node
    pub to: NodeId,
    /// Edge text, if any
    pub label: Option<Label>,
    /// Solid heavy arrow when set, dotted otherwise
    pub active: bool,
    /// Label drawn in bold; set only on the taken branch of a decision
    pub bold: bool,
    /// Arrowhead
    pub arrow: Arrow,
    /// Color class for the link style
    pub color: EdgeColor,
}

impl DiagramEdge {
    /// Unconditional solid edge with default styling
    fn flow(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: None,
            active: true,
            bold: false,
            arrow: Arrow::Point,
            color: EdgeColor::None,
        }
    }

    /// Dotted edge to an advisory node
    fn advisory(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: None,
            active: false,
            bold: false,
            arrow: Arrow::Cross,
            color: EdgeColor::Yellow,
        }
    }

    /// Outgoing branch of a decision node.
    ///
    /// The branch is active iff `outcome` is what actually happened; an
    /// active non-pass branch carries the gate detail in its label.
    fn decision(
        from: NodeId,
        to: NodeId,
        text: &str,
        outcome: GateStatus,
        taken: GateStatus,
        detail: &str,
    ) -> Self {
        let active = outcome == taken;
        let label = if active && outcome != GateStatus::Pass && !detail.is_empty() {
            format!("{text}: {detail}")
        } else {
            text.to_string()
        };
        Self {
            from,
            to,
            label: Some(Label::new(&label)),
            active,
            bold: active,
            arrow: Arrow::Point,
            color: if active {
                EdgeColor::for_outcome(outcome)
            } else {
                EdgeColor::Grey
            },
        }
    }

    fn connector(&self) -> &'static str {
        match (self.active, self.arrow) {
            (true, Arrow::Point) => "==>",
            (true, Arrow::Cross) => "==x",
            (false, Arrow::Point) => "-.->",
            (false, Arrow::Cross) => "-.-x",
        }
    }
}

/// Synthesized flowchart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
}

impl Diagram {
    /// Nodes in order of first appearance
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Edges in emission order
    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges leaving `id`
    pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &DiagramEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    fn add_node(&mut self, id: NodeId, shape: Shape, label: Label, reach: Reach) {
        self.nodes.push(DiagramNode {
            id,
            shape,
            label,
            reach,
        });
    }

    /// Render as a fenced Mermaid block
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Node reference; the first mention also carries shape and label
    fn endpoint(&self, id: NodeId, declared: &mut HashSet<NodeId>) -> String {
        match self.node(id) {
            Some(node) if declared.insert(id) => format!("{id}{}", node.shape.wrap(&node.label)),
            _ => id.to_string(),
        }
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "```mermaid")?;
        writeln!(f, "flowchart TD")?;

        let mut declared: HashSet<NodeId> = HashSet::new();
        for edge in &self.edges {
            let from = self.endpoint(edge.from, &mut declared);
            let to = self.endpoint(edge.to, &mut declared);
            let connector = edge.connector();
            match &edge.label {
                Some(label) if edge.bold => {
                    writeln!(f, "    {from} {connector}|<b>{label}</b>| {to}")?;
                }
                Some(label) => writeln!(f, "    {from} {connector}|{label}| {to}")?,
                None => writeln!(f, "    {from} {connector} {to}")?,
            }
        }

        for node in &self.nodes {
            writeln!(
                f,
                "    style {} fill:{},color:{}",
                node.id,
                node.reach.fill(),
                node.reach.text()
            )?;
        }

        // Link styles are positional: index i styles the i-th edge above
        for (index, edge) in self.edges.iter().enumerate() {
            if let Some(stroke) = edge.color.stroke() {
                writeln!(
                    f,
                    "    linkStyle {index} stroke:{stroke},stroke-width:{}",
                    stroke_width(edge.color, edge.active)
                )?;
            }
        }

        write!(f, "```")
    }
}

/// Build the flowchart for a snapshot
pub fn synthesize(snapshot: &ReadinessSnapshot) -> Diagram {
    let branch = snapshot.branch.status;
    let composite = snapshot.checks_gate.status;
    let all_passed = snapshot.all_passed;
    let is_draft = snapshot.pr.is_draft;

    let draft_needs_action = all_passed && is_draft;
    let not_draft_warning = !all_passed && !is_draft && snapshot.draft.status == GateStatus::Warn;
    let reviewer_warning = snapshot.reviewers.status == GateStatus::Warn;

    // The branch a decision node actually takes
    let branch_taken = if branch == GateStatus::Pass {
        GateStatus::Pass
    } else {
        GateStatus::Fail
    };
    let checks_taken = match composite {
        GateStatus::Fail => GateStatus::Fail,
        GateStatus::Pending => GateStatus::Pending,
        GateStatus::Pass | GateStatus::Warn => GateStatus::Pass,
    };

    let mut diagram = Diagram::default();

    diagram.add_node(NodeId::Start, Shape::Stadium, Label::new("Code Complete"), Reach::Pass);
    if not_draft_warning {
        diagram.add_node(
            NodeId::DraftWarn,
            Shape::Advisory,
            Label::new(&format!("{WARNING_SIGN} {}", snapshot.draft.detail)),
            Reach::Warn,
        );
    }
    diagram.add_node(
        NodeId::WaitForCi,
        Shape::Rect,
        Label::new("Wait for CI to run"),
        Reach::Pending,
    );
    diagram.add_node(
        NodeId::BranchCheck,
        Shape::Decision,
        Label::lines(["Is the branch up to date", "with the target branch?"]),
        branch.into(),
    );
    diagram.add_node(
        NodeId::ChecksGate,
        Shape::Decision,
        Label::lines(["All CI checks passed", "and review comments", "resolved?"]),
        composite.into(),
    );
    diagram.add_node(
        NodeId::UpdateBranch,
        Shape::Rect,
        Label::lines(["Update the branch from", "GitHub or the CLI"]),
        Reach::fail_if(branch == GateStatus::Fail),
    );
    diagram.add_node(
        NodeId::FixChecks,
        Shape::Rect,
        Label::lines(["Fix failing checks", "and resolve comments"]),
        Reach::fail_if(composite == GateStatus::Fail),
    );
    diagram.add_node(
        NodeId::CiPassed,
        Shape::Rounded,
        Label::new("All gates passed"),
        Reach::pass_if(all_passed),
    );
    if draft_needs_action {
        diagram.add_node(
            NodeId::DraftCheck,
            Shape::Decision,
            Label::new("PR is still a draft"),
            Reach::Fail,
        );
    }
    diagram.add_node(
        NodeId::ReadyForReview,
        Shape::Stadium,
        Label::new("Ready for Review"),
        Reach::pass_if(all_passed && !is_draft),
    );
    if reviewer_warning {
        diagram.add_node(
            NodeId::ReviewerWarn,
            Shape::Advisory,
            Label::new(&format!("{WARNING_SIGN} {}", snapshot.reviewers.detail)),
            Reach::Warn,
        );
    }

    let branch_detail = snapshot.branch.detail.as_str();
    let checks_detail = snapshot.checks_gate.detail.as_str();
    let edges = &mut diagram.edges;

    if not_draft_warning {
        edges.push(DiagramEdge::advisory(NodeId::Start, NodeId::DraftWarn));
    }
    edges.push(DiagramEdge::flow(NodeId::Start, NodeId::WaitForCi));
    edges.push(DiagramEdge::flow(NodeId::WaitForCi, NodeId::BranchCheck));
    edges.push(DiagramEdge::flow(NodeId::WaitForCi, NodeId::ChecksGate));

    edges.push(DiagramEdge::decision(
        NodeId::BranchCheck,
        NodeId::UpdateBranch,
        "No",
        GateStatus::Fail,
        branch_taken,
        branch_detail,
    ));
    edges.push(DiagramEdge::flow(NodeId::UpdateBranch, NodeId::WaitForCi));

    edges.push(DiagramEdge::decision(
        NodeId::ChecksGate,
        NodeId::FixChecks,
        "No",
        GateStatus::Fail,
        checks_taken,
        checks_detail,
    ));
    edges.push(DiagramEdge::flow(NodeId::FixChecks, NodeId::WaitForCi));
    edges.push(DiagramEdge::decision(
        NodeId::ChecksGate,
        NodeId::WaitForCi,
        "Some pending",
        GateStatus::Pending,
        checks_taken,
        checks_detail,
    ));

    edges.push(DiagramEdge::decision(
        NodeId::BranchCheck,
        NodeId::CiPassed,
        "Yes",
        GateStatus::Pass,
        branch_taken,
        branch_detail,
    ));
    edges.push(DiagramEdge::decision(
        NodeId::ChecksGate,
        NodeId::CiPassed,
        "Yes",
        GateStatus::Pass,
        checks_taken,
        checks_detail,
    ));

    if draft_needs_action {
        edges.push(DiagramEdge {
            color: EdgeColor::Red,
            ..DiagramEdge::flow(NodeId::CiPassed, NodeId::DraftCheck)
        });
        edges.push(DiagramEdge {
            label: Some(Label::new("Mark as Ready")),
            color: EdgeColor::Red,
            ..DiagramEdge::flow(NodeId::DraftCheck, NodeId::ReadyForReview)
        });
    } else {
        edges.push(DiagramEdge {
            active: all_passed,
            color: if all_passed {
                EdgeColor::Green
            } else {
                EdgeColor::Grey
            },
            ..DiagramEdge::flow(NodeId::CiPassed, NodeId::ReadyForReview)
        });
    }

    if reviewer_warning {
        edges.push(DiagramEdge::advisory(NodeId::ReadyForReview, NodeId::ReviewerWarn));
    }

    diagram
}

/// Markdown header: PR number and title, refs, upper-cased state
pub fn render_header(pr: &PrSummary) -> String {
    format!(
        "## PR #{}: {}\n\n`{}` -> `{}` | State: {}\n",
        pr.number,
        pr.title,
        pr.head_ref,
        pr.base_ref,
        pr.state.to_string().to_uppercase()
    )
}

/// Full report text: header followed by the fenced flowchart
pub fn generate_chart(snapshot: &ReadinessSnapshot) -> String {
    format!(
        "{}\n{}",
        render_header(&snapshot.pr),
        synthesize(snapshot).render()
    )
}
