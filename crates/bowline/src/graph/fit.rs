//! Fit-to-width optimization
//!
//! Re-renders the diagram under a sequence of increasingly aggressive
//! plans until one fits the width budget. Every candidate is a complete
//! re-render from scratch; nothing is incremental. Plans run strictly
//! sequentially and the scan stops at the first plan that fits.

use tracing::{debug, trace};

use super::layout::render_diagram;
use crate::core::{display_width, EdgeLabelPolicy, Flow, RenderConfig};
use crate::parser::DiagramSpec;

/// Wrap width used by plans that tighten label wrapping.
const REDUCED_WRAP_FLOOR: usize = 8;

/// One concrete bundle of layout parameters tried by the optimizer.
/// Never mutated after creation; the `with_*` builders derive new plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub direction: Flow,
    pub padding_x: i32,
    pub padding_y: i32,
    pub box_border_padding: i32,
    pub label_wrap_width: usize,
    pub edge_label_policy: EdgeLabelPolicy,
}

impl Plan {
    /// The base plan: the configuration as given, with the parsed
    /// diagram's own direction and padding overrides applied.
    pub fn base(spec: &DiagramSpec, config: &RenderConfig) -> Self {
        Self {
            direction: config.direction.unwrap_or(spec.direction),
            padding_x: spec.padding_x.unwrap_or(config.padding_x).max(1),
            padding_y: spec.padding_y.unwrap_or(config.padding_y).max(1),
            box_border_padding: config.box_border_padding.max(0),
            label_wrap_width: config.label_wrap_width,
            edge_label_policy: config.edge_label_policy,
        }
    }

    fn with_padding(&self, padding_x: i32, padding_y: i32) -> Self {
        Self {
            padding_x,
            padding_y,
            ..self.clone()
        }
    }

    fn with_wrap(&self, label_wrap_width: usize) -> Self {
        Self {
            label_wrap_width,
            ..self.clone()
        }
    }

    fn with_direction(&self, direction: Flow) -> Self {
        Self {
            direction,
            ..self.clone()
        }
    }

    fn with_policy(&self, edge_label_policy: EdgeLabelPolicy) -> Self {
        Self {
            edge_label_policy,
            ..self.clone()
        }
    }
}

/// Widest rendered line, in display columns.
pub fn max_line_width(output: &str) -> usize {
    output.lines().map(display_width).max().unwrap_or(0)
}

/// Render `spec`, re-trying progressively more aggressive plans until the
/// output fits `config.max_width`.
///
/// A budget of zero or less is unbounded: the base plan's output comes
/// back immediately without trying alternatives. If no plan fits, the
/// narrowest output wins.
pub fn fit_to_width(spec: &DiagramSpec, config: &RenderConfig) -> String {
    let base = Plan::base(spec, config);
    if config.max_width <= 0 {
        return render_diagram(spec, &base, config.charset);
    }

    let budget = config.max_width as usize;
    let mut best: Option<(usize, String)> = None;

    for plan in enumerate_plans(&base, spec.node_count()) {
        let output = render_diagram(spec, &plan, config.charset);
        let width = max_line_width(&output);
        trace!(width, budget, ?plan, "tried plan");
        if width <= budget {
            debug!(width, budget, "plan fits");
            return output;
        }
        if best.as_ref().map_or(true, |(w, _)| width < *w) {
            best = Some((width, output));
        }
    }

    debug!(budget, "no plan fits, returning narrowest");
    best.map(|(_, output)| output).unwrap_or_default()
}

/// The ordered, de-duplicated candidate list, from least to most
/// aggressive: base, reduced paddings, tighter label wrapping, flipped
/// orientation, then degraded edge labels.
fn enumerate_plans(base: &Plan, node_count: usize) -> Vec<Plan> {
    let compact = base.with_padding((base.padding_x / 2).max(1), (base.padding_y / 2).max(1));
    let tight = base.with_padding(1, 1);
    let reduced_wrap = if base.label_wrap_width == 0 {
        16
    } else {
        (base.label_wrap_width / 2).max(REDUCED_WRAP_FLOOR)
    };

    let mut plans: Vec<Plan> = Vec::new();
    let push = |plan: Plan, plans: &mut Vec<Plan>| {
        if !plans.contains(&plan) {
            plans.push(plan);
        }
    };

    for paddings in [base.clone(), compact.clone(), tight.clone()] {
        push(paddings, &mut plans);
    }
    for paddings in [base.clone(), compact, tight.clone()] {
        push(paddings.with_wrap(reduced_wrap), &mut plans);
    }

    // Flipping orientation only changes anything once two boxes exist.
    if node_count >= 2 {
        let flipped = base.direction.flipped();
        push(base.with_direction(flipped), &mut plans);
        push(tight.with_direction(flipped), &mut plans);
        push(
            tight.with_direction(flipped).with_wrap(reduced_wrap),
            &mut plans,
        );
    }

    let squeezed = tight.with_wrap(reduced_wrap);
    push(
        squeezed.with_policy(EdgeLabelPolicy::Ellipsis),
        &mut plans,
    );
    push(squeezed.with_policy(EdgeLabelPolicy::Drop), &mut plans);

    plans
}
