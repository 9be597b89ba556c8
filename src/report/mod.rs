//! Metric reporting in the munin plugin line protocol.
//!
//! Fields are numbered `loadtime1`, `loadtime2`, ... in declaration order;
//! targets without a URL never reach this module and take no number.

use std::io::{self, Write};

use crate::config::*;
use crate::loadtime::LoadTime;

/// Graph-level metadata printed in config mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphInfo {
    pub title: String,
    pub args: String,
    pub scale: String,
    pub vlabel: String,
    pub category: String,
    pub info: String,
}

impl Default for GraphInfo {
    fn default() -> Self {
        GraphInfo {
            title: DEFAULT_GRAPH_TITLE.to_string(),
            args: GRAPH_ARGS.to_string(),
            scale: GRAPH_SCALE.to_string(),
            vlabel: DEFAULT_GRAPH_VLABEL.to_string(),
            category: DEFAULT_GRAPH_CATEGORY.to_string(),
            info: DEFAULT_GRAPH_INFO.to_string(),
        }
    }
}

impl GraphInfo {
    /// Graph metadata with global overrides applied.
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = GraphInfo::default();
        let pick = |key: &str, default: String| {
            settings.global(key).map(str::to_string).unwrap_or(default)
        };
        GraphInfo {
            title: pick(KEY_GRAPH_TITLE, defaults.title),
            vlabel: pick(KEY_GRAPH_VLABEL, defaults.vlabel),
            category: pick(KEY_GRAPH_CATEGORY, defaults.category),
            info: pick(KEY_GRAPH_INFO, defaults.info),
            ..defaults
        }
    }
}

/// Field name for the `seq`-th reported target (1-based).
pub fn field_name(seq: usize) -> String {
    format!("{FIELD_PREFIX}{seq}")
}

/// Writes graph metadata followed by one declaration block per target.
///
/// `warning` and `critical` lines are only written when strictly positive.
pub fn write_config<W: Write>(
    out: &mut W,
    graph: &GraphInfo,
    targets: &[TargetConfig],
) -> io::Result<()> {
    writeln!(out, "graph_title {}", graph.title)?;
    writeln!(out, "graph_args {}", graph.args)?;
    writeln!(out, "graph_scale {}", graph.scale)?;
    writeln!(out, "graph_vlabel {}", graph.vlabel)?;
    writeln!(out, "graph_category {}", graph.category)?;
    writeln!(out, "graph_info {}", graph.info)?;

    for (i, target) in targets.iter().enumerate() {
        let field = field_name(i + 1);
        writeln!(out, "{field}.label {}", target.label)?;
        writeln!(out, "{field}.info {}", target.url)?;
        writeln!(out, "{field}.min 0")?;
        writeln!(out, "{field}.max {}", target.max)?;
        if target.warning > 0.0 {
            writeln!(out, "{field}.warning {}", target.warning)?;
        }
        if target.critical > 0.0 {
            writeln!(out, "{field}.critical {}", target.critical)?;
        }
    }
    out.flush()
}

/// Writes one `loadtimeN.value` line.
pub fn write_value<W: Write>(out: &mut W, seq: usize, value: &LoadTime) -> io::Result<()> {
    writeln!(out, "{}.value {}", field_name(seq), value)
}
