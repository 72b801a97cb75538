use covmap::model::CoverageRecord;
use covmap::tree::{HierarchicalReport, NodeId};

/// Build validated records from `(filename, total, covered)` triples.
pub fn records(specs: &[(&str, u64, u64)]) -> Vec<CoverageRecord> {
    specs
        .iter()
        .map(|&(name, total, covered)| CoverageRecord::new(name, total, covered).unwrap())
        .collect()
}

/// Sum `(total, covered)` over the file leaves below `id`.
#[allow(dead_code)]
pub fn leaf_totals(report: &HierarchicalReport, id: NodeId) -> (u64, u64) {
    let node = report.tree().node(id);
    if node.is_file() {
        return (node.total_lines(), node.covered_lines());
    }
    node.children()
        .iter()
        .map(|c| leaf_totals(report, *c))
        .fold((0, 0), |(t, c), (ct, cc)| (t + ct, c + cc))
}
