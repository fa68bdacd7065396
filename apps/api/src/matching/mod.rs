// Job-matching pipeline: merge joins listings with scores, the
// orchestrator sequences search → region inference → filter → merge.
// All outbound calls go through the clients module.

pub mod merge;
pub mod orchestrator;
