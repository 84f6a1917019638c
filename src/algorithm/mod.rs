/// Squared RGB distance between pixels and neighborhoods
pub mod cost;
/// Synthesis engine orchestration and lifecycle
pub mod executor;
/// Exhaustive nearest-neighborhood search over the source
pub mod matching;
