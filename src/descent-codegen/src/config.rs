/// Output formatting flags, supplied by the caller alongside the model.
#[derive(Debug, Default)]
pub struct Config {
    /// Include header metadata (generation timestamp, source list). Leave
    /// off for byte-reproducible output.
    pub emit_info: bool,
    /// Source files listed in the header when `emit_info` is set.
    pub sources: Vec<String>,
    /// Wrap the emitted items in `pub mod <namespace> { .. }`.
    pub namespace: Option<String>,
}
