//! Validation errors reported by the fallible entry points

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverdrawError {
    #[error("index count {0} is not a multiple of 3")]
    InvalidIndexCount(usize),
    #[error("cache size {0} is below the minimum of 3")]
    CacheTooSmall(u32),
    #[error("threshold {0} must be finite and positive")]
    InvalidThreshold(f32),
    #[error("destination holds {actual} indices but {required} are required")]
    DestinationTooSmall { required: usize, actual: usize },
    #[error("index {index} references a vertex outside of the {vertex_count} available")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
