// Mappers module - Reference mapper implementations
//
// Only NROM ships with the core; bank-switching mappers are supplied by
// front-ends through the `Mapper` trait.

mod mapper0;

pub use mapper0::Mapper0;

use thiserror::Error;

/// Error type for mapper creation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// PRG-ROM has a size the mapper cannot address
    #[error("invalid PRG-ROM size: {0} bytes")]
    InvalidPrgRomSize(usize),
    /// CHR-ROM has a size the mapper cannot address
    #[error("invalid CHR-ROM size: {0} bytes")]
    InvalidChrRomSize(usize),
}
