//! Feature preparation: one-hot encoding and schema alignment

mod matrix;
pub mod vocabulary;
pub mod encoder;
pub mod aligner;

pub use matrix::EncodedMatrix;
pub use vocabulary::{CategoricalColumn, CategoryVocabulary};
pub use encoder::{encode, encode_with};
pub use aligner::align;
