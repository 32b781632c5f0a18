pub mod assembler;
pub mod document;

#[cfg(test)]
pub mod testing;

pub use assembler::Assembler;
pub use document::PdfDocument;
