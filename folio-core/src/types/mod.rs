//! Core types shared by the assembly pipeline

mod block;
mod entry;
mod furniture;
mod stream;
mod toc;

pub use block::{BlockKind, ContentBlock, BULLET};
pub use entry::{BilingualEntry, Language};
pub use furniture::{PageFurnitureSpec, SuppressedPages, PAGE_PLACEHOLDER};
pub use stream::{RenderItem, RenderStream, TextRole};
pub use toc::TocEntry;
