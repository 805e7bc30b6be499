// Rendering backends. Both are pure functions of a document snapshot and
// the shared layout spec; classification and spacing decisions are never
// duplicated per backend.

pub mod docx;
pub mod ooxml;
pub mod preview;
