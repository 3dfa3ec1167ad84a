pub mod display;
pub mod lookup;
pub mod render;

pub use display::DisplaySlots;
pub use lookup::{Lookup, LookupOutcome, LookupRequest};
pub use render::render_text;
