//! # Pitch Rendering
//!
//! Static pitch diagrams written to PNG/JPEG/BMP/SVG via `plotters`.
//!
//! ```rust,no_run
//! use track_core::viz::{Pitch, PitchConfig};
//!
//! let pitch = Pitch::new(PitchConfig::default()).unwrap();
//! let mut fig = pitch.draw();
//! fig.add_title("Kick-off shape", 16.0);
//! fig.scatter(&[(60.0, 40.0)], "#d62728").unwrap();
//! fig.save("pitch.png".as_ref()).unwrap();
//! ```

pub mod dimensions;
pub mod figure;

pub use dimensions::{Orientation, PitchConfig, PitchDimensions, PitchType};
pub use figure::{Pitch, PitchFigure};
