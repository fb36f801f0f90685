// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! An interactive 3D birthday greeting built on wgpu.
//!
//! A key press types a short message line by line onto a dark overlay.
//! When typing finishes and a short delay passes, the overlay fades out
//! over a room with a table, framed pictures and birthday cards. Clicking
//! a card lifts it toward the viewer; clicking empty space puts it back.
//! Fireworks burst overhead and the camera orbits on drag.
//!
//! # Key entry points
//!
//! - [`GreetingEngine`] - all greeting state behind one [`clock::Clock`]
//! - [`renderer::SceneRenderer`] - draws an engine's state each frame
//! - [`Options`] - TOML-backed configuration for every part
//! - `Viewer` (feature `viewer`) - a native winit window
//! - `web::start` (feature `web`) - the browser entry point
//!
//! # Architecture
//!
//! The engine holds no GPU state. Timers (typing ticks, the reveal delay,
//! cursor blink, firework launches) and per-frame tasks (overlay fade, card
//! motion, fireworks, camera damping) are all registered on a single clock
//! that the engine drains in [`GreetingEngine::update`]. Front ends own the
//! window or canvas, forward input, and hand the engine to the renderer.

pub mod assets;
pub mod audio;
pub mod camera;
pub mod clock;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod intro;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod selection;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use engine::{command::GreetingCommand, FrameState, GreetingEngine};
pub use error::GreetingError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
