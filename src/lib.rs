// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
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
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! First-person walkthrough of a field of textured cubes, built on wgpu.
//!
//! The interesting part is the camera: yaw/pitch orientation state, an
//! orthonormal front/right/up basis derived from it, per-frame movement
//! integration, and the view matrix the GPU uniform is rebuilt from. The
//! rest is deliberately small: one WGSL shader loaded from disk, one
//! decoded image texture with a CPU-generated mip chain, one instanced
//! cube pipeline, and a winit shell.
//!
//! # Key entry points
//!
//! - [`camera::Camera`] - the first-person camera model
//! - [`engine::WalkEngine`] - window-to-frame orchestration
//! - [`options::Options`] - runtime tunables (TOML)

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
