//! floatlabel Animation
//!
//! Timing for the floating-label transitions.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Spring Curves**: springs normalized to fixed-duration timing curves
//! - **Easing**: cubic ease-in/out curves
//! - **Interpolation**: lerp for points, sizes, rects, colors and transforms
//! - **Animator**: explicitly ticked scheduler with slotmap handles

pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod values;

pub use easing::Easing;
pub use scheduler::{AnimationId, Animator, Transition};
pub use spring::{Spring, SpringConfig, SpringCurve};
pub use values::Interpolate;
