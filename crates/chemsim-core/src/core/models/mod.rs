//! # Core Models Module
//!
//! The data structures that make up a simulation.
//!
//! ## Key Components
//!
//! - [`atom`] - A charged particle with kinematic state and element-derived properties
//! - [`element`] - The built-in element catalog
//! - [`phase`] - Solid/liquid/gas/plasma classification
//! - [`topology`] - Bonds, bond orders and bond kinds
//! - [`photon`] - Transient energy packets that break bonds
//! - [`molecule`] - Pre-bonded molecule templates used as initial conditions
//! - [`system`] - The registry owning atoms, bonds and photons plus global controls
//! - [`ids`] - Stable slot-map keys
//!
//! ## Usage
//!
//! ```
//! use chemsim::core::models::{atom::Atom, element::Element, system::SimulationState};
//! use nalgebra::Point3;
//!
//! let mut state = SimulationState::new();
//! let id = state.add_atom(Atom::new(Element::Oxygen, Point3::origin())).unwrap();
//! assert_eq!(state.atom(id).unwrap().valence(), 2);
//! ```

pub mod atom;
pub mod element;
pub mod ids;
pub mod molecule;
pub mod phase;
pub mod photon;
pub mod system;
pub mod topology;
