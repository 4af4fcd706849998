//! QA Forge Emitter
//!
//! Renders [`Scenario`](qa_model::Scenario)s into runnable test sources for
//! independent targets.
//!
//! # Core Concepts
//!
//! - [`Target`]: output flavour (style, language, naming, paths, template set)
//! - [`Renderer`] / [`RendererRegistry`]: template sets keyed by id
//! - [`CodeEmitter`]: pure rendering plus writes through an [`ArtifactStore`]
//! - [`LocatorSource`]: optional element-locator hints for page objects
//!
//! Every suite holds exactly one test unit per test case, and every unit
//! starts with the target's navigation step. Two requirements whose titles
//! normalize to the same name share output paths; the later write wins.
//!
//! # Example
//!
//! ```rust
//! use qa_emit::{CodeEmitter, FsArtifactStore, Target};
//! use qa_model::{Scenario, TestCase};
//! use std::sync::Arc;
//!
//! let scenario = Scenario::new(1, "User Login", vec![TestCase::new("Login succeeds").unwrap()]).unwrap();
//! let emitter = CodeEmitter::new(Arc::new(FsArtifactStore::new("generated")));
//! let artifacts = emitter.render(&scenario, &Target::unittest()).unwrap();
//! assert_eq!(artifacts[1].unit_count, 1);
//! ```

#![warn(unreachable_pub)]

pub mod artifact;
pub mod emitter;
pub mod error;
pub mod locator;
pub mod renderer;
pub mod store;
pub mod target;
pub mod view;

pub use artifact::{ArtifactKind, GeneratedArtifact};
pub use emitter::{CodeEmitter, EmitSummary, RenderFailure};
pub use error::{RenderError, RenderResult};
pub use locator::{LocatorHint, LocatorSource, LocatorStrategy, NoLocators, StaticLocators};
pub use renderer::{PytestRenderer, Renderer, RendererRegistry, TestNgRenderer, UnittestRenderer};
pub use store::{ArtifactStore, FsArtifactStore};
pub use target::{Language, Target, TargetStyle, BUILTIN_TARGET_IDS, DEFAULT_BASE_URL_ENV};
pub use view::{DataEntry, LocatorView, PageView, SuiteView, UnitView};
